//! Directed connectors between nodes.

use super::{count_as_f64, escape};
use super::layout::{Layout, Point};
use crate::flow::{Link, LinkDirection, WalkthroughController};

const HIGHLIGHTED: &str = "#3b82f6";
const MUTED: &str = "#717182";

/// Distance the flow affordance travels per loop.
const FLOW_OFFSET: f64 = 5.0;

/// Marker id of the highlighted arrowhead.
pub const HIGHLIGHTED_MARKER: &str = "arrow-highlighted";
/// Marker id of the muted arrowhead.
pub const MUTED_MARKER: &str = "arrow-muted";

/// Colours of a branch label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelStyle {
    /// Text colour.
    pub text: &'static str,
    /// Background fill.
    pub background: &'static str,
    /// Border colour.
    pub border: &'static str,
}

impl LabelStyle {
    const fn for_highlight(highlighted: bool) -> Self {
        if highlighted {
            Self {
                text: "#2563eb",
                background: "#eff6ff",
                border: "#bfdbfe",
            }
        } else {
            Self {
                text: MUTED,
                background: "#ffffff",
                border: "#e5e5e7",
            }
        }
    }
}

/// Fully resolved appearance of one connector.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorView {
    /// Source step id.
    pub from: String,
    /// Target step id.
    pub to: String,
    /// Polyline from source to target.
    pub points: Vec<Point>,
    /// Exit direction from the source.
    pub direction: LinkDirection,
    /// Branch label.
    pub label: Option<String>,
    /// Whether the link lies on the highlighted path.
    pub highlighted: bool,
    /// Whether the looping flow animation runs.
    pub animated: bool,
    /// Stroke and arrowhead colour.
    pub stroke: &'static str,
    /// Label colours.
    pub label_style: LabelStyle,
}

/// Resolve the connector for `link`.
///
/// Returns `None` when either end has no placement.
#[must_use]
pub fn connector_view(
    link: &Link,
    layout: &Layout,
    controller: &WalkthroughController,
) -> Option<ConnectorView> {
    let points = layout.route(&link.from, &link.to, link.direction)?;
    let highlighted = controller.is_link_highlighted(&link.from, &link.to);
    Some(ConnectorView::new(link, points, highlighted))
}

impl ConnectorView {
    /// Build a connector along `points`.
    ///
    /// The flow animation is enabled exactly when `highlighted` is set.
    #[must_use]
    pub fn new(link: &Link, points: Vec<Point>, highlighted: bool) -> Self {
        Self {
            from: link.from.clone(),
            to: link.to.clone(),
            points,
            direction: link.direction,
            label: link.label.clone(),
            highlighted,
            animated: highlighted,
            stroke: if highlighted { HIGHLIGHTED } else { MUTED },
            label_style: LabelStyle::for_highlight(highlighted),
        }
    }

    /// SVG group drawing this connector.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let marker = if self.highlighted {
            HIGHLIGHTED_MARKER
        } else {
            MUTED_MARKER
        };
        let path = self
            .points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let verb = if index == 0 { 'M' } else { 'L' };
                format!("{verb}{} {}", point.x, point.y)
            })
            .collect::<Vec<_>>()
            .join(" ");

        let mut svg = format!(
            "<g class=\"connector\" data-from=\"{}\" data-to=\"{}\">",
            escape(&self.from),
            escape(&self.to)
        );
        svg.push_str(&format!(
            "<path d=\"{path}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\" marker-end=\"url(#{marker})\"/>",
            self.stroke
        ));
        if self.animated {
            svg.push_str(&self.flow_animation());
        }
        if let Some(label) = &self.label {
            svg.push_str(&self.label_svg(label));
        }
        svg.push_str("</g>");
        svg
    }

    fn flow_animation(&self) -> String {
        let (dx, dy) = match self.direction {
            LinkDirection::Down => (0.0, FLOW_OFFSET),
            LinkDirection::Left => (-FLOW_OFFSET, 0.0),
            LinkDirection::Right => (FLOW_OFFSET, 0.0),
        };
        format!(
            "<animateTransform attributeName=\"transform\" type=\"translate\" values=\"0 0;{dx} {dy};0 0\" dur=\"1.5s\" repeatCount=\"indefinite\"/>"
        )
    }

    fn label_svg(&self, label: &str) -> String {
        let anchor = match self.points.as_slice() {
            [first, second, ..] => Point::new((first.x + second.x) / 2.0, first.y - 14.0),
            [only] => *only,
            [] => return String::new(),
        };
        let width = 16.0 + 7.5 * count_as_f64(label.chars().count());
        let style = self.label_style;
        format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{width}\" height=\"20\" rx=\"4\" fill=\"{}\" stroke=\"{}\"/><text x=\"{}\" y=\"{}\" text-anchor=\"middle\" dominant-baseline=\"middle\" font-family=\"sans-serif\" font-size=\"13\" fill=\"{}\">{}</text>",
            anchor.x - width / 2.0,
            anchor.y - 10.0,
            style.background,
            style.border,
            anchor.x,
            anchor.y,
            style.text,
            escape(label)
        )
    }
}

/// Arrowhead marker definitions referenced by connectors.
#[must_use]
pub fn marker_defs() -> String {
    [(HIGHLIGHTED_MARKER, HIGHLIGHTED), (MUTED_MARKER, MUTED)]
        .iter()
        .map(|(id, colour)| {
            format!(
                "<marker id=\"{id}\" viewBox=\"0 0 10 10\" refX=\"9\" refY=\"5\" markerWidth=\"8\" markerHeight=\"8\" orient=\"auto\"><path d=\"M0 0 L10 5 L0 10 z\" fill=\"{colour}\"/></marker>"
            )
        })
        .collect()
}
