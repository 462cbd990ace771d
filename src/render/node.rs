//! Visual nodes for process steps.

use super::layout::NodeBox;
use super::{count_as_f64, escape, wrap_words};
use crate::flow::{Step, StepCategory, WalkthroughController};

const PRIMARY: &str = "#030213";
const PRIMARY_FOREGROUND: &str = "#ffffff";
const CARD: &str = "#ffffff";
const BORDER: &str = "#e5e5e7";
const ACCENT: &str = "#e9ebef";
const SECONDARY: &str = "#ececf0";
const COMPLETED_FILL: &str = "#dcfce7";
const COMPLETED_STROKE: &str = "#22c55e";
const COMPLETED_TEXT: &str = "#166534";
const HIGHLIGHT_RING: &str = "#60a5fa";

/// Scale applied to the active node.
const ACTIVE_SCALE: f64 = 1.05;

/// Horizontal slant of a system node's parallelogram.
const SYSTEM_SLANT: f64 = 20.0;

/// Outline of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    /// Fully rounded capsule for start and end points.
    Pill,
    /// Rounded rectangle for activities.
    RoundedRect,
    /// Diamond for decisions.
    Diamond,
    /// Slanted parallelogram for system activities.
    Parallelogram,
}

impl NodeShape {
    /// Shape used for a step category.
    #[must_use]
    pub const fn for_category(category: StepCategory) -> Self {
        match category {
            StepCategory::Start | StepCategory::End => Self::Pill,
            StepCategory::Activity => Self::RoundedRect,
            StepCategory::Decision => Self::Diamond,
            StepCategory::System => Self::Parallelogram,
        }
    }

    /// Unscaled width and height.
    #[must_use]
    pub const fn size(self) -> (f64, f64) {
        match self {
            Self::Pill => (280.0, 56.0),
            Self::RoundedRect | Self::Parallelogram => (320.0, 72.0),
            Self::Diamond => (150.0, 150.0),
        }
    }

    const fn wrap_width(self) -> usize {
        match self {
            Self::Diamond => 12,
            Self::Pill | Self::RoundedRect | Self::Parallelogram => 36,
        }
    }
}

/// Per-node booleans derived by the walkthrough controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeFlags {
    /// The node is the walkthrough's active step.
    pub active: bool,
    /// The node has been passed.
    pub completed: bool,
    /// The node lies on the highlighted path.
    pub highlighted: bool,
}

impl NodeFlags {
    /// Query the controller for the flags of step `id`.
    #[must_use]
    pub fn for_step(controller: &WalkthroughController, id: &str) -> Self {
        Self {
            active: controller.is_step_active(id),
            completed: controller.is_step_completed(id),
            highlighted: controller.is_step_highlighted(id),
        }
    }
}

/// Notification that a node was clicked.
///
/// The renderer only reports which step was hit; the session decides what the
/// click means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeClick {
    step_id: String,
}

impl NodeClick {
    /// A click on the step with the given id.
    #[must_use]
    pub fn new(step_id: impl Into<String>) -> Self {
        Self {
            step_id: step_id.into(),
        }
    }

    /// The clicked step.
    #[must_use]
    pub fn step_id(&self) -> &str {
        &self.step_id
    }
}

/// Outline ring around a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    /// Ring colour.
    pub colour: &'static str,
    /// Ring opacity.
    pub opacity: f64,
    /// Ring width in pixels.
    pub width: f64,
}

/// Looping overlay drawn over an active node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    /// Overlay fill.
    pub colour: &'static str,
    /// Opacity keyframes.
    pub opacity: &'static str,
    /// Loop duration in seconds.
    pub duration: f64,
}

/// Fully resolved appearance of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeView {
    /// Step id the node represents.
    pub step_id: String,
    /// Step category.
    pub category: StepCategory,
    /// Outline.
    pub shape: NodeShape,
    /// Wrapped title lines.
    pub lines: Vec<String>,
    /// Fill colour.
    pub fill: &'static str,
    /// Outline colour.
    pub stroke: &'static str,
    /// Text colour.
    pub text: &'static str,
    /// Ring, if the node is active or highlighted.
    pub ring: Option<Ring>,
    /// Overlay animation, present only while active.
    pub pulse: Option<Pulse>,
    /// Scale factor applied around the centre.
    pub scale: f64,
    /// Entrance delay in seconds.
    pub entrance_delay: f64,
}

impl NodeView {
    /// Resolve the appearance of `step` under `flags`.
    #[must_use]
    pub fn new(step: &Step, flags: NodeFlags) -> Self {
        let shape = NodeShape::for_category(step.category);
        let (mut fill, mut stroke, mut text) = match step.category {
            StepCategory::Start | StepCategory::End => (PRIMARY, PRIMARY, PRIMARY_FOREGROUND),
            StepCategory::Activity => (CARD, BORDER, PRIMARY),
            StepCategory::Decision => (ACCENT, BORDER, PRIMARY),
            StepCategory::System => (SECONDARY, BORDER, PRIMARY),
        };
        if flags.completed {
            (fill, stroke, text) = (COMPLETED_FILL, COMPLETED_STROKE, COMPLETED_TEXT);
        }

        let ring = if flags.active {
            Some(Ring {
                colour: PRIMARY,
                opacity: 0.5,
                width: 4.0,
            })
        } else if flags.highlighted {
            Some(Ring {
                colour: HIGHLIGHT_RING,
                opacity: 1.0,
                width: 2.0,
            })
        } else {
            None
        };

        Self {
            step_id: step.id.clone(),
            category: step.category,
            shape,
            lines: wrap_words(&step.title, shape.wrap_width()),
            fill,
            stroke,
            text,
            ring,
            pulse: flags.active.then_some(active_pulse(step.category)),
            scale: if flags.active { ACTIVE_SCALE } else { 1.0 },
            entrance_delay: step.display_delay,
        }
    }

    /// Click notification for this node.
    #[must_use]
    pub fn click(&self) -> NodeClick {
        NodeClick::new(self.step_id.clone())
    }

    /// SVG group drawing this node inside `bounds`.
    #[must_use]
    pub fn to_svg(&self, bounds: &NodeBox) -> String {
        let scaled = NodeBox {
            centre: bounds.centre,
            width: bounds.width * self.scale,
            height: bounds.height * self.scale,
        };
        let id = escape(&self.step_id);
        let mut svg = format!(
            "<g class=\"node node-{}\" data-step-id=\"{id}\">",
            self.category.as_str()
        );

        if let Some(ring) = self.ring {
            let ringed = NodeBox {
                centre: scaled.centre,
                width: scaled.width + ring.width * 2.0,
                height: scaled.height + ring.width * 2.0,
            };
            svg.push_str(&outline(
                self.shape,
                &ringed,
                &format!(
                    "fill=\"none\" stroke=\"{}\" stroke-opacity=\"{}\" stroke-width=\"{}\"",
                    ring.colour, ring.opacity, ring.width
                ),
            ));
        }

        svg.push_str(&outline(
            self.shape,
            &scaled,
            &format!(
                "fill=\"{}\" stroke=\"{}\" stroke-width=\"2\"",
                self.fill, self.stroke
            ),
        ));

        if let Some(pulse) = self.pulse {
            let overlay = outline(
                self.shape,
                &scaled,
                &format!("fill=\"{}\" stroke=\"none\"", pulse.colour),
            );
            let animate = format!(
                "<animate attributeName=\"opacity\" values=\"{}\" dur=\"{}s\" repeatCount=\"indefinite\"/>",
                pulse.opacity, pulse.duration
            );
            svg.push_str(&format!("<g opacity=\"{}\">{overlay}{animate}</g>", first_keyframe(pulse.opacity)));
        }

        svg.push_str(&self.label_svg(&scaled));
        svg.push_str("</g>");
        svg
    }

    fn label_svg(&self, bounds: &NodeBox) -> String {
        const LINE_HEIGHT: f64 = 17.0;
        let count = count_as_f64(self.lines.len());
        let first = bounds.centre.y - LINE_HEIGHT * (count - 1.0) / 2.0;
        let weight = if self.category.is_terminal() { "bold" } else { "normal" };
        let mut svg = format!(
            "<text x=\"{}\" text-anchor=\"middle\" dominant-baseline=\"middle\" font-family=\"sans-serif\" font-size=\"14\" font-weight=\"{weight}\" fill=\"{}\">",
            bounds.centre.x, self.text
        );
        for (index, line) in self.lines.iter().enumerate() {
            let y = first + LINE_HEIGHT * count_as_f64(index);
            svg.push_str(&format!(
                "<tspan x=\"{}\" y=\"{y}\">{}</tspan>",
                bounds.centre.x,
                escape(line)
            ));
        }
        svg.push_str("</text>");
        svg
    }
}

const fn active_pulse(category: StepCategory) -> Pulse {
    match category {
        StepCategory::Start | StepCategory::End => Pulse {
            colour: PRIMARY,
            opacity: "0.3;0.6;0.3",
            duration: 2.0,
        },
        StepCategory::Activity => Pulse {
            colour: "#3b82f6",
            opacity: "0.1;0.3;0.1",
            duration: 1.5,
        },
        StepCategory::Decision => Pulse {
            colour: "#eab308",
            opacity: "0.2;0.5;0.2",
            duration: 1.5,
        },
        StepCategory::System => Pulse {
            colour: "#a855f7",
            opacity: "0.2;0.4;0.2",
            duration: 1.5,
        },
    }
}

fn first_keyframe(values: &str) -> &str {
    values.split(';').next().unwrap_or("1")
}

/// Outline element for `shape` filling `bounds`, with extra attributes.
pub(crate) fn outline(shape: NodeShape, bounds: &NodeBox, attributes: &str) -> String {
    let x0 = bounds.centre.x - bounds.width / 2.0;
    let y0 = bounds.centre.y - bounds.height / 2.0;
    let x1 = x0 + bounds.width;
    let y1 = y0 + bounds.height;
    let (cx, cy) = (bounds.centre.x, bounds.centre.y);
    match shape {
        NodeShape::Pill => format!(
            "<rect x=\"{x0}\" y=\"{y0}\" width=\"{}\" height=\"{}\" rx=\"{}\" {attributes}/>",
            bounds.width,
            bounds.height,
            bounds.height / 2.0
        ),
        NodeShape::RoundedRect => format!(
            "<rect x=\"{x0}\" y=\"{y0}\" width=\"{}\" height=\"{}\" rx=\"8\" {attributes}/>",
            bounds.width, bounds.height
        ),
        NodeShape::Diamond => format!(
            "<polygon points=\"{cx},{y0} {x1},{cy} {cx},{y1} {x0},{cy}\" {attributes}/>"
        ),
        NodeShape::Parallelogram => {
            let slant = SYSTEM_SLANT.min(bounds.width / 4.0);
            format!(
                "<polygon points=\"{x0},{y0} {},{y0} {x1},{y1} {},{y1}\" {attributes}/>",
                x1 - slant,
                x0 + slant
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::layout::Point;
    use rstest::{fixture, rstest};

    #[fixture]
    fn bounds() -> NodeBox {
        NodeBox {
            centre: Point::new(600.0, 400.0),
            width: 320.0,
            height: 72.0,
        }
    }

    fn step(category: StepCategory) -> Step {
        Step::new("calculate", "POS System Automatically Calculates Total", "", category, 0.6)
    }

    #[rstest]
    #[case(StepCategory::Start, NodeShape::Pill)]
    #[case(StepCategory::End, NodeShape::Pill)]
    #[case(StepCategory::Activity, NodeShape::RoundedRect)]
    #[case(StepCategory::Decision, NodeShape::Diamond)]
    #[case(StepCategory::System, NodeShape::Parallelogram)]
    fn category_selects_shape(#[case] category: StepCategory, #[case] shape: NodeShape) {
        assert_eq!(NodeView::new(&step(category), NodeFlags::default()).shape, shape);
    }

    #[rstest]
    fn idle_node_has_no_ring_or_pulse() {
        let view = NodeView::new(&step(StepCategory::System), NodeFlags::default());
        assert!(view.ring.is_none());
        assert!(view.pulse.is_none());
        assert_eq!(view.fill, SECONDARY);
        assert!((view.scale - 1.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn active_node_is_ringed_scaled_and_pulsing() {
        let flags = NodeFlags {
            active: true,
            completed: false,
            highlighted: true,
        };
        let view = NodeView::new(&step(StepCategory::Decision), flags);
        assert_eq!(view.ring.map(|r| r.width), Some(4.0));
        assert_eq!(view.pulse.map(|p| p.colour), Some("#eab308"));
        assert!((view.scale - ACTIVE_SCALE).abs() < f64::EPSILON);
    }

    #[rstest]
    fn completed_node_uses_completed_palette() {
        let flags = NodeFlags {
            active: false,
            completed: true,
            highlighted: true,
        };
        let view = NodeView::new(&step(StepCategory::Activity), flags);
        assert_eq!(
            (view.fill, view.stroke, view.text),
            (COMPLETED_FILL, COMPLETED_STROKE, COMPLETED_TEXT)
        );
        assert_eq!(view.ring.map(|r| r.colour), Some(HIGHLIGHT_RING));
    }

    #[rstest]
    fn svg_carries_step_id_and_wrapped_title(bounds: NodeBox) {
        let view = NodeView::new(&step(StepCategory::System), NodeFlags::default());
        let svg = view.to_svg(&bounds);
        assert!(svg.contains("data-step-id=\"calculate\""));
        assert!(svg.contains("<polygon"));
        assert!(svg.contains(">POS System Automatically Calculates</tspan>"));
        assert!(!svg.contains("<animate"));
    }

    #[rstest]
    fn active_svg_includes_looping_overlay(bounds: NodeBox) {
        let flags = NodeFlags {
            active: true,
            ..NodeFlags::default()
        };
        let svg = NodeView::new(&step(StepCategory::Activity), flags).to_svg(&bounds);
        assert!(svg.contains("values=\"0.1;0.3;0.1\""));
        assert!(svg.contains("repeatCount=\"indefinite\""));
    }

    #[rstest]
    fn click_reports_step_id() {
        let view = NodeView::new(&step(StepCategory::Activity), NodeFlags::default());
        assert_eq!(view.click().step_id(), "calculate");
    }
}
