//! The complete interactive diagram: flow region plus information panel.

use std::ops::Deref;

use super::connector::{ConnectorView, connector_view, marker_defs};
use super::layout::{Layout, NodeBox, Point};
use super::node::{NodeClick, NodeFlags, NodeShape, NodeView, outline};
use super::{count_as_f64, escape, wrap_words};
use crate::flow::{IDLE_HINT, InfoPanel, WalkthroughController};

/// Width of the information panel.
pub const SIDE_PANEL_WIDTH: u32 = 320;
/// Gap between the flow region and the information panel.
pub const SIDE_PANEL_GAP: u32 = 32;

const PANEL_TEXT: &str = "#030213";
const PANEL_MUTED: &str = "#717182";
const PANEL_BORDER: &str = "#e5e5e7";
const WALKTHROUGH_TEXT: &str = "#2563eb";
const PANEL_WRAP: usize = 40;
const PANEL_LINE: f64 = 18.0;

/// Legend entries shown while no step is active.
pub const LEGEND: [(NodeShape, &str, &str); 4] = [
    (NodeShape::Pill, "#030213", "Start/End Points"),
    (NodeShape::RoundedRect, "#ffffff", "Activities"),
    (NodeShape::Diamond, "#e9ebef", "Decisions"),
    (NodeShape::Parallelogram, "#ececf0", "System Activities"),
];

/// A renderable snapshot of the diagram for one controller state.
#[derive(Debug)]
pub struct FlowScene<'a> {
    controller: &'a WalkthroughController,
    layout: Layout,
    width: u32,
    height: u32,
    side_panel_visible: bool,
}

impl<'a> FlowScene<'a> {
    /// Lay out the controller's registry in a `width` by `height` flow region.
    ///
    /// The information panel starts out visible.
    #[must_use]
    pub fn new(controller: &'a WalkthroughController, width: u32, height: u32) -> Self {
        let layout = Layout::for_registry(
            controller.registry(),
            f64::from(width),
            f64::from(height),
        );
        Self {
            controller,
            layout,
            width,
            height,
            side_panel_visible: true,
        }
    }

    /// The controller whose state this scene shows.
    #[must_use]
    pub const fn controller(&self) -> &'a WalkthroughController {
        self.controller
    }

    /// Size of the flow region alone.
    #[must_use]
    pub const fn flow_region(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Size of the whole document, including the panel when visible.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        if self.side_panel_visible {
            (
                self.width + SIDE_PANEL_GAP + SIDE_PANEL_WIDTH,
                self.height,
            )
        } else {
            (self.width, self.height)
        }
    }

    /// Whether the information panel is drawn.
    #[must_use]
    pub const fn side_panel_visible(&self) -> bool {
        self.side_panel_visible
    }

    /// Show or hide the information panel.
    pub const fn set_side_panel_visible(&mut self, visible: bool) {
        self.side_panel_visible = visible;
    }

    /// Hide the information panel until the returned guard is dropped.
    pub fn hide_side_panel(&mut self) -> SidePanelGuard<'_, 'a> {
        let previous = self.side_panel_visible;
        self.side_panel_visible = false;
        SidePanelGuard {
            scene: self,
            previous,
        }
    }

    /// Node views with their placements, in canonical order.
    #[must_use]
    pub fn nodes(&self) -> Vec<(NodeView, NodeBox)> {
        self.controller
            .registry()
            .steps()
            .iter()
            .filter_map(|step| {
                let bounds = *self.layout.node(&step.id)?;
                let flags = NodeFlags::for_step(self.controller, &step.id);
                Some((NodeView::new(step, flags), bounds))
            })
            .collect()
    }

    /// Connector views in link definition order.
    #[must_use]
    pub fn connectors(&self) -> Vec<ConnectorView> {
        self.controller
            .registry()
            .links()
            .iter()
            .filter_map(|link| connector_view(link, &self.layout, self.controller))
            .collect()
    }

    /// Click notification for the node under `point`, if any.
    #[must_use]
    pub fn click_at(&self, point: Point) -> Option<NodeClick> {
        self.nodes()
            .into_iter()
            .find(|(_, bounds)| bounds.contains(point))
            .map(|(view, _)| view.click())
    }

    /// Render the scene as a standalone SVG document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let (width, height) = self.dimensions();
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
        );
        svg.push_str(&format!("<defs>{}</defs>", marker_defs()));
        svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>");
        svg.push_str("<g class=\"flow-region\">");
        for connector in self.connectors() {
            svg.push_str(&connector.to_svg());
        }
        for (view, bounds) in self.nodes() {
            svg.push_str(&view.to_svg(&bounds));
        }
        svg.push_str("</g>");
        if self.side_panel_visible {
            svg.push_str(&self.side_panel_svg());
        }
        svg.push_str("</svg>");
        svg
    }

    fn side_panel_svg(&self) -> String {
        let x = f64::from(self.width + SIDE_PANEL_GAP);
        let width = f64::from(SIDE_PANEL_WIDTH);
        let left = x + 20.0;
        let mut y = 40.0;
        let mut svg = format!(
            "<g class=\"side-panel\"><rect x=\"{x}\" y=\"0\" width=\"{width}\" height=\"{}\" rx=\"12\" fill=\"#ffffff\" stroke=\"{PANEL_BORDER}\"/>",
            self.height
        );
        svg.push_str(&text(left, y, 18.0, "bold", PANEL_TEXT, "Process Information"));
        svg.push_str(&text(left + 200.0, y, 12.0, "normal", PANEL_MUTED, "Interactive"));
        y += 36.0;

        if let Some(progress) = self.controller.progress() {
            let badge = format!("Step {} of {}", progress.position, progress.total);
            let percent = format!("{}% Complete", progress.percent);
            svg.push_str(&text(left, y, 13.0, "normal", PANEL_TEXT, &badge));
            svg.push_str(&text(left + 160.0, y, 13.0, "normal", PANEL_MUTED, &percent));
            y += 14.0;
            let track = width - 40.0;
            let filled =
                track * count_as_f64(progress.position) / count_as_f64(progress.total.max(1));
            svg.push_str(&format!(
                "<rect x=\"{left}\" y=\"{y}\" width=\"{track}\" height=\"8\" rx=\"4\" fill=\"#e5e7eb\"/><rect x=\"{left}\" y=\"{y}\" width=\"{filled}\" height=\"8\" rx=\"4\" fill=\"#3b82f6\"/>"
            ));
            y += 32.0;
        }

        match self.controller.info_panel() {
            InfoPanel::Idle => {
                for line in wrap_words(IDLE_HINT, PANEL_WRAP) {
                    svg.push_str(&text(left, y, 13.0, "normal", PANEL_MUTED, &line));
                    y += PANEL_LINE;
                }
                y += 16.0;
                for (shape, fill, label) in LEGEND {
                    let swatch = NodeBox {
                        centre: Point::new(left + 8.0, y - 4.0),
                        width: 16.0,
                        height: 16.0,
                    };
                    svg.push_str(&outline(
                        shape,
                        &swatch,
                        &format!("fill=\"{fill}\" stroke=\"{PANEL_BORDER}\""),
                    ));
                    svg.push_str(&text(left + 28.0, y, 13.0, "normal", PANEL_MUTED, label));
                    y += 26.0;
                }
            }
            InfoPanel::Step { step, status } => {
                svg.push_str(&text(left, y, 14.0, "bold", PANEL_TEXT, "Current Step:"));
                y += PANEL_LINE + 4.0;
                for line in wrap_words(&step.title, PANEL_WRAP) {
                    svg.push_str(&text(left, y, 13.0, "normal", PANEL_TEXT, &line));
                    y += PANEL_LINE;
                }
                y += 12.0;
                svg.push_str(&text(left, y, 14.0, "bold", PANEL_TEXT, "Description:"));
                y += PANEL_LINE + 4.0;
                for line in wrap_words(&step.description, PANEL_WRAP) {
                    svg.push_str(&text(left, y, 13.0, "normal", PANEL_MUTED, &line));
                    y += PANEL_LINE;
                }
                if let Some(status) = status {
                    y += 16.0;
                    svg.push_str(&format!(
                        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"56\" rx=\"8\" fill=\"#eff6ff\" stroke=\"#bfdbfe\"/>",
                        left - 8.0,
                        y - 18.0,
                        width - 24.0
                    ));
                    svg.push_str(&text(left, y, 14.0, "bold", "#1d4ed8", "Walkthrough Mode"));
                    y += PANEL_LINE + 2.0;
                    svg.push_str(&text(left, y, 12.0, "normal", WALKTHROUGH_TEXT, status.message()));
                }
            }
        }

        svg.push_str("</g>");
        svg
    }
}

fn text(x: f64, y: f64, size: f64, weight: &str, fill: &str, content: &str) -> String {
    format!(
        "<text x=\"{x}\" y=\"{y}\" font-family=\"sans-serif\" font-size=\"{size}\" font-weight=\"{weight}\" fill=\"{fill}\">{}</text>",
        escape(content)
    )
}

/// Keeps the information panel hidden while alive.
///
/// Dropping the guard restores the visibility the scene had before, including
/// when a capture fails part way through.
#[derive(Debug)]
pub struct SidePanelGuard<'s, 'a> {
    scene: &'s mut FlowScene<'a>,
    previous: bool,
}

impl<'a> Deref for SidePanelGuard<'_, 'a> {
    type Target = FlowScene<'a>;

    fn deref(&self) -> &Self::Target {
        self.scene
    }
}

impl Drop for SidePanelGuard<'_, '_> {
    fn drop(&mut self) {
        self.scene.side_panel_visible = self.previous;
    }
}
