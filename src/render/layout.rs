//! Node placement inside the flow region.

use std::collections::HashMap;

use super::count_as_f64;
use super::node::NodeShape;
use crate::flow::{LinkDirection, StepRegistry};

/// Reference canvas the bookstore placements are expressed in.
const BASE_WIDTH: f64 = 1200.0;
const BASE_HEIGHT: f64 = 1600.0;

/// Horizontal run of a sideways branch before it turns towards its target.
const BRANCH_LANE: f64 = 120.0;

/// Centre of each bookstore step on the reference canvas.
const BOOKSTORE_PLACEMENT: &[(&str, f64, f64)] = &[
    ("start", 600.0, 70.0),
    ("enter", 600.0, 170.0),
    ("browse", 600.0, 270.0),
    ("findBook", 600.0, 410.0),
    ("restock", 300.0, 560.0),
    ("addCart", 600.0, 640.0),
    ("calculate", 600.0, 740.0),
    ("payment", 600.0, 880.0),
    ("cashPay", 400.0, 1030.0),
    ("digitalPay", 800.0, 1030.0),
    ("updateSystem", 600.0, 1140.0),
    ("receipt", 600.0, 1240.0),
    ("delivery", 600.0, 1340.0),
    ("end", 600.0, 1450.0),
];

/// A point in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding box of a placed node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeBox {
    /// Centre of the node.
    pub centre: Point,
    /// Width of the node.
    pub width: f64,
    /// Height of the node.
    pub height: f64,
}

impl NodeBox {
    /// Top-centre anchor.
    #[must_use]
    pub const fn top(&self) -> Point {
        Point::new(self.centre.x, self.centre.y - self.height / 2.0)
    }

    /// Bottom-centre anchor.
    #[must_use]
    pub const fn bottom(&self) -> Point {
        Point::new(self.centre.x, self.centre.y + self.height / 2.0)
    }

    /// Left-middle anchor.
    #[must_use]
    pub const fn left(&self) -> Point {
        Point::new(self.centre.x - self.width / 2.0, self.centre.y)
    }

    /// Right-middle anchor.
    #[must_use]
    pub const fn right(&self) -> Point {
        Point::new(self.centre.x + self.width / 2.0, self.centre.y)
    }

    /// Whether `point` falls inside the box.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        (point.x - self.centre.x).abs() <= self.width / 2.0
            && (point.y - self.centre.y).abs() <= self.height / 2.0
    }
}

/// Placement of every step of a registry.
#[derive(Debug, Clone)]
pub struct Layout {
    boxes: HashMap<String, NodeBox>,
    width: f64,
    height: f64,
}

impl Layout {
    /// Place the steps of `registry` inside a `width` by `height` region.
    ///
    /// The bookstore flow uses its hand-tuned rows and branch lanes. Any other
    /// registry is laid out as a single centred column in canonical order.
    #[must_use]
    pub fn for_registry(registry: &StepRegistry, width: f64, height: f64) -> Self {
        let placement: HashMap<&str, (f64, f64)> = BOOKSTORE_PLACEMENT
            .iter()
            .map(|&(id, x, y)| (id, (x, y)))
            .collect();
        let is_bookstore = registry.len() == placement.len()
            && registry
                .steps()
                .iter()
                .all(|step| placement.contains_key(step.id.as_str()));

        let sx = width / BASE_WIDTH;
        let sy = height / BASE_HEIGHT;
        let rows = count_as_f64(registry.len().max(1));
        let pitch = height / rows;

        let boxes = registry
            .steps()
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let centre = match placement.get(step.id.as_str()) {
                    Some(&(x, y)) if is_bookstore => Point::new(x * sx, y * sy),
                    _ => Point::new(width / 2.0, pitch * (count_as_f64(index) + 0.5)),
                };
                let (w, h) = NodeShape::for_category(step.category).size();
                (
                    step.id.clone(),
                    NodeBox {
                        centre,
                        width: w,
                        height: h,
                    },
                )
            })
            .collect();

        Self {
            boxes,
            width,
            height,
        }
    }

    /// Width of the flow region.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Height of the flow region.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Box of the step with the given id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&NodeBox> {
        self.boxes.get(id)
    }

    /// Polyline a connector follows from `from` to `to`.
    ///
    /// Downward links leave the bottom of the source and enter the top of the
    /// target, with an elbow when the two are not aligned. Sideways branches
    /// leave the matching vertex of the source and run out along a lane before
    /// turning towards the target.
    #[must_use]
    pub fn route(&self, from: &str, to: &str, direction: LinkDirection) -> Option<Vec<Point>> {
        let source = self.node(from)?;
        let target = self.node(to)?;
        Some(match direction {
            LinkDirection::Down => route_down(source, target),
            LinkDirection::Left => route_side(source.left(), target, -1.0),
            LinkDirection::Right => route_side(source.right(), target, 1.0),
        })
    }
}

fn route_down(source: &NodeBox, target: &NodeBox) -> Vec<Point> {
    let start = source.bottom();
    let end = target.top();
    if (start.x - end.x).abs() < 0.5 {
        return vec![start, end];
    }
    let elbow = (start.y + end.y) / 2.0;
    vec![
        start,
        Point::new(start.x, elbow),
        Point::new(end.x, elbow),
        end,
    ]
}

fn route_side(start: Point, target: &NodeBox, sign: f64) -> Vec<Point> {
    let beyond = (target.centre.x - start.x) * sign > 0.0;
    if beyond {
        let turn = Point::new(target.centre.x, start.y);
        return vec![start, turn, target.top()];
    }
    let lane = start.x + sign * BRANCH_LANE;
    let entry = if sign < 0.0 { target.left() } else { target.right() };
    vec![
        start,
        Point::new(lane, start.y),
        Point::new(lane, entry.y),
        entry,
    ]
}
