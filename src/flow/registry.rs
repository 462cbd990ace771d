//! Ordered, immutable process step definitions.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::FlowError;

/// Semantic kind of a process step.
///
/// The category decides how a node is drawn; every category behaves the same
/// way during a walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepCategory {
    /// Entry point of the process.
    Start,
    /// Terminal point of the process.
    End,
    /// A task carried out by a person.
    Activity,
    /// A branch point with labelled outgoing links.
    Decision,
    /// A task carried out automatically by a system.
    System,
}

impl StepCategory {
    /// Returns whether the category is a start or end terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }

    /// Lowercase name used in exports and legends.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Activity => "activity",
            Self::Decision => "decision",
            Self::System => "system",
        }
    }
}

/// One node of the canonical process sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Unique, stable identifier.
    pub id: String,
    /// Short display title.
    pub title: String,
    /// Longer explanation shown in the information panel.
    pub description: String,
    /// Visual kind of the step.
    pub category: StepCategory,
    /// Entrance animation delay in seconds. Has no functional effect.
    pub display_delay: f64,
}

impl Step {
    /// Create a step definition.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        category: StepCategory,
        display_delay: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            category,
            display_delay,
        }
    }
}

/// Direction in which a connector leaves its source node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkDirection {
    /// Straight down to the next row.
    #[default]
    Down,
    /// Out of the left side of a decision.
    Left,
    /// Out of the right side of a decision.
    Right,
}

/// A directed edge of the rendered diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Source step id.
    pub from: String,
    /// Target step id.
    pub to: String,
    /// Branch condition text such as "Yes" or "Cash".
    pub label: Option<String>,
    /// Exit direction from the source node.
    pub direction: LinkDirection,
}

impl Link {
    /// An unlabelled downward link.
    #[must_use]
    pub fn down(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
            direction: LinkDirection::Down,
        }
    }

    /// A labelled branch link leaving a decision sideways.
    #[must_use]
    pub fn branch(
        from: impl Into<String>,
        to: impl Into<String>,
        label: impl Into<String>,
        direction: LinkDirection,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: Some(label.into()),
            direction,
        }
    }
}

/// The canonical, ordered list of steps and the diagram links between them.
///
/// Registry order is the walkthrough order. Links describe what is drawn and
/// may branch; they never change the order in which a walkthrough advances.
#[derive(Debug, Clone)]
pub struct StepRegistry {
    steps: Vec<Step>,
    links: Vec<Link>,
    positions: HashMap<String, usize>,
}

impl StepRegistry {
    /// Build a registry, validating identifiers and link endpoints.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Empty` when `steps` is empty,
    /// `FlowError::DuplicateStep` when two steps share an id, and
    /// `FlowError::DanglingLink` when a link names an unknown step.
    pub fn new(steps: Vec<Step>, links: Vec<Link>) -> Result<Self, FlowError> {
        if steps.is_empty() {
            return Err(FlowError::Empty);
        }

        let mut positions = HashMap::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            if positions.insert(step.id.clone(), index).is_some() {
                return Err(FlowError::DuplicateStep {
                    id: step.id.clone(),
                });
            }
        }

        for link in &links {
            for end in [&link.from, &link.to] {
                if !positions.contains_key(end) {
                    return Err(FlowError::DanglingLink {
                        from: link.from.clone(),
                        to: link.to.clone(),
                        missing: end.clone(),
                    });
                }
            }
        }

        Ok(Self {
            steps,
            links,
            positions,
        })
    }

    /// Build a registry whose links simply follow canonical order.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::new`].
    pub fn linear(steps: Vec<Step>) -> Result<Self, FlowError> {
        let links = steps
            .windows(2)
            .filter_map(|pair| match pair {
                [a, b] => Some(Link::down(a.id.clone(), b.id.clone())),
                _ => None,
            })
            .collect();
        Self::new(steps, links)
    }

    /// Steps in canonical order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Diagram links in definition order.
    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`: a registry holds at least one step.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the final step.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Step at a canonical index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Step with the given id.
    #[must_use]
    pub fn step(&self, id: &str) -> Option<&Step> {
        self.index_of(id).and_then(|index| self.steps.get(index))
    }

    /// Canonical index of the step with the given id.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Ids of the canonical prefix `steps[0..=index]`.
    ///
    /// Indices past the end are clamped to the final step.
    #[must_use]
    pub fn prefix_ids(&self, index: usize) -> BTreeSet<String> {
        self.steps
            .iter()
            .take(index.saturating_add(1))
            .map(|step| step.id.clone())
            .collect()
    }

    /// Returns whether `to` immediately follows `from` in canonical order.
    #[must_use]
    pub fn immediately_follows(&self, from: &str, to: &str) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(a), Some(b)) => a.checked_add(1) == Some(b),
            _ => false,
        }
    }

    /// Returns whether the diagram draws a link `from -> to`.
    #[must_use]
    pub fn has_link(&self, from: &str, to: &str) -> bool {
        self.links.iter().any(|link| link.from == from && link.to == to)
    }

    /// Outgoing links of a step, in definition order.
    pub fn links_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
        self.links.iter().filter(move |link| link.from == id)
    }
}
