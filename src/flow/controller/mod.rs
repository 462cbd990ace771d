//! Walkthrough playback state and its transitions.
//!
//! [`WalkthroughController`] is the single writer of [`WalkthroughState`].
//! Renderers never see the state directly; they receive the booleans produced
//! by the derived queries (`is_step_active`, `is_step_completed`,
//! `is_step_highlighted`, `is_link_highlighted`).
//!
//! The highlighted path is always recomputed from canonical order and the
//! active step, never patched incrementally.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::registry::{Step, StepRegistry};

/// Hint shown in the information panel when no step is active.
pub const IDLE_HINT: &str = "Click on any flowchart element to learn more, or start the interactive walkthrough to see the complete process flow.";

/// Playback state owned by a [`WalkthroughController`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkthroughState {
    active_step_id: Option<String>,
    current_index: Option<usize>,
    is_playing: bool,
    is_walkthrough_mode: bool,
    completed_step_ids: BTreeSet<String>,
    highlighted_path_ids: BTreeSet<String>,
}

impl WalkthroughState {
    /// The step currently shown as active, if any.
    #[must_use]
    pub fn active_step_id(&self) -> Option<&str> {
        self.active_step_id.as_deref()
    }

    /// Walkthrough cursor; `None` before a walkthrough starts.
    #[must_use]
    pub const fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Whether autoplay is running.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether the walkthrough cursor owns the active step.
    #[must_use]
    pub const fn is_walkthrough_mode(&self) -> bool {
        self.is_walkthrough_mode
    }

    /// Steps passed during the walkthrough.
    #[must_use]
    pub const fn completed_step_ids(&self) -> &BTreeSet<String> {
        &self.completed_step_ids
    }

    /// Canonical prefix through the active step.
    #[must_use]
    pub const fn highlighted_path_ids(&self) -> &BTreeSet<String> {
        &self.highlighted_path_ids
    }
}

/// Result of one autoplay timer firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The cursor moved forward and playback continues.
    Advanced,
    /// The cursor reached the final step; playback has stopped.
    Finished,
    /// Nothing to do: playback is paused or walkthrough mode is off.
    Idle,
}

/// "Step n of N" badge and completion percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// One-based position of the cursor.
    pub position: usize,
    /// Total number of steps.
    pub total: usize,
    /// Rounded completion percentage.
    pub percent: usize,
}

/// Walkthrough status line shown under the active step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// Autoplay is advancing.
    Advancing,
    /// Autoplay is paused.
    Paused,
}

impl PlaybackStatus {
    /// Human-readable status message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Advancing => "Automatically advancing through steps...",
            Self::Paused => "Paused - use controls to continue",
        }
    }
}

/// Content of the side information panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InfoPanel<'a> {
    /// No active step: show the hint and legend.
    Idle,
    /// Details of the active step.
    Step {
        /// The active step.
        step: &'a Step,
        /// Playback status, present only in walkthrough mode.
        status: Option<PlaybackStatus>,
    },
}

/// Owns walkthrough state and exposes the only transitions that change it.
#[derive(Debug, Clone)]
pub struct WalkthroughController {
    registry: Arc<StepRegistry>,
    state: WalkthroughState,
}

impl WalkthroughController {
    /// Create a controller in its initial state.
    #[must_use]
    pub fn new(registry: Arc<StepRegistry>) -> Self {
        Self {
            registry,
            state: WalkthroughState::default(),
        }
    }

    /// The registry this controller walks through.
    #[must_use]
    pub fn registry(&self) -> &Arc<StepRegistry> {
        &self.registry
    }

    /// Read-only view of the current state.
    #[must_use]
    pub const fn state(&self) -> &WalkthroughState {
        &self.state
    }

    /// Enter walkthrough mode at the first step and begin playing.
    ///
    /// Calling this again restarts from the first step.
    pub fn start(&mut self) {
        self.state.is_walkthrough_mode = true;
        self.state.is_playing = true;
        self.state.completed_step_ids.clear();
        self.state.highlighted_path_ids.clear();
        self.activate(0);
        tracing::debug!(step = ?self.state.active_step_id, "walkthrough started");

        // A single-step flow is already at its end.
        if self.registry.last_index() == 0 {
            self.finish();
        }
    }

    /// Pause or resume autoplay. Has no effect outside walkthrough mode.
    pub fn toggle_play_pause(&mut self) {
        if !self.state.is_walkthrough_mode {
            return;
        }
        self.state.is_playing = !self.state.is_playing;
        tracing::debug!(playing = self.state.is_playing, "walkthrough toggled");
    }

    /// Move the cursor to the next step.
    ///
    /// Returns `false` (and changes nothing) when no walkthrough is running or
    /// the cursor is already on the final step.
    pub fn advance(&mut self) -> bool {
        let Some(index) = self.state.current_index else {
            return false;
        };
        if index >= self.registry.last_index() {
            return false;
        }
        if let Some(step) = self.registry.get(index) {
            self.state.completed_step_ids.insert(step.id.clone());
        }
        self.activate(index.saturating_add(1));
        tracing::debug!(step = ?self.state.active_step_id, "walkthrough advanced");
        true
    }

    /// Apply one autoplay timer firing.
    ///
    /// Behaves like [`Self::advance`]; the firing that lands on the final step
    /// also completes it and stops playback.
    pub fn tick(&mut self) -> TickOutcome {
        if !(self.state.is_playing && self.state.is_walkthrough_mode) {
            return TickOutcome::Idle;
        }
        self.advance();
        if self.state.current_index == Some(self.registry.last_index()) {
            self.finish();
            return TickOutcome::Finished;
        }
        TickOutcome::Advanced
    }

    /// Return to the initial state.
    pub fn reset(&mut self) {
        self.state = WalkthroughState::default();
        tracing::debug!("walkthrough reset");
    }

    /// Inspect a step outside walkthrough mode.
    ///
    /// Returns `false` when walkthrough mode is on or the id is unknown.
    pub fn select_node(&mut self, id: &str) -> bool {
        if self.state.is_walkthrough_mode {
            return false;
        }
        let Some(index) = self.registry.index_of(id) else {
            return false;
        };
        self.state.active_step_id = Some(String::from(id));
        self.state.highlighted_path_ids = self.registry.prefix_ids(index);
        true
    }

    /// Whether the step is the walkthrough's active step.
    ///
    /// Always `false` outside walkthrough mode.
    #[must_use]
    pub fn is_step_active(&self, id: &str) -> bool {
        self.state.is_walkthrough_mode && self.state.active_step_id.as_deref() == Some(id)
    }

    /// Whether the step has been passed.
    #[must_use]
    pub fn is_step_completed(&self, id: &str) -> bool {
        self.state.completed_step_ids.contains(id)
    }

    /// Whether the step lies on the highlighted path.
    #[must_use]
    pub fn is_step_highlighted(&self, id: &str) -> bool {
        self.state.highlighted_path_ids.contains(id)
    }

    /// Whether the drawn link `from -> to` is highlighted.
    ///
    /// The link must exist, both ends must be on the path and `to` must
    /// immediately follow `from` in canonical order, so two path members that
    /// merely share a branch point are never joined.
    #[must_use]
    pub fn is_link_highlighted(&self, from: &str, to: &str) -> bool {
        self.is_step_highlighted(from)
            && self.is_step_highlighted(to)
            && self.registry.immediately_follows(from, to)
            && self.registry.has_link(from, to)
    }

    /// Progress badge, present only in walkthrough mode.
    #[must_use]
    pub fn progress(&self) -> Option<Progress> {
        if !self.state.is_walkthrough_mode {
            return None;
        }
        let index = self.state.current_index?;
        let total = self.registry.len();
        let position = index.saturating_add(1);
        let percent = position
            .saturating_mul(100)
            .saturating_add(total / 2)
            .checked_div(total)
            .unwrap_or(0);
        Some(Progress {
            position,
            total,
            percent,
        })
    }

    /// Content of the side information panel.
    #[must_use]
    pub fn info_panel(&self) -> InfoPanel<'_> {
        let Some(step) = self
            .state
            .active_step_id
            .as_deref()
            .and_then(|id| self.registry.step(id))
        else {
            return InfoPanel::Idle;
        };
        let status = self.state.is_walkthrough_mode.then_some(if self.state.is_playing {
            PlaybackStatus::Advancing
        } else {
            PlaybackStatus::Paused
        });
        InfoPanel::Step { step, status }
    }

    /// Whether "Start Walkthrough" is available.
    #[must_use]
    pub const fn can_start(&self) -> bool {
        !(self.state.is_walkthrough_mode && self.state.is_playing)
    }

    /// Whether "Pause"/"Resume" is available.
    #[must_use]
    pub const fn can_toggle(&self) -> bool {
        self.state.is_walkthrough_mode
    }

    /// Whether "Next Step" is available.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.state.is_walkthrough_mode
            && !self.state.is_playing
            && self
                .state
                .current_index
                .is_some_and(|index| index < self.registry.last_index())
    }

    fn activate(&mut self, index: usize) {
        self.state.current_index = Some(index);
        self.state.active_step_id = self.registry.get(index).map(|step| step.id.clone());
        self.state.highlighted_path_ids = self.registry.prefix_ids(index);
    }

    fn finish(&mut self) {
        if let Some(step) = self.registry.get(self.registry.last_index()) {
            self.state.completed_step_ids.insert(step.id.clone());
        }
        self.state.is_playing = false;
        tracing::debug!("walkthrough finished");
    }
}
