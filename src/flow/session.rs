//! Autoplay scheduling around a [`WalkthroughController`].
//!
//! A [`WalkthroughSession`] owns the controller behind a mutex together with
//! the autoplay timer. The timer is a tokio task; at most one is outstanding
//! per session, and every transition that changes `is_playing` or
//! `is_walkthrough_mode` cancels it before returning.
//!
//! Cancellation is enforced twice: the task is aborted, and the shared epoch
//! is bumped so a firing that has already woken up cannot apply a tick to a
//! walkthrough that has since moved on.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::controller::{TickOutcome, WalkthroughController, WalkthroughState};
use super::registry::StepRegistry;
use crate::render::NodeClick;

/// Default autoplay period.
pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_millis(2000);

/// Controller plus the epoch of the timer allowed to drive it.
#[derive(Debug)]
struct Shared {
    controller: WalkthroughController,
    epoch: u64,
}

/// Autoplay timer state.
#[derive(Debug)]
enum Timer {
    /// No walkthrough is running.
    Idle,
    /// Autoplay is running on the held task.
    Playing(JoinHandle<()>),
    /// A walkthrough is running but paused.
    Paused,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A walkthrough controller driven by a cancellable autoplay timer.
#[derive(Debug)]
pub struct WalkthroughSession {
    shared: Arc<Mutex<Shared>>,
    timer: Timer,
    period: Duration,
    runtime: Handle,
    firings: Arc<AtomicUsize>,
    updates: Arc<watch::Sender<WalkthroughState>>,
}

impl WalkthroughSession {
    /// Create an idle session whose timer tasks run on `runtime`.
    #[must_use]
    pub fn new(registry: Arc<StepRegistry>, period: Duration, runtime: Handle) -> Self {
        let controller = WalkthroughController::new(registry);
        let (updates, _) = watch::channel(controller.state().clone());
        Self {
            shared: Arc::new(Mutex::new(Shared {
                controller,
                epoch: 0,
            })),
            timer: Timer::Idle,
            period,
            runtime,
            firings: Arc::new(AtomicUsize::new(0)),
            updates: Arc::new(updates),
        }
    }

    /// Autoplay period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Start (or restart) the walkthrough and its timer.
    pub fn start(&mut self) {
        self.mutate(WalkthroughController::start, true);
    }

    /// Pause or resume autoplay.
    pub fn toggle_play_pause(&mut self) {
        self.mutate(WalkthroughController::toggle_play_pause, false);
    }

    /// Advance one step by hand.
    pub fn advance(&mut self) -> bool {
        let mut moved = false;
        self.mutate(|controller| moved = controller.advance(), false);
        moved
    }

    /// Stop playback and clear all walkthrough state.
    pub fn reset(&mut self) {
        self.mutate(WalkthroughController::reset, false);
    }

    /// Inspect a step outside walkthrough mode.
    pub fn select_node(&mut self, id: &str) -> bool {
        let mut selected = false;
        self.mutate(|controller| selected = controller.select_node(id), false);
        selected
    }

    /// Route a node click to the controller.
    ///
    /// Clicks only select a step outside walkthrough mode.
    pub fn handle_click(&mut self, click: &NodeClick) -> bool {
        self.select_node(click.step_id())
    }

    /// Run a read-only query against the controller.
    pub fn with_controller<R>(&self, query: impl FnOnce(&WalkthroughController) -> R) -> R {
        query(&lock(&self.shared).controller)
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> WalkthroughState {
        self.with_controller(|controller| controller.state().clone())
    }

    /// Receiver notified after every transition, including timer firings.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<WalkthroughState> {
        self.updates.subscribe()
    }

    /// Number of autoplay firings since the session was created.
    #[must_use]
    pub fn timer_firings(&self) -> usize {
        self.firings.load(Ordering::SeqCst)
    }

    /// Whether an autoplay task is still scheduled.
    #[must_use]
    pub fn has_pending_timer(&self) -> bool {
        matches!(&self.timer, Timer::Playing(handle) if !handle.is_finished())
    }

    fn mutate(&mut self, transition: impl FnOnce(&mut WalkthroughController), restart: bool) {
        let (before, after) = {
            let mut shared = lock(&self.shared);
            let before = playback(shared.controller.state());
            transition(&mut shared.controller);
            let after = playback(shared.controller.state());
            if restart || before != after {
                shared.epoch = shared.epoch.wrapping_add(1);
            }
            self.updates.send_replace(shared.controller.state().clone());
            (before, after)
        };
        if restart || before != after {
            self.reschedule(after);
        }
    }

    fn reschedule(&mut self, (playing, walkthrough): (bool, bool)) {
        self.cancel_timer();
        self.timer = if playing && walkthrough {
            Timer::Playing(self.spawn_timer())
        } else if walkthrough {
            Timer::Paused
        } else {
            Timer::Idle
        };
    }

    fn cancel_timer(&mut self) {
        if let Timer::Playing(handle) = std::mem::replace(&mut self.timer, Timer::Idle) {
            handle.abort();
        }
    }

    fn spawn_timer(&self) -> JoinHandle<()> {
        let shared = Arc::clone(&self.shared);
        let firings = Arc::clone(&self.firings);
        let updates = Arc::clone(&self.updates);
        let period = self.period;
        let epoch = lock(&self.shared).epoch;

        self.runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let outcome = {
                    let mut guard = lock(&shared);
                    if guard.epoch != epoch {
                        break;
                    }
                    firings.fetch_add(1, Ordering::SeqCst);
                    let outcome = guard.controller.tick();
                    updates.send_replace(guard.controller.state().clone());
                    outcome
                };
                if outcome != TickOutcome::Advanced {
                    tracing::debug!(?outcome, "autoplay timer stopped");
                    break;
                }
            }
        })
    }
}

const fn playback(state: &WalkthroughState) -> (bool, bool) {
    (state.is_playing(), state.is_walkthrough_mode())
}

impl Drop for WalkthroughSession {
    fn drop(&mut self) {
        lock(&self.shared).epoch = u64::MAX;
        self.cancel_timer();
    }
}
