//! Given/when step definitions for walkthrough behavioural scenarios.

use std::sync::Arc;
use std::time::Duration;

use rstest_bdd_macros::{given, when};
use storeflow::flow::{DEFAULT_AUTOPLAY_INTERVAL, StepRegistry, WalkthroughController, WalkthroughSession};

use super::state::{AutoplayReport, StepResult, WalkthroughScenario};

fn bookstore_registry() -> StepResult<Arc<StepRegistry>> {
    StepRegistry::bookstore()
        .map(Arc::new)
        .map_err(|error| format!("built-in flow should validate: {error}"))
}

#[given("the bookstore walkthrough")]
fn the_bookstore_walkthrough(walkthrough_scenario: &WalkthroughScenario) -> StepResult<()> {
    let registry = bookstore_registry()?;
    walkthrough_scenario
        .controller
        .set(WalkthroughController::new(registry));
    Ok(())
}

#[when("the walkthrough is started")]
fn the_walkthrough_is_started(walkthrough_scenario: &WalkthroughScenario) -> StepResult<()> {
    walkthrough_scenario.update(WalkthroughController::start)
}

#[when("playback is toggled")]
fn playback_is_toggled(walkthrough_scenario: &WalkthroughScenario) -> StepResult<()> {
    walkthrough_scenario.update(WalkthroughController::toggle_play_pause)
}

#[when("the walkthrough advances {count} times")]
fn the_walkthrough_advances(
    walkthrough_scenario: &WalkthroughScenario,
    count: usize,
) -> StepResult<()> {
    walkthrough_scenario.update(|controller| {
        for _ in 0..count {
            controller.advance();
        }
    })
}

#[when("the walkthrough is reset")]
fn the_walkthrough_is_reset(walkthrough_scenario: &WalkthroughScenario) -> StepResult<()> {
    walkthrough_scenario.update(WalkthroughController::reset)
}

#[when("step {id} is selected")]
fn step_is_selected(walkthrough_scenario: &WalkthroughScenario, id: String) -> StepResult<()> {
    let mut selected = false;
    walkthrough_scenario.update(|controller| selected = controller.select_node(&id))?;
    if selected {
        Ok(())
    } else {
        Err(format!("step {id} should be selectable"))
    }
}

/// Run an autoplay session on a paused clock for `seconds`.
fn autoplay(
    walkthrough_scenario: &WalkthroughScenario,
    seconds: u64,
    pause_afterwards: bool,
) -> StepResult<()> {
    let registry = bookstore_registry()?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .map_err(|error| format!("failed to create tokio runtime for scenario: {error}"))?;
    let _entered = runtime.enter();

    let mut session =
        WalkthroughSession::new(registry, DEFAULT_AUTOPLAY_INTERVAL, runtime.handle().clone());
    session.start();
    runtime.block_on(tokio::time::sleep(Duration::from_secs(seconds)));
    if pause_afterwards {
        session.toggle_play_pause();
        runtime.block_on(tokio::time::sleep(Duration::from_secs(seconds)));
    }

    walkthrough_scenario.autoplay.set(AutoplayReport {
        firings: session.timer_firings(),
        pending: session.has_pending_timer(),
    });
    walkthrough_scenario
        .controller
        .set(session.with_controller(Clone::clone));
    Ok(())
}

#[when("the walkthrough autoplays for {seconds} seconds")]
fn the_walkthrough_autoplays_for(
    walkthrough_scenario: &WalkthroughScenario,
    seconds: u64,
) -> StepResult<()> {
    autoplay(walkthrough_scenario, seconds, false)
}

#[when("autoplay runs for {seconds} seconds before a pause")]
fn the_walkthrough_autoplays_and_is_paused(
    walkthrough_scenario: &WalkthroughScenario,
    seconds: u64,
) -> StepResult<()> {
    autoplay(walkthrough_scenario, seconds, true)
}
