//! Then-step assertions for walkthrough behavioural scenarios.

use rstest_bdd_macros::then;

use super::state::{AutoplayReport, StepResult, WalkthroughScenario};

fn autoplay_report(walkthrough_scenario: &WalkthroughScenario) -> StepResult<AutoplayReport> {
    walkthrough_scenario
        .autoplay
        .get()
        .ok_or_else(|| String::from("an autoplay run should have happened"))
}

#[then("the active step is {id}")]
fn the_active_step_is(walkthrough_scenario: &WalkthroughScenario, id: String) -> StepResult<()> {
    let controller = walkthrough_scenario.controller()?;
    match controller.state().active_step_id() {
        Some(active) if active == id => Ok(()),
        other => Err(format!("expected active step {id}, got {other:?}")),
    }
}

#[then("no step is active")]
fn no_step_is_active(walkthrough_scenario: &WalkthroughScenario) -> StepResult<()> {
    let controller = walkthrough_scenario.controller()?;
    match controller.state().active_step_id() {
        None => Ok(()),
        Some(active) => Err(format!("expected no active step, got {active}")),
    }
}

#[then("the progress badge reads Step {position} of {total}")]
fn the_progress_badge_reads(
    walkthrough_scenario: &WalkthroughScenario,
    position: usize,
    total: usize,
) -> StepResult<()> {
    let controller = walkthrough_scenario.controller()?;
    let progress = controller
        .progress()
        .ok_or_else(|| String::from("progress should be shown in walkthrough mode"))?;
    if (progress.position, progress.total) == (position, total) {
        Ok(())
    } else {
        Err(format!(
            "expected Step {position} of {total}, got Step {} of {}",
            progress.position, progress.total
        ))
    }
}

#[then("the walkthrough is playing")]
fn the_walkthrough_is_playing(walkthrough_scenario: &WalkthroughScenario) -> StepResult<()> {
    let controller = walkthrough_scenario.controller()?;
    if controller.state().is_playing() {
        Ok(())
    } else {
        Err(String::from("expected the walkthrough to be playing"))
    }
}

#[then("the walkthrough is paused")]
fn the_walkthrough_is_paused(walkthrough_scenario: &WalkthroughScenario) -> StepResult<()> {
    let controller = walkthrough_scenario.controller()?;
    let state = controller.state();
    if state.is_walkthrough_mode() && !state.is_playing() {
        Ok(())
    } else {
        Err(format!("expected a paused walkthrough, got {state:?}"))
    }
}

#[then("{count} steps are completed")]
fn steps_are_completed(walkthrough_scenario: &WalkthroughScenario, count: usize) -> StepResult<()> {
    let controller = walkthrough_scenario.controller()?;
    let completed = controller.state().completed_step_ids().len();
    if completed == count {
        Ok(())
    } else {
        Err(format!("expected {count} completed steps, got {completed}"))
    }
}

#[then("the highlighted path is {ids}")]
fn the_highlighted_path_is(
    walkthrough_scenario: &WalkthroughScenario,
    ids: String,
) -> StepResult<()> {
    let controller = walkthrough_scenario.controller()?;
    let expected: Vec<&str> = ids.split(',').map(str::trim).collect();
    let actual: Vec<&str> = controller
        .registry()
        .steps()
        .iter()
        .filter(|step| controller.is_step_highlighted(&step.id))
        .map(|step| step.id.as_str())
        .collect();
    if actual == expected {
        Ok(())
    } else {
        Err(format!("expected path {expected:?}, got {actual:?}"))
    }
}

fn link_highlight(
    walkthrough_scenario: &WalkthroughScenario,
    from: &str,
    to: &str,
) -> StepResult<bool> {
    Ok(walkthrough_scenario
        .controller()?
        .is_link_highlighted(from, to))
}

#[then("the link from {from} to {to} is highlighted")]
fn the_link_is_highlighted(
    walkthrough_scenario: &WalkthroughScenario,
    from: String,
    to: String,
) -> StepResult<()> {
    if link_highlight(walkthrough_scenario, &from, &to)? {
        Ok(())
    } else {
        Err(format!("expected link {from} -> {to} to be highlighted"))
    }
}

#[then("the link from {from} to {to} is not highlighted")]
fn the_link_is_not_highlighted(
    walkthrough_scenario: &WalkthroughScenario,
    from: String,
    to: String,
) -> StepResult<()> {
    if link_highlight(walkthrough_scenario, &from, &to)? {
        Err(format!("expected link {from} -> {to} to stay muted"))
    } else {
        Ok(())
    }
}

#[then("the autoplay timer fired {count} times")]
fn the_autoplay_timer_fired(
    walkthrough_scenario: &WalkthroughScenario,
    count: usize,
) -> StepResult<()> {
    let report = autoplay_report(walkthrough_scenario)?;
    if report.firings == count {
        Ok(())
    } else {
        Err(format!("expected {count} timer firings, got {}", report.firings))
    }
}

#[then("no autoplay timer is pending")]
fn no_autoplay_timer_is_pending(walkthrough_scenario: &WalkthroughScenario) -> StepResult<()> {
    if autoplay_report(walkthrough_scenario)?.pending {
        Err(String::from("expected the autoplay timer to be cancelled"))
    } else {
        Ok(())
    }
}
