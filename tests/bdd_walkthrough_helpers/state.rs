//! Shared behavioural-test state for walkthrough scenarios.

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use storeflow::flow::WalkthroughController;

/// Step result type for walkthrough BDD tests.
pub type StepResult<T> = Result<T, String>;

/// What an autoplay run left behind.
#[derive(Debug, Clone, Copy)]
pub struct AutoplayReport {
    /// Number of timer firings observed.
    pub(crate) firings: usize,
    /// Whether a timer task was still pending at the end of the run.
    pub(crate) pending: bool,
}

/// Shared scenario state for walkthrough behavioural tests.
#[derive(Default, ScenarioState)]
pub struct WalkthroughScenario {
    /// Controller driven by the scenario steps.
    pub(crate) controller: Slot<WalkthroughController>,

    /// Result of the most recent autoplay run.
    pub(crate) autoplay: Slot<AutoplayReport>,
}

impl WalkthroughScenario {
    /// Current controller, or an error if no walkthrough was set up.
    pub(crate) fn controller(&self) -> StepResult<WalkthroughController> {
        self.controller
            .get()
            .ok_or_else(|| String::from("the bookstore walkthrough should be set up"))
    }

    /// Apply `transition` to the stored controller.
    pub(crate) fn update(
        &self,
        transition: impl FnOnce(&mut WalkthroughController),
    ) -> StepResult<()> {
        let mut controller = self.controller()?;
        transition(&mut controller);
        self.controller.set(controller);
        Ok(())
    }
}

/// Fixture providing fresh state for each walkthrough scenario.
#[fixture]
pub fn walkthrough_scenario() -> WalkthroughScenario {
    WalkthroughScenario::default()
}
