//! Behavioural tests for the storeflow CLI.
//!
//! These tests validate the command-line interface behaviour using rstest-bdd.

use clap::Parser;
use clap::error::ErrorKind;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then};
use storeflow::config::{Cli, Commands};

/// State shared across CLI test scenarios.
#[derive(Default, ScenarioState)]
struct CliState {
    /// The output from running the CLI.
    output: Slot<String>,
    /// Any error message from the CLI.
    error: Slot<String>,
    /// Whether the CLI invocation succeeded.
    success: Slot<bool>,
    /// Name of the parsed subcommand.
    command: Slot<String>,
}

/// Fixture providing a fresh CLI state.
#[fixture]
fn cli_state() -> CliState {
    CliState::default()
}

const fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Steps => "steps",
        Commands::Walkthrough(_) => "walkthrough",
        Commands::Inspect(_) => "inspect",
        Commands::Export(_) => "export",
        Commands::Order(_) => "order",
        Commands::Contact(_) => "contact",
        Commands::Catalog(_) => "catalog",
        Commands::Render(_) => "render",
    }
}

// Step definitions

#[given("the CLI is invoked with {args}")]
fn invoke_with_args(cli_state: &CliState, args: String) {
    let argv = std::iter::once("storeflow").chain(args.split_whitespace());
    match Cli::try_parse_from(argv) {
        Ok(cli) => {
            cli_state.command.set(String::from(command_name(&cli.command)));
            cli_state.success.set(true);
        }
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            cli_state.output.set(e.to_string());
            cli_state.success.set(true);
        }
        Err(e) => {
            cli_state.error.set(e.to_string());
            cli_state.success.set(false);
        }
    }
}

#[then("the output contains {text}")]
#[expect(
    clippy::expect_used,
    reason = "test assertion - panic on missing state is intentional"
)]
fn output_contains(cli_state: &CliState, text: String) {
    let output = cli_state
        .output
        .get()
        .expect("output should be set before checking");
    assert!(
        output.contains(&text),
        "Expected output to contain '{text}', but got:\n{output}"
    );
}

#[then("an error is returned")]
#[expect(
    clippy::expect_used,
    reason = "test assertion - panic on missing state is intentional"
)]
fn error_is_returned(cli_state: &CliState) {
    let success = cli_state
        .success
        .get()
        .expect("success should be set before checking");
    assert!(!success, "Expected an error to be returned");
}

#[then("the error mentions {text}")]
#[expect(
    clippy::expect_used,
    reason = "test assertion - panic on missing state is intentional"
)]
fn error_mentions(cli_state: &CliState, text: String) {
    let error = cli_state
        .error
        .get()
        .expect("error should be set before checking");
    assert!(
        error.contains(&text),
        "Expected error to mention '{text}', but got:\n{error}"
    );
}

#[then("the {name} command is selected")]
#[expect(
    clippy::expect_used,
    reason = "test assertion - panic on missing state is intentional"
)]
fn command_is_selected(cli_state: &CliState, name: String) {
    let success = cli_state
        .success
        .get()
        .expect("success should be set before checking");
    assert!(success, "Expected invocation to succeed");
    let command = cli_state
        .command
        .get()
        .expect("command should be set after a successful parse");
    assert_eq!(command, name);
}

// Scenario bindings

#[scenario(path = "tests/features/cli.feature", name = "Display help information")]
fn display_help_information(cli_state: CliState) {
    let _ = cli_state;
}

#[scenario(
    path = "tests/features/cli.feature",
    name = "Display version information"
)]
fn display_version_information(cli_state: CliState) {
    let _ = cli_state;
}

#[scenario(
    path = "tests/features/cli.feature",
    name = "Export requires a format"
)]
fn export_requires_a_format(cli_state: CliState) {
    let _ = cli_state;
}

#[scenario(
    path = "tests/features/cli.feature",
    name = "Export rejects unknown formats"
)]
fn export_rejects_unknown_formats(cli_state: CliState) {
    let _ = cli_state;
}

#[scenario(
    path = "tests/features/cli.feature",
    name = "Order lookup requires an email"
)]
fn order_lookup_requires_an_email(cli_state: CliState) {
    let _ = cli_state;
}

#[scenario(
    path = "tests/features/cli.feature",
    name = "Export succeeds with a format"
)]
fn export_succeeds_with_a_format(cli_state: CliState) {
    let _ = cli_state;
}

#[scenario(
    path = "tests/features/cli.feature",
    name = "Catalog accepts a category filter"
)]
fn catalog_accepts_a_category_filter(cli_state: CliState) {
    let _ = cli_state;
}

#[scenario(
    path = "tests/features/cli.feature",
    name = "Global output directory is accepted after the subcommand"
)]
fn global_output_directory_is_accepted(cli_state: CliState) {
    let _ = cli_state;
}
