//! Shared fixtures and helper functions for config tests.

use crate::config::AppConfig;
use ortho_config::MergeComposer;
use rstest::fixture;
use std::sync::Arc;

/// Fixture providing an `AppConfig` parsed from a full TOML example.
#[fixture]
pub fn app_config_from_full_toml() -> AppConfig {
    let toml = r#"
        output_dir = "/srv/storeflow/exports"

        [walkthrough]
        autoplay_interval_ms = 500

        [export]
        canvas_width = 1000
        canvas_height = 1400
        scale = 3
        hide_side_panel = false

        [logging]
        filter = "storeflow=debug"
    "#;

    toml::from_str(toml).expect("TOML parsing should succeed")
}

/// Fixture providing an `AppConfig` parsed from a minimal TOML example.
#[fixture]
pub fn app_config_from_partial_toml() -> AppConfig {
    let toml = r#"
        [export]
        scale = 1
    "#;

    toml::from_str(toml).expect("TOML parsing should succeed")
}

/// Helper: Creates a `MergeComposer` with defaults layer already pushed.
pub fn create_composer_with_defaults() -> Result<MergeComposer, serde_json::Error> {
    let mut composer = MergeComposer::new();
    let defaults = ortho_config::serde_json::to_value(AppConfig::default())?;
    composer.push_defaults(defaults);
    Ok(composer)
}

/// Helper: Merges layers from a composer into `AppConfig`.
pub fn merge_config(composer: MergeComposer) -> Result<AppConfig, Arc<ortho_config::OrthoError>> {
    AppConfig::merge_from_layers(composer.layers())
}

/// Helper: Asserts that a config has all default values.
pub fn assert_config_has_defaults(config: &AppConfig) {
    assert_eq!(config.output_dir().as_str(), "exports");
    assert_eq!(
        config.walkthrough.autoplay_interval_ms, 2000,
        "walkthrough.autoplay_interval_ms should be 2000"
    );
    assert_eq!(
        (config.export.canvas_width, config.export.canvas_height),
        (1200, 1600),
        "export canvas should be 1200x1600"
    );
    assert_eq!(config.export.scale, 2, "export.scale should be 2");
    assert!(
        config.export.hide_side_panel,
        "export.hide_side_panel should be true"
    );
    assert!(config.logging.filter.is_none(), "logging.filter should be None");
}

/// Helper: Creates a `MergeComposer` with defaults, file, and env layers for
/// testing layer precedence.
pub fn create_composer_with_file_and_env() -> Result<MergeComposer, serde_json::Error> {
    use ortho_config::serde_json::json;

    let mut composer = create_composer_with_defaults()?;

    composer.push_file(
        json!({
            "output_dir": "/from/file",
            "export": { "scale": 3 }
        }),
        None,
    );

    composer.push_environment(json!({
        "output_dir": "/from/env"
    }));

    Ok(composer)
}
