//! Configuration loading with layered precedence.
//!
//! This module loads configuration with the precedence order (lowest to
//! highest): application defaults, configuration file, environment variables,
//! command-line arguments.
//!
//! Layers are composed with `MergeComposer` by hand rather than through the
//! derived `load()`: the `Cli` struct owns subcommand dispatch, and typed
//! environment values must fail fast instead of being silently ignored.
//!
//! # Environment Variable Handling
//!
//! Environment variables with unparseable values (e.g.
//! `STOREFLOW_EXPORT_HIDE_SIDE_PANEL=maybe` instead of `true`/`false`) return an
//! error immediately. String fields such as `STOREFLOW_OUTPUT_DIR` are always
//! accepted.

use camino::Utf8PathBuf;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use ortho_config::discovery::ConfigDiscovery;
use ortho_config::serde_json::{self, Map, Value};
use ortho_config::{MergeComposer, toml};

use crate::config::{AppConfig, Cli};
use crate::error::{ConfigError, Result};

/// The type of value expected from an environment variable.
#[derive(Clone, Copy)]
enum EnvVarType {
    /// String value (always accepted).
    String,
    /// Boolean value (`true`/`false`). Invalid values return an error.
    Bool,
    /// Unsigned integer. Invalid values return an error.
    U64,
}

/// Specification for a single environment variable mapping.
struct EnvVarSpec {
    /// The environment variable name (e.g., `STOREFLOW_OUTPUT_DIR`).
    env_var: &'static str,
    /// The JSON path segments (e.g., `["export", "scale"]`).
    path: &'static [&'static str],
    /// The expected value type.
    var_type: EnvVarType,
}

/// Table of all environment variables and their JSON paths.
const ENV_VAR_SPECS: &[EnvVarSpec] = &[
    EnvVarSpec {
        env_var: "STOREFLOW_OUTPUT_DIR",
        path: &["output_dir"],
        var_type: EnvVarType::String,
    },
    // Walkthrough fields
    EnvVarSpec {
        env_var: "STOREFLOW_WALKTHROUGH_AUTOPLAY_INTERVAL_MS",
        path: &["walkthrough", "autoplay_interval_ms"],
        var_type: EnvVarType::U64,
    },
    // Export fields
    EnvVarSpec {
        env_var: "STOREFLOW_EXPORT_CANVAS_WIDTH",
        path: &["export", "canvas_width"],
        var_type: EnvVarType::U64,
    },
    EnvVarSpec {
        env_var: "STOREFLOW_EXPORT_CANVAS_HEIGHT",
        path: &["export", "canvas_height"],
        var_type: EnvVarType::U64,
    },
    EnvVarSpec {
        env_var: "STOREFLOW_EXPORT_SCALE",
        path: &["export", "scale"],
        var_type: EnvVarType::U64,
    },
    EnvVarSpec {
        env_var: "STOREFLOW_EXPORT_HIDE_SIDE_PANEL",
        path: &["export", "hide_side_panel"],
        var_type: EnvVarType::Bool,
    },
    // Logging fields
    EnvVarSpec {
        env_var: "STOREFLOW_LOGGING_FILTER",
        path: &["logging", "filter"],
        var_type: EnvVarType::String,
    },
];

/// Returns the list of environment variable names recognised by the config loader.
///
/// Tests use this to clear every `STOREFLOW_*` variable the loader reads.
#[must_use]
pub fn env_var_names() -> Vec<&'static str> {
    ENV_VAR_SPECS.iter().map(|spec| spec.env_var).collect()
}

/// Load a configuration file and push it to the composer.
///
/// Opens the parent directory through `cap_std::fs_utf8` and reads the file
/// relative to it.
fn load_config_file(path: &Utf8PathBuf, composer: &mut MergeComposer) -> Result<()> {
    let current_dir = Utf8PathBuf::from(".");
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| current_dir.as_ref());
    let file_name = path.file_name().unwrap_or(path.as_str());

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|e| {
        ConfigError::ParseError {
            message: format!("failed to open directory {parent}: {e}"),
        }
    })?;

    let content = dir
        .read_to_string(file_name)
        .map_err(|e| ConfigError::ParseError {
            message: format!("failed to read {path}: {e}"),
        })?;

    let value =
        toml::from_str::<serde_json::Value>(&content).map_err(|e| ConfigError::ParseError {
            message: format!("failed to parse {path}: {e}"),
        })?;

    composer.push_file(value, Some(path.clone()));
    Ok(())
}

/// Find the configuration file to load.
///
/// An explicit `--config` path must exist; otherwise discovery falls back to
/// `STOREFLOW_CONFIG_PATH` and the standard locations.
fn resolve_config_path(cli: &Cli) -> Result<Option<Utf8PathBuf>> {
    if let Some(ref explicit) = cli.config {
        if !explicit.exists() {
            return Err(ConfigError::FileNotFound {
                path: explicit.clone(),
            }
            .into());
        }
        return Ok(Some(explicit.clone()));
    }

    let discovery = ConfigDiscovery::builder("storeflow")
        .env_var("STOREFLOW_CONFIG_PATH")
        .config_file_name("config.toml")
        .dotfile_name(".storeflow.toml")
        .build();
    Ok(discovery
        .candidates()
        .into_iter()
        .filter(|p| p.exists())
        .find_map(|p| Utf8PathBuf::try_from(p).ok()))
}

/// Load configuration with full layer precedence.
///
/// This function loads configuration from all available sources:
/// 1. Application defaults defined in the struct
/// 2. Configuration file (`--config`, `STOREFLOW_CONFIG_PATH` or discovery)
/// 3. Environment variables prefixed with `STOREFLOW_`
/// 4. Command-line arguments (from the provided `Cli`)
///
/// Later sources override earlier ones. The merged result is validated.
///
/// # Errors
///
/// Returns `ConfigError` if configuration loading fails due to:
/// - A `--config` path that does not exist
/// - Malformed configuration files
/// - Invalid typed environment variable values (e.g., non-integer for
///   `STOREFLOW_EXPORT_SCALE`)
/// - A zero interval, canvas dimension or scale after merge
pub fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut composer = MergeComposer::new();

    let defaults =
        serde_json::to_value(AppConfig::default()).map_err(|e| ConfigError::ParseError {
            message: format!("failed to serialise defaults: {e}"),
        })?;
    composer.push_defaults(defaults);

    if let Some(ref path) = resolve_config_path(cli)? {
        tracing::debug!(path = %path, "loading configuration file");
        load_config_file(path, &mut composer)?;
    }

    let env_values = collect_env_vars()?;
    if !env_values.is_null() {
        composer.push_environment(env_values);
    }

    let cli_overrides = build_cli_overrides(cli);
    if !cli_overrides.is_null() {
        composer.push_cli(cli_overrides);
    }

    let config =
        AppConfig::merge_from_layers(composer.layers()).map_err(ConfigError::OrthoConfig)?;
    config.validate()?;
    Ok(config)
}

/// Collect environment variables with the `STOREFLOW_` prefix into a JSON value.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if a typed environment variable (bool,
/// integer) has an unparseable value.
fn collect_env_vars() -> Result<Value> {
    let mut root = Map::new();

    for spec in ENV_VAR_SPECS {
        let Ok(raw_value) = std::env::var(spec.env_var) else {
            continue;
        };

        let json_value = match spec.var_type {
            EnvVarType::String => Value::String(raw_value),
            EnvVarType::Bool => match raw_value.parse::<bool>() {
                Ok(b) => Value::Bool(b),
                Err(_) => {
                    return Err(ConfigError::InvalidValue {
                        field: spec.env_var.to_owned(),
                        reason: format!("expected bool (true/false), got '{raw_value}'"),
                    }
                    .into());
                }
            },
            EnvVarType::U64 => match raw_value.parse::<u64>() {
                Ok(n) => Value::Number(n.into()),
                Err(_) => {
                    return Err(ConfigError::InvalidValue {
                        field: spec.env_var.to_owned(),
                        reason: format!("expected unsigned integer, got '{raw_value}'"),
                    }
                    .into());
                }
            },
        };

        insert_at_path(&mut root, spec.path, json_value);
    }

    if root.is_empty() {
        Ok(Value::Null)
    } else {
        Ok(Value::Object(root))
    }
}

/// Insert a value at a nested path in a JSON map.
///
/// For a path like `["export", "scale"]`, this creates the intermediate
/// `export` object if needed and inserts `scale` within it.
fn insert_at_path(root: &mut Map<String, Value>, path: &[&str], value: Value) {
    let Some((&field, parents)) = path.split_last() else {
        return;
    };

    let mut current = root;
    for &segment in parents {
        let entry = current
            .entry(segment.to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
        let Some(obj) = entry.as_object_mut() else {
            return;
        };
        current = obj;
    }

    current.insert(field.to_owned(), value);
}

/// Build a JSON value containing CLI overrides.
fn build_cli_overrides(cli: &Cli) -> serde_json::Value {
    let mut overrides = serde_json::Map::new();

    if let Some(ref dir) = cli.output_dir {
        overrides.insert(
            "output_dir".to_owned(),
            serde_json::Value::String(dir.to_string()),
        );
    }

    if overrides.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::Value::Object(overrides)
    }
}
