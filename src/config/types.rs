//! Configuration data types for storeflow.

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::{OrthoConfig, OrthoResult, PostMergeContext, PostMergeHook};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Directory used for export artefacts when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "exports";

/// Walkthrough playback configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WalkthroughConfig {
    /// Milliseconds between autoplay advances.
    pub autoplay_interval_ms: u64,
}

impl Default for WalkthroughConfig {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: 2000,
        }
    }
}

/// Export capture configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Width of the flow region in logical pixels.
    pub canvas_width: u32,

    /// Height of the flow region in logical pixels.
    pub canvas_height: u32,

    /// Pixel density multiplier applied to raster captures.
    pub scale: u32,

    /// Hide the side information panel while capturing.
    pub hide_side_panel: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1200,
            canvas_height: 1600,
            scale: 2,
            hide_side_panel: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub filter: Option<String>,
}

/// Root application configuration.
///
/// This structure is loaded from configuration files, environment variables,
/// and command-line arguments with layered precedence. The precedence order
/// (lowest to highest) is: defaults, configuration file, environment variables,
/// command-line arguments.
///
/// Configuration files are discovered in this order:
/// 1. Path specified via `STOREFLOW_CONFIG_PATH` environment variable
/// 2. `.storeflow.toml` in the current working directory
/// 3. `.storeflow.toml` in the home directory
/// 4. `~/.config/storeflow/config.toml` (XDG default)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(
    prefix = "STOREFLOW",
    post_merge_hook,
    discovery(
        app_name = "storeflow",
        env_var = "STOREFLOW_CONFIG_PATH",
        config_file_name = "config.toml",
        dotfile_name = ".storeflow.toml",
        config_cli_long = "config",
        config_cli_visible = true,
    )
)]
pub struct AppConfig {
    /// Directory export artefacts are written into.
    pub output_dir: Option<Utf8PathBuf>,

    /// Walkthrough playback configuration.
    #[serde(default)]
    #[ortho_config(skip_cli)]
    pub walkthrough: WalkthroughConfig,

    /// Export capture configuration.
    #[serde(default)]
    #[ortho_config(skip_cli)]
    pub export: ExportConfig,

    /// Logging configuration.
    #[serde(default)]
    #[ortho_config(skip_cli)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Directory export artefacts are written into.
    #[must_use]
    pub fn output_dir(&self) -> &Utf8Path {
        self.output_dir
            .as_deref()
            .unwrap_or_else(|| Utf8Path::new(DEFAULT_OUTPUT_DIR))
    }

    /// Period between autoplay advances.
    #[must_use]
    pub const fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.walkthrough.autoplay_interval_ms)
    }

    /// Check the merged values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first field that is zero
    /// among the autoplay interval, canvas dimensions and export scale.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let zero_checks = [
            (
                "walkthrough.autoplay_interval_ms",
                self.walkthrough.autoplay_interval_ms == 0,
            ),
            ("export.canvas_width", self.export.canvas_width == 0),
            ("export.canvas_height", self.export.canvas_height == 0),
            ("export.scale", self.export.scale == 0),
        ];
        match zero_checks.iter().find(|(_, is_zero)| *is_zero) {
            Some(&(field, _)) => Err(ConfigError::InvalidValue {
                field: String::from(field),
                reason: String::from("must be greater than zero"),
            }),
            None => Ok(()),
        }
    }
}

impl PostMergeHook for AppConfig {
    fn post_merge(&mut self, _ctx: &PostMergeContext) -> OrthoResult<()> {
        // A blank filter means "not configured".
        if self
            .logging
            .filter
            .as_deref()
            .is_some_and(|filter| filter.trim().is_empty())
        {
            self.logging.filter = None;
        }
        Ok(())
    }
}
