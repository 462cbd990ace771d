//! Configuration system for storeflow.
//!
//! This module provides the configuration structures and CLI definitions for the
//! storeflow application. Configuration loading and precedence merging is handled
//! by the `ortho_config` crate. Precedence: CLI flags override environment
//! variables, which override configuration files, which override defaults.
//!
//! The configuration file is expected at `~/.config/storeflow/config.toml` by
//! default.
//!
//! # Example Configuration
//!
//! ```toml
//! output_dir = "exports"
//!
//! [walkthrough]
//! autoplay_interval_ms = 2000
//!
//! [export]
//! canvas_width = 1200
//! canvas_height = 1600
//! scale = 2
//! hide_side_panel = true
//!
//! [logging]
//! filter = "info"
//! ```

mod cli;
mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use cli::{
    CatalogArgs, Cli, Commands, ContactArgs, ExportArgs, InspectArgs, OrderArgs, RenderArgs,
    WalkthroughArgs,
};
pub use loader::{env_var_names, load_config};
pub use types::{AppConfig, DEFAULT_OUTPUT_DIR, ExportConfig, LoggingConfig, WalkthroughConfig};
