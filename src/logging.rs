//! Log filter resolution and subscriber installation.
//!
//! The filter comes from `RUST_LOG` when set and non-empty, then from the
//! configured `logging.filter`, then falls back to `info`. Only the binary
//! calls [`init`]; library code emits events and never installs a subscriber.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Environment variable consulted before the configured filter.
pub const FILTER_ENV_VAR: &str = "RUST_LOG";

/// Filter used when nothing else is configured.
pub const DEFAULT_FILTER: &str = "info";

/// Pick the filter directive to install.
///
/// `configured` is the `logging.filter` value from the loaded configuration.
#[must_use]
pub fn resolve_filter<E: mockable::Env>(env: &E, configured: Option<&str>) -> String {
    env.string(FILTER_ENV_VAR)
        .filter(|value| !value.trim().is_empty())
        .or_else(|| {
            configured
                .filter(|value| !value.trim().is_empty())
                .map(String::from)
        })
        .unwrap_or_else(|| String::from(DEFAULT_FILTER))
}

/// Parse `directive`, falling back to [`DEFAULT_FILTER`] when it is invalid.
///
/// Returns the filter and, on fallback, the parse error message.
#[must_use]
pub fn build_filter(directive: &str) -> (EnvFilter, Option<String>) {
    match EnvFilter::try_new(directive) {
        Ok(filter) => (filter, None),
        Err(error) => (EnvFilter::new(DEFAULT_FILTER), Some(error.to_string())),
    }
}

/// Install the global subscriber writing formatted events to stderr.
///
/// # Errors
///
/// Returns `TryInitError` if a global subscriber is already installed.
pub fn init(directive: &str) -> Result<(), TryInitError> {
    let (filter, rejected) = build_filter(directive);
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;
    if let Some(reason) = rejected {
        tracing::warn!(directive, %reason, "invalid log filter; using {DEFAULT_FILTER}");
    }
    Ok(())
}
