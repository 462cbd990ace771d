//! Semantic error types for the storeflow application.
//!
//! This module defines the error hierarchy for storeflow, following the
//! principle of using semantic error enums (via `thiserror`) for conditions the
//! caller might inspect or report, while reserving opaque errors
//! (`eyre::Report`) for the application boundary.
//!
//! Walkthrough transitions and order lookups are total and never produce
//! errors; a missing order is an ordinary [`crate::orders::OrderLookup`]
//! outcome.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found at the expected path.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// The path where the configuration file was expected.
        path: Utf8PathBuf,
    },

    /// The configuration file could not be parsed.
    #[error("failed to parse configuration file: {message}")]
    ParseError {
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// The name of the invalid field.
        field: String,
        /// The reason the value is invalid.
        reason: String,
    },

    /// The `OrthoConfig` library returned an error during configuration loading.
    #[error("configuration loading failed: {0}")]
    OrthoConfig(Arc<ortho_config::OrthoError>),
}

/// Errors raised while building or importing a process flow.
#[derive(Debug, Error)]
pub enum FlowError {
    /// A flow must contain at least one step.
    #[error("process flow has no steps")]
    Empty,

    /// Two steps share the same identifier.
    #[error("duplicate step id '{id}'")]
    DuplicateStep {
        /// The repeated identifier.
        id: String,
    },

    /// A link references a step that is not part of the flow.
    #[error("link {from} -> {to} references unknown step '{missing}'")]
    DanglingLink {
        /// Source step of the link.
        from: String,
        /// Target step of the link.
        to: String,
        /// The identifier that could not be resolved.
        missing: String,
    },

    /// A step identifier was not found in the registry.
    #[error("unknown step '{id}'")]
    UnknownStep {
        /// The identifier that was requested.
        id: String,
    },

    /// A flow data document could not be decoded.
    #[error("failed to decode flow document: {message}")]
    DecodeFailed {
        /// A description of the decode failure.
        message: String,
    },
}

/// Errors that can occur while producing an export artefact.
///
/// These never escape the export boundary in
/// [`crate::export::Exporter::export`]; they are logged there and the attempt
/// is abandoned without writing a file.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The scene markup could not be parsed for rasterisation.
    #[error("failed to capture flow region: {message}")]
    CaptureFailed {
        /// A description of the capture failure.
        message: String,
    },

    /// The captured bitmap could not be encoded.
    #[error("failed to encode {format} artefact: {message}")]
    EncodeFailed {
        /// The artefact format being encoded.
        format: String,
        /// A description of the encoding failure.
        message: String,
    },

    /// The flow data could not be serialised.
    #[error("failed to serialise flow data: {message}")]
    SerializeFailed {
        /// A description of the serialisation failure.
        message: String,
    },

    /// The artefact could not be written to the output directory.
    #[error(transparent)]
    WriteFailed(#[from] FilesystemError),

    /// Another export is still running on this exporter.
    #[error("an export is already in progress")]
    Busy,

    /// The export was abandoned; the cause was logged at the export boundary.
    #[error("{format} export failed")]
    Abandoned {
        /// The artefact format that was requested.
        format: String,
    },
}

/// Errors raised by the contact form boundary.
#[derive(Debug, Error)]
pub enum ContactError {
    /// A required form field was left blank.
    #[error("contact form field '{field}' is required")]
    MissingField {
        /// The name of the blank field.
        field: &'static str,
    },
}

/// Errors that can occur during filesystem operations.
#[derive(Debug, Error)]
pub enum FilesystemError {
    /// A file or directory was not found.
    #[error("path not found: {path}")]
    NotFound {
        /// The path that was not found.
        path: Utf8PathBuf,
    },

    /// An I/O error occurred.
    #[error("I/O error at '{path}': {message}")]
    IoError {
        /// The path where the error occurred.
        path: Utf8PathBuf,
        /// A description of the I/O error.
        message: String,
    },
}

/// Top-level error type for the storeflow application.
///
/// This enum aggregates all domain-specific errors into a single type that can
/// be used throughout the application. At the application boundary (main.rs),
/// these errors are converted to `eyre::Report` for human-readable reporting.
#[derive(Debug, Error)]
pub enum StoreflowError {
    /// An error occurred during configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A process flow definition was invalid.
    #[error(transparent)]
    Flow(#[from] FlowError),

    /// An export artefact could not be produced.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// A contact submission was rejected.
    #[error(transparent)]
    Contact(#[from] ContactError),

    /// An error occurred during filesystem operations.
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// A specialised `Result` type for storeflow operations.
pub type Result<T> = std::result::Result<T, StoreflowError>;
