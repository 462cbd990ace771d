//! Export of the process flow to PNG, PDF, SVG and JSON artefacts.
//!
//! [`Exporter::export`] is the error boundary: every failure is logged with
//! `tracing::error!` and reported only as [`ExportOutcome::Failed`]. The
//! exporting flag is cleared on every path, and a failed attempt never leaves
//! an artefact behind.

pub mod pdf;
pub mod raster;
pub mod sink;
pub mod vector;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};

use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::flow::{FLOW_TITLE, FlowDocument};
use crate::render::FlowScene;

pub use raster::{Bitmap, Rasterizer, ResvgRasterizer};
pub use sink::{ArtefactSink, DirectorySink};

/// Artefact kinds the exporter can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ExportFormat {
    /// Raster capture of the flow region.
    Png,
    /// A4 document embedding the raster capture.
    Pdf,
    /// Fixed placeholder with the title and subtitle only.
    Svg,
    /// Step data document.
    Json,
}

impl ExportFormat {
    /// Name of the file the artefact is saved as.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Png => "bookstore-process-flowchart.png",
            Self::Pdf => "bookstore-process-flowchart.pdf",
            Self::Svg => "bookstore-process-flowchart.svg",
            Self::Json => "bookstore-process-flowchart-data.json",
        }
    }

    /// Lowercase format name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Pdf => "pdf",
            Self::Svg => "svg",
            Self::Json => "json",
        }
    }

    /// Whether producing this format requires capturing the scene.
    #[must_use]
    pub const fn captures_scene(self) -> bool {
        matches!(self, Self::Png | Self::Pdf)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one export attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The artefact was written to the given path.
    Completed(Utf8PathBuf),
    /// The attempt failed; details were logged.
    Failed,
}

/// Clears the exporting flag when dropped.
struct ExportingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ExportingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for ExportingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Produces export artefacts from a [`FlowScene`].
#[derive(Debug)]
pub struct Exporter<R = ResvgRasterizer, S = DirectorySink> {
    rasterizer: R,
    sink: S,
    settings: ExportConfig,
    exporting: AtomicBool,
}

impl<R: Rasterizer, S: ArtefactSink> Exporter<R, S> {
    /// Create an exporter.
    #[must_use]
    pub const fn new(rasterizer: R, sink: S, settings: ExportConfig) -> Self {
        Self {
            rasterizer,
            sink,
            settings,
            exporting: AtomicBool::new(false),
        }
    }

    /// Whether an export is currently running.
    #[must_use]
    pub fn is_exporting(&self) -> bool {
        self.exporting.load(Ordering::Acquire)
    }

    /// Produce and store one artefact.
    ///
    /// Independent of walkthrough playback: PNG and PDF capture whatever the
    /// scene currently shows. Failures are logged and yield
    /// [`ExportOutcome::Failed`].
    pub fn export(
        &self,
        format: ExportFormat,
        scene: &mut FlowScene<'_>,
        exported_at: DateTime<Utc>,
    ) -> ExportOutcome {
        let Some(_busy) = ExportingGuard::acquire(&self.exporting) else {
            tracing::error!(%format, error = %ExportError::Busy, "export failed");
            return ExportOutcome::Failed;
        };

        let written = self.produce(format, scene, exported_at).and_then(|bytes| {
            self.sink
                .write(format.file_name(), &bytes)
                .map_err(ExportError::from)
        });

        match written {
            Ok(path) => {
                tracing::info!(%format, path = %path, "export completed");
                ExportOutcome::Completed(path)
            }
            Err(error) => {
                tracing::error!(%format, %error, "export failed");
                ExportOutcome::Failed
            }
        }
    }

    /// Produce the bytes of an artefact without storing them.
    ///
    /// # Errors
    ///
    /// Returns an `ExportError` if capture, encoding or serialisation fails.
    pub fn produce(
        &self,
        format: ExportFormat,
        scene: &mut FlowScene<'_>,
        exported_at: DateTime<Utc>,
    ) -> Result<Vec<u8>, ExportError> {
        match format {
            ExportFormat::Png => self.capture(scene)?.encode_png(),
            ExportFormat::Pdf => pdf::render_document(FLOW_TITLE, &self.capture(scene)?),
            ExportFormat::Svg => Ok(vector::placeholder_svg().into_bytes()),
            ExportFormat::Json => FlowDocument::capture(scene.controller().registry(), exported_at)
                .to_json()
                .map(String::into_bytes)
                .map_err(|error| ExportError::SerializeFailed {
                    message: error.to_string(),
                }),
        }
    }

    fn capture(&self, scene: &mut FlowScene<'_>) -> Result<Bitmap, ExportError> {
        if self.settings.hide_side_panel {
            let hidden = scene.hide_side_panel();
            self.rasterize(&hidden)
        } else {
            self.rasterize(scene)
        }
    }

    fn rasterize(&self, scene: &FlowScene<'_>) -> Result<Bitmap, ExportError> {
        let (width, height) = scene.dimensions();
        tracing::debug!(width, height, scale = self.settings.scale, "capturing flow region");
        self.rasterizer
            .rasterize(&scene.to_svg(), width, height, self.settings.scale)
    }
}
