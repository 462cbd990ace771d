//! Destinations for finished export artefacts.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::error::FilesystemError;

/// Receives the bytes of a finished artefact.
pub trait ArtefactSink {
    /// Store `contents` under `file_name` and return where it landed.
    ///
    /// # Errors
    ///
    /// Returns a `FilesystemError` if the artefact cannot be stored. A failed
    /// write leaves no file under `file_name`.
    fn write(&self, file_name: &str, contents: &[u8]) -> Result<Utf8PathBuf, FilesystemError>;
}

/// Writes artefacts into a directory, creating it on first use.
///
/// Each artefact is written under a temporary name and renamed into place
/// once complete.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: Utf8PathBuf,
}

impl DirectorySink {
    /// Sink writing into `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Output directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn open(&self) -> Result<Dir, FilesystemError> {
        Dir::create_ambient_dir_all(&self.root, ambient_authority()).map_err(|error| {
            FilesystemError::IoError {
                path: self.root.clone(),
                message: format!("failed to create output directory: {error}"),
            }
        })?;
        Dir::open_ambient_dir(&self.root, ambient_authority()).map_err(|error| {
            FilesystemError::IoError {
                path: self.root.clone(),
                message: format!("failed to open output directory: {error}"),
            }
        })
    }
}

impl ArtefactSink for DirectorySink {
    fn write(&self, file_name: &str, contents: &[u8]) -> Result<Utf8PathBuf, FilesystemError> {
        let dir = self.open()?;
        let partial = format!(".{file_name}.partial");
        let target = self.root.join(file_name);

        let written = dir
            .write(&partial, contents)
            .and_then(|()| dir.rename(&partial, &dir, file_name));
        if let Err(error) = written {
            if dir.remove_file(&partial).is_err() {
                tracing::debug!(file = %partial, "no partial artefact to remove");
            }
            return Err(FilesystemError::IoError {
                path: target,
                message: error.to_string(),
            });
        }
        Ok(target)
    }
}
