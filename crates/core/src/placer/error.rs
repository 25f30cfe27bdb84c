//! Error types for the placer module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort placement.
///
/// Per-album problems (client refusals, unwritable magnet files) are not
/// errors here; they are reported as
/// [`PlacementOutcome::Failed`](super::PlacementOutcome::Failed).
#[derive(Debug, Error)]
pub enum PlacerError {
    /// Failed to create the output directory.
    #[error("Failed to create directory: {path}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
