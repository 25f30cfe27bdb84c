//! Magnet file placer implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{info, warn};

use crate::album::{file_stem, AlbumKey};
use crate::searcher::Candidate;

use super::error::PlacerError;
use super::traits::Placer;
use super::types::PlacementOutcome;

/// Writes one `<title>.magnet` file per matched album.
///
/// The output directory is created on first use. Files are picked up by
/// torrent clients that watch a directory for magnet files. A file that
/// cannot be written is reported as [`PlacementOutcome::Failed`] for that
/// album only.
#[derive(Debug, Clone)]
pub struct MagnetFilePlacer {
    dir: PathBuf,
}

impl MagnetFilePlacer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Destination path for a candidate's magnet file.
    pub fn magnet_path(&self, candidate: &Candidate) -> PathBuf {
        self.dir
            .join(format!("{}.magnet", file_stem(&candidate.title)))
    }
}

#[async_trait]
impl Placer for MagnetFilePlacer {
    fn name(&self) -> &str {
        "magnet_file"
    }

    async fn place(
        &self,
        album: &AlbumKey,
        candidate: &Candidate,
    ) -> Result<PlacementOutcome, PlacerError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| PlacerError::DirectoryCreationFailed {
                path: self.dir.clone(),
                source,
            })?;

        let path = self.magnet_path(candidate);
        if let Err(e) = fs::write(&path, candidate.magnet_uri()).await {
            warn!(album = %album, path = %path.display(), error = %e, "Magnet file not written");
            return Ok(PlacementOutcome::Failed {
                status: None,
                message: format!("could not write \"{}\": {}", path.display(), e),
            });
        }

        info!(album = %album, path = %path.display(), "Magnet file saved");
        Ok(PlacementOutcome::Saved { path })
    }
}
