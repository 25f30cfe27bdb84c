//! Placer that hands magnets straight to a remote torrent client.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tracing::{info, warn};

use crate::album::{to_ascii, AlbumKey};
use crate::matcher::Prompter;
use crate::searcher::Candidate;
use crate::torrent_client::TorrentClient;

use super::error::PlacerError;
use super::traits::Placer;
use super::types::PlacementOutcome;

/// Submits matched candidates to a [`TorrentClient`].
///
/// With a music library configured, an album whose
/// `<library>/<artist>/<album>` directory already exists is only submitted
/// after the operator confirms.
pub struct TorrentClientPlacer {
    client: Arc<dyn TorrentClient>,
    prompter: Arc<dyn Prompter>,
    music_library: Option<PathBuf>,
}

impl TorrentClientPlacer {
    pub fn new(client: Arc<dyn TorrentClient>, prompter: Arc<dyn Prompter>) -> Self {
        Self {
            client,
            prompter,
            music_library: None,
        }
    }

    /// Check the library before submitting.
    pub fn with_music_library(mut self, library: impl Into<PathBuf>) -> Self {
        self.music_library = Some(library.into());
        self
    }

    /// Where an existing copy of `album` would live in the library.
    pub fn library_path(library: &Path, album: &AlbumKey) -> PathBuf {
        library
            .join(to_ascii(&album.artist))
            .join(to_ascii(&album.album))
    }

    async fn existing_copy(&self, album: &AlbumKey) -> Option<PathBuf> {
        let library = self.music_library.as_deref()?;
        let path = Self::library_path(library, album);
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_dir() => Some(path),
            _ => None,
        }
    }
}

#[async_trait]
impl Placer for TorrentClientPlacer {
    fn name(&self) -> &str {
        self.client.name()
    }

    async fn place(
        &self,
        album: &AlbumKey,
        candidate: &Candidate,
    ) -> Result<PlacementOutcome, PlacerError> {
        if let Some(existing) = self.existing_copy(album).await {
            let question = format!(
                "{} already exists in local library: are you sure you want to retrieve another copy?",
                candidate.title
            );
            if !self.prompter.confirm(&question) {
                info!(album = %album, path = %existing.display(), "Skipping album already in library");
                return Ok(PlacementOutcome::Skipped { existing });
            }
        }

        match self.client.add_magnet(&candidate.magnet_uri()).await {
            Ok(()) => {
                info!(album = %album, client = self.client.name(), "Magnet submitted");
                Ok(PlacementOutcome::Submitted {
                    info_hash: candidate.info_hash.clone(),
                })
            }
            Err(e) => {
                warn!(album = %album, error = %e, "Torrent client submission failed");
                Ok(PlacementOutcome::Failed {
                    status: e.status(),
                    message: e.to_string(),
                })
            }
        }
    }
}
