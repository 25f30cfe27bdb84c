//! Run orchestrator implementation.
//!
//! Albums are processed one at a time: search, select, place. A search
//! failure counts as "no results" for that album and the run moves on;
//! only playlist errors and an unusable output directory abort.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::album::{dedup_album_keys, AlbumKey};
use crate::matcher::{FailureReason, MatchResult, MatchSelector};
use crate::placer::Placer;
use crate::playlist::PlaylistSource;
use crate::searcher::TorrentIndex;

use super::config::RunConfig;
use super::types::{AlbumReport, AlbumSelection, RunError, RunEvent, RunSummary};

/// Callback invoked for every [`RunEvent`].
pub type ProgressCallback = Arc<dyn Fn(&RunEvent) + Send + Sync>;

/// Drives albums through search, selection and placement.
pub struct RunOrchestrator {
    config: RunConfig,
    playlist_source: Option<Arc<dyn PlaylistSource>>,
    index: Arc<dyn TorrentIndex>,
    selector: MatchSelector,
    placer: Arc<dyn Placer>,
    progress: Option<ProgressCallback>,
}

impl RunOrchestrator {
    /// Create a new orchestrator.
    pub fn new(
        config: RunConfig,
        index: Arc<dyn TorrentIndex>,
        selector: MatchSelector,
        placer: Arc<dyn Placer>,
    ) -> Self {
        Self {
            config,
            playlist_source: None,
            index,
            selector,
            placer,
            progress: None,
        }
    }

    /// Source used for [`AlbumSelection::Playlist`] runs.
    pub fn with_playlist_source(mut self, source: Arc<dyn PlaylistSource>) -> Self {
        self.playlist_source = Some(source);
        self
    }

    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    fn emit(&self, event: RunEvent) {
        if let Some(callback) = &self.progress {
            callback(&event);
        }
    }

    /// Resolve the album set for a run. Fetched once, before any search.
    pub async fn resolve_albums(
        &self,
        selection: &AlbumSelection,
    ) -> Result<Vec<AlbumKey>, RunError> {
        match selection {
            AlbumSelection::Single(album) => Ok(vec![album.clone()]),
            AlbumSelection::Playlist { name, credentials } => {
                let source = self
                    .playlist_source
                    .as_ref()
                    .ok_or(RunError::MissingPlaylistSource)?;
                info!(source = source.name(), playlist = %name, "Fetching playlist");
                let albums = source.fetch_album_keys(credentials, name).await?;
                Ok(dedup_album_keys(albums))
            }
        }
    }

    /// Run the whole selection and return the summary.
    pub async fn run(&self, selection: &AlbumSelection) -> Result<RunSummary, RunError> {
        let started_at = Utc::now();
        let albums = self.resolve_albums(selection).await?;
        info!(albums = albums.len(), "Starting run");
        self.emit(RunEvent::AlbumsResolved {
            count: albums.len(),
        });

        let mut reports = Vec::with_capacity(albums.len());
        for album in &albums {
            reports.push(self.process_album(album).await?);
        }

        let summary = RunSummary {
            started_at,
            finished_at: Utc::now(),
            reports,
        };
        info!(
            matched = summary.successes().count(),
            unmatched = summary.failures().count(),
            refused = summary.placement_failures().count(),
            "Run finished"
        );
        Ok(summary)
    }

    /// Search, select and place a single album.
    pub async fn process_album(&self, album: &AlbumKey) -> Result<AlbumReport, RunError> {
        let query = album.query(&self.config.query_separator);
        self.emit(RunEvent::Searching {
            album: album.clone(),
            query: query.clone(),
        });

        let candidates = if query.is_empty() {
            warn!(album = %album, "Album has no searchable text, skipping search");
            Vec::new()
        } else {
            match self.index.search(&query).await {
                Ok(response) => response.into_candidates(),
                Err(e) => {
                    warn!(index = self.index.name(), query = %query, error = %e, "Search failed");
                    Vec::new()
                }
            }
        };
        debug!(album = %album, candidates = candidates.len(), "Search complete");

        let result = self
            .selector
            .select(album, &self.config.desired_format, &candidates);

        let Some((candidate, source)) = result.candidate().cloned().zip(result.source()) else {
            let reason = result.failure().unwrap_or(FailureReason::NoResults);
            info!(album = %album, reason = ?reason, "No match");
            self.emit(RunEvent::Unmatched {
                album: album.clone(),
                reason,
            });
            return Ok(AlbumReport {
                result,
                placement: None,
            });
        };

        info!(album = %album, title = %candidate.title, seeds = candidate.seeds, "Match found");
        self.emit(RunEvent::Found {
            album: album.clone(),
            candidate: candidate.clone(),
            source,
        });

        let outcome = self.placer.place(album, &candidate).await?;
        self.emit(RunEvent::Placed {
            album: album.clone(),
            outcome: outcome.clone(),
        });

        let result = if outcome.is_skipped() {
            MatchResult::unmatched(album.clone(), FailureReason::UserDeclinedAlternative)
        } else {
            result
        };

        Ok(AlbumReport {
            result,
            placement: Some(outcome),
        })
    }
}
