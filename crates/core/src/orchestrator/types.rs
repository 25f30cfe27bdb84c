//! Types for the run orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::album::AlbumKey;
use crate::config::Credentials;
use crate::matcher::{FailureReason, MatchResult, MatchSource};
use crate::placer::PlacementOutcome;
use crate::searcher::Candidate;

/// Errors that abort a run.
///
/// Per-album problems never end up here; they are recorded in the
/// [`RunSummary`] instead.
#[derive(Debug, Error)]
pub enum RunError {
    /// Fetching the playlist failed.
    #[error("playlist error: {0}")]
    Playlist(#[from] crate::playlist::PlaylistError),

    /// Persisting a match failed.
    #[error("placement error: {0}")]
    Placement(#[from] crate::placer::PlacerError),

    /// A playlist run was requested without a playlist source.
    #[error("no playlist source configured")]
    MissingPlaylistSource,
}

/// Which albums a run covers.
#[derive(Debug, Clone)]
pub enum AlbumSelection {
    /// Every unique album of a named playlist.
    Playlist {
        name: String,
        credentials: Credentials,
    },
    /// A single album given on the command line.
    Single(AlbumKey),
}

/// Progress notifications emitted while a run is in flight.
#[derive(Debug, Clone)]
pub enum RunEvent {
    /// The album set for the run is known.
    AlbumsResolved { count: usize },
    /// A search is about to be sent.
    Searching { album: AlbumKey, query: String },
    /// A candidate was selected.
    Found {
        album: AlbumKey,
        candidate: Candidate,
        source: MatchSource,
    },
    /// No candidate was selected.
    Unmatched {
        album: AlbumKey,
        reason: FailureReason,
    },
    /// The selected candidate was persisted (or skipped, or refused).
    Placed {
        album: AlbumKey,
        outcome: PlacementOutcome,
    },
}

/// Outcome of one album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumReport {
    pub result: MatchResult,
    /// Set whenever a candidate was selected.
    pub placement: Option<PlacementOutcome>,
}

impl AlbumReport {
    /// Matched and persisted (or submitted) without error.
    pub fn is_success(&self) -> bool {
        self.result.is_matched()
            && !self
                .placement
                .as_ref()
                .is_some_and(PlacementOutcome::is_failed)
    }
}

/// Everything a run produced, in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub reports: Vec<AlbumReport>,
}

impl RunSummary {
    /// Albums that were matched and delivered.
    pub fn successes(&self) -> impl Iterator<Item = &AlbumReport> {
        self.reports.iter().filter(|r| r.is_success())
    }

    /// Albums without a selected candidate.
    pub fn failures(&self) -> impl Iterator<Item = &AlbumReport> {
        self.reports.iter().filter(|r| !r.result.is_matched())
    }

    /// Albums that were matched but refused by the torrent client.
    pub fn placement_failures(&self) -> impl Iterator<Item = &AlbumReport> {
        self.reports.iter().filter(|r| {
            r.result.is_matched()
                && r.placement
                    .as_ref()
                    .is_some_and(PlacementOutcome::is_failed)
        })
    }

    /// Wall-clock duration of the run.
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
