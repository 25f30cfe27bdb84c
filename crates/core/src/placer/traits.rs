//! Trait definitions for the placer module.

use async_trait::async_trait;

use crate::album::AlbumKey;
use crate::searcher::Candidate;

use super::error::PlacerError;
use super::types::PlacementOutcome;

/// Persists the winning candidate of an album.
#[async_trait]
pub trait Placer: Send + Sync {
    /// Returns the name of this placer implementation.
    fn name(&self) -> &str;

    /// Persist `candidate` as the pick for `album`.
    async fn place(
        &self,
        album: &AlbumKey,
        candidate: &Candidate,
    ) -> Result<PlacementOutcome, PlacerError>;
}
