//! Types for the torrent index search.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single torrent index hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Torrent title as listed by the index.
    pub title: String,
    /// Format tag reported by the index ("mp3", "lossless", ...).
    pub category: String,
    /// Seeders reported by the index.
    pub seeds: u32,
    /// Opaque content hash; used verbatim in the magnet URI.
    pub info_hash: String,
}

impl Candidate {
    /// Magnet URI for this candidate.
    pub fn magnet_uri(&self) -> String {
        crate::torrent_client::magnet_uri(&self.info_hash)
    }
}

/// Response of a single index query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Total number of hits the index claims to have.
    pub total_found: u64,
    /// Hits returned with this response, in index order.
    pub results: Vec<Candidate>,
}

impl SearchResponse {
    /// Candidates to feed the selector.
    ///
    /// A response reporting zero total hits yields no candidates, whatever
    /// else the body carried.
    pub fn into_candidates(self) -> Vec<Candidate> {
        if self.total_found == 0 {
            Vec::new()
        } else {
            self.results
        }
    }
}

/// Errors that can occur during search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search backend connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Search backend API error: {0}")]
    ApiError(String),

    #[error("Failed to parse search response: {0}")]
    InvalidResponse(String),

    #[error("Request timeout")]
    Timeout,
}

/// Trait for torrent index backends.
#[async_trait]
pub trait TorrentIndex: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Run one free-text query. `query` is already normalized.
    async fn search(&self, query: &str) -> Result<SearchResponse, SearchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(title: &str) -> Candidate {
        Candidate {
            title: title.to_string(),
            category: "mp3".to_string(),
            seeds: 1,
            info_hash: "abc".to_string(),
        }
    }

    #[test]
    fn test_into_candidates_respects_total_found() {
        let response = SearchResponse {
            total_found: 0,
            results: vec![candidate("stale")],
        };
        assert!(response.into_candidates().is_empty());

        let response = SearchResponse {
            total_found: 1,
            results: vec![candidate("fresh")],
        };
        assert_eq!(response.into_candidates().len(), 1);
    }

    #[test]
    fn test_candidate_magnet_uri() {
        assert_eq!(candidate("x").magnet_uri(), "magnet:?xt=urn:btih:abc");
    }

    #[test]
    fn test_error_display() {
        let err = SearchError::ApiError("HTTP 500".to_string());
        assert_eq!(err.to_string(), "Search backend API error: HTTP 500");
    }
}
