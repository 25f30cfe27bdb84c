//! Mock torrent index for testing.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::searcher::{Candidate, SearchError, SearchResponse, TorrentIndex};

/// Mock implementation of the TorrentIndex trait.
///
/// Responses are keyed by the exact query string. Unknown queries get an
/// empty response.
///
/// # Example
///
/// ```rust,ignore
/// let index = MockTorrentIndex::new();
/// index.set_results("polica shulamith", vec![
///     fixtures::candidate("Polica Shulamith FLAC", "lossless", 12, "abc"),
/// ]);
///
/// let response = index.search("polica shulamith").await?;
/// assert_eq!(response.total_found, 1);
/// assert_eq!(index.queries(), vec!["polica shulamith"]);
/// ```
#[derive(Debug, Default)]
pub struct MockTorrentIndex {
    responses: Mutex<HashMap<String, SearchResponse>>,
    queries: Mutex<Vec<String>>,
    /// If set, the next search will fail with this error.
    next_error: Mutex<Option<SearchError>>,
}

impl MockTorrentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `query` with `results`; `total_found` is their count.
    pub fn set_results(&self, query: &str, results: Vec<Candidate>) {
        let response = SearchResponse {
            total_found: results.len() as u64,
            results,
        };
        self.set_response(query, response);
    }

    /// Answer `query` with a raw response.
    pub fn set_response(&self, query: &str, response: SearchResponse) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(query.to_string(), response);
    }

    /// Configure the next search to fail with the given error.
    pub fn set_next_error(&self, error: SearchError) {
        *self.next_error.lock().unwrap_or_else(PoisonError::into_inner) = Some(error);
    }

    /// Queries received so far, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl TorrentIndex for MockTorrentIndex {
    fn name(&self) -> &str {
        "mock-index"
    }

    async fn search(&self, query: &str) -> Result<SearchResponse, SearchError> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.to_string());

        if let Some(error) = self
            .next_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            return Err(error);
        }

        Ok(self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(query)
            .cloned()
            .unwrap_or_default())
    }
}
