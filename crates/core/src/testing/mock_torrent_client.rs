//! Mock torrent client for testing.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::torrent_client::{TorrentClient, TorrentClientError};

/// Mock implementation of the TorrentClient trait.
///
/// Records every accepted magnet URI and can be told to refuse the next one.
///
/// # Example
///
/// ```rust,ignore
/// let client = MockTorrentClient::new();
/// client.set_next_error(TorrentClientError::Rejected { status: 400 });
///
/// assert!(client.add_magnet("magnet:?xt=urn:btih:abc").await.is_err());
/// assert!(client.added_magnets().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MockTorrentClient {
    added: Mutex<Vec<String>>,
    /// If set, the next operation will fail with this error.
    next_error: Mutex<Option<TorrentClientError>>,
}

impl MockTorrentClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Magnet URIs accepted so far.
    pub fn added_magnets(&self) -> Vec<String> {
        self.added
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Configure the next submission to fail with the given error.
    pub fn set_next_error(&self, error: TorrentClientError) {
        *self.next_error.lock().unwrap_or_else(PoisonError::into_inner) = Some(error);
    }
}

#[async_trait]
impl TorrentClient for MockTorrentClient {
    fn name(&self) -> &str {
        "mock-client"
    }

    async fn add_magnet(&self, uri: &str) -> Result<(), TorrentClientError> {
        if let Some(error) = self
            .next_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            return Err(error);
        }

        self.added
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(uri.to_string());
        Ok(())
    }
}
