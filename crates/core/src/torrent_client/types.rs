//! Types for torrent client operations.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during torrent client operations.
#[derive(Debug, Error)]
pub enum TorrentClientError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Authentication failed with HTTP {status}")]
    AuthenticationFailed { status: u16 },

    #[error("Invalid magnet URI: {0}")]
    InvalidMagnet(String),

    #[error("Token not found in WebUI response")]
    TokenMissing,

    #[error("Torrent client rejected the request with HTTP {status}")]
    Rejected { status: u16 },

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Request timeout")]
    Timeout,
}

impl TorrentClientError {
    /// HTTP status code, when the client answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            TorrentClientError::Rejected { status }
            | TorrentClientError::AuthenticationFailed { status } => Some(*status),
            _ => None,
        }
    }
}

/// Trait for remote torrent clients that accept magnet links.
#[async_trait]
pub trait TorrentClient: Send + Sync {
    /// Client name for logging.
    fn name(&self) -> &str;

    /// Queue a magnet URI for download.
    async fn add_magnet(&self, uri: &str) -> Result<(), TorrentClientError>;
}
