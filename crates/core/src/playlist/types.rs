//! Types for playlist sources.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::album::{dedup_album_keys, AlbumKey};
use crate::config::Credentials;

/// Errors that can occur while fetching a playlist.
#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Playlist not found: {0}")]
    PlaylistNotFound(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid playlist data: {0}")]
    InvalidData(String),

    #[error("Request timeout")]
    Timeout,
}

/// Trait for services that hold the operator's playlists.
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &str;

    /// Unique albums of the playlist called `playlist_name`.
    ///
    /// The name is matched case-insensitively. Duplicates are removed and
    /// the first-seen order is kept.
    async fn fetch_album_keys(
        &self,
        credentials: &Credentials,
        playlist_name: &str,
    ) -> Result<Vec<AlbumKey>, PlaylistError>;
}

/// A playlist with its entries, as exported by the music service.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistContents {
    pub name: String,
    #[serde(default)]
    pub tracks: Vec<PlaylistEntry>,
}

/// One playlist entry. Entries for tracks that are no longer available
/// carry no track metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistEntry {
    #[serde(default)]
    pub track: Option<TrackMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackMetadata {
    #[serde(default)]
    pub album_artist: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
}

impl TrackMetadata {
    /// Album key for this track, preferring the album artist.
    fn album_key(&self) -> Option<AlbumKey> {
        let artist = self
            .album_artist
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .or(self.artist.as_deref())?;
        AlbumKey::new(artist, self.album.as_deref()?).ok()
    }
}

/// Pick `playlist_name` out of `playlists` and collect its unique albums.
pub fn album_keys_from_playlists(
    playlists: &[PlaylistContents],
    playlist_name: &str,
) -> Result<Vec<AlbumKey>, PlaylistError> {
    let wanted = playlist_name.to_lowercase();
    let playlist = playlists
        .iter()
        .find(|p| p.name.to_lowercase() == wanted)
        .ok_or_else(|| PlaylistError::PlaylistNotFound(playlist_name.to_string()))?;

    let keys = dedup_album_keys(
        playlist
            .tracks
            .iter()
            .filter_map(|entry| entry.track.as_ref())
            .filter_map(TrackMetadata::album_key),
    );

    debug!(
        playlist = %playlist.name,
        entries = playlist.tracks.len(),
        albums = keys.len(),
        "Collected playlist albums"
    );

    Ok(keys)
}
