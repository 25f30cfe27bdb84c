//! Mock playlist source for testing.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::album::{dedup_album_keys, AlbumKey};
use crate::config::Credentials;
use crate::playlist::{PlaylistError, PlaylistSource};

/// Mock implementation of the PlaylistSource trait.
///
/// Playlist names are matched case-insensitively, like the real sources.
#[derive(Debug, Default)]
pub struct MockPlaylistSource {
    playlists: Mutex<HashMap<String, Vec<AlbumKey>>>,
    /// Playlist names requested so far.
    requests: Mutex<Vec<String>>,
    /// If set, the next fetch will fail with this error.
    next_error: Mutex<Option<PlaylistError>>,
}

impl MockPlaylistSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a playlist.
    pub fn with_playlist(self, name: &str, albums: Vec<AlbumKey>) -> Self {
        self.playlists
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_lowercase(), albums);
        self
    }

    /// Configure the next fetch to fail with the given error.
    pub fn set_next_error(&self, error: PlaylistError) {
        *self.next_error.lock().unwrap_or_else(PoisonError::into_inner) = Some(error);
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl PlaylistSource for MockPlaylistSource {
    fn name(&self) -> &str {
        "mock-playlist"
    }

    async fn fetch_album_keys(
        &self,
        _credentials: &Credentials,
        playlist_name: &str,
    ) -> Result<Vec<AlbumKey>, PlaylistError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(playlist_name.to_string());

        if let Some(error) = self
            .next_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            return Err(error);
        }

        self.playlists
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&playlist_name.to_lowercase())
            .cloned()
            .map(dedup_album_keys)
            .ok_or_else(|| PlaylistError::PlaylistNotFound(playlist_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_case_insensitive_lookup() {
        let source = MockPlaylistSource::new()
            .with_playlist("Road Trip", vec![fixtures::album("Artist", "Album")]);

        let albums = source
            .fetch_album_keys(&fixtures::credentials(), "road trip")
            .await
            .unwrap();
        assert_eq!(albums.len(), 1);

        let missing = source
            .fetch_album_keys(&fixtures::credentials(), "Gym")
            .await;
        assert!(matches!(missing, Err(PlaylistError::PlaylistNotFound(_))));
        assert_eq!(source.requests(), vec!["road trip", "Gym"]);
    }
}
