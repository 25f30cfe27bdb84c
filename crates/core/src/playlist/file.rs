//! Playlist source backed by an exported JSON file.
//!
//! The export holds the same list of playlists the HTTP service returns, so
//! a run can be repeated offline. Credentials are not checked.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::album::AlbumKey;
use crate::config::Credentials;

use super::types::{album_keys_from_playlists, PlaylistContents, PlaylistError, PlaylistSource};

/// Reads playlists from a JSON export on disk.
pub struct FilePlaylistSource {
    path: PathBuf,
}

impl FilePlaylistSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PlaylistSource for FilePlaylistSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_album_keys(
        &self,
        _credentials: &Credentials,
        playlist_name: &str,
    ) -> Result<Vec<AlbumKey>, PlaylistError> {
        debug!(path = %self.path.display(), "Reading playlist export");

        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            PlaylistError::InvalidData(format!("{}: {}", self.path.display(), e))
        })?;
        let playlists: Vec<PlaylistContents> = serde_json::from_str(&raw).map_err(|e| {
            PlaylistError::InvalidData(format!("{}: {}", self.path.display(), e))
        })?;

        album_keys_from_playlists(&playlists, playlist_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn credentials() -> Credentials {
        Credentials {
            login: "me".to_string(),
            password: "unused".to_string(),
            device_id: None,
        }
    }

    #[tokio::test]
    async fn test_reads_export() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "Mix", "tracks": [{{"track": {{"albumArtist": "Burial", "album": "Untrue"}}}}]}}]"#
        )
        .unwrap();

        let source = FilePlaylistSource::new(file.path());
        let keys = source.fetch_album_keys(&credentials(), "mix").await.unwrap();
        assert_eq!(keys, vec![AlbumKey::new("Burial", "Untrue").unwrap()]);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = FilePlaylistSource::new("/nonexistent/playlists.json");
        let result = source.fetch_album_keys(&credentials(), "Mix").await;
        assert!(matches!(result, Err(PlaylistError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_malformed_export() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let source = FilePlaylistSource::new(file.path());
        let result = source.fetch_album_keys(&credentials(), "Mix").await;
        assert!(matches!(result, Err(PlaylistError::InvalidData(_))));
    }
}
