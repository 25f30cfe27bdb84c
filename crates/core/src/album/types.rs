//! Types identifying an album across the run.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::normalize::{normalize, search_query};

/// Unique (artist, album) pair taken from a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlbumKey {
    pub artist: String,
    pub album: String,
}

/// Errors when building an [`AlbumKey`] from user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlbumKeyError {
    #[error("artist must not be empty")]
    EmptyArtist,

    #[error("album must not be empty")]
    EmptyAlbum,

    #[error("expected \"Artist - Album\", got {0:?}")]
    MissingSeparator(String),
}

impl AlbumKey {
    /// Create a key, rejecting blank artist or album text.
    pub fn new(artist: impl Into<String>, album: impl Into<String>) -> Result<Self, AlbumKeyError> {
        let artist = artist.into();
        let album = album.into();
        if artist.trim().is_empty() {
            return Err(AlbumKeyError::EmptyArtist);
        }
        if album.trim().is_empty() {
            return Err(AlbumKeyError::EmptyAlbum);
        }
        Ok(Self { artist, album })
    }

    /// Normalized artist text used for title matching.
    pub fn normalized_artist(&self) -> String {
        normalize(&self.artist)
    }

    /// Normalized album text used for title matching.
    pub fn normalized_album(&self) -> String {
        normalize(&self.album)
    }

    /// Free-text query for the torrent index.
    pub fn query(&self, separator: &str) -> String {
        search_query(&self.artist, &self.album, separator)
    }
}

impl fmt::Display for AlbumKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.album)
    }
}

/// Parses `"Artist - Album"`. The first ` - ` splits the two parts.
impl FromStr for AlbumKey {
    type Err = AlbumKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (artist, album) = s
            .split_once(" - ")
            .ok_or_else(|| AlbumKeyError::MissingSeparator(s.to_string()))?;
        Self::new(artist.trim(), album.trim())
    }
}

/// Remove duplicate keys, keeping the first occurrence of each.
pub fn dedup_album_keys<I>(keys: I) -> Vec<AlbumKey>
where
    I: IntoIterator<Item = AlbumKey>,
{
    let mut seen = HashSet::new();
    keys.into_iter()
        .filter(|key| seen.insert(key.clone()))
        .collect()
}
