//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of every external collaborator
//! trait, so full runs can be tested without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use magpie_core::testing::{fixtures, MockPlaylistSource, MockTorrentIndex};
//!
//! let playlist = MockPlaylistSource::new()
//!     .with_playlist("Road Trip", vec![fixtures::album("POLIÇA", "Shulamith")]);
//! let index = MockTorrentIndex::new();
//! index.set_results("polica shulamith", vec![
//!     fixtures::candidate("Polica Shulamith FLAC", "lossless", 12, "abc"),
//! ]);
//! ```

#[cfg(test)]
pub(crate) mod http_stub;
mod mock_index;
mod mock_playlist;
mod mock_torrent_client;
mod scripted_prompter;

pub use mock_index::MockTorrentIndex;
pub use mock_playlist::MockPlaylistSource;
pub use mock_torrent_client::MockTorrentClient;
pub use scripted_prompter::{RecordedOffer, ScriptedPrompter};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::album::AlbumKey;
    use crate::config::Credentials;
    use crate::playlist::{PlaylistContents, PlaylistEntry, TrackMetadata};
    use crate::searcher::Candidate;

    /// Create a search candidate.
    pub fn candidate(title: &str, category: &str, seeds: u32, info_hash: &str) -> Candidate {
        Candidate {
            title: title.to_string(),
            category: category.to_string(),
            seeds,
            info_hash: info_hash.to_string(),
        }
    }

    /// Create an album key without validation.
    pub fn album(artist: &str, album: &str) -> AlbumKey {
        AlbumKey {
            artist: artist.to_string(),
            album: album.to_string(),
        }
    }

    /// Music service credentials for tests.
    pub fn credentials() -> Credentials {
        Credentials {
            login: "listener@example.com".to_string(),
            password: "hunter2".to_string(),
            device_id: None,
        }
    }

    /// A playlist with one track per (artist, album) pair.
    pub fn playlist(name: &str, albums: &[(&str, &str)]) -> PlaylistContents {
        PlaylistContents {
            name: name.to_string(),
            tracks: albums
                .iter()
                .map(|(artist, album)| PlaylistEntry {
                    track: Some(TrackMetadata {
                        album_artist: None,
                        artist: Some(artist.to_string()),
                        album: Some(album.to_string()),
                    }),
                })
                .collect(),
        }
    }
}
