//! Playlist source abstraction.
//!
//! This module provides a `PlaylistSource` trait that yields the unique
//! albums of a named playlist, with an HTTP music-service backend and an
//! offline JSON export backend.

mod file;
mod http;
mod types;

pub use file::FilePlaylistSource;
pub use http::HttpPlaylistSource;
pub use types::*;
