//! Torrent client abstraction.
//!
//! This module provides a `TorrentClient` trait for handing magnet links to
//! a remote client, and a uTorrent WebUI implementation.

mod magnet;
mod types;
mod utorrent;

pub use magnet::{extract_hash_from_magnet, magnet_uri};
pub use types::*;
pub use utorrent::UTorrentClient;
