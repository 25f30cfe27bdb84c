//! Torrent index search abstraction.
//!
//! This module provides a `TorrentIndex` trait for querying a public torrent
//! index, and a client for the torrentproject JSON API.

mod torrentproject;
mod types;

pub use torrentproject::TorrentProjectIndex;
pub use types::*;
