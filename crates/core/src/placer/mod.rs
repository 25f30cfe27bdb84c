//! Placer module for persisting matched albums.
//!
//! This module provides the `Placer` trait and two implementations:
//!
//! - [`MagnetFilePlacer`] writes `<title>.magnet` files into a directory
//! - [`TorrentClientPlacer`] submits the magnet URI to a remote torrent
//!   client, optionally checking a local music library for an existing copy
//!
//! # Example
//!
//! ```ignore
//! use magpie_core::placer::{MagnetFilePlacer, Placer};
//!
//! let placer = MagnetFilePlacer::new("/home/me/downloads/torrents");
//! let outcome = placer.place(&album, &candidate).await?;
//! println!("{}", outcome);
//! ```

mod client_submit;
mod error;
mod magnet_file;
mod traits;
mod types;

pub use client_submit::TorrentClientPlacer;
pub use error::PlacerError;
pub use magnet_file::MagnetFilePlacer;
pub use traits::Placer;
pub use types::PlacementOutcome;
