//! Run orchestrator.
//!
//! Resolves the album set once, then processes albums sequentially:
//! - **Search**: one torrent index query per album
//! - **Select**: exact-title filter, seed ranking, format match
//! - **Place**: magnet file or torrent client submission

mod config;
mod runner;
mod types;

pub use config::RunConfig;
pub use runner::{ProgressCallback, RunOrchestrator};
pub use types::{AlbumReport, AlbumSelection, RunError, RunEvent, RunSummary};
