//! Orchestrator configuration.

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Settings the run loop needs from the full configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Format requested by the operator ("mp3", "flac", ...).
    pub desired_format: String,

    /// Separator the torrent index expects between query words.
    pub query_separator: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            desired_format: "mp3".to_string(),
            query_separator: " ".to_string(),
        }
    }
}

impl From<&Config> for RunConfig {
    fn from(config: &Config) -> Self {
        Self {
            desired_format: config.output.format.clone(),
            query_separator: config.torrent_index.query_separator.clone(),
        }
    }
}
