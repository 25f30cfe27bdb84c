//! Types for persisting matched albums.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What happened to a matched candidate after selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PlacementOutcome {
    /// Magnet file written.
    Saved { path: PathBuf },
    /// Magnet accepted by the remote torrent client.
    Submitted { info_hash: String },
    /// Operator declined to fetch a copy already present in the library.
    Skipped { existing: PathBuf },
    /// The magnet could not be persisted for this album. `status` is the
    /// HTTP status when a remote torrent client answered.
    Failed {
        status: Option<u16>,
        message: String,
    },
}

impl PlacementOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, PlacementOutcome::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, PlacementOutcome::Failed { .. })
    }
}

impl std::fmt::Display for PlacementOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementOutcome::Saved { path } => {
                write!(f, "magnet file saved to \"{}\"", path.display())
            }
            PlacementOutcome::Submitted { info_hash } => {
                write!(f, "submitted to torrent client ({})", info_hash)
            }
            PlacementOutcome::Skipped { existing } => {
                write!(f, "skipped, already in library at \"{}\"", existing.display())
            }
            PlacementOutcome::Failed {
                status: Some(status),
                message,
            } => write!(f, "submission failed with HTTP {}: {}", status, message),
            PlacementOutcome::Failed {
                status: None,
                message,
            } => write!(f, "placement failed: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        let saved = PlacementOutcome::Saved {
            path: PathBuf::from("/tmp/out/Album.magnet"),
        };
        assert_eq!(saved.to_string(), "magnet file saved to \"/tmp/out/Album.magnet\"");

        let failed = PlacementOutcome::Failed {
            status: Some(400),
            message: "rejected".to_string(),
        };
        assert_eq!(failed.to_string(), "submission failed with HTTP 400: rejected");
        assert!(failed.is_failed());
        assert!(!failed.is_skipped());
    }

    #[test]
    fn test_outcome_serialization_tag() {
        let outcome = PlacementOutcome::Submitted {
            info_hash: "abc".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "submitted");
        assert_eq!(json["info_hash"], "abc");
    }

    #[test]
    fn test_failed_outcome_keeps_http_status() {
        let outcome = PlacementOutcome::Failed {
            status: Some(401),
            message: "unauthorized".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "failed");
        assert_eq!(json["status"], 401);

        let back: PlacementOutcome = serde_json::from_value(json).unwrap();
        assert_eq!(back, outcome);
    }
}
