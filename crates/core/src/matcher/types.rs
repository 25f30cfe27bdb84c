//! Result types for album matching.

use serde::{Deserialize, Serialize};

use crate::album::AlbumKey;
use crate::searcher::Candidate;

/// Why no candidate was selected for an album.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The index returned nothing (or the search itself failed).
    NoResults,
    /// No title contained both the artist and the album.
    NoExactTextMatch,
    /// The best matching title has no seeders.
    NoSeeds,
    /// Seeded matches exist, but none in the desired format.
    NoFormatMatch,
    /// The operator turned down the album after it was offered.
    UserDeclinedAlternative,
}

impl FailureReason {
    /// Human readable explanation for run summaries.
    pub fn message(&self) -> &'static str {
        match self {
            FailureReason::NoResults => "No torrent results found.",
            FailureReason::NoExactTextMatch => {
                "Results found for either artist or album but they didn't match both exactly."
            }
            FailureReason::NoSeeds => "Results found, but none had seeds.",
            FailureReason::NoFormatMatch => {
                "Results with seeds were found but none in the desired format."
            }
            FailureReason::UserDeclinedAlternative => "Declined by the operator.",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// How a matched candidate was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    /// Passed the title filter, seed ranking and format match.
    Automatic,
    /// Picked by the operator from offered alternatives.
    Operator,
}

/// Terminal outcome for one album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchOutcome {
    Matched {
        candidate: Candidate,
        source: MatchSource,
    },
    Unmatched {
        reason: FailureReason,
    },
}

/// Selection result, produced once per album per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub album: AlbumKey,
    pub outcome: MatchOutcome,
}

impl MatchResult {
    pub fn matched(album: AlbumKey, candidate: Candidate, source: MatchSource) -> Self {
        Self {
            album,
            outcome: MatchOutcome::Matched { candidate, source },
        }
    }

    pub fn unmatched(album: AlbumKey, reason: FailureReason) -> Self {
        Self {
            album,
            outcome: MatchOutcome::Unmatched { reason },
        }
    }

    /// The selected candidate, if any.
    pub fn candidate(&self) -> Option<&Candidate> {
        match &self.outcome {
            MatchOutcome::Matched { candidate, .. } => Some(candidate),
            MatchOutcome::Unmatched { .. } => None,
        }
    }

    /// How the candidate was chosen, if matched.
    pub fn source(&self) -> Option<MatchSource> {
        match &self.outcome {
            MatchOutcome::Matched { source, .. } => Some(*source),
            MatchOutcome::Unmatched { .. } => None,
        }
    }

    /// The failure reason, if unmatched.
    pub fn failure(&self) -> Option<FailureReason> {
        match &self.outcome {
            MatchOutcome::Matched { .. } => None,
            MatchOutcome::Unmatched { reason } => Some(*reason),
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self.outcome, MatchOutcome::Matched { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_reason_messages() {
        assert_eq!(FailureReason::NoResults.to_string(), "No torrent results found.");
        assert_eq!(
            FailureReason::NoSeeds.message(),
            "Results found, but none had seeds."
        );
    }

    #[test]
    fn test_match_result_accessors() {
        let album = AlbumKey::new("Artist", "Album").unwrap();
        let candidate = Candidate {
            title: "Artist Album".to_string(),
            category: "mp3".to_string(),
            seeds: 4,
            info_hash: "abc".to_string(),
        };

        let matched = MatchResult::matched(album.clone(), candidate.clone(), MatchSource::Automatic);
        assert!(matched.is_matched());
        assert_eq!(matched.candidate(), Some(&candidate));
        assert_eq!(matched.failure(), None);

        let unmatched = MatchResult::unmatched(album, FailureReason::NoSeeds);
        assert!(!unmatched.is_matched());
        assert_eq!(unmatched.candidate(), None);
        assert_eq!(unmatched.failure(), Some(FailureReason::NoSeeds));
    }

    #[test]
    fn test_match_outcome_serialization() {
        let outcome = MatchOutcome::Unmatched {
            reason: FailureReason::NoFormatMatch,
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"status":"unmatched","reason":"no_format_match"}"#);
    }
}
