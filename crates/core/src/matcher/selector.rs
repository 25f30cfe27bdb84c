//! Best-match selection over torrent index results.
//!
//! Candidates go through four stages, each of which can end the selection:
//!
//! 1. empty check
//! 2. title filter (both artist and album must appear in the title)
//! 3. seed ranking (stable, most seeded first)
//! 4. format match against the resolved desired format
//!
//! Stages 2 and 4 can escalate to the operator through a [`Prompter`].

use std::sync::Arc;

use tracing::debug;

use crate::album::{normalize, AlbumKey};
use crate::searcher::Candidate;

use super::prompt::{disambiguate, DecliningPrompter, Prompter};
use super::types::{FailureReason, MatchResult, MatchSource};

/// Reason shown to the operator when no title matches exactly.
pub const NO_EXACT_MATCH_PROMPT: &str = "results found but did not match artist and album exactly";

/// Reason shown to the operator when no seeded match has the desired format.
pub const NO_FORMAT_MATCH_PROMPT: &str = "results with seeds found but none in the desired format";

/// Canonical category for lossless formats.
pub const LOSSLESS: &str = "lossless";

/// Map a desired format to the category name used by the index.
///
/// "flac" and "ape" (any case) mean the lossless bucket; everything else is
/// lower-cased as is.
pub fn resolve_format(desired: &str) -> String {
    let desired = desired.trim().to_lowercase();
    match desired.as_str() {
        "flac" | "ape" => LOSSLESS.to_string(),
        _ => desired,
    }
}

/// Candidates whose normalized title contains both artist and album.
///
/// An artist or album with no text left after normalization (e.g. written
/// entirely in a non-Latin script) matches nothing.
pub fn filter_exact(album: &AlbumKey, candidates: &[Candidate]) -> Vec<Candidate> {
    let artist = album.normalized_artist();
    let title = album.normalized_album();
    if artist.is_empty() || title.is_empty() {
        return Vec::new();
    }

    candidates
        .iter()
        .filter(|c| {
            let haystack = normalize(&c.title);
            haystack.contains(&artist) && haystack.contains(&title)
        })
        .cloned()
        .collect()
}

/// Sort by seed count, most seeded first, keeping input order on ties.
pub fn rank_by_seeds(candidates: &mut [Candidate]) {
    // sort_by is stable
    candidates.sort_by(|a, b| b.seeds.cmp(&a.seeds));
}

/// Picks one candidate per album.
pub struct MatchSelector {
    prompter: Arc<dyn Prompter>,
}

impl Default for MatchSelector {
    fn default() -> Self {
        Self::batch()
    }
}

impl MatchSelector {
    /// Selector that escalates inconclusive cases to `prompter`.
    pub fn new(prompter: Arc<dyn Prompter>) -> Self {
        Self { prompter }
    }

    /// Selector for unattended runs; escalations end as unmatched.
    pub fn batch() -> Self {
        Self::new(Arc::new(DecliningPrompter))
    }

    /// Select the best candidate for `album`.
    ///
    /// `candidates` are the hits of a single index query, in index order.
    pub fn select(
        &self,
        album: &AlbumKey,
        desired_format: &str,
        candidates: &[Candidate],
    ) -> MatchResult {
        if candidates.is_empty() {
            return MatchResult::unmatched(album.clone(), FailureReason::NoResults);
        }

        let mut filtered = filter_exact(album, candidates);
        if filtered.is_empty() {
            debug!(album = %album, results = candidates.len(), "No exact title match");
            return self.escalate(
                album,
                candidates,
                NO_EXACT_MATCH_PROMPT,
                FailureReason::NoExactTextMatch,
            );
        }

        rank_by_seeds(&mut filtered);
        if filtered[0].seeds == 0 {
            return MatchResult::unmatched(album.clone(), FailureReason::NoSeeds);
        }

        let format = resolve_format(desired_format);
        match filtered
            .iter()
            .find(|c| c.category.eq_ignore_ascii_case(&format))
        {
            Some(found) => {
                MatchResult::matched(album.clone(), found.clone(), MatchSource::Automatic)
            }
            None => {
                debug!(album = %album, format = %format, "No candidate in desired format");
                self.escalate(
                    album,
                    &filtered,
                    NO_FORMAT_MATCH_PROMPT,
                    FailureReason::NoFormatMatch,
                )
            }
        }
    }

    fn escalate(
        &self,
        album: &AlbumKey,
        alternatives: &[Candidate],
        prompt: &str,
        reason: FailureReason,
    ) -> MatchResult {
        match disambiguate(self.prompter.as_ref(), alternatives, prompt) {
            Some(chosen) => MatchResult::matched(album.clone(), chosen, MatchSource::Operator),
            None => MatchResult::unmatched(album.clone(), reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::MatchOutcome;
    use crate::testing::ScriptedPrompter;

    fn candidate(title: &str, category: &str, seeds: u32, hash: &str) -> Candidate {
        Candidate {
            title: title.to_string(),
            category: category.to_string(),
            seeds,
            info_hash: hash.to_string(),
        }
    }

    fn polica() -> AlbumKey {
        AlbumKey::new("POLIÇA", "Shulamith").unwrap()
    }

    #[test]
    fn test_empty_candidates_is_no_results() {
        let result = MatchSelector::batch().select(&polica(), "mp3", &[]);
        assert_eq!(result.failure(), Some(FailureReason::NoResults));
    }

    #[test]
    fn test_lossless_match_with_diacritics() {
        let candidates = vec![candidate("Polica Shulamith FLAC", "lossless", 12, "abc")];
        let result = MatchSelector::batch().select(&polica(), "flac", &candidates);

        assert_eq!(result.album, polica());
        assert_eq!(
            result.outcome,
            MatchOutcome::Matched {
                candidate: candidates[0].clone(),
                source: MatchSource::Automatic,
            }
        );
    }

    #[test]
    fn test_wrong_format_is_no_format_match_in_batch() {
        let candidates = vec![candidate("Polica Shulamith MP3", "mp3", 5, "abc")];
        let result = MatchSelector::batch().select(&polica(), "flac", &candidates);
        assert_eq!(result.failure(), Some(FailureReason::NoFormatMatch));
    }

    #[test]
    fn test_no_title_match_is_no_exact_text_match() {
        let candidates = vec![
            candidate("Polica Give You The Ghost", "mp3", 30, "a"),
            candidate("Shulamith tribute", "mp3", 3, "b"),
        ];
        let result = MatchSelector::batch().select(&polica(), "mp3", &candidates);
        assert_eq!(result.failure(), Some(FailureReason::NoExactTextMatch));
    }

    #[test]
    fn test_title_match_is_order_independent() {
        let candidates = vec![candidate("Shulamith (2013) - Polica", "mp3", 4, "a")];
        let result = MatchSelector::batch().select(&polica(), "mp3", &candidates);
        assert!(result.is_matched());
    }

    #[test]
    fn test_zero_seeds_is_no_seeds_without_escalation() {
        let candidates = vec![
            candidate("Polica Shulamith", "mp3", 0, "a"),
            candidate("Polica Shulamith FLAC", "lossless", 0, "b"),
        ];
        let prompter = Arc::new(ScriptedPrompter::new(vec![1]));
        let selector = MatchSelector::new(prompter.clone());

        let result = selector.select(&polica(), "ogg", &candidates);
        assert_eq!(result.failure(), Some(FailureReason::NoSeeds));
        assert!(prompter.offers().is_empty());
    }

    #[test]
    fn test_rank_by_seeds_is_stable() {
        let mut candidates = vec![
            candidate("three", "mp3", 3, "a"),
            candidate("seven-first", "mp3", 7, "b"),
            candidate("zero", "mp3", 0, "c"),
            candidate("seven-second", "mp3", 7, "d"),
        ];
        rank_by_seeds(&mut candidates);

        let titles: Vec<_> = candidates.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["seven-first", "seven-second", "three", "zero"]);
    }

    #[test]
    fn test_format_match_takes_most_seeded_in_format() {
        let candidates = vec![
            candidate("Polica Shulamith mp3 v0", "mp3", 40, "mp3-top"),
            candidate("Polica Shulamith flac", "lossless", 9, "flac-low"),
            candidate("Polica Shulamith flac 24bit", "lossless", 20, "flac-high"),
        ];
        let result = MatchSelector::batch().select(&polica(), "FLAC", &candidates);
        assert_eq!(result.candidate().unwrap().info_hash, "flac-high");
    }

    #[test]
    fn test_equal_seeds_prefer_first_seen() {
        let candidates = vec![
            candidate("Polica Shulamith A", "mp3", 7, "first"),
            candidate("Polica Shulamith B", "mp3", 7, "second"),
        ];
        let result = MatchSelector::batch().select(&polica(), "mp3", &candidates);
        assert_eq!(result.candidate().unwrap().info_hash, "first");
    }

    #[test]
    fn test_resolve_format_aliases() {
        assert_eq!(resolve_format("FLAC"), "lossless");
        assert_eq!(resolve_format("ape"), "lossless");
        assert_eq!(resolve_format("Lossless"), "lossless");
        assert_eq!(resolve_format("MP3"), "mp3");
        assert_eq!(resolve_format("ogg"), "ogg");
    }

    #[test]
    fn test_ape_matches_lossless() {
        let candidates = vec![candidate("Polica Shulamith APE", "lossless", 3, "abc")];
        let result = MatchSelector::batch().select(&polica(), "ape", &candidates);
        assert!(result.is_matched());
    }

    #[test]
    fn test_select_is_idempotent() {
        let selector = MatchSelector::batch();
        let candidates = vec![
            candidate("Polica Shulamith", "mp3", 5, "a"),
            candidate("Polica Shulamith", "lossless", 8, "b"),
        ];
        let first = selector.select(&polica(), "mp3", &candidates);
        let second = selector.select(&polica(), "mp3", &candidates);
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_exact_match_offers_full_set() {
        let candidates = vec![
            candidate("Polica Give You The Ghost", "mp3", 30, "ghost"),
            candidate("Shulamith bootleg", "mp3", 1, "boot"),
        ];
        let prompter = Arc::new(ScriptedPrompter::new(vec![2]));
        let selector = MatchSelector::new(prompter.clone());

        let result = selector.select(&polica(), "mp3", &candidates);
        assert_eq!(
            result.outcome,
            MatchOutcome::Matched {
                candidate: candidates[1].clone(),
                source: MatchSource::Operator,
            }
        );

        let offers = prompter.offers();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].reason, NO_EXACT_MATCH_PROMPT);
        assert_eq!(offers[0].alternatives, candidates);
    }

    #[test]
    fn test_no_format_match_offers_ranked_filtered_set() {
        let candidates = vec![
            candidate("Polica Shulamith 128", "mp3", 2, "low"),
            candidate("Unrelated Album", "lossless", 50, "other"),
            candidate("Polica Shulamith 320", "mp3", 9, "high"),
        ];
        let prompter = Arc::new(ScriptedPrompter::new(vec![0]));
        let selector = MatchSelector::new(prompter.clone());

        let result = selector.select(&polica(), "flac", &candidates);
        assert_eq!(result.failure(), Some(FailureReason::NoFormatMatch));

        let offers = prompter.offers();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].reason, NO_FORMAT_MATCH_PROMPT);
        let hashes: Vec<_> = offers[0]
            .alternatives
            .iter()
            .map(|c| c.info_hash.as_str())
            .collect();
        assert_eq!(hashes, vec!["high", "low"]);
    }

    #[test]
    fn test_non_latin_album_is_never_matched_automatically() {
        let album = AlbumKey::new("Кино", "Группа крови").unwrap();
        let candidates = vec![candidate("Totally Unrelated Record", "mp3", 50, "u")];

        assert!(filter_exact(&album, &candidates).is_empty());
        let result = MatchSelector::batch().select(&album, "mp3", &candidates);
        assert_eq!(result.failure(), Some(FailureReason::NoExactTextMatch));
    }

    #[test]
    fn test_partly_latin_album_needs_the_latin_part() {
        let album = AlbumKey::new("Kino", "Группа крови").unwrap();
        let candidates = vec![candidate("Kino - Gruppa Krovi", "mp3", 8, "k")];
        let result = MatchSelector::batch().select(&album, "mp3", &candidates);
        assert_eq!(result.failure(), Some(FailureReason::NoExactTextMatch));
    }

    #[test]
    fn test_category_comparison_ignores_case() {
        let candidates = vec![
            candidate("Polica Shulamith", "MP3", 6, "upper"),
            candidate("Polica Shulamith FLAC", "Lossless", 4, "lossless"),
        ];
        let selector = MatchSelector::batch();

        let mp3 = selector.select(&polica(), "mp3", &candidates);
        assert_eq!(mp3.candidate().unwrap().info_hash, "upper");

        let flac = selector.select(&polica(), "flac", &candidates);
        assert_eq!(flac.candidate().unwrap().info_hash, "lossless");
    }

    #[test]
    fn test_operator_declining_keeps_original_reason() {
        let candidates = vec![candidate("Something Else", "mp3", 10, "x")];
        let prompter = Arc::new(ScriptedPrompter::new(vec![0]));
        let result = MatchSelector::new(prompter).select(&polica(), "mp3", &candidates);
        assert_eq!(result.failure(), Some(FailureReason::NoExactTextMatch));
    }
}
