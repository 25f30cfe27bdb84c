//! Best-match selection and its interactive fallback.
//!
//! [`MatchSelector`] turns the raw hits of one index query into a
//! [`MatchResult`]. It is pure except for the [`Prompter`] it escalates to
//! when no title matches exactly, or when no seeded match has the desired
//! format. Unattended runs use [`DecliningPrompter`] and never block.
//!
//! # Example
//!
//! ```ignore
//! use magpie_core::matcher::MatchSelector;
//!
//! let selector = MatchSelector::batch();
//! let result = selector.select(&album, "flac", &response.into_candidates());
//! ```

mod prompt;
mod selector;
mod types;

pub use prompt::{disambiguate, ConsolePrompter, DecliningPrompter, Prompter};
pub use selector::{
    filter_exact, rank_by_seeds, resolve_format, MatchSelector, LOSSLESS, NO_EXACT_MATCH_PROMPT,
    NO_FORMAT_MATCH_PROMPT,
};
pub use types::{FailureReason, MatchOutcome, MatchResult, MatchSource};
