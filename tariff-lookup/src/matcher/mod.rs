//! Fuzzy resolution of place names.
//!
//! A query is normalized and scored against every entry of a [`Corpus`].
//! Entries scoring at or above the cutoff are candidates; depending on
//! [`MatchMode`] the query resolves to the single best one or to a ranked
//! handful. Failing to resolve is an ordinary outcome, not an error.
//!
//! [`Corpus`]: crate::domain::Corpus

mod config;
mod resolve;
mod similarity;

pub use config::{
    ConfigError, DEFAULT_CUTOFF, DEFAULT_K, MatchConfig, MatchMode, PERMISSIVE_CUTOFF,
    RANKED_CUTOFF,
};
pub use resolve::{Candidate, MatchResult, Matcher, resolve};
pub use similarity::{Scorer, ratio, token_set_ratio, token_sort_ratio, weighted_ratio};
