//! Matching configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::similarity::Scorer;

/// Cutoff for conservative single-best matching.
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// Cutoff favouring recall on short or ambiguous names.
pub const PERMISSIVE_CUTOFF: f64 = 0.5;

/// Cutoff used by the ranked preset.
pub const RANKED_CUTOFF: f64 = 0.70;

/// Number of candidates kept per side in top-k mode.
pub const DEFAULT_K: usize = 3;

/// Errors in matching configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Cutoff outside 0.0-1.0 and 0-100, or not a number
    #[error("cutoff must be between 0.0 and 1.0 (or 0 and 100), got {0}")]
    InvalidCutoff(f64),

    /// Top-k mode asked for zero candidates
    #[error("k must be at least 1")]
    ZeroK,

    /// Unrecognized match mode name
    #[error("unknown match mode '{0}' (expected exact, best or top-k)")]
    UnknownMode(String),

    /// Unrecognized scorer name
    #[error("unknown scorer '{0}' (expected ratio, token-sort or weighted)")]
    UnknownScorer(String),
}

/// How many candidates a query may resolve to, and how they are found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Only names whose normalized form equals the query's.
    Exact,
    /// The single highest-scoring name.
    #[default]
    Best,
    /// Up to `k` names, best first.
    TopK,
}

impl MatchMode {
    /// The name used in configuration files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            MatchMode::Exact => "exact",
            MatchMode::Best => "best",
            MatchMode::TopK => "top-k",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(MatchMode::Exact),
            "best" => Ok(MatchMode::Best),
            "top-k" | "topk" => Ok(MatchMode::TopK),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

/// Configuration for resolving place names and selecting fares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    /// Single best, ranked top-k, or exact matching.
    pub mode: MatchMode,

    /// Minimum similarity a candidate needs.
    /// Values up to 1.0 are ratios; larger values are read on a 0-100 scale.
    pub cutoff: f64,

    /// Candidates kept per side in top-k mode.
    pub k: usize,

    /// Similarity function.
    pub scorer: Scorer,

    /// Refuse lookups whose origin and destination resolve to the same place.
    pub reject_same_location: bool,
}

impl MatchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        mode: MatchMode,
        cutoff: f64,
        k: usize,
        scorer: Scorer,
        reject_same_location: bool,
    ) -> Self {
        Self {
            mode,
            cutoff,
            k,
            scorer,
            reject_same_location,
        }
    }

    /// Single best match at a 0.6 cutoff. This is the default.
    pub fn conservative() -> Self {
        Self::new(MatchMode::Best, DEFAULT_CUTOFF, DEFAULT_K, Scorer::Ratio, true)
    }

    /// Single best match at a 0.5 cutoff.
    pub fn permissive() -> Self {
        Self::conservative().with_cutoff(PERMISSIVE_CUTOFF)
    }

    /// Top three candidates per side with the weighted scorer at 0.70.
    pub fn ranked() -> Self {
        Self::new(
            MatchMode::TopK,
            RANKED_CUTOFF,
            DEFAULT_K,
            Scorer::Weighted,
            true,
        )
    }

    /// Set the cutoff.
    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Set the match mode.
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the number of candidates kept in top-k mode.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the scorer.
    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Enable or disable the same-location check.
    pub fn with_same_location_check(mut self, enabled: bool) -> Self {
        self.reject_same_location = enabled;
        self
    }

    /// The cutoff on the 0.0-1.0 scale.
    pub fn cutoff_ratio(&self) -> f64 {
        if self.cutoff > 1.0 {
            self.cutoff / 100.0
        } else {
            self.cutoff
        }
    }

    /// Maximum number of candidates a query may resolve to.
    pub fn limit(&self) -> usize {
        match self.mode {
            MatchMode::TopK => self.k,
            MatchMode::Exact | MatchMode::Best => 1,
        }
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.cutoff) {
            // NaN also lands here
            return Err(ConfigError::InvalidCutoff(self.cutoff));
        }
        if self.mode == MatchMode::TopK && self.k == 0 {
            return Err(ConfigError::ZeroK);
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::conservative()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = MatchConfig::default();

        assert_eq!(config.mode, MatchMode::Best);
        assert_eq!(config.cutoff, 0.6);
        assert_eq!(config.k, 3);
        assert_eq!(config.scorer, Scorer::Ratio);
        assert!(config.reject_same_location);
        assert_eq!(config.limit(), 1);
    }

    #[test]
    fn presets() {
        assert_eq!(MatchConfig::permissive().cutoff, 0.5);

        let ranked = MatchConfig::ranked();
        assert_eq!(ranked.mode, MatchMode::TopK);
        assert_eq!(ranked.limit(), 3);
        assert_eq!(ranked.scorer, Scorer::Weighted);
    }

    #[test]
    fn custom_config() {
        let config = MatchConfig::new(MatchMode::TopK, 80.0, 5, Scorer::TokenSort, false);

        assert_eq!(config.mode, MatchMode::TopK);
        assert_eq!(config.cutoff_ratio(), 0.8);
        assert_eq!(config.limit(), 5);
        assert!(!config.reject_same_location);
    }

    #[test]
    fn cutoff_scales() {
        assert_eq!(MatchConfig::default().with_cutoff(0.5).cutoff_ratio(), 0.5);
        assert_eq!(MatchConfig::default().with_cutoff(1.0).cutoff_ratio(), 1.0);
        assert_eq!(MatchConfig::default().with_cutoff(70.0).cutoff_ratio(), 0.7);
        assert_eq!(MatchConfig::default().with_cutoff(100.0).cutoff_ratio(), 1.0);
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(MatchConfig::default().validate().is_ok());
        assert_eq!(
            MatchConfig::default().with_cutoff(-0.1).validate(),
            Err(ConfigError::InvalidCutoff(-0.1))
        );
        assert!(MatchConfig::default().with_cutoff(101.0).validate().is_err());
        assert!(MatchConfig::default().with_cutoff(f64::NAN).validate().is_err());
        assert_eq!(
            MatchConfig::ranked().with_k(0).validate(),
            Err(ConfigError::ZeroK)
        );
        // k is irrelevant outside top-k mode
        assert!(MatchConfig::default().with_k(0).validate().is_ok());
    }

    #[test]
    fn mode_names() {
        assert_eq!("best".parse::<MatchMode>().unwrap(), MatchMode::Best);
        assert_eq!("top-k".parse::<MatchMode>().unwrap(), MatchMode::TopK);
        assert_eq!("exact".parse::<MatchMode>().unwrap(), MatchMode::Exact);
        assert_eq!(MatchMode::TopK.to_string(), "top-k");
        assert!(matches!(
            "fuzzy".parse::<MatchMode>(),
            Err(ConfigError::UnknownMode(_))
        ));
    }

    #[test]
    fn error_display() {
        let err = ConfigError::InvalidCutoff(150.0);
        assert_eq!(
            err.to_string(),
            "cutoff must be between 0.0 and 1.0 (or 0 and 100), got 150"
        );
        assert_eq!(ConfigError::ZeroK.to_string(), "k must be at least 1");
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: MatchConfig =
            serde_json::from_str(r#"{"mode": "top-k", "cutoff": 70}"#).unwrap();
        assert_eq!(config.mode, MatchMode::TopK);
        assert_eq!(config.cutoff_ratio(), 0.7);
        assert_eq!(config.k, DEFAULT_K);
        assert_eq!(config.scorer, Scorer::Ratio);
        assert!(config.reject_same_location);
    }
}
