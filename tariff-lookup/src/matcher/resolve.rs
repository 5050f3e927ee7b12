//! Resolving free-text queries against a corpus.

use serde::Serialize;
use tracing::{trace, warn};

use crate::domain::{Corpus, Location};
use crate::normalize::normalize;

use super::config::{MatchConfig, MatchMode};

/// A corpus entry that cleared the cutoff, with its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub location: Location,
    pub score: f64,
}

/// The outcome of resolving one query.
///
/// An unresolved result is an expected outcome, not an error. Its `score`
/// is the best score seen, which fell short of the cutoff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// The best candidate, if any cleared the cutoff
    pub resolved: Option<Location>,
    /// The query as the caller supplied it
    pub query: String,
    /// Similarity of the best candidate seen (0.0 to 1.0)
    pub score: f64,
}

impl MatchResult {
    /// Whether the query resolved.
    pub fn is_match(&self) -> bool {
        self.resolved.is_some()
    }

    /// Canonical name of the resolved location.
    pub fn name(&self) -> Option<&str> {
        self.resolved.as_ref().map(Location::name)
    }
}

/// Scores queries against a corpus under a fixed configuration.
///
/// Borrowing both keeps a matcher cheap to create per query; it holds no
/// state of its own, so repeated calls with the same query agree.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    corpus: &'a Corpus,
    config: &'a MatchConfig,
}

impl<'a> Matcher<'a> {
    /// Create a matcher over `corpus`.
    pub fn new(corpus: &'a Corpus, config: &'a MatchConfig) -> Self {
        Self { corpus, config }
    }

    /// Resolve a query to its single best location.
    pub fn best(&self, query: &str) -> MatchResult {
        self.rank(query).0
    }

    /// All candidates the query resolves to, best first.
    ///
    /// At most one in `best` and `exact` modes, at most `k` in `top-k`
    /// mode. Equal scores keep corpus order.
    pub fn candidates(&self, query: &str) -> Vec<Candidate> {
        self.rank(query).1
    }

    /// Score every corpus entry, returning the best result and the
    /// accepted candidates.
    pub(crate) fn rank(&self, query: &str) -> (MatchResult, Vec<Candidate>) {
        let key = normalize(query);
        let cutoff = self.config.cutoff_ratio();

        let valid = match self.config.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "invalid matching settings; nothing resolves");
                false
            }
        };

        let mut best_seen = 0.0_f64;
        let mut accepted = Vec::new();

        if valid && !key.is_empty() {
            for location in self.corpus.iter() {
                let score = self.score(&key, location);
                trace!(candidate = location.name(), score, "scored candidate");

                best_seen = best_seen.max(score);
                if self.accepts(score) && score >= cutoff {
                    accepted.push(Candidate {
                        location: location.clone(),
                        score,
                    });
                }
            }
        }

        // Stable sort keeps corpus order among equal scores
        accepted.sort_by(|a: &Candidate, b: &Candidate| b.score.total_cmp(&a.score));
        accepted.truncate(self.config.limit());

        let result = MatchResult {
            resolved: accepted.first().map(|c| c.location.clone()),
            query: query.to_string(),
            score: accepted.first().map_or(best_seen, |c| c.score),
        };

        (result, accepted)
    }

    fn score(&self, key: &str, location: &Location) -> f64 {
        match self.config.mode {
            MatchMode::Exact => {
                if location.normalized() == key {
                    1.0
                } else {
                    0.0
                }
            }
            MatchMode::Best | MatchMode::TopK => self.config.scorer.score(key, location.normalized()),
        }
    }

    /// Exact mode accepts only exact hits, whatever the cutoff.
    fn accepts(&self, score: f64) -> bool {
        self.config.mode != MatchMode::Exact || score == 1.0
    }
}

/// Resolve `query` to the canonical name of its best match in `corpus`.
///
/// Returns `None` when nothing clears the cutoff, and for a configuration
/// that fails [`MatchConfig::validate`].
///
/// # Examples
///
/// ```
/// use tariff_lookup::domain::Corpus;
/// use tariff_lookup::matcher::{resolve, MatchConfig};
///
/// let corpus = Corpus::from_names(["Córdoba", "Río Ceballos"]);
/// let config = MatchConfig::permissive();
///
/// assert_eq!(resolve("cordova", &corpus, &config).as_deref(), Some("Córdoba"));
/// assert_eq!(resolve("rosario", &corpus, &config), None);
/// ```
pub fn resolve(query: &str, corpus: &Corpus, config: &MatchConfig) -> Option<String> {
    Matcher::new(corpus, config)
        .best(query)
        .resolved
        .map(|l| l.name().to_string())
}
