//! String similarity scores in the range 0.0 to 1.0.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::config::ConfigError;

/// Weight applied to token-based scores in [`weighted_ratio`].
const TOKEN_WEIGHT: f64 = 0.95;

/// Which similarity function the matcher scores candidates with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scorer {
    /// Ratcliff/Obershelp sequence ratio.
    #[default]
    Ratio,
    /// Ratio of the words sorted alphabetically.
    TokenSort,
    /// Best of the plain ratio and the token-based ratios.
    Weighted,
}

impl Scorer {
    /// Score `a` against `b`.
    pub fn score(self, a: &str, b: &str) -> f64 {
        match self {
            Scorer::Ratio => ratio(a, b),
            Scorer::TokenSort => token_sort_ratio(a, b),
            Scorer::Weighted => weighted_ratio(a, b),
        }
    }

    /// The name used in configuration files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Scorer::Ratio => "ratio",
            Scorer::TokenSort => "token-sort",
            Scorer::Weighted => "weighted",
        }
    }
}

impl fmt::Display for Scorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scorer {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ratio" => Ok(Scorer::Ratio),
            "token-sort" => Ok(Scorer::TokenSort),
            "weighted" => Ok(Scorer::Weighted),
            other => Err(ConfigError::UnknownScorer(other.to_string())),
        }
    }
}

/// Ratcliff/Obershelp similarity: `2·M / T`.
///
/// `M` is the number of characters in matching blocks, found by taking the
/// longest common substring and recursing on the unmatched text to either
/// side of it. `T` is the total number of characters in both strings.
/// Two empty strings are identical.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

/// Total size of the matching blocks between `a` and `b`.
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matched += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    matched
}

/// Longest common substring of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Returns `(start_in_a, start_in_b, length)`. Among equally long blocks
/// the one starting earliest in `a`, then earliest in `b`, wins.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best = (alo, blo, 0);
    let width = bhi - blo + 1;
    // prev[j - blo + 1] is the length of the match ending at (i - 1, j)
    let mut prev = vec![0usize; width];
    let mut curr = vec![0usize; width];

    for i in alo..ahi {
        curr.fill(0);
        for j in blo..bhi {
            if a[i] == b[j] {
                let k = prev[j - blo] + 1;
                curr[j - blo + 1] = k;
                if k > best.2 {
                    best = (i + 1 - k, j + 1 - k, k);
                }
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}

/// Ratio of both strings with their words sorted.
///
/// Insensitive to word order: "maria jesus" scores 1.0 against
/// "jesus maria".
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Ratio over shared and unshared words.
///
/// The common words are compared against each side's full word set, so a
/// query that is a word-subset of a candidate ("carlos paz" against
/// "villa carlos paz") scores 1.0.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let ta: BTreeSet<&str> = a.split_whitespace().collect();
    let tb: BTreeSet<&str> = b.split_whitespace().collect();

    if ta.is_empty() || tb.is_empty() {
        return if ta.is_empty() && tb.is_empty() { 1.0 } else { 0.0 };
    }

    let common = join(ta.intersection(&tb));
    let with_a = extend(&common, &join(ta.difference(&tb)));
    let with_b = extend(&common, &join(tb.difference(&ta)));

    if common.is_empty() {
        return ratio(&with_a, &with_b);
    }

    ratio(&common, &with_a)
        .max(ratio(&common, &with_b))
        .max(ratio(&with_a, &with_b))
}

fn join<'a, 'b: 'a>(tokens: impl Iterator<Item = &'a &'b str>) -> String {
    tokens.copied().collect::<Vec<_>>().join(" ")
}

fn extend(base: &str, rest: &str) -> String {
    match (base.is_empty(), rest.is_empty()) {
        (true, _) => rest.to_string(),
        (_, true) => base.to_string(),
        _ => format!("{base} {rest}"),
    }
}

/// Token-aware weighted score.
///
/// The best of the plain [`ratio`] and the token-sort and token-set
/// ratios, the token-based ones discounted slightly so that an exact
/// character-level match still ranks first.
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    let plain = ratio(a, b);
    let sorted = token_sort_ratio(a, b) * TOKEN_WEIGHT;
    let set = token_set_ratio(a, b) * TOKEN_WEIGHT;
    plain.max(sorted).max(set)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Scores stay within 0.0..=1.0
        #[test]
        fn ratio_bounded(a in "[a-z ]{0,12}", b in "[a-z ]{0,12}") {
            let r = ratio(&a, &b);
            prop_assert!((0.0..=1.0).contains(&r));
            let w = weighted_ratio(&a, &b);
            prop_assert!((0.0..=1.0).contains(&w));
        }

        /// A string is identical to itself
        #[test]
        fn ratio_reflexive(a in "[a-z ]{0,12}") {
            prop_assert_eq!(ratio(&a, &a), 1.0);
        }

        /// Weighted score never falls below the plain ratio
        #[test]
        fn weighted_dominates_ratio(a in "[a-z ]{0,12}", b in "[a-z ]{0,12}") {
            prop_assert!(weighted_ratio(&a, &b) >= ratio(&a, &b));
        }
    }
}
