//! The set of names queries are matched against.

use std::collections::HashSet;

use super::Location;

/// Corpora above this size are still scanned in full on every query.
pub const LARGE_CORPUS: usize = 50_000;

/// An ordered set of canonical locations.
///
/// Order matters: when two entries score the same against a query, the
/// earlier one wins. Duplicates (by canonical name) are dropped on
/// construction, keeping the first occurrence.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    locations: Vec<Location>,
}

impl Corpus {
    /// Create an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from canonical names, in the given order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().map(Location::new).collect()
    }

    /// Look up a location by its exact canonical name.
    pub fn get(&self, name: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.name() == name)
    }

    /// Check whether a canonical name is in the corpus.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over locations in corpus order.
    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    /// Returns the number of locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns true if the corpus is empty.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Whether linear scans over this corpus will be noticeably slow.
    pub fn is_large(&self) -> bool {
        self.len() > LARGE_CORPUS
    }
}

impl FromIterator<Location> for Corpus {
    fn from_iter<I: IntoIterator<Item = Location>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let locations = iter
            .into_iter()
            .filter(|l| seen.insert(l.name().to_string()))
            .collect();
        Self { locations }
    }
}
