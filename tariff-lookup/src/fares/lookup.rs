//! Resolving both ends of a trip and selecting its fares.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::domain::{Corpus, FareRecord, FareTable, Location};
use crate::matcher::{Candidate, MatchConfig, MatchResult, Matcher};

use super::error::{ResolutionError, Side};

/// A successful lookup: how each side resolved, and the fares found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteFares {
    /// Best match for the origin query
    pub origin: MatchResult,
    /// Best match for the destination query
    pub destination: MatchResult,
    /// Every origin candidate used for the join (one outside top-k mode)
    pub origin_candidates: Vec<Candidate>,
    /// Every destination candidate used for the join
    pub destination_candidates: Vec<Candidate>,
    /// Matching fares in sheet order, one per route and (carrier, modality, fare)
    pub fares: Vec<FareRecord>,
}

impl RouteFares {
    /// Returns true if both places resolved but no fare is on record.
    pub fn is_empty(&self) -> bool {
        self.fares.is_empty()
    }
}

/// Resolve both queries and return the fares between them.
///
/// The configuration is validated first; an invalid one fails with
/// [`ResolutionError::InvalidConfig`].
///
/// Each query is resolved independently against `corpus`. If either side
/// fails, the error names the side(s) and no filtering happens. If both
/// resolve to the same place and the configuration rejects that, the
/// lookup fails with [`ResolutionError::SameLocation`].
///
/// Otherwise every record joining an origin candidate to a destination
/// candidate, in either direction, is selected. Records offering the same
/// (carrier, modality, fare) on the same pair of places are collapsed to
/// the first in sheet order.
/// An empty selection is a successful, empty result.
pub fn lookup(
    origin_query: &str,
    destination_query: &str,
    table: &FareTable,
    corpus: &Corpus,
    config: &MatchConfig,
) -> Result<RouteFares, ResolutionError> {
    config.validate()?;

    let matcher = Matcher::new(corpus, config);
    let (origin, origin_candidates) = matcher.rank(origin_query);
    let (destination, destination_candidates) = matcher.rank(destination_query);

    debug!(
        origin_query,
        origin = origin.name(),
        origin_score = origin.score,
        destination_query,
        destination = destination.name(),
        destination_score = destination.score,
        "resolved lookup endpoints"
    );

    let unresolved = match (origin.is_match(), destination.is_match()) {
        (true, true) => None,
        (false, true) => Some(Side::Origin),
        (true, false) => Some(Side::Destination),
        (false, false) => Some(Side::Both),
    };
    if let Some(side) = unresolved {
        debug!(%side, "lookup unrecognized");
        return Err(ResolutionError::Unrecognized(side));
    }

    if config.reject_same_location && origin.resolved == destination.resolved {
        debug!(location = origin.name(), "origin and destination coincide");
        return Err(ResolutionError::SameLocation);
    }

    let fares = select_fares(table, &origin_candidates, &destination_candidates);
    debug!(fares = fares.len(), "selected fares");

    Ok(RouteFares {
        origin,
        destination,
        origin_candidates,
        destination_candidates,
        fares,
    })
}

/// Resolve both queries and return only the fares between them.
///
/// See [`lookup`] for the rules.
///
/// # Examples
///
/// ```
/// use tariff_lookup::domain::{Fare, FareRecord, FareTable, Location};
/// use tariff_lookup::fares::find_fares;
/// use tariff_lookup::matcher::MatchConfig;
///
/// let table = FareTable::new(vec![FareRecord {
///     origin: Location::new("Córdoba"),
///     destination: Location::new("Jesús María"),
///     carrier: "FONO BUS".into(),
///     modality: "Común".into(),
///     fare: Fare::from_cents(10_000),
///     distance_km: Some(48.0),
/// }]);
/// let corpus = table.corpus();
///
/// // Reversed and misspelled, still found
/// let fares = find_fares("jesus maria", "cordova", &table, &corpus, &MatchConfig::default())
///     .unwrap();
/// assert_eq!(fares.len(), 1);
/// ```
pub fn find_fares(
    origin_query: &str,
    destination_query: &str,
    table: &FareTable,
    corpus: &Corpus,
    config: &MatchConfig,
) -> Result<Vec<FareRecord>, ResolutionError> {
    lookup(origin_query, destination_query, table, corpus, config).map(|route| route.fares)
}

/// Records joining any origin candidate to any destination candidate, in
/// either direction, deduplicated on their offer.
fn select_fares(
    table: &FareTable,
    origins: &[Candidate],
    destinations: &[Candidate],
) -> Vec<FareRecord> {
    let from: HashSet<&Location> = origins.iter().map(|c| &c.location).collect();
    let to: HashSet<&Location> = destinations.iter().map(|c| &c.location).collect();

    let mut seen = HashSet::new();
    table
        .iter()
        .filter(|r| {
            (from.contains(&r.origin) && to.contains(&r.destination))
                || (from.contains(&r.destination) && to.contains(&r.origin))
        })
        .filter(|r| seen.insert(r.offer_key()))
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "lookup_tests.rs"]
mod tests;
