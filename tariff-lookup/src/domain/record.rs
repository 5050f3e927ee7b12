//! Fare records and the tariff table.

use std::collections::BTreeSet;

use serde::Serialize;

use super::{Corpus, Fare, Location};

/// One priced option on a route.
///
/// Several records may share an (origin, destination) pair, one per
/// carrier and modality.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareRecord {
    /// Where the tabulated trip starts
    pub origin: Location,
    /// Where the tabulated trip ends
    pub destination: Location,
    /// Operating company (e.g., "FONO BUS")
    pub carrier: String,
    /// Service class (e.g., "Común", "Diferencial")
    pub modality: String,
    /// Price of the ticket
    pub fare: Fare,
    /// Route length, when the sheet lists it
    pub distance_km: Option<f64>,
}

impl FareRecord {
    /// Whether this record serves the trip between `a` and `b`, in either
    /// direction.
    pub fn connects(&self, a: &Location, b: &Location) -> bool {
        (&self.origin == a && &self.destination == b)
            || (&self.origin == b && &self.destination == a)
    }

    /// The fields that identify a priced offer: the route as an unordered
    /// pair of places, carrier, modality and fare. Direction and distance
    /// are ignored.
    pub fn offer_key(&self) -> (&str, &str, &str, &str, Fare) {
        let (a, b) = (self.origin.name(), self.destination.name());
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        (low, high, &self.carrier, &self.modality, self.fare)
    }
}

/// The tariff table: an ordered, read-only list of fare records.
///
/// Built once per load and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct FareTable {
    records: Vec<FareRecord>,
}

impl FareTable {
    /// Create a table from records in sheet order.
    pub fn new(records: Vec<FareRecord>) -> Self {
        Self { records }
    }

    /// All records in sheet order.
    pub fn records(&self) -> &[FareRecord] {
        &self.records
    }

    /// Iterate over records in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = &FareRecord> {
        self.records.iter()
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The locations that appear in the table, as a corpus.
    ///
    /// This is the sorted union of every origin and destination, so every
    /// entry has at least one fare record.
    pub fn corpus(&self) -> Corpus {
        let names: BTreeSet<&str> = self
            .records
            .iter()
            .flat_map(|r| [r.origin.name(), r.destination.name()])
            .collect();
        Corpus::from_names(names)
    }
}

impl FromIterator<FareRecord> for FareTable {
    fn from_iter<I: IntoIterator<Item = FareRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(origin: &str, destination: &str, carrier: &str, fare: u64) -> FareRecord {
        FareRecord {
            origin: Location::new(origin),
            destination: Location::new(destination),
            carrier: carrier.to_string(),
            modality: "Común".to_string(),
            fare: Fare::from_cents(fare * 100),
            distance_km: None,
        }
    }

    #[test]
    fn connects_both_directions() {
        let r = record("Córdoba", "Jesús María", "X", 100);
        let cba = Location::new("Córdoba");
        let jm = Location::new("Jesús María");
        let cq = Location::new("Cosquín");

        assert!(r.connects(&cba, &jm));
        assert!(r.connects(&jm, &cba));
        assert!(!r.connects(&cba, &cq));
        assert!(!r.connects(&cba, &cba));
    }

    #[test]
    fn offer_key_ignores_direction() {
        let a = record("Córdoba", "Jesús María", "X", 100);
        let mut b = record("Jesús María", "Córdoba", "X", 100);
        b.distance_km = Some(48.0);
        assert_eq!(a.offer_key(), b.offer_key());
    }

    #[test]
    fn offer_key_distinguishes_routes() {
        let a = record("San Marcos", "Córdoba", "A", 200);
        let b = record("San Marcos Sierras", "Córdoba", "A", 200);
        assert_ne!(a.offer_key(), b.offer_key());
    }

    #[test]
    fn corpus_is_sorted_union() {
        let table: FareTable = vec![
            record("Córdoba", "Jesús María", "X", 100),
            record("Jesús María", "Córdoba", "Y", 120),
            record("Alta Gracia", "Córdoba", "X", 90),
        ]
        .into_iter()
        .collect();

        let corpus = table.corpus();
        let names: Vec<&str> = corpus.iter().map(|l| l.name()).collect();
        assert_eq!(names, vec!["Alta Gracia", "Córdoba", "Jesús María"]);
    }

    #[test]
    fn empty_table() {
        let table = FareTable::default();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(table.corpus().is_empty());
    }
}
