//! Fuzzy place-name lookup for an interurban bus tariff table.
//!
//! Given an origin and a destination as typed by a rider (misspelled,
//! unaccented, in any case), resolves each to a canonical place and lists
//! the fares between them in either direction.
//!
//! ```
//! use tariff_lookup::{Fare, FareRecord, FareTable, Location, MatchConfig, find_fares};
//!
//! let table = FareTable::new(vec![FareRecord {
//!     origin: Location::new("Córdoba"),
//!     destination: Location::new("Cosquín"),
//!     carrier: "LA CAPILLA".into(),
//!     modality: "Común".into(),
//!     fare: Fare::from_cents(215_000),
//!     distance_km: Some(63.0),
//! }]);
//! let corpus = table.corpus();
//!
//! let fares = find_fares("COSQUIN", "cordoba", &table, &corpus, &MatchConfig::default()).unwrap();
//! assert_eq!(fares[0].fare.to_string(), "$ 2,150.00");
//! ```

pub mod cli;
pub mod domain;
pub mod fares;
pub mod loader;
pub mod matcher;
pub mod normalize;
pub mod share;
pub mod store;

pub use domain::{Corpus, Fare, FareRecord, FareTable, Location};
pub use fares::{ResolutionError, RouteFares, Side, find_fares, lookup};
pub use loader::{LoadError, load_locations, load_table};
pub use matcher::{MatchConfig, MatchMode, MatchResult, Matcher, Scorer, resolve};
pub use normalize::normalize;
pub use store::{TariffSnapshot, TariffSource, TariffStore};
