//! Domain types for the tariff lookup.
//!
//! These types describe a tariff sheet after it has been loaded and
//! validated. They are immutable snapshots: a reload builds new values
//! rather than editing existing ones.

mod corpus;
mod fare;
mod location;
mod record;

pub use corpus::{Corpus, LARGE_CORPUS};
pub use fare::{Fare, InvalidFare};
pub use location::Location;
pub use record::{FareRecord, FareTable};
