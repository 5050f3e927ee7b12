//! Bidirectional fare lookup.
//!
//! Resolves an origin and a destination query against a corpus, then
//! selects every fare record on the route between them, whichever
//! endpoint the sheet lists first. Tariffs in this domain do not depend
//! on direction.

mod error;
mod lookup;

pub use error::{ResolutionError, Side};
pub use lookup::{RouteFares, find_fares, lookup};
