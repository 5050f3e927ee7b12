//! Canonical location names.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

use crate::normalize::normalize;

/// A place as spelled in the tariff table.
///
/// The normalized key is derived once at construction and cannot be set
/// independently. Identity is the canonical name: two locations are equal
/// when their names are equal, regardless of how they normalize.
///
/// # Examples
///
/// ```
/// use tariff_lookup::domain::Location;
///
/// let cba = Location::new("Córdoba");
/// assert_eq!(cba.name(), "Córdoba");
/// assert_eq!(cba.normalized(), "cordoba");
///
/// // Same key, different canonical spelling: not the same location
/// assert_ne!(cba, Location::new("CORDOBA"));
/// ```
#[derive(Clone)]
pub struct Location {
    name: String,
    normalized: String,
}

impl Location {
    /// Create a location from its canonical name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let normalized = normalize(&name);
        Self { name, normalized }
    }

    /// The canonical spelling, for display.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The comparison key.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location({})", self.name)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}
