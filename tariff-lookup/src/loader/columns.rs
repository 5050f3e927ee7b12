//! Mapping source columns onto fare record fields.
//!
//! Tariff sheets label their columns inconsistently ("ORIGEN", "Origen",
//! "origin"). Headers are compared by their normalized form against a
//! list of accepted names per field.

use crate::domain::{Fare, FareRecord, Location};
use crate::normalize::normalize;

use super::error::LoadError;

/// A record field and the header names it may appear under.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Field {
    /// Name used in error messages
    pub name: &'static str,
    /// Accepted header names, already normalized
    pub aliases: &'static [&'static str],
}

pub(crate) const ORIGIN: Field = Field {
    name: "origin",
    aliases: &["origen", "origin", "desde", "from"],
};

pub(crate) const DESTINATION: Field = Field {
    name: "destination",
    aliases: &["destino", "destination", "hasta", "to"],
};

pub(crate) const CARRIER: Field = Field {
    name: "carrier",
    aliases: &["empresa", "carrier", "operator", "operador"],
};

pub(crate) const MODALITY: Field = Field {
    name: "modality",
    aliases: &["modalidad", "modality", "servicio", "service"],
};

pub(crate) const FARE: Field = Field {
    name: "fare",
    aliases: &["tarifa", "fare", "precio", "price"],
};

pub(crate) const DISTANCE: Field = Field {
    name: "distance",
    aliases: &["km", "distancia", "distance", "distance_km", "kms"],
};

pub(crate) const LOCATION_NAME: Field = Field {
    name: "name",
    aliases: &["nombre", "name", "localidad", "location"],
};

impl Field {
    /// Whether a raw header names this field.
    pub fn matches(&self, header: &str) -> bool {
        let key = normalize(header);
        self.aliases.contains(&key.as_str())
    }

    /// Position of this field among `headers`, if present.
    pub fn position<'a>(&self, headers: impl IntoIterator<Item = &'a str>) -> Option<usize> {
        headers.into_iter().position(|h| self.matches(h))
    }

    /// Position of this field among `headers`, or a missing-column error.
    pub fn require<'a>(
        &self,
        headers: impl IntoIterator<Item = &'a str>,
    ) -> Result<usize, LoadError> {
        self.position(headers)
            .ok_or(LoadError::MissingColumn(self.name))
    }
}

/// Column positions of every fare record field in a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnMap {
    pub origin: usize,
    pub destination: usize,
    pub carrier: usize,
    pub modality: usize,
    pub fare: usize,
    pub distance: Option<usize>,
}

impl ColumnMap {
    /// Locate each field in a header row.
    pub fn from_headers(headers: &[&str]) -> Result<Self, LoadError> {
        let headers = || headers.iter().copied();
        Ok(Self {
            origin: ORIGIN.require(headers())?,
            destination: DESTINATION.require(headers())?,
            carrier: CARRIER.require(headers())?,
            modality: MODALITY.require(headers())?,
            fare: FARE.require(headers())?,
            distance: DISTANCE.position(headers()),
        })
    }
}

/// Build a record from already-extracted cell values.
///
/// Origin and destination must be non-blank. Carrier and modality may be
/// blank; some sheets leave them empty for single-operator routes.
pub(crate) fn build_record(
    row: usize,
    origin: &str,
    destination: &str,
    carrier: &str,
    modality: &str,
    fare: Fare,
    distance_km: Option<f64>,
) -> Result<FareRecord, LoadError> {
    let origin = non_blank(row, ORIGIN, origin)?;
    let destination = non_blank(row, DESTINATION, destination)?;

    Ok(FareRecord {
        origin: Location::new(origin),
        destination: Location::new(destination),
        carrier: carrier.trim().to_string(),
        modality: modality.trim().to_string(),
        fare,
        distance_km,
    })
}

fn non_blank(row: usize, field: Field, value: &str) -> Result<&str, LoadError> {
    let value = value.trim();
    if value.is_empty() || normalize(value).is_empty() {
        return Err(LoadError::EmptyField {
            row,
            column: field.name,
        });
    }
    Ok(value)
}

/// Parse a fare cell.
pub(crate) fn parse_fare(row: usize, value: &str) -> Result<Fare, LoadError> {
    Fare::parse(value).map_err(|source| LoadError::InvalidFare {
        row,
        value: value.to_string(),
        source,
    })
}

/// Parse an optional distance cell. Blank means "not listed".
pub(crate) fn parse_distance(row: usize, value: &str) -> Result<Option<f64>, LoadError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let km: f64 = trimmed
        .replace(',', ".")
        .parse()
        .map_err(|_| invalid_distance(row, value))?;
    check_distance(row, value, km).map(Some)
}

/// Reject negative and non-finite distances.
pub(crate) fn check_distance(row: usize, value: &str, km: f64) -> Result<f64, LoadError> {
    if km.is_finite() && km >= 0.0 {
        Ok(km)
    } else {
        Err(invalid_distance(row, value))
    }
}

fn invalid_distance(row: usize, value: &str) -> LoadError {
    LoadError::InvalidDistance {
        row,
        value: value.to_string(),
    }
}
