//! Per-query lookup errors.
//!
//! These describe a query that cannot be answered. They are distinct from
//! load-time errors and never affect later queries.

use std::fmt;

use serde::Serialize;

use crate::matcher::ConfigError;

/// Which side of a lookup failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Origin,
    Destination,
    Both,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Origin => f.write_str("origin"),
            Side::Destination => f.write_str("destination"),
            Side::Both => f.write_str("origin and destination"),
        }
    }
}

/// Reasons a lookup produced no result set.
///
/// "Both places resolved but no fare is on record" is not an error; it is
/// an empty result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolutionError {
    /// The matching configuration does not pass validation
    #[error("invalid matching settings: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// No location scored above the cutoff
    #[error("unrecognized {0}: check the place name")]
    Unrecognized(Side),

    /// Origin and destination resolved to the same place
    #[error("origin and destination are the same place")]
    SameLocation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ResolutionError::Unrecognized(Side::Origin);
        assert_eq!(err.to_string(), "unrecognized origin: check the place name");

        let err = ResolutionError::Unrecognized(Side::Destination);
        assert_eq!(err.to_string(), "unrecognized destination: check the place name");

        let err = ResolutionError::Unrecognized(Side::Both);
        assert_eq!(
            err.to_string(),
            "unrecognized origin and destination: check the place name"
        );

        let err = ResolutionError::SameLocation;
        assert_eq!(err.to_string(), "origin and destination are the same place");

        let err = ResolutionError::InvalidConfig(ConfigError::ZeroK);
        assert_eq!(err.to_string(), "invalid matching settings: k must be at least 1");
    }
}
