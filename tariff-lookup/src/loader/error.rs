//! Load-time error types.

use std::path::PathBuf;

use crate::domain::InvalidFare;

/// Errors that can occur while loading a tariff table or gazetteer.
///
/// These are reported once, when a snapshot is built, and are separate
/// from per-query resolution errors.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Malformed CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON, or JSON that is not an array of row objects
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required column is absent from the header
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    /// A JSON row object lacks a required key
    #[error("row {row}: missing {column}")]
    MissingField { row: usize, column: &'static str },

    /// A required cell is blank
    #[error("row {row}: empty {column}")]
    EmptyField { row: usize, column: &'static str },

    /// The fare cell does not hold an amount
    #[error("row {row}: invalid fare '{value}': {source}")]
    InvalidFare {
        row: usize,
        value: String,
        source: InvalidFare,
    },

    /// The distance cell does not hold a non-negative number
    #[error("row {row}: invalid distance '{value}'")]
    InvalidDistance { row: usize, value: String },

    /// The file extension is not a supported table format
    #[error("unsupported table format: {0} (expected .csv or .json)")]
    UnsupportedFormat(String),

    /// The table parsed but holds no fare records
    #[error("tariff table has no fare records")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Fare;

    #[test]
    fn error_display() {
        let err = LoadError::MissingColumn("fare");
        assert_eq!(err.to_string(), "missing required column 'fare'");

        let err = LoadError::MissingField {
            row: 2,
            column: "modality",
        };
        assert_eq!(err.to_string(), "row 2: missing modality");

        let err = LoadError::EmptyField {
            row: 4,
            column: "origin",
        };
        assert_eq!(err.to_string(), "row 4: empty origin");

        let err = LoadError::InvalidFare {
            row: 7,
            value: "abc".into(),
            source: Fare::parse("abc").unwrap_err(),
        };
        assert_eq!(
            err.to_string(),
            "row 7: invalid fare 'abc': invalid fare amount: unexpected character"
        );

        let err = LoadError::UnsupportedFormat("xlsx".into());
        assert_eq!(
            err.to_string(),
            "unsupported table format: xlsx (expected .csv or .json)"
        );

        assert_eq!(LoadError::Empty.to_string(), "tariff table has no fare records");
    }
}
