//! Loading tariff tables and gazetteers from disk.
//!
//! Tables come from CSV sheets or JSON arrays of row objects, chosen by
//! file extension. Columns are found by header name, so the Spanish
//! headers of the published sheets ("Origen", "Destino", "Empresa",
//! "Modalidad", "Tarifa", "KM") and English equivalents both work.
//!
//! A gazetteer is an optional CSV of canonical place names used as the
//! matching corpus instead of the places named in the table.

mod columns;
mod error;
mod json;
mod sheet;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::info;

use crate::domain::{Corpus, FareTable};

pub use error::LoadError;
pub use json::read_table_json;
pub use sheet::{read_locations_csv, read_table_csv};

/// Table formats understood by [`load_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Json,
}

impl TableFormat {
    /// Pick a format from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "" => Err(LoadError::UnsupportedFormat(path.display().to_string())),
            _ => Err(LoadError::UnsupportedFormat(ext)),
        }
    }
}

/// Load a tariff table from a `.csv` or `.json` file.
pub fn load_table(path: impl AsRef<Path>) -> Result<FareTable, LoadError> {
    let path = path.as_ref();
    let format = TableFormat::from_path(path)?;
    let reader = open(path)?;

    let table = match format {
        TableFormat::Csv => read_table_csv(reader)?,
        TableFormat::Json => read_table_json(reader)?,
    };

    info!(
        path = %path.display(),
        records = table.len(),
        "loaded tariff table"
    );
    Ok(table)
}

/// Load a gazetteer of canonical location names from a CSV file.
pub fn load_locations(path: impl AsRef<Path>) -> Result<Corpus, LoadError> {
    let path = path.as_ref();
    let corpus = read_locations_csv(open(path)?)?;

    info!(
        path = %path.display(),
        locations = corpus.len(),
        "loaded gazetteer"
    );
    Ok(corpus)
}

fn open(path: &Path) -> Result<BufReader<File>, LoadError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
}
