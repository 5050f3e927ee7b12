//! CSV tariff sheets and gazetteers.

use std::io::Read;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::domain::{Corpus, FareRecord, FareTable};
use crate::normalize::normalize;

use super::columns::{self, ColumnMap, LOCATION_NAME};
use super::error::LoadError;

/// Read a tariff table from CSV.
///
/// The first line must be a header row; columns are located by name (see
/// the column aliases in this module's parent). Row numbers in errors are
/// file line numbers, so the first data row is row 2.
pub fn read_table_csv<R: Read>(reader: R) -> Result<FareTable, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns = ColumnMap::from_headers(&headers.iter().collect::<Vec<_>>())?;
    debug!(?columns, "mapped tariff columns");

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row = result?;
        let line = idx + 2;
        records.push(row_to_record(line, &row, &columns)?);
    }

    if records.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(FareTable::new(records))
}

fn row_to_record(
    line: usize,
    row: &csv::StringRecord,
    columns: &ColumnMap,
) -> Result<FareRecord, LoadError> {
    let cell = |idx: usize| row.get(idx).unwrap_or("");

    let fare = columns::parse_fare(line, cell(columns.fare))?;
    let distance = match columns.distance {
        Some(idx) => columns::parse_distance(line, cell(idx))?,
        None => None,
    };

    columns::build_record(
        line,
        cell(columns.origin),
        cell(columns.destination),
        cell(columns.carrier),
        cell(columns.modality),
        fare,
        distance,
    )
}

/// Read a gazetteer of location names from CSV.
///
/// Uses the first column named like "nombre" / "name". Blank cells are
/// skipped and repeated names are kept once, in file order.
pub fn read_locations_csv<R: Read>(reader: R) -> Result<Corpus, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let column = LOCATION_NAME.require(reader.headers()?.iter())?;

    let mut names = Vec::new();
    for result in reader.records() {
        let row = result?;
        if let Some(name) = row.get(column).filter(|n| !normalize(n).is_empty()) {
            names.push(name.to_string());
        }
    }

    Ok(Corpus::from_names(names))
}
