//! JSON tariff tables: an array of row objects.

use std::io::Read;

use serde_json::{Map, Value};

use crate::domain::{Fare, FareRecord, FareTable};

use super::columns::{self, CARRIER, DESTINATION, DISTANCE, FARE, Field, MODALITY, ORIGIN};
use super::error::LoadError;

type Row = Map<String, Value>;

/// Read a tariff table from a JSON array of objects.
///
/// Object keys are matched like CSV headers. Fares and distances may be
/// numbers or strings. Row numbers in errors count from 1.
pub fn read_table_json<R: Read>(reader: R) -> Result<FareTable, LoadError> {
    let rows: Vec<Row> = serde_json::from_reader(reader)?;

    let records = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| row_to_record(idx + 1, row))
        .collect::<Result<Vec<_>, _>>()?;

    if records.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(FareTable::new(records))
}

fn row_to_record(row: usize, object: &Row) -> Result<FareRecord, LoadError> {
    let origin = required_text(row, object, ORIGIN)?;
    let destination = required_text(row, object, DESTINATION)?;
    let carrier = required_text(row, object, CARRIER)?;
    let modality = required_text(row, object, MODALITY)?;

    let fare = match field(object, FARE) {
        Some(Value::Number(n)) => {
            let amount = n.as_f64().unwrap_or(f64::NAN);
            Fare::from_f64(amount).map_err(|source| LoadError::InvalidFare {
                row,
                value: n.to_string(),
                source,
            })?
        }
        Some(Value::String(s)) => columns::parse_fare(row, s)?,
        Some(other) => columns::parse_fare(row, &other.to_string())?,
        None => return Err(missing(row, FARE)),
    };

    let distance = match field(object, DISTANCE) {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => {
            let km = n.as_f64().unwrap_or(f64::NAN);
            Some(columns::check_distance(row, &n.to_string(), km)?)
        }
        Some(Value::String(s)) => columns::parse_distance(row, s)?,
        Some(other) => {
            return Err(LoadError::InvalidDistance {
                row,
                value: other.to_string(),
            });
        }
    };

    columns::build_record(row, &origin, &destination, &carrier, &modality, fare, distance)
}

fn missing(row: usize, field: Field) -> LoadError {
    LoadError::MissingField {
        row,
        column: field.name,
    }
}

fn required_text(row: usize, object: &Row, field: Field) -> Result<String, LoadError> {
    text(object, field).ok_or_else(|| missing(row, field))
}

/// The value stored under any of the field's aliases.
fn field<'a>(object: &'a Row, field: Field) -> Option<&'a Value> {
    object
        .iter()
        .find(|(key, _)| field.matches(key))
        .map(|(_, value)| value)
}

/// A textual cell. Numbers are accepted as text; null reads as blank.
fn text(object: &Row, f: Field) -> Option<String> {
    match field(object, f)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => Some(String::new()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_array_of_objects() {
        let json = r#"[
            {"origen": "Córdoba", "destino": "Cosquín", "empresa": "LA CAPILLA",
             "modalidad": "Común", "tarifa": 2150.5, "km": 63},
            {"Origin": "Cosquín", "Destination": "La Falda", "Carrier": "LA CAPILLA",
             "Modality": "Común", "Fare": "$ 600"}
        ]"#;
        let table = read_table_json(json.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);

        let first = &table.records()[0];
        assert_eq!(first.origin.name(), "Córdoba");
        assert_eq!(first.fare.cents(), 215_050);
        assert_eq!(first.distance_km, Some(63.0));

        let second = &table.records()[1];
        assert_eq!(second.destination.name(), "La Falda");
        assert_eq!(second.fare.cents(), 60_000);
        assert_eq!(second.distance_km, None);
    }

    #[test]
    fn missing_key_reports_row() {
        let json = r#"[
            {"origen": "Córdoba", "destino": "Cosquín", "empresa": "X", "modalidad": "Común", "tarifa": 1},
            {"origen": "Córdoba", "destino": "La Falda", "empresa": "X", "tarifa": 1}
        ]"#;
        assert!(matches!(
            read_table_json(json.as_bytes()),
            Err(LoadError::MissingField {
                row: 2,
                column: "modality"
            })
        ));

        let json = r#"[{"origen": "Córdoba", "destino": "Cosquín", "empresa": "X", "modalidad": "Común"}]"#;
        assert!(matches!(
            read_table_json(json.as_bytes()),
            Err(LoadError::MissingField { row: 1, column: "fare" })
        ));
    }

    #[test]
    fn negative_fare_reports_row() {
        let json = r#"[
            {"origen": "A", "destino": "B", "empresa": "X", "modalidad": "Común", "tarifa": 1},
            {"origen": "A", "destino": "C", "empresa": "X", "modalidad": "Común", "tarifa": -5}
        ]"#;
        assert!(matches!(
            read_table_json(json.as_bytes()),
            Err(LoadError::InvalidFare { row: 2, .. })
        ));
    }

    #[test]
    fn null_origin_is_empty_field() {
        let json = r#"[{"origen": null, "destino": "B", "empresa": "X", "modalidad": "", "tarifa": 1}]"#;
        assert!(matches!(
            read_table_json(json.as_bytes()),
            Err(LoadError::EmptyField {
                row: 1,
                column: "origin"
            })
        ));
    }

    #[test]
    fn not_an_array() {
        let json = r#"{"origen": "A"}"#;
        assert!(matches!(
            read_table_json(json.as_bytes()),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn empty_array() {
        assert!(matches!(
            read_table_json("[]".as_bytes()),
            Err(LoadError::Empty)
        ));
    }
}
