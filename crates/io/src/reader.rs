//! CSV readers for historical catalogs and forecast files.

use std::path::Path;

use chrono::NaiveDateTime;
use syncat_catalog::{Catalog, Forecast, SeismicEvent};
use tracing::info;

use crate::error::IoError;

/// Timestamp layout of catalog and forecast files; the fractional part
/// is optional on input.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

const N_COLUMNS: usize = 7;

/// Reads a historical catalog.
///
/// The file has one header line followed by rows of
/// `longitude, latitude, magnitude, timestamp, depth, catalog_id, event_id`.
/// Fields are trimmed; header names are not checked.
///
/// # Errors
///
/// - [`IoError::FileNotFound`] if `path` does not exist.
/// - [`IoError::Parse`] for a row with the wrong number of fields or an
///   unparsable value; the error names the line.
pub fn read_catalog(path: &Path) -> Result<Catalog, IoError> {
    let events = read_events(path)?;
    info!(path = %path.display(), n_events = events.len(), "read catalog");
    Ok(Catalog::new(events))
}

/// Reads a forecast file written by [`write_forecast`](crate::write_forecast).
///
/// `n_catalogs` sets the number of synthetic catalogs when trailing
/// catalogs may be empty; `None` infers it from the largest `catalog_id`.
///
/// # Errors
///
/// As [`read_catalog`], plus [`IoError::Catalog`] when a `catalog_id` is
/// outside `0..n_catalogs`.
pub fn read_forecast(path: &Path, n_catalogs: Option<usize>) -> Result<Forecast, IoError> {
    let events = read_events(path)?;
    let forecast = match n_catalogs {
        Some(n) => Forecast::new(events, n)?,
        None => Forecast::from_events(events)?,
    };
    info!(
        path = %path.display(),
        n_events = forecast.len(),
        n_catalogs = forecast.n_catalogs(),
        "read forecast"
    );
    Ok(forecast)
}

fn read_events(path: &Path) -> Result<Vec<SeismicEvent>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let mut events = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let event = parse_event(&record).map_err(|reason| IoError::Parse {
            path: path.to_path_buf(),
            line,
            reason,
        })?;
        events.push(event);
    }
    Ok(events)
}

fn parse_event(record: &csv::StringRecord) -> Result<SeismicEvent, String> {
    // Trailing empty fields come from a trailing comma.
    let n_fields = record
        .as_byte_record()
        .iter()
        .rposition(|f| !f.is_empty())
        .map_or(0, |i| i + 1);
    if n_fields != N_COLUMNS {
        return Err(format!("expected {N_COLUMNS} fields, found {n_fields}"));
    }

    Ok(SeismicEvent {
        longitude: parse_f64(&record[0], "longitude")?,
        latitude: parse_f64(&record[1], "latitude")?,
        magnitude: parse_f64(&record[2], "magnitude")?,
        origin_time: parse_timestamp(&record[3])?,
        depth: parse_f64(&record[4], "depth")?,
        catalog_id: parse_id(&record[5], "catalog_id")?,
        event_id: parse_id(&record[6], "event_id")?,
    })
}

fn parse_f64(field: &str, name: &str) -> Result<f64, String> {
    field
        .parse()
        .map_err(|_| format!("invalid {name} {field:?}"))
}

/// Integer label; integral floats such as `-1.0` are accepted.
fn parse_id(field: &str, name: &str) -> Result<i64, String> {
    if let Ok(id) = field.parse::<i64>() {
        return Ok(id);
    }
    match field.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && v.abs() < 9.0e15 => Ok(v as i64),
        _ => Err(format!("invalid {name} {field:?}")),
    }
}

/// Parses `YYYY-MM-DDTHH:MM:SS[.ffffff]`.
pub(crate) fn parse_timestamp(field: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(field, TIMESTAMP_FORMAT)
        .map_err(|e| format!("invalid timestamp {field:?}: {e}"))
}
