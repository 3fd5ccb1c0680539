//! Forecast file writer.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use syncat_catalog::Forecast;
use tracing::info;

use crate::error::IoError;

/// Header of forecast files.
pub const FORECAST_HEADER: [&str; 7] = [
    "lon",
    " lat",
    " M",
    " time_string",
    " depth",
    " catalog_id",
    " event_id",
];

const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// How forecast files are named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ForecastNaming {
    /// `syncat_<start-date>.csv`
    #[default]
    StartDate,
    /// `syncat_<start-date>_<end-date>.csv`
    StartAndEndDate,
}

/// Path of the forecast file for a window inside `folder`.
pub fn forecast_path(
    folder: &Path,
    start: NaiveDateTime,
    end: NaiveDateTime,
    naming: ForecastNaming,
) -> PathBuf {
    let name = match naming {
        ForecastNaming::StartDate => format!("syncat_{}.csv", start.format("%Y-%m-%d")),
        ForecastNaming::StartAndEndDate => format!(
            "syncat_{}_{}.csv",
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        ),
    };
    folder.join(name)
}

/// Writes `forecast` into `folder` and returns the file path.
///
/// The folder is created if missing and an existing file for the same
/// window is overwritten. Magnitudes are written with two decimals and
/// origin times as `YYYY-MM-DDTHH:MM:SS.ffffff`.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the folder cannot be created or
/// [`IoError::Csv`] if writing fails.
pub fn write_forecast(
    forecast: &Forecast,
    folder: &Path,
    start: NaiveDateTime,
    end: NaiveDateTime,
    naming: ForecastNaming,
) -> Result<PathBuf, IoError> {
    fs::create_dir_all(folder)?;
    let path = forecast_path(folder, start, end, naming);

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&path)?;
    writer.write_record(FORECAST_HEADER)?;
    for e in forecast.events() {
        writer.write_record([
            e.longitude.to_string(),
            e.latitude.to_string(),
            format!("{:.2}", e.magnitude),
            e.origin_time.format(OUTPUT_TIMESTAMP_FORMAT).to_string(),
            e.depth.to_string(),
            e.catalog_id.to_string(),
            e.event_id.to_string(),
        ])?;
    }
    writer.flush()?;

    info!(
        path = %path.display(),
        n_events = forecast.len(),
        n_catalogs = forecast.n_catalogs(),
        "wrote forecast"
    );
    Ok(path)
}
