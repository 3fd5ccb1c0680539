//! Forecast parameter files.
//!
//! Two layouts are understood. Files ending in `.toml` are TOML tables;
//! anything else is read as `key = value` lines:
//!
//! ```text
//! # forecast window
//! start_date = 2016/11/05 03:22:31
//! end_date = 2016/11/06 03:22:31
//! mag_min = 4.0
//! nsims = 1000
//! seed = 23
//! ```

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};
use syncat_forecast::{CountModel, SimulationStreams};
use tracing::{debug, info};

use crate::error::IoError;

/// Date layouts accepted in parameter files, tried in order.
const DATE_FORMATS: [&str; 4] = [
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%dT%H:%M:%S",
];

/// Contents of a parameter file. Every field is optional; defaults are
/// applied when the values are turned into forecast parameters.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForecastArgs {
    /// Forecast window start.
    #[serde(alias = "forecastStartDate", deserialize_with = "de_datetime")]
    pub start_date: Option<NaiveDateTime>,
    /// Forecast window end.
    #[serde(alias = "forecastEndDate", deserialize_with = "de_datetime")]
    pub end_date: Option<NaiveDateTime>,
    /// Minimum forecast magnitude.
    pub mag_min: Option<f64>,
    /// Magnitude of completeness.
    #[serde(alias = "mag_compl")]
    pub mag_completeness: Option<f64>,
    /// Short-term window length in days.
    pub lookback_days: Option<f64>,
    /// Threshold the lookback pool at Mc.
    pub apply_mc_to_lookback: Option<bool>,
    /// Count model name.
    #[serde(deserialize_with = "de_from_str")]
    pub distribution: Option<CountModel>,
    /// Number of synthetic catalogs.
    #[serde(alias = "n_sims", alias = "nsims")]
    pub n_simulations: Option<usize>,
    /// Random seed.
    pub seed: Option<u64>,
    /// Random stream layout.
    #[serde(deserialize_with = "de_from_str")]
    pub streams: Option<SimulationStreams>,
    /// Historical catalog file.
    pub catalog: Option<PathBuf>,
    /// Output folder.
    pub output: Option<PathBuf>,
}

/// Reads a parameter file.
///
/// # Errors
///
/// - [`IoError::FileNotFound`] if `path` does not exist.
/// - [`IoError::Params`] for malformed TOML, a line without `=`, or a
///   recognised key whose value cannot be parsed.
pub fn read_params(path: &Path) -> Result<ForecastArgs, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let args = if is_toml {
        toml::from_str(&text).map_err(|e| IoError::Params {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?
    } else {
        parse_key_values(&text).map_err(|reason| IoError::Params {
            path: path.to_path_buf(),
            reason,
        })?
    };
    info!(path = %path.display(), ?args, "read parameters");
    Ok(args)
}

/// Parses `key = value` lines. Blank lines and `#` comments are skipped;
/// unknown keys are ignored.
pub fn parse_key_values(text: &str) -> Result<ForecastArgs, String> {
    let mut args = ForecastArgs::default();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| format!("line {}: expected `key = value`, got {line:?}", i + 1))?;
        args.set(key.trim(), value.trim())
            .map_err(|reason| format!("line {}: {reason}", i + 1))?;
    }
    Ok(args)
}

impl ForecastArgs {
    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "start_date" | "forecastStartDate" => self.start_date = Some(parse_datetime(value)?),
            "end_date" | "forecastEndDate" => self.end_date = Some(parse_datetime(value)?),
            "mag_min" => self.mag_min = Some(parse_value(key, value)?),
            "mag_completeness" | "mag_compl" => self.mag_completeness = Some(parse_value(key, value)?),
            "lookback_days" => self.lookback_days = Some(parse_value(key, value)?),
            "apply_mc_to_lookback" => {
                self.apply_mc_to_lookback = Some(parse_value(key, &value.to_lowercase())?)
            }
            "distribution" => self.distribution = Some(parse_value(key, value)?),
            "n_simulations" | "n_sims" | "nsims" => self.n_simulations = Some(parse_count(key, value)?),
            "seed" => self.seed = Some(parse_count(key, value)?),
            "streams" => self.streams = Some(parse_value(key, value)?),
            "catalog" => self.catalog = Some(PathBuf::from(value)),
            "output" => self.output = Some(PathBuf::from(value)),
            _ => debug!(key, "ignoring unknown parameter"),
        }
        Ok(())
    }
}

/// Parses a parameter-file date.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, String> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| format!("invalid date {value:?} (expected YYYY/MM/DD HH:MM:SS or ISO-8601)"))
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse()
        .map_err(|e| format!("invalid {key} {value:?}: {e}"))
}

/// Non-negative integer; integral floats such as `1000.0` are accepted.
fn parse_count<T>(key: &str, value: &str) -> Result<T, String>
where
    T: FromStr + TryFrom<u64>,
{
    if let Ok(v) = value.parse::<T>() {
        return Ok(v);
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.fract() == 0.0 && *v >= 0.0 && *v < 9.0e15)
        .and_then(|v| T::try_from(v as u64).ok())
        .ok_or_else(|| format!("invalid {key} {value:?}: expected a non-negative integer"))
}

fn de_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| parse_datetime(&s).map_err(serde::de::Error::custom))
        .transpose()
}

fn de_from_str<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| s.parse().map_err(serde::de::Error::custom))
        .transpose()
}
