//! # syncat-io
//!
//! File formats around the forecast engine: historical catalogs and
//! forecast files as CSV, and forecast parameter files as TOML or legacy
//! `key = value` text.
//!
//! ```text
//!  catalog.csv ──read_catalog──▶ Catalog
//!  args.txt ────read_params───▶ ForecastArgs
//!  Forecast ───write_forecast─▶ <folder>/syncat_<start>.csv ──read_forecast──▶ Forecast
//! ```

mod error;
mod params;
mod reader;
mod writer;

pub use error::IoError;
pub use params::{ForecastArgs, parse_datetime, parse_key_values, read_params};
pub use reader::{TIMESTAMP_FORMAT, read_catalog, read_forecast};
pub use writer::{FORECAST_HEADER, ForecastNaming, forecast_path, write_forecast};
