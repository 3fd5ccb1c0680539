//! Summarize command: per-catalog statistics of a forecast file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use syncat_forecast::Forecast;
use syncat_io::read_forecast;

use crate::cli::SummarizeArgs;

/// Event statistics of one forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSummary {
    pub n_events: usize,
    pub n_catalogs: usize,
    pub mean_events_per_catalog: f64,
    pub max_events_per_catalog: usize,
    pub min_magnitude: Option<f64>,
    pub max_magnitude: Option<f64>,
}

impl ForecastSummary {
    pub fn from_forecast(forecast: &Forecast) -> Self {
        let counts = forecast.counts_per_catalog();
        let n_catalogs = forecast.n_catalogs();
        let mean = if n_catalogs == 0 {
            0.0
        } else {
            forecast.len() as f64 / n_catalogs as f64
        };
        let magnitudes = forecast.events().iter().map(|e| e.magnitude);

        Self {
            n_events: forecast.len(),
            n_catalogs,
            mean_events_per_catalog: mean,
            max_events_per_catalog: counts.iter().copied().max().unwrap_or(0),
            min_magnitude: magnitudes.clone().reduce(f64::min),
            max_magnitude: magnitudes.reduce(f64::max),
        }
    }
}

/// Read a forecast file and write its summary as JSON.
pub fn run(args: SummarizeArgs) -> Result<()> {
    let _cmd = info_span!("summarize").entered();

    let forecast = read_forecast(&args.forecast, args.n_sims)
        .with_context(|| format!("failed to read forecast: {}", args.forecast.display()))?;
    let summary = ForecastSummary::from_forecast(&forecast);
    let json = serde_json::to_string_pretty(&summary).context("failed to serialize summary")?;

    match args.output {
        Some(ref path) => write_summary(path, &json)?,
        None => println!("{json}"),
    }
    Ok(())
}

fn write_summary(path: &Path, json: &str) -> Result<()> {
    std::fs::write(path, json)
        .with_context(|| format!("failed to write summary: {}", path.display()))?;
    info!(path = %path.display(), "summary written");
    Ok(())
}
