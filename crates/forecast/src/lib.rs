//! # syncat-forecast
//!
//! Generates a forecast: `n_simulations` synthetic earthquake catalogs for
//! a future window, built by resampling locations from a historical
//! catalog.
//!
//! # Pipeline
//!
//! ```text
//!  ┌─────────────┐   ┌────────────────┐   ┌────────────────┐   ┌───────────┐
//!  │ CatalogView │──▶│ estimate_rates │──▶│ CatalogSampler │──▶│ Forecast  │
//!  │ (pools)     │   │ (bg + recent)  │   │ (× n_sims)     │   │           │
//!  └─────────────┘   └────────────────┘   └────────────────┘   └───────────┘
//! ```
//!
//! Each simulation draws a background and a short-term event count,
//! resamples that many source events uniformly with replacement, keeps
//! only their locations, and gives every event a Gutenberg-Richter
//! magnitude and a uniform origin time inside the window.
//!
//! # Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use syncat_catalog::{Catalog, SeismicEvent};
//! use syncat_forecast::{ForecastParameters, generate};
//!
//! let at = |d| NaiveDate::from_ymd_opt(2016, 10, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let catalog: Catalog = (1..=30)
//!     .map(|d| SeismicEvent::historical(13.2, 42.9, 4.5, at(d), 10.0, i64::from(d)))
//!     .collect();
//!
//! let params = ForecastParameters::new(at(31), at(31) + chrono::TimeDelta::days(1))
//!     .with_n_simulations(10)
//!     .with_seed(23);
//! let forecast = generate(&catalog, &params).unwrap();
//! assert_eq!(forecast.n_catalogs(), 10);
//! ```

mod engine;
mod error;
mod params;
mod sampler;

pub use engine::{generate, generate_with_rng};
pub use error::{ErrorKind, ForecastError};
pub use params::{DEFAULT_MAG_MIN, DEFAULT_N_SIMULATIONS, ForecastParameters, SimulationStreams};
pub use sampler::{CatalogSampler, Component, SimulatedCatalog};
pub use syncat_catalog::Forecast;
pub use syncat_rates::CountModel;
