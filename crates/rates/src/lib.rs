//! # syncat-rates
//!
//! Estimates how many events each synthetic catalog should contain.
//!
//! Two components are fitted from the historical catalog:
//!
//! - **background**: long-run rate over the whole history before `t0`;
//! - **recent**: short-term rate over a lookback window ending at `t0`.
//!
//! Each is expressed as a [`CountDistribution`], either Poisson or
//! Negative-Binomial (overdispersed counts).
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │ CatalogView  │────▶│ estimate_rates │────▶│  RateEstimate    │
//!  │ (history)    │     │ (Poisson / NB) │     │ (bg + recent)    │
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use chrono::{NaiveDate, TimeDelta};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use syncat_catalog::{Catalog, SeismicEvent};
//! use syncat_rates::{CountModel, RateConfig, estimate_rates};
//!
//! let t0 = NaiveDate::from_ymd_opt(2020, 1, 11).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let catalog: Catalog = (1..=10)
//!     .map(|d| {
//!         let t = NaiveDate::from_ymd_opt(2020, 1, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
//!         SeismicEvent::historical(13.0, 42.0, 4.2, t, 10.0, i64::from(d))
//!     })
//!     .collect();
//!
//! let config = RateConfig::new(t0, TimeDelta::days(1), 4.0).with_model(CountModel::Poisson);
//! let estimate = estimate_rates(&catalog.view(), &config).unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let sampler = estimate.background().sampler().unwrap();
//! let _n = sampler.sample(&mut rng);
//! ```

mod config;
mod count;
mod error;
mod estimate;
mod negbinom;

pub use config::{CountModel, DEFAULT_MAG_COMPLETENESS, RateConfig};
pub use count::{CountDistribution, CountSampler, MAX_POISSON_RATE, NB_POISSON_LIMIT_SHAPE};
pub use error::RateError;
pub use estimate::{RateEstimate, estimate_rates};
