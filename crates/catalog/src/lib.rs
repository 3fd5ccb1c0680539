//! # syncat-catalog
//!
//! Data model shared by every syncat crate: individual [`SeismicEvent`]
//! records, the immutable historical [`Catalog`], borrowed
//! [`CatalogView`] slices used for rate estimation and resampling, and the
//! [`Forecast`] produced by the engine.
//!
//! ```text
//!  ┌──────────┐  view()  ┌─────────────┐  past / within_lookback / above_magnitude
//!  │ Catalog  │─────────▶│ CatalogView │──────────────────────────────────────────▶ pools
//!  └──────────┘          └─────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use chrono::{NaiveDate, TimeDelta};
//! use syncat_catalog::{Catalog, SeismicEvent};
//!
//! let t = |d| NaiveDate::from_ymd_opt(2020, 1, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let catalog = Catalog::new(vec![
//!     SeismicEvent::historical(13.2, 42.9, 4.1, t(1), 10.0, 1),
//!     SeismicEvent::historical(13.3, 42.8, 2.5, t(5), 8.0, 2),
//! ]);
//!
//! let past = catalog.view().past(t(6));
//! let recent = past.within_lookback(t(6), TimeDelta::days(2));
//! assert_eq!(past.len(), 2);
//! assert_eq!(recent.above_magnitude(2.0).len(), 1);
//! ```

mod catalog;
mod error;
mod event;
mod forecast;
mod view;

pub use catalog::Catalog;
pub use error::CatalogError;
pub use event::{HISTORICAL_CATALOG_ID, SeismicEvent};
pub use forecast::Forecast;
pub use view::CatalogView;
