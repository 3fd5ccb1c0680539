//! # syncat-magnitude
//!
//! Magnitude sampling under a truncated, discretised Gutenberg-Richter law
//! with slope `b = 1`.
//!
//! The range `[mag_min, ceiling)` is cut into bins of fixed width. Each bin
//! gets mass `10^-lower - 10^-upper` (the continuous GR density integrated
//! over the bin), normalised to one. A draw picks a bin and reports its
//! lower edge.
//!
//! # Quick start
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use syncat_magnitude::MagnitudeTable;
//!
//! let table = MagnitudeTable::new(4.0).unwrap();
//! let mut rng = StdRng::seed_from_u64(23);
//! let m = table.sample(&mut rng);
//! assert!(m >= 4.0 && m < 8.1);
//! ```

mod error;
mod table;

pub use error::MagnitudeError;
pub use table::{BIN_WIDTH, MAG_CEILING, MagnitudeTable};
