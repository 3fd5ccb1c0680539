//! Error types for the syncat-forecast crate.

use chrono::NaiveDateTime;
use syncat_catalog::CatalogError;
use syncat_magnitude::MagnitudeError;
use syncat_rates::RateError;

use crate::sampler::Component;

/// Broad category of a [`ForecastError`], for callers that report the
/// failing precondition without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself is invalid; nothing was sampled.
    Configuration,
    /// The historical catalog cannot support the requested forecast.
    InsufficientData,
    /// Internal invariant violation.
    Internal,
}

/// Error type for all fallible operations in the syncat-forecast crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ForecastError {
    /// Returned when the forecast window is empty or reversed.
    #[error("forecast end {end} must be after start {start}")]
    InvalidWindow {
        /// Window start.
        start: NaiveDateTime,
        /// Window end.
        end: NaiveDateTime,
    },

    /// Returned when the forecast window is too long to express in
    /// microseconds.
    #[error("forecast window from {start} to {end} is too long")]
    WindowTooLong {
        /// Window start.
        start: NaiveDateTime,
        /// Window end.
        end: NaiveDateTime,
    },

    /// Returned when the forecast window is shorter than one microsecond,
    /// the resolution of sampled origin times.
    #[error("forecast window from {start} to {end} is shorter than one microsecond")]
    WindowTooShort {
        /// Window start.
        start: NaiveDateTime,
        /// Window end.
        end: NaiveDateTime,
    },

    /// Returned when Mc is above the forecast magnitude threshold.
    #[error("mag_completeness ({mag_completeness}) must not exceed mag_min ({mag_min})")]
    CompletenessAboveMinimum {
        /// Magnitude of completeness.
        mag_completeness: f64,
        /// Forecast magnitude threshold.
        mag_min: f64,
    },

    /// Returned when the lookback window is not a positive duration.
    #[error("lookback must be a positive number of days, got {days}")]
    InvalidLookback {
        /// Configured lookback in days.
        days: f64,
    },

    /// Returned when zero simulations are requested.
    #[error("n_simulations must be at least 1")]
    ZeroSimulations,

    /// Returned when a component drew events but has nothing to resample.
    #[error("simulation {simulation}: drew {drawn} {component} event(s) from an empty pool")]
    EmptyPool {
        /// Component whose pool is empty.
        component: Component,
        /// Number of events drawn.
        drawn: u64,
        /// Simulation index.
        simulation: usize,
    },

    /// Magnitude table error.
    #[error(transparent)]
    Magnitude(#[from] MagnitudeError),

    /// Rate estimation error.
    #[error(transparent)]
    Rates(#[from] RateError),

    /// Catalog model error.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ForecastError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidWindow { .. }
            | Self::WindowTooLong { .. }
            | Self::WindowTooShort { .. }
            | Self::CompletenessAboveMinimum { .. }
            | Self::InvalidLookback { .. }
            | Self::ZeroSimulations
            | Self::Magnitude(_) => ErrorKind::Configuration,
            Self::Rates(RateError::InvalidConfig { .. } | RateError::UnsupportedModel { .. }) => {
                ErrorKind::Configuration
            }
            Self::Rates(RateError::EmptyHistory)
            | Self::EmptyPool { .. } => ErrorKind::InsufficientData,
            Self::Rates(RateError::InvalidDistribution { .. }) | Self::Catalog(_) => {
                ErrorKind::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2016, 11, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn error_invalid_window() {
        let e = ForecastError::InvalidWindow {
            start: at(6),
            end: at(5),
        };
        assert_eq!(
            e.to_string(),
            "forecast end 2016-11-05 00:00:00 must be after start 2016-11-06 00:00:00"
        );
        assert_eq!(e.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn error_window_too_short() {
        let e = ForecastError::WindowTooShort {
            start: at(5),
            end: at(5) + chrono::TimeDelta::nanoseconds(500),
        };
        assert_eq!(
            e.to_string(),
            "forecast window from 2016-11-05 00:00:00 to 2016-11-05 00:00:00.000000500 \
             is shorter than one microsecond"
        );
        assert_eq!(e.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn error_completeness_above_minimum() {
        let e = ForecastError::CompletenessAboveMinimum {
            mag_completeness: 4.5,
            mag_min: 4.0,
        };
        assert_eq!(
            e.to_string(),
            "mag_completeness (4.5) must not exceed mag_min (4)"
        );
        assert_eq!(e.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn error_invalid_lookback() {
        let e = ForecastError::InvalidLookback { days: -1.0 };
        assert_eq!(
            e.to_string(),
            "lookback must be a positive number of days, got -1"
        );
    }

    #[test]
    fn error_empty_pool() {
        let e = ForecastError::EmptyPool {
            component: Component::Recent,
            drawn: 2,
            simulation: 7,
        };
        assert_eq!(
            e.to_string(),
            "simulation 7: drew 2 recent event(s) from an empty pool"
        );
        assert_eq!(e.kind(), ErrorKind::InsufficientData);
    }

    #[test]
    fn rate_errors_keep_their_kind() {
        assert_eq!(
            ForecastError::from(RateError::EmptyHistory).kind(),
            ErrorKind::InsufficientData
        );
        assert_eq!(
            ForecastError::from(RateError::UnsupportedModel {
                name: "x".to_string()
            })
            .kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            ForecastError::from(RateError::EmptyHistory).to_string(),
            "no historical events before the forecast start"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<ForecastError>();
    }
}
