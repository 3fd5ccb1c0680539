//! Forecast request parameters.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, TimeDelta};
use syncat_rates::{CountModel, DEFAULT_MAG_COMPLETENESS, RateConfig};

use crate::error::ForecastError;

/// Minimum forecast magnitude used when none is configured.
pub const DEFAULT_MAG_MIN: f64 = 4.0;

/// Number of synthetic catalogs generated when none is configured.
pub const DEFAULT_N_SIMULATIONS: usize = 1000;

const MICROS_PER_DAY: f64 = 86_400_000_000.0;

/// How simulations obtain their random numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SimulationStreams {
    /// One stream consumed sequentially by every simulation.
    #[default]
    Shared,
    /// An independent stream per simulation, seeded from the global stream
    /// and the simulation index; simulations run in parallel.
    PerSimulation,
}

impl fmt::Display for SimulationStreams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Shared => "shared",
            Self::PerSimulation => "per_simulation",
        })
    }
}

impl FromStr for SimulationStreams {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shared" => Ok(Self::Shared),
            "per_simulation" | "per-simulation" => Ok(Self::PerSimulation),
            other => Err(format!(
                "unknown simulation streams {other:?} (expected \"shared\" or \"per_simulation\")"
            )),
        }
    }
}

/// Parameters of one forecast request.
///
/// Optional settings have their defaults filled in by [`new`](Self::new);
/// nothing downstream falls back to a default on its own.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, TimeDelta};
/// use syncat_forecast::{CountModel, ForecastParameters};
///
/// let start = NaiveDate::from_ymd_opt(2016, 11, 5).unwrap().and_hms_opt(3, 22, 31).unwrap();
/// let params = ForecastParameters::new(start, start + TimeDelta::days(1))
///     .with_mag_min(4.0)
///     .with_lookback_days(7.0)
///     .with_distribution(CountModel::NegativeBinomial)
///     .with_n_simulations(100)
///     .with_seed(23);
/// assert!(params.validate().is_ok());
/// assert_eq!(params.lookback(), TimeDelta::days(7));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastParameters {
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
    mag_min: f64,
    mag_completeness: f64,
    lookback: TimeDelta,
    lookback_days: f64,
    apply_mc_to_lookback: bool,
    distribution: CountModel,
    n_simulations: usize,
    seed: Option<u64>,
    streams: SimulationStreams,
}

impl ForecastParameters {
    /// Creates parameters for the window `[start_date, end_date)`.
    ///
    /// Defaults: `mag_min = 4.0`, `mag_completeness = 2.0`, lookback equal
    /// to the window length, `apply_mc_to_lookback = false`, Poisson counts,
    /// 1000 simulations, no seed, shared random stream.
    pub fn new(start_date: NaiveDateTime, end_date: NaiveDateTime) -> Self {
        let window = end_date - start_date;
        Self {
            start_date,
            end_date,
            mag_min: DEFAULT_MAG_MIN,
            mag_completeness: DEFAULT_MAG_COMPLETENESS,
            lookback: window,
            lookback_days: window.num_microseconds().unwrap_or(i64::MAX) as f64 / MICROS_PER_DAY,
            apply_mc_to_lookback: false,
            distribution: CountModel::Poisson,
            n_simulations: DEFAULT_N_SIMULATIONS,
            seed: None,
            streams: SimulationStreams::Shared,
        }
    }

    /// Sets the minimum forecast magnitude.
    pub fn with_mag_min(mut self, mag_min: f64) -> Self {
        self.mag_min = mag_min;
        self
    }

    /// Sets the magnitude of completeness.
    pub fn with_mag_completeness(mut self, mag_completeness: f64) -> Self {
        self.mag_completeness = mag_completeness;
        self
    }

    /// Sets the short-term window length in (possibly fractional) days.
    pub fn with_lookback_days(mut self, days: f64) -> Self {
        self.lookback_days = days;
        self.lookback = if days.is_finite() {
            TimeDelta::microseconds((days * MICROS_PER_DAY).round() as i64)
        } else {
            TimeDelta::zero()
        };
        self
    }

    /// Thresholds the lookback pool at Mc instead of `mag_min`.
    pub fn with_apply_mc_to_lookback(mut self, apply: bool) -> Self {
        self.apply_mc_to_lookback = apply;
        self
    }

    /// Sets the count model.
    pub fn with_distribution(mut self, distribution: CountModel) -> Self {
        self.distribution = distribution;
        self
    }

    /// Sets the number of synthetic catalogs.
    pub fn with_n_simulations(mut self, n: usize) -> Self {
        self.n_simulations = n;
        self
    }

    /// Sets the seed for a reproducible forecast.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Selects how simulations draw random numbers.
    pub fn with_streams(mut self, streams: SimulationStreams) -> Self {
        self.streams = streams;
        self
    }

    /// Moves the window by `offset`, keeping its length and every other
    /// setting. `None` when a shifted date leaves the calendar.
    pub fn shifted_by(&self, offset: TimeDelta) -> Option<Self> {
        Some(Self {
            start_date: self.start_date.checked_add_signed(offset)?,
            end_date: self.end_date.checked_add_signed(offset)?,
            ..self.clone()
        })
    }

    // --- Accessors ---

    /// Window start (inclusive).
    pub fn start_date(&self) -> NaiveDateTime {
        self.start_date
    }

    /// Window end (exclusive).
    pub fn end_date(&self) -> NaiveDateTime {
        self.end_date
    }

    /// Window length.
    pub fn window(&self) -> TimeDelta {
        self.end_date - self.start_date
    }

    /// Minimum forecast magnitude.
    pub fn mag_min(&self) -> f64 {
        self.mag_min
    }

    /// Magnitude of completeness.
    pub fn mag_completeness(&self) -> f64 {
        self.mag_completeness
    }

    /// Short-term window length.
    pub fn lookback(&self) -> TimeDelta {
        self.lookback
    }

    /// Short-term window length in days, as configured.
    pub fn lookback_days(&self) -> f64 {
        self.lookback_days
    }

    /// Whether the lookback pool is thresholded at Mc.
    pub fn apply_mc_to_lookback(&self) -> bool {
        self.apply_mc_to_lookback
    }

    /// Count model.
    pub fn distribution(&self) -> CountModel {
        self.distribution
    }

    /// Number of synthetic catalogs.
    pub fn n_simulations(&self) -> usize {
        self.n_simulations
    }

    /// Seed, if fixed.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Random stream layout.
    pub fn streams(&self) -> SimulationStreams {
        self.streams
    }

    /// Validates the request before anything is sampled.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ForecastError::InvalidWindow`] | `end_date <= start_date` |
    /// | [`ForecastError::WindowTooLong`] | window not representable in microseconds |
    /// | [`ForecastError::WindowTooShort`] | window shorter than one microsecond |
    /// | [`ForecastError::CompletenessAboveMinimum`] | `mag_completeness > mag_min` or either is non-finite |
    /// | [`ForecastError::InvalidLookback`] | lookback not a positive duration |
    /// | [`ForecastError::ZeroSimulations`] | `n_simulations == 0` |
    pub fn validate(&self) -> Result<(), ForecastError> {
        if self.end_date <= self.start_date {
            return Err(ForecastError::InvalidWindow {
                start: self.start_date,
                end: self.end_date,
            });
        }
        match self.window().num_microseconds() {
            None => {
                return Err(ForecastError::WindowTooLong {
                    start: self.start_date,
                    end: self.end_date,
                });
            }
            Some(0) => {
                return Err(ForecastError::WindowTooShort {
                    start: self.start_date,
                    end: self.end_date,
                });
            }
            Some(_) => {}
        }
        if !self.mag_min.is_finite()
            || !self.mag_completeness.is_finite()
            || self.mag_completeness > self.mag_min
        {
            return Err(ForecastError::CompletenessAboveMinimum {
                mag_completeness: self.mag_completeness,
                mag_min: self.mag_min,
            });
        }
        if self.lookback <= TimeDelta::zero() {
            return Err(ForecastError::InvalidLookback {
                days: self.lookback_days,
            });
        }
        if self.n_simulations == 0 {
            return Err(ForecastError::ZeroSimulations);
        }
        Ok(())
    }

    /// Rate-estimation settings implied by these parameters.
    pub(crate) fn rate_config(&self) -> RateConfig {
        RateConfig::new(self.start_date, self.window(), self.mag_min)
            .with_lookback(self.lookback)
            .with_mag_completeness(self.mag_completeness)
            .with_apply_mc_to_lookback(self.apply_mc_to_lookback)
            .with_model(self.distribution)
    }
}
