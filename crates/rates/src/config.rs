//! Configuration for rate estimation.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, TimeDelta};

use crate::error::RateError;

/// Magnitude of completeness used when none is configured.
///
/// Deliberately conservative: a too-optimistic Mc biases the Poisson rate
/// and the GR rescaling, and resamples locations of poorly constrained
/// small events.
pub const DEFAULT_MAG_COMPLETENESS: f64 = 2.0;

/// Count-generating distribution for events per synthetic catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CountModel {
    /// Poisson counts; rates are rescaled from the completeness threshold
    /// with Gutenberg-Richter `b = 1`.
    #[default]
    Poisson,
    /// Negative-Binomial counts fitted on binned history above `mag_min`.
    NegativeBinomial,
}

impl CountModel {
    /// Canonical configuration name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Poisson => "poisson",
            Self::NegativeBinomial => "negative_binomial",
        }
    }
}

impl fmt::Display for CountModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CountModel {
    type Err = RateError;

    /// Parses `poisson` or `negative_binomial` (also `negbinom`,
    /// `negative-binomial`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "poisson" => Ok(Self::Poisson),
            "negative_binomial" | "negative-binomial" | "negbinom" => Ok(Self::NegativeBinomial),
            _ => Err(RateError::UnsupportedModel {
                name: s.to_string(),
            }),
        }
    }
}

/// Configuration for [`estimate_rates`](crate::estimate_rates).
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, TimeDelta};
/// use syncat_rates::{CountModel, RateConfig};
///
/// let t0 = NaiveDate::from_ymd_opt(2016, 11, 5).unwrap().and_hms_opt(3, 22, 31).unwrap();
/// let config = RateConfig::new(t0, TimeDelta::days(1), 4.0)
///     .with_lookback(TimeDelta::days(7))
///     .with_apply_mc_to_lookback(true)
///     .with_model(CountModel::NegativeBinomial);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.lookback_threshold(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct RateConfig {
    t0: NaiveDateTime,
    forecast_length: TimeDelta,
    lookback: TimeDelta,
    mag_min: f64,
    mag_completeness: f64,
    apply_mc_to_lookback: bool,
    model: CountModel,
}

impl RateConfig {
    /// Creates a configuration for a forecast starting at `t0` and lasting
    /// `forecast_length`.
    ///
    /// Defaults: `lookback = forecast_length`,
    /// `mag_completeness = DEFAULT_MAG_COMPLETENESS`,
    /// `apply_mc_to_lookback = false`, `model = Poisson`.
    pub fn new(t0: NaiveDateTime, forecast_length: TimeDelta, mag_min: f64) -> Self {
        Self {
            t0,
            forecast_length,
            lookback: forecast_length,
            mag_min,
            mag_completeness: DEFAULT_MAG_COMPLETENESS,
            apply_mc_to_lookback: false,
            model: CountModel::Poisson,
        }
    }

    /// Sets the length of the short-term window preceding `t0`.
    pub fn with_lookback(mut self, lookback: TimeDelta) -> Self {
        self.lookback = lookback;
        self
    }

    /// Sets the magnitude of completeness.
    pub fn with_mag_completeness(mut self, mag_completeness: f64) -> Self {
        self.mag_completeness = mag_completeness;
        self
    }

    /// Selects whether the lookback window is thresholded at Mc instead of
    /// `mag_min`.
    pub fn with_apply_mc_to_lookback(mut self, apply: bool) -> Self {
        self.apply_mc_to_lookback = apply;
        self
    }

    /// Sets the count model.
    pub fn with_model(mut self, model: CountModel) -> Self {
        self.model = model;
        self
    }

    // --- Accessors ---

    /// Forecast start.
    pub fn t0(&self) -> NaiveDateTime {
        self.t0
    }

    /// Forecast window length.
    pub fn forecast_length(&self) -> TimeDelta {
        self.forecast_length
    }

    /// Short-term window length.
    pub fn lookback(&self) -> TimeDelta {
        self.lookback
    }

    /// Minimum forecast magnitude.
    pub fn mag_min(&self) -> f64 {
        self.mag_min
    }

    /// Magnitude of completeness.
    pub fn mag_completeness(&self) -> f64 {
        self.mag_completeness
    }

    /// Whether the lookback window is thresholded at Mc.
    pub fn apply_mc_to_lookback(&self) -> bool {
        self.apply_mc_to_lookback
    }

    /// Count model.
    pub fn model(&self) -> CountModel {
        self.model
    }

    /// Magnitude threshold for the lookback-window event pool.
    pub fn lookback_threshold(&self) -> f64 {
        if self.apply_mc_to_lookback {
            self.mag_completeness
        } else {
            self.mag_min
        }
    }

    /// Validates this configuration.
    ///
    /// Checks that both windows are positive, magnitudes are finite, and
    /// `mag_completeness <= mag_min`.
    pub fn validate(&self) -> Result<(), RateError> {
        if self.forecast_length <= TimeDelta::zero() {
            return Err(RateError::InvalidConfig {
                reason: format!(
                    "forecast length must be positive, got {}",
                    self.forecast_length
                ),
            });
        }
        if self.lookback <= TimeDelta::zero() {
            return Err(RateError::InvalidConfig {
                reason: format!("lookback must be positive, got {}", self.lookback),
            });
        }
        if !self.mag_min.is_finite() || !self.mag_completeness.is_finite() {
            return Err(RateError::InvalidConfig {
                reason: format!(
                    "magnitudes must be finite, got mag_min={} mag_completeness={}",
                    self.mag_min, self.mag_completeness
                ),
            });
        }
        if self.mag_completeness > self.mag_min {
            return Err(RateError::InvalidConfig {
                reason: format!(
                    "mag_completeness ({}) must not exceed mag_min ({})",
                    self.mag_completeness, self.mag_min
                ),
            });
        }
        Ok(())
    }
}

/// Length of `d` in seconds, including the sub-second part.
pub(crate) fn seconds(d: TimeDelta) -> f64 {
    d.num_seconds() as f64 + f64::from(d.subsec_nanos()) * 1e-9
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2016, 11, 5)
            .unwrap()
            .and_hms_opt(3, 22, 31)
            .unwrap()
    }

    #[test]
    fn defaults() {
        let cfg = RateConfig::new(t0(), TimeDelta::days(1), 4.0);
        assert_eq!(cfg.lookback(), TimeDelta::days(1));
        assert_eq!(cfg.mag_completeness(), DEFAULT_MAG_COMPLETENESS);
        assert!(!cfg.apply_mc_to_lookback());
        assert_eq!(cfg.model(), CountModel::Poisson);
        assert_eq!(cfg.lookback_threshold(), 4.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn lookback_threshold_follows_flag() {
        let cfg = RateConfig::new(t0(), TimeDelta::days(1), 4.0)
            .with_mag_completeness(2.5)
            .with_apply_mc_to_lookback(true);
        assert_eq!(cfg.lookback_threshold(), 2.5);
    }

    #[test]
    fn validate_rejects_bad_windows() {
        assert!(
            RateConfig::new(t0(), TimeDelta::zero(), 4.0)
                .validate()
                .is_err()
        );
        assert!(
            RateConfig::new(t0(), TimeDelta::days(1), 4.0)
                .with_lookback(TimeDelta::days(-2))
                .validate()
                .is_err()
        );
    }

    #[test]
    fn validate_rejects_bad_magnitudes() {
        assert!(
            RateConfig::new(t0(), TimeDelta::days(1), 4.0)
                .with_mag_completeness(4.5)
                .validate()
                .is_err()
        );
        assert!(
            RateConfig::new(t0(), TimeDelta::days(1), f64::NAN)
                .validate()
                .is_err()
        );
        // Equality is allowed.
        assert!(
            RateConfig::new(t0(), TimeDelta::days(1), 4.0)
                .with_mag_completeness(4.0)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn parse_model_names() {
        assert_eq!("poisson".parse::<CountModel>().unwrap(), CountModel::Poisson);
        assert_eq!(
            "Negative_Binomial".parse::<CountModel>().unwrap(),
            CountModel::NegativeBinomial
        );
        assert_eq!(
            "negbinom".parse::<CountModel>().unwrap(),
            CountModel::NegativeBinomial
        );
        assert!(matches!(
            "etas".parse::<CountModel>(),
            Err(RateError::UnsupportedModel { name }) if name == "etas"
        ));
    }

    #[test]
    fn model_display_round_trips() {
        for m in [CountModel::Poisson, CountModel::NegativeBinomial] {
            assert_eq!(m.to_string().parse::<CountModel>().unwrap(), m);
        }
    }

    #[test]
    fn seconds_includes_fraction() {
        let d = TimeDelta::seconds(3) + TimeDelta::microseconds(500_000);
        assert!((seconds(d) - 3.5).abs() < 1e-12);
    }
}
