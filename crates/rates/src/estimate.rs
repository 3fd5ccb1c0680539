//! Background and short-term rate estimation.

use chrono::NaiveDateTime;
use syncat_catalog::CatalogView;
use tracing::debug;

use crate::config::{CountModel, RateConfig, seconds};
use crate::count::CountDistribution;
use crate::error::RateError;
use crate::negbinom::{bin_counts, count_moments};

/// Fitted count distributions for one forecast window.
#[derive(Debug, Clone, PartialEq)]
pub struct RateEstimate {
    model: CountModel,
    background: CountDistribution,
    recent: CountDistribution,
    history_start: NaiveDateTime,
}

impl RateEstimate {
    /// Count model the distributions belong to.
    pub fn model(&self) -> CountModel {
        self.model
    }

    /// Distribution of background events per synthetic catalog.
    pub fn background(&self) -> &CountDistribution {
        &self.background
    }

    /// Distribution of short-term (lookback-window) events per synthetic
    /// catalog.
    pub fn recent(&self) -> &CountDistribution {
        &self.recent
    }

    /// Origin time of the oldest event before the forecast start.
    pub fn history_start(&self) -> NaiveDateTime {
        self.history_start
    }
}

/// Gutenberg-Richter (`b = 1`) factor converting a count above `from` into
/// the expected count above `to`.
fn gr_scale(from: f64, to: f64) -> f64 {
    10f64.powf(from - to)
}

/// Estimates the background and short-term count distributions.
///
/// Only events of `catalog` strictly before the forecast start are used.
/// The history runs from the oldest such event to the forecast start;
/// rates are normalised to the forecast window length.
///
/// **Poisson**: background rate from events at or above Mc over the whole
/// history, short-term rate from events at or above
/// [`RateConfig::lookback_threshold`] in the lookback window; both are
/// rescaled to `mag_min` with Gutenberg-Richter `b = 1`.
///
/// **Negative-Binomial**: background mean and variance from counts above
/// `mag_min` in forecast-length windows; the short-term mean from the
/// lookback window above `mag_min`, with its variance taken from the
/// background's variance-to-mean ratio.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`RateError::InvalidConfig`] | `config.validate()` fails |
/// | [`RateError::EmptyHistory`] | no event before the forecast start |
pub fn estimate_rates(
    catalog: &CatalogView<'_>,
    config: &RateConfig,
) -> Result<RateEstimate, RateError> {
    config.validate()?;

    let t0 = config.t0();
    let past = catalog.past(t0);
    let history_start = past.earliest().ok_or(RateError::EmptyHistory)?;
    // Positive: every past event is strictly before t0.
    let history = t0 - history_start;

    let forecast_secs = seconds(config.forecast_length());
    let lookback_secs = seconds(config.lookback());
    let recent = past.within_lookback(t0, config.lookback());

    let (background, recent) = match config.model() {
        CountModel::Poisson => {
            let mc = config.mag_completeness();
            let n_compl = past.above_magnitude(mc).len();
            let mu_compl = n_compl as f64 * forecast_secs / seconds(history);
            let mu = mu_compl * gr_scale(mc, config.mag_min());

            let threshold = config.lookback_threshold();
            let n_recent = recent.above_magnitude(threshold).len();
            let lambda = n_recent as f64 / lookback_secs
                * forecast_secs
                * gr_scale(threshold, config.mag_min());

            debug!(n_compl, mu_compl, mu, n_recent, lambda, "Poisson rates");
            (
                CountDistribution::Poisson { rate: mu },
                CountDistribution::Poisson { rate: lambda },
            )
        }
        CountModel::NegativeBinomial => {
            let above_min = past.above_magnitude(config.mag_min());
            let counts = bin_counts(&above_min, t0, history, config.forecast_length());
            let bg = count_moments(&counts);

            let n_recent = recent.above_magnitude(config.mag_min()).len();
            let mean = n_recent as f64 / lookback_secs * forecast_secs;
            let variance = mean * bg.dispersion();

            debug!(
                n_bins = bg.n_bins,
                mean_bg = bg.mean,
                var_bg = bg.variance,
                n_recent,
                mean,
                variance,
                "Negative-Binomial moments"
            );
            (
                CountDistribution::negative_binomial_from_moments(bg.mean, bg.variance),
                CountDistribution::negative_binomial_from_moments(mean, variance),
            )
        }
    };

    Ok(RateEstimate {
        model: config.model(),
        background,
        recent,
        history_start,
    })
}
