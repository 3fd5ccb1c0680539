//! Binned background counts for the Negative-Binomial fit.

use chrono::{NaiveDateTime, TimeDelta};
use statrs::statistics::Statistics;
use syncat_catalog::CatalogView;

use crate::config::seconds;

/// Sample moments of per-window event counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CountMoments {
    pub(crate) mean: f64,
    /// Population variance, raised to `mean` when smaller.
    pub(crate) variance: f64,
    pub(crate) n_bins: usize,
}

impl CountMoments {
    /// `variance / mean` of the fit, or 1 when the variance is zero.
    pub(crate) fn dispersion(&self) -> f64 {
        if self.variance > 0.0 {
            self.variance / self.mean
        } else {
            1.0
        }
    }
}

/// Counts `events` in consecutive windows of `bin_length` ending at `t0`.
///
/// Bin `k` is `[t0 - (k + 1) * bin_length, t0 - k * bin_length)`, so bin 0
/// covers the same span as a lookback window of `bin_length`.
/// `n_bins` is `ceil(history / bin_length)` (at least one), so every event
/// in `[t0 - history, t0)` lands in exactly one bin; the oldest bin may be
/// partial. Bins are aligned to `t0`, not to midnight of the oldest event's
/// day, so the oldest partial bin absorbs the misalignment.
pub(crate) fn bin_counts(
    events: &CatalogView<'_>,
    t0: NaiveDateTime,
    history: TimeDelta,
    bin_length: TimeDelta,
) -> Vec<f64> {
    let bin_secs = seconds(bin_length);
    let n_bins = ((seconds(history) / bin_secs).ceil() as usize).max(1);

    let mut counts = vec![0.0; n_bins];
    for e in events.iter() {
        let age = seconds(t0 - e.origin_time);
        if age <= 0.0 {
            continue;
        }
        let idx = ((age / bin_secs).ceil() as usize)
            .saturating_sub(1)
            .min(n_bins - 1);
        counts[idx] += 1.0;
    }
    counts
}

/// Fits mean and (floored) population variance of binned counts.
pub(crate) fn count_moments(counts: &[f64]) -> CountMoments {
    let mean = counts.mean();
    let variance = counts.population_variance();
    CountMoments {
        mean,
        variance: variance.max(mean),
        n_bins: counts.len(),
    }
}
