//! One synthetic catalog per call.

use std::fmt;

use chrono::{NaiveDateTime, TimeDelta};
use rand::Rng;
use syncat_catalog::{CatalogView, SeismicEvent};
use syncat_magnitude::MagnitudeTable;
use syncat_rates::{CountDistribution, CountSampler};

use crate::error::ForecastError;

/// Source of a resampled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    /// Long-term background seismicity.
    Background,
    /// Short-term activity in the lookback window.
    Recent,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Background => "background",
            Self::Recent => "recent",
        })
    }
}

/// One synthetic catalog and the counts that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedCatalog {
    /// Number of background events drawn.
    pub n_background: u64,
    /// Number of short-term events drawn.
    pub n_recent: u64,
    /// Events, background first, with `event_id` `0..n_background + n_recent`.
    pub events: Vec<SeismicEvent>,
}

/// Draws synthetic catalogs from prepared count samplers and source pools.
///
/// Holds everything that is fixed across simulations; each call to
/// [`sample_catalog`](Self::sample_catalog) only consumes the random stream.
#[derive(Debug, Clone)]
pub struct CatalogSampler<'a> {
    background: CountSampler,
    recent: CountSampler,
    background_pool: CatalogView<'a>,
    recent_pool: CatalogView<'a>,
    magnitudes: &'a MagnitudeTable,
    start: NaiveDateTime,
    window_us: i64,
}

impl<'a> CatalogSampler<'a> {
    /// Prepares a sampler for the window `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidWindow`],
    /// [`ForecastError::WindowTooLong`] or [`ForecastError::WindowTooShort`]
    /// for an unusable window, and
    /// [`ForecastError::Rates`] if either count distribution has invalid
    /// parameters.
    pub fn new(
        background: &CountDistribution,
        recent: &CountDistribution,
        background_pool: CatalogView<'a>,
        recent_pool: CatalogView<'a>,
        magnitudes: &'a MagnitudeTable,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, ForecastError> {
        if end <= start {
            return Err(ForecastError::InvalidWindow { start, end });
        }
        let window_us = (end - start)
            .num_microseconds()
            .ok_or(ForecastError::WindowTooLong { start, end })?;
        if window_us == 0 {
            return Err(ForecastError::WindowTooShort { start, end });
        }

        Ok(Self {
            background: background.sampler()?,
            recent: recent.sampler()?,
            background_pool,
            recent_pool,
            magnitudes,
            start,
            window_us,
        })
    }

    /// Draws synthetic catalog `k`.
    ///
    /// Draw order: background count, short-term count, background source
    /// indices, short-term source indices, then a magnitude and an origin
    /// time for each event in turn.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::EmptyPool`] when a positive count is drawn
    /// for a component with no source events.
    pub fn sample_catalog(
        &self,
        k: usize,
        rng: &mut impl Rng,
    ) -> Result<SimulatedCatalog, ForecastError> {
        let n_background = self.background.sample(rng);
        let n_recent = self.recent.sample(rng);

        let mut sources =
            draw_sources(&self.background_pool, n_background, Component::Background, k, rng)?;
        sources.extend(draw_sources(
            &self.recent_pool,
            n_recent,
            Component::Recent,
            k,
            rng,
        )?);

        let catalog_id = k as i64;
        let events = sources
            .into_iter()
            .enumerate()
            .map(|(i, source)| {
                let magnitude = self.magnitudes.sample(rng);
                let origin_time = self.origin_time(rng);
                source.relocated(magnitude, origin_time, catalog_id, i as i64)
            })
            .collect();

        Ok(SimulatedCatalog {
            n_background,
            n_recent,
            events,
        })
    }

    /// Uniform origin time in `[start, end)` at microsecond resolution.
    fn origin_time(&self, rng: &mut impl Rng) -> NaiveDateTime {
        let u: f64 = rng.random();
        let offset = ((u * self.window_us as f64).floor() as i64).min(self.window_us - 1);
        self.start + TimeDelta::microseconds(offset)
    }
}

/// Resamples `n` events uniformly with replacement from `pool`.
fn draw_sources<'a>(
    pool: &CatalogView<'a>,
    n: u64,
    component: Component,
    simulation: usize,
    rng: &mut impl Rng,
) -> Result<Vec<&'a SeismicEvent>, ForecastError> {
    let empty = ForecastError::EmptyPool {
        component,
        drawn: n,
        simulation,
    };
    if n == 0 {
        return Ok(Vec::new());
    }
    if pool.is_empty() {
        return Err(empty);
    }
    (0..n)
        .map(|_| pool.get(rng.random_range(0..pool.len())).ok_or_else(|| empty.clone()))
        .collect()
}
