//! Forecast generation: rates, pools and the simulation loop.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use syncat_catalog::{Catalog, Forecast, SeismicEvent};
use syncat_magnitude::MagnitudeTable;
use syncat_rates::estimate_rates;
use tracing::{debug, info};

use crate::error::ForecastError;
use crate::params::{ForecastParameters, SimulationStreams};
use crate::sampler::{CatalogSampler, SimulatedCatalog};

/// Generates a forecast from `catalog`.
///
/// The random stream is seeded from [`ForecastParameters::seed`] when set,
/// otherwise from the operating system.
///
/// # Errors
///
/// See [`generate_with_rng`].
#[tracing::instrument(skip_all, fields(n_simulations = params.n_simulations(), seed = ?params.seed()))]
pub fn generate(catalog: &Catalog, params: &ForecastParameters) -> Result<Forecast, ForecastError> {
    let mut rng = match params.seed() {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    generate_with_rng(catalog, params, &mut rng)
}

/// Generates a forecast from `catalog`, drawing from `rng`.
///
/// 1. Validate `params` and build the magnitude table.
/// 2. Estimate the background and short-term count distributions from the
///    events before the forecast start.
/// 3. Build the two source pools: past events at or above Mc, and
///    lookback-window events at or above the lookback threshold.
/// 4. Draw `n_simulations` synthetic catalogs and concatenate them in
///    simulation order.
///
/// With [`SimulationStreams::Shared`] every draw comes from `rng` in
/// sequence. With [`SimulationStreams::PerSimulation`] a single base value
/// is drawn from `rng` and each simulation gets its own stream derived from
/// it, so simulations run in parallel and the result does not depend on
/// the number of threads.
///
/// # Errors
///
/// - Configuration errors from [`ForecastParameters::validate`] or the
///   magnitude table.
/// - [`ForecastError::Rates`] when the history is empty or has no length.
/// - [`ForecastError::EmptyPool`] when events are drawn for a component
///   without source events.
pub fn generate_with_rng(
    catalog: &Catalog,
    params: &ForecastParameters,
    rng: &mut impl Rng,
) -> Result<Forecast, ForecastError> {
    params.validate()?;
    let magnitudes = MagnitudeTable::new(params.mag_min())?;
    let config = params.rate_config();

    info!(
        start = %params.start_date(),
        end = %params.end_date(),
        mag_min = params.mag_min(),
        mag_completeness = params.mag_completeness(),
        lookback_days = params.lookback_days(),
        apply_mc_to_lookback = params.apply_mc_to_lookback(),
        distribution = %params.distribution(),
        n_simulations = params.n_simulations(),
        streams = %params.streams(),
        n_catalog = catalog.len(),
        "forecast parameters"
    );

    let view = catalog.view();
    let estimate = estimate_rates(&view, &config)?;

    let past = view.past(params.start_date());
    let background_pool = past.above_magnitude(params.mag_completeness());
    let recent_pool = past
        .within_lookback(params.start_date(), params.lookback())
        .above_magnitude(config.lookback_threshold());

    info!(
        history_start = %estimate.history_start(),
        background_mean = estimate.background().mean(),
        background_variance = estimate.background().variance(),
        recent_mean = estimate.recent().mean(),
        recent_variance = estimate.recent().variance(),
        "estimated event-count distributions"
    );
    debug!(
        background_pool = background_pool.len(),
        recent_pool = recent_pool.len(),
        magnitude_bins = magnitudes.len(),
        "source pools"
    );

    let sampler = CatalogSampler::new(
        estimate.background(),
        estimate.recent(),
        background_pool,
        recent_pool,
        &magnitudes,
        params.start_date(),
        params.end_date(),
    )?;

    let n = params.n_simulations();
    let events: Vec<SeismicEvent> = match params.streams() {
        SimulationStreams::Shared => {
            let mut events = Vec::new();
            for k in 0..n {
                events.extend(sampler.sample_catalog(k, rng)?.events);
            }
            events
        }
        SimulationStreams::PerSimulation => {
            let base: u64 = rng.random();
            let sims: Vec<SimulatedCatalog> = (0..n)
                .into_par_iter()
                .map(|k| {
                    let mut sim_rng = StdRng::seed_from_u64(simulation_seed(base, k));
                    sampler.sample_catalog(k, &mut sim_rng)
                })
                .collect::<Result<_, ForecastError>>()?;
            sims.into_iter().flat_map(|sim| sim.events).collect()
        }
    };

    let forecast = Forecast::new(events, n)?;
    info!(
        n_events = forecast.len(),
        n_catalogs = forecast.n_catalogs(),
        "forecast generated"
    );
    Ok(forecast)
}

/// Seed of simulation `k`'s stream: a SplitMix64 finalizer over the base
/// value offset by `k`.
fn simulation_seed(base: u64, k: usize) -> u64 {
    let mut z = base.wrapping_add((k as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
