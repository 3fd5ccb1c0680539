//! Pure conversion functions: parameter-file values -> engine parameters.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::TimeDelta;
use rand::Rng;

use syncat_forecast::ForecastParameters;
use syncat_io::ForecastArgs;

use crate::cli::GenerateArgs;

/// Applies command-line overrides on top of parameter-file values.
pub fn apply_overrides(mut args: ForecastArgs, cli: &GenerateArgs) -> ForecastArgs {
    if let Some(seed) = cli.seed {
        args.seed = Some(seed);
    }
    if let Some(n) = cli.n_sims {
        args.n_simulations = Some(n);
    }
    if let Some(ref catalog) = cli.catalog {
        args.catalog = Some(catalog.clone());
    }
    if let Some(ref output) = cli.output {
        args.output = Some(output.clone());
    }
    args
}

/// Builds [`ForecastParameters`] from parameter-file values.
///
/// The forecast window is required; every other field falls back to the
/// engine defaults.
pub fn build_parameters(args: &ForecastArgs) -> Result<ForecastParameters> {
    let start = args
        .start_date
        .context("no forecast start: set start_date in the parameter file")?;
    let end = args
        .end_date
        .context("no forecast end: set end_date in the parameter file")?;

    let mut params = ForecastParameters::new(start, end);
    if let Some(v) = args.mag_min {
        params = params.with_mag_min(v);
    }
    if let Some(v) = args.mag_completeness {
        params = params.with_mag_completeness(v);
    }
    if let Some(v) = args.lookback_days {
        params = params.with_lookback_days(v);
    }
    if let Some(v) = args.apply_mc_to_lookback {
        params = params.with_apply_mc_to_lookback(v);
    }
    if let Some(v) = args.distribution {
        params = params.with_distribution(v);
    }
    if let Some(v) = args.n_simulations {
        params = params.with_n_simulations(v);
    }
    if let Some(v) = args.seed {
        params = params.with_seed(v);
    }
    if let Some(v) = args.streams {
        params = params.with_streams(v);
    }
    params.validate()?;
    Ok(params)
}

/// Parameters for `days` consecutive runs, each window shifted by one day
/// from the previous one.
///
/// A single run keeps its parameters as given. Otherwise every run gets its
/// own seed drawn from `master`.
pub fn consecutive_windows(
    params: &ForecastParameters,
    days: u32,
    master: &mut impl Rng,
) -> Result<Vec<ForecastParameters>> {
    anyhow::ensure!(days > 0, "at least one forecast day is required");
    if days == 1 {
        return Ok(vec![params.clone()]);
    }
    (0..days)
        .map(|day| {
            let shifted = params
                .shifted_by(TimeDelta::days(i64::from(day)))
                .with_context(|| format!("forecast day {day} is out of the calendar range"))?;
            Ok(shifted.with_seed(master.random()))
        })
        .collect()
}

/// Resolves a path from the parameter file against the file's folder.
pub fn resolve_path(params_file: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    params_file
        .parent()
        .map_or_else(|| path.to_path_buf(), |dir| dir.join(path))
}

/// Output folder: the configured one, else `forecasts` next to the
/// parameter file's folder.
pub fn output_folder(params_file: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(dir) => resolve_path(params_file, dir),
        None => resolve_path(params_file, Path::new("../forecasts")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use syncat_forecast::{CountModel, ErrorKind, ForecastError, SimulationStreams};

    fn nov(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2016, 11, d)
            .unwrap()
            .and_hms_opt(3, 22, 31)
            .unwrap()
    }

    fn window() -> ForecastArgs {
        ForecastArgs {
            start_date: Some(nov(5)),
            end_date: Some(nov(6)),
            ..ForecastArgs::default()
        }
    }

    fn no_overrides() -> GenerateArgs {
        GenerateArgs {
            params: PathBuf::from("input/args.txt"),
            catalog: None,
            output: None,
            seed: None,
            n_sims: None,
            name_with_end_date: false,
            days: 1,
        }
    }

    #[test]
    fn defaults_fill_missing_values() {
        let params = build_parameters(&window()).unwrap();
        assert_eq!(params.mag_min(), 4.0);
        assert_eq!(params.n_simulations(), 1000);
        assert_eq!(params.seed(), None);
        assert_eq!(params.distribution(), CountModel::Poisson);
    }

    #[test]
    fn file_values_are_applied() {
        let args = ForecastArgs {
            mag_min: Some(3.5),
            mag_completeness: Some(2.5),
            lookback_days: Some(7.0),
            apply_mc_to_lookback: Some(true),
            distribution: Some(CountModel::NegativeBinomial),
            n_simulations: Some(20),
            seed: Some(4),
            streams: Some(SimulationStreams::PerSimulation),
            ..window()
        };
        let params = build_parameters(&args).unwrap();
        assert_eq!(params.mag_min(), 3.5);
        assert_eq!(params.mag_completeness(), 2.5);
        assert_eq!(params.lookback_days(), 7.0);
        assert!(params.apply_mc_to_lookback());
        assert_eq!(params.distribution(), CountModel::NegativeBinomial);
        assert_eq!(params.n_simulations(), 20);
        assert_eq!(params.seed(), Some(4));
        assert_eq!(params.streams(), SimulationStreams::PerSimulation);
    }

    #[test]
    fn missing_window_is_an_error() {
        let args = ForecastArgs {
            end_date: None,
            ..window()
        };
        let err = build_parameters(&args).unwrap_err();
        assert!(err.to_string().contains("end_date"), "{err}");
    }

    #[test]
    fn invalid_parameters_keep_their_kind() {
        let args = ForecastArgs {
            mag_completeness: Some(5.0),
            ..window()
        };
        let err = build_parameters(&args).unwrap_err();
        let forecast_err = err.downcast_ref::<ForecastError>().unwrap();
        assert_eq!(forecast_err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn cli_overrides_win() {
        let file = ForecastArgs {
            seed: Some(1),
            n_simulations: Some(10),
            catalog: Some(PathBuf::from("cat.csv")),
            ..window()
        };
        let cli = GenerateArgs {
            seed: Some(99),
            catalog: Some(PathBuf::from("/data/other.csv")),
            ..no_overrides()
        };
        let args = apply_overrides(file, &cli);
        assert_eq!(args.seed, Some(99));
        assert_eq!(args.n_simulations, Some(10));
        assert_eq!(args.catalog, Some(PathBuf::from("/data/other.csv")));
    }

    #[test]
    fn single_day_keeps_parameters() {
        let params = build_parameters(&ForecastArgs {
            seed: Some(23),
            ..window()
        })
        .unwrap();
        let runs = consecutive_windows(&params, 1, &mut StdRng::seed_from_u64(23)).unwrap();
        assert_eq!(runs, vec![params]);
    }

    #[test]
    fn consecutive_days_shift_windows_and_reseed() {
        let params = build_parameters(&window()).unwrap();
        let runs = consecutive_windows(&params, 3, &mut StdRng::seed_from_u64(23)).unwrap();
        assert_eq!(runs.len(), 3);
        for (day, run) in runs.iter().enumerate() {
            let offset = TimeDelta::days(day as i64);
            assert_eq!(run.start_date(), nov(5) + offset);
            assert_eq!(run.end_date(), nov(6) + offset);
            assert!(run.seed().is_some());
        }
        assert_ne!(runs[0].seed(), runs[1].seed());
        assert_ne!(runs[1].seed(), runs[2].seed());

        let again = consecutive_windows(&params, 3, &mut StdRng::seed_from_u64(23)).unwrap();
        assert_eq!(runs, again);
    }

    #[test]
    fn zero_days_is_an_error() {
        let params = build_parameters(&window()).unwrap();
        assert!(consecutive_windows(&params, 0, &mut StdRng::seed_from_u64(1)).is_err());
    }

    #[test]
    fn paths_resolve_next_to_parameter_file() {
        let params_file = Path::new("run/input/args.txt");
        assert_eq!(
            resolve_path(params_file, Path::new("catalog.csv")),
            PathBuf::from("run/input/catalog.csv")
        );
        assert_eq!(
            resolve_path(params_file, Path::new("/abs/catalog.csv")),
            PathBuf::from("/abs/catalog.csv")
        );
        assert_eq!(
            output_folder(params_file, None),
            PathBuf::from("run/input/../forecasts")
        );
    }
}
