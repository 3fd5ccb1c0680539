use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, info_span};

use syncat_forecast::generate;
use syncat_io::{ForecastNaming, read_catalog, read_params, write_forecast};

use crate::cli::GenerateArgs;
use crate::convert;

/// Run the forecast pipeline: parameters, catalog, engine, forecast file.
pub fn run(args: GenerateArgs) -> Result<()> {
    let _cmd = info_span!("generate").entered();

    // 1. Parameters
    let file_args = read_params(&args.params)
        .with_context(|| format!("failed to read parameters: {}", args.params.display()))?;
    let forecast_args = convert::apply_overrides(file_args, &args);
    let params = convert::build_parameters(&forecast_args).context("invalid forecast parameters")?;

    // 2. Paths. CLI overrides are taken as given; file paths are relative
    // to the parameter file.
    let catalog_path = match (&args.catalog, &forecast_args.catalog) {
        (Some(cli), _) => cli.clone(),
        (None, Some(file)) => convert::resolve_path(&args.params, file),
        (None, None) => anyhow::bail!(
            "no catalog path: set catalog in the parameter file or use --catalog"
        ),
    };
    let folder = match &args.output {
        Some(cli) => cli.clone(),
        None => convert::output_folder(&args.params, forecast_args.output.as_deref()),
    };

    // 3. Historical catalog
    info!(path = %catalog_path.display(), "reading catalog");
    let catalog = read_catalog(&catalog_path)
        .with_context(|| format!("failed to read catalog: {}", catalog_path.display()))?;

    // 4. Windows. Consecutive days draw their seeds from a master stream.
    let mut master = match params.seed() {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    let runs = convert::consecutive_windows(&params, args.days, &mut master)?;

    // 5. Forecasts
    let naming = if args.name_with_end_date {
        ForecastNaming::StartAndEndDate
    } else {
        ForecastNaming::StartDate
    };
    for run in &runs {
        let _day = info_span!("window", start = %run.start_date()).entered();
        let forecast = generate(&catalog, run).context("forecast generation failed")?;
        let path = write_forecast(&forecast, &folder, run.start_date(), run.end_date(), naming)
            .with_context(|| format!("failed to write forecast to {}", folder.display()))?;
        info!(
            path = %path.display(),
            n_events = forecast.len(),
            seed = ?run.seed(),
            "forecast written"
        );
    }

    Ok(())
}
