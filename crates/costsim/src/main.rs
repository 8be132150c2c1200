use std::path::Path;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use costsim::cli::{Args, parse_trials};
use costsim::init_logging;
use costsim::items_file::{ItemsFile, ItemsSource};
use costsim::plot::write_histogram;
use costsim::report::{write_json_summary, write_report};
use costsim::util::open::open_path;
use costsim_core::RunConfig;
use costsim_core::simulation::run;

fn open_or_warn(path: &Path) {
    println!("Opening {}", path.display());
    if let Err(err) = open_path(path) {
        tracing::warn!(path = %path.display(), "failed to open file: {err}");
        eprintln!("Could not open {}: {err}", path.display());
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let trials = match parse_trials(args.trials.as_deref()) {
        Ok(trials) => trials,
        Err(err) => {
            println!("Please enter the number of simulations to be run.\n Error: {err}");
            return Ok(());
        }
    };

    init_logging(&args.output_dir, &args.log_level)?;

    let (items, source) = ItemsFile::load(args.items.as_deref())?;
    match &source {
        ItemsSource::File(path) => tracing::info!(path = %path.display(), "loaded item file"),
        ItemsSource::Reference => tracing::info!("using reference items"),
    }

    let mut config = RunConfig::new(trials);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let result = run(&config, &items.costs, &items.risks).wrap_err("simulation failed")?;
    let (seed, trials) = (result.seed, result.trials);
    tracing::info!(seed, trials, "run complete");

    let generated = jiff::Timestamp::now();
    let titled = result.into_titled();

    for stage in &titled {
        let report = write_report(&args.output_dir, stage, generated)?;
        println!("Output has been written to {}", report.display());

        let histogram = write_histogram(&args.output_dir, stage, args.bins)?;
        println!("Histogram has been written to {}", histogram.display());

        if !args.no_open {
            open_or_warn(&report);
        }
    }

    if args.json {
        let path = write_json_summary(&args.output_dir, seed, trials, &titled, generated)?;
        println!("Summary has been written to {}", path.display());
    }

    println!("Seed: {seed}");
    tracing::info!("costsim shutting down");
    Ok(())
}
