//! bagroute - plan delivery routes from a CSV of orders.

use std::path::PathBuf;

use clap::Parser;

use bagroute::config::Config;
use bagroute::{geocode, pipeline};

#[derive(Parser)]
#[command(name = "bagroute", version, about = "Generate delivery routes from a CSV of orders")]
struct Cli {
    /// CSV file containing the delivery orders
    input: PathBuf,

    /// Configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for caches and rendered artifacts (overrides config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> bagroute::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env(),
    };
    if let Some(dir) = cli.output_dir {
        config.set_output_dir(dir);
    }

    let geocoder = geocode::provider_from_config(&config)?;
    let summary = pipeline::run(&config, &cli.input, geocoder.as_ref())?;

    println!(
        "{} bags delivered to {} addresses across {} routes ({} need manual splitting).",
        summary.bags, summary.stops, summary.routes, summary.overflow_routes
    );
    if !summary.unresolved.is_empty() {
        println!(
            "WARNING: {} addresses could not be geocoded and are NOT on any route: {}",
            summary.unresolved.len(),
            summary.unresolved.join(", ")
        );
    }
    let excluded = summary.issues.iter().filter(|i| i.excluded()).count();
    if excluded > 0 {
        println!("WARNING: {excluded} input rows failed validation; see the log for details.");
    }

    Ok(())
}
