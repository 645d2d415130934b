//! Command-line host for the arbor trip engine
//!
//! Sources knobs from flags or a JSON config file, runs one simulation and
//! prints per-action rates (or the full run snapshot as JSON).

use anyhow::{Context, Result};
use arbor_trip_core::{
    orchestrator::{self, ModeConfig, RunConfig, RunSnapshot},
    FarChoice, Knobs, NearChoice, RunReport,
};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Mode run when neither `--mode` nor `--config` picks one.
const DEFAULT_MODE: &str = "gift";

#[derive(Parser)]
#[command(name = "arbor-sim")]
#[command(about = "Estimate resource yield per action for repeated arbor trips", long_about = None)]
struct Cli {
    /// Mode selector: spy, spy-linger, gift, loop or grind [default: gift]
    #[arg(short, long)]
    mode: Option<String>,

    /// Near-region strategy: explore or tend
    #[arg(long)]
    near: Option<NearChoice>,

    /// Far-region strategy: walk, witness or surrender
    #[arg(long)]
    far: Option<FarChoice>,

    /// Attar stock that starts converting
    #[arg(long)]
    attar_limit: Option<i64>,

    #[arg(long)]
    watchful: Option<f64>,

    #[arg(long)]
    persuasive: Option<f64>,

    #[arg(long)]
    dangerous: Option<f64>,

    /// Gear offset subtracted from watchful on the witness check
    #[arg(long)]
    gear_diff: Option<f64>,

    /// Bulk exchange chance, in percent
    #[arg(long)]
    rare_chance: Option<f64>,

    /// Number of trips to simulate
    #[arg(short = 'n', long)]
    trials: Option<u64>,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON run config; flags given alongside override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the run snapshot as JSON instead of rates
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                RunConfig::from_json(&json)?
            }
            None => RunConfig::new(ModeConfig::from_selector(DEFAULT_MODE)?, Knobs::default()),
        };

        // A selector replaces the file's whole mode, strategy payload included.
        if let Some(selector) = &self.mode {
            config.mode = ModeConfig::from_selector(selector)?;
        }

        config.mode = config.mode.with_strategy(self.near, self.far);
        if let Some(limit) = self.attar_limit {
            config.mode = config.mode.with_attar_limit(limit);
        }

        let knobs = &mut config.knobs;
        knobs.watchful = self.watchful.unwrap_or(knobs.watchful);
        knobs.persuasive = self.persuasive.unwrap_or(knobs.persuasive);
        knobs.dangerous = self.dangerous.unwrap_or(knobs.dangerous);
        knobs.gear_diff = self.gear_diff.unwrap_or(knobs.gear_diff);
        knobs.rare_chance = self.rare_chance.unwrap_or(knobs.rare_chance);
        knobs.num_trials = self.trials.unwrap_or(knobs.num_trials);

        if self.seed.is_some() {
            config.rng_seed = self.seed;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.run_config()?;
    let outcome = orchestrator::simulate(&config);

    if cli.json {
        let snapshot = RunSnapshot::new(&config, outcome)?;
        println!("{}", snapshot.to_json()?);
    } else {
        println!("{}", RunReport::from_outcome(&outcome).to_text());
    }
    Ok(())
}
