//! Church/State sandbox runner
//!
//! Runs one simulation from default or file-supplied parameters, prints the
//! final summary and optionally exports the history.

use std::path::PathBuf;
use std::process::ExitCode;

use church_state_sim::flush::{flush_to_jsonl, write_csv};
use church_state_sim::report::{self, Summary};
use church_state_sim::{Params, run};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sandbox")]
#[command(about = "Simulate church, state and faction dynamics month by month")]
struct Args {
    /// JSON parameter file; missing fields take the baseline values
    #[arg(long)]
    params: Option<PathBuf>,

    /// Override the number of monthly timesteps
    #[arg(long)]
    timesteps: Option<u32>,

    /// Random seed for deterministic runs
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Directory to write history.jsonl, params.json and history.csv into
    #[arg(long)]
    out: Option<PathBuf>,

    /// Number of final steps to show in the table
    #[arg(long, default_value_t = 6)]
    tail: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("church_state_sim=info,sandbox=info")),
        )
        .init();

    let args = Args::parse();

    let mut params = match &args.params {
        Some(path) => match Params::load(path) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!("failed to load {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Params::default(),
    };
    if let Some(timesteps) = args.timesteps {
        params.timesteps = timesteps;
    }

    let history = match run(params.clone(), args.seed) {
        Ok(h) => h,
        Err(e) => {
            tracing::error!("invalid parameters: {e}");
            return ExitCode::FAILURE;
        }
    };

    match Summary::from_history(&history) {
        Some(summary) => {
            println!("{}", report::format_table(report::tail(&history, args.tail)));
            println!("{summary}");
        }
        None => println!("No timesteps simulated."),
    }

    if let Some(dir) = &args.out {
        let written = flush_to_jsonl(&history, &params, dir)
            .and_then(|()| write_csv(&history, &dir.join("history.csv")));
        if let Err(e) = written {
            tracing::error!("failed to write output to {}: {e}", dir.display());
            return ExitCode::FAILURE;
        }
        tracing::info!("wrote history to {}", dir.display());
    }

    ExitCode::SUCCESS
}
