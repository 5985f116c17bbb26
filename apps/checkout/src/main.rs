//! # DS Fueling Checkout Driver
//!
//! Runs a checkout without a rendering layer and prints the result.
//!
//! # Usage
//!
//! ```bash
//! # Place the built-in demo order
//! dsfuel-checkout
//!
//! # Replay a recorded session against a custom config
//! dsfuel-checkout --config ./checkout.toml --script ./order.json
//!
//! # Simulate a failing order endpoint
//! DSFUEL_SUBMIT_OUTCOME=fail dsfuel-checkout
//! ```
//!
//! The final wizard view is printed to stdout as JSON, followed by the
//! one-line order summary. Logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dsfuel_checkout_lib::{init_tracing, run, RunOptions};

#[derive(Parser)]
#[command(name = "dsfuel-checkout")]
#[command(author, version, about = "DS Fueling headless checkout")]
struct Cli {
    /// Path to checkout.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON array of checkout actions to replay
    #[arg(short, long)]
    script: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let options = RunOptions {
        config_path: cli.config,
        script_path: cli.script,
    };

    let report = match run(options).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Checkout failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    match report.to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    }

    if let Some(summary) = &report.view.summary {
        println!("{summary}");
    }

    ExitCode::SUCCESS
}
