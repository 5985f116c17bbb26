//! # dsfuel-checkout
//!
//! Session layer of the DS Fueling checkout.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        DS Fueling Checkout                              │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │            Rendering layer (or the headless driver)              │  │
//! │  │  Customer ─► Product ─► Delivery ─► Review ─► Confirm ─► Pay     │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 │ commands::*                           │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Rust Backend (this crate)                     │  │
//! │  │                                                                  │  │
//! │  │  commands/ ──► set_customer_details, advance, confirm_order ... │  │
//! │  │  state/ ─────► WizardSession, CheckoutConfig                    │  │
//! │  │  events.rs ──► NoOp / Logging / Watch emitters                  │  │
//! │  │  gateway.rs ─► OrderGateway, SimulatedGateway                   │  │
//! │  │  script.rs ──► JSON action scripts for the driver               │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │           dsfuel-core (pricing, wizard transitions)              │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod events;
pub mod gateway;
pub mod script;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use commands::WizardView;
use events::LoggingEmitter;
use script::{RejectedAction, ScriptAction, ScriptError};
use state::{CheckoutConfig, ConfigError, WizardSession};

/// Failures that stop the headless driver.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Options of a headless run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Explicit checkout.toml; the platform config dir is used otherwise.
    pub config_path: Option<PathBuf>,
    /// JSON action script; the built-in demo order runs otherwise.
    pub script_path: Option<PathBuf>,
}

/// What a headless run produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub view: WizardView,
    pub rejected: Vec<RejectedAction>,
}

impl RunReport {
    /// Pretty JSON for stdout.
    pub fn to_json(&self) -> Result<String, RunError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs a checkout without a rendering layer.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Headless Run                                      │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults, checkout.toml, DSFUEL_* environment                     │
/// │     • an explicit --config that fails to load is an error               │
/// │                                                                         │
/// │  2. Load Script ──────────────────────────────────────────────────────► │
/// │     • --script JSON, or the built-in demo order                         │
/// │                                                                         │
/// │  3. Initialize State ─────────────────────────────────────────────────► │
/// │     • WizardSession with LoggingEmitter                                 │
/// │     • SimulatedGateway from [submission]                                │
/// │                                                                         │
/// │  4. Replay Actions ───────────────────────────────────────────────────► │
/// │     • rejected actions are collected, not fatal                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(options: RunOptions) -> Result<RunReport, RunError> {
    info!("Starting DS Fueling checkout");

    let config = match options.config_path {
        Some(path) => CheckoutConfig::load(Some(path))?,
        None => CheckoutConfig::load_or_default(None),
    };
    info!(
        business = %config.business.name,
        delay_ms = config.submission.delay_ms,
        outcome = %config.submission.outcome,
        "Configuration loaded"
    );

    let actions: Vec<ScriptAction> = match &options.script_path {
        Some(path) => {
            info!(?path, "Loading checkout script");
            script::load_script(path)?
        }
        None => {
            info!("No script given, running demo order");
            script::demo_script()
        }
    };

    let session = WizardSession::with_emitter(Arc::new(LoggingEmitter));
    let gateway = config.gateway();

    let rejected = script::run_script(&session, &gateway, &actions).await;
    if !rejected.is_empty() {
        warn!(count = rejected.len(), "Some script actions were rejected");
    }

    Ok(RunReport {
        view: commands::wizard::get_wizard(&session),
        rejected,
    })
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=dsfuel=trace` - Show trace for dsfuel crates only
/// - Default: INFO, DEBUG for dsfuel crates
///
/// Logs go to stderr so stdout carries only the JSON report.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,dsfuel=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
