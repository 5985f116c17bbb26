//! # Config Commands
//!
//! Reading and reloading the checkout configuration.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::CheckoutConfig;

/// Gets the active configuration.
///
/// ## When Used
/// - Startup (business name, currency symbol)
/// - Payment step (payment URL, banking details)
pub fn get_config(config: &CheckoutConfig) -> CheckoutConfig {
    debug!("get_config command");
    config.clone()
}

/// Loads the configuration again from `path` (or the platform config dir).
///
/// Unlike startup, a broken file is reported instead of replaced by defaults.
pub fn reload_config(path: Option<PathBuf>) -> Result<CheckoutConfig, ApiError> {
    info!(?path, "reload_config command");
    Ok(CheckoutConfig::load(path)?)
}
