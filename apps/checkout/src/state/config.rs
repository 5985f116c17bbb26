//! # Checkout Configuration
//!
//! Business, payment and submission settings loaded at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     DSFUEL_BUSINESS_NAME="DS Fueling Pretoria"                         │
//! │     DSFUEL_PAYMENT_URL=https://www.payfast.co.za                       │
//! │     DSFUEL_SUBMIT_DELAY_MS=250                                         │
//! │     DSFUEL_SUBMIT_OUTCOME=fail                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/dsfuel-checkout/checkout.toml (Linux)                    │
//! │     ~/Library/Application Support/za.dsfueling.checkout/checkout.toml  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # checkout.toml
//! [business]
//! name = "DS Fueling"
//! currency_symbol = "R"
//!
//! [payment]
//! url = "https://www.payfast.co.za"
//!
//! [payment.banking]
//! bankName = "DS Fueling Banking"
//! accountName = "DS Fueling (Pty) Ltd"
//! accountNumber = "1234567890"
//! branchCode = "123456"
//! reference = "Please use your order number as reference"
//!
//! [submission]
//! delay_ms = 1000
//! outcome = "succeed"  # succeed | fail
//! ```
//!
//! Configuration is read-only after startup, so no mutex is needed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use dsfuel_core::BankingDetails;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::gateway::{SimulatedGateway, SubmitOutcome};

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Who is selling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessSettings {
    #[serde(default = "default_business_name")]
    pub name: String,

    /// Prefix for displayed amounts.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_business_name() -> String {
    "DS Fueling".to_string()
}

fn default_currency_symbol() -> String {
    "R".to_string()
}

impl Default for BusinessSettings {
    fn default() -> Self {
        BusinessSettings {
            name: default_business_name(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// How the customer pays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSettings {
    /// Online payment link shown on the payment step.
    #[serde(default = "default_payment_url")]
    pub url: String,

    /// Account for manual EFT.
    #[serde(default)]
    pub banking: BankingDetails,
}

fn default_payment_url() -> String {
    "https://www.payfast.co.za".to_string()
}

impl Default for PaymentSettings {
    fn default() -> Self {
        PaymentSettings {
            url: default_payment_url(),
            banking: BankingDetails::default(),
        }
    }
}

/// Behaviour of the simulated order endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionSettings {
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    #[serde(default)]
    pub outcome: SubmitOutcome,
}

fn default_delay_ms() -> u64 {
    1000
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        SubmissionSettings {
            delay_ms: default_delay_ms(),
            outcome: SubmitOutcome::default(),
        }
    }
}

// =============================================================================
// Checkout Configuration
// =============================================================================

/// Complete checkout configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default)]
    pub business: BusinessSettings,

    #[serde(default)]
    pub payment: PaymentSettings,

    #[serde(default)]
    pub submission: SubmissionSettings,
}

impl CheckoutConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (checkout.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading checkout config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load checkout config: {}. Using defaults.", e);
            Self::default()
        })
    }

    fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = &self.payment.url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(format!(
                "Payment URL must start with http:// or https://, got: {}",
                url
            )));
        }

        let account = &self.payment.banking.account_number;
        if account.is_empty() || !account.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidConfig(format!(
                "account_number must contain only digits, got: '{}'",
                account
            )));
        }

        if self.business.name.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "business name must not be empty".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `DSFUEL_*` overrides read through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("DSFUEL_BUSINESS_NAME") {
            debug!(name = %name, "Overriding business name from environment");
            self.business.name = name;
        }

        if let Some(url) = lookup("DSFUEL_PAYMENT_URL") {
            debug!(url = %url, "Overriding payment URL from environment");
            self.payment.url = url;
        }

        if let Some(delay) = lookup("DSFUEL_SUBMIT_DELAY_MS") {
            match delay.parse::<u64>() {
                Ok(ms) => self.submission.delay_ms = ms,
                Err(_) => warn!(value = %delay, "Ignoring non-numeric DSFUEL_SUBMIT_DELAY_MS"),
            }
        }

        if let Some(outcome) = lookup("DSFUEL_SUBMIT_OUTCOME") {
            match outcome.parse() {
                Ok(parsed) => self.submission.outcome = parsed,
                Err(e) => warn!("{}", e),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("za", "dsfueling", "checkout")
            .map(|dirs| dirs.config_dir().join("checkout.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The gateway described by `[submission]`.
    pub fn gateway(&self) -> SimulatedGateway {
        SimulatedGateway::new(
            Duration::from_millis(self.submission.delay_ms),
            self.submission.outcome,
        )
    }

    /// Formats a cent amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use dsfuel_checkout_lib::state::CheckoutConfig;
    ///
    /// let config = CheckoutConfig::default();
    /// assert_eq!(config.format_currency(219_996), "R2199.96");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        format!(
            "{}{}{}.{:02}",
            if cents < 0 { "-" } else { "" },
            self.business.currency_symbol,
            (cents / 100).abs(),
            (cents % 100).abs()
        )
    }
}
