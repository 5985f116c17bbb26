//! # Order Gateway
//!
//! Where a confirmed order goes after the customer presses "Submit".
//!
//! There is no real submission endpoint yet. [`SimulatedGateway`] waits a
//! fixed delay and then succeeds or fails, so the loading and error paths of
//! the wizard can be exercised end to end.
//!
//! ```text
//! WizardSession::submit_order
//!      │  SetLoading(true)
//!      ▼
//! OrderGateway::submit(&order) ──── await ────┐
//!                                             │
//!      ┌──────────────────────────────────────┤
//!      ▼                                      ▼
//!   Ok(())                              Err(SubmissionError)
//!   SetError(None)                      SetError("Failed to submit order...")
//! ```

use std::future::Future;
use std::time::Duration;

use dsfuel_core::Order;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Why a submission failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The endpoint could not be reached.
    #[error("Order endpoint unavailable: {0}")]
    Unavailable(String),
}

/// Accepts confirmed orders.
///
/// Implementations must not hold any wizard lock; the session releases it
/// before awaiting `submit`.
pub trait OrderGateway: Send + Sync {
    fn submit(&self, order: &Order) -> impl Future<Output = Result<(), SubmissionError>> + Send;
}

// =============================================================================
// Simulated Gateway
// =============================================================================

/// What the simulated endpoint answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    #[default]
    Succeed,
    Fail,
}

impl std::fmt::Display for SubmitOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitOutcome::Succeed => write!(f, "succeed"),
            SubmitOutcome::Fail => write!(f, "fail"),
        }
    }
}

impl std::str::FromStr for SubmitOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "succeed" | "success" | "ok" => Ok(SubmitOutcome::Succeed),
            "fail" | "failure" | "error" => Ok(SubmitOutcome::Fail),
            other => Err(format!(
                "Unknown submit outcome: '{}'. Valid options: succeed, fail",
                other
            )),
        }
    }
}

/// Gateway that sleeps for `delay` and then answers with `outcome`.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    pub delay: Duration,
    pub outcome: SubmitOutcome,
}

impl SimulatedGateway {
    pub fn new(delay: Duration, outcome: SubmitOutcome) -> Self {
        SimulatedGateway { delay, outcome }
    }

    /// Succeeds without waiting.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, SubmitOutcome::Succeed)
    }

    /// Fails without waiting.
    pub fn failing() -> Self {
        Self::new(Duration::ZERO, SubmitOutcome::Fail)
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000), SubmitOutcome::Succeed)
    }
}

impl OrderGateway for SimulatedGateway {
    async fn submit(&self, order: &Order) -> Result<(), SubmissionError> {
        debug!(
            order_id = ?order.id().map(|id| id.as_str()),
            delay_ms = self.delay.as_millis() as u64,
            "Simulating order submission"
        );

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match self.outcome {
            SubmitOutcome::Succeed => Ok(()),
            SubmitOutcome::Fail => Err(SubmissionError::Unavailable(
                "simulated endpoint failure".to_string(),
            )),
        }
    }
}
