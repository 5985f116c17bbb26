//! # Checkout Commands Module
//!
//! All commands exposed to the rendering layer.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (WizardView, exports)
//! ├── order.rs    ◄─── Customer, product and delivery forms
//! ├── wizard.rs   ◄─── Navigation, confirmation, submission, review views
//! ├── catalog.rs  ◄─── Price list, banking details, payment link
//! └── config.rs   ◄─── Active and reloaded configuration
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Rendering layer                                                        │
//! │  ───────────────                                                        │
//! │  view = advance(&session)?                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  fn advance(                                                            │
//! │      session: &WizardSession,   ◄── Only the state it needs            │
//! │  ) -> Result<WizardView, ApiError>                                      │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  { state, progress, canProceed, summary }                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod config;
pub mod order;
pub mod wizard;

use dsfuel_core::review::order_summary;
use dsfuel_core::{WizardProgress, WizardState};
use serde::Serialize;
use ts_rs::TS;

/// What every state-changing command returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WizardView {
    pub state: WizardState,
    pub progress: WizardProgress,
    /// Enables the "Continue" button.
    pub can_proceed: bool,
    /// One-line summary once a product is chosen.
    pub summary: Option<String>,
}

impl From<&WizardState> for WizardView {
    fn from(state: &WizardState) -> Self {
        WizardView {
            state: state.clone(),
            progress: state.progress(),
            can_proceed: state.can_proceed(),
            summary: order_summary(&state.order),
        }
    }
}

impl From<WizardState> for WizardView {
    fn from(state: WizardState) -> Self {
        WizardView {
            progress: state.progress(),
            can_proceed: state.can_proceed(),
            summary: order_summary(&state.order),
            state,
        }
    }
}
