//! # State Module
//!
//! Long-lived state of the checkout app.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Startup (lib.rs)                           │   │
//! │  │  CheckoutConfig::load_or_default(path)                          │   │
//! │  │  WizardSession::with_emitter(Arc::new(LoggingEmitter))          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │               ┌──────────────┴──────────────┐                           │
//! │               ▼                             ▼                           │
//! │  ┌──────────────────────────┐  ┌──────────────────────────┐            │
//! │  │     WizardSession        │  │     CheckoutConfig       │            │
//! │  │                          │  │                          │            │
//! │  │  Mutex<WizardState>      │  │  business name, symbol   │            │
//! │  │  Arc<dyn Emitter>        │  │  payment url, banking    │            │
//! │  │                          │  │  submission delay        │            │
//! │  └──────────────────────────┘  └──────────────────────────┘            │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • WizardSession: Mutex, never held across an await                    │
//! │  • CheckoutConfig: Read-only after initialization                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod wizard;

pub use config::{
    BusinessSettings, CheckoutConfig, ConfigError, ConfigResult, PaymentSettings,
    SubmissionSettings,
};
pub use wizard::WizardSession;
