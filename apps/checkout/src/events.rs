//! # Wizard Events
//!
//! How the session tells the outside world that the wizard changed.
//!
//! ```text
//! WizardSession::dispatch
//!      │
//!      ├── Ok  ──► emitter.emit_state(&new_state)
//!      │
//!      └── Err ──► emitter.emit_rejected("advance", &err)
//!
//! Emitters:
//!   NoOpEmitter     - tests, headless runs that only read the final view
//!   LoggingEmitter  - one tracing event per change
//!   WatchEmitter    - latest state on a tokio watch channel
//! ```

use dsfuel_core::{CoreError, WizardState};
use tokio::sync::watch;
use tracing::{info, warn};

/// Receives wizard changes.
pub trait WizardEventEmitter: Send + Sync {
    /// Emits the state after a successful command.
    fn emit_state(&self, state: &WizardState);

    /// Emits a command the transition function refused.
    fn emit_rejected(&self, command: &str, error: &CoreError);
}

/// No-op event emitter for testing.
pub struct NoOpEmitter;

impl WizardEventEmitter for NoOpEmitter {
    fn emit_state(&self, _state: &WizardState) {}
    fn emit_rejected(&self, _command: &str, _error: &CoreError) {}
}

/// Logs every change through `tracing`.
pub struct LoggingEmitter;

impl WizardEventEmitter for LoggingEmitter {
    fn emit_state(&self, state: &WizardState) {
        info!(
            step = %state.current_step,
            can_proceed = state.can_proceed(),
            loading = state.is_loading,
            error = ?state.error,
            "Wizard state changed"
        );
    }

    fn emit_rejected(&self, command: &str, error: &CoreError) {
        warn!(command, %error, "Wizard command rejected");
    }
}

/// Publishes the latest state to any number of subscribers.
pub struct WatchEmitter {
    tx: watch::Sender<WizardState>,
}

impl WatchEmitter {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(WizardState::new());
        WatchEmitter { tx }
    }

    /// A receiver that always sees the most recent state.
    pub fn subscribe(&self) -> watch::Receiver<WizardState> {
        self.tx.subscribe()
    }
}

impl Default for WatchEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardEventEmitter for WatchEmitter {
    fn emit_state(&self, state: &WizardState) {
        // send_replace stores the value even with no receivers
        self.tx.send_replace(state.clone());
    }

    fn emit_rejected(&self, _command: &str, _error: &CoreError) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsfuel_core::{WizardCommand, WizardStep};

    #[test]
    fn test_watch_emitter_keeps_latest_state() {
        let emitter = WatchEmitter::new();
        let rx = emitter.subscribe();

        let state = WizardState::new().apply(WizardCommand::NextStep).unwrap();
        emitter.emit_state(&state);

        assert_eq!(rx.borrow().current_step, WizardStep::ProductSelection);
    }

    #[test]
    fn test_late_subscriber_sees_latest_state() {
        let emitter = WatchEmitter::new();
        let state = WizardState::new().apply(WizardCommand::SetLoading(true)).unwrap();
        emitter.emit_state(&state);

        assert!(emitter.subscribe().borrow().is_loading);
    }
}
