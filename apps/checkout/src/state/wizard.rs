//! # Wizard Session
//!
//! Owns the one checkout in progress.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        WizardSession                                    │
//! │                                                                         │
//! │   state: Mutex<WizardState>          emitter: Arc<dyn Emitter>          │
//! │        │                                   ▲                            │
//! │        │ lock, apply, store, unlock        │ notify after unlock        │
//! │        ▼                                   │                            │
//! │   dsfuel_core::WizardState::apply ─────────┘                            │
//! │                                                                         │
//! │   submit_order:                                                         │
//! │     lock ─ SetLoading(true) ─ clone order ─ unlock                      │
//! │     await gateway.submit(&order)           (no lock held)               │
//! │     lock ─ SetError(None) | SetError(msg) ─ unlock                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A rejected command never changes the stored state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use dsfuel_core::wizard::SUBMISSION_FAILED_MESSAGE;
use dsfuel_core::{CoreResult, OrderId, WizardCommand, WizardState};
use tracing::{debug, error, info};

use crate::events::{NoOpEmitter, WizardEventEmitter};
use crate::gateway::{OrderGateway, SubmissionError};

/// Thread-safe holder of the wizard state.
pub struct WizardSession {
    state: Mutex<WizardState>,
    emitter: Arc<dyn WizardEventEmitter>,
}

impl WizardSession {
    /// Creates a session at the first step with an empty order.
    pub fn new() -> Self {
        Self::with_emitter(Arc::new(NoOpEmitter))
    }

    /// Creates a session that reports changes to `emitter`.
    pub fn with_emitter(emitter: Arc<dyn WizardEventEmitter>) -> Self {
        WizardSession {
            state: Mutex::new(WizardState::new()),
            emitter,
        }
    }

    // Poisoning is ignored: the stored state is only ever replaced whole.
    fn lock(&self) -> MutexGuard<'_, WizardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Executes a function with read access to the state.
    ///
    /// ## Usage
    /// ```rust
    /// use dsfuel_checkout_lib::state::WizardSession;
    /// use dsfuel_core::WizardStep;
    ///
    /// let session = WizardSession::new();
    /// let step = session.with_state(|s| s.current_step);
    /// assert_eq!(step, WizardStep::CustomerDetails);
    /// ```
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&WizardState) -> R,
    {
        let state = self.lock();
        f(&state)
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> WizardState {
        self.with_state(WizardState::clone)
    }

    /// Applies a command through the core transition function.
    ///
    /// Returns the new state on success. On error the stored state is left
    /// as it was and the emitter hears about the rejection.
    pub fn dispatch(&self, command: WizardCommand) -> CoreResult<WizardState> {
        let name = command.name();

        let result = {
            let mut state = self.lock();
            let from = state.current_step;
            state.apply(command).map(|next| {
                debug!(command = name, from = %from, to = %next.current_step, "Wizard transition");
                *state = next.clone();
                next
            })
        };

        match &result {
            Ok(next) => self.emitter.emit_state(next),
            Err(e) => {
                debug!(command = name, error = %e, "Wizard command rejected");
                self.emitter.emit_rejected(name, e);
            }
        }

        result
    }

    /// Confirms the order with a freshly generated order number.
    pub fn confirm_order(&self) -> CoreResult<WizardState> {
        let confirmed_at = Utc::now();
        let id = OrderId::generate(confirmed_at);

        let state = self.dispatch(WizardCommand::ConfirmOrder {
            id: id.clone(),
            confirmed_at,
        })?;
        info!(order_id = %id, "Order confirmed");
        Ok(state)
    }

    /// Sends the order to `gateway`.
    ///
    /// Loading is set for the duration of the call. Success clears any error
    /// left by an earlier attempt. On failure the wizard error is set to the
    /// generic retry message and the gateway's error is returned. There are no
    /// retries and no timeout.
    pub async fn submit_order<G: OrderGateway>(
        &self,
        gateway: &G,
    ) -> Result<WizardState, SubmissionError> {
        let order = self
            .dispatch(WizardCommand::SetLoading(true))
            .map(|state| state.order)
            // SetLoading is infallible, fall back to the stored order anyway
            .unwrap_or_else(|_| self.with_state(|s| s.order.clone()));

        match serde_json::to_string(&order) {
            Ok(payload) => info!(%payload, "Submitting order"),
            Err(e) => error!(error = %e, "Could not serialize order for logging"),
        }

        match gateway.submit(&order).await {
            Ok(()) => {
                info!(order_id = ?order.id().map(|id| id.as_str()), "Order submitted");
                Ok(self.finish(WizardCommand::SetError(None)))
            }
            Err(e) => {
                error!(error = %e, "Error submitting order");
                self.finish(WizardCommand::SetError(Some(
                    SUBMISSION_FAILED_MESSAGE.to_string(),
                )));
                Err(e)
            }
        }
    }

    // Dispatches a command that cannot be rejected.
    fn finish(&self, command: WizardCommand) -> WizardState {
        self.dispatch(command).unwrap_or_else(|_| self.snapshot())
    }
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::WatchEmitter;
    use crate::gateway::SimulatedGateway;
    use dsfuel_core::catalog::{DeliveryType, PackageFormat, ProductType};
    use dsfuel_core::order::{CustomerDetails, DeliveryDetails, ProductDetails};
    use dsfuel_core::{CoreError, WizardStep};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn filled_session() -> WizardSession {
        let session = WizardSession::new();
        session
            .dispatch(WizardCommand::SetCustomerDetails(CustomerDetails {
                name: "Pieter".to_string(),
                surname: "van Wyk".to_string(),
                phone: "+27721234567".to_string(),
                email: "pieter@example.co.za".to_string(),
                address: "3 Main Road, Stellenbosch".to_string(),
            }))
            .unwrap();
        session
            .dispatch(WizardCommand::SetProductDetails(ProductDetails::new(
                ProductType::Methanol,
                PackageFormat::Barrel,
                2,
            )))
            .unwrap();
        session
            .dispatch(WizardCommand::SetDeliveryDetails(DeliveryDetails::new(
                DeliveryType::SameDay,
            )))
            .unwrap();
        session
    }

    #[derive(Default)]
    struct CountingEmitter {
        states: AtomicUsize,
        rejected: AtomicUsize,
    }

    impl WizardEventEmitter for CountingEmitter {
        fn emit_state(&self, _state: &WizardState) {
            self.states.fetch_add(1, Ordering::SeqCst);
        }

        fn emit_rejected(&self, _command: &str, _error: &CoreError) {
            self.rejected.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_rejected_command_leaves_state_untouched() {
        let emitter = Arc::new(CountingEmitter::default());
        let session = WizardSession::with_emitter(emitter.clone());

        let err = session.dispatch(WizardCommand::Advance).unwrap_err();
        assert!(matches!(err, CoreError::StepIncomplete { .. }));
        assert_eq!(session.snapshot(), WizardState::new());
        assert_eq!(emitter.states.load(Ordering::SeqCst), 0);
        assert_eq!(emitter.rejected.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_emitter_sees_every_change() {
        let emitter = Arc::new(WatchEmitter::new());
        let rx = emitter.subscribe();
        let session = WizardSession::with_emitter(emitter);

        session.dispatch(WizardCommand::NextStep).unwrap();
        session.dispatch(WizardCommand::NextStep).unwrap();

        assert_eq!(rx.borrow().current_step, WizardStep::DeliveryOptions);
    }

    #[test]
    fn test_confirm_order_generates_id() {
        let session = filled_session();
        let state = session.confirm_order().unwrap();

        assert!(state.order.is_confirmed());
        let id = state.order.id().unwrap();
        assert!(OrderId::parse(id.as_str()).is_ok());
    }

    #[test]
    fn test_confirm_incomplete_order_is_rejected() {
        let session = WizardSession::new();
        assert!(matches!(
            session.confirm_order(),
            Err(CoreError::OrderIncomplete { .. })
        ));
        assert!(!session.with_state(|s| s.order.is_confirmed()));
    }

    #[tokio::test]
    async fn test_submit_success_clears_loading() {
        let session = filled_session();
        session.confirm_order().unwrap();

        let state = session.submit_order(&SimulatedGateway::instant()).await.unwrap();
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_submit_failure_sets_error() {
        let session = filled_session();
        session.confirm_order().unwrap();

        let result = session.submit_order(&SimulatedGateway::failing()).await;
        assert!(result.is_err());

        let state = session.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some(SUBMISSION_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_successful_retry_clears_error() {
        let session = filled_session();
        session.confirm_order().unwrap();

        assert!(session.submit_order(&SimulatedGateway::failing()).await.is_err());
        assert!(session.with_state(|s| s.error.is_some()));

        let state = session.submit_order(&SimulatedGateway::instant()).await.unwrap();
        assert_eq!(state.error, None);
        assert!(!state.is_loading);
        assert_eq!(session.snapshot().error, None);
    }

    #[tokio::test]
    async fn test_loading_is_visible_while_submitting() {
        struct LoadingCheck<'a>(&'a WizardSession);

        impl OrderGateway for LoadingCheck<'_> {
            async fn submit(&self, _order: &dsfuel_core::Order) -> Result<(), SubmissionError> {
                // The session lock is free here; reading it must not deadlock
                assert!(self.0.with_state(|s| s.is_loading));
                Ok(())
            }
        }

        let session = filled_session();
        session.submit_order(&LoadingCheck(&session)).await.unwrap();
        assert!(!session.with_state(|s| s.is_loading));
    }
}
