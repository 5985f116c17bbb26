//! # Wizard Commands
//!
//! Navigation, confirmation, submission and the read-only review screens.
//!
//! ## Navigation Rules
//! ```text
//! next_step      unguarded, clamps at the last step
//! advance        requires can_proceed, else STEP_INCOMPLETE
//! previous_step  clamps at the first step
//! go_to_step(i)  any step 0..=5, else STEP_OUT_OF_RANGE
//!
//! All four clear a displayed submission error.
//! ```

use dsfuel_core::review::{ConfirmationView, OrderReview, ViewOutcome};
use dsfuel_core::{WizardCommand, WizardStep};
use tracing::{debug, info};

use crate::commands::WizardView;
use crate::error::ApiError;
use crate::gateway::OrderGateway;
use crate::state::WizardSession;

/// Gets the current wizard view.
pub fn get_wizard(session: &WizardSession) -> WizardView {
    debug!("get_wizard command");
    session.with_state(|s| WizardView::from(s))
}

/// Moves one step forward without checking the current step.
pub fn next_step(session: &WizardSession) -> Result<WizardView, ApiError> {
    debug!("next_step command");
    Ok(session.dispatch(WizardCommand::NextStep)?.into())
}

/// Moves one step forward if the current step is complete.
pub fn advance(session: &WizardSession) -> Result<WizardView, ApiError> {
    debug!("advance command");
    Ok(session.dispatch(WizardCommand::Advance)?.into())
}

/// Moves one step back.
pub fn previous_step(session: &WizardSession) -> Result<WizardView, ApiError> {
    debug!("previous_step command");
    Ok(session.dispatch(WizardCommand::PreviousStep)?.into())
}

/// Jumps to a step by zero-based index.
pub fn go_to_step(session: &WizardSession, index: usize) -> Result<WizardView, ApiError> {
    debug!(index, "go_to_step command");
    let step = WizardStep::from_index(index)?;
    Ok(session.dispatch(WizardCommand::GoToStep(step))?.into())
}

/// Confirms the order and assigns its order number.
pub fn confirm_order(session: &WizardSession) -> Result<WizardView, ApiError> {
    debug!("confirm_order command");
    Ok(session.confirm_order()?.into())
}

/// Discards the order and returns to the first step.
pub fn reset_order(session: &WizardSession) -> Result<WizardView, ApiError> {
    info!("reset_order command");
    Ok(session.dispatch(WizardCommand::ResetOrder)?.into())
}

/// Submits the order through `gateway`.
///
/// On failure the wizard shows the retry message and the same message is
/// returned with `SUBMISSION_ERROR`.
pub async fn submit_order<G: OrderGateway>(
    session: &WizardSession,
    gateway: &G,
) -> Result<WizardView, ApiError> {
    debug!("submit_order command");
    Ok(session.submit_order(gateway).await?.into())
}

/// The review screen, or the missing-information notice.
pub fn order_review(session: &WizardSession) -> ViewOutcome<OrderReview> {
    debug!("order_review command");
    session.with_state(|s| OrderReview::from_order(&s.order))
}

/// The confirmation screen, or the missing-information notice.
pub fn order_confirmation(session: &WizardSession) -> ViewOutcome<ConfirmationView> {
    debug!("order_confirmation command");
    session.with_state(|s| ConfirmationView::from_order(&s.order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use dsfuel_core::wizard::SUBMISSION_FAILED_MESSAGE;
    use crate::commands::order::{set_customer_details, set_delivery_details, set_product_details};
    use crate::gateway::SimulatedGateway;
    use dsfuel_core::catalog::{DeliveryType, PackageFormat, ProductType};
    use dsfuel_core::order::{CustomerDetails, DeliveryDetails, ProductDetails};
    use dsfuel_core::WizardState;

    fn fill(session: &WizardSession) {
        set_customer_details(
            session,
            CustomerDetails {
                name: "Ayanda".to_string(),
                surname: "Zulu".to_string(),
                phone: "0611234567".to_string(),
                email: "ayanda@example.com".to_string(),
                address: "7 Florida Road, Durban".to_string(),
            },
        )
        .unwrap();
        set_product_details(
            session,
            ProductDetails::new(ProductType::Ethanol, PackageFormat::Barrel, 3),
        )
        .unwrap();
        set_delivery_details(session, DeliveryDetails::new(DeliveryType::Standard)).unwrap();
    }

    #[test]
    fn test_initial_view() {
        let view = get_wizard(&WizardSession::new());
        assert_eq!(view.progress.step_number, 1);
        assert_eq!(view.progress.total_steps, 6);
        assert!(!view.can_proceed);
        assert_eq!(view.summary, None);
    }

    #[test]
    fn test_advance_requires_complete_step() {
        let session = WizardSession::new();
        let err = advance(&session).unwrap_err();
        assert_eq!(err.code, ErrorCode::StepIncomplete);

        // next_step is unguarded
        let view = next_step(&session).unwrap();
        assert_eq!(view.state.current_step, WizardStep::ProductSelection);
    }

    #[test]
    fn test_walk_through_to_payment() {
        let session = WizardSession::new();
        fill(&session);

        for expected in [
            WizardStep::ProductSelection,
            WizardStep::DeliveryOptions,
            WizardStep::OrderReview,
        ] {
            assert_eq!(advance(&session).unwrap().state.current_step, expected);
        }

        assert!(order_review(&session).is_ready());
        confirm_order(&session).unwrap();
        assert_eq!(
            advance(&session).unwrap().state.current_step,
            WizardStep::Confirmation
        );
        assert_eq!(
            advance(&session).unwrap().state.current_step,
            WizardStep::PaymentInformation
        );
        assert_eq!(advance(&session).unwrap_err().code, ErrorCode::StepIncomplete);

        let confirmation = order_confirmation(&session).ready().unwrap();
        assert_eq!(confirmation.amount_due.cents(), 3 * 549_999);
    }

    #[test]
    fn test_go_to_step_bounds() {
        let session = WizardSession::new();
        assert_eq!(
            go_to_step(&session, 5).unwrap().state.current_step,
            WizardStep::PaymentInformation
        );
        assert_eq!(go_to_step(&session, 6).unwrap_err().code, ErrorCode::StepOutOfRange);
        assert_eq!(
            previous_step(&session).unwrap().state.current_step,
            WizardStep::Confirmation
        );
    }

    #[test]
    fn test_confirm_requires_complete_order() {
        let session = WizardSession::new();
        assert_eq!(confirm_order(&session).unwrap_err().code, ErrorCode::OrderIncomplete);
    }

    #[test]
    fn test_reset_returns_initial_state() {
        let session = WizardSession::new();
        fill(&session);
        next_step(&session).unwrap();

        let view = reset_order(&session).unwrap();
        assert_eq!(view.state, WizardState::new());
    }

    #[test]
    fn test_review_of_partial_order_is_notice() {
        let session = WizardSession::new();
        assert!(!order_review(&session).is_ready());
        assert!(!order_confirmation(&session).is_ready());
    }

    #[tokio::test]
    async fn test_submit_failure_is_reported() {
        let session = WizardSession::new();
        fill(&session);
        confirm_order(&session).unwrap();

        let err = submit_order(&session, &SimulatedGateway::failing())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SubmissionError);
        assert_eq!(err.message, SUBMISSION_FAILED_MESSAGE);

        let view = get_wizard(&session);
        assert_eq!(view.state.error.as_deref(), Some(SUBMISSION_FAILED_MESSAGE));
        assert!(!view.state.is_loading);

        // Navigating clears the error
        let view = previous_step(&session).unwrap();
        assert_eq!(view.state.error, None);
    }

    #[tokio::test]
    async fn test_submit_success() {
        let session = WizardSession::new();
        fill(&session);
        confirm_order(&session).unwrap();

        let view = submit_order(&session, &SimulatedGateway::instant()).await.unwrap();
        assert!(!view.state.is_loading);
        assert!(view.state.order.is_confirmed());
    }
}
