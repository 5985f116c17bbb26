//! # Order Wizard
//!
//! The checkout as a state machine: a current step plus the partial order,
//! changed only by applying [`WizardCommand`]s.
//!
//! ## Steps
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   0 Customer ──► 1 Product ──► 2 Delivery ──► 3 Review ──► 4 Confirm   │
//! │   Details        Selection     Options        Order                     │
//! │                                                             │           │
//! │                                                             ▼           │
//! │                                                      5 Payment Info     │
//! │                                                        (terminal)       │
//! │                                                                         │
//! │   NextStep / Advance: +1 (clamped at 5)                                │
//! │   PreviousStep:       −1 (clamped at 0)                                │
//! │   GoToStep:           jump                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Transition Function
//! `WizardState::apply(&state, command) -> Result<WizardState, CoreError>` is
//! pure. A rejected command returns an error and leaves the original state as
//! it was. The confirm command carries its id and timestamp so that the
//! function stays deterministic; the session layer supplies them.
//!
//! ## Guarded vs. Unguarded Advance
//! `NextStep` moves forward unconditionally and leaves the readiness check to
//! the caller. `Advance` checks [`can_proceed`] first and returns
//! [`CoreError::StepIncomplete`] when the step is not done.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::order::{CustomerDetails, DeliveryDetails, Order, ProductDetails};
use crate::order_id::OrderId;

/// Message placed in `WizardState::error` when submission fails.
pub const SUBMISSION_FAILED_MESSAGE: &str = "Failed to submit order. Please try again.";

// =============================================================================
// Wizard Step
// =============================================================================

/// Every step of the checkout, in order.
///
/// The progress display and the forward clamp both derive from
/// [`WizardStep::ALL`], so the step count cannot drift from the steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum WizardStep {
    #[default]
    CustomerDetails,
    ProductSelection,
    DeliveryOptions,
    OrderReview,
    Confirmation,
    /// Banking details / online payment link. Nothing to fill in.
    #[serde(rename = "payment")]
    PaymentInformation,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        WizardStep::CustomerDetails,
        WizardStep::ProductSelection,
        WizardStep::DeliveryOptions,
        WizardStep::OrderReview,
        WizardStep::Confirmation,
        WizardStep::PaymentInformation,
    ];

    /// Number of steps shown in the progress indicator.
    pub const TOTAL: usize = Self::ALL.len();

    pub const FIRST: WizardStep = Self::ALL[0];
    pub const LAST: WizardStep = Self::ALL[Self::TOTAL - 1];

    /// Zero-based position.
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Looks up a step by zero-based position.
    pub fn from_index(index: usize) -> CoreResult<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(CoreError::StepOutOfRange {
                index,
                last: Self::TOTAL - 1,
            })
    }

    /// The following step, or this one if it is the last.
    pub fn next(&self) -> Self {
        Self::ALL
            .get(self.index() + 1)
            .copied()
            .unwrap_or(Self::LAST)
    }

    /// The preceding step, or this one if it is the first.
    pub fn previous(&self) -> Self {
        self.index()
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(Self::FIRST)
    }

    /// Heading shown above the step.
    pub fn name(&self) -> &'static str {
        match self {
            WizardStep::CustomerDetails => "Customer Details",
            WizardStep::ProductSelection => "Product Selection",
            WizardStep::DeliveryOptions => "Delivery Options",
            WizardStep::OrderReview => "Order Review",
            WizardStep::Confirmation => "Confirmation",
            WizardStep::PaymentInformation => "Payment Information",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Readiness
// =============================================================================

/// Whether the order satisfies `step`'s prerequisites for moving on.
///
/// | Step | Requirement |
/// |------|-------------|
/// | Customer Details | all five customer fields non-blank |
/// | Product Selection | product chosen with quantity > 0 |
/// | Delivery Options | delivery type chosen |
/// | Order Review | customer, product, delivery and pricing present |
/// | Confirmation | order confirmed |
/// | Payment Information | never (last step) |
pub fn can_proceed(step: WizardStep, order: &Order) -> bool {
    match step {
        WizardStep::CustomerDetails => order.customer().is_some_and(CustomerDetails::is_filled),
        WizardStep::ProductSelection => order.product().is_some_and(|p| p.quantity > 0),
        WizardStep::DeliveryOptions => order.delivery().is_some(),
        WizardStep::OrderReview => order.is_complete(),
        WizardStep::Confirmation => order.is_confirmed(),
        WizardStep::PaymentInformation => false,
    }
}

// =============================================================================
// Progress
// =============================================================================

/// What the progress indicator shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WizardProgress {
    pub step: WizardStep,
    /// One-based, for "Step 2 of 6".
    pub step_number: usize,
    pub step_name: String,
    pub total_steps: usize,
    pub percent_complete: u8,
}

impl WizardProgress {
    pub fn for_step(step: WizardStep) -> Self {
        let step_number = step.index() + 1;
        WizardProgress {
            step,
            step_number,
            step_name: step.name().to_string(),
            total_steps: WizardStep::TOTAL,
            percent_complete: (step_number * 100 / WizardStep::TOTAL) as u8,
        }
    }
}

// =============================================================================
// Commands
// =============================================================================

/// Everything that can change the wizard.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardCommand {
    SetCustomerDetails(CustomerDetails),
    /// Also recomputes pricing in the same transition. Rejected above the
    /// format's maximum quantity.
    SetProductDetails(ProductDetails),
    SetDeliveryDetails(DeliveryDetails),
    /// Unguarded forward move.
    NextStep,
    /// Forward move that requires [`can_proceed`].
    Advance,
    PreviousStep,
    GoToStep(WizardStep),
    ConfirmOrder {
        id: OrderId,
        confirmed_at: DateTime<Utc>,
    },
    ResetOrder,
    SetLoading(bool),
    /// Sets or clears the error; always clears loading.
    SetError(Option<String>),
}

impl WizardCommand {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            WizardCommand::SetCustomerDetails(_) => "set_customer_details",
            WizardCommand::SetProductDetails(_) => "set_product_details",
            WizardCommand::SetDeliveryDetails(_) => "set_delivery_details",
            WizardCommand::NextStep => "next_step",
            WizardCommand::Advance => "advance",
            WizardCommand::PreviousStep => "previous_step",
            WizardCommand::GoToStep(_) => "go_to_step",
            WizardCommand::ConfirmOrder { .. } => "confirm_order",
            WizardCommand::ResetOrder => "reset_order",
            WizardCommand::SetLoading(_) => "set_loading",
            WizardCommand::SetError(_) => "set_error",
        }
    }
}

// =============================================================================
// Wizard State
// =============================================================================

/// The whole checkout session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub current_step: WizardStep,
    pub order: Order,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl WizardState {
    /// The initial state: first step, empty order, idle, no error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a command and returns the resulting state.
    ///
    /// ```rust
    /// use dsfuel_core::wizard::{WizardCommand, WizardState, WizardStep};
    ///
    /// let state = WizardState::new();
    /// let moved = state.apply(WizardCommand::NextStep).unwrap();
    /// assert_eq!(moved.current_step, WizardStep::ProductSelection);
    ///
    /// // Guarded advance refuses: no customer details yet.
    /// assert!(state.apply(WizardCommand::Advance).is_err());
    /// ```
    pub fn apply(&self, command: WizardCommand) -> CoreResult<WizardState> {
        let mut next = self.clone();

        match command {
            WizardCommand::SetCustomerDetails(customer) => {
                next.order.set_customer(customer);
                next.error = None;
            }
            WizardCommand::SetProductDetails(product) => {
                let max = product.format.max_quantity();
                if product.quantity > max {
                    return Err(CoreError::QuantityTooLarge {
                        requested: product.quantity,
                        max,
                    });
                }
                next.order.set_product(product);
                next.error = None;
            }
            WizardCommand::SetDeliveryDetails(delivery) => {
                next.order.set_delivery(delivery);
                next.error = None;
            }
            WizardCommand::NextStep => {
                next.current_step = self.current_step.next();
                next.error = None;
            }
            WizardCommand::Advance => {
                if !can_proceed(self.current_step, &self.order) {
                    return Err(CoreError::StepIncomplete {
                        step: self.current_step,
                    });
                }
                next.current_step = self.current_step.next();
                next.error = None;
            }
            WizardCommand::PreviousStep => {
                next.current_step = self.current_step.previous();
                next.error = None;
            }
            WizardCommand::GoToStep(step) => {
                next.current_step = step;
                next.error = None;
            }
            WizardCommand::ConfirmOrder { id, confirmed_at } => {
                let missing = self.order.missing_sections();
                if !missing.is_empty() {
                    return Err(CoreError::OrderIncomplete { missing });
                }
                next.order.confirm(id, confirmed_at);
            }
            WizardCommand::ResetOrder => return Ok(WizardState::new()),
            WizardCommand::SetLoading(loading) => {
                next.is_loading = loading;
            }
            WizardCommand::SetError(error) => {
                next.error = error;
                next.is_loading = false;
            }
        }

        Ok(next)
    }

    /// Applies a command in place. On error the state is unchanged.
    pub fn dispatch(&mut self, command: WizardCommand) -> CoreResult<()> {
        *self = self.apply(command)?;
        Ok(())
    }

    /// Readiness of the current step.
    pub fn can_proceed(&self) -> bool {
        can_proceed(self.current_step, &self.order)
    }

    pub fn progress(&self) -> WizardProgress {
        WizardProgress::for_step(self.current_step)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DeliveryType, PackageFormat, ProductType};
    use crate::order::OrderSection;
    use chrono::TimeZone;

    fn customer() -> CustomerDetails {
        CustomerDetails {
            name: "Thandi".to_string(),
            surname: "Nkosi".to_string(),
            phone: "0821234567".to_string(),
            email: "thandi@example.co.za".to_string(),
            address: "12 Long Street, Cape Town".to_string(),
        }
    }

    fn bottles(quantity: u32) -> ProductDetails {
        ProductDetails::new(ProductType::Ethanol, PackageFormat::Bottle, quantity)
    }

    fn confirm_command(millis: u64) -> WizardCommand {
        WizardCommand::ConfirmOrder {
            id: OrderId::from_parts(millis, 42),
            confirmed_at: Utc.timestamp_millis_opt(millis as i64).unwrap(),
        }
    }

    fn filled_state() -> WizardState {
        let mut state = WizardState::new();
        state.dispatch(WizardCommand::SetCustomerDetails(customer())).unwrap();
        state.dispatch(WizardCommand::SetProductDetails(bottles(5))).unwrap();
        state
            .dispatch(WizardCommand::SetDeliveryDetails(DeliveryDetails::new(
                DeliveryType::SameDay,
            )))
            .unwrap();
        state
    }

    #[test]
    fn test_step_count_derived_from_steps() {
        assert_eq!(WizardStep::TOTAL, 6);
        assert_eq!(WizardStep::LAST, WizardStep::PaymentInformation);
        for (i, step) in WizardStep::ALL.iter().enumerate() {
            assert_eq!(step.index(), i);
            assert_eq!(WizardStep::from_index(i).unwrap(), *step);
        }
        assert!(matches!(
            WizardStep::from_index(6),
            Err(CoreError::StepOutOfRange { index: 6, last: 5 })
        ));
    }

    #[test]
    fn test_step_serde_names() {
        assert_eq!(
            serde_json::to_string(&WizardStep::DeliveryOptions).unwrap(),
            "\"delivery-options\""
        );
        assert_eq!(
            serde_json::to_string(&WizardStep::PaymentInformation).unwrap(),
            "\"payment\""
        );
    }

    #[test]
    fn test_next_then_previous_is_identity_for_interior_steps() {
        for step in &WizardStep::ALL[..WizardStep::TOTAL - 1] {
            let state = WizardState {
                current_step: *step,
                ..WizardState::new()
            };
            let back = state
                .apply(WizardCommand::NextStep)
                .and_then(|s| s.apply(WizardCommand::PreviousStep))
                .unwrap();
            assert_eq!(back.current_step, *step);
        }
    }

    #[test]
    fn test_boundaries_clamp() {
        let state = WizardState::new();
        let state = state.apply(WizardCommand::PreviousStep).unwrap();
        assert_eq!(state.current_step, WizardStep::CustomerDetails);

        let state = WizardState {
            current_step: WizardStep::LAST,
            ..WizardState::new()
        };
        let state = state.apply(WizardCommand::NextStep).unwrap();
        assert_eq!(state.current_step, WizardStep::PaymentInformation);
    }

    #[test]
    fn test_set_product_recomputes_pricing() {
        let mut state = WizardState::new();
        state.dispatch(WizardCommand::SetProductDetails(bottles(5))).unwrap();
        assert_eq!(state.order.pricing().unwrap().total_after_discount.cents(), 219_996);

        state.dispatch(WizardCommand::SetProductDetails(bottles(4))).unwrap();
        let pricing = state.order.pricing().unwrap();
        assert!(pricing.discount.is_zero());
        assert_eq!(pricing.total_after_discount.cents(), 219_996);
    }

    #[test]
    fn test_oversize_quantity_is_rejected() {
        let mut state = WizardState::new();
        state.dispatch(WizardCommand::SetProductDetails(bottles(20))).unwrap();

        let barrels = ProductDetails::new(ProductType::Methanol, PackageFormat::Barrel, 50_000_000);
        let err = state
            .dispatch(WizardCommand::SetProductDetails(barrels))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::QuantityTooLarge {
                requested: 50_000_000,
                max: 10
            }
        ));
        assert!(matches!(
            state.apply(WizardCommand::SetProductDetails(bottles(21))),
            Err(CoreError::QuantityTooLarge { max: 20, .. })
        ));

        // The stored selection is untouched and still reviewable
        assert_eq!(state.order.product(), Some(&bottles(20)));
        assert_eq!(state.order.product().unwrap().litres(), 400);
    }

    #[test]
    fn test_setters_clear_error() {
        let mut state = WizardState::new();
        state
            .dispatch(WizardCommand::SetError(Some(SUBMISSION_FAILED_MESSAGE.to_string())))
            .unwrap();
        assert!(state.error.is_some());

        state.dispatch(WizardCommand::SetCustomerDetails(customer())).unwrap();
        assert!(state.error.is_none());
    }

    #[test]
    fn test_advance_requires_step_completion() {
        let mut state = WizardState::new();
        let err = state.dispatch(WizardCommand::Advance).unwrap_err();
        assert!(matches!(
            err,
            CoreError::StepIncomplete {
                step: WizardStep::CustomerDetails
            }
        ));
        assert_eq!(state, WizardState::new());

        state.dispatch(WizardCommand::SetCustomerDetails(customer())).unwrap();
        state.dispatch(WizardCommand::Advance).unwrap();
        assert_eq!(state.current_step, WizardStep::ProductSelection);
    }

    #[test]
    fn test_next_step_is_unguarded() {
        let state = WizardState::new().apply(WizardCommand::NextStep).unwrap();
        assert_eq!(state.current_step, WizardStep::ProductSelection);
        assert!(state.order.customer().is_none());
    }

    #[test]
    fn test_can_proceed_per_step() {
        let mut state = WizardState::new();
        assert!(!can_proceed(WizardStep::CustomerDetails, &state.order));

        let mut blank_email = customer();
        blank_email.email = String::new();
        state.dispatch(WizardCommand::SetCustomerDetails(blank_email)).unwrap();
        assert!(!can_proceed(WizardStep::CustomerDetails, &state.order));

        state.dispatch(WizardCommand::SetCustomerDetails(customer())).unwrap();
        assert!(can_proceed(WizardStep::CustomerDetails, &state.order));

        state.dispatch(WizardCommand::SetProductDetails(bottles(0))).unwrap();
        assert!(!can_proceed(WizardStep::ProductSelection, &state.order));
        state.dispatch(WizardCommand::SetProductDetails(bottles(2))).unwrap();
        assert!(can_proceed(WizardStep::ProductSelection, &state.order));

        assert!(!can_proceed(WizardStep::DeliveryOptions, &state.order));
        assert!(!can_proceed(WizardStep::OrderReview, &state.order));
        state
            .dispatch(WizardCommand::SetDeliveryDetails(DeliveryDetails::default()))
            .unwrap();
        assert!(can_proceed(WizardStep::DeliveryOptions, &state.order));
        assert!(can_proceed(WizardStep::OrderReview, &state.order));

        assert!(!can_proceed(WizardStep::Confirmation, &state.order));
        state.dispatch(confirm_command(1_000)).unwrap();
        assert!(can_proceed(WizardStep::Confirmation, &state.order));
        assert!(!can_proceed(WizardStep::PaymentInformation, &state.order));
    }

    #[test]
    fn test_confirm_sets_id_timestamp_and_flag_together() {
        let mut state = filled_state();
        state.dispatch(confirm_command(1_700_000_000_000)).unwrap();

        assert!(state.order.is_confirmed());
        assert_eq!(state.order.id().unwrap().as_str(), "DS-LOYW3V28-000016");
        assert_eq!(
            state.order.created_at().unwrap().timestamp_millis(),
            1_700_000_000_000
        );
    }

    #[test]
    fn test_repeated_confirm_replaces_id_but_stays_confirmed() {
        let mut state = filled_state();
        state.dispatch(confirm_command(1_000)).unwrap();
        let first = state.order.id().cloned();

        state.dispatch(confirm_command(2_000)).unwrap();
        assert!(state.order.is_confirmed());
        assert_ne!(state.order.id().cloned(), first);
        assert_eq!(state.order.created_at().unwrap().timestamp_millis(), 2_000);
    }

    #[test]
    fn test_confirm_rejects_incomplete_order() {
        let mut state = WizardState::new();
        state.dispatch(WizardCommand::SetCustomerDetails(customer())).unwrap();

        let err = state.dispatch(confirm_command(1_000)).unwrap_err();
        match err {
            CoreError::OrderIncomplete { missing } => assert_eq!(
                missing,
                vec![OrderSection::Product, OrderSection::Delivery, OrderSection::Pricing]
            ),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!state.order.is_confirmed());
        assert!(state.order.id().is_none());
    }

    #[test]
    fn test_reset_returns_initial_state() {
        let mut state = filled_state();
        state.dispatch(WizardCommand::GoToStep(WizardStep::Confirmation)).unwrap();
        state.dispatch(confirm_command(5_000)).unwrap();
        state.dispatch(WizardCommand::SetLoading(true)).unwrap();

        state.dispatch(WizardCommand::ResetOrder).unwrap();
        assert_eq!(state, WizardState::new());
    }

    #[test]
    fn test_loading_and_error_flags() {
        let mut state = WizardState::new();
        state.dispatch(WizardCommand::SetLoading(true)).unwrap();
        assert!(state.is_loading);

        state
            .dispatch(WizardCommand::SetError(Some(SUBMISSION_FAILED_MESSAGE.to_string())))
            .unwrap();
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some(SUBMISSION_FAILED_MESSAGE));

        state.dispatch(WizardCommand::NextStep).unwrap();
        assert!(state.error.is_none());
    }

    #[test]
    fn test_progress() {
        let progress = WizardProgress::for_step(WizardStep::ProductSelection);
        assert_eq!(progress.step_number, 2);
        assert_eq!(progress.total_steps, 6);
        assert_eq!(progress.step_name, "Product Selection");
        assert_eq!(progress.percent_complete, 33);

        let progress = WizardProgress::for_step(WizardStep::PaymentInformation);
        assert_eq!(progress.percent_complete, 100);
    }
}
