//! # Catalog Commands
//!
//! Static data the forms and the payment step display.
//!
//! ## When Used
//! - Product step: prices, sizes, quantity limits, discount rule
//! - Delivery step: delivery option labels
//! - Payment step: banking details and the online payment link

use dsfuel_core::{BankingDetails, CatalogSnapshot, Money, OrderId};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::state::{CheckoutConfig, WizardSession};

/// Where and how much to pay online.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLink {
    pub url: String,
    /// The order number, once confirmed.
    pub reference: Option<OrderId>,
    pub amount_due: Option<Money>,
    /// e.g. "R2199.96"
    pub amount_due_display: Option<String>,
}

/// Gets the price list, business rules and delivery options.
pub fn get_catalog(config: &CheckoutConfig) -> CatalogSnapshot {
    debug!("get_catalog command");
    CatalogSnapshot::with_banking(config.payment.banking.clone())
}

/// Gets the account for manual EFT payments.
pub fn get_banking_details(config: &CheckoutConfig) -> BankingDetails {
    debug!("get_banking_details command");
    config.payment.banking.clone()
}

/// Gets the online payment link for the current order.
pub fn get_payment_link(config: &CheckoutConfig, session: &WizardSession) -> PaymentLink {
    debug!("get_payment_link command");
    let (reference, amount_due) = session.with_state(|s| {
        (
            s.order.id().cloned(),
            s.order.pricing().map(|p| p.total_after_discount),
        )
    });

    PaymentLink {
        url: config.payment.url.clone(),
        reference,
        amount_due,
        amount_due_display: amount_due.map(|m| config.format_currency(m.cents())),
    }
}
