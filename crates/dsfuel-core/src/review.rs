//! # Review & Confirmation Views
//!
//! Read models for the last screens of the wizard. Both check that the order
//! document is complete and fall back to a notice instead of failing.
//!
//! ```text
//! Order ──► OrderReview::from_order ──┬── Ready(review)
//!                                     └── MissingInformation { notice }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{catalog_entry, DeliveryType, PackageFormat, ProductType};
use crate::money::Money;
use crate::order::{CustomerDetails, Order, OrderSection};
use crate::order_id::OrderId;
use crate::pricing::PricingDetails;

pub const MISSING_ORDER_INFORMATION: &str =
    "Missing order information. Please go back and complete all steps.";
pub const MISSING_CONFIRMATION_INFORMATION: &str = "Order confirmation information is missing.";

/// Either a complete view or the notice to show in its place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ViewOutcome<T> {
    Ready { view: T },
    MissingInformation {
        notice: String,
        missing: Vec<OrderSection>,
    },
}

impl<T> ViewOutcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, ViewOutcome::Ready { .. })
    }

    /// The view, if the order was complete.
    pub fn ready(self) -> Option<T> {
        match self {
            ViewOutcome::Ready { view } => Some(view),
            ViewOutcome::MissingInformation { .. } => None,
        }
    }
}

// =============================================================================
// Review
// =============================================================================

/// The product row of the review table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductLine {
    pub product_type: ProductType,
    pub product_name: String,
    pub format: PackageFormat,
    pub description: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub total_litres: u32,
}

/// Everything the review step displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderReview {
    pub customer: CustomerDetails,
    pub product: ProductLine,
    pub delivery_type: DeliveryType,
    pub delivery_title: String,
    pub delivery_description: String,
    pub pricing: PricingDetails,
    /// "You saved R549.99 with your bulk order discount!" when discounted.
    pub savings_message: Option<String>,
}

impl OrderReview {
    /// Builds the review, or the missing-information notice.
    pub fn from_order(order: &Order) -> ViewOutcome<OrderReview> {
        let (Some(customer), Some(product), Some(delivery), Some(pricing)) = (
            order.customer(),
            order.product(),
            order.delivery(),
            order.pricing(),
        ) else {
            return ViewOutcome::MissingInformation {
                notice: MISSING_ORDER_INFORMATION.to_string(),
                missing: order.missing_sections(),
            };
        };

        let entry = catalog_entry(product.product_type, product.format);
        let savings_message = pricing.has_discount().then(|| {
            format!(
                "You saved {} with your bulk order discount!",
                pricing.discount
            )
        });

        ViewOutcome::Ready {
            view: OrderReview {
                customer: customer.clone(),
                product: ProductLine {
                    product_type: product.product_type,
                    product_name: product.product_type.display_name().to_string(),
                    format: product.format,
                    description: entry.description.to_string(),
                    quantity: product.quantity,
                    unit_price: entry.price,
                    total_litres: product.litres(),
                },
                delivery_type: delivery.delivery_type,
                delivery_title: delivery.delivery_type.title().to_string(),
                delivery_description: delivery.delivery_type.description().to_string(),
                pricing: *pricing,
                savings_message,
            },
        }
    }
}

// =============================================================================
// Confirmation
// =============================================================================

/// The confirmation / payment screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationView {
    pub order_id: OrderId,
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
    pub customer_name: String,
    pub email: String,
    pub summary: String,
    pub amount_due: Money,
    pub delivery_title: String,
    /// EFT reference; the order number.
    pub payment_reference: String,
}

impl ConfirmationView {
    /// Builds the confirmation view. Needs a complete, confirmed order.
    pub fn from_order(order: &Order) -> ViewOutcome<ConfirmationView> {
        let missing = order.missing_sections();

        let (Some(id), Some(customer), Some(delivery), Some(pricing), Some(summary)) = (
            order.id().filter(|_| order.is_confirmed()),
            order.customer(),
            order.delivery(),
            order.pricing(),
            order_summary(order),
        ) else {
            return ViewOutcome::MissingInformation {
                notice: MISSING_CONFIRMATION_INFORMATION.to_string(),
                missing,
            };
        };

        ViewOutcome::Ready {
            view: ConfirmationView {
                order_id: id.clone(),
                created_at: order.created_at(),
                customer_name: customer.full_name(),
                email: customer.email.clone(),
                summary,
                amount_due: pricing.total_after_discount,
                delivery_title: delivery.delivery_type.title().to_string(),
                payment_reference: id.to_string(),
            },
        }
    }
}

// =============================================================================
// Summary
// =============================================================================

/// One-line order summary, e.g. `5x 20L Ethanol (E95) - Premium Grade - R2199.96`.
///
/// `None` until both the product and its pricing are known.
///
/// ```rust
/// use dsfuel_core::order::Order;
/// use dsfuel_core::review::order_summary;
///
/// assert_eq!(order_summary(&Order::new()), None);
/// ```
pub fn order_summary(order: &Order) -> Option<String> {
    let product = order.product()?;
    let pricing = order.pricing()?;
    let entry = catalog_entry(product.product_type, product.format);

    Some(format!(
        "{}x {} - {}",
        product.quantity, entry.description, pricing.total_after_discount
    ))
}

// =============================================================================
// Unit Tests
// =============================================================================
