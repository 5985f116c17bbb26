//! # Order Document
//!
//! The partial order built up step by step by the wizard.
//!
//! ## Document Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              Order                                      │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────┐         │
//! │  │ CustomerDetails │  │ ProductDetails  │  │ DeliveryDetails │         │
//! │  │  name, surname  │  │  product_type   │  │  delivery_type  │         │
//! │  │  phone, email   │  │  format         │  │                 │         │
//! │  │  address        │  │  quantity       │  │                 │         │
//! │  └─────────────────┘  └────────┬────────┘  └─────────────────┘         │
//! │                                │ derived                                │
//! │                                ▼                                        │
//! │                       ┌─────────────────┐                               │
//! │                       │ PricingDetails  │                               │
//! │                       └─────────────────┘                               │
//! │                                                                         │
//! │  id + confirmed + created_at: set together at confirmation             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fields are private and the wizard's transition function is the only
//! writer. Pricing always matches the stored product; id, timestamp and the
//! confirmed flag change together.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::catalog::{DeliveryType, PackageFormat, ProductType};
use crate::order_id::OrderId;
use crate::pricing::{compute_pricing, PricingDetails};

// =============================================================================
// Customer
// =============================================================================

/// Contact and delivery address of the buyer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerDetails {
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl CustomerDetails {
    /// "Name Surname".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name.trim(), self.surname.trim())
    }

    /// True when none of the five fields is blank.
    pub fn is_filled(&self) -> bool {
        [
            &self.name,
            &self.surname,
            &self.phone,
            &self.email,
            &self.address,
        ]
        .iter()
        .all(|v| !v.trim().is_empty())
    }
}

// =============================================================================
// Product
// =============================================================================

/// What is being ordered and how much of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub format: PackageFormat,
    pub quantity: u32,
}

impl ProductDetails {
    pub fn new(product_type: ProductType, format: PackageFormat, quantity: u32) -> Self {
        ProductDetails {
            product_type,
            format,
            quantity,
        }
    }

    /// Price breakdown for this selection.
    pub fn pricing(&self) -> PricingDetails {
        compute_pricing(self.product_type, self.format, self.quantity)
    }

    /// Total litres ordered.
    pub fn litres(&self) -> u32 {
        self.format.litres().saturating_mul(self.quantity)
    }
}

// =============================================================================
// Delivery
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeliveryDetails {
    #[serde(rename = "type")]
    pub delivery_type: DeliveryType,
}

impl DeliveryDetails {
    pub fn new(delivery_type: DeliveryType) -> Self {
        DeliveryDetails { delivery_type }
    }
}

// =============================================================================
// Order Sections
// =============================================================================

/// The four sections an order needs before it can be confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OrderSection {
    Customer,
    Product,
    Delivery,
    Pricing,
}

impl fmt::Display for OrderSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSection::Customer => write!(f, "customer"),
            OrderSection::Product => write!(f, "product"),
            OrderSection::Delivery => write!(f, "delivery"),
            OrderSection::Pricing => write!(f, "pricing"),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// The order under construction.
///
/// Serialize-only. Orders are built through wizard commands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    id: Option<OrderId>,
    customer: Option<CustomerDetails>,
    product: Option<ProductDetails>,
    delivery: Option<DeliveryDetails>,
    pricing: Option<PricingDetails>,
    confirmed: bool,
    #[ts(as = "Option<String>")]
    created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Creates an empty order.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<&OrderId> {
        self.id.as_ref()
    }

    pub fn customer(&self) -> Option<&CustomerDetails> {
        self.customer.as_ref()
    }

    pub fn product(&self) -> Option<&ProductDetails> {
        self.product.as_ref()
    }

    pub fn delivery(&self) -> Option<&DeliveryDetails> {
        self.delivery.as_ref()
    }

    pub fn pricing(&self) -> Option<&PricingDetails> {
        self.pricing.as_ref()
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Sections that have not been filled in yet, in wizard order.
    pub fn missing_sections(&self) -> Vec<OrderSection> {
        let mut missing = Vec::new();
        if self.customer.is_none() {
            missing.push(OrderSection::Customer);
        }
        if self.product.is_none() {
            missing.push(OrderSection::Product);
        }
        if self.delivery.is_none() {
            missing.push(OrderSection::Delivery);
        }
        if self.pricing.is_none() {
            missing.push(OrderSection::Pricing);
        }
        missing
    }

    /// True when all four sections are present.
    pub fn is_complete(&self) -> bool {
        self.missing_sections().is_empty()
    }

    // =========================================================================
    // Writers (wizard only)
    // =========================================================================

    pub(crate) fn set_customer(&mut self, customer: CustomerDetails) {
        self.customer = Some(customer);
    }

    /// Stores the product and its pricing in one step.
    pub(crate) fn set_product(&mut self, product: ProductDetails) {
        self.pricing = Some(product.pricing());
        self.product = Some(product);
    }

    pub(crate) fn set_delivery(&mut self, delivery: DeliveryDetails) {
        self.delivery = Some(delivery);
    }

    pub(crate) fn confirm(&mut self, id: OrderId, at: DateTime<Utc>) {
        self.id = Some(id);
        self.created_at = Some(at);
        self.confirmed = true;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
