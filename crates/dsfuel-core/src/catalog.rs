//! # Catalog & Business Rules
//!
//! Static, read-only product catalog and the rules the pricing engine and
//! validators consult.
//!
//! ## Price List
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product          │  Bottle (20L)        │  Barrel (200L)              │
//! │  ─────────────────┼──────────────────────┼───────────────────────────  │
//! │  Ethanol (E95)    │  R549.99             │  R5499.99                   │
//! │  100% Methanol    │  R349.99             │  R3499.99                   │
//! │                                                                         │
//! │  Bulk discount: 20% on 5+ bottles (never on barrels)                   │
//! │  Max quantity:  20 bottles, 10 barrels                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Type
// =============================================================================

/// The fuel being ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Ethanol,
    Methanol,
}

impl ProductType {
    pub const ALL: [ProductType; 2] = [ProductType::Ethanol, ProductType::Methanol];

    /// Catalog display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProductType::Ethanol => "Ethanol (E95)",
            ProductType::Methanol => "100% Methanol",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductType::Ethanol => write!(f, "ethanol"),
            ProductType::Methanol => write!(f, "methanol"),
        }
    }
}

// =============================================================================
// Package Format
// =============================================================================

/// Container the product ships in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PackageFormat {
    /// 20 litre bottle.
    Bottle,
    /// 200 litre barrel.
    Barrel,
}

impl PackageFormat {
    pub const ALL: [PackageFormat; 2] = [PackageFormat::Bottle, PackageFormat::Barrel];

    /// Volume of one unit in litres.
    pub const fn litres(&self) -> u32 {
        match self {
            PackageFormat::Bottle => 20,
            PackageFormat::Barrel => 200,
        }
    }

    /// Largest quantity accepted for one order of this format.
    pub const fn max_quantity(&self) -> u32 {
        match self {
            PackageFormat::Bottle => BUSINESS_RULES.max_bottle_quantity,
            PackageFormat::Barrel => BUSINESS_RULES.max_barrel_quantity,
        }
    }

    /// Whether the bulk discount can ever apply to this format.
    pub const fn is_discountable(&self) -> bool {
        matches!(self, PackageFormat::Bottle)
    }

    /// "20L Bottle" / "200L Barrel".
    pub fn label(&self) -> &'static str {
        match self {
            PackageFormat::Bottle => "20L Bottle",
            PackageFormat::Barrel => "200L Barrel",
        }
    }
}

impl fmt::Display for PackageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageFormat::Bottle => write!(f, "bottle"),
            PackageFormat::Barrel => write!(f, "barrel"),
        }
    }
}

// =============================================================================
// Delivery Type
// =============================================================================

/// How fast the order is delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryType {
    SameDay,
    /// 1-3 business days. Preselected on the delivery step.
    #[default]
    Standard,
}

impl DeliveryType {
    pub const ALL: [DeliveryType; 2] = [DeliveryType::Standard, DeliveryType::SameDay];

    /// Option title on the delivery step.
    pub fn title(&self) -> &'static str {
        match self {
            DeliveryType::SameDay => "Same Day Delivery",
            DeliveryType::Standard => "Standard Delivery",
        }
    }

    /// Timing description shown under the title.
    pub fn description(&self) -> &'static str {
        match self {
            DeliveryType::SameDay => "Same Day Delivery",
            DeliveryType::Standard => "1-3 Business Days",
        }
    }
}

// =============================================================================
// Catalog Entries
// =============================================================================

/// One sellable (product, format) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub product_type: ProductType,
    pub format: PackageFormat,
    /// "20L" / "200L".
    pub size: &'static str,
    pub price: Money,
    pub description: &'static str,
}

/// Looks up the catalog entry for a product and format.
///
/// ```rust
/// use dsfuel_core::catalog::{catalog_entry, PackageFormat, ProductType};
///
/// let entry = catalog_entry(ProductType::Methanol, PackageFormat::Barrel);
/// assert_eq!(entry.price.cents(), 349_999);
/// assert_eq!(entry.description, "200L 100% Methanol - Bulk Supply");
/// ```
pub const fn catalog_entry(product_type: ProductType, format: PackageFormat) -> CatalogEntry {
    let (size, price, description) = match (product_type, format) {
        (ProductType::Ethanol, PackageFormat::Bottle) => (
            "20L",
            Money::from_cents(54_999),
            "20L Ethanol (E95) - Premium Grade",
        ),
        (ProductType::Ethanol, PackageFormat::Barrel) => (
            "200L",
            Money::from_cents(549_999),
            "200L Ethanol (E95) - Bulk Supply",
        ),
        (ProductType::Methanol, PackageFormat::Bottle) => (
            "20L",
            Money::from_cents(34_999),
            "20L 100% Methanol - Industrial Grade",
        ),
        (ProductType::Methanol, PackageFormat::Barrel) => (
            "200L",
            Money::from_cents(349_999),
            "200L 100% Methanol - Bulk Supply",
        ),
    };

    CatalogEntry {
        product_type,
        format,
        size,
        price,
        description,
    }
}

// =============================================================================
// Business Rules
// =============================================================================

/// Discount and quantity rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BusinessRules {
    /// Bottles needed before the bulk discount applies.
    pub min_quantity_for_discount: u32,
    /// Bulk discount, whole percent.
    pub discount_percentage: u32,
    pub max_bottle_quantity: u32,
    pub max_barrel_quantity: u32,
}

pub const BUSINESS_RULES: BusinessRules = BusinessRules {
    min_quantity_for_discount: 5,
    discount_percentage: 20,
    max_bottle_quantity: 20,
    max_barrel_quantity: 10,
};

// =============================================================================
// Banking Details
// =============================================================================

/// Account the customer pays into for a manual EFT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BankingDetails {
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub branch_code: String,
    /// Instruction for the payment reference field.
    pub reference: String,
}

impl Default for BankingDetails {
    fn default() -> Self {
        BankingDetails {
            bank_name: "DS Fueling Banking".to_string(),
            account_name: "DS Fueling (Pty) Ltd".to_string(),
            account_number: "1234567890".to_string(),
            branch_code: "123456".to_string(),
            reference: "Please use your order number as reference".to_string(),
        }
    }
}

// =============================================================================
// Catalog Snapshot
// =============================================================================

/// A catalog entry in owned form, for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductListing {
    pub product_type: ProductType,
    pub product_name: String,
    pub format: PackageFormat,
    /// "20L Bottle" / "200L Barrel", the format picker's option text.
    pub format_label: String,
    pub size: String,
    pub price: Money,
    pub description: String,
    pub max_quantity: u32,
}

impl From<CatalogEntry> for ProductListing {
    fn from(entry: CatalogEntry) -> Self {
        ProductListing {
            product_type: entry.product_type,
            product_name: entry.product_type.display_name().to_string(),
            format: entry.format,
            format_label: entry.format.label().to_string(),
            size: entry.size.to_string(),
            price: entry.price,
            description: entry.description.to_string(),
            max_quantity: entry.format.max_quantity(),
        }
    }
}

/// A delivery choice with its labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOption {
    pub delivery_type: DeliveryType,
    pub title: String,
    pub description: String,
}

/// All static configuration the rendering layer displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    pub products: Vec<ProductListing>,
    pub rules: BusinessRules,
    pub delivery_options: Vec<DeliveryOption>,
    pub banking: BankingDetails,
}

impl CatalogSnapshot {
    /// Builds the snapshot with the given banking details.
    pub fn with_banking(banking: BankingDetails) -> Self {
        let products = ProductType::ALL
            .iter()
            .flat_map(|&product_type| {
                PackageFormat::ALL
                    .iter()
                    .map(move |&format| catalog_entry(product_type, format).into())
            })
            .collect();

        let delivery_options = DeliveryType::ALL
            .iter()
            .map(|&delivery_type| DeliveryOption {
                delivery_type,
                title: delivery_type.title().to_string(),
                description: delivery_type.description().to_string(),
            })
            .collect();

        CatalogSnapshot {
            products,
            rules: BUSINESS_RULES,
            delivery_options,
            banking,
        }
    }
}

impl Default for CatalogSnapshot {
    fn default() -> Self {
        Self::with_banking(BankingDetails::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
