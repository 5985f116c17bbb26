//! # Pricing Engine
//!
//! Maps a product selection to its price breakdown.
//!
//! ## Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  unit_price            = catalog[product][format].price                │
//! │  total_before_discount = unit_price × quantity                         │
//! │                                                                         │
//! │  format == bottle && quantity >= 5 ?                                   │
//! │      ├── yes → discount_percentage = 20                                │
//! │      └── no  → discount_percentage = 0                                 │
//! │                                                                         │
//! │  discount              = total_before_discount × pct / 100             │
//! │  total_after_discount  = total_before_discount − discount              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pricing is never stored independently of the product selection: the
//! wizard recomputes it inside the same transition that sets the product.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{catalog_entry, PackageFormat, ProductType, BUSINESS_RULES};
use crate::money::Money;

/// Derived price breakdown for the current product selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingDetails {
    pub unit_price: Money,
    pub total_before_discount: Money,
    pub discount: Money,
    /// Whole percent, 0 when no discount applies.
    pub discount_percentage: u32,
    pub total_after_discount: Money,
}

impl PricingDetails {
    /// Whether the bulk discount reduced the total.
    pub fn has_discount(&self) -> bool {
        self.discount.is_positive()
    }
}

/// Whether a selection earns the bulk discount.
///
/// Only bottles qualify, and only from `min_quantity_for_discount` upward.
pub fn qualifies_for_discount(format: PackageFormat, quantity: u32) -> bool {
    format.is_discountable() && quantity >= BUSINESS_RULES.min_quantity_for_discount
}

/// Computes the price breakdown for a product selection.
///
/// Pure and deterministic; quantity bounds are checked by
/// [`crate::validation::validate_quantity`], not here.
///
/// ```rust
/// use dsfuel_core::catalog::{PackageFormat, ProductType};
/// use dsfuel_core::pricing::compute_pricing;
///
/// let pricing = compute_pricing(ProductType::Ethanol, PackageFormat::Bottle, 5);
/// assert_eq!(pricing.total_before_discount.cents(), 274_995);
/// assert_eq!(pricing.discount.cents(), 54_999);
/// assert_eq!(pricing.total_after_discount.cents(), 219_996);
/// ```
pub fn compute_pricing(
    product_type: ProductType,
    format: PackageFormat,
    quantity: u32,
) -> PricingDetails {
    let unit_price = catalog_entry(product_type, format).price;
    let total_before_discount = unit_price.multiply_quantity(quantity);

    let discount_percentage = if qualifies_for_discount(format, quantity) {
        BUSINESS_RULES.discount_percentage
    } else {
        0
    };

    let discount = total_before_discount.percentage(discount_percentage);

    PricingDetails {
        unit_price,
        total_before_discount,
        discount,
        discount_percentage,
        total_after_discount: total_before_discount - discount,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ethanol_five_bottles_gets_bulk_discount() {
        let pricing = compute_pricing(ProductType::Ethanol, PackageFormat::Bottle, 5);

        assert_eq!(pricing.unit_price.cents(), 54_999);
        assert_eq!(pricing.total_before_discount.cents(), 274_995);
        assert_eq!(pricing.discount_percentage, 20);
        assert_eq!(pricing.discount.cents(), 54_999);
        assert_eq!(pricing.total_after_discount.cents(), 219_996);
        assert!(pricing.has_discount());
    }

    #[test]
    fn test_four_bottles_has_no_discount() {
        let pricing = compute_pricing(ProductType::Ethanol, PackageFormat::Bottle, 4);

        assert_eq!(pricing.discount_percentage, 0);
        assert!(pricing.discount.is_zero());
        assert_eq!(pricing.total_before_discount.cents(), 219_996);
        assert_eq!(pricing.total_after_discount, pricing.total_before_discount);
        assert!(!pricing.has_discount());
    }

    #[test]
    fn test_barrels_never_discounted() {
        let pricing = compute_pricing(ProductType::Methanol, PackageFormat::Barrel, 2);
        assert_eq!(pricing.unit_price.cents(), 349_999);
        assert_eq!(pricing.total_before_discount.cents(), 699_998);
        assert!(pricing.discount.is_zero());

        let pricing = compute_pricing(ProductType::Ethanol, PackageFormat::Barrel, 10);
        assert_eq!(pricing.discount_percentage, 0);
        assert_eq!(pricing.total_after_discount.cents(), 5_499_990);
    }

    #[test]
    fn test_totals_consistent_for_every_valid_selection() {
        for product_type in ProductType::ALL {
            for format in PackageFormat::ALL {
                for quantity in 1..=format.max_quantity() {
                    let p = compute_pricing(product_type, format, quantity);

                    assert_eq!(p.total_after_discount, p.total_before_discount - p.discount);
                    assert_eq!(p.total_before_discount, p.unit_price * quantity);
                    if format == PackageFormat::Barrel || quantity < 5 {
                        assert!(p.discount.is_zero(), "{product_type} {format} x{quantity}");
                    } else {
                        assert_eq!(p.discount_percentage, 20);
                    }
                }
            }
        }
    }

    #[test]
    fn test_serializes_camel_case() {
        let pricing = compute_pricing(ProductType::Methanol, PackageFormat::Bottle, 1);
        let json = serde_json::to_value(pricing).unwrap();
        assert_eq!(json["unitPrice"], 34_999);
        assert_eq!(json["discountPercentage"], 0);
    }
}
