//! # dsfuel-core: Pure Ordering Logic for DS Fueling
//!
//! The checkout wizard and pricing engine, as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     DS Fueling Checkout Architecture                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Rendering layer                              │   │
//! │  │  Customer ──► Product ──► Delivery ──► Review ──► Confirm       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               dsfuel-checkout (session, config, gateway)        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ dsfuel-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │ catalog  │ │ pricing  │ │  order   │ │     wizard       │  │   │
//! │  │   │ prices   │ │ discount │ │ sections │ │ steps, commands  │  │   │
//! │  │   │ rules    │ │ totals   │ │ order id │ │ can_proceed      │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO ASYNC • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Price list, business rules, delivery options, banking details
//! - [`money`] - Rand amounts in integer cents
//! - [`pricing`] - Bulk discount and order totals
//! - [`order`] - The partial order document
//! - [`order_id`] - `DS-…` order numbers
//! - [`validation`] - Customer form and quantity rules
//! - [`wizard`] - Steps, commands and the transition function
//! - [`review`] - Review/confirmation views with missing-data guards
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use dsfuel_core::catalog::{PackageFormat, ProductType};
//! use dsfuel_core::order::ProductDetails;
//! use dsfuel_core::wizard::{WizardCommand, WizardState, WizardStep};
//!
//! let mut state = WizardState::new();
//! state
//!     .dispatch(WizardCommand::SetProductDetails(ProductDetails::new(
//!         ProductType::Ethanol,
//!         PackageFormat::Bottle,
//!         5,
//!     )))
//!     .unwrap();
//!
//! // Pricing is derived in the same transition
//! let pricing = state.order.pricing().unwrap();
//! assert_eq!(pricing.total_after_discount.to_string(), "R2199.96");
//! assert_eq!(state.current_step, WizardStep::CustomerDetails);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod order;
pub mod order_id;
pub mod pricing;
pub mod review;
pub mod validation;
pub mod wizard;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{
    BankingDetails, CatalogSnapshot, DeliveryType, PackageFormat, ProductType, BUSINESS_RULES,
};
pub use error::{CoreError, CoreResult, CustomerFormErrors, ValidationError};
pub use money::Money;
pub use order::{CustomerDetails, DeliveryDetails, Order, OrderSection, ProductDetails};
pub use order_id::OrderId;
pub use pricing::{compute_pricing, PricingDetails};
pub use wizard::{can_proceed, WizardCommand, WizardProgress, WizardState, WizardStep};
