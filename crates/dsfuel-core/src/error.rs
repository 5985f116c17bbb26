//! # Error Types
//!
//! Domain-specific error types for dsfuel-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dsfuel-core errors (this file)                                        │
//! │  ├── CoreError           - Wizard transition / domain failures         │
//! │  ├── ValidationError     - A single input rule violated                │
//! │  └── CustomerFormErrors  - Per-field messages for the customer form    │
//! │                                                                         │
//! │  checkout app errors (separate crate)                                  │
//! │  └── ApiError            - What the rendering layer sees (serialized)  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Rendering layer        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation failures never reach `WizardState::error`. That slot is
//! reserved for submission failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::order::OrderSection;
use crate::wizard::WizardStep;

// =============================================================================
// Core Error
// =============================================================================

/// Wizard and order-document errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A guarded advance was attempted before the step was complete.
    ///
    /// ## When This Occurs
    /// ```text
    /// Step: Customer Details (email empty)
    ///      │
    ///      ▼
    /// WizardCommand::Advance
    ///      │
    ///      ▼
    /// StepIncomplete { step: CustomerDetails }
    ///      │
    ///      ▼
    /// State unchanged, UI keeps the "Continue" button disabled
    /// ```
    #[error("Step '{}' is not complete", .step.name())]
    StepIncomplete { step: WizardStep },

    /// Confirmation was attempted while sections of the order are missing.
    #[error("Order is incomplete, missing: {}", format_sections(.missing))]
    OrderIncomplete { missing: Vec<OrderSection> },

    /// A numeric step index outside the wizard.
    #[error("Step {index} is out of range (last step is {last})")]
    StepOutOfRange { index: usize, last: usize },

    /// Quantity exceeds the per-format maximum.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: u32, max: u32 },

    /// A string that does not have the `DS-XXXX-XXXXXX` order number shape.
    #[error("Invalid order number: {0}")]
    InvalidOrderId(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

fn format_sections(sections: &[OrderSection]) -> String {
    sections
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (email, phone number, order number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Customer Form Errors
// =============================================================================

/// Fields of the customer details form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum CustomerField {
    Name,
    Surname,
    Phone,
    Email,
    Address,
}

impl CustomerField {
    /// All form fields in display order.
    pub const ALL: [CustomerField; 5] = [
        CustomerField::Name,
        CustomerField::Surname,
        CustomerField::Phone,
        CustomerField::Email,
        CustomerField::Address,
    ];

    /// Label used in "<label> is required" messages.
    pub fn label(&self) -> &'static str {
        match self {
            CustomerField::Name => "Name",
            CustomerField::Surname => "Surname",
            CustomerField::Phone => "Phone number",
            CustomerField::Email => "Email",
            CustomerField::Address => "Address",
        }
    }
}

/// A message attached to one customer form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldError {
    pub field: CustomerField,
    pub message: String,
}

/// Every problem found on the customer form, at most one per field.
///
/// Shown next to the inputs by the rendering layer. Blocks only the form's own
/// submit action, never the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{} customer field(s) invalid", .errors.len())]
pub struct CustomerFormErrors {
    pub errors: Vec<FieldError>,
}

impl CustomerFormErrors {
    pub(crate) fn push(&mut self, field: CustomerField, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.errors.push(FieldError {
                field,
                message: message.into(),
            });
        }
    }

    /// Message for a field, if it failed.
    pub fn get(&self, field: CustomerField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::StepIncomplete {
            step: WizardStep::DeliveryOptions,
        };
        assert_eq!(err.to_string(), "Step 'Delivery Options' is not complete");

        let err = CoreError::OrderIncomplete {
            missing: vec![OrderSection::Delivery, OrderSection::Pricing],
        };
        assert_eq!(err.to_string(), "Order is incomplete, missing: delivery, pricing");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "Name".to_string(),
        };
        assert_eq!(err.to_string(), "Name is required");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 20,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 20");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "email".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_form_errors_keep_first_message_per_field() {
        let mut errors = CustomerFormErrors::default();
        errors.push(CustomerField::Email, "Email is required");
        errors.push(CustomerField::Email, "Please enter a valid email address");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(CustomerField::Email), Some("Email is required"));
        assert_eq!(errors.get(CustomerField::Phone), None);
    }
}
