//! # Validation Module
//!
//! Input validation for the customer and product steps.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Rendering layer                                              │
//! │  └── Immediate feedback while typing                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Checkout commands                                            │
//! │  └── THIS MODULE: per-field rules, quantity bounds                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Wizard readiness (can_proceed)                               │
//! │  └── Section presence only, no format rules                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dsfuel_core::validation::{validate_email, validate_phone};
//!
//! assert!(validate_email("foo@bar.com").is_ok());
//! assert!(validate_email("foo").is_err());
//! assert!(validate_phone("082 123 4567").is_ok());
//! ```

use regex::Regex;
use std::sync::LazyLock;

use crate::catalog::PackageFormat;
use crate::error::{CustomerField, CustomerFormErrors, ValidationError};
use crate::order::{CustomerDetails, ProductDetails};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("Invalid regex"));

/// South African numbers: `+27` or `0` followed by nine digits.
static SA_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+27|0)[0-9]{9}$").expect("Invalid regex"));

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const INVALID_PHONE_MESSAGE: &str = "Please enter a valid South African phone number";

// =============================================================================
// String Validators
// =============================================================================

/// Rejects blank values.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates an email address.
///
/// The rule is deliberately loose: something, `@`, something, `.`, something.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    validate_required("Email", email)?;

    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidFormat {
            field: "Email".to_string(),
            reason: INVALID_EMAIL_MESSAGE.to_string(),
        });
    }

    Ok(())
}

/// Removes all whitespace from a phone number.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Validates a South African phone number.
///
/// Whitespace is ignored, so "082 123 4567" is accepted.
///
/// ```rust
/// use dsfuel_core::validation::validate_phone;
///
/// assert!(validate_phone("0821234567").is_ok());
/// assert!(validate_phone("+27821234567").is_ok());
/// assert!(validate_phone("12345").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    validate_required("Phone number", phone)?;

    if !SA_PHONE_RE.is_match(&normalize_phone(phone)) {
        return Err(ValidationError::InvalidFormat {
            field: "Phone number".to_string(),
            reason: INVALID_PHONE_MESSAGE.to_string(),
        });
    }

    Ok(())
}

/// Validates the whole customer form, collecting one message per field.
///
/// ## User Workflow
/// ```text
/// Customer submits form
///      │
///      ▼
/// validate_customer_details() ← THIS FUNCTION
///      │
///      ├── Err(errors) → messages under each input, wizard untouched
///      │
///      └── Ok → SetCustomerDetails, then NextStep
/// ```
pub fn validate_customer_details(customer: &CustomerDetails) -> Result<(), CustomerFormErrors> {
    let mut errors = CustomerFormErrors::default();

    for field in CustomerField::ALL {
        let value = match field {
            CustomerField::Name => &customer.name,
            CustomerField::Surname => &customer.surname,
            CustomerField::Phone => &customer.phone,
            CustomerField::Email => &customer.email,
            CustomerField::Address => &customer.address,
        };

        if let Err(err) = validate_required(field.label(), value) {
            errors.push(field, err.to_string());
        }
    }

    if errors.get(CustomerField::Email).is_none() && validate_email(&customer.email).is_err() {
        errors.push(CustomerField::Email, INVALID_EMAIL_MESSAGE);
    }

    if errors.get(CustomerField::Phone).is_none() && validate_phone(&customer.phone).is_err() {
        errors.push(CustomerField::Phone, INVALID_PHONE_MESSAGE);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order quantity for a package format.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed the format maximum (20 bottles, 10 barrels)
pub fn validate_quantity(format: PackageFormat, qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    let max = format.max_quantity();
    if qty > max {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::from(max),
        });
    }

    Ok(())
}

/// Validates a product selection before it enters the order.
pub fn validate_product_details(product: &ProductDetails) -> ValidationResult<()> {
    validate_quantity(product.format, product.quantity)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductType;

    fn customer() -> CustomerDetails {
        CustomerDetails {
            name: "Sipho".to_string(),
            surname: "Dlamini".to_string(),
            phone: "+27 82 123 4567".to_string(),
            email: "sipho@example.com".to_string(),
            address: "5 Main Road, Durban".to_string(),
        }
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("foo@bar.com").is_ok());
        assert!(validate_email("a.b@c.co.za").is_ok());

        assert!(validate_email("foo").is_err());
        assert!(validate_email("foo@bar").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("0821234567").is_ok());
        assert!(validate_phone("+27821234567").is_ok());
        assert!(validate_phone("082 123 4567").is_ok());

        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("082123456").is_err());
        assert!(validate_phone("+2782123456a").is_err());
        assert!(validate_phone("27821234567").is_err());
    }

    #[test]
    fn test_valid_customer_passes() {
        assert!(validate_customer_details(&customer()).is_ok());
    }

    #[test]
    fn test_customer_errors_are_per_field() {
        let mut c = customer();
        c.name = " ".to_string();
        c.email = "foo".to_string();
        c.phone = "12345".to_string();

        let errors = validate_customer_details(&c).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(CustomerField::Name), Some("Name is required"));
        assert_eq!(errors.get(CustomerField::Email), Some(INVALID_EMAIL_MESSAGE));
        assert_eq!(errors.get(CustomerField::Phone), Some(INVALID_PHONE_MESSAGE));
        assert_eq!(errors.get(CustomerField::Address), None);
    }

    #[test]
    fn test_empty_customer_reports_required() {
        let errors = validate_customer_details(&CustomerDetails::default()).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert_eq!(errors.get(CustomerField::Phone), Some("Phone number is required"));
        assert_eq!(errors.get(CustomerField::Email), Some("Email is required"));
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(PackageFormat::Bottle, 1).is_ok());
        assert!(validate_quantity(PackageFormat::Bottle, 20).is_ok());
        assert!(validate_quantity(PackageFormat::Barrel, 10).is_ok());

        assert!(validate_quantity(PackageFormat::Bottle, 0).is_err());
        assert!(validate_quantity(PackageFormat::Bottle, 21).is_err());
        assert_eq!(
            validate_quantity(PackageFormat::Barrel, 11),
            Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max: 10
            })
        );
    }

    #[test]
    fn test_validate_product_details() {
        let ok = ProductDetails::new(ProductType::Methanol, PackageFormat::Barrel, 2);
        assert!(validate_product_details(&ok).is_ok());

        let too_many = ProductDetails::new(ProductType::Methanol, PackageFormat::Barrel, 12);
        assert!(validate_product_details(&too_many).is_err());
    }
}
