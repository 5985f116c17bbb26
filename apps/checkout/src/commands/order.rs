//! # Order Form Commands
//!
//! The data-entry steps: customer, product, delivery.
//!
//! ## Form Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Customer clicks "Continue" on a form                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  set_customer_details(&session, details)                               │
//! │       │                                                                 │
//! │       ├── invalid ──► ApiError { VALIDATION_ERROR, fieldErrors }        │
//! │       │               wizard untouched, messages under inputs           │
//! │       │                                                                 │
//! │       └── valid ────► SetCustomerDetails                                │
//! │                       WizardView { canProceed: true }                   │
//! │                                                                         │
//! │  The rendering layer then calls next_step to move on.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use dsfuel_core::order::{CustomerDetails, DeliveryDetails, ProductDetails};
use dsfuel_core::validation::{validate_customer_details, validate_product_details};
use dsfuel_core::WizardCommand;
use tracing::debug;

use crate::commands::WizardView;
use crate::error::ApiError;
use crate::state::WizardSession;

/// Stores the customer form after validating every field.
///
/// Phone numbers are kept as typed; validation ignores spaces.
pub fn set_customer_details(
    session: &WizardSession,
    details: CustomerDetails,
) -> Result<WizardView, ApiError> {
    debug!("set_customer_details command");

    if let Err(errors) = validate_customer_details(&details) {
        debug!(invalid = errors.len(), "Customer form rejected");
        return Err(errors.into());
    }

    let state = session.dispatch(WizardCommand::SetCustomerDetails(details))?;
    Ok(state.into())
}

/// Stores the product selection; pricing is recomputed in the same step.
pub fn set_product_details(
    session: &WizardSession,
    details: ProductDetails,
) -> Result<WizardView, ApiError> {
    debug!(
        product = %details.product_type,
        format = %details.format,
        quantity = details.quantity,
        "set_product_details command"
    );

    validate_product_details(&details).map_err(|e| ApiError::validation(e.to_string()))?;

    let state = session.dispatch(WizardCommand::SetProductDetails(details))?;
    Ok(state.into())
}

/// Stores the delivery choice.
pub fn set_delivery_details(
    session: &WizardSession,
    details: DeliveryDetails,
) -> Result<WizardView, ApiError> {
    debug!(delivery = ?details.delivery_type, "set_delivery_details command");

    let state = session.dispatch(WizardCommand::SetDeliveryDetails(details))?;
    Ok(state.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use dsfuel_core::catalog::{DeliveryType, PackageFormat, ProductType};
    use dsfuel_core::error::CustomerField;

    fn valid_customer() -> CustomerDetails {
        CustomerDetails {
            name: "Naledi".to_string(),
            surname: "Dlamini".to_string(),
            phone: "082 123 4567".to_string(),
            email: "naledi@example.com".to_string(),
            address: "45 Oxford Road, Johannesburg".to_string(),
        }
    }

    #[test]
    fn test_valid_customer_is_stored() {
        let session = WizardSession::new();
        let view = set_customer_details(&session, valid_customer()).unwrap();

        assert!(view.can_proceed);
        assert_eq!(view.state.order.customer(), Some(&valid_customer()));
    }

    #[test]
    fn test_invalid_customer_returns_field_errors() {
        let session = WizardSession::new();
        let details = CustomerDetails {
            email: "foo".to_string(),
            phone: "12345".to_string(),
            ..valid_customer()
        };

        let err = set_customer_details(&session, details).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let fields: Vec<_> = err.field_errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&CustomerField::Email));
        assert!(fields.contains(&CustomerField::Phone));

        // The wizard never saw the bad form
        assert!(session.with_state(|s| s.order.customer().is_none()));
    }

    #[test]
    fn test_product_pricing_is_derived() {
        let session = WizardSession::new();
        let view = set_product_details(
            &session,
            ProductDetails::new(ProductType::Ethanol, PackageFormat::Bottle, 5),
        )
        .unwrap();

        let pricing = view.state.order.pricing().unwrap();
        assert_eq!(pricing.discount.cents(), 54_999);
        assert_eq!(
            view.summary.as_deref(),
            Some("5x 20L Ethanol (E95) - Premium Grade - R2199.96")
        );
    }

    #[test]
    fn test_quantity_bounds() {
        let session = WizardSession::new();

        let zero = ProductDetails::new(ProductType::Ethanol, PackageFormat::Bottle, 0);
        assert_eq!(
            set_product_details(&session, zero).unwrap_err().code,
            ErrorCode::ValidationError
        );

        let too_many = ProductDetails::new(ProductType::Methanol, PackageFormat::Barrel, 11);
        assert!(set_product_details(&session, too_many).is_err());

        let max = ProductDetails::new(ProductType::Methanol, PackageFormat::Barrel, 10);
        assert!(set_product_details(&session, max).is_ok());
    }

    #[test]
    fn test_delivery_is_stored() {
        let session = WizardSession::new();
        let view =
            set_delivery_details(&session, DeliveryDetails::new(DeliveryType::SameDay)).unwrap();
        assert_eq!(
            view.state.order.delivery().map(|d| d.delivery_type),
            Some(DeliveryType::SameDay)
        );
    }
}
