//! # Checkout Scripts
//!
//! A recorded sequence of customer actions, replayed through the commands.
//! Used by the headless driver in place of a rendering layer.
//!
//! ## Script Format
//! ```json
//! [
//!   { "action": "setCustomerDetails", "name": "Thandi", "surname": "Nkosi",
//!     "phone": "0821234567", "email": "thandi@example.co.za",
//!     "address": "12 Long Street, Cape Town" },
//!   { "action": "advance" },
//!   { "action": "setProductDetails", "type": "ethanol", "format": "bottle", "quantity": 5 },
//!   { "action": "advance" },
//!   { "action": "setDeliveryDetails", "type": "standard" },
//!   { "action": "advance" },
//!   { "action": "confirm" },
//!   { "action": "advance" },
//!   { "action": "submit" }
//! ]
//! ```
//!
//! A rejected action is logged and recorded; the script carries on, the way
//! a customer would after seeing an error.

use std::path::{Path, PathBuf};

use dsfuel_core::catalog::{DeliveryType, PackageFormat, ProductType};
use dsfuel_core::order::{CustomerDetails, DeliveryDetails, ProductDetails};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::commands::{order, wizard};
use crate::error::ApiError;
use crate::gateway::OrderGateway;
use crate::state::WizardSession;

/// Script loading failures.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse script: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One customer action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ScriptAction {
    SetCustomerDetails(CustomerDetails),
    SetProductDetails(ProductDetails),
    SetDeliveryDetails(DeliveryDetails),
    Next,
    Advance,
    Previous,
    GoTo { step: usize },
    Confirm,
    Submit,
    Reset,
}

/// An action the wizard refused.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedAction {
    /// Zero-based position in the script.
    pub index: usize,
    pub action: ScriptAction,
    pub error: ApiError,
}

/// Reads a script file.
pub fn load_script(path: &Path) -> Result<Vec<ScriptAction>, ScriptError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&contents)
}

/// Parses a script from JSON text.
pub fn parse_script(json: &str) -> Result<Vec<ScriptAction>, ScriptError> {
    Ok(serde_json::from_str(json)?)
}

/// The order placed when no script is given.
pub fn demo_script() -> Vec<ScriptAction> {
    vec![
        ScriptAction::SetCustomerDetails(CustomerDetails {
            name: "Thandi".to_string(),
            surname: "Nkosi".to_string(),
            phone: "082 123 4567".to_string(),
            email: "thandi@example.co.za".to_string(),
            address: "12 Long Street, Cape Town".to_string(),
        }),
        ScriptAction::Advance,
        ScriptAction::SetProductDetails(ProductDetails::new(
            ProductType::Ethanol,
            PackageFormat::Bottle,
            5,
        )),
        ScriptAction::Advance,
        ScriptAction::SetDeliveryDetails(DeliveryDetails::new(DeliveryType::Standard)),
        ScriptAction::Advance,
        ScriptAction::Confirm,
        ScriptAction::Advance,
        ScriptAction::Submit,
        ScriptAction::Advance,
    ]
}

/// Replays `actions` against `session`, returning the ones that were refused.
pub async fn run_script<G: OrderGateway>(
    session: &WizardSession,
    gateway: &G,
    actions: &[ScriptAction],
) -> Vec<RejectedAction> {
    let mut rejected = Vec::new();

    for (index, action) in actions.iter().enumerate() {
        let result = match action.clone() {
            ScriptAction::SetCustomerDetails(details) => {
                order::set_customer_details(session, details)
            }
            ScriptAction::SetProductDetails(details) => order::set_product_details(session, details),
            ScriptAction::SetDeliveryDetails(details) => {
                order::set_delivery_details(session, details)
            }
            ScriptAction::Next => wizard::next_step(session),
            ScriptAction::Advance => wizard::advance(session),
            ScriptAction::Previous => wizard::previous_step(session),
            ScriptAction::GoTo { step } => wizard::go_to_step(session, step),
            ScriptAction::Confirm => wizard::confirm_order(session),
            ScriptAction::Submit => wizard::submit_order(session, gateway).await,
            ScriptAction::Reset => wizard::reset_order(session),
        };

        match result {
            Ok(view) => info!(
                index,
                step = %view.state.current_step,
                can_proceed = view.can_proceed,
                "Script action applied"
            ),
            Err(error) => {
                warn!(index, %error, "Script action rejected");
                rejected.push(RejectedAction {
                    index,
                    action: action.clone(),
                    error,
                });
            }
        }
    }

    rejected
}
