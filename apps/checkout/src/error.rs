//! # API Error Type
//!
//! Unified error type for checkout commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Checkout                           │
//! │                                                                         │
//! │  Rendering layer             Rust Backend                               │
//! │  ───────────────             ────────────                               │
//! │                                                                         │
//! │  advance()                                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<WizardView, ApiError>                                    │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Step not ready? ─── CoreError::StepIncomplete ────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Form invalid? ─── CustomerFormErrors ──────────── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  e.code = "STEP_INCOMPLETE"                                             │
//! │  e.message = "Step 'Customer Details' is not complete"                  │
//! │  e.fieldErrors = [{ field: "email", message: "Email is required" }]     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use dsfuel_core::error::FieldError;
use dsfuel_core::wizard::SUBMISSION_FAILED_MESSAGE;
use dsfuel_core::{CoreError, CustomerFormErrors};
use serde::Serialize;
use ts_rs::TS;

use crate::gateway::SubmissionError;
use crate::state::ConfigError;

/// API error returned from checkout commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "2 customer field(s) invalid",
///   "fieldErrors": [
///     { "field": "email", "message": "Please enter a valid email address" },
///     { "field": "phone", "message": "Phone number is required" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Messages to show under individual form inputs
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldError>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// Guarded advance on an unfinished step
    StepIncomplete,

    /// Confirmation with sections missing
    OrderIncomplete,

    /// Step index outside the wizard
    StepOutOfRange,

    /// The order gateway rejected the order
    SubmissionError,

    /// Configuration could not be loaded
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::StepIncomplete { .. } => ErrorCode::StepIncomplete,
            CoreError::OrderIncomplete { .. } => ErrorCode::OrderIncomplete,
            CoreError::StepOutOfRange { .. } => ErrorCode::StepOutOfRange,
            CoreError::QuantityTooLarge { .. } => ErrorCode::ValidationError,
            CoreError::InvalidOrderId(_) => ErrorCode::ValidationError,
            CoreError::Validation(e) => return ApiError::validation(e.to_string()),
        };
        ApiError::new(code, err.to_string())
    }
}

/// Carries every field message so the form can show them all at once.
impl From<CustomerFormErrors> for ApiError {
    fn from(errors: CustomerFormErrors) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: errors.to_string(),
            field_errors: errors.errors,
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        tracing::error!("Configuration error: {}", err);
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

/// The customer sees the retry message; the gateway detail is only logged.
impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        tracing::warn!("Submission error: {}", err);
        ApiError::new(ErrorCode::SubmissionError, SUBMISSION_FAILED_MESSAGE)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
