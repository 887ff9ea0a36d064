//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Command Function ── Result<T, ApiError>                                │
//! │         │                                                               │
//! │         ├── Catalog lookup?   CoreError::ProductNotFound ──┐            │
//! │         ├── Bad form input?   ValidationError::Required  ──┤            │
//! │         ├── Snapshot write?   StoreError::Io             ──┼─► ApiError │
//! │         └── Success ──────────────────────────────────────────► T       │
//! │                                                                         │
//! │  CLI prints:   [NOT_FOUND] Product not found: 42                        │
//! │  JSON shape:   { "code": "NOT_FOUND", "message": "..." }                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::{CoreError, ValidationError};
use storefront_store::StoreError;

/// Error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "pickupLocation is required"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Catalog entry not found
    NotFound,

    /// Caller input failed a required-field or format check
    ValidationError,

    /// Snapshot could not be written
    StorageError,

    /// Cart operation refused (e.g. out of stock)
    CartError,

    /// Booking flow out of order (e.g. confirm with no draft)
    BookingError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// The serialized name, as shown in CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::CartError => "CART_ERROR",
            ErrorCode::BookingError => "BOOKING_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }

    pub fn booking(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BookingError, message)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            CoreError::CarNotFound(id) => ApiError::not_found("Car", id),
            CoreError::CategoryNotFound(slug) => ApiError::not_found("Category", slug),
            err @ CoreError::VariantNotFound { .. } => ApiError::new(ErrorCode::NotFound, err.to_string()),
            err @ (CoreError::InvalidDate(_) | CoreError::InvalidTime(_)) => {
                ApiError::validation(err.to_string())
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        // Full detail goes to the log, the caller gets a generic message
        tracing::error!(error = %err, "Store operation failed");
        match err {
            StoreError::InvalidKey(key) => {
                ApiError::internal(format!("Invalid storage key: {}", key))
            }
            StoreError::Io(_) | StoreError::Serialization(_) => {
                ApiError::new(ErrorCode::StorageError, "Failed to save storefront data")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_screaming_code() {
        let err = ApiError::not_found("Product", 42);
        assert_eq!(err.to_string(), "[NOT_FOUND] Product not found: 42");
    }

    #[test]
    fn test_serialized_code_matches_display() {
        let err = ApiError::booking("No booking in progress");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "BOOKING_ERROR");
        assert_eq!(json["code"], err.code.as_str());
    }

    #[test]
    fn test_from_core_error() {
        let err: ApiError = CoreError::InvalidDate("2024-13-01".into()).into();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err: ApiError = CoreError::from(ValidationError::required("email")).into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "email is required");

        let err: ApiError = CoreError::VariantNotFound {
            product_id: 3,
            value: "Purple".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_from_store_error_hides_detail() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err: ApiError = StoreError::Io(io).into();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(!err.message.contains("disk on fire"));
    }
}
