//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Catalog lookups, date parsing                  │
//! │  └── ValidationError  - Missing / malformed caller input               │
//! │                                                                         │
//! │  storefront-store errors (separate crate)                              │
//! │  └── StoreError       - Snapshot read/write failures                   │
//! │                                                                         │
//! │  App errors                                                            │
//! │  └── ApiError         - What the CLI / front-end sees                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Notification           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart and booking stores never return these: every store operation is
//! total. Errors only come from the code around the stores (catalog lookups,
//! date parsing, required-field checks).

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by the logic surrounding the stores.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(u32),

    /// Car id is not in the catalog.
    #[error("Car not found: {0}")]
    CarNotFound(u32),

    /// Category slug is not in the catalog.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// The product exists but has no variant with this value.
    ///
    /// ## When This Occurs
    /// ```text
    /// add_to_cart(product: 3, variant: "Purple")
    ///      │
    ///      ▼
    /// Product 3 offers colors: Black, Silver
    ///      │
    ///      ▼
    /// VariantNotFound { product_id: 3, value: "Purple" }
    /// ```
    #[error("Product {product_id} has no variant '{value}'")]
    VariantNotFound { product_id: u32, value: String },

    /// A rental date is not `YYYY-MM-DD`.
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A rental time is not `HH:MM`.
    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the caller-side checks in [`crate::validation`] before a store
/// operation is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g. unknown duration type).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value outside the allowed range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::VariantNotFound {
            product_id: 3,
            value: "Purple".to_string(),
        };
        assert_eq!(err.to_string(), "Product 3 has no variant 'Purple'");
        assert_eq!(
            CoreError::InvalidDate("tomorrow".into()).to_string(),
            "Invalid date 'tomorrow', expected YYYY-MM-DD"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::required("pickupLocation").to_string(),
            "pickupLocation is required"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("email").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
