//! # Validation Module
//!
//! Required-field checks run by the command layer before it touches a store.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Car detail form ──► validate_rental_request ──► set_current_booking    │
//! │                            │                                            │
//! │                            └── Err ──► "Missing Information" toast      │
//! │                                                                         │
//! │  Checkout form   ──► validate_checkout_details ──► add_to_history       │
//! │                            │                                            │
//! │                            └── Err ──► "Payment Information Required"   │
//! │                                                                         │
//! │  The stores themselves accept anything.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every check trims its input; whitespace-only counts as missing. Fields are
//! checked in form order and the first missing one is reported.
//!
//! ## Usage
//! ```rust
//! use storefront_core::booking::{DurationType, RentalRequest};
//! use storefront_core::validation::validate_rental_request;
//!
//! let request = RentalRequest {
//!     start_date: "2024-06-01".into(),
//!     end_date: "2024-06-03".into(),
//!     duration_type: DurationType::Days,
//!     ..Default::default()
//! };
//! assert!(validate_rental_request(&request, "Downtown").is_ok());
//! assert!(validate_rental_request(&request, "  ").is_err());
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::booking::{DurationType, RentalRequest};
use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Helpers
// =============================================================================

fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

fn require_opt(field: &str, value: Option<&str>) -> ValidationResult<()> {
    require(field, value.unwrap_or_default())
}

// =============================================================================
// Quantity
// =============================================================================

/// Largest quantity a single add-to-cart may request.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Checks the quantity picker of the product page.
///
/// The cart store itself accepts any quantity; this guards the one-shot add.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Rental Request
// =============================================================================

/// Checks the car detail form before a draft is built.
///
/// ## Rules
/// - `startDate`, `endDate`, `pickupLocation` are always required
/// - `startTime`, `endTime` are required for hourly rentals only
///
/// Formats are not checked here; [`RentalRequest::duration`] rejects
/// malformed dates and times.
pub fn validate_rental_request(request: &RentalRequest, pickup_location: &str) -> ValidationResult<()> {
    require("startDate", &request.start_date)?;
    require("endDate", &request.end_date)?;
    require("pickupLocation", pickup_location)?;

    if request.duration_type == DurationType::Hours {
        require_opt("startTime", request.start_time.as_deref())?;
        require_opt("endTime", request.end_time.as_deref())?;
    }

    Ok(())
}

// =============================================================================
// Checkout Details
// =============================================================================

/// Driver and payment details entered on the booking form.
///
/// Never stored: only the draft moves into history once these pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct CheckoutDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub cardholder_name: String,
}

impl CheckoutDetails {
    /// Payment fields as `(field, value)` pairs in form order.
    fn payment_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("cardNumber", self.card_number.as_str()),
            ("expiryDate", self.expiry_date.as_str()),
            ("cvv", self.cvv.as_str()),
            ("cardholderName", self.cardholder_name.as_str()),
        ]
    }

    fn driver_fields(&self) -> [(&'static str, &str); 5] {
        [
            ("firstName", self.first_name.as_str()),
            ("lastName", self.last_name.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("licenseNumber", self.license_number.as_str()),
        ]
    }
}

/// Which section of the checkout form failed.
///
/// The app picks the toast title from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutSection {
    Driver,
    Payment,
}

/// Checks the booking form before the draft is archived.
///
/// Driver fields are checked before payment fields. On failure, the error
/// names the first blank field.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::{validate_checkout_details, CheckoutDetails};
/// use storefront_core::ValidationError;
///
/// let details = CheckoutDetails {
///     first_name: "Ada".into(),
///     ..Default::default()
/// };
/// assert_eq!(
///     validate_checkout_details(&details),
///     Err(ValidationError::required("lastName"))
/// );
/// ```
pub fn validate_checkout_details(details: &CheckoutDetails) -> ValidationResult<()> {
    checkout_failure(details).map_or(Ok(()), |(_, err)| Err(err))
}

/// Like [`validate_checkout_details`], also reporting the failing section.
pub fn checkout_failure(details: &CheckoutDetails) -> Option<(CheckoutSection, ValidationError)> {
    let driver = details
        .driver_fields()
        .into_iter()
        .map(|field| (CheckoutSection::Driver, field));
    let payment = details
        .payment_fields()
        .into_iter()
        .map(|field| (CheckoutSection::Payment, field));

    driver
        .chain(payment)
        .find_map(|(section, (field, value))| require(field, value).err().map(|err| (section, err)))
}

// =============================================================================
// Unit Tests
// =============================================================================
