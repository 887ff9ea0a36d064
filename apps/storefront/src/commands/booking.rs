//! # Booking Commands
//!
//! The car rental flow.
//!
//! ## Booking Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Booking Lifecycle                                    │
//! │                                                                         │
//! │  Car page                Booking form               Profile             │
//! │  ────────                ────────────               ───────             │
//! │  quote_rental (live)                                                    │
//! │  start_booking ─────────► confirm_booking ─────────► booking_history    │
//! │       │                        │                                        │
//! │       │ rental form            │ driver + payment                       │
//! │       │ incomplete             │ incomplete                             │
//! │       ▼                        ▼                                        │
//! │  "Missing Information"   "Missing Information" /                        │
//! │  "Missing Time"          "Payment Information Required"                 │
//! │                                                                         │
//! │  cancel_booking drops the draft without touching history.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use storefront_core::validation::{
    checkout_failure, validate_rental_request, CheckoutDetails, CheckoutSection,
};
use storefront_core::{BookingDraft, BookingPhase, DurationType, Money, RentalRequest, ValidationError};
use storefront_store::StorageBackend;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::notify::Toast;
use crate::state::{AppState, ConfigState};

// =============================================================================
// Request / Response Types
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartBookingRequest {
    pub car_id: u32,
    #[serde(flatten)]
    pub rental: RentalRequest,
    pub pickup_location: String,
}

/// The draft slot as the booking form sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub phase: BookingPhase,
    pub current_booking: Option<BookingDraft>,
    pub formatted_cost: Option<String>,
}

impl BookingResponse {
    fn new(draft: Option<&BookingDraft>, config: &ConfigState) -> Self {
        BookingResponse {
            phase: if draft.is_some() {
                BookingPhase::Drafted
            } else {
                BookingPhase::Empty
            },
            formatted_cost: draft.map(|d| config.format_money(d.total_cost)),
            current_booking: draft.cloned(),
        }
    }
}

/// Live price shown while the rental form is being filled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub car_id: u32,
    pub duration: i64,
    pub duration_type: DurationType,
    pub total_cost: Money,
    pub formatted_cost: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmResponse {
    pub booking: BookingDraft,
    pub history_count: usize,
}

// =============================================================================
// Commands
// =============================================================================

/// Prices a rental without storing anything.
///
/// Incomplete dates give a zero duration and cost.
pub fn quote_rental<B: StorageBackend>(
    state: &AppState<B>,
    car_id: u32,
    rental: &RentalRequest,
) -> Result<QuoteResponse, ApiError> {
    debug!(car_id = %car_id, duration_type = %rental.duration_type, "quote_rental command");

    let car = state.catalog.car(car_id)?;
    let duration = rental.duration()?;
    let total_cost = state.booking.with_booking(|b| {
        b.calculate_cost(car.price_per_day, car.price_per_hour, duration, rental.duration_type)
    });

    Ok(QuoteResponse {
        car_id,
        duration,
        duration_type: rental.duration_type,
        total_cost,
        formatted_cost: state.config.format_money(total_cost),
    })
}

/// Builds a draft from the car page and puts it in the slot.
///
/// Replaces any draft already there.
///
/// ## Errors
/// - `NOT_FOUND`: unknown car
/// - `BOOKING_ERROR`: car not available
/// - `VALIDATION_ERROR`: missing dates, location or (hourly) times, or a
///   malformed date/time
pub fn start_booking<B: StorageBackend>(
    state: &mut AppState<B>,
    request: StartBookingRequest,
) -> Result<BookingResponse, ApiError> {
    debug!(car_id = %request.car_id, "start_booking command");

    let car = state.catalog.car(request.car_id)?;
    if !car.available {
        return Err(ApiError::booking(format!("{} is not available", car.name)));
    }

    if let Err(err) = validate_rental_request(&request.rental, &request.pickup_location) {
        state.notify(rental_form_toast(&err));
        return Err(err.into());
    }

    let draft = BookingDraft::for_car(car, &request.rental, &request.pickup_location)?;

    let config = &state.config;
    let response = state.booking.with_booking_mut(|b| {
        b.set_current_booking(draft);
        BookingResponse::new(b.current_booking(), config)
    });

    Ok(response)
}

pub fn get_booking<B: StorageBackend>(state: &AppState<B>) -> BookingResponse {
    debug!("get_booking command");
    state
        .booking
        .with_booking(|b| BookingResponse::new(b.current_booking(), &state.config))
}

/// Drops the current draft, if any.
pub fn cancel_booking<B: StorageBackend>(state: &mut AppState<B>) -> BookingResponse {
    debug!("cancel_booking command");
    let config = &state.config;
    state.booking.with_booking_mut(|b| {
        b.clear_current_booking();
        BookingResponse::new(b.current_booking(), config)
    })
}

/// Confirms the current draft once driver and payment details are complete.
///
/// ## Errors
/// - `BOOKING_ERROR`: no draft in the slot
/// - `VALIDATION_ERROR`: a checkout field is blank (the draft stays put)
pub fn confirm_booking<B: StorageBackend>(
    state: &mut AppState<B>,
    details: &CheckoutDetails,
) -> Result<ConfirmResponse, ApiError> {
    debug!("confirm_booking command");

    let draft = state
        .booking
        .with_booking(|b| b.current_booking().cloned())
        .ok_or_else(|| ApiError::booking("No booking in progress"))?;

    if let Some((section, err)) = checkout_failure(details) {
        state.notify(checkout_toast(section));
        return Err(err.into());
    }

    let history_count = state.booking.with_booking_mut(|b| {
        b.add_to_history(draft.clone());
        b.booking_history().len()
    });

    info!(car_id = %draft.car_id, total_cost = %draft.total_cost, "Booking confirmed");
    state.notify(Toast::success(
        "Booking Confirmed!",
        format!("Your {} has been booked successfully.", draft.car_name),
    ));

    Ok(ConfirmResponse {
        booking: draft,
        history_count,
    })
}

/// Confirmed bookings, newest first.
pub fn booking_history<B: StorageBackend>(state: &AppState<B>) -> Vec<BookingDraft> {
    debug!("booking_history command");
    state.booking.with_booking(|b| b.booking_history().to_vec())
}

// =============================================================================
// Toasts
// =============================================================================

fn rental_form_toast(err: &ValidationError) -> Toast {
    let missing_time = matches!(
        err,
        ValidationError::Required { field } if field == "startTime" || field == "endTime"
    );
    if missing_time {
        Toast::destructive(
            "Missing Time",
            "Please select start and end times for hourly rental.",
        )
    } else {
        Toast::destructive(
            "Missing Information",
            "Please fill in all required booking details.",
        )
    }
}

fn checkout_toast(section: CheckoutSection) -> Toast {
    match section {
        CheckoutSection::Driver => {
            Toast::destructive("Missing Information", "Please fill in all required fields.")
        }
        CheckoutSection::Payment => Toast::destructive(
            "Payment Information Required",
            "Please complete the payment details.",
        ),
    }
}
