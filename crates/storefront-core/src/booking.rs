//! # Booking Store
//!
//! Rental booking state of the car storefront: one draft slot plus an
//! append-only history.
//!
//! ## Draft Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Booking Draft Lifecycle                              │
//! │                                                                         │
//! │  ┌──────────┐  set_current_booking  ┌──────────┐  add_to_history        │
//! │  │  Empty   │──────────────────────►│ Drafted  │───────────────────┐    │
//! │  │          │◄──────────────────────│          │                   │    │
//! │  └──────────┘ clear_current_booking └──────────┘                   ▼    │
//! │       ▲                                  │ set_current_booking ┌───────┐│
//! │       │                                  └──(replaces draft)   │Archive││
//! │       └────────────── slot cleared ◄───────────────────────────│(hist.)││
//! │                                                                └───────┘│
//! │                                                                         │
//! │  Archived drafts are immutable; history is newest first.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Like the cart, nothing here fails: the slot is last-write-wins and the
//! cost function does no validation.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Car;

// =============================================================================
// Duration Type
// =============================================================================

/// Whether a rental is billed per day or per hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum DurationType {
    #[default]
    Days,
    Hours,
}

impl fmt::Display for DurationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationType::Days => write!(f, "days"),
            DurationType::Hours => write!(f, "hours"),
        }
    }
}

impl FromStr for DurationType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "days" | "day" | "daily" => Ok(DurationType::Days),
            "hours" | "hour" | "hourly" => Ok(DurationType::Hours),
            other => Err(ValidationError::InvalidFormat {
                field: "durationType".to_string(),
                reason: format!("'{}' is not one of: days, hours", other),
            }),
        }
    }
}

/// Rental cost: `price_per_day × duration` for daily rentals, otherwise
/// `price_per_hour × duration`.
///
/// Pure. No rounding beyond whole cents and no guard against a negative
/// duration.
///
/// ## Example
/// ```rust
/// use storefront_core::booking::{calculate_cost, DurationType};
/// use storefront_core::money::Money;
///
/// let day = Money::from_major_minor(100, 0);
/// let hour = Money::from_major_minor(20, 0);
///
/// assert_eq!(calculate_cost(day, hour, 3, DurationType::Days).cents(), 30000);
/// assert_eq!(calculate_cost(day, hour, 3, DurationType::Hours).cents(), 6000);
/// ```
pub fn calculate_cost(
    price_per_day: Money,
    price_per_hour: Money,
    duration: i64,
    duration_type: DurationType,
) -> Money {
    match duration_type {
        DurationType::Days => price_per_day * duration,
        DurationType::Hours => price_per_hour * duration,
    }
}

// =============================================================================
// Rental Request
// =============================================================================

/// The pickup/return window a renter picked on the car page.
///
/// Dates are `YYYY-MM-DD`, times `HH:MM`. Blank strings mean "not picked
/// yet" and give a zero duration, so a half-filled form still shows a cost.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RentalRequest {
    pub start_date: String,
    pub end_date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub duration_type: DurationType,
}

impl RentalRequest {
    /// Billable units between pickup and return.
    ///
    /// ## Rules
    /// - `days`: whole calendar days between the dates
    /// - `hours`: hours between date+time pairs, rounded up
    /// - Order does not matter (absolute difference)
    /// - Any blank input ⇒ 0
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::booking::{DurationType, RentalRequest};
    ///
    /// let request = RentalRequest {
    ///     start_date: "2024-06-01".into(),
    ///     end_date: "2024-06-01".into(),
    ///     start_time: Some("10:00".into()),
    ///     end_time: Some("13:30".into()),
    ///     duration_type: DurationType::Hours,
    /// };
    /// assert_eq!(request.duration().unwrap(), 4);
    /// ```
    pub fn duration(&self) -> CoreResult<i64> {
        if is_blank(&self.start_date) || is_blank(&self.end_date) {
            return Ok(0);
        }

        let start_date = parse_date(&self.start_date)?;
        let end_date = parse_date(&self.end_date)?;

        match self.duration_type {
            DurationType::Days => Ok((end_date - start_date).num_days().abs()),
            DurationType::Hours => {
                let (Some(start_time), Some(end_time)) = (
                    non_blank(self.start_time.as_deref()),
                    non_blank(self.end_time.as_deref()),
                ) else {
                    return Ok(0);
                };

                let start = NaiveDateTime::new(start_date, parse_time(start_time)?);
                let end = NaiveDateTime::new(end_date, parse_time(end_time)?);
                let seconds = (end - start).num_seconds().abs();
                Ok((seconds + 3599) / 3600)
            }
        }
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(s: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| CoreError::InvalidDate(s.to_string()))
}

fn parse_time(s: &str) -> CoreResult<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|_| CoreError::InvalidTime(s.to_string()))
}

// =============================================================================
// Booking Draft
// =============================================================================

/// A rental the user is about to confirm.
///
/// Has no id of its own; once archived it is identified by its position in
/// the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BookingDraft {
    pub car_id: u32,
    pub car_name: String,
    pub car_image: String,
    pub price_per_day: Money,
    pub price_per_hour: Money,
    pub start_date: String,
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub duration: i64,
    pub duration_type: DurationType,
    pub total_cost: Money,
    pub pickup_location: String,
    pub dropoff_location: String,
}

impl BookingDraft {
    /// Builds the draft the car page hands to the booking store.
    ///
    /// - duration and cost come from [`RentalRequest::duration`] and
    ///   [`calculate_cost`]
    /// - drop-off is the pickup location
    /// - times are kept only for hourly rentals
    pub fn for_car(car: &Car, request: &RentalRequest, pickup_location: &str) -> CoreResult<Self> {
        let duration = request.duration()?;
        let hourly = request.duration_type == DurationType::Hours;

        Ok(BookingDraft {
            car_id: car.id,
            car_name: car.name.clone(),
            car_image: car.image.clone(),
            price_per_day: car.price_per_day,
            price_per_hour: car.price_per_hour,
            start_date: request.start_date.clone(),
            end_date: request.end_date.clone(),
            start_time: request.start_time.clone().filter(|_| hourly),
            end_time: request.end_time.clone().filter(|_| hourly),
            duration,
            duration_type: request.duration_type,
            total_cost: calculate_cost(
                car.price_per_day,
                car.price_per_hour,
                duration,
                request.duration_type,
            ),
            pickup_location: pickup_location.to_string(),
            dropoff_location: pickup_location.to_string(),
        })
    }
}

// =============================================================================
// Booking State
// =============================================================================

/// Which state the draft slot is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum BookingPhase {
    Empty,
    Drafted,
}

/// The booking store: current draft slot and confirmed history.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BookingState {
    #[serde(default)]
    current_booking: Option<BookingDraft>,
    /// Newest first.
    #[serde(default)]
    booking_history: Vec<BookingDraft>,
}

impl BookingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_booking(&self) -> Option<&BookingDraft> {
        self.current_booking.as_ref()
    }

    pub fn booking_history(&self) -> &[BookingDraft] {
        &self.booking_history
    }

    pub fn phase(&self) -> BookingPhase {
        match self.current_booking {
            Some(_) => BookingPhase::Drafted,
            None => BookingPhase::Empty,
        }
    }

    /// Puts `draft` in the slot, replacing whatever was there.
    pub fn set_current_booking(&mut self, draft: BookingDraft) {
        self.current_booking = Some(draft);
    }

    /// Discards the current draft, if any.
    pub fn clear_current_booking(&mut self) {
        self.current_booking = None;
    }

    /// Confirms `draft`: prepends it to the history and clears the slot.
    ///
    /// The slot is cleared even when it held a different draft.
    pub fn add_to_history(&mut self, draft: BookingDraft) {
        self.booking_history.insert(0, draft);
        self.current_booking = None;
    }

    /// See [`calculate_cost`].
    pub fn calculate_cost(
        &self,
        price_per_day: Money,
        price_per_hour: Money,
        duration: i64,
        duration_type: DurationType,
    ) -> Money {
        calculate_cost(price_per_day, price_per_hour, duration, duration_type)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FuelType, Transmission};

    fn dollars(d: i64) -> Money {
        Money::from_major_minor(d, 0)
    }

    fn sedan() -> Car {
        Car {
            id: 4,
            name: "Tesla Model 3".into(),
            brand: "Tesla".into(),
            model: "Model 3".into(),
            year: 2023,
            price_per_day: dollars(100),
            price_per_hour: dollars(20),
            image: "/cars/model3.jpg".into(),
            category: "Electric".into(),
            category_slug: "electric".into(),
            fuel_type: FuelType::Electric,
            transmission: Transmission::Automatic,
            seating_capacity: 5,
            rating: 4.8,
            available: true,
            location: "Downtown".into(),
            featured: true,
        }
    }

    fn days(start: &str, end: &str) -> RentalRequest {
        RentalRequest {
            start_date: start.into(),
            end_date: end.into(),
            start_time: None,
            end_time: None,
            duration_type: DurationType::Days,
        }
    }

    fn hours(date: &str, start: &str, end: &str) -> RentalRequest {
        RentalRequest {
            start_date: date.into(),
            end_date: date.into(),
            start_time: Some(start.into()),
            end_time: Some(end.into()),
            duration_type: DurationType::Hours,
        }
    }

    fn draft(car_id: u32) -> BookingDraft {
        let mut car = sedan();
        car.id = car_id;
        BookingDraft::for_car(&car, &days("2024-01-01", "2024-01-04"), "Airport").unwrap()
    }

    #[test]
    fn test_calculate_cost() {
        assert_eq!(calculate_cost(dollars(100), dollars(20), 3, DurationType::Days), dollars(300));
        assert_eq!(calculate_cost(dollars(100), dollars(20), 3, DurationType::Hours), dollars(60));
        // no guard against negative durations
        assert_eq!(calculate_cost(dollars(100), dollars(20), -1, DurationType::Days), dollars(-100));
    }

    #[test]
    fn test_day_duration() {
        assert_eq!(days("2024-01-01", "2024-01-04").duration().unwrap(), 3);
        assert_eq!(days("2024-01-04", "2024-01-01").duration().unwrap(), 3);
        assert_eq!(days("2024-02-28", "2024-03-01").duration().unwrap(), 2);
        assert_eq!(days("2024-01-01", "").duration().unwrap(), 0);
    }

    #[test]
    fn test_hour_duration_rounds_up() {
        assert_eq!(hours("2024-06-01", "10:00", "13:30").duration().unwrap(), 4);
        assert_eq!(hours("2024-06-01", "10:00", "12:00").duration().unwrap(), 2);

        let overnight = RentalRequest {
            end_date: "2024-06-02".into(),
            ..hours("2024-06-01", "22:00", "01:00")
        };
        assert_eq!(overnight.duration().unwrap(), 3);
    }

    #[test]
    fn test_hour_duration_without_times_is_zero() {
        let mut request = hours("2024-06-01", "10:00", "12:00");
        request.end_time = None;
        assert_eq!(request.duration().unwrap(), 0);
    }

    #[test]
    fn test_bad_dates_and_times() {
        assert!(matches!(
            days("01/02/2024", "2024-01-04").duration(),
            Err(CoreError::InvalidDate(_))
        ));
        assert!(matches!(
            hours("2024-06-01", "10am", "12:00").duration(),
            Err(CoreError::InvalidTime(_))
        ));
    }

    #[test]
    fn test_draft_for_car() {
        let daily = BookingDraft::for_car(&sedan(), &days("2024-01-01", "2024-01-04"), "Airport").unwrap();
        assert_eq!(daily.duration, 3);
        assert_eq!(daily.total_cost, dollars(300));
        assert_eq!(daily.dropoff_location, "Airport");
        assert_eq!(daily.start_time, None);

        let mut request = hours("2024-06-01", "10:00", "13:00");
        let hourly = BookingDraft::for_car(&sedan(), &request, "Downtown").unwrap();
        assert_eq!(hourly.total_cost, dollars(60));
        assert_eq!(hourly.start_time.as_deref(), Some("10:00"));

        // times picked before switching to daily billing are dropped
        request.duration_type = DurationType::Days;
        let switched = BookingDraft::for_car(&sedan(), &request, "Downtown").unwrap();
        assert_eq!(switched.start_time, None);
        assert_eq!(switched.end_time, None);
    }

    #[test]
    fn test_set_current_is_last_write_wins() {
        let mut state = BookingState::new();
        assert_eq!(state.phase(), BookingPhase::Empty);

        state.set_current_booking(draft(1));
        state.set_current_booking(draft(2));

        assert_eq!(state.phase(), BookingPhase::Drafted);
        assert_eq!(state.current_booking().map(|d| d.car_id), Some(2));

        state.clear_current_booking();
        assert_eq!(state.phase(), BookingPhase::Empty);
        assert!(state.booking_history().is_empty());
    }

    #[test]
    fn test_add_to_history_prepends_and_clears_slot() {
        let mut state = BookingState::new();
        state.add_to_history(draft(1));

        state.set_current_booking(draft(3));
        state.add_to_history(draft(2));

        assert_eq!(state.booking_history()[0], draft(2));
        assert_eq!(state.booking_history()[1], draft(1));
        assert!(state.current_booking().is_none());
    }

    #[test]
    fn test_duration_type_parsing() {
        assert_eq!("days".parse::<DurationType>().unwrap(), DurationType::Days);
        assert_eq!("Hours".parse::<DurationType>().unwrap(), DurationType::Hours);
        assert!("weeks".parse::<DurationType>().is_err());
    }

    #[test]
    fn test_snapshot_shape() {
        let mut state = BookingState::new();
        state.set_current_booking(draft(1));
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["currentBooking"]["durationType"], "days");
        assert_eq!(json["currentBooking"]["totalCost"], 30000);
        assert_eq!(json["bookingHistory"], serde_json::json!([]));

        let back: BookingState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
