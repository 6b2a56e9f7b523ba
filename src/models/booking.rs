//! Booking model, status/state enums and related types

use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{
    encode::IsNull,
    error::BoxDynError,
    postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef},
    Decode, Encode, FromRow, Postgres,
};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{item::Item, pagination::PageQuery, user::User};
use crate::error::AppError;

// ---------------------------------------------------------------------------
// BookingStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a booking, stored as its upper-case name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
    Canceled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
            BookingStatus::Canceled => "CANCELED",
        }
    }

    /// Whether the booking still occupies the item
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Waiting | BookingStatus::Approved)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(BookingStatus::Waiting),
            "APPROVED" => Ok(BookingStatus::Approved),
            "REJECTED" => Ok(BookingStatus::Rejected),
            "CANCELED" => Ok(BookingStatus::Canceled),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

// SQLx conversion for BookingStatus
impl sqlx::Type<Postgres> for BookingStatus {
    fn type_info() -> PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for BookingStatus {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let s = <&str as Decode<Postgres>>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for BookingStatus {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> IsNull {
        <&str as Encode<Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

// ---------------------------------------------------------------------------
// BookingState
// ---------------------------------------------------------------------------

/// Filter selected by the `state` query parameter of booking lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingState {
    #[default]
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl FromStr for BookingState {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ALL" => Ok(BookingState::All),
            "CURRENT" => Ok(BookingState::Current),
            "PAST" => Ok(BookingState::Past),
            "FUTURE" => Ok(BookingState::Future),
            "WAITING" => Ok(BookingState::Waiting),
            "REJECTED" => Ok(BookingState::Rejected),
            _ => Err(AppError::UnknownState(s.to_string())),
        }
    }
}

/// Row predicate a [`BookingState`] translates to at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingFilter {
    Any,
    /// `start <= t AND end > t`
    ActiveAt(NaiveDateTime),
    /// `end < t`
    EndedBefore(NaiveDateTime),
    /// `start > t`
    StartsAfter(NaiveDateTime),
    Status(BookingStatus),
}

impl BookingState {
    pub fn filter(self, now: NaiveDateTime) -> BookingFilter {
        match self {
            BookingState::All => BookingFilter::Any,
            BookingState::Current => BookingFilter::ActiveAt(now),
            BookingState::Past => BookingFilter::EndedBefore(now),
            BookingState::Future => BookingFilter::StartsAfter(now),
            BookingState::Waiting => BookingFilter::Status(BookingStatus::Waiting),
            BookingState::Rejected => BookingFilter::Status(BookingStatus::Rejected),
        }
    }
}

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

/// Booking model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i64,
    #[sqlx(rename = "start_date")]
    pub start: NaiveDateTime,
    #[sqlx(rename = "end_date")]
    pub end: NaiveDateTime,
    pub item_id: i64,
    pub booker_id: i64,
    pub status: BookingStatus,
}

/// Booking with its booker and item, as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingDetails {
    pub id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub status: BookingStatus,
    pub booker: User,
    pub item: Item,
}

/// Flat join row backing [`BookingDetails`]
#[derive(Debug, FromRow)]
pub struct BookingDetailsRow {
    pub id: i64,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub status: BookingStatus,
    pub booker_id: i64,
    pub booker_name: String,
    pub booker_email: String,
    pub item_id: i64,
    pub item_name: String,
    pub item_description: String,
    pub item_available: bool,
    pub item_owner_id: i64,
    pub item_request_id: Option<i64>,
}

impl From<BookingDetailsRow> for BookingDetails {
    fn from(row: BookingDetailsRow) -> Self {
        Self {
            id: row.id,
            start: row.start_date,
            end: row.end_date,
            status: row.status,
            booker: User {
                id: row.booker_id,
                name: row.booker_name,
                email: row.booker_email,
            },
            item: Item {
                id: row.item_id,
                name: row.item_name,
                description: row.item_description,
                available: row.item_available,
                owner_id: row.item_owner_id,
                request_id: row.item_request_id,
            },
        }
    }
}

/// Booking reference embedded in item details
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingShort {
    pub id: i64,
    pub booker_id: i64,
}

impl From<&Booking> for BookingShort {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id,
            booker_id: booking.booker_id,
        }
    }
}

/// Most recent booking that has started and the nearest one still ahead.
///
/// Rejected and canceled bookings are ignored.
pub fn last_and_next(
    bookings: &[Booking],
    now: NaiveDateTime,
) -> (Option<BookingShort>, Option<BookingShort>) {
    let active = || bookings.iter().filter(|b| b.status.is_active());

    let last = active().filter(|b| b.start <= now).max_by_key(|b| b.start);
    let next = active().filter(|b| b.start > now).min_by_key(|b| b.start);

    (last.map(BookingShort::from), next.map(BookingShort::from))
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Create booking request.
///
/// Only the shape is checked on extraction. The period depends on the
/// current time and on the server side must come after the user and item
/// lookups, so callers run [`CreateBooking::period`] themselves.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub item_id: i64,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl CreateBooking {
    /// Requested start and end, checked against `now`
    pub fn period(&self, now: NaiveDateTime) -> Result<(NaiveDateTime, NaiveDateTime), AppError> {
        booking_period(self.start, self.end, now)
            .map_err(|message| AppError::Validation(message.to_string()))
    }
}

/// Check a requested booking period against `now`
pub fn booking_period(
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    now: NaiveDateTime,
) -> Result<(NaiveDateTime, NaiveDateTime), &'static str> {
    let (Some(start), Some(end)) = (start, end) else {
        return Err("Booking start and end must both be set");
    };
    if start == end {
        return Err("Booking start must not be equal to its end");
    }
    if start > end {
        return Err("Booking start must be before its end");
    }
    if start < now {
        return Err("Booking start must not be in the past");
    }
    Ok((start, end))
}

/// Query parameters of booking lists
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingListQuery {
    /// ALL, CURRENT, PAST, FUTURE, WAITING or REJECTED (case-insensitive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

impl BookingListQuery {
    pub fn state(&self) -> Result<BookingState, AppError> {
        match self.state.as_deref() {
            Some(state) => state.parse(),
            None => Ok(BookingState::All),
        }
    }

    pub fn page_query(&self) -> PageQuery {
        PageQuery::new(self.from, self.size)
    }
}

/// Owner decision on a waiting booking
#[derive(Debug, Clone, Copy, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApproveQuery {
    pub approved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::local_now;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn booking(id: i64, start_offset_hours: i64, status: BookingStatus) -> Booking {
        let start = now() + Duration::hours(start_offset_hours);
        Booking {
            id,
            start,
            end: start + Duration::hours(1),
            item_id: 1,
            booker_id: 100 + id,
            status,
        }
    }

    #[test]
    fn test_state_parsing_is_case_insensitive() {
        assert_eq!("all".parse::<BookingState>().unwrap(), BookingState::All);
        assert_eq!("Current".parse::<BookingState>().unwrap(), BookingState::Current);
        assert_eq!("REJECTED".parse::<BookingState>().unwrap(), BookingState::Rejected);
    }

    #[test]
    fn test_unknown_state_is_reported() {
        let error = "UNSUPPORTED_STATUS".parse::<BookingState>().unwrap_err();
        assert_eq!(error.to_string(), "Unknown state: UNSUPPORTED_STATUS");
    }

    #[test]
    fn test_missing_state_defaults_to_all() {
        let query = BookingListQuery::default();
        assert_eq!(query.state().unwrap(), BookingState::All);
    }

    #[test]
    fn test_state_filters() {
        let t = now();
        assert_eq!(BookingState::All.filter(t), BookingFilter::Any);
        assert_eq!(BookingState::Current.filter(t), BookingFilter::ActiveAt(t));
        assert_eq!(BookingState::Past.filter(t), BookingFilter::EndedBefore(t));
        assert_eq!(BookingState::Future.filter(t), BookingFilter::StartsAfter(t));
        assert_eq!(
            BookingState::Waiting.filter(t),
            BookingFilter::Status(BookingStatus::Waiting)
        );
        assert_eq!(
            BookingState::Rejected.filter(t),
            BookingFilter::Status(BookingStatus::Rejected)
        );
    }

    #[test]
    fn test_booking_period_rules() {
        let t = now();
        let later = t + Duration::days(1);

        assert!(booking_period(None, Some(later), t).is_err());
        assert!(booking_period(Some(later), None, t).is_err());
        assert_eq!(
            booking_period(Some(later), Some(later), t),
            Err("Booking start must not be equal to its end")
        );
        assert_eq!(
            booking_period(Some(later), Some(t + Duration::hours(1)), t),
            Err("Booking start must be before its end")
        );
        assert_eq!(
            booking_period(Some(t - Duration::hours(1)), Some(later), t),
            Err("Booking start must not be in the past")
        );
        assert_eq!(
            booking_period(Some(t), Some(later), t),
            Ok((t, later))
        );
    }

    #[test]
    fn test_create_booking_extraction_leaves_dates_to_period() {
        let past = local_now() - Duration::days(2);
        let booking = CreateBooking {
            item_id: 1,
            start: Some(past),
            end: Some(past + Duration::days(1)),
        };
        assert!(booking.validate().is_ok());
        assert!(matches!(
            booking.period(local_now()),
            Err(AppError::Validation(message)) if message == "Booking start must not be in the past"
        ));

        let future = local_now() + Duration::days(1);
        let booking = CreateBooking {
            item_id: 1,
            start: Some(future),
            end: Some(future + Duration::days(1)),
        };
        assert_eq!(
            booking.period(local_now()).unwrap(),
            (future, future + Duration::days(1))
        );
    }

    #[test]
    fn test_last_and_next_pick_nearest_starts() {
        let bookings = vec![
            booking(1, -48, BookingStatus::Approved),
            booking(2, -2, BookingStatus::Approved),
            booking(3, 3, BookingStatus::Waiting),
            booking(4, 24, BookingStatus::Approved),
        ];

        let (last, next) = last_and_next(&bookings, now());

        assert_eq!(last, Some(BookingShort { id: 2, booker_id: 102 }));
        assert_eq!(next, Some(BookingShort { id: 3, booker_id: 103 }));
    }

    #[test]
    fn test_last_and_next_ignore_rejected_and_canceled() {
        let bookings = vec![
            booking(1, -1, BookingStatus::Rejected),
            booking(2, 1, BookingStatus::Canceled),
            booking(3, 5, BookingStatus::Approved),
        ];

        let (last, next) = last_and_next(&bookings, now());

        assert!(last.is_none());
        assert_eq!(next.map(|b| b.id), Some(3));
    }

    #[test]
    fn test_booking_started_exactly_now_counts_as_last() {
        let bookings = vec![booking(1, 0, BookingStatus::Approved)];
        let (last, next) = last_and_next(&bookings, now());
        assert_eq!(last.map(|b| b.id), Some(1));
        assert!(next.is_none());
    }

    #[test]
    fn test_status_round_trips_through_its_name() {
        for status in [
            BookingStatus::Waiting,
            BookingStatus::Approved,
            BookingStatus::Rejected,
            BookingStatus::Canceled,
        ] {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
        }
        assert_eq!(
            serde_json::to_value(BookingStatus::Waiting).unwrap(),
            serde_json::json!("WAITING")
        );
    }
}
