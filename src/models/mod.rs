//! Data models for ShareIt

pub mod booking;
pub mod comment;
pub mod item;
pub mod pagination;
pub mod request;
pub mod user;

use std::borrow::Cow;

use chrono::{Local, NaiveDateTime};
use validator::ValidationError;

// Re-export commonly used types
pub use booking::{Booking, BookingDetails, BookingShort, BookingState, BookingStatus};
pub use comment::Comment;
pub use item::{Item, ItemDetails};
pub use pagination::{Page, PageQuery};
pub use request::{ItemRequest, ItemRequestDetails};
pub use user::User;

/// Header carrying the id of the calling user
pub const SHARER_USER_ID_HEADER: &str = "X-Sharer-User-Id";

/// Current wall-clock time, zone-less like every timestamp in the schema
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Rejects empty and whitespace-only strings
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::from("must not be blank"));
        return Err(error);
    }
    Ok(())
}
