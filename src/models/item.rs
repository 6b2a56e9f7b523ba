//! Item model and related types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::{
    booking::{last_and_next, Booking, BookingShort},
    comment::Comment,
    not_blank,
    pagination::PageQuery,
};

/// Item model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    #[serde(skip)]
    pub owner_id: i64,
    /// Item request this item was listed in response to
    pub request_id: Option<i64>,
}

/// Item with its comments and, for the owner, the surrounding bookings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetails {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
    pub last_booking: Option<BookingShort>,
    pub next_booking: Option<BookingShort>,
    pub comments: Vec<Comment>,
}

impl ItemDetails {
    /// Build the details view.
    ///
    /// `bookings` and `comments` may contain rows for other items; only the
    /// ones referencing `item` are used. Last/next bookings are only filled
    /// when `with_bookings` is set (the caller owns the item).
    pub fn assemble(
        item: Item,
        bookings: &[Booking],
        comments: &[Comment],
        now: NaiveDateTime,
        with_bookings: bool,
    ) -> Self {
        let (last_booking, next_booking) = if with_bookings {
            let own: Vec<Booking> = bookings
                .iter()
                .filter(|b| b.item_id == item.id)
                .cloned()
                .collect();
            last_and_next(&own, now)
        } else {
            (None, None)
        };

        let comments = comments
            .iter()
            .filter(|c| c.item_id == item.id)
            .cloned()
            .collect();

        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            request_id: item.request_id,
            last_booking,
            next_booking,
            comments,
        }
    }
}

/// Create item request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    #[validate(
        custom(function = "not_blank"),
        length(max = 255, message = "Name must be at most 255 characters")
    )]
    pub name: String,
    #[validate(
        custom(function = "not_blank"),
        length(max = 2000, message = "Description must be at most 2000 characters")
    )]
    pub description: String,
    #[validate(required(message = "Availability must be set"))]
    pub available: Option<bool>,
    pub request_id: Option<i64>,
}

/// Partial item update; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_item"))]
pub struct UpdateItem {
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
    pub available: Option<bool>,
}

fn validate_update_item(item: &UpdateItem) -> Result<(), ValidationError> {
    for value in [item.name.as_deref(), item.description.as_deref()]
        .into_iter()
        .flatten()
    {
        not_blank(value)?;
    }
    Ok(())
}

/// Item search query
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemSearchQuery {
    /// Text looked up in name and description, case-insensitively
    #[serde(default)]
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

impl ItemSearchQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery::new(self.from, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::BookingStatus;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn item(id: i64) -> Item {
        Item {
            id,
            name: "Drill".into(),
            description: "Cordless drill".into(),
            available: true,
            owner_id: 1,
            request_id: None,
        }
    }

    fn booking(id: i64, item_id: i64, start_offset_hours: i64) -> Booking {
        let start = now() + Duration::hours(start_offset_hours);
        Booking {
            id,
            start,
            end: start + Duration::hours(2),
            item_id,
            booker_id: 2,
            status: BookingStatus::Approved,
        }
    }

    fn comment(id: i64, item_id: i64) -> Comment {
        Comment {
            id,
            text: "Works great".into(),
            author_name: "Bob".into(),
            created: now(),
            item_id,
        }
    }

    #[test]
    fn test_assemble_for_owner_fills_bookings() {
        let bookings = vec![booking(1, 10, -5), booking(2, 10, 5), booking(3, 11, 1)];
        let comments = vec![comment(1, 10), comment(2, 11)];

        let details = ItemDetails::assemble(item(10), &bookings, &comments, now(), true);

        assert_eq!(details.last_booking.map(|b| b.id), Some(1));
        assert_eq!(details.next_booking.map(|b| b.id), Some(2));
        assert_eq!(details.comments.len(), 1);
        assert_eq!(details.comments[0].id, 1);
    }

    #[test]
    fn test_assemble_for_other_users_hides_bookings() {
        let bookings = vec![booking(1, 10, -5), booking(2, 10, 5)];

        let details = ItemDetails::assemble(item(10), &bookings, &[], now(), false);

        assert!(details.last_booking.is_none());
        assert!(details.next_booking.is_none());
        assert!(details.comments.is_empty());
    }

    #[test]
    fn test_create_item_validation() {
        let missing_available: CreateItem =
            serde_json::from_str(r#"{"name": "Drill", "description": "Cordless"}"#).unwrap();
        assert!(missing_available.validate().is_err());

        let blank_description: CreateItem = serde_json::from_str(
            r#"{"name": "Drill", "description": " ", "available": true}"#,
        )
        .unwrap();
        assert!(blank_description.validate().is_err());

        let valid: CreateItem = serde_json::from_str(
            r#"{"name": "Drill", "description": "Cordless", "available": false, "requestId": 4}"#,
        )
        .unwrap();
        assert!(valid.validate().is_ok());
        assert_eq!(valid.request_id, Some(4));
    }

    #[test]
    fn test_update_item_rejects_blank_fields_only_when_present() {
        assert!(UpdateItem::default().validate().is_ok());

        let update = UpdateItem {
            description: Some("".into()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_item_serializes_without_owner() {
        let json = serde_json::to_value(item(3)).unwrap();
        assert_eq!(json["id"], 3);
        assert!(json.get("ownerId").is_none());
        assert!(json["requestId"].is_null());
    }
}
