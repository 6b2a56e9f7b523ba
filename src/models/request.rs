//! Item request model: a user asking for an item nobody has listed yet

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{item::Item, not_blank};

/// Item request model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ItemRequest {
    pub id: i64,
    pub description: String,
    pub requester_id: i64,
    pub created: NaiveDateTime,
}

/// Item request with the items listed in response to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemRequestDetails {
    pub id: i64,
    pub description: String,
    pub created: NaiveDateTime,
    pub items: Vec<Item>,
}

/// Create item request body
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateItemRequest {
    #[validate(
        custom(function = "not_blank"),
        length(max = 2000, message = "Description must be at most 2000 characters")
    )]
    pub description: String,
}

impl ItemRequestDetails {
    pub fn new(request: ItemRequest, items: Vec<Item>) -> Self {
        Self {
            id: request.id,
            description: request.description,
            created: request.created,
            items,
        }
    }
}

/// Pair every request with the items referencing it, keeping request order
pub fn attach_items(requests: Vec<ItemRequest>, items: Vec<Item>) -> Vec<ItemRequestDetails> {
    let mut by_request: HashMap<i64, Vec<Item>> = HashMap::new();
    for item in items {
        if let Some(request_id) = item.request_id {
            by_request.entry(request_id).or_default().push(item);
        }
    }

    requests
        .into_iter()
        .map(|request| {
            let items = by_request.remove(&request.id).unwrap_or_default();
            ItemRequestDetails::new(request, items)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request(id: i64) -> ItemRequest {
        ItemRequest {
            id,
            description: format!("Need thing {}", id),
            requester_id: 1,
            created: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        }
    }

    fn item(id: i64, request_id: Option<i64>) -> Item {
        Item {
            id,
            name: format!("Item {}", id),
            description: "Spare".into(),
            available: true,
            owner_id: 2,
            request_id,
        }
    }

    #[test]
    fn test_attach_items_groups_by_request() {
        let requests = vec![request(3), request(1), request(2)];
        let items = vec![item(10, Some(1)), item(11, Some(3)), item(12, Some(1)), item(13, None)];

        let details = attach_items(requests, items);

        assert_eq!(details.iter().map(|d| d.id).collect::<Vec<_>>(), vec![3, 1, 2]);
        assert_eq!(details[0].items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![11]);
        assert_eq!(details[1].items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![10, 12]);
        assert!(details[2].items.is_empty());
    }

    #[test]
    fn test_blank_description_is_rejected() {
        let body = CreateItemRequest { description: " ".into() };
        assert!(body.validate().is_err());
    }
}
