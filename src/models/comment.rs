//! Item comment model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::not_blank;

/// Comment joined with its author's name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub author_name: String,
    pub created: NaiveDateTime,
    #[serde(skip)]
    pub item_id: i64,
}

/// Create comment request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateComment {
    #[validate(
        custom(function = "not_blank"),
        length(max = 2000, message = "Text must be at most 2000 characters")
    )]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_comment_is_rejected() {
        let comment = CreateComment { text: "\n ".into() };
        assert!(comment.validate().is_err());

        let comment = CreateComment { text: "Nice tent".into() };
        assert!(comment.validate().is_ok());
    }
}
