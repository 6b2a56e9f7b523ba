//! User model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::not_blank;

/// User model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Create user request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(
        custom(function = "not_blank"),
        length(max = 255, message = "Name must be at most 255 characters")
    )]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Partial user update; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_user"))]
pub struct UpdateUser {
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

fn validate_update_user(user: &UpdateUser) -> Result<(), ValidationError> {
    match user.name.as_deref() {
        Some(name) => not_blank(name),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_requires_valid_email() {
        let user = CreateUser {
            name: "Alice".into(),
            email: "alice.example.com".into(),
        };
        let errors = user.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_create_user_rejects_blank_name() {
        let user = CreateUser {
            name: "   ".into(),
            email: "alice@example.com".into(),
        };
        let errors = user.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_update_user_accepts_partial_payload() {
        let update: UpdateUser = serde_json::from_str(r#"{"name": "Bob"}"#).unwrap();
        assert!(update.validate().is_ok());
        assert!(update.email.is_none());

        let update = UpdateUser {
            name: Some(" ".into()),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = UpdateUser {
            email: Some("not-an-email".into()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
