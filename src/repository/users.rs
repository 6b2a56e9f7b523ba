//! Users repository for database operations

use sqlx::{Pool, Postgres};

use super::is_unique_violation;
use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, UpdateUser, User},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// List all users
    pub async fn list(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT id, name, email FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    /// Create a new user
    pub async fn create(&self, user: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id, name, email",
        )
        .bind(&user.name)
        .bind(&user.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| email_conflict(e, &user.email))
    }

    /// Update the fields present in `user`
    pub async fn update(&self, id: i64, user: &UpdateUser) -> AppResult<User> {
        let email = user.email.as_deref().unwrap_or_default();

        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email)
            WHERE id = $1
            RETURNING id, name, email
            "#,
        )
        .bind(id)
        .bind(&user.name)
        .bind(&user.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| email_conflict(e, email))?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Delete a user; their items, bookings, requests and comments cascade
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }
        Ok(())
    }
}

fn email_conflict(error: sqlx::Error, email: &str) -> AppError {
    if is_unique_violation(&error) {
        AppError::Conflict(format!("Email {} is already in use", email))
    } else {
        error.into()
    }
}
