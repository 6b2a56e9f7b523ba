//! Repository layer for database operations

pub mod bookings;
pub mod comments;
pub mod items;
pub mod requests;
pub mod users;

use sqlx::{Pool, Postgres};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub items: items::ItemsRepository,
    pub bookings: bookings::BookingsRepository,
    pub comments: comments::CommentsRepository,
    pub requests: requests::RequestsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            items: items::ItemsRepository::new(pool.clone()),
            bookings: bookings::BookingsRepository::new(pool.clone()),
            comments: comments::CommentsRepository::new(pool.clone()),
            requests: requests::RequestsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database, used by the readiness check
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// SQLSTATE raised on unique constraint violations
pub(crate) const UNIQUE_VIOLATION: &str = "23505";

/// Whether `error` is a unique constraint violation
pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}
