//! Bookings repository for database operations

use chrono::NaiveDateTime;
use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingDetails, BookingDetailsRow, BookingFilter, BookingStatus},
        pagination::Page,
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT b.id, b.start_date, b.end_date, b.status,
           u.id AS booker_id, u.name AS booker_name, u.email AS booker_email,
           i.id AS item_id, i.name AS item_name, i.description AS item_description,
           i.available AS item_available, i.owner_id AS item_owner_id,
           i.request_id AS item_request_id
    FROM bookings b
    JOIN users u ON u.id = b.booker_id
    JOIN items i ON i.id = b.item_id
"#;

/// Side of the booking a list is requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingParty {
    /// Bookings made by this user
    Booker(i64),
    /// Bookings of items owned by this user
    Owner(i64),
}

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking with booker and item by ID
    pub async fn get_details(&self, id: i64) -> AppResult<BookingDetails> {
        sqlx::query_as::<_, BookingDetailsRow>(&format!("{} WHERE b.id = $1", DETAILS_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(BookingDetails::from)
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    /// Create a new WAITING booking
    pub async fn create(
        &self,
        booker_id: i64,
        item_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> AppResult<BookingDetails> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO bookings (start_date, end_date, item_id, booker_id, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(item_id)
        .bind(booker_id)
        .bind(BookingStatus::Waiting)
        .fetch_one(&self.pool)
        .await?;

        self.get_details(id).await
    }

    /// Set the status of a booking
    pub async fn update_status(&self, id: i64, status: BookingStatus) -> AppResult<BookingDetails> {
        let result = sqlx::query("UPDATE bookings SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Booking with id {} not found", id)));
        }

        self.get_details(id).await
    }

    /// Bookings of one party matching `filter`, most recent start first
    pub async fn list(
        &self,
        party: BookingParty,
        filter: BookingFilter,
        page: Page,
    ) -> AppResult<Vec<BookingDetails>> {
        let mut builder = QueryBuilder::<Postgres>::new(DETAILS_SELECT);

        match party {
            BookingParty::Booker(id) => builder.push(" WHERE b.booker_id = ").push_bind(id),
            BookingParty::Owner(id) => builder.push(" WHERE i.owner_id = ").push_bind(id),
        };

        match filter {
            BookingFilter::Any => {}
            BookingFilter::ActiveAt(t) => {
                builder
                    .push(" AND b.start_date <= ")
                    .push_bind(t)
                    .push(" AND b.end_date > ")
                    .push_bind(t);
            }
            BookingFilter::EndedBefore(t) => {
                builder.push(" AND b.end_date < ").push_bind(t);
            }
            BookingFilter::StartsAfter(t) => {
                builder.push(" AND b.start_date > ").push_bind(t);
            }
            BookingFilter::Status(status) => {
                builder.push(" AND b.status = ").push_bind(status);
            }
        }

        builder
            .push(" ORDER BY b.start_date DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let rows = builder
            .build_query_as::<BookingDetailsRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(BookingDetails::from).collect())
    }

    /// Waiting and approved bookings of the given items
    pub async fn list_active_for_items(&self, item_ids: &[i64]) -> AppResult<Vec<Booking>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, start_date, end_date, item_id, booker_id, status
            FROM bookings
            WHERE item_id = ANY($1)
              AND status IN ($2, $3)
            ORDER BY start_date
            "#,
        )
        .bind(item_ids)
        .bind(BookingStatus::Waiting)
        .bind(BookingStatus::Approved)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    /// Whether the user had an approved booking of the item that ended before `now`
    pub async fn has_completed_booking(
        &self,
        booker_id: i64,
        item_id: i64,
        now: NaiveDateTime,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE booker_id = $1
                  AND item_id = $2
                  AND status = $3
                  AND end_date < $4
            )
            "#,
        )
        .bind(booker_id)
        .bind(item_id)
        .bind(BookingStatus::Approved)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
