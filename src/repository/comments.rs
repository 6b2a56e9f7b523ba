//! Comments repository for database operations

use chrono::NaiveDateTime;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::comment::Comment};

#[derive(Clone)]
pub struct CommentsRepository {
    pool: Pool<Postgres>,
}

impl CommentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Comments of the given items with their author names, newest first
    pub async fn list_for_items(&self, item_ids: &[i64]) -> AppResult<Vec<Comment>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT c.id, c.text, u.name AS author_name, c.created, c.item_id
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.item_id = ANY($1)
            ORDER BY c.created DESC, c.id DESC
            "#,
        )
        .bind(item_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    /// Store a comment and return it with the author's name
    pub async fn create(
        &self,
        item_id: i64,
        author_id: i64,
        text: &str,
        created: NaiveDateTime,
    ) -> AppResult<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            WITH inserted AS (
                INSERT INTO comments (text, item_id, author_id, created)
                VALUES ($1, $2, $3, $4)
                RETURNING id, text, item_id, author_id, created
            )
            SELECT inserted.id, inserted.text, u.name AS author_name,
                   inserted.created, inserted.item_id
            FROM inserted
            JOIN users u ON u.id = inserted.author_id
            "#,
        )
        .bind(text)
        .bind(item_id)
        .bind(author_id)
        .bind(created)
        .fetch_one(&self.pool)
        .await?;
        Ok(comment)
    }
}
