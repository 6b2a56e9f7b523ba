//! Items repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        item::{CreateItem, Item, UpdateItem},
        pagination::Page,
    },
};

const ITEM_COLUMNS: &str = "id, name, description, available, owner_id, request_id";

#[derive(Clone)]
pub struct ItemsRepository {
    pool: Pool<Postgres>,
}

impl ItemsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get item by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(&format!("SELECT {} FROM items WHERE id = $1", ITEM_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", id)))
    }

    /// Create a new item owned by `owner_id`
    pub async fn create(&self, owner_id: i64, item: &CreateItem) -> AppResult<Item> {
        let row = sqlx::query_as::<_, Item>(&format!(
            r#"
            INSERT INTO items (name, description, available, owner_id, request_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.available)
        .bind(owner_id)
        .bind(item.request_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update the fields present in `item`
    pub async fn update(&self, id: i64, item: &UpdateItem) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(&format!(
            r#"
            UPDATE items
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                available = COALESCE($4, available)
            WHERE id = $1
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.available)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", id)))
    }

    /// Items owned by a user, ordered by id
    pub async fn list_by_owner(&self, owner_id: i64, page: Page) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT {} FROM items WHERE owner_id = $1 ORDER BY id LIMIT $2 OFFSET $3",
            ITEM_COLUMNS
        ))
        .bind(owner_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Available items whose name or description contains `text`
    pub async fn search(&self, text: &str, page: Page) -> AppResult<Vec<Item>> {
        let pattern = format!("%{}%", escape_like(text));

        let items = sqlx::query_as::<_, Item>(&format!(
            r#"
            SELECT {} FROM items
            WHERE available = TRUE
              AND (name ILIKE $1 OR description ILIKE $1)
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
            ITEM_COLUMNS
        ))
        .bind(pattern)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Items listed in response to any of the given requests
    pub async fn list_by_requests(&self, request_ids: &[i64]) -> AppResult<Vec<Item>> {
        if request_ids.is_empty() {
            return Ok(Vec::new());
        }

        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT {} FROM items WHERE request_id = ANY($1) ORDER BY id",
            ITEM_COLUMNS
        ))
        .bind(request_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }
}

/// Escape LIKE wildcards so user text is matched literally
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("drill"), "drill");
        assert_eq!(escape_like("100%_off\\"), "100\\%\\_off\\\\");
    }
}
