//! Item management service: listing, search, details and comments

use crate::{
    error::{AppError, AppResult},
    models::{
        comment::{Comment, CreateComment},
        item::{CreateItem, Item, ItemDetails, UpdateItem},
        local_now,
        pagination::PageQuery,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ItemsService {
    repository: Repository,
}

impl ItemsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create an item owned by `owner_id`, optionally answering an item request
    pub async fn create(&self, owner_id: i64, item: CreateItem) -> AppResult<Item> {
        self.repository.users.get_by_id(owner_id).await?;
        if let Some(request_id) = item.request_id {
            self.repository.requests.get_by_id(request_id).await?;
        }

        let created = self.repository.items.create(owner_id, &item).await?;
        tracing::info!("Created item id={} for owner id={}", created.id, owner_id);
        Ok(created)
    }

    /// Apply a partial update; only the owner may change an item
    pub async fn update(&self, user_id: i64, item_id: i64, item: UpdateItem) -> AppResult<Item> {
        self.repository.users.get_by_id(user_id).await?;
        let existing = self.repository.items.get_by_id(item_id).await?;
        if existing.owner_id != user_id {
            return Err(AppError::WrongOwner(format!(
                "User {} is not the owner of item {}",
                user_id, item_id
            )));
        }

        let updated = self.repository.items.update(item_id, &item).await?;
        tracing::info!("Updated item id={}", item_id);
        Ok(updated)
    }

    /// Item details as seen by `user_id`
    pub async fn get(&self, user_id: i64, item_id: i64) -> AppResult<ItemDetails> {
        tracing::debug!("Get item id={} for user id={}", item_id, user_id);
        let item = self.repository.items.get_by_id(item_id).await?;
        let comments = self.repository.comments.list_for_items(&[item_id]).await?;

        let is_owner = item.owner_id == user_id;
        let bookings = if is_owner {
            self.repository.bookings.list_active_for_items(&[item_id]).await?
        } else {
            Vec::new()
        };

        Ok(ItemDetails::assemble(item, &bookings, &comments, local_now(), is_owner))
    }

    /// One page of the owner's items with bookings and comments
    pub async fn list_for_owner(&self, owner_id: i64, page: PageQuery) -> AppResult<Vec<ItemDetails>> {
        self.repository.users.get_by_id(owner_id).await?;
        let page = page.page()?;
        tracing::debug!("List items of owner id={}", owner_id);

        let items = self.repository.items.list_by_owner(owner_id, page).await?;
        let ids: Vec<i64> = items.iter().map(|item| item.id).collect();
        let bookings = self.repository.bookings.list_active_for_items(&ids).await?;
        let comments = self.repository.comments.list_for_items(&ids).await?;

        let now = local_now();
        Ok(items
            .into_iter()
            .map(|item| ItemDetails::assemble(item, &bookings, &comments, now, true))
            .collect())
    }

    /// Available items matching `text`; blank text matches nothing
    pub async fn search(&self, text: &str, page: PageQuery) -> AppResult<Vec<Item>> {
        let page = page.page()?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!("Search items text={:?}", text);
        self.repository.items.search(text, page).await
    }

    /// Comment on an item the author has finished renting
    pub async fn add_comment(
        &self,
        author_id: i64,
        item_id: i64,
        comment: CreateComment,
    ) -> AppResult<Comment> {
        self.repository.users.get_by_id(author_id).await?;
        self.repository.items.get_by_id(item_id).await?;

        let now = local_now();
        if !self
            .repository
            .bookings
            .has_completed_booking(author_id, item_id, now)
            .await?
        {
            return Err(AppError::BadRequest(format!(
                "User {} has no completed booking of item {}",
                author_id, item_id
            )));
        }

        let created = self
            .repository
            .comments
            .create(item_id, author_id, &comment.text, now)
            .await?;
        tracing::info!("Created comment id={} on item id={}", created.id, item_id);
        Ok(created)
    }
}
