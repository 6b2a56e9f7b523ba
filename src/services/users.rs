//! User management service

use crate::{
    error::AppResult,
    models::user::{CreateUser, UpdateUser, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get(&self, id: i64) -> AppResult<User> {
        tracing::debug!("Get user id={}", id);
        self.repository.users.get_by_id(id).await
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        tracing::debug!("List users");
        self.repository.users.list().await
    }

    pub async fn create(&self, user: CreateUser) -> AppResult<User> {
        let created = self.repository.users.create(&user).await?;
        tracing::info!("Created user id={}", created.id);
        Ok(created)
    }

    /// Apply a partial update
    pub async fn update(&self, id: i64, user: UpdateUser) -> AppResult<User> {
        let updated = self.repository.users.update(id, &user).await?;
        tracing::info!("Updated user id={}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.users.delete(id).await?;
        tracing::info!("Deleted user id={}", id);
        Ok(())
    }
}
