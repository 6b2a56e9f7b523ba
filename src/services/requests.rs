//! Item request service

use crate::{
    error::AppResult,
    models::{
        local_now,
        pagination::PageQuery,
        request::{attach_items, CreateItemRequest, ItemRequestDetails},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
}

impl RequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn create(
        &self,
        requester_id: i64,
        request: CreateItemRequest,
    ) -> AppResult<ItemRequestDetails> {
        self.repository.users.get_by_id(requester_id).await?;

        let created = self
            .repository
            .requests
            .create(requester_id, &request.description, local_now())
            .await?;
        tracing::info!("Created item request id={} by user id={}", created.id, requester_id);
        Ok(ItemRequestDetails::new(created, Vec::new()))
    }

    /// The user's own requests, newest first
    pub async fn list_own(&self, requester_id: i64) -> AppResult<Vec<ItemRequestDetails>> {
        self.repository.users.get_by_id(requester_id).await?;
        tracing::debug!("List item requests of user id={}", requester_id);

        let requests = self.repository.requests.list_by_requester(requester_id).await?;
        let ids: Vec<i64> = requests.iter().map(|r| r.id).collect();
        let items = self.repository.items.list_by_requests(&ids).await?;
        Ok(attach_items(requests, items))
    }

    /// A page of requests made by other users, newest first
    pub async fn list_others(
        &self,
        user_id: i64,
        page: PageQuery,
    ) -> AppResult<Vec<ItemRequestDetails>> {
        self.repository.users.get_by_id(user_id).await?;
        let page = page.page()?;

        let requests = self
            .repository
            .requests
            .list_excluding_requester(user_id, page)
            .await?;
        let ids: Vec<i64> = requests.iter().map(|r| r.id).collect();
        let items = self.repository.items.list_by_requests(&ids).await?;
        Ok(attach_items(requests, items))
    }

    pub async fn get(&self, user_id: i64, request_id: i64) -> AppResult<ItemRequestDetails> {
        self.repository.users.get_by_id(user_id).await?;
        let request = self.repository.requests.get_by_id(request_id).await?;
        let items = self.repository.items.list_by_requests(&[request_id]).await?;
        Ok(ItemRequestDetails::new(request, items))
    }
}
