//! Gateway item request routes

use axum::{extract::State, response::Response};

use super::GatewayState;
use crate::{
    error::AppResult,
    extract::{PathParam, QueryParams, SharerId, ValidatedJson},
    models::{pagination::PageQuery, request::CreateItemRequest},
};

pub async fn create_request(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    ValidatedJson(request): ValidatedJson<CreateItemRequest>,
) -> AppResult<Response> {
    let upstream = state.client.post("/requests", Some(user_id)).json(&request);
    state.client.relay(upstream).await
}

pub async fn list_own_requests(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
) -> AppResult<Response> {
    let upstream = state.client.get("/requests", Some(user_id));
    state.client.relay(upstream).await
}

pub async fn list_all_requests(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    QueryParams(page): QueryParams<PageQuery>,
) -> AppResult<Response> {
    page.page()?;
    let upstream = state.client.get("/requests/all", Some(user_id)).query(&page);
    state.client.relay(upstream).await
}

pub async fn get_request(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    PathParam(id): PathParam<i64>,
) -> AppResult<Response> {
    let upstream = state.client.get(&format!("/requests/{}", id), Some(user_id));
    state.client.relay(upstream).await
}
