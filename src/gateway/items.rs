//! Gateway item routes

use axum::{extract::State, response::Response};

use super::GatewayState;
use crate::{
    error::AppResult,
    extract::{PathParam, QueryParams, SharerId, ValidatedJson},
    models::{
        comment::CreateComment,
        item::{CreateItem, ItemSearchQuery, UpdateItem},
        pagination::PageQuery,
    },
};

pub async fn list_items(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    QueryParams(page): QueryParams<PageQuery>,
) -> AppResult<Response> {
    page.page()?;
    let request = state.client.get("/items", Some(user_id)).query(&page);
    state.client.relay(request).await
}

pub async fn search_items(
    State(state): State<GatewayState>,
    QueryParams(query): QueryParams<ItemSearchQuery>,
) -> AppResult<Response> {
    query.page_query().page()?;
    let request = state.client.get("/items/search", None).query(&query);
    state.client.relay(request).await
}

pub async fn get_item(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    PathParam(id): PathParam<i64>,
) -> AppResult<Response> {
    let request = state.client.get(&format!("/items/{}", id), Some(user_id));
    state.client.relay(request).await
}

pub async fn create_item(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    ValidatedJson(item): ValidatedJson<CreateItem>,
) -> AppResult<Response> {
    let request = state.client.post("/items", Some(user_id)).json(&item);
    state.client.relay(request).await
}

pub async fn update_item(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    PathParam(id): PathParam<i64>,
    ValidatedJson(item): ValidatedJson<UpdateItem>,
) -> AppResult<Response> {
    let request = state
        .client
        .patch(&format!("/items/{}", id), Some(user_id))
        .json(&item);
    state.client.relay(request).await
}

pub async fn add_comment(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    PathParam(id): PathParam<i64>,
    ValidatedJson(comment): ValidatedJson<CreateComment>,
) -> AppResult<Response> {
    let request = state
        .client
        .post(&format!("/items/{}/comment", id), Some(user_id))
        .json(&comment);
    state.client.relay(request).await
}
