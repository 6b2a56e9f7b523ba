//! Gateway user routes

use axum::{extract::State, response::Response};

use super::GatewayState;
use crate::{
    error::AppResult,
    extract::{PathParam, ValidatedJson},
    models::user::{CreateUser, UpdateUser},
};

pub async fn list_users(State(state): State<GatewayState>) -> AppResult<Response> {
    state.client.relay(state.client.get("/users", None)).await
}

pub async fn get_user(
    State(state): State<GatewayState>,
    PathParam(id): PathParam<i64>,
) -> AppResult<Response> {
    let request = state.client.get(&format!("/users/{}", id), None);
    state.client.relay(request).await
}

pub async fn create_user(
    State(state): State<GatewayState>,
    ValidatedJson(user): ValidatedJson<CreateUser>,
) -> AppResult<Response> {
    let request = state.client.post("/users", None).json(&user);
    state.client.relay(request).await
}

pub async fn update_user(
    State(state): State<GatewayState>,
    PathParam(id): PathParam<i64>,
    ValidatedJson(user): ValidatedJson<UpdateUser>,
) -> AppResult<Response> {
    let request = state.client.patch(&format!("/users/{}", id), None).json(&user);
    state.client.relay(request).await
}

pub async fn delete_user(
    State(state): State<GatewayState>,
    PathParam(id): PathParam<i64>,
) -> AppResult<Response> {
    let request = state.client.delete(&format!("/users/{}", id), None);
    state.client.relay(request).await
}
