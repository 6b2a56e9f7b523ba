//! Item request endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    extract::{PathParam, QueryParams, SharerId, ValidatedJson},
    models::{
        pagination::PageQuery,
        request::{CreateItemRequest, ItemRequestDetails},
    },
    AppState,
};

/// Ask for an item nobody has listed yet
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Requester user ID")
    ),
    request_body = CreateItemRequest,
    responses(
        (status = 200, description = "Request created", body = ItemRequestDetails),
        (status = 400, description = "Blank description", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_request(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    ValidatedJson(request): ValidatedJson<CreateItemRequest>,
) -> AppResult<Json<ItemRequestDetails>> {
    let created = state.services.requests.create(user_id, request).await?;
    Ok(Json(created))
}

/// List the caller's own requests with the items offered for them
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Requester user ID")
    ),
    responses(
        (status = 200, description = "Requests, newest first", body = Vec<ItemRequestDetails>),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_own_requests(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
) -> AppResult<Json<Vec<ItemRequestDetails>>> {
    let requests = state.services.requests.list_own(user_id).await?;
    Ok(Json(requests))
}

/// List requests made by other users
#[utoipa::path(
    get,
    path = "/requests/all",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Requests, newest first", body = Vec<ItemRequestDetails>),
        (status = 400, description = "Invalid pagination", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_all_requests(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    QueryParams(page): QueryParams<PageQuery>,
) -> AppResult<Json<Vec<ItemRequestDetails>>> {
    let requests = state.services.requests.list_others(user_id, page).await?;
    Ok(Json(requests))
}

/// Get an item request with its items
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID"),
        ("id" = i64, Path, description = "Item request ID")
    ),
    responses(
        (status = 200, description = "Item request", body = ItemRequestDetails),
        (status = 404, description = "User or request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_request(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    PathParam(id): PathParam<i64>,
) -> AppResult<Json<ItemRequestDetails>> {
    let request = state.services.requests.get(user_id, id).await?;
    Ok(Json(request))
}
