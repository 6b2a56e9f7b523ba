//! Item endpoints: listing, search, details and comments

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    extract::{PathParam, QueryParams, SharerId, ValidatedJson},
    models::{
        comment::{Comment, CreateComment},
        item::{CreateItem, Item, ItemDetails, ItemSearchQuery, UpdateItem},
        pagination::PageQuery,
    },
    AppState,
};

/// List the caller's items with bookings and comments
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Owner's items ordered by id", body = Vec<ItemDetails>),
        (status = 400, description = "Invalid pagination", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_items(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    QueryParams(page): QueryParams<PageQuery>,
) -> AppResult<Json<Vec<ItemDetails>>> {
    let items = state.services.items.list_for_owner(user_id, page).await?;
    Ok(Json(items))
}

/// Search available items by text
#[utoipa::path(
    get,
    path = "/items/search",
    tag = "items",
    params(ItemSearchQuery),
    responses(
        (status = 200, description = "Matching available items", body = Vec<Item>),
        (status = 400, description = "Invalid pagination", body = crate::error::ErrorResponse)
    )
)]
pub async fn search_items(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ItemSearchQuery>,
) -> AppResult<Json<Vec<Item>>> {
    let items = state
        .services
        .items
        .search(&query.text, query.page_query())
        .await?;
    Ok(Json(items))
}

/// Get item details
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID"),
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item with comments, and bookings for its owner", body = ItemDetails),
        (status = 404, description = "Item not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    PathParam(id): PathParam<i64>,
) -> AppResult<Json<ItemDetails>> {
    let item = state.services.items.get(user_id, id).await?;
    Ok(Json(item))
}

/// Create a new item
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Owner user ID")
    ),
    request_body = CreateItem,
    responses(
        (status = 200, description = "Item created", body = Item),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Owner or item request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    ValidatedJson(item): ValidatedJson<CreateItem>,
) -> AppResult<Json<Item>> {
    let created = state.services.items.create(user_id, item).await?;
    Ok(Json(created))
}

/// Update the given fields of an item
#[utoipa::path(
    patch,
    path = "/items/{id}",
    tag = "items",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Owner user ID"),
        ("id" = i64, Path, description = "Item ID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "User or item not found, or caller is not the owner", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    PathParam(id): PathParam<i64>,
    ValidatedJson(item): ValidatedJson<UpdateItem>,
) -> AppResult<Json<Item>> {
    let updated = state.services.items.update(user_id, id, item).await?;
    Ok(Json(updated))
}

/// Comment on an item after a finished booking
#[utoipa::path(
    post,
    path = "/items/{id}/comment",
    tag = "items",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Author user ID"),
        ("id" = i64, Path, description = "Item ID")
    ),
    request_body = CreateComment,
    responses(
        (status = 200, description = "Comment created", body = Comment),
        (status = 400, description = "Blank text or no finished booking", body = crate::error::ErrorResponse),
        (status = 404, description = "User or item not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_comment(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    PathParam(id): PathParam<i64>,
    ValidatedJson(comment): ValidatedJson<CreateComment>,
) -> AppResult<Json<Comment>> {
    let created = state.services.items.add_comment(user_id, id, comment).await?;
    Ok(Json(created))
}
