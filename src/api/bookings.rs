//! Booking endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    extract::{PathParam, QueryParams, SharerId, ValidatedJson},
    models::booking::{ApproveQuery, BookingDetails, BookingListQuery, CreateBooking},
    AppState,
};

/// Request a booking
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Booker user ID")
    ),
    request_body = CreateBooking,
    responses(
        (status = 200, description = "Booking created in WAITING status", body = BookingDetails),
        (status = 400, description = "Invalid dates or item unavailable", body = crate::error::ErrorResponse),
        (status = 404, description = "User or item not found, or booker owns the item", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    ValidatedJson(booking): ValidatedJson<CreateBooking>,
) -> AppResult<Json<BookingDetails>> {
    let created = state.services.bookings.create(user_id, booking).await?;
    Ok(Json(created))
}

/// Approve or reject a waiting booking
#[utoipa::path(
    patch,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Item owner user ID"),
        ("id" = i64, Path, description = "Booking ID"),
        ApproveQuery
    ),
    responses(
        (status = 200, description = "Booking approved or rejected", body = BookingDetails),
        (status = 400, description = "Booking is not waiting", body = crate::error::ErrorResponse),
        (status = 404, description = "Booking not found or caller is not the owner", body = crate::error::ErrorResponse)
    )
)]
pub async fn approve_booking(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    PathParam(id): PathParam<i64>,
    QueryParams(query): QueryParams<ApproveQuery>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state
        .services
        .bookings
        .approve(user_id, id, query.approved)
        .await?;
    Ok(Json(booking))
}

/// Get a booking as its booker or item owner
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Booker or owner user ID"),
        ("id" = i64, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking details", body = BookingDetails),
        (status = 404, description = "Booking not found or not visible to the caller", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_booking(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    PathParam(id): PathParam<i64>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state.services.bookings.get(user_id, id).await?;
    Ok(Json(booking))
}

/// List the caller's bookings
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Booker user ID"),
        BookingListQuery
    ),
    responses(
        (status = 200, description = "Bookings, latest start first", body = Vec<BookingDetails>),
        (status = 400, description = "Invalid pagination", body = crate::error::ErrorResponse),
        (status = 500, description = "Unknown state", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    QueryParams(query): QueryParams<BookingListQuery>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let bookings = state
        .services
        .bookings
        .list_for_booker(user_id, &query)
        .await?;
    Ok(Json(bookings))
}

/// List bookings of the caller's items
#[utoipa::path(
    get,
    path = "/bookings/owner",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Owner user ID"),
        BookingListQuery
    ),
    responses(
        (status = 200, description = "Bookings, latest start first", body = Vec<BookingDetails>),
        (status = 400, description = "Invalid pagination", body = crate::error::ErrorResponse),
        (status = 500, description = "Unknown state", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_owner_bookings(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    QueryParams(query): QueryParams<BookingListQuery>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let bookings = state
        .services
        .bookings
        .list_for_owner(user_id, &query)
        .await?;
    Ok(Json(bookings))
}
