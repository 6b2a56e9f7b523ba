//! Gateway booking routes

use axum::{extract::State, response::Response};

use super::GatewayState;
use crate::{
    error::AppResult,
    extract::{PathParam, QueryParams, SharerId, ValidatedJson},
    models::{
        booking::{ApproveQuery, BookingListQuery, CreateBooking},
        local_now,
    },
};

pub async fn create_booking(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    ValidatedJson(booking): ValidatedJson<CreateBooking>,
) -> AppResult<Response> {
    booking.period(local_now())?;
    let request = state.client.post("/bookings", Some(user_id)).json(&booking);
    state.client.relay(request).await
}

pub async fn approve_booking(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    PathParam(id): PathParam<i64>,
    QueryParams(query): QueryParams<ApproveQuery>,
) -> AppResult<Response> {
    let request = state
        .client
        .patch(&format!("/bookings/{}", id), Some(user_id))
        .query(&query);
    state.client.relay(request).await
}

pub async fn get_booking(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    PathParam(id): PathParam<i64>,
) -> AppResult<Response> {
    let request = state.client.get(&format!("/bookings/{}", id), Some(user_id));
    state.client.relay(request).await
}

pub async fn list_bookings(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    QueryParams(query): QueryParams<BookingListQuery>,
) -> AppResult<Response> {
    forward_list(&state, "/bookings", user_id, &query).await
}

pub async fn list_owner_bookings(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    QueryParams(query): QueryParams<BookingListQuery>,
) -> AppResult<Response> {
    forward_list(&state, "/bookings/owner", user_id, &query).await
}

async fn forward_list(
    state: &GatewayState,
    path: &str,
    user_id: i64,
    query: &BookingListQuery,
) -> AppResult<Response> {
    query.page_query().page()?;
    query.state()?;
    let request = state.client.get(path, Some(user_id)).query(query);
    state.client.relay(request).await
}
