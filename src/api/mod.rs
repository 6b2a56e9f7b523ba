//! API handlers for ShareIt REST endpoints

pub mod bookings;
pub mod health;
pub mod items;
pub mod openapi;
pub mod requests;
pub mod users;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        // Items
        .route("/items", get(items::list_items).post(items::create_item))
        .route("/items/search", get(items::search_items))
        .route("/items/:id", get(items::get_item).patch(items::update_item))
        .route("/items/:id/comment", post(items::add_comment))
        // Bookings
        .route(
            "/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/bookings/owner", get(bookings::list_owner_bookings))
        .route(
            "/bookings/:id",
            get(bookings::get_booking).patch(bookings::approve_booking),
        )
        // Item requests
        .route(
            "/requests",
            get(requests::list_own_requests).post(requests::create_request),
        )
        .route("/requests/all", get(requests::list_all_requests))
        .route("/requests/:id", get(requests::get_request))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    routes
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
