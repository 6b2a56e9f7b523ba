//! Gateway in front of the shareit-server
//!
//! Every request is checked here first: caller header, path, query string,
//! body shape and field constraints. Invalid requests are answered locally;
//! valid ones are forwarded to the server and its answer is relayed as is.

pub mod bookings;
pub mod client;
pub mod items;
pub mod requests;
pub mod users;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{api::health, config::AppConfig, error::AppResult};

pub use client::ServerClient;

/// State shared across all gateway handlers
#[derive(Clone)]
pub struct GatewayState {
    pub config: Arc<AppConfig>,
    pub client: ServerClient,
}

impl GatewayState {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let client = ServerClient::new(&config.gateway)?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }
}

/// Create the gateway router with all routes
pub fn create_router(state: GatewayState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
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
        .route("/bookings", get(bookings::list_bookings).post(bookings::create_booking))
        .route("/bookings/owner", get(bookings::list_owner_bookings))
        .route(
            "/bookings/:id",
            get(bookings::get_booking).patch(bookings::approve_booking),
        )
        // Requests
        .route(
            "/requests",
            get(requests::list_own_requests).post(requests::create_request),
        )
        .route("/requests/all", get(requests::list_all_requests))
        .route("/requests/:id", get(requests::get_request))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
