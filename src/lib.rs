//! ShareIt item sharing backend
//!
//! Users list items, other users book them over date ranges and owners
//! approve or reject the bookings. The crate ships two binaries: the
//! `shareit-server` owning business logic and persistence, and the
//! `shareit-gateway` validating requests before forwarding them to it.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all server handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
