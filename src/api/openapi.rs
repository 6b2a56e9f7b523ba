//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bookings, health, items, requests, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ShareIt API",
        version = "1.0.0",
        description = "Peer-to-peer item sharing REST API"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Items
        items::list_items,
        items::search_items,
        items::get_item,
        items::create_item,
        items::update_item,
        items::add_comment,
        // Bookings
        bookings::create_booking,
        bookings::approve_booking,
        bookings::get_booking,
        bookings::list_bookings,
        bookings::list_owner_bookings,
        // Requests
        requests::create_request,
        requests::list_own_requests,
        requests::list_all_requests,
        requests::get_request,
    ),
    components(
        schemas(
            // Users
            crate::models::user::User,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Items
            crate::models::item::Item,
            crate::models::item::ItemDetails,
            crate::models::item::CreateItem,
            crate::models::item::UpdateItem,
            crate::models::comment::Comment,
            crate::models::comment::CreateComment,
            // Bookings
            crate::models::booking::BookingStatus,
            crate::models::booking::BookingShort,
            crate::models::booking::BookingDetails,
            crate::models::booking::CreateBooking,
            // Requests
            crate::models::request::ItemRequestDetails,
            crate::models::request::CreateItemRequest,
            // Pagination
            crate::models::pagination::PageQuery,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User management"),
        (name = "items", description = "Shared items and comments"),
        (name = "bookings", description = "Booking workflow"),
        (name = "requests", description = "Requests for items nobody has listed yet")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/users",
            "/users/{id}",
            "/items",
            "/items/search",
            "/items/{id}",
            "/items/{id}/comment",
            "/bookings",
            "/bookings/owner",
            "/bookings/{id}",
            "/requests",
            "/requests/all",
            "/requests/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
