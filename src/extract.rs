//! Request extractors shared by the server and the gateway
//!
//! They behave like their axum counterparts but reject with [`AppError`],
//! so malformed input gets the same `{"error": ...}` body as every other
//! failure.

use axum::{
    async_trait,
    extract::{rejection::PathRejection, FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{error::AppError, models::SHARER_USER_ID_HEADER};

/// Id of the calling user, read from the `X-Sharer-User-Id` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharerId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for SharerId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(SHARER_USER_ID_HEADER)
            .ok_or_else(|| {
                AppError::BadRequest(format!("Missing {} header", SHARER_USER_ID_HEADER))
            })?;

        value
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map(SharerId)
            .ok_or_else(|| {
                AppError::BadRequest(format!("Invalid {} header", SHARER_USER_ID_HEADER))
            })
    }
}

/// JSON body that is deserialized then checked with `validator`
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Query string parameters
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(QueryParams(value))
    }
}

/// Path parameters
#[derive(Debug, Clone)]
pub struct PathParam<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PathParam<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| AppError::Validation(rejection.body_text()))?;
        Ok(PathParam(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{pagination::PageQuery, user::CreateUser};
    use axum::{
        body::{to_bytes, Body},
        http::StatusCode,
        routing::{get, post},
        Router,
    };
    use tower::ServiceExt;

    async fn whoami(SharerId(id): SharerId) -> String {
        id.to_string()
    }

    async fn create(ValidatedJson(user): ValidatedJson<CreateUser>) -> String {
        user.email
    }

    async fn page(QueryParams(query): QueryParams<PageQuery>) -> String {
        format!("{:?}", query.size)
    }

    async fn item(PathParam(id): PathParam<i64>) -> String {
        id.to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .route("/users", post(create))
            .route("/page", get(page))
            .route("/items/:id", get(item))
    }

    async fn send(request: axum::http::Request<Body>) -> (StatusCode, String) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn get_request(uri: &str) -> axum::http::Request<Body> {
        axum::http::Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_sharer_id_is_read_from_header() {
        let request = axum::http::Request::get("/whoami")
            .header(SHARER_USER_ID_HEADER, "42")
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(request).await, (StatusCode::OK, "42".to_string()));
    }

    #[tokio::test]
    async fn test_missing_or_invalid_sharer_id_is_bad_request() {
        let (status, body) = send(get_request("/whoami")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Missing X-Sharer-User-Id header"));

        let request = axum::http::Request::get("/whoami")
            .header(SHARER_USER_ID_HEADER, "abc")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_validated_json_rejects_invalid_bodies() {
        let post = |body: &'static str| {
            axum::http::Request::post("/users")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap()
        };

        let (status, body) = send(post(r#"{"name": "Ann", "email": "ann@mail.com"}"#)).await;
        assert_eq!((status, body.as_str()), (StatusCode::OK, "ann@mail.com"));

        let (status, _) = send(post(r#"{"name": "Ann", "email": "not-an-email"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(post(r#"{"name": "#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.starts_with(r#"{"error":"#));
    }

    #[tokio::test]
    async fn test_query_and_path_rejections_are_bad_requests() {
        assert_eq!(send(get_request("/page?size=5")).await.1, "Some(5)");

        let (status, body) = send(get_request("/page?size=five")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.starts_with(r#"{"error":"#));

        let (status, _) = send(get_request("/items/abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
