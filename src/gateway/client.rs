//! HTTP client for the shareit-server

use std::time::Duration;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method},
    response::Response,
};
use reqwest::{Client, RequestBuilder};

use crate::{
    config::GatewayConfig,
    error::{AppError, AppResult},
    models::SHARER_USER_ID_HEADER,
};

/// Forwards validated requests to the server
#[derive(Clone)]
pub struct ServerClient {
    http: Client,
    base_url: String,
}

impl ServerClient {
    pub fn new(config: &GatewayConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }

    /// Start a request to `path` on the server, identifying the caller when known
    pub fn request(&self, method: Method, path: &str, user_id: Option<i64>) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match user_id {
            Some(id) => builder.header(SHARER_USER_ID_HEADER, id),
            None => builder,
        }
    }

    pub fn get(&self, path: &str, user_id: Option<i64>) -> RequestBuilder {
        self.request(Method::GET, path, user_id)
    }

    pub fn post(&self, path: &str, user_id: Option<i64>) -> RequestBuilder {
        self.request(Method::POST, path, user_id)
    }

    pub fn patch(&self, path: &str, user_id: Option<i64>) -> RequestBuilder {
        self.request(Method::PATCH, path, user_id)
    }

    pub fn delete(&self, path: &str, user_id: Option<i64>) -> RequestBuilder {
        self.request(Method::DELETE, path, user_id)
    }

    /// Send the request and relay the server's status, content type and body
    pub async fn relay(&self, request: RequestBuilder) -> AppResult<Response> {
        let upstream = request.send().await.map_err(|e| {
            tracing::error!("Server request failed: {}", e);
            AppError::Upstream(e.to_string())
        })?;

        let status = upstream.status();
        let content_type = upstream.headers().get(CONTENT_TYPE).cloned();
        let body = upstream
            .bytes()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;
        tracing::debug!("Server answered {} with {} bytes", status, body.len());

        let mut response = Response::new(Body::from(body));
        *response.status_mut() = status;
        if let Some(content_type) = content_type {
            response.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        Ok(response)
    }
}
