//! HTTP client for integration testing.
//!
//! Executes requests directly against the router without a network socket.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

/// HTTP client for executing REST calls in tests.
#[derive(Clone)]
pub struct ApiClient {
    app: Router,
}

/// Result of one request.
#[derive(Debug)]
pub struct ApiResult {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResult {
    /// The `error` message of a failure body.
    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }

    /// `posting_date` values of a list response, in order.
    pub fn posting_dates(&self) -> Vec<String> {
        self.body
            .as_array()
            .expect("expected a JSON array")
            .iter()
            .map(|job| job["posting_date"].as_str().unwrap().to_string())
            .collect()
    }

    /// `id` values of a list response, in order.
    pub fn ids(&self) -> Vec<i64> {
        self.body
            .as_array()
            .expect("expected a JSON array")
            .iter()
            .map(|job| job["id"].as_i64().unwrap())
            .collect()
    }
}

impl ApiClient {
    pub fn new(app: Router) -> Self {
        Self { app }
    }

    pub async fn send(&self, request: Request<Body>) -> ApiResult {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        ApiResult { status, body }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> ApiResult {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        self.send(request).await
    }

    pub async fn get(&self, uri: &str) -> ApiResult {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> ApiResult {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> ApiResult {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> ApiResult {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> ApiResult {
        self.request(Method::DELETE, uri, None).await
    }
}
