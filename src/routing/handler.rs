//! Route handlers and the built-in fallback.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::http::RouteRequest;

/// Body written by the built-in not-found handler.
pub const NOT_FOUND_BODY: &str = "404 - Page not found\n";

/// Behavior invoked for a resolved route.
///
/// Handlers run synchronously on the request task. Any
/// `Fn(&RouteRequest) -> Response` closure is a handler.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, req: &RouteRequest) -> Response;
}

impl<F> Handler for F
where
    F: Fn(&RouteRequest) -> Response + Send + Sync + 'static,
{
    fn call(&self, req: &RouteRequest) -> Response {
        self(req)
    }
}

/// Default handler for unknown methods and unmatched paths.
pub fn not_found(_req: &RouteRequest) -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain")],
        NOT_FOUND_BODY,
    )
        .into_response()
}
