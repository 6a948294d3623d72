//! Request view handed to route handlers.
//!
//! # Responsibilities
//! - Carry the buffered request (method, URI, headers, body)
//! - Expose the values captured from placeholder segments
//!
//! # Design Decisions
//! - Bodies are buffered before dispatch; handlers never stream
//! - Captured values keep the casing of the incoming path

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, Request, Uri};

use crate::routing::PathParams;

/// A request resolved to a route.
#[derive(Debug)]
pub struct RouteRequest {
    inner: Request<Bytes>,
    params: PathParams,
}

impl RouteRequest {
    pub fn new(inner: Request<Bytes>, params: PathParams) -> Self {
        Self { inner, params }
    }

    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    pub fn uri(&self) -> &Uri {
        self.inner.uri()
    }

    pub fn path(&self) -> &str {
        self.inner.uri().path()
    }

    pub fn query(&self) -> Option<&str> {
        self.inner.uri().query()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    pub fn body(&self) -> &Bytes {
        self.inner.body()
    }

    /// Value captured for the placeholder `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    pub fn params(&self) -> &PathParams {
        &self.params
    }

    pub fn into_inner(self) -> Request<Bytes> {
        self.inner
    }
}
