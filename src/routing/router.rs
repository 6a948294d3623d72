//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Register routes into the route table
//! - Resolve (method, path) to a handler
//! - Invoke the handler with the captured path parameters
//!
//! # Design Decisions
//! - Registration takes `&mut self`, dispatch takes `&self`: once shared behind
//!   an `Arc` the table is frozen and needs no lock
//! - Exact literal match always beats a pattern match
//! - Patterns are tried in registration order; first match wins
//! - Unknown method and unmatched path both fall back to the not-found handler
//! - Logging goes through an injected `Dispatch` (no-op unless provided)

use std::sync::Arc;

use axum::body::Bytes;
use axum::http::Request;
use axum::response::Response;
use tracing::Dispatch;

use crate::http::RouteRequest;
use crate::routing::error::RouteError;
use crate::routing::handler::{not_found, Handler};
use crate::routing::method::Method;
use crate::routing::params::PathParams;
use crate::routing::pattern::RouteKey;
use crate::routing::table::{RouteEntry, RouteTable};

/// How a request was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Literal route equal to the path.
    Exact,
    /// Pattern route matching the path.
    Pattern,
    /// No route; the not-found handler.
    NotFound,
}

/// Outcome of [`Router::resolve`].
pub struct Resolved<'a> {
    pub handler: &'a Arc<dyn Handler>,
    pub params: PathParams,
    pub kind: MatchKind,
    /// The matched route, `None` for [`MatchKind::NotFound`].
    pub route: Option<&'a RouteEntry>,
}

impl std::fmt::Debug for Resolved<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolved")
            .field("kind", &self.kind)
            .field("route", &self.route)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Request router: the route table plus the matching algorithm.
pub struct Router {
    table: RouteTable,
    not_found: Arc<dyn Handler>,
    log: Dispatch,
}

impl Router {
    /// A router that logs nothing.
    pub fn new() -> Self {
        Self::with_logger(Dispatch::none())
    }

    /// A router that sends its diagnostics to `log`.
    pub fn with_logger(log: Dispatch) -> Self {
        Self {
            table: RouteTable::with_logger(log.clone()),
            not_found: Arc::new(not_found),
            log,
        }
    }

    /// Register `handler` for `method` and `path`.
    ///
    /// `path` must start with `/`. Each `{name}` placeholder matches one
    /// segment of `[a-z0-9-_]` characters, case-insensitively. Registering the
    /// same path twice replaces the earlier handler.
    pub fn register_route<H: Handler>(
        &mut self,
        method: Method,
        path: &str,
        handler: H,
    ) -> Result<(), RouteError> {
        let key = RouteKey::compile(path)?;
        self.table
            .insert(method, RouteEntry::new(path, key, Arc::new(handler)));
        Ok(())
    }

    pub fn get<H: Handler>(&mut self, path: &str, handler: H) -> Result<(), RouteError> {
        self.register_route(Method::Get, path, handler)
    }

    pub fn post<H: Handler>(&mut self, path: &str, handler: H) -> Result<(), RouteError> {
        self.register_route(Method::Post, path, handler)
    }

    pub fn put<H: Handler>(&mut self, path: &str, handler: H) -> Result<(), RouteError> {
        self.register_route(Method::Put, path, handler)
    }

    pub fn delete<H: Handler>(&mut self, path: &str, handler: H) -> Result<(), RouteError> {
        self.register_route(Method::Delete, path, handler)
    }

    pub fn patch<H: Handler>(&mut self, path: &str, handler: H) -> Result<(), RouteError> {
        self.register_route(Method::Patch, path, handler)
    }

    /// Replace the handler used when nothing matches.
    pub fn set_not_found<H: Handler>(&mut self, handler: H) {
        self.not_found = Arc::new(handler);
    }

    /// Read-only view of every registered route.
    pub fn routes(&self) -> &RouteTable {
        &self.table
    }

    /// Resolve `method` and `path` to a handler.
    pub fn resolve(&self, method: &str, path: &str) -> Resolved<'_> {
        let routes = method
            .parse::<Method>()
            .ok()
            .and_then(|m| self.table.routes_for(m));
        let Some(routes) = routes else {
            return self.not_found_resolution();
        };

        if let Some(entry) = routes.literal(path) {
            return Resolved {
                handler: entry.handler(),
                params: PathParams::new(),
                kind: MatchKind::Exact,
                route: Some(entry),
            };
        }

        for entry in routes.patterns() {
            let RouteKey::Pattern(pattern) = entry.key() else {
                continue;
            };
            if let Some(params) = pattern.captures(path) {
                return Resolved {
                    handler: entry.handler(),
                    params,
                    kind: MatchKind::Pattern,
                    route: Some(entry),
                };
            }
        }

        self.not_found_resolution()
    }

    /// Resolve and invoke the handler for `request`.
    pub fn dispatch(&self, request: Request<Bytes>) -> Response {
        let method = request.method().as_str();
        let path = request.uri().path();

        tracing::dispatcher::with_default(&self.log, || {
            tracing::debug!(method = %method, path = %path, "Received request");
        });

        let resolved = self.resolve(method, path);

        tracing::dispatcher::with_default(&self.log, || {
            tracing::trace!(
                kind = ?resolved.kind,
                route = resolved.route.map(RouteEntry::path),
                "Request resolved"
            );
        });

        let handler = resolved.handler;
        let req = RouteRequest::new(request, resolved.params);
        handler.call(&req)
    }

    fn not_found_resolution(&self) -> Resolved<'_> {
        Resolved {
            handler: &self.not_found,
            params: PathParams::new(),
            kind: MatchKind::NotFound,
            route: None,
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.table)
            .finish_non_exhaustive()
    }
}
