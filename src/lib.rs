//! Minimal HTTP router with exact and `{placeholder}` routes.

pub mod config;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::ServerConfig;
pub use http::{HttpServer, RouteRequest};
pub use routing::{Handler, Method, RouteError, Router};
