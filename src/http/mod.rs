//! HTTP transport subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, timeout + trace layers, body buffering)
//!     → routing::Router::dispatch (resolve + invoke)
//!     → request.rs (RouteRequest handed to the handler)
//!     → response.rs (transport failures as responses)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::RouteRequest;
pub use response::DispatchError;
pub use server::{AppState, HttpServer};
