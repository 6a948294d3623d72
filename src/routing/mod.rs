//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route registration (at startup, &mut Router):
//!     (method, path, handler)
//!     → pattern.rs (scan placeholders, compile anchored pattern)
//!     → table.rs (literal map or ordered pattern list, per method)
//!
//! Incoming request (&Router, shared via Arc):
//!     → router.rs (method lookup → exact match → pattern scan)
//!     → handler.rs (matched handler or not-found)
//! ```
//!
//! # Design Decisions
//! - Patterns compiled at registration, never in the request path
//! - Deterministic: patterns are tried in registration order
//! - Exact match first, then first matching pattern

pub mod error;
pub mod handler;
pub mod method;
pub mod params;
pub mod pattern;
pub mod router;
pub mod table;

pub use error::RouteError;
pub use handler::{not_found, Handler, NOT_FOUND_BODY};
pub use method::{Method, UnknownMethod};
pub use params::PathParams;
pub use pattern::{PathPattern, RouteKey, PARAM_CAPTURE};
pub use router::{MatchKind, Resolved, Router};
pub use table::{MethodRoutes, RouteEntry, RouteTable};
