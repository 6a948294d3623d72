//! Route registration errors.

use thiserror::Error;

/// Errors raised while registering a route.
#[derive(Debug, Error)]
pub enum RouteError {
    /// Route paths must be non-empty and start with `/`.
    #[error("invalid route path {0:?}: must start with '/'")]
    InvalidPath(String),

    /// Unbalanced or nested braces.
    #[error("malformed placeholder in {path:?} at byte {position}: {reason}")]
    MalformedPlaceholder {
        path: String,
        position: usize,
        reason: &'static str,
    },

    /// The generated pattern was rejected by the regex engine.
    #[error("failed to compile pattern for {path:?}: {source}")]
    Pattern {
        path: String,
        #[source]
        source: regex::Error,
    },
}
