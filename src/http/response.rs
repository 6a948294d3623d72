//! Transport-level failures rendered as responses.
//!
//! # Design Decisions
//! - A failed request never takes the server down; it gets an error response
//! - Oversized bodies are a 413, whether declared up front or found while buffering
//! - Any other failure while buffering the body is a 500
//! - Error bodies are plain text, like the not-found body

use std::error::Error as StdError;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use http_body_util::LengthLimitError;
use thiserror::Error;

/// Errors raised while assembling a request for the router.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("request body of {declared} bytes exceeds limit of {limit} bytes")]
    PayloadTooLarge { declared: u64, limit: usize },

    #[error("request body exceeds limit of {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("failed to read request body: {0}")]
    Body(#[source] axum::Error),
}

impl DispatchError {
    /// Classify a failure from buffering a body capped at `limit` bytes.
    pub fn from_body_error(err: axum::Error, limit: usize) -> Self {
        if exceeds_limit(&err) {
            DispatchError::BodyTooLarge { limit }
        } else {
            DispatchError::Body(err)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::PayloadTooLarge { .. } | DispatchError::BodyTooLarge { .. } => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            DispatchError::Body(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn exceeds_limit(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.is::<LengthLimitError>() {
            return true;
        }
        current = e.source();
    }
    false
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = format!(
            "{} - {}\n",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Error")
        );
        (status, [(header::CONTENT_TYPE, "text/plain")], body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_payload_too_large_response() {
        let err = DispatchError::PayloadTooLarge {
            declared: 10,
            limit: 5,
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
    }

    #[tokio::test]
    async fn test_limit_hit_while_buffering_is_too_large() {
        let err = axum::body::to_bytes(Body::from("more than four bytes"), 4)
            .await
            .unwrap_err();
        let err = DispatchError::from_body_error(err, 4);
        assert!(matches!(err, DispatchError::BodyTooLarge { limit: 4 }));
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_read_failure_is_internal() {
        let err = DispatchError::from_body_error(axum::Error::new("connection reset"), 4);
        assert!(matches!(err, DispatchError::Body(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
