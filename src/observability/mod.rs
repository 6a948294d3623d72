//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! ServerConfig.observability
//!     → logging.rs (EnvFilter + fmt layer → Dispatch)
//!     → installed globally (tower-http TraceLayer, server lifecycle)
//!     → injected into Router (registration and dispatch records)
//! ```

pub mod logging;

pub use logging::{build_dispatch, init_logging};
