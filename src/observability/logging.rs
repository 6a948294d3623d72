//! Structured logging.
//!
//! # Responsibilities
//! - Build the tracing subscriber from config
//! - Hand the resulting `Dispatch` to components that log
//!
//! # Design Decisions
//! - `RUST_LOG` overrides the configured filter
//! - The dispatch is returned so it can be injected, not only installed globally

use tracing::Dispatch;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

/// Build a subscriber for `config` without installing it.
pub fn build_dispatch(config: &ObservabilityConfig) -> Dispatch {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let compact = config.log_format == LogFormat::Compact;
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(compact.then(|| fmt::layer().compact()))
        .with((!compact).then(fmt::layer));

    Dispatch::new(subscriber)
}

/// Build the subscriber and install it as the process default.
///
/// Returns the dispatch for injection into the router. If a global default is
/// already set, that one stays and the new dispatch is still returned.
pub fn init_logging(config: &ObservabilityConfig) -> Dispatch {
    let dispatch = build_dispatch(config);
    if tracing::dispatcher::set_global_default(dispatch.clone()).is_err() {
        tracing::dispatcher::with_default(&dispatch, || {
            tracing::warn!("Global subscriber already set; using injected dispatch only");
        });
    }
    dispatch
}
