//! # Structured Logging
//!
//! Opt-in tracing initialization for binaries and tests that embed this
//! crate. Library code only emits `tracing` events (lifecycle transitions at
//! debug, discarded re-opens at warn); nothing is logged on the producer
//! error path, which surfaces to the caller unchanged.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "ITEMSTREAM_LOG";

/// Filter applied when `ITEMSTREAM_LOG` is unset or unparsable.
pub const DEFAULT_DIRECTIVE: &str = "itemstream=info";

/// Initialize console logging with an `ITEMSTREAM_LOG` env filter.
///
/// Safe to call any number of times; only the first call in the process does
/// anything. Uses `try_init` so an already-installed global subscriber (from
/// a host application) is kept rather than fought over.
pub fn init_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_filter(filter),
        );

        if subscriber.try_init().is_err() {
            tracing::debug!("global tracing subscriber already initialized, keeping existing one");
        }
    });
}
