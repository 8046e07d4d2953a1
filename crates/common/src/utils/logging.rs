use std::io;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,tower_http=info,axum=info,sqlx=warn,sea_orm=warn";

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Initialize a compact, human readable subscriber on stdout.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info` with quiet database drivers
pub fn init_logging_default() {
    let _ = fmt()
        .with_env_filter(env_filter(DEFAULT_FILTER))
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize a subscriber emitting one JSON object per event on stdout.
/// Handler and service spans are kept at debug so request ids show up in
/// machine-parsed logs; override with e.g. `RUST_LOG=info,service=trace`.
pub fn init_logging_json() {
    let _ = fmt()
        .with_env_filter(env_filter("info,server=debug,service=debug,sqlx=warn,sea_orm=warn"))
        .with_target(true)
        .json()
        .with_current_span(true)
        .with_writer(io::stdout)
        .try_init();
}

/// Pick the subscriber by format; repeated calls are no-ops.
pub fn init_logging(json: bool) {
    if json {
        init_logging_json();
    } else {
        init_logging_default();
    }
}
