//! Tracing subscriber setup

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Filter directive for the given `-v` count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "travel_expenses=warn",
        1 => "travel_expenses=info",
        _ => "travel_expenses=debug",
    }
}

/// Install the global tracing subscriber, writing to stderr
///
/// `RUST_LOG` wins over the verbosity when it is set. Later calls are no-ops.
pub fn init_tracing(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
