//! Structured logging using **tracing**.
//!
//! Diagnostics always go to stderr so stdout stays reserved for the report.
//! Filtering follows `RUST_LOG` when set and defaults to `warn` otherwise.

use tracing::warn;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initializes the global tracing collector (subscriber).
///
/// Call this *once* at startup. With `json` set, events are emitted as JSON
/// lines, matching the machine-readable report mode.
///
/// # Environment Variables
/// - `RUST_LOG`: Controls log filtering (e.g., `RUST_LOG=undefiner_core=debug`)
pub fn init_logging(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_level(true)
        .with_target(true)
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr);

    // try_init: a second call (tests, embedding) leaves the first collector in place
    let result = if json {
        builder
            .json()
            .with_ansi(false)
            .with_current_span(true)
            .try_init()
    } else {
        builder.without_time().try_init()
    };

    if result.is_err() {
        warn!("tracing subscriber already installed");
    }
}

