//! Diagnostic logging.
//!
//! User-facing output is printed directly; `tracing` events carry probe
//! decisions and swallowed failures. They go to stderr, filtered by
//! `CREATE_WPTHEME_LOG` (default `warn`).

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "CREATE_WPTHEME_LOG";

/// Install the global subscriber. Safe to call more than once.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
