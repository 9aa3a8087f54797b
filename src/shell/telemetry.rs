// Structured logging setup for the shell.
//
// Verbosity comes from RUST_LOG; without it the crate logs at debug and everything else at info.

use tracing_subscriber::{EnvFilter, fmt};

pub const DEFAULT_FILTER: &str = "info,app_event_watchers=debug";

pub fn init_telemetry() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    fmt().with_env_filter(env_filter).with_target(true).init();
}
