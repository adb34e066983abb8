//! Tracing subscriber setup for the binary.

use tracing_subscriber::{EnvFilter, prelude::*};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "CANOPY_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

/// Install a stderr subscriber filtered by `CANOPY_LOG`, or at `debug`
/// when `verbose` is set.
pub fn init(verbose: bool) {
    let directive = filter_directive(verbose, std::env::var(LOG_ENV).ok());
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(directive));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("warning: tracing subscriber already initialized");
    }
}

fn filter_directive(verbose: bool, env: Option<String>) -> String {
    if verbose {
        return "debug".to_string();
    }
    env.filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string())
}
