//! Logging setup.
//!
//! Logs go to stderr through `tracing-subscriber`. `RUST_LOG` takes
//! precedence; otherwise `--verbose` selects `debug` and the config's
//! `[logging] level` applies.

use tracing_subscriber::EnvFilter;

/// Filter directive for this crate and its core library at `level`.
pub fn directive(level: &str) -> String {
    format!("home_inventory={level},home_inventory_core={level},hinv={level}")
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(level: &str, verbose: bool) {
    let level = if verbose { "debug" } else { level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive(level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
