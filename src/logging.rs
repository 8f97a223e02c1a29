//! Log subscriber construction.
//!
//! `init` returns a guard; the subscriber is active only while the guard
//! lives, so callers own the logging lifecycle instead of a global.

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;

pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// `RUST_LOG` overrides the verbosity-derived level.
pub fn init(verbosity: u8) -> DefaultGuard {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sigtrader={}", level_for(verbosity))));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_default(subscriber)
}
