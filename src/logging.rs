//! Diagnostic logging setup
//!
//! Library code logs through `tracing` macros; the binary installs a
//! subscriber that writes to stderr so stdout stays free for progress
//! output and NDJSON events.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a `-v` count
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `verbosity` picks the level:
///
/// ```bash
/// upsync -vv                      # debug
/// RUST_LOG=upsync=trace upsync    # everything from this crate
/// ```
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));

    // A second init (tests, embedding) is not an error worth surfacing
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
