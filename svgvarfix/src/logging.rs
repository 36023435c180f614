//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr so stdout stays reserved for status lines and
//! JSON reports.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` overrides the default `warn` level unless `verbose` asks for
/// `debug`. Calling this more than once is harmless.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
