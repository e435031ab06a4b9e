//! Logging setup.

use std::io;

use tracing_subscriber::{EnvFilter, prelude::*};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "DISKUSAGE_LOG";

/// Installs the global subscriber. Output goes to stderr so that dry-run
/// datapoints on stdout stay machine readable.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_file(false);

    if json {
        tracing_subscriber::registry()
            .with(fmt.json().with_filter(filter))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt.compact().with_filter(filter))
            .init();
    }
}
