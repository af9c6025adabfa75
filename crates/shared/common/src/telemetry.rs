//! Tracing subscriber setup shared by binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// `verbose` forces the `debug` level; otherwise `filter` is used (usually
/// the configured `RUST_LOG`). Output goes to stderr so stdout stays free for
/// listings.
pub fn init_tracing(verbose: bool, filter: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
