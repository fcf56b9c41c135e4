//! Tracing subscriber setup for the `mmm` binary.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Installs a stderr `fmt` layer filtered by `RUST_LOG`, defaulting to `warn`.
///
/// Logs go to stderr so they never interleave with the report on stdout.
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging() {
    let rust_log = std::env::var("RUST_LOG")
        .unwrap_or_default()
        .replace(char::is_whitespace, "");

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(rust_log);

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_thread_names(true)
        .with_target(false)
        .with_filter(env_filter);

    let _ = tracing_subscriber::registry().with(layer).try_init();
}
