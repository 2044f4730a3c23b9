//! Logging setup using `tracing` and `tracing-subscriber`.

use std::io::{self, IsTerminal};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Initialize the global subscriber.
///
/// `RUST_LOG` overrides the verbosity-derived level; external crates are
/// held at `warn` to keep the output readable.
pub fn init_logging(level: LevelFilter) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.to_string().to_lowercase();
        EnvFilter::new(format!(
            "warn,tatame={level},tatame_cli={level},tatame_engine={level},\
             tatame_model={level},tatame_store={level},tatame_sync={level}",
        ))
    });

    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time();

    tracing_subscriber::registry().with(filter).with(layer).init();
}
