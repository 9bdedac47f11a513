//! `tracing` subscriber setup for the binary.

use keytally_core::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

const DEBUG_LOG_PATH: &str = "/tmp/keytally-debug.log";

/// Install the global subscriber.
///
/// With `debug`, everything down to `debug` goes to [`DEBUG_LOG_PATH`], which
/// keeps the raw-mode terminal clean while tracking. Otherwise logs go to
/// stderr filtered by `RUST_LOG`, falling back to the configured level.
pub fn init(debug: bool, logging: &LoggingConfig) -> anyhow::Result<()> {
    if debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(DEBUG_LOG_PATH)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))?;
        tracing::info!("keytally debug log started (tail -f {DEBUG_LOG_PATH})");
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level)),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
}
