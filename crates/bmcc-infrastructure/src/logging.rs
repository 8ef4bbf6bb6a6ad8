//! Tracing subscriber setup.
//!
//! Logs go to a daily rolling file under the logs directory so they never
//! interleave with the interactive prompt. `RUST_LOG` controls the filter.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_PREFIX: &str = "bmcc-guide.log";

/// Installs the global subscriber. Keep the returned guard alive until exit,
/// dropping it flushes the writer.
pub fn init_tracing(logs_dir: &Path) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)?;
    let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::AlreadyExists, e))?;

    Ok(guard)
}
