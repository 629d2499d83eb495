//! Logging setup.
//!
//! The TUI owns the terminal, so diagnostics go to a log file only. Fetch
//! failures end up here and nowhere else.

use std::path::Path;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Initialize file logging at `path`.
///
/// The level comes from `RUST_LOG` when set, otherwise from `default_level`.
/// The writer guard is forgotten to keep the appender alive for the program
/// lifetime.
pub fn init_file_logging(path: &Path, default_level: &str) -> anyhow::Result<()> {
    let directory = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("log file path has no file name: {}", path.display()))?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let file_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(file_filter),
        )
        .try_init()?;

    // Keep guard alive for the program lifetime
    std::mem::forget(_guard);
    Ok(())
}
