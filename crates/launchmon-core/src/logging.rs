//! Logging configuration using tracing
//!
//! The CLI owns stdout for command output, so diagnostics go to a rolling
//! log file instead of the terminal.

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Initialize the logging subsystem
///
/// Logs are written to the platform data directory (e.g.
/// `~/.local/share/launchmon/logs/` on Linux).
/// Log level is controlled by the `LAUNCHMON_LOG` environment variable.
///
/// # Examples
/// ```bash
/// LAUNCHMON_LOG=debug launchmon tail
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "launchmon.log");

    // Default to info, allow override via LAUNCHMON_LOG
    let env_filter = EnvFilter::try_from_env("LAUNCHMON_LOG")
        .unwrap_or_else(|_| EnvFilter::new("launchmon=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("launchmon starting");
    tracing::info!("Log directory: {}", log_dir.display());

    Ok(())
}

/// Get the log directory path
fn get_log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("launchmon").join("logs")
}
