//! Tracing subscriber setup.
//!
//! The terminal belongs to the UI, so logs go to a file. Follow them with
//! `tail -f` from another terminal.

use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, AppResult};

/// Installs a file-backed fmt subscriber.
///
/// Honors `RUST_LOG` and defaults to `info`. The parent directory is created
/// when missing.
pub fn init(log_path: &Path) -> AppResult<()> {
    let directory = log_path.parent().ok_or_else(|| {
        AppError::invalid_argument(format!(
            "log path has no parent directory: {}",
            log_path.display()
        ))
    })?;
    let file_name = log_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            AppError::invalid_argument(format!("invalid log file path: {}", log_path.display()))
        })?;

    if !directory.as_os_str().is_empty() {
        std::fs::create_dir_all(directory).map_err(|source| {
            AppError::io_with_context(
                source,
                format!("failed to create log directory: {}", directory.display()),
            )
        })?;
    }

    let appender = tracing_appender::rolling::never(directory, file_name);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(appender)
        .with_ansi(false)
        .try_init()
        .map_err(|_| AppError::unsupported("tracing subscriber already initialized"))
}
