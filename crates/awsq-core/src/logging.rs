//! Logging init: file under the XDG state dir, or stderr when that fails.
//!
//! `RUST_LOG` always wins. Otherwise the CLI's `-v` count picks the filter:
//! request lifecycle events (built, sent, retried, decoded) are `debug` in
//! `awsq_core`, so one `-v` shows them.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter directives for a `-v` count.
pub fn default_directives(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn,awsq_core=info",
        1 => "info,awsq_core=debug,awsq=debug",
        _ => "debug,awsq_core=trace,awsq=trace",
    }
}

fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)))
}

/// Path of the log file: `~/.local/state/awsq/awsq.log`.
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("awsq")?;
    Ok(xdg_dirs.get_state_home().join("awsq.log"))
}

/// Append structured logs to [`log_path`].
///
/// Errors (unwritable state dir, subscriber already set) are returned so the
/// caller can fall back to [`init_logging_stderr`].
pub fn init_logging(verbosity: u8) -> Result<PathBuf> {
    let path = log_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let file: File = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open {}", path.display()))?;

    // Mutex<File> is a MakeWriter; events are written whole under the lock.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber: {}", e))?;

    tracing::info!(path = %path.display(), "awsq logging initialized");
    Ok(path)
}

/// Log to stderr only. Never fails; a second init is ignored.
pub fn init_logging_stderr(verbosity: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
