//! File-based tracing setup.
//!
//! Logs go to a daily-rotated file instead of stderr so the terminal
//! stays clean while the UI is up. The same directory is where the
//! report attachment comes from when no log file is configured.

use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Filter applied when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "bugship=info,warn";

/// Install the global tracing subscriber.
///
/// Output goes to `bugship.log` with daily rotation under the
/// platform's local data directory, e.g. `~/.local/share/bugship/logs`
/// on Linux. `RUST_LOG` overrides the default filter.
pub fn init() -> anyhow::Result<()> {
    let dir = log_dir()?;
    std::fs::create_dir_all(&dir)?;

    let appender = RollingFileAppender::new(Rotation::DAILY, &dir, "bugship.log");
    let file_layer = fmt::layer()
        .with_writer(appender)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let subscriber = tracing_subscriber::registry()
        .with(file_layer)
        .with(env_filter());
    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "bugship starting up");
    tracing::debug!(log_dir = %dir.display(), "Log directory");

    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn log_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;
    Ok(base.join("bugship").join("logs"))
}

/// The most recently written log file, if any exists.
///
/// Used as the report attachment when no log file is configured: with
/// daily rotation the newest file is the one covering the session
/// being reported.
pub fn latest_log_file() -> Option<PathBuf> {
    latest_file_in(&log_dir().ok()?)
}

fn latest_file_in(dir: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    let mut newest: Option<(std::time::SystemTime, PathBuf)> = None;

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let modified = match entry.metadata().and_then(|m| m.modified()) {
            Ok(time) => time,
            Err(_) => continue,
        };
        if newest.as_ref().map_or(true, |(time, _)| modified > *time) {
            newest = Some((modified, path));
        }
    }

    newest.map(|(_, path)| path)
}

/// Write the shutdown marker. Call just before exit.
pub fn shutdown() {
    tracing::info!("bugship shutting down");
}
