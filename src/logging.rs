//! Tracing subscriber setup
//!
//! Log level comes from `CATALOGR_LOG` (an `EnvFilter` directive), falling
//! back to `warn`, or `debug` with `--verbose`.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding the filter directive
pub const LOG_ENV: &str = "CATALOGR_LOG";

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error, for one-shot commands
    Stderr,
    /// Append to a file, for the terminal UI
    File(PathBuf),
}

/// `<cache_dir>/catalogr/catalogr.log`
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("catalogr").join("catalogr.log"))
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }))
}

fn open_log_file(path: &Path) -> io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber
///
/// Calling this more than once is harmless; later calls are ignored.
///
/// # Errors
///
/// Returns an I/O error if the log file cannot be opened.
pub fn init(verbose: bool, target: &LogTarget) -> io::Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(verbose));

    let installed = match target {
        LogTarget::Stderr => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .try_init(),
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_log_file_creates_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs").join("catalogr.log");

        open_log_file(&path).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_default_log_path_is_namespaced() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with("catalogr/catalogr.log"));
        }
    }
}
