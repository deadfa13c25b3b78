//! Log setup for the `ncp` binary.
//!
//! Records go to `$XDG_STATE_HOME/ncp/ncp.log`. When that file cannot be
//! opened they go to stderr. `RUST_LOG` replaces the default filter.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,ncp=debug,ncp_core=debug";

/// Where log records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

/// `~/.local/state/ncp/ncp.log` unless `XDG_STATE_HOME` says otherwise.
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ncp")?;
    Ok(xdg_dirs.get_state_home().join("ncp").join("ncp.log"))
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create log dir {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber and reports where it writes. A subscriber
/// that is already installed is left alone.
pub fn init() -> LogTarget {
    let opened = log_path().and_then(|path| open_log_file(&path).map(|file| (path, file)));
    match opened {
        Ok((path, file)) => {
            let installed = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .is_ok();
            if installed {
                tracing::info!(
                    "ncp {} logging to {}",
                    env!("CARGO_PKG_VERSION"),
                    path.display()
                );
            }
            LogTarget::File(path)
        }
        Err(err) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(io::stderr)
                .with_ansi(false)
                .try_init();
            tracing::debug!("log file unavailable, using stderr: {:#}", err);
            LogTarget::Stderr
        }
    }
}
