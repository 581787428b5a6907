//! Tracing setup. Records go to `vsixdl.log` in the XDG state dir; when that
//! cannot be opened the CLI falls back to a quiet stderr subscriber.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "vsixdl.log";

/// Used for the log file when `RUST_LOG` is unset or invalid.
const FILE_FILTER: &str = "info,vsixdl=debug,vsixdl_core=debug";

/// Used for the stderr fallback, which shares the terminal with user output.
const STDERR_FILTER: &str = "warn";

fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Opens (creating as needed) the append-only log file under `state_dir`.
fn open_log_file(state_dir: &Path) -> Result<(PathBuf, File)> {
    fs::create_dir_all(state_dir)
        .with_context(|| format!("creating log dir {}", state_dir.display()))?;
    let path = state_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;
    Ok((path, file))
}

/// Installs the global subscriber writing to `~/.local/state/vsixdl/vsixdl.log`.
/// Returns Err when the file is unusable so the caller can use [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let state_dir = xdg::BaseDirectories::with_prefix("vsixdl")?.get_state_home();
    let (path, file) = open_log_file(&state_dir)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter_or(FILE_FILTER))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    tracing::info!("vsixdl {} logging to {}", env!("CARGO_PKG_VERSION"), path.display());
    Ok(())
}

/// Stderr-only subscriber; warnings and above unless `RUST_LOG` says otherwise.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_or(STDERR_FILTER))
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
