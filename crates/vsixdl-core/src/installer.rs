//! Editor CLI discovery and `--install-extension` invocation.
//!
//! The search path is always passed in by the caller so discovery can be
//! pointed at a scratch directory in tests.

use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

/// First candidate found as an executable file in a `search_path` directory.
///
/// `search_path` has the same format as `PATH`. `None` or an empty value finds nothing.
/// A candidate containing a directory part (`./bin/code`, `/opt/vscode/bin/code`) is
/// checked as given and never looked up in `search_path`.
pub fn find_editor<S: AsRef<str>>(candidates: &[S], search_path: Option<&OsStr>) -> Result<PathBuf> {
    let dirs: Vec<PathBuf> = search_path
        .map(|p| std::env::split_paths(p).collect())
        .unwrap_or_default();

    for candidate in candidates.iter().map(AsRef::as_ref) {
        if let Some(path) = resolve_in(candidate, &dirs) {
            tracing::info!("using code CLI: {}", path.display());
            return Ok(path);
        }
        tracing::debug!("{} not found on search path", candidate);
    }

    let tried = candidates
        .iter()
        .map(|c| format!("'{}'", c.as_ref()))
        .collect::<Vec<_>>()
        .join(", ");
    Err(Error::ToolNotFound { tried })
}

fn resolve_in(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    if Path::new(name).components().count() > 1 {
        return executable_names(name)
            .into_iter()
            .map(PathBuf::from)
            .find(|p| is_executable(p));
    }
    dirs.iter()
        .filter(|d| !d.as_os_str().is_empty())
        .flat_map(|d| executable_names(name).into_iter().map(move |n| d.join(n)))
        .find(|p| is_executable(p))
}

#[cfg(windows)]
fn executable_names(name: &str) -> Vec<String> {
    // `code` ships as `code.cmd` on Windows.
    vec![
        format!("{}.cmd", name),
        format!("{}.exe", name),
        name.to_string(),
    ]
}

#[cfg(not(windows))]
fn executable_names(name: &str) -> Vec<String> {
    vec![name.to_string()]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Runs `<tool> --install-extension <vsix>` with inherited stdio and waits for it.
pub fn install_extension(tool: &Path, vsix: &Path) -> Result<()> {
    let tool_name = tool.display().to_string();
    tracing::info!("installing {} with {}", vsix.display(), tool_name);

    let status = Command::new(tool)
        .arg("--install-extension")
        .arg(vsix)
        .status()
        .map_err(|source| Error::Launch {
            tool: tool_name.clone(),
            source,
        })?;

    if !status.success() {
        return Err(Error::Install {
            tool: tool_name,
            status,
        });
    }
    tracing::info!("{} installed {}", tool_name, vsix.display());
    Ok(())
}
