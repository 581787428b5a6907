//! End-to-end run: fetch page → locate asset → download → optionally install.
//!
//! Each stage returns a `Result`; the first error ends the run. Everything the
//! stages need from the environment (destination dir, `PATH`) is carried in
//! [`Request`], so a run can be driven against a local server and a scratch
//! directory.

use crate::asset::{self, AssetRef};
use crate::config::VsixdlConfig;
use crate::downloader;
use crate::error::{Error, Result};
use crate::installer;
use crate::marketplace;
use crate::package_id::{Invocation, PackageId};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Progress notifications emitted between stages.
#[derive(Debug)]
pub enum Event<'a> {
    Fetching { package: &'a PackageId, url: &'a str },
    Located { asset: &'a AssetRef, vsix_url: &'a str },
    Downloading { path: &'a Path },
    Downloaded { path: &'a Path, bytes: u64 },
    Installing { tool: &'a Path, path: &'a Path },
    Installed,
    SkippedInstall,
}

/// Receives [`Event`]s as the run advances.
pub trait Observer {
    fn on_event(&mut self, event: &Event<'_>);
}

/// Observer that ignores everything.
impl Observer for () {
    fn on_event(&mut self, _event: &Event<'_>) {}
}

#[derive(Debug, Clone)]
pub struct Request {
    pub invocation: Invocation,
    /// Directory the `.vsix` is written to (the CLI uses the current directory).
    pub dest_dir: PathBuf,
    /// `PATH`-formatted search path used to find the editor CLI.
    pub search_path: Option<OsString>,
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub vsix_url: String,
    pub path: PathBuf,
    pub bytes: u64,
    /// Editor CLI used, when `-i` was given.
    pub installed_with: Option<PathBuf>,
}

/// Runs every stage for `req`. The downloaded file is kept even when the
/// install stage fails.
pub fn run(req: &Request, cfg: &VsixdlConfig, observer: &mut dyn Observer) -> Result<Outcome> {
    let package = &req.invocation.package;
    let http = cfg.http_options();
    let filename = package.vsix_filename()?;

    let page_url = marketplace::item_url(&cfg.marketplace_url, package);
    observer.on_event(&Event::Fetching {
        package,
        url: &page_url,
    });
    let page = marketplace::fetch_page(&page_url, &http)?;

    let asset = asset::locate(&page).ok_or(Error::NotFound)?;
    let vsix_url = asset.download_url();
    observer.on_event(&Event::Located {
        asset: &asset,
        vsix_url: &vsix_url,
    });

    let path = req.dest_dir.join(&filename);
    observer.on_event(&Event::Downloading { path: &path });
    let bytes = downloader::download_to_file(&vsix_url, &path, &http)?;
    observer.on_event(&Event::Downloaded { path: &path, bytes });

    let installed_with = if req.invocation.install {
        let tool = find_tool(req, cfg)?;
        observer.on_event(&Event::Installing {
            tool: &tool,
            path: &path,
        });
        installer::install_extension(&tool, &path)?;
        observer.on_event(&Event::Installed);
        Some(tool)
    } else {
        observer.on_event(&Event::SkippedInstall);
        None
    };

    Ok(Outcome {
        vsix_url,
        path,
        bytes,
        installed_with,
    })
}

/// An explicit `--editor` replaces the configured candidate list.
fn find_tool(req: &Request, cfg: &VsixdlConfig) -> Result<PathBuf> {
    let search_path = req.search_path.as_deref();
    match &req.invocation.editor {
        Some(editor) => installer::find_editor(std::slice::from_ref(editor), search_path),
        None => installer::find_editor(cfg.editors.as_slice(), search_path),
    }
}
