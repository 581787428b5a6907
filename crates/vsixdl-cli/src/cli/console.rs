//! Prints pipeline progress to stdout.

use std::path::Path;
use vsixdl_core::pipeline::{Event, Observer};

pub struct Console;

fn short(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl Observer for Console {
    fn on_event(&mut self, event: &Event<'_>) {
        match event {
            Event::Fetching { package, .. } => {
                println!("Fetching Marketplace page for {}...", package)
            }
            Event::Located { asset, vsix_url } => {
                println!("Found VSIX URL via {}: {}", asset.source, vsix_url)
            }
            Event::Downloading { path } => println!("Downloading VSIX to {}...", short(path)),
            Event::Downloaded { .. } => println!("Download complete."),
            Event::Installing { tool, path } => println!(
                "Installing extension using {} from {}...",
                short(tool),
                short(path)
            ),
            Event::Installed => println!("Installation complete!"),
            Event::SkippedInstall => println!("Skipping installation. Use '-i' to install."),
        }
    }
}
