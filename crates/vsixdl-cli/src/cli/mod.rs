//! CLI for vsixdl.

mod console;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use vsixdl_core::config::{self, VsixdlConfig};
use vsixdl_core::package_id::Invocation;
use vsixdl_core::pipeline::{self, Request};
use vsixdl_core::Error;

use console::Console;

/// Download a VS Code extension from the Marketplace as a `.vsix`.
#[derive(Debug, Parser)]
#[command(name = "vsixdl", version)]
#[command(about = "Download a VS Code extension from the Marketplace and optionally install it", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Install the downloaded extension with the editor CLI (code, codium or vscodium).
    #[arg(short = 'i', long = "install")]
    pub install: bool,

    /// Editor CLI to install with instead of auto-detecting one.
    #[arg(short = 'e', long = "editor", value_name = "CMD")]
    pub editor: Option<String>,

    /// Extension id, e.g. `ms-python.python`. Split on the first dot.
    #[arg(value_name = "PUBLISHER.EXTENSION")]
    pub ids: Vec<String>,
}

/// Parses process arguments. Usage errors exit with status 1; `--help` and
/// `--version` exit with 0.
pub fn parse_args() -> Cli {
    Cli::try_parse().unwrap_or_else(|err| {
        let code = if err.use_stderr() { 1 } else { 0 };
        let _ = err.print();
        std::process::exit(code);
    })
}

/// One-line usage string for error messages.
pub fn usage() -> String {
    Cli::command().render_usage().to_string()
}

/// Stderr text and exit status for a failed run. Pipeline errors are prefixed
/// with the stage that failed; usage errors also get the usage line.
pub fn report(err: &anyhow::Error) -> (String, i32) {
    let message = match err.downcast_ref::<Error>() {
        Some(e) if matches!(e, Error::Usage(_)) => format!("{}: {}\n{}", e.stage(), e, usage()),
        Some(e) => format!("{}: {}", e.stage(), e),
        None => format!("vsixdl error: {:#}", err),
    };
    (message, 1)
}

impl Cli {
    pub fn invocation(&self) -> vsixdl_core::Result<Invocation> {
        Invocation::from_tokens(self.install, self.editor.clone(), self.ids.as_slice())
    }

    pub fn run(self) -> Result<()> {
        let invocation = self.invocation()?;
        let cfg = load_config();
        tracing::debug!("loaded config: {:?}", cfg);

        let request = Request {
            invocation,
            dest_dir: std::env::current_dir().context("current directory")?,
            search_path: std::env::var_os("PATH"),
        };
        let outcome = pipeline::run(&request, &cfg, &mut Console)?;
        tracing::info!(
            "done: {} ({} bytes) installed_with={:?}",
            outcome.path.display(),
            outcome.bytes,
            outcome.installed_with
        );
        Ok(())
    }
}

fn load_config() -> VsixdlConfig {
    config::load_or_init().unwrap_or_else(|e| {
        tracing::warn!("using default config: {:#}", e);
        VsixdlConfig::default()
    })
}

#[cfg(test)]
mod tests;
