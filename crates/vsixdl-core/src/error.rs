//! Error types for the fetch/locate/download/install pipeline.
//!
//! Every variant is terminal for the run. `Error::stage` gives the prefix the
//! CLI prints in front of the message.

use std::process::ExitStatus;
use thiserror::Error;

/// Failure of a single HTTP transfer (page fetch or VSIX download).
#[derive(Debug, Error)]
pub enum TransferError {
    /// libcurl reported an error (DNS, connect, TLS, aborted write, ...).
    #[error(transparent)]
    Curl(#[from] curl::Error),
    /// The located asset URL is not an http(s) URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    /// Server answered with something other than 200.
    #[error("HTTP {0}")]
    Status(u32),
    /// Writing the body to disk failed.
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    /// Bad command line (missing or malformed `publisher.extension`).
    #[error("{0}")]
    Usage(String),

    #[error("{url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: TransferError,
    },

    #[error("Could not find assetUri or fallbackAssetUri in page.")]
    NotFound,

    #[error("{url}: {source}")]
    Download {
        url: String,
        #[source]
        source: TransferError,
    },

    #[error("No VS Code CLI tool found (tried {tried}).")]
    ToolNotFound { tried: String },

    #[error("failed to launch {tool}: {source}")]
    Launch {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Installation failed: {tool} exited with {status}.")]
    Install { tool: String, status: ExitStatus },
}

impl Error {
    /// Short prefix naming the stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            Error::Usage(_) => "Error",
            Error::Fetch { .. } => "Error fetching Marketplace page",
            Error::NotFound => "Error extracting VSIX URL",
            Error::Download { .. } => "Error downloading VSIX",
            Error::ToolNotFound { .. } => "Error locating editor CLI",
            Error::Launch { .. } | Error::Install { .. } => "Error installing extension",
        }
    }

    pub(crate) fn usage(message: impl Into<String>) -> Self {
        Error::Usage(message.into())
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
