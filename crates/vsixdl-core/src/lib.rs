//! Download VS Code extensions from the Marketplace as `.vsix` files and
//! optionally hand them to the editor CLI for installation.

pub mod asset;
pub mod config;
pub mod downloader;
pub mod error;
pub mod http;
pub mod installer;
pub mod logging;
pub mod marketplace;
pub mod package_id;
pub mod pipeline;

pub use error::{Error, Result, TransferError};
