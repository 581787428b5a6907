//! VSIX asset lookup in marketplace page text.
//!
//! The item page embeds its gallery JSON; we scrape the asset base URL out of
//! it with two patterns rather than parsing HTML. `assetUri` wins over
//! `fallbackAssetUri` when both are present.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Asset type path appended to the base URL to address the package archive.
pub const VSIX_ASSET_TYPE: &str = "Microsoft.VisualStudio.Services.VSIXPackage";

static ASSET_URI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""assetUri"\s*:\s*"([^"]+)""#).expect("valid regex"));

static FALLBACK_ASSET_URI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""fallbackAssetUri"\s*:\s*"([^"]+)""#).expect("valid regex"));

/// Which page field the base URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetSource {
    AssetUri,
    FallbackAssetUri,
}

impl fmt::Display for AssetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AssetSource::AssetUri => "assetUri",
            AssetSource::FallbackAssetUri => "fallbackAssetUri",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    pub source: AssetSource,
    pub base_url: String,
}

impl AssetRef {
    /// `<base_url>/Microsoft.VisualStudio.Services.VSIXPackage`
    pub fn download_url(&self) -> String {
        format!("{}/{}", self.base_url, VSIX_ASSET_TYPE)
    }
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Finds the asset base URL in `page`, preferring `assetUri`.
pub fn locate(page: &str) -> Option<AssetRef> {
    let found = first_capture(&ASSET_URI_RE, page)
        .map(|url| (AssetSource::AssetUri, url))
        .or_else(|| {
            first_capture(&FALLBACK_ASSET_URI_RE, page)
                .map(|url| (AssetSource::FallbackAssetUri, url))
        });

    let (source, base_url) = found?;
    let asset = AssetRef { source, base_url };
    tracing::info!("found VSIX URL via {}: {}", source, asset.download_url());
    Some(asset)
}
