//! Marketplace item page lookup.
//!
//! Builds the `items?itemName=` URL for an extension and fetches the page HTML
//! in a single GET. No retries.

use crate::error::{Error, Result, TransferError};
use crate::http::{self, HttpOptions};
use crate::package_id::PackageId;

/// Item page URL for `id` under the marketplace at `base`.
///
/// `item_url("https://marketplace.visualstudio.com", foo.bar)` →
/// `https://marketplace.visualstudio.com/items?itemName=foo.bar&ssr=false#overview`
pub fn item_url(base: &str, id: &PackageId) -> String {
    format!(
        "{}/items?itemName={}.{}&ssr=false#overview",
        base.trim_end_matches('/'),
        id.publisher,
        id.name
    )
}

/// GETs `url` and returns the body as text. Anything but HTTP 200 is an error.
pub fn fetch_page(url: &str, opts: &HttpOptions) -> Result<String> {
    let fail = |source: TransferError| Error::Fetch {
        url: url.to_string(),
        source,
    };

    let body = get_body(url, opts).map_err(fail)?;
    tracing::debug!("fetched {} ({} bytes)", url, body.len());
    Ok(String::from_utf8_lossy(&body).into_owned())
}

fn get_body(url: &str, opts: &HttpOptions) -> std::result::Result<Vec<u8>, TransferError> {
    let mut body = Vec::new();
    let mut easy = http::get_handle(url, opts)?;
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if code != 200 {
        return Err(TransferError::Status(code));
    }
    Ok(body)
}
