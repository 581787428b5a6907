//! Single-stream VSIX download.
//!
//! Streams the response body chunk by chunk into the destination file as
//! libcurl delivers it. Once the file has been created, any failure closes and
//! removes it so no partial `.vsix` is left behind. A destination that cannot
//! be opened for writing is left untouched.

use crate::error::{Error, Result, TransferError};
use crate::http::{self, HttpOptions};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use url::Url;

/// Downloads `url` into `dest`, truncating any existing file.
/// Returns the number of bytes written.
pub fn download_to_file(url: &str, dest: &Path, opts: &HttpOptions) -> Result<u64> {
    let download_error = |source| Error::Download {
        url: url.to_string(),
        source,
    };
    check_url(url).map_err(download_error)?;

    // Nothing was written yet, so whatever sits at `dest` stays.
    let file = File::create(dest).map_err(|e| download_error(e.into()))?;
    let written = fill_or_remove(url, file, dest, opts).map_err(download_error)?;
    tracing::info!("downloaded {} bytes to {}", written, dest.display());
    Ok(written)
}

/// Streams into `file` (already created at `dest`); removes `dest` on failure.
fn fill_or_remove(
    url: &str,
    file: File,
    dest: &Path,
    opts: &HttpOptions,
) -> std::result::Result<u64, TransferError> {
    let result = stream_into(url, file, opts);
    if result.is_err() {
        if let Err(e) = fs::remove_file(dest) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!("could not remove partial {}: {}", dest.display(), e);
            }
        }
    }
    result
}

/// Rejects asset URLs libcurl would treat as something other than an HTTP GET.
fn check_url(raw: &str) -> std::result::Result<(), TransferError> {
    let parsed = Url::parse(raw).map_err(|e| TransferError::InvalidUrl(format!("{}: {}", raw, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(TransferError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            raw, other
        ))),
    }
}

/// Runs the GET, writing into `file`. The file is dropped (closed) before returning.
fn stream_into(url: &str, mut file: File, opts: &HttpOptions) -> std::result::Result<u64, TransferError> {
    let mut written: u64 = 0;
    let mut write_error: Option<io::Error> = None;

    let mut easy = http::get_handle(url, opts)?;
    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match file.write_all(data) {
            Ok(()) => {
                written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                tracing::warn!("VSIX write failed: {}", e);
                write_error = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };

    // A short write makes curl report a write error; surface the I/O cause instead.
    if let Some(e) = write_error {
        return Err(TransferError::Io(e));
    }
    performed?;

    let code = easy.response_code()?;
    if code != 200 {
        return Err(TransferError::Status(code));
    }

    file.flush()?;
    Ok(written)
}
