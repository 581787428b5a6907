//! Shared libcurl handle setup for the page fetch and the VSIX download.

use curl::easy::Easy;
use std::time::Duration;

/// Per-request settings taken from config.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub user_agent: String,
    /// `None` keeps libcurl's default connect timeout.
    pub connect_timeout: Option<Duration>,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            user_agent: crate::config::default_user_agent(),
            connect_timeout: None,
        }
    }
}

/// Creates a GET handle for `url` with redirects followed and the user agent set.
pub(crate) fn get_handle(url: &str, opts: &HttpOptions) -> Result<Easy, curl::Error> {
    let mut easy = Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.useragent(&opts.user_agent)?;
    if let Some(timeout) = opts.connect_timeout {
        easy.connect_timeout(timeout)?;
    }
    Ok(easy)
}
