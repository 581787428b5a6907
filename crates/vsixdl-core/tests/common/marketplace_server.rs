//! Minimal HTTP/1.1 server standing in for the marketplace in integration tests.
//!
//! Serves an item page for any `/items?...` request and a VSIX body for any
//! path ending in the VSIX asset type. `{base}` in the page body is replaced
//! with the server's own base URL so asset links point back at it.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

use vsixdl_core::asset::VSIX_ASSET_TYPE;

#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub page_status: u16,
    /// Item page HTML; `{base}` is substituted with the server base URL.
    pub page_body: String,
    pub asset_status: u16,
    pub asset_body: Vec<u8>,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            page_status: 200,
            page_body: page_with_asset_uri("{base}/assets/foo/bar/1.0.0"),
            asset_status: 200,
            asset_body: sample_vsix(),
        }
    }
}

/// Request line target and `User-Agent` of one served request.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub target: String,
    pub user_agent: Option<String>,
}

pub struct MarketplaceServer {
    /// e.g. "http://127.0.0.1:12345" (no trailing slash).
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MarketplaceServer {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn asset_requests(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.target.ends_with(VSIX_ASSET_TYPE))
            .count()
    }
}

/// Item page in the shape the marketplace serves, with only `assetUri` set.
pub fn page_with_asset_uri(uri: &str) -> String {
    format!(
        "<html><body><script class=\"jiContent\" type=\"application/json\">\
         {{\"Resources\":{{\"assetUri\":\"{}\"}}}}</script></body></html>",
        uri
    )
}

/// Item page carrying only `fallbackAssetUri`.
pub fn page_with_fallback_uri(uri: &str) -> String {
    format!(
        "<html><body><script type=\"application/json\">\
         {{\"Resources\":{{\"fallbackAssetUri\":\"{}\"}}}}</script></body></html>",
        uri
    )
}

/// Deterministic stand-in for a VSIX archive.
pub fn sample_vsix() -> Vec<u8> {
    let mut body = b"PK\x03\x04".to_vec();
    body.extend((0u8..=255).cycle().take(48 * 1024));
    body
}

pub fn start(opts: ServerOptions) -> MarketplaceServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let base_url = format!("http://127.0.0.1:{}", port);
    let page = opts.page_body.replace("{base}", &base_url);
    let opts = Arc::new(ServerOptions {
        page_body: page,
        ..opts
    });
    let requests = Arc::new(Mutex::new(Vec::new()));

    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let opts = Arc::clone(&opts);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, &opts, &log));
        }
    });

    MarketplaceServer { base_url, requests }
}

fn handle(mut stream: TcpStream, opts: &ServerOptions, log: &Mutex<Vec<Recorded>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let recorded = parse_request(request);
    let target = recorded.target.clone();
    log.lock().unwrap().push(recorded);

    let (status, body): (u16, &[u8]) = if target.starts_with("/items") {
        (opts.page_status, opts.page_body.as_bytes())
    } else if target.ends_with(VSIX_ASSET_TYPE) {
        (opts.asset_status, opts.asset_body.as_slice())
    } else {
        (404, &b"not found"[..])
    };
    let body = if status == 200 { body } else { &b"error page"[..] };

    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason(status),
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

fn parse_request(request: &str) -> Recorded {
    let mut lines = request.lines();
    let target = lines
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("")
        .to_string();
    let user_agent = lines
        .take_while(|l| !l.trim().is_empty())
        .filter_map(|l| l.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("user-agent"))
        .map(|(_, value)| value.trim().to_string());
    Recorded { target, user_agent }
}
