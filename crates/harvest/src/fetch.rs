// ABOUTME: Document fetching over a single reusable blocking HTTP client.
// ABOUTME: Validates URLs, rejects non-2xx responses, caps body size, and decodes charsets.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;

use crate::error::HarvestError;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// Result of a successful fetch.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Decode the body as text, using the content-type charset or detection.
    pub fn text(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }
}

/// Resolves a URL into raw markup.
///
/// Implementations must report non-2xx responses as errors, never as bodies.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<FetchResult, HarvestError>;
}

/// Options for the HTTP fetcher, fixed for the lifetime of a harvester.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub user_agent: String,
    pub headers: HashMap<String, String>,
}

/// `Fetch` implementation over one shared `reqwest::blocking::Client`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    headers: HashMap<String, String>,
}

impl HttpFetcher {
    /// Build a fetcher with its own client configured from `opts`.
    pub fn new(opts: &FetchOptions) -> Result<Self, HarvestError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(opts.user_agent.clone())
            .timeout(opts.timeout)
            .build()
            .map_err(|e| {
                HarvestError::fetch("", "BuildClient", Some(anyhow::anyhow!("{}", e)))
            })?;
        Ok(Self::with_client(client, opts.headers.clone()))
    }

    /// Wrap a pre-built client. Its own user agent and timeout apply.
    pub fn with_client(client: reqwest::blocking::Client, headers: HashMap<String, String>) -> Self {
        Self { client, headers }
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchResult, HarvestError> {
        if url.is_empty() {
            return Err(HarvestError::invalid_url(url, "Fetch", None));
        }

        let parsed_url = url::Url::parse(url).map_err(|e| {
            HarvestError::invalid_url(url, "Fetch", Some(anyhow::anyhow!("invalid URL: {}", e)))
        })?;

        let scheme = parsed_url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(HarvestError::invalid_url(
                url,
                "Fetch",
                Some(anyhow::anyhow!("scheme must be http or https")),
            ));
        }

        let mut request = self.client.get(parsed_url);
        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        let response = request.send().map_err(|e| request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::http_status(url, "Fetch", status.as_u16()));
        }

        if let Some(len) = response.content_length() {
            if len as usize > MAX_CONTENT_LENGTH {
                return Err(HarvestError::fetch(
                    url,
                    "Fetch",
                    Some(anyhow::anyhow!("content too large")),
                ));
            }
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_lowercase());

        let body = response.bytes().map_err(|e| request_error(url, e))?;

        if body.len() > MAX_CONTENT_LENGTH {
            return Err(HarvestError::fetch(
                url,
                "Fetch",
                Some(anyhow::anyhow!("content too large")),
            ));
        }

        Ok(FetchResult {
            status: status.as_u16(),
            url: url.to_string(),
            final_url,
            content_type,
            body,
        })
    }
}

/// Map a transport error, keeping timeouts distinguishable.
fn request_error(url: &str, e: reqwest::Error) -> HarvestError {
    if e.is_timeout() {
        HarvestError::timeout(url, "Fetch", Some(anyhow::anyhow!("request timed out: {}", e)))
    } else {
        HarvestError::fetch(url, "Fetch", Some(anyhow::anyhow!("request failed: {}", e)))
    }
}

/// Decode body bytes to a String using the content-type charset or detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(ct) = content_type {
        if let Some(charset) = extract_charset(ct) {
            if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
                let (decoded, _, _) = encoding.decode(body);
                return decoded.into_owned();
            }
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract the charset value from a Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    for part in lower.split(';') {
        let trimmed = part.trim();
        if let Some(charset) = trimmed.strip_prefix("charset=") {
            let charset = charset.trim_matches('"').trim_matches('\'');
            return Some(charset.to_string());
        }
    }
    None
}
