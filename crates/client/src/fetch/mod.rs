//! HTTP fetch pipeline for vocabulary pages.
//!
//! ### Request
//! - One GET per lookup, no retries.
//! - Bounded by a whole-request timeout (default: 15s).
//! - Descriptive `User-Agent` header.
//!
//! ### Response Gates
//! - Non-2xx status is an error.
//! - Max body bytes: 5MB (configurable).
//! - Body must decode as UTF-8.

pub mod url;

use bytes::Bytes;
use reqwest::Url;
use reqwest::{Client, header};
use std::time::{Duration, Instant};

pub use url::{UrlError, canonicalize, lookup_url};

use vocabfill_core::{AppConfig, Error};

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,

    /// Request timeout (default: 15s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            max_redirects: 5,
        }
    }
}

/// Response from a fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// The final URL after redirects
    pub final_url: Url,
    /// Response body bytes
    pub bytes: Bytes,
}

impl FetchResponse {
    /// Decode the body as UTF-8.
    pub fn text(&self) -> Result<String, Error> {
        String::from_utf8(self.bytes.to_vec())
            .map_err(|e| Error::DecodeFailed(format!("{} is not valid UTF-8: {}", self.final_url, e)))
    }
}

/// Source of raw page HTML.
///
/// The HTTP client is the only production implementation; the seam lets
/// lookups run against canned pages or injected failures.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page at `url` and return its decoded body.
    async fn fetch_page(&self, url: &Url) -> Result<String, Error>;
}

/// HTTP fetch client.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::HttpError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Fetch a URL, returning raw bytes and metadata.
    pub async fn fetch(&self, url: &Url) -> Result<FetchResponse, Error> {
        let start = Instant::now();

        let response = self
            .http
            .get(url.as_str())
            .header(header::ACCEPT, "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();

        if !status.is_success() {
            return Err(Error::HttpError(format!("status {} for {}", status.as_u16(), url)));
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;

        if bytes.len() > self.config.max_bytes {
            return Err(Error::FetchTooLarge(format!(
                "{} bytes exceeds {}",
                bytes.len(),
                self.config.max_bytes
            )));
        }

        let fetch_ms = start.elapsed().as_millis() as u64;

        tracing::debug!(
            url = %url,
            final_url = %final_url,
            status = status.as_u16(),
            content_type = %content_type,
            fetch_ms,
            bytes = bytes.len(),
            "fetched vocabulary page"
        );

        Ok(FetchResponse { final_url, bytes })
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::FetchTimeout(format!("no response within {}ms", self.config.timeout.as_millis()))
        } else if err.is_decode() {
            Error::DecodeFailed(err.to_string())
        } else {
            Error::HttpError(format!("network error: {}", err))
        }
    }
}

#[async_trait::async_trait]
impl PageSource for FetchClient {
    async fn fetch_page(&self, url: &Url) -> Result<String, Error> {
        self.fetch(url).await?.text()
    }
}
