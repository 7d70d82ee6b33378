//! Sheet sources: where CSV text comes from.

use crate::error::{Result, SheetBindError};
use async_trait::async_trait;

/// Cache hint forwarded with HTTP requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CacheMode {
    /// No cache header; intermediaries decide.
    Unspecified,
    #[default]
    NoStore,
    NoCache,
}

impl CacheMode {
    /// `Cache-Control` request header value, if any.
    pub fn header_value(self) -> Option<&'static str> {
        match self {
            CacheMode::Unspecified => None,
            CacheMode::NoStore => Some("no-store"),
            CacheMode::NoCache => Some("no-cache"),
        }
    }

    pub fn from_name(name: &str) -> Option<CacheMode> {
        match name.trim().to_ascii_lowercase().as_str() {
            "default" => Some(CacheMode::Unspecified),
            "no-store" => Some(CacheMode::NoStore),
            "no-cache" => Some(CacheMode::NoCache),
            _ => None,
        }
    }
}

/// Supplies the raw CSV text for a dispatcher.
#[async_trait]
pub trait SheetFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str, cache: CacheMode) -> Result<String>;
}

/// Fetches over HTTP. Non-2xx responses are errors.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SheetFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str, cache: CacheMode) -> Result<String> {
        let mut request = self.client.get(url);
        if let Some(value) = cache.header_value() {
            request = request.header(reqwest::header::CACHE_CONTROL, value);
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(SheetBindError::HttpStatus(response.status().as_u16()));
        }
        Ok(response.text().await?)
    }
}

/// Reads a local CSV file; the "url" is a filesystem path.
pub struct FileFetcher;

#[async_trait]
impl SheetFetcher for FileFetcher {
    async fn fetch_text(&self, url: &str, _cache: CacheMode) -> Result<String> {
        Ok(tokio::fs::read_to_string(url).await?)
    }
}

/// Serves a canned body, for tests and embedders that already hold
/// the CSV text.
pub struct StaticFetcher {
    body: String,
}

impl StaticFetcher {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

#[async_trait]
impl SheetFetcher for StaticFetcher {
    async fn fetch_text(&self, _url: &str, _cache: CacheMode) -> Result<String> {
        Ok(self.body.clone())
    }
}
