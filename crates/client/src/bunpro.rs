//! Lookup entry point: key in, vocabulary record out.

use url::Url;
use vocabfill_core::{AppConfig, Error, VocabularyRecord};

use crate::extract::extract_vocabulary;
use crate::fetch::{FetchClient, FetchConfig, PageSource, canonicalize, lookup_url};

/// Fetches and extracts Bunpro vocabulary pages.
///
/// Holds no per-lookup state, so one client can serve concurrent lookups
/// from behind an `Arc`.
#[derive(Debug, Clone)]
pub struct BunproClient<S = FetchClient> {
    source: S,
    base_url: Url,
}

impl BunproClient<FetchClient> {
    /// Create a client that fetches over HTTP using the application config.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let source = FetchClient::new(FetchConfig::from(config))?;
        Self::with_source(source, &config.base_url)
    }
}

impl<S: PageSource> BunproClient<S> {
    /// Create a client reading pages from `source`.
    pub fn with_source(source: S, base_url: &str) -> Result<Self, Error> {
        Ok(Self { source, base_url: canonicalize(base_url)? })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Look up `key`, reporting why a lookup failed.
    pub async fn lookup(&self, key: &str) -> Result<VocabularyRecord, Error> {
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::InvalidInput("lookup key cannot be empty".into()));
        }

        let url = lookup_url(&self.base_url, key)?;
        let html = self.source.fetch_page(&url).await?;
        extract_vocabulary(&html, key)
    }

    /// Look up `key`; any failure is reported as `None` and logged at `warn`.
    pub async fn fetch_vocabulary(&self, key: &str) -> Option<VocabularyRecord> {
        match self.lookup(key).await {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(key, error = %e, transport = e.is_transport(), "vocabulary lookup failed");
                None
            }
        }
    }
}
