//! Base URL canonicalization and lookup URL construction.

use url::Url;

/// Path segment vocabulary pages live under.
pub const VOCAB_SEGMENT: &str = "vocabs";

/// Error type for URL canonicalization failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("URL cannot carry path segments: {0}")]
    CannotBeABase(String),
}

impl From<UrlError> for vocabfill_core::Error {
    fn from(err: UrlError) -> Self {
        vocabfill_core::Error::InvalidUrl(err.to_string())
    }
}

/// Canonicalize the configured site URL.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Default scheme to https:// if missing
/// 3. Lowercase the host
/// 4. Remove query and fragment
pub fn canonicalize(input: &str) -> Result<Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let url_str = if trimmed.contains("://") { trimmed.to_string() } else { format!("https://{trimmed}") };

    let mut parsed = Url::parse(&url_str).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    if let Some(host) = parsed.host_str() {
        let host = host.to_lowercase();
        parsed
            .set_host(Some(&host))
            .map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    }

    parsed.set_query(None);
    parsed.set_fragment(None);

    Ok(parsed)
}

/// Build `{base}/vocabs/{key}` with `key` trimmed and percent-encoded as a
/// single path segment.
pub fn lookup_url(base: &Url, key: &str) -> Result<Url, UrlError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| UrlError::CannotBeABase(base.to_string()))?
        .pop_if_empty()
        .push(VOCAB_SEGMENT)
        .push(key.trim());
    Ok(url)
}
