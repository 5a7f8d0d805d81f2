//! Pure helpers: URL assembly, query strings, error bodies (no transport, no status logic).

use std::fmt::Display;

use url::Url;

use crate::error::{AtlasError, AtlasResult};

/// Ordered query parameters; `None` values are never added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn opt<V: Display>(mut self, key: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.0.push((key, value.to_string()));
        }
        self
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Parse and normalize the configured base URL (trailing slashes removed).
pub(crate) fn parse_base_url(raw: &str) -> AtlasResult<Url> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| AtlasError::Config {
        message: format!("invalid base URL {:?}: {}", raw, e),
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(AtlasError::Config {
            message: format!("base URL must be http(s): {}", raw),
        });
    }

    Ok(url)
}

/// Join path segments (percent-encoded) and query parameters onto the base URL.
pub(crate) fn endpoint_url(base: &Url, segments: &[&str], query: &QueryParams) -> AtlasResult<Url> {
    let mut url = base.clone();
    {
        let mut path = url.path_segments_mut().map_err(|_| AtlasError::Config {
            message: format!("base URL cannot carry a path: {}", base),
        })?;
        path.pop_if_empty().extend(segments);
    }

    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query.pairs());
    }

    Ok(url)
}

/// Reject empty path identifiers before they turn into a different endpoint.
pub(crate) fn require_id<'a>(kind: &str, id: &'a str) -> AtlasResult<&'a str> {
    if id.trim().is_empty() {
        return Err(AtlasError::InvalidRequest {
            message: format!("{} must not be empty", kind),
        });
    }
    Ok(id)
}

/// Human-readable message from an error response body.
///
/// Prefers a JSON `detail` field, then the raw body (first 200 chars), then
/// `fallback`.
pub(crate) fn error_message(body: &str, fallback: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        match json.get("detail") {
            Some(serde_json::Value::String(detail)) => return detail.clone(),
            Some(detail) if !detail.is_null() => return detail.to_string(),
            _ => {}
        }
    }

    let body = body.trim();
    if body.is_empty() {
        fallback.to_string()
    } else {
        body.chars().take(200).collect()
    }
}
