//! HTTP layer: header assembly and status mapping.
//!
//! This is the ONLY place for status code handling. client/mod.rs and the
//! endpoint modules never interpret status codes.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::auth::TokenProvider;
use crate::error::{AtlasError, AtlasResult};
use crate::transport::{HttpRequest, HttpResponse, Method, RequestBody, Transport};

use super::helpers::{endpoint_url, error_message, QueryParams};

pub(crate) const ACCEPT_JSON: &str = "application/json";
pub(crate) const ACCEPT_ANY: &str = "*/*";

/// HTTP backend for making requests (holds transport, auth, base URL).
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) base_url: Url,
    pub(crate) token_provider: TokenProvider,
}

impl HttpBackend {
    /// Send a request expecting a JSON (or empty) response.
    pub(crate) async fn request(
        &self,
        method: Method,
        segments: &[&str],
        query: &QueryParams,
        body: RequestBody,
    ) -> AtlasResult<HttpResponse> {
        self.request_with_accept(method, segments, query, body, ACCEPT_JSON)
            .await
    }

    /// Send a request and map non-success statuses to errors.
    pub(crate) async fn request_with_accept(
        &self,
        method: Method,
        segments: &[&str],
        query: &QueryParams,
        body: RequestBody,
        accept: &str,
    ) -> AtlasResult<HttpResponse> {
        let url = endpoint_url(&self.base_url, segments, query)?;

        let mut headers = vec![("accept".to_string(), accept.to_string())];
        if let Some(authorization) = self.token_provider.authorization() {
            headers.push(("authorization".to_string(), authorization));
        }
        if matches!(body, RequestBody::Json(_)) {
            headers.push(("content-type".to_string(), ACCEPT_JSON.to_string()));
        }

        debug!(method = %method, url = %url, "sending request");

        let path = url.path().to_string();
        let response = self
            .transport
            .send(HttpRequest {
                method,
                url,
                headers,
                body,
            })
            .await?;

        debug!(status = response.status, path = %path, "received response");

        map_status(response, &path)
    }
}

/// Map a raw response to `Ok` (2xx) or the matching error.
pub(crate) fn map_status(response: HttpResponse, path: &str) -> AtlasResult<HttpResponse> {
    let status = response.status;
    if response.is_success() {
        return Ok(response);
    }

    let reason = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("unknown status");
    let message = error_message(&response.text(), reason);

    Err(match status {
        400 | 422 => AtlasError::BadRequest { status, message },

        401 => AtlasError::Unauthorized { message },

        403 => AtlasError::Forbidden { message },

        404 => AtlasError::NotFound {
            resource: path.to_string(),
        },

        409 => AtlasError::Conflict { message },

        429 => {
            let retry_after = response
                .header("retry-after")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs);

            AtlasError::RateLimited { retry_after }
        }

        _ => AtlasError::Http { status, message },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn err(response: HttpResponse) -> AtlasError {
        map_status(response, "/entities/e-1").unwrap_err()
    }

    #[test]
    fn test_success_passes_through() {
        let response = HttpResponse::new(204, "");
        assert!(map_status(response, "/x").is_ok());
    }

    #[test]
    fn test_not_found_carries_path() {
        match err(HttpResponse::new(404, "")) {
            AtlasError::NotFound { resource } => assert_eq!(resource, "/entities/e-1"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_status_uses_detail() {
        match err(HttpResponse::new(422, r#"{"detail":"alias required"}"#)) {
            AtlasError::BadRequest { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "alias required");
            }
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_auth_statuses() {
        assert!(matches!(
            err(HttpResponse::new(401, "")),
            AtlasError::Unauthorized { .. }
        ));
        assert!(matches!(
            err(HttpResponse::new(403, "")),
            AtlasError::Forbidden { .. }
        ));
    }

    #[test]
    fn test_conflict() {
        assert!(matches!(
            err(HttpResponse::new(409, r#"{"detail":"exists"}"#)),
            AtlasError::Conflict { message } if message == "exists"
        ));
    }

    #[test]
    fn test_rate_limited_retry_after() {
        let response = HttpResponse::new(429, "").with_header("Retry-After", "7");
        match err(response) {
            AtlasError::RateLimited { retry_after } => {
                assert_eq!(retry_after, Some(Duration::from_secs(7)))
            }
            other => panic!("expected RateLimited, got {:?}", other),
        }

        let response = HttpResponse::new(429, "").with_header("Retry-After", "soon");
        assert!(matches!(
            err(response),
            AtlasError::RateLimited { retry_after: None }
        ));
    }

    #[test]
    fn test_other_status_uses_reason_when_body_empty() {
        match err(HttpResponse::new(503, "")) {
            AtlasError::Http { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("expected Http, got {:?}", other),
        }
    }
}
