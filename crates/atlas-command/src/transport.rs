//! Pluggable HTTP transport.
//!
//! The client builds [`HttpRequest`] values and hands them to a
//! [`Transport`]. Status codes are not interpreted here; see
//! `client::http` for the status mapping.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

pub use reqwest::Method;

use crate::error::{AtlasError, AtlasResult};

/// User agent sent by [`ReqwestTransport`].
pub const USER_AGENT_VALUE: &str = concat!("atlas-command/", env!("CARGO_PKG_VERSION"));

/// Outgoing request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    /// First header value with this name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(MultipartForm),
}

/// Multipart form with text and file parts, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    pub parts: Vec<FormPart>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        data: Vec<u8>,
    },
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        });
        self
    }

    /// Value of a text part.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    fn into_reqwest(self) -> AtlasResult<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for part in self.parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File {
                    name,
                    file_name,
                    content_type,
                    data,
                } => {
                    let part = reqwest::multipart::Part::bytes(data)
                        .file_name(file_name)
                        .mime_str(&content_type)
                        .map_err(|e| AtlasError::InvalidRequest {
                            message: format!("invalid content type {}: {}", content_type, e),
                        })?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}

/// Response as seen by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header value with this name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> AtlasResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| AtlasError::InvalidResponse {
            message: format!("failed to parse response body: {}", e),
        })
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Sends one request and returns the raw response, whatever its status.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    async fn send(&self, request: HttpRequest) -> AtlasResult<HttpResponse>;
}

/// Default transport on top of `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> AtlasResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| AtlasError::Network {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }

    /// Wrap a preconfigured `reqwest::Client`.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> AtlasResult<HttpResponse> {
        let mut builder = self.client.request(request.method, request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form.into_reqwest()?),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| AtlasError::Network {
                message: format!("failed to read response body: {}", e),
            })?
            .to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_header_lookup_is_case_insensitive() {
        let response = HttpResponse::new(200, "").with_header("Content-Type", "image/png");
        assert_eq!(response.header("content-type"), Some("image/png"));
        assert_eq!(response.header("etag"), None);
    }

    #[test]
    fn test_response_json_error_is_invalid_response() {
        let response = HttpResponse::new(200, "not json");
        let result: AtlasResult<Value> = response.json();
        assert!(matches!(result, Err(AtlasError::InvalidResponse { .. })));
    }

    #[test]
    fn test_multipart_text_value() {
        let form = MultipartForm::new()
            .text("object_id", "obj-1")
            .file("file", "a.txt", "text/plain", b"hi".to_vec());
        assert_eq!(form.text_value("object_id"), Some("obj-1"));
        assert_eq!(form.text_value("file"), None);
        assert_eq!(form.parts.len(), 2);
    }

    #[test]
    fn test_multipart_rejects_bad_mime() {
        let form = MultipartForm::new().file("file", "a", "not a mime", Vec::new());
        assert!(matches!(
            form.into_reqwest(),
            Err(AtlasError::InvalidRequest { .. })
        ));
    }

    #[test]
    fn test_user_agent_has_version() {
        assert!(USER_AGENT_VALUE.starts_with("atlas-command/"));
    }
}
