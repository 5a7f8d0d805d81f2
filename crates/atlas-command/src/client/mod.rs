//! Atlas Command API client.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in http.rs.
//! Endpoint groups live in their own modules as `impl AtlasCommandClient`
//! blocks.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::auth::TokenProvider;
use crate::error::AtlasResult;
use crate::transport::{Method, RequestBody, ReqwestTransport, Transport};
use crate::types::{ClientConfig, HealthStatus};

mod entities;
mod helpers;
mod http;
mod objects;
mod queries;
mod tasks;

use helpers::{parse_base_url, QueryParams};
use http::HttpBackend;

/// Client for the Atlas Command API.
///
/// Cheap to clone; clones share the transport.
#[derive(Debug, Clone)]
pub struct AtlasCommandClient {
    http: HttpBackend,
}

impl AtlasCommandClient {
    /// Client over the default `reqwest` transport, authenticated with
    /// `config.token` if set.
    pub fn new(config: ClientConfig) -> AtlasResult<Self> {
        let token_provider = TokenProvider::from_config(config.token.as_deref());

        Self::with_token_provider(config, token_provider)
    }

    /// Client with a custom token provider over the default transport.
    pub fn with_token_provider(
        config: ClientConfig,
        token_provider: TokenProvider,
    ) -> AtlasResult<Self> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs))?;
        Self::build(&config, Arc::new(transport), token_provider)
    }

    /// Client over a caller-supplied transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> AtlasResult<Self> {
        let token_provider = TokenProvider::from_config(config.token.as_deref());

        Self::build(&config, transport, token_provider)
    }

    /// Client configured from `ATLAS_COMMAND_*` environment variables.
    pub fn from_env() -> AtlasResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    fn build(
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
        token_provider: TokenProvider,
    ) -> AtlasResult<Self> {
        Ok(Self {
            http: HttpBackend {
                transport,
                base_url: parse_base_url(&config.base_url)?,
                token_provider,
            },
        })
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url.as_str()
    }

    pub fn is_authenticated(&self) -> bool {
        self.http.token_provider.is_authenticated()
    }

    /// `GET /health`
    pub async fn health(&self) -> AtlasResult<HealthStatus> {
        self.call(Method::GET, &["health"], QueryParams::new(), RequestBody::Empty)
            .await
    }

    /// Send a request and parse the JSON response.
    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        query: QueryParams,
        body: RequestBody,
    ) -> AtlasResult<T> {
        let response = self.http.request(method, segments, &query, body).await?;
        response.json()
    }

    /// Send a request whose response body is ignored.
    async fn call_unit(
        &self,
        method: Method,
        segments: &[&str],
        query: QueryParams,
        body: RequestBody,
    ) -> AtlasResult<()> {
        self.http.request(method, segments, &query, body).await?;
        Ok(())
    }
}
