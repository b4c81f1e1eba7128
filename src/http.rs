//! HTTP adapters for the scene crate's async seams.
//!
//! `HttpAssetFetcher` backs HTML export; `HttpSceneService` talks to the
//! persistence service:
//!
//! | Call | Request |
//! |------|---------|
//! | publish | `POST /api/publish` |
//! | list | `GET /api/scenes` |
//! | fetch | `GET /api/scenes/{id}/data` |
//!
//! Every service request carries the `tresde_session` cookie.

use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use scene::export::{AssetFetcher, FetchError, FetchedAsset};
use scene::remote::{PublishRequest, Published, RemoteError, SceneService, SceneSummary};
use tracing::debug;

use crate::config::{HttpTimeouts, SESSION_COOKIE};

#[derive(Debug, thiserror::Error)]
pub enum HttpSetupError {
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("session id is not a valid header value: {0}")]
    Session(#[from] reqwest::header::InvalidHeaderValue),
}

fn client_builder(timeouts: HttpTimeouts) -> reqwest::ClientBuilder {
    Client::builder().timeout(timeouts.request()).connect_timeout(timeouts.connect())
}

/// Resolve `url` against `base_url` unless it is already absolute.
#[must_use]
pub fn resolve_url(base_url: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_owned();
    }
    let base = base_url.trim_end_matches('/');
    if url.starts_with('/') { format!("{base}{url}") } else { format!("{base}/{url}") }
}

// =============================================================================
// ASSETS
// =============================================================================

pub struct HttpAssetFetcher {
    http: Client,
    base_url: String,
}

impl HttpAssetFetcher {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeouts: HttpTimeouts) -> Result<Self, HttpSetupError> {
        let http = client_builder(timeouts).build()?;
        Ok(Self { http, base_url: base_url.to_owned() })
    }
}

#[async_trait::async_trait]
impl AssetFetcher for HttpAssetFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedAsset, FetchError> {
        let url = resolve_url(&self.base_url, url);
        let transport = |e: reqwest::Error| FetchError::Transport { url: url.clone(), message: e.to_string() };

        let response = self.http.get(&url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: url.clone(), status: status.as_u16() });
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_owned());
        let bytes = response.bytes().await.map_err(transport)?;
        debug!(url = %url, bytes = bytes.len(), "asset fetched");
        Ok(FetchedAsset { bytes: bytes.to_vec(), content_type })
    }
}

// =============================================================================
// SCENE SERVICE
// =============================================================================

pub struct HttpSceneService {
    http: Client,
    base_url: String,
}

impl HttpSceneService {
    /// Build a client that presents `session` as the session cookie.
    ///
    /// # Errors
    ///
    /// Returns an error if the session id is not a valid header value or the
    /// client cannot be built.
    pub fn new(base_url: &str, session: &str, timeouts: HttpTimeouts) -> Result<Self, HttpSetupError> {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(&session_cookie(session))?);
        let http = client_builder(timeouts).default_headers(headers).build()?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, RemoteError> {
        request.send().await.map_err(|e| RemoteError::Transport(e.to_string()))
    }
}

#[must_use]
pub fn session_cookie(session: &str) -> String {
    format!("{SESSION_COOKIE}={session}")
}

async fn read_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, RemoteError> {
    let status = response.status();
    let text = response.text().await.map_err(|e| RemoteError::Transport(e.to_string()))?;
    if !status.is_success() {
        return Err(RemoteError::Status { status: status.as_u16(), body: text });
    }
    serde_json::from_str(&text).map_err(|e| RemoteError::Decode(e.to_string()))
}

#[async_trait::async_trait]
impl SceneService for HttpSceneService {
    async fn publish(&self, request: &PublishRequest) -> Result<Published, RemoteError> {
        let url = format!("{}/api/publish", self.base_url);
        let response = self.send(self.http.post(&url).json(request)).await?;
        read_json(response).await
    }

    async fn list(&self) -> Result<Vec<SceneSummary>, RemoteError> {
        let url = format!("{}/api/scenes", self.base_url);
        let response = self.send(self.http.get(&url)).await?;
        read_json(response).await
    }

    async fn fetch(&self, id: &str) -> Result<serde_json::Value, RemoteError> {
        let url = format!("{}/api/scenes/{id}/data", self.base_url);
        let response = self.send(self.http.get(&url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(RemoteError::NotFound(id.to_owned()));
        }
        read_json(response).await
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
