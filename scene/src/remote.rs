//! Persistence service seam: publish, list and import scenes.
//!
//! The service itself lives outside this crate; [`SceneService`] is the
//! async boundary the host implements over HTTP. Failures are surfaced as
//! [`RemoteError`] and never touch the store.

#[cfg(test)]
#[path = "remote_test.rs"]
mod remote_test;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::doc::{SceneSnapshot, SnapshotError};
use crate::export::{self, AssetFetcher, ExportError, ExportOptions};
use crate::store::SceneStore;

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Body of a publish request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub html: String,
    pub scene_data: SceneSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Set when republishing an existing scene.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_id: Option<String>,
}

/// Where a published scene landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Published {
    pub url: String,
    pub id: String,
}

/// One entry in a session's scene list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneSummary {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
    pub created_at: String,
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("scene not found: {0}")]
    NotFound(String),
    #[error("service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("response could not be decoded: {0}")]
    Decode(String),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

// =============================================================================
// SERVICE
// =============================================================================

/// Remote scene persistence. Enables mocking in tests.
#[async_trait::async_trait]
pub trait SceneService: Send + Sync {
    /// Store a rendered document and its scene data.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] on transport failure or a non-success status.
    async fn publish(&self, request: &PublishRequest) -> Result<Published, RemoteError>;

    /// Scenes published by the current session, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] on transport failure or a non-success status.
    async fn list(&self) -> Result<Vec<SceneSummary>, RemoteError>;

    /// Raw scene data of a published scene.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::NotFound`] for an unknown id, otherwise a
    /// transport or status error.
    async fn fetch(&self, id: &str) -> Result<serde_json::Value, RemoteError>;
}

/// Export `snapshot` and publish it.
///
/// # Errors
///
/// Returns [`RemoteError::Export`] if the document cannot be built, or any
/// error from [`SceneService::publish`].
pub async fn publish_scene(
    snapshot: &SceneSnapshot,
    fetcher: &dyn AssetFetcher,
    service: &dyn SceneService,
    title: Option<&str>,
    scene_id: Option<&str>,
) -> Result<Published, RemoteError> {
    let html = export::generate_html(snapshot, fetcher, ExportOptions::default()).await?;
    let request = PublishRequest {
        html,
        scene_data: snapshot.clone(),
        title: title.map(str::to_owned),
        scene_id: scene_id.map(str::to_owned),
    };
    let published = service.publish(&request).await?;
    info!(id = %published.id, url = %published.url, "scene published");
    Ok(published)
}

/// Fetch a published scene and parse it, degrading malformed fields.
///
/// # Errors
///
/// Returns any error from [`SceneService::fetch`], or
/// [`RemoteError::Snapshot`] if the data is not a JSON object.
pub async fn fetch_scene(service: &dyn SceneService, id: &str) -> Result<SceneSnapshot, RemoteError> {
    let value = service.fetch(id).await?;
    let (snapshot, issues) = SceneSnapshot::from_value(value)?;
    if !issues.is_empty() {
        warn!(id, count = issues.len(), ?issues, "imported scene had malformed fields");
    }
    Ok(snapshot)
}

/// Replace the store's scene with a published one.
///
/// The store is left exactly as it was when the fetch or parse fails.
///
/// # Errors
///
/// Same as [`fetch_scene`].
pub async fn import_scene(store: &mut SceneStore, service: &dyn SceneService, id: &str) -> Result<(), RemoteError> {
    let snapshot = fetch_scene(service, id).await?;
    info!(id, objects = snapshot.objects.len(), slides = snapshot.slides.len(), "scene imported");
    store.load_scene(snapshot);
    Ok(())
}
