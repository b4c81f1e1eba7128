//! Standalone HTML export.
//!
//! The exported document is the embed template with one injected `<script>`
//! before `</head>`:
//!
//! ```text
//! <script>window.__TRESDE_DATA__=<snapshot json>;
//! window.__TRESDE_FONT__=<font json as a string>;</script>
//! ```
//!
//! The font line is present only when the scene has 3D text. Textures and
//! models are fetched through an [`AssetFetcher`] and inlined as base64 data
//! URIs. A failed texture fetch clears that texture; a failed model fetch
//! keeps the original URL. Neither aborts the export. The input snapshot is
//! never modified.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{info, warn};

use crate::doc::{Geometry, SceneObject, SceneSnapshot};
use crate::resolve::{self, FONT_PATH, ModelFormat};

/// Fallback MIME type for textures served without a content type.
pub const DEFAULT_TEXTURE_MIME: &str = "application/octet-stream";

/// Default filename offered for downloads.
pub const DEFAULT_FILENAME: &str = "tresde-scene.html";

/// Minimal embed page. Hosts normally pass the built embed bundle instead.
pub const EMBED_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>tresde scene</title>
<style>html,body,#root{margin:0;height:100%;overflow:hidden;background:#0a0a0a}</style>
<script type="module" src="/embed.js"></script>
</head>
<body>
<div id="root"></div>
</body>
</html>
"#;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("template has no </head> to inject into")]
    MissingHead,
    #[error("scene data could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

// =============================================================================
// FETCHER
// =============================================================================

/// Raw bytes of a fetched asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedAsset {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Resolves asset URLs to bytes. Enables mocking in tests.
#[async_trait::async_trait]
pub trait AssetFetcher: Send + Sync {
    /// Fetch `url`.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on a non-success status or transport failure.
    async fn fetch(&self, url: &str) -> Result<FetchedAsset, FetchError>;
}

// =============================================================================
// EXPORT
// =============================================================================

/// Options for [`generate_html`].
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions<'a> {
    pub template: &'a str,
    /// Where the typeface JSON is fetched from when the scene has text.
    pub font_url: &'a str,
}

impl Default for ExportOptions<'_> {
    fn default() -> Self {
        Self { template: EMBED_TEMPLATE, font_url: FONT_PATH }
    }
}

/// Build the standalone HTML document for `snapshot`.
///
/// # Errors
///
/// Returns [`ExportError::MissingHead`] if the template has no `</head>`, or
/// [`ExportError::Encode`] if the scene cannot be serialized. Asset failures
/// are never errors.
pub async fn generate_html(
    snapshot: &SceneSnapshot,
    fetcher: &dyn AssetFetcher,
    options: ExportOptions<'_>,
) -> Result<String, ExportError> {
    if !options.template.contains("</head>") {
        return Err(ExportError::MissingHead);
    }
    let baked = inline_assets(snapshot, fetcher).await;

    let font = if baked.objects.iter().any(|o| o.geometry == Geometry::Text3d) {
        fetch_font(fetcher, options.font_url).await
    } else {
        None
    };

    let html = inject(options.template, &baked, font.as_deref())?;
    info!(objects = baked.objects.len(), font = font.is_some(), bytes = html.len(), "scene exported");
    Ok(html)
}

/// Copy of `snapshot` with resolver defaults baked in and assets inlined.
pub async fn inline_assets(snapshot: &SceneSnapshot, fetcher: &dyn AssetFetcher) -> SceneSnapshot {
    let mut out = snapshot.clone();
    out.objects = Vec::with_capacity(snapshot.objects.len());
    for obj in &snapshot.objects {
        out.objects.push(inline_object(obj, fetcher).await);
    }
    out
}

async fn inline_object(obj: &SceneObject, fetcher: &dyn AssetFetcher) -> SceneObject {
    let mut baked = resolve::with_resolved_defaults(obj);

    if let Some(url) = obj.texture_url.as_deref() {
        baked.texture_url = match fetch_data_uri(fetcher, url, None).await {
            Ok(uri) => Some(uri),
            Err(e) => {
                warn!(object = %obj.id, error = %e, "texture dropped from export");
                None
            }
        };
    }

    if let Some(url) = obj.model_url.as_deref() {
        let mime = ModelFormat::from_url(url).mime();
        match fetch_data_uri(fetcher, url, Some(mime)).await {
            Ok(uri) => baked.model_url = Some(uri),
            Err(e) => warn!(object = %obj.id, error = %e, "model left as url in export"),
        }
    }
    baked
}

/// Inline `url` as a data URI. Existing data URIs pass through unchanged.
///
/// `mime` overrides the served content type.
async fn fetch_data_uri(fetcher: &dyn AssetFetcher, url: &str, mime: Option<&str>) -> Result<String, FetchError> {
    if url.starts_with("data:") {
        return Ok(url.to_owned());
    }
    let asset = fetcher.fetch(url).await?;
    let mime = mime
        .map(str::to_owned)
        .or(asset.content_type)
        .unwrap_or_else(|| DEFAULT_TEXTURE_MIME.to_owned());
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(&asset.bytes)))
}

async fn fetch_font(fetcher: &dyn AssetFetcher, url: &str) -> Option<String> {
    let asset = match fetcher.fetch(url).await {
        Ok(asset) => asset,
        Err(e) => {
            warn!(error = %e, "font not embedded");
            return None;
        }
    };
    match String::from_utf8(asset.bytes) {
        Ok(text) if !text.is_empty() => Some(text),
        Ok(_) => None,
        Err(e) => {
            warn!(error = %e, "font is not utf-8; not embedded");
            None
        }
    }
}

/// Insert the data script before the first `</head>`.
///
/// # Errors
///
/// Returns [`ExportError`] if the template lacks `</head>` or encoding fails.
pub fn inject(template: &str, snapshot: &SceneSnapshot, font: Option<&str>) -> Result<String, ExportError> {
    let Some(at) = template.find("</head>") else {
        return Err(ExportError::MissingHead);
    };
    let mut script = format!("<script>window.__TRESDE_DATA__={};", script_json(&serde_json::to_string(snapshot)?));
    if let Some(font) = font {
        script.push_str(&format!("\nwindow.__TRESDE_FONT__={};", script_json(&serde_json::to_string(font)?)));
    }
    script.push_str("</script>\n");

    let mut html = String::with_capacity(template.len() + script.len());
    html.push_str(&template[..at]);
    html.push_str(&script);
    html.push_str(&template[at..]);
    Ok(html)
}

/// JSON made safe inside an inline script: `</` cannot close the tag.
fn script_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

/// Read the embedded scene back out of an exported document.
#[must_use]
pub fn extract_data(html: &str) -> Option<String> {
    const MARKER: &str = "window.__TRESDE_DATA__=";
    let start = html.find(MARKER)? + MARKER.len();
    let rest = &html[start..];
    let end = rest.find(";\nwindow.__TRESDE_FONT__=").or_else(|| rest.find(";</script>"))?;
    Some(rest[..end].replace("<\\/", "</"))
}
