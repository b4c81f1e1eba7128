//! Compressed `#scene=` share fragments.
//!
//! A share link is `{origin}/embed#scene=<payload>` where the payload is the
//! snapshot JSON, deflated and base64url-encoded without padding. Texture
//! URLs and inlined (`data:`) model URLs are stripped first so links stay
//! short; remote model URLs survive.

#[cfg(test)]
#[path = "share_test.rs"]
mod share_test;

use std::io::{Read, Write};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use tracing::{debug, warn};

use crate::doc::{SceneSnapshot, SnapshotError};

/// Fragment prefix carrying a shared scene.
pub const FRAGMENT_PREFIX: &str = "#scene=";

/// Path of the embed page on the publishing origin.
pub const EMBED_PATH: &str = "/embed";

/// Upper bound on inflated JSON, guarding against deflate bombs.
pub const MAX_DECODED_BYTES: u64 = 8 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("fragment does not start with {FRAGMENT_PREFIX}")]
    MissingPrefix,
    #[error("payload is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload could not be inflated: {0}")]
    Inflate(#[from] std::io::Error),
    #[error("decoded payload exceeds {MAX_DECODED_BYTES} bytes")]
    TooLarge,
    #[error("snapshot could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Copy of `snapshot` with link-hostile asset URLs removed.
#[must_use]
pub fn stripped(snapshot: &SceneSnapshot) -> SceneSnapshot {
    let mut out = snapshot.clone();
    for obj in &mut out.objects {
        obj.texture_url = None;
        if obj.model_url.as_deref().is_some_and(|u| u.starts_with("data:")) {
            obj.model_url = None;
        }
    }
    out
}

/// Encode `snapshot` as a fragment payload (without the prefix).
///
/// # Errors
///
/// Returns [`ShareError`] if serialization or compression fails.
pub fn encode(snapshot: &SceneSnapshot) -> Result<String, ShareError> {
    let json = serde_json::to_vec(&stripped(snapshot))?;
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&json)?;
    let compressed = encoder.finish()?;
    debug!(json_bytes = json.len(), compressed_bytes = compressed.len(), "share payload encoded");
    Ok(URL_SAFE_NO_PAD.encode(compressed))
}

/// Full share link on `origin`.
///
/// # Errors
///
/// Returns [`ShareError`] if the snapshot cannot be encoded.
pub fn share_url(origin: &str, snapshot: &SceneSnapshot) -> Result<String, ShareError> {
    let payload = encode(snapshot)?;
    Ok(format!("{}{EMBED_PATH}{FRAGMENT_PREFIX}{payload}", origin.trim_end_matches('/')))
}

/// Decode a fragment payload (without the prefix).
///
/// Malformed fields degrade to defaults exactly as for a persisted snapshot.
///
/// # Errors
///
/// Returns [`ShareError`] if the payload is not base64url, does not inflate,
/// is too large, or is not a JSON object.
pub fn decode(payload: &str) -> Result<SceneSnapshot, ShareError> {
    let compressed = URL_SAFE_NO_PAD.decode(payload.trim())?;
    let mut json = String::new();
    let read = DeflateDecoder::new(compressed.as_slice()).take(MAX_DECODED_BYTES + 1).read_to_string(&mut json)?;
    if read as u64 > MAX_DECODED_BYTES {
        return Err(ShareError::TooLarge);
    }
    let (snapshot, issues) = SceneSnapshot::from_json_str(&json)?;
    if !issues.is_empty() {
        warn!(count = issues.len(), ?issues, "shared scene had malformed fields");
    }
    Ok(snapshot)
}

/// Decode a location hash such as `#scene=...`.
///
/// # Errors
///
/// Returns [`ShareError::MissingPrefix`] if the hash carries no scene,
/// otherwise any error from [`decode`].
pub fn decode_fragment(hash: &str) -> Result<SceneSnapshot, ShareError> {
    let payload = hash.strip_prefix(FRAGMENT_PREFIX).ok_or(ShareError::MissingPrefix)?;
    decode(payload)
}

/// Decode a full share link by locating its fragment.
///
/// # Errors
///
/// Same as [`decode_fragment`].
pub fn decode_url(url: &str) -> Result<SceneSnapshot, ShareError> {
    let hash = url.find('#').map_or("", |at| &url[at..]);
    decode_fragment(hash)
}
