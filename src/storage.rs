//! Local scene persistence: the file-backed equivalent of the browser's
//! saved editor state.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use scene::doc::SceneSnapshot;
use scene::store::{PersistError, SceneStore, SnapshotSink};
use tracing::{debug, info};

/// Writes the snapshot to a JSON file after every persisted mutation.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash never leaves a half-written scene behind.
pub struct FileSnapshotSink {
    path: PathBuf,
}

impl FileSnapshotSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotSink for FileSnapshotSink {
    fn save(&mut self, snapshot: &SceneSnapshot) -> Result<(), PersistError> {
        write_snapshot(&self.path, snapshot).map_err(|e| PersistError(format!("{}: {e}", self.path.display())))
    }
}

/// Serialize `snapshot` to `path` atomically.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written.
pub fn write_snapshot(path: &Path, snapshot: &SceneSnapshot) -> io::Result<()> {
    let json = serde_json::to_vec_pretty(snapshot).map_err(io::Error::other)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    debug!(path = %path.display(), bytes = json.len(), "scene saved");
    Ok(())
}

/// Read the raw persisted text, `None` when nothing has been saved yet.
///
/// # Errors
///
/// Returns an I/O error for anything other than a missing file.
pub fn read_persisted(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Open the store saved at `path`, attaching a sink that keeps it saved.
///
/// A missing or unreadable file yields the starter scene.
///
/// # Errors
///
/// Returns an I/O error if the file exists but cannot be read.
pub fn open_store(path: &Path) -> io::Result<SceneStore> {
    let raw = read_persisted(path)?;
    info!(path = %path.display(), found = raw.is_some(), "opening scene");
    Ok(SceneStore::restore(raw.as_deref()).with_sink(Box::new(FileSnapshotSink::new(path))))
}

/// Load a snapshot file without attaching persistence.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read.
pub fn load_snapshot(path: &Path) -> io::Result<SceneSnapshot> {
    let raw = read_persisted(path)?;
    Ok(SceneStore::restore(raw.as_deref()).snapshot())
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
