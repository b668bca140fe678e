//! JSON file snapshot store.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use prism_core::errors::{PrismResult, StorageError};
use prism_core::models::CacheSnapshot;
use prism_core::traits::ISnapshotStore;
use tracing::debug;

/// Snapshot persisted as a single JSON document.
///
/// Writes go to a sibling temp file which is synced and then renamed over
/// the target, so a crash mid-write leaves the previous file intact.
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, e: std::io::Error) -> StorageError {
        StorageError::IoError {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "snapshot".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

impl ISnapshotStore for FileSnapshotStore {
    fn load(&self) -> PrismResult<Option<CacheSnapshot>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_err(e).into()),
        };
        let snapshot = serde_json::from_str(&content).map_err(|e| {
            StorageError::CorruptionDetected {
                details: format!("{}: {e}", self.path.display()),
            }
        })?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &CacheSnapshot) -> PrismResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        let json = serde_json::to_vec(snapshot)?;
        let temp = self.temp_path();
        let written = write_synced(&temp, &json).and_then(|()| fs::rename(&temp, &self.path));
        if let Err(e) = written {
            // No partial temp file survives a failed save.
            let _ = fs::remove_file(&temp);
            return Err(self.io_err(e).into());
        }
        debug!(path = %self.path.display(), records = snapshot.len(), "saved snapshot file");
        Ok(())
    }

    fn clear(&self) -> PrismResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_err(e).into()),
        }
    }

    fn name(&self) -> &str {
        "file"
    }
}
