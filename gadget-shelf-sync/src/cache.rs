//! Local fallback cache.
//!
//! Two slots: the last saved collection (plain JSON array, no metadata) and
//! the id of the remote document, so later sessions update the same document
//! instead of creating a new one.

use std::path::{Path, PathBuf};

use gadget_shelf_catalog::Collection;

use crate::error::SyncError;

const ITEMS_FILE: &str = "items.json";
const DOCUMENT_ID_FILE: &str = "document_id";

/// Persistent snapshot storage scoped to the current user.
pub trait LocalStore {
    /// Overwrite the stored snapshot.
    fn save(&self, collection: &Collection) -> Result<(), SyncError>;

    /// The stored snapshot, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<Collection>, SyncError>;

    fn save_document_id(&self, id: &str) -> Result<(), SyncError>;

    fn load_document_id(&self) -> Result<Option<String>, SyncError>;

    /// Forget both slots.
    fn clear(&self) -> Result<(), SyncError>;
}

/// [`LocalStore`] backed by files in a directory.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Cache in the platform data dir (`~/.local/share/gadget-shelf` on Linux).
    pub fn in_data_dir() -> Result<Self, SyncError> {
        default_cache_dir()
            .map(Self::new)
            .ok_or_else(|| SyncError::Config("Could not determine data directory".to_string()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn items_path(&self) -> PathBuf {
        self.dir.join(ITEMS_FILE)
    }

    pub fn document_id_path(&self) -> PathBuf {
        self.dir.join(DOCUMENT_ID_FILE)
    }

    /// Write via a temp file and rename so a crash never leaves half a file.
    fn write_atomic(&self, path: &Path, contents: &str) -> Result<(), SyncError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, contents).map_err(|e| io_error(&tmp, e))?;
        std::fs::rename(&tmp, path).map_err(|e| io_error(path, e))
    }

    fn read_optional(&self, path: &Path) -> Result<Option<String>, SyncError> {
        match std::fs::read_to_string(path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(path, e)),
        }
    }

    fn remove_optional(&self, path: &Path) -> Result<(), SyncError> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(path, e)),
        }
    }
}

impl LocalStore for FileCache {
    fn save(&self, collection: &Collection) -> Result<(), SyncError> {
        let json = serde_json::to_string(collection)?;
        self.write_atomic(&self.items_path(), &json)?;
        log::debug!("Cached {} items in {}", collection.len(), self.dir.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<Collection>, SyncError> {
        let path = self.items_path();
        let Some(contents) = self.read_optional(&path)? else {
            return Ok(None);
        };
        let collection = serde_json::from_str(&contents).map_err(|e| SyncError::CorruptCache {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Some(collection))
    }

    fn save_document_id(&self, id: &str) -> Result<(), SyncError> {
        self.write_atomic(&self.document_id_path(), id.trim())
    }

    fn load_document_id(&self) -> Result<Option<String>, SyncError> {
        Ok(self
            .read_optional(&self.document_id_path())?
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()))
    }

    fn clear(&self) -> Result<(), SyncError> {
        self.remove_optional(&self.items_path())?;
        self.remove_optional(&self.document_id_path())
    }
}

/// Default cache directory, if the platform has a data dir.
pub fn default_cache_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("gadget-shelf"))
}

fn io_error(path: &Path, source: std::io::Error) -> SyncError {
    SyncError::CacheIo {
        path: path.display().to_string(),
        source,
    }
}
