//! Application state persistence.
//!
//! State is one JSON blob stored under a fixed key. A [`BlobStore`] hides
//! where the blob lives; [`FileBlobStore`] keeps it on disk with file locking
//! and atomic replacement. Reading state never fails: anything missing or
//! malformed yields the default state.

use crate::{AppState, Error, Result, SessionStore, UserProfile};
use chrono::NaiveDate;
use fs2::FileExt;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Key the state blob is stored under
pub const STATE_KEY: &str = "ppt_v2_state";

/// Opaque key-value storage for the serialized state
pub trait BlobStore {
    /// `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<String>>;
    fn save(&mut self, blob: &str) -> Result<()>;
}

/// Blob stored as `<dir>/<key>.json`
pub struct FileBlobStore {
    path: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::with_key(dir, STATE_KEY)
    }

    pub fn with_key(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BlobStore for FileBlobStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.path)?;
        // Acquire shared lock for reading
        file.lock_shared()?;

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read?;

        tracing::debug!("Read state blob from {:?}", self.path);
        Ok(Some(contents))
    }

    /// Atomically writes the blob by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    fn save(&mut self, blob: &str) -> Result<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| Error::Other(format!("State path {:?} has no parent", self.path)))?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(blob.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Wrote state blob to {:?}", self.path);
        Ok(())
    }
}

/// Blob kept in memory
#[derive(Clone, Debug, Default)]
pub struct MemoryBlobStore {
    pub blob: Option<String>,
}

impl BlobStore for MemoryBlobStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.blob.clone())
    }

    fn save(&mut self, blob: &str) -> Result<()> {
        self.blob = Some(blob.to_string());
        Ok(())
    }
}

/// Equipment slots and their preset descriptions
pub fn default_equipment() -> BTreeMap<String, String> {
    [
        ("Swings", "16kg"),
        ("DB_Bench", "12kg"),
        ("Goblet_Squat", "20kg"),
        ("Double_KB_DL", "16kg x2"),
        ("SA_OHP", "12kg"),
        ("Clean", "16kg"),
        ("Clean_Press", "16kg"),
        ("Renegade_Row", "10kg"),
        ("Lunges", "12kg"),
        ("AMRAP", "10 & 16kg"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl AppState {
    /// First-run state: preset equipment, no schedule, week 1 starting today
    pub fn initial(today: NaiveDate) -> Self {
        Self {
            onboarded: false,
            user: UserProfile {
                equipment: default_equipment(),
                schedule: Vec::new(),
                start_date: today,
            },
            sessions: SessionStore::new(),
        }
    }

    pub fn to_blob(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_blob(blob: &str) -> Result<Self> {
        Ok(serde_json::from_str(blob)?)
    }

    /// Load state from `store`, falling back to [`AppState::initial`]
    ///
    /// Read and parse failures are logged and treated as "no prior state".
    pub fn load(store: &dyn BlobStore, today: NaiveDate) -> Self {
        let blob = match store.load() {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                tracing::info!("No saved state found, using defaults");
                return Self::initial(today);
            }
            Err(e) => {
                tracing::warn!("Unable to read saved state: {}. Using defaults.", e);
                return Self::initial(today);
            }
        };

        match Self::from_blob(&blob) {
            Ok(state) => {
                tracing::debug!("Loaded state with {} sessions", state.sessions.len());
                state
            }
            Err(e) => {
                tracing::warn!("Failed to parse saved state: {}. Using defaults.", e);
                Self::initial(today)
            }
        }
    }

    /// Serialize and write to `store`
    pub fn save(&self, store: &mut dyn BlobStore) -> Result<()> {
        let blob = self.to_blob()?;
        store.save(&blob)
    }
}
