//! On-disk transaction history, one JSON document keyed by month label.
//!
//! The history file is authoritative merged state, not a re-downloadable
//! cache: a corrupt file is an error and is never deleted automatically.
//! Saves go through a temp file and rename so an interrupted write cannot
//! leave a truncated history behind.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config;
use crate::error::Result;
use crate::models::{Month, ResaleTransaction};

/// All persisted transactions, grouped by month.
pub type History = BTreeMap<Month, Vec<ResaleTransaction>>;

/// File-backed store for the merged transaction history.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Store rooted at `data_dir`, using the standard history file name.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            path: data_dir.as_ref().join(config::HISTORY_FILE),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted history. A missing file is an empty history; a
    /// file that exists but does not parse is an error, and the file is
    /// left in place for inspection.
    pub fn load(&self) -> Result<History> {
        if !self.path.exists() {
            return Ok(History::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&contents) {
            Ok(history) => Ok(history),
            Err(e) => {
                eprintln!("History file {} is corrupt: {}", self.path.display(), e);
                Err(e.into())
            }
        }
    }

    /// Persist the history, creating the data directory if needed.
    ///
    /// Writes to a temp sibling and renames on success, so an interrupted
    /// save never leaves a partial file behind.
    pub fn save(&self, history: &History) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string(history)?;
        let tmp = self.path.with_extension("json.tmp");

        let result = (|| -> Result<()> {
            fs::write(&tmp, &payload)?;
            fs::rename(&tmp, &self.path)?;
            Ok(())
        })();

        if result.is_err() {
            // Clean up the partial temp file on any error
            let _ = fs::remove_file(&tmp);
        }

        result
    }
}
