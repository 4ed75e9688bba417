//! # File-backed Layout Store
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a temporary sibling
//! file first and are renamed into place, so a crash mid-save never leaves a
//! half-written slot behind.
//!
//! ## Example
//!
//! ```no_run
//! use seatplan::storage::{FileStore, LayoutStore};
//!
//! let mut store = FileStore::open("/var/lib/seatplan")?;
//! store.save("seatplan.layout", "{\"elements\": []}")?;
//! assert!(store.load("seatplan.layout")?.is_some());
//!
//! # Ok::<(), seatplan::error::SeatplanError>(())
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::LayoutStore;
use crate::error::{Result, SeatplanError};

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// ## Errors
    ///
    /// Returns an error if the directory cannot be created or the path
    /// exists and is not a directory.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| {
            SeatplanError::Storage(format!("Failed to create {}: {}", dir.display(), e))
        })?;
        if !dir.is_dir() {
            return Err(SeatplanError::Storage(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn slot_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
            && !key.starts_with('.');
        if !valid {
            return Err(SeatplanError::Storage(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl LayoutStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SeatplanError::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn save(&mut self, key: &str, contents: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        let tmp = path.with_extension("json.tmp");

        let write = || -> io::Result<()> {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(contents.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp, &path)
        };

        write().map_err(|e| {
            let _ = fs::remove_file(&tmp);
            SeatplanError::Storage(format!("Failed to write {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), bytes = contents.len(), "slot written");
        Ok(())
    }
}
