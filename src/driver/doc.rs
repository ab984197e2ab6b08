//! Doc Driver
//!
//! Filesystem-backed storage: one file per key under a root directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::driver::{Driver, MAX_KEY_LENGTH};
use crate::error::{KvError, Result};

// == Doc Driver ==
/// Uses the OS file system to hold data. Every operation touches the disk,
/// so put an LRU cache in front of it (see `MapDriver`) for hot keys.
#[derive(Debug, Clone)]
pub struct DocDriver {
    root: PathBuf,
}

impl DocDriver {
    // == Constructor ==
    /// Opens a driver rooted at `root`, creating the directory if needed.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        debug!(root = %root.display(), "doc driver opened");
        Ok(Self { root })
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // == Path Resolution ==
    /// Maps a key to its file, rejecting anything that is not a plain file name.
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key == "." || key == ".." {
            return Err(KvError::InvalidKey(key.to_string()));
        }
        if key.len() > MAX_KEY_LENGTH {
            return Err(KvError::InvalidKey(format!(
                "key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }
        if key.contains(&['/', '\\', '\0'][..]) {
            return Err(KvError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

impl Driver for DocDriver {
    fn get(&mut self, key: &str) -> Result<Vec<u8>> {
        let path = self.path_for(key)?;
        fs::read(&path).map_err(|err| KvError::from_io(key, err))
    }

    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        let path = self.path_for(key)?;
        fs::write(&path, value)?;
        Ok(())
    }

    /// Absent keys fail with `NotExist`.
    fn del(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::remove_file(&path).map_err(|err| KvError::from_io(key, err))
    }
}
