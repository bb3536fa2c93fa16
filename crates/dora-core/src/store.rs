//! Persistence for the deployment dataset.
//!
//! Loading is fail-soft: a missing or unparseable document yields an empty
//! dataset so new tracking is never blocked. Saving propagates I/O errors.
//! There is no locking; concurrent writers are last-writer-wins.

use crate::deployment::Dataset;
use crate::error::Result;
use crate::io;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

pub trait Store {
    fn load(&self) -> Result<Dataset>;
    fn save(&self, dataset: &Dataset) -> Result<()>;
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// A single JSON document on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for FileStore {
    fn load(&self) -> Result<Dataset> {
        let Some(bytes) = io::read_if_exists(&self.path)? else {
            tracing::debug!(path = %self.path.display(), "metrics file missing, starting empty");
            return Ok(Dataset::default());
        };
        match serde_json::from_slice::<Dataset>(&bytes) {
            Ok(dataset) => {
                tracing::debug!(
                    path = %self.path.display(),
                    deployments = dataset.deployments.len(),
                    "loaded metrics file"
                );
                Ok(dataset)
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "metrics file is not valid, starting empty"
                );
                Ok(Dataset::default())
            }
        }
    }

    fn save(&self, dataset: &Dataset) -> Result<()> {
        let data = serde_json::to_vec_pretty(dataset)?;
        io::atomic_write(&self.path, &data)?;
        tracing::debug!(
            path = %self.path.display(),
            deployments = dataset.deployments.len(),
            "saved metrics file"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    dataset: RefCell<Dataset>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Dataset {
        self.dataset.borrow().clone()
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<Dataset> {
        Ok(self.dataset.borrow().clone())
    }

    fn save(&self, dataset: &Dataset) -> Result<()> {
        *self.dataset.borrow_mut() = dataset.clone();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
