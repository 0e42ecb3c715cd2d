// src/exec/memory.rs

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tracing::debug;

use crate::host::Reloadable;

/// Reloads a resource by reading its whole file into memory.
///
/// Stands in for hosts that keep a parsed copy of the file around: the
/// in-memory bytes always reflect the last successful reload.
#[derive(Debug, Clone)]
pub struct InMemoryReload {
    path: PathBuf,
    contents: Arc<Mutex<Option<Arc<Vec<u8>>>>>,
}

impl InMemoryReload {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            contents: Arc::new(Mutex::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes loaded by the last successful reload, if any.
    pub fn contents(&self) -> Option<Arc<Vec<u8>>> {
        self.contents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Reloadable for InMemoryReload {
    fn reload(&self) -> Result<()> {
        let bytes = fs::read(&self.path)
            .with_context(|| format!("reading {:?}", self.path))?;
        debug!(path = ?self.path, bytes = bytes.len(), "loaded file into memory");
        *self.contents.lock().unwrap_or_else(|e| e.into_inner()) = Some(Arc::new(bytes));
        Ok(())
    }
}
