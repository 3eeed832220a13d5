//! JSON document store: a [`MemoryStore`] that writes itself back to disk
//! on every persisted commit.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ClusterStore, MemoryStore, StoreError};
use crate::records::{ClusterCondition, ClusterRecord, LimitPatch};

/// On-disk layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    clusters: Vec<ClusterRecord>,
}

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store; the file
    /// is only created on the first persisted commit.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let doc = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|source| StoreError::Read {
                path: path.clone(),
                source,
            })?;
            if raw.trim().is_empty() {
                StoreDocument::default()
            } else {
                serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
                    path: path.clone(),
                    source,
                })?
            }
        } else {
            StoreDocument::default()
        };
        debug!(path = %path.display(), clusters = doc.clusters.len(), "opened store");
        Ok(Self {
            path,
            inner: MemoryStore::with_clusters(doc.clusters),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self) -> Result<(), StoreError> {
        let doc = StoreDocument {
            clusters: self.inner.committed().to_vec(),
        };
        let data = serde_json::to_vec_pretty(&doc)?;
        let write_err = |source: std::io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, data).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;
        info!(path = %self.path.display(), "store written");
        Ok(())
    }
}

impl ClusterStore for JsonFileStore {
    fn add_clusters(&mut self, actor: &str, batch: &[ClusterRecord]) -> Result<(), StoreError> {
        self.inner.add_clusters(actor, batch)
    }

    fn get_clusters(&self, filter: &ClusterCondition) -> Result<Vec<ClusterRecord>, StoreError> {
        self.inner.get_clusters(filter)
    }

    fn modify_clusters(
        &mut self,
        actor: &str,
        filter: &ClusterCondition,
        patch: &LimitPatch,
    ) -> Result<Vec<String>, StoreError> {
        self.inner.modify_clusters(actor, filter, patch)
    }

    fn remove_clusters(
        &mut self,
        actor: &str,
        filter: &ClusterCondition,
    ) -> Result<Vec<String>, StoreError> {
        self.inner.remove_clusters(actor, filter)
    }

    fn commit(&mut self, actor: &str, persist: bool) -> Result<(), StoreError> {
        let had_pending = self.inner.has_pending();
        self.inner.commit(actor, persist)?;
        if persist && had_pending {
            self.write()?;
        }
        Ok(())
    }
}
