//! Backend contract for cluster storage.
//!
//! Every mutating call opens (or extends) a pending transaction which only
//! becomes visible after [`ClusterStore::commit`] with `persist = true`.
//! `persist = false` discards it.

mod json;
mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use thiserror::Error;

use crate::records::{ClusterCondition, ClusterRecord, LimitPatch};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no clusters given to add")]
    EmptyBatch,
    #[error("cluster '{0}' already exists")]
    AlreadyExists(String),
    #[error("cluster name must not be empty")]
    EmptyName,
    #[error("refusing to remove clusters without a filter")]
    EmptyFilter,
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed store document {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode store document: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Storage operations the command orchestrators rely on.
pub trait ClusterStore {
    /// Stage new clusters.
    fn add_clusters(&mut self, actor: &str, batch: &[ClusterRecord]) -> Result<(), StoreError>;

    /// Clusters matching `filter`; an empty filter returns every cluster.
    fn get_clusters(&self, filter: &ClusterCondition) -> Result<Vec<ClusterRecord>, StoreError>;

    /// Stage `patch` onto matching clusters, returning the affected names.
    fn modify_clusters(
        &mut self,
        actor: &str,
        filter: &ClusterCondition,
        patch: &LimitPatch,
    ) -> Result<Vec<String>, StoreError>;

    /// Stage removal of matching clusters, returning the affected names.
    fn remove_clusters(
        &mut self,
        actor: &str,
        filter: &ClusterCondition,
    ) -> Result<Vec<String>, StoreError>;

    /// Publish (`persist = true`) or discard the pending transaction.
    fn commit(&mut self, actor: &str, persist: bool) -> Result<(), StoreError>;
}

impl<S: ClusterStore + ?Sized> ClusterStore for Box<S> {
    fn add_clusters(&mut self, actor: &str, batch: &[ClusterRecord]) -> Result<(), StoreError> {
        (**self).add_clusters(actor, batch)
    }

    fn get_clusters(&self, filter: &ClusterCondition) -> Result<Vec<ClusterRecord>, StoreError> {
        (**self).get_clusters(filter)
    }

    fn modify_clusters(
        &mut self,
        actor: &str,
        filter: &ClusterCondition,
        patch: &LimitPatch,
    ) -> Result<Vec<String>, StoreError> {
        (**self).modify_clusters(actor, filter, patch)
    }

    fn remove_clusters(
        &mut self,
        actor: &str,
        filter: &ClusterCondition,
    ) -> Result<Vec<String>, StoreError> {
        (**self).remove_clusters(actor, filter)
    }

    fn commit(&mut self, actor: &str, persist: bool) -> Result<(), StoreError> {
        (**self).commit(actor, persist)
    }
}
