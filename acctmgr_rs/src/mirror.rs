//! In-process copy of the loaded accounting state.
//!
//! The mirror holds every known cluster plus its root association. Commands
//! only touch it after the store has accepted and committed a change.

use tracing::info;

use crate::records::{AssociationRecord, ClusterRecord, LimitPatch};

#[derive(Debug, Clone, Default)]
pub struct Mirror {
    clusters: Vec<ClusterRecord>,
    associations: Vec<AssociationRecord>,
}

impl Mirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mirror from loaded clusters, pairing each with a root
    /// association.
    pub fn from_clusters(clusters: Vec<ClusterRecord>) -> Self {
        let associations = clusters.iter().map(AssociationRecord::root_for).collect();
        Self {
            clusters,
            associations,
        }
    }

    pub fn clusters(&self) -> &[ClusterRecord] {
        &self.clusters
    }

    pub fn associations(&self) -> &[AssociationRecord] {
        &self.associations
    }

    pub fn find_cluster(&self, name: &str) -> Option<&ClusterRecord> {
        self.clusters.iter().find(|c| c.name == name)
    }

    pub fn find_root_assoc(&self, cluster: &str) -> Option<&AssociationRecord> {
        self.associations.iter().find(|a| a.is_root_of(cluster))
    }

    pub fn append_cluster(&mut self, cluster: ClusterRecord) {
        self.clusters.push(cluster);
    }

    pub fn append_association(&mut self, assoc: AssociationRecord) {
        self.associations.push(assoc);
    }

    pub fn remove_cluster(&mut self, name: &str) -> Option<ClusterRecord> {
        let idx = self.clusters.iter().position(|c| c.name == name)?;
        Some(self.clusters.remove(idx))
    }

    pub fn remove_root_assoc(&mut self, cluster: &str) -> Option<AssociationRecord> {
        let idx = self.associations.iter().position(|a| a.is_root_of(cluster))?;
        Some(self.associations.remove(idx))
    }

    /// Record a committed new cluster together with its root association.
    pub fn insert_with_root(&mut self, cluster: ClusterRecord) {
        info!(cluster = %cluster.name, "mirroring new cluster");
        self.append_association(AssociationRecord::root_for(&cluster));
        self.append_cluster(cluster);
    }

    /// Drop a committed cluster and its root association. Returns true if
    /// anything was removed.
    pub fn remove_with_root(&mut self, name: &str) -> bool {
        let cluster = self.remove_cluster(name).is_some();
        let assoc = self.remove_root_assoc(name).is_some();
        if cluster || assoc {
            info!(cluster = %name, "removed cluster from mirror");
        }
        cluster || assoc
    }

    /// Apply a committed limit patch to a cluster and its root association.
    pub fn apply_patch(&mut self, name: &str, patch: &LimitPatch) {
        if let Some(cluster) = self.clusters.iter_mut().find(|c| c.name == name) {
            cluster.limits.apply(patch);
        }
        if let Some(assoc) = self.associations.iter_mut().find(|a| a.is_root_of(name)) {
            assoc.limits.apply(patch);
        }
    }
}
