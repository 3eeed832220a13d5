//! In-memory store with a single pending transaction.

use tracing::debug;

use super::{ClusterStore, StoreError};
use crate::records::{ClusterCondition, ClusterRecord, LimitPatch};

/// Pattern that selects every cluster.
const MATCH_ALL: &str = "*";

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    committed: Vec<ClusterRecord>,
    pending: Option<Vec<ClusterRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clusters(clusters: Vec<ClusterRecord>) -> Self {
        Self {
            committed: clusters,
            pending: None,
        }
    }

    /// Committed clusters, ignoring any pending transaction.
    pub fn committed(&self) -> &[ClusterRecord] {
        &self.committed
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn view(&self) -> &[ClusterRecord] {
        self.pending.as_deref().unwrap_or(&self.committed)
    }

    fn pending_mut(&mut self) -> &mut Vec<ClusterRecord> {
        let committed = &self.committed;
        self.pending.get_or_insert_with(|| committed.clone())
    }
}

fn selects(filter: &ClusterCondition, name: &str) -> bool {
    filter.names().iter().any(|p| p == MATCH_ALL || p == name)
}

impl ClusterStore for MemoryStore {
    fn add_clusters(&mut self, actor: &str, batch: &[ClusterRecord]) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Err(StoreError::EmptyBatch);
        }
        for (i, record) in batch.iter().enumerate() {
            if record.name.is_empty() {
                return Err(StoreError::EmptyName);
            }
            let repeated = batch[..i].iter().any(|r| r.name == record.name);
            if repeated || self.view().iter().any(|c| c.name == record.name) {
                return Err(StoreError::AlreadyExists(record.name.clone()));
            }
        }
        debug!(actor, count = batch.len(), "staging cluster add");
        self.pending_mut().extend(batch.iter().cloned());
        Ok(())
    }

    fn get_clusters(&self, filter: &ClusterCondition) -> Result<Vec<ClusterRecord>, StoreError> {
        Ok(self
            .view()
            .iter()
            .filter(|c| filter.is_empty() || selects(filter, &c.name))
            .cloned()
            .collect())
    }

    fn modify_clusters(
        &mut self,
        actor: &str,
        filter: &ClusterCondition,
        patch: &LimitPatch,
    ) -> Result<Vec<String>, StoreError> {
        let mut affected = Vec::new();
        for cluster in self.pending_mut().iter_mut() {
            if filter.is_empty() || selects(filter, &cluster.name) {
                cluster.limits.apply(patch);
                affected.push(cluster.name.clone());
            }
        }
        debug!(actor, count = affected.len(), "staging cluster modify");
        Ok(affected)
    }

    fn remove_clusters(
        &mut self,
        actor: &str,
        filter: &ClusterCondition,
    ) -> Result<Vec<String>, StoreError> {
        if filter.is_empty() {
            return Err(StoreError::EmptyFilter);
        }
        let mut affected = Vec::new();
        self.pending_mut().retain(|cluster| {
            let hit = selects(filter, &cluster.name);
            if hit {
                affected.push(cluster.name.clone());
            }
            !hit
        });
        debug!(actor, count = affected.len(), "staging cluster removal");
        Ok(affected)
    }

    fn commit(&mut self, actor: &str, persist: bool) -> Result<(), StoreError> {
        match self.pending.take() {
            Some(pending) if persist => {
                debug!(actor, "committing pending cluster changes");
                self.committed = pending;
            }
            Some(_) => debug!(actor, "discarding pending cluster changes"),
            None => debug!(actor, persist, "commit with no pending changes"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Limits;

    fn cluster(name: &str) -> ClusterRecord {
        ClusterRecord::new(name, Limits::default())
    }

    fn names(records: &[ClusterRecord]) -> Vec<&str> {
        records.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn add_is_invisible_until_committed() {
        let mut store = MemoryStore::new();
        store.add_clusters("root", &[cluster("a")]).unwrap();
        assert!(store.committed().is_empty());
        assert!(store.has_pending());

        store.commit("root", true).unwrap();
        assert_eq!(names(store.committed()), vec!["a"]);
        assert!(!store.has_pending());
    }

    #[test]
    fn rollback_discards_pending() {
        let mut store = MemoryStore::with_clusters(vec![cluster("a")]);
        store
            .remove_clusters("root", &["a"].into_iter().collect())
            .unwrap();
        store.commit("root", false).unwrap();
        assert_eq!(names(store.committed()), vec!["a"]);
    }

    #[test]
    fn add_rejects_duplicates_and_empty_batches() {
        let mut store = MemoryStore::with_clusters(vec![cluster("a")]);
        assert!(matches!(
            store.add_clusters("root", &[cluster("a")]),
            Err(StoreError::AlreadyExists(name)) if name == "a"
        ));
        assert!(matches!(
            store.add_clusters("root", &[cluster("b"), cluster("b")]),
            Err(StoreError::AlreadyExists(_))
        ));
        assert!(matches!(
            store.add_clusters("root", &[]),
            Err(StoreError::EmptyBatch)
        ));
        assert!(!store.has_pending());
    }

    #[test]
    fn empty_filter_lists_everything_but_never_removes() {
        let mut store = MemoryStore::with_clusters(vec![cluster("a"), cluster("b")]);
        let all = store.get_clusters(&ClusterCondition::new()).unwrap();
        assert_eq!(all.len(), 2);
        assert!(matches!(
            store.remove_clusters("root", &ClusterCondition::new()),
            Err(StoreError::EmptyFilter)
        ));
    }

    #[test]
    fn modify_applies_patch_to_matches() {
        let mut store = MemoryStore::with_clusters(vec![cluster("a"), cluster("b")]);
        let patch = LimitPatch {
            max_jobs: Some(Some(4)),
            ..Default::default()
        };
        let affected = store
            .modify_clusters("root", &["b", "zzz"].into_iter().collect(), &patch)
            .unwrap();
        assert_eq!(affected, vec!["b"]);
        store.commit("root", true).unwrap();
        assert_eq!(store.committed()[1].limits.max_jobs, Some(4));
        assert_eq!(store.committed()[0].limits.max_jobs, None);
    }

    #[test]
    fn wildcard_selects_all() {
        let store = MemoryStore::with_clusters(vec![cluster("a"), cluster("b")]);
        let found = store.get_clusters(&["*"].into_iter().collect()).unwrap();
        assert_eq!(names(&found), vec!["a", "b"]);
    }
}
