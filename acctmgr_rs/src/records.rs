//! Cluster, association and filter records.
//!
//! Limits are tracked per field with [`LimitField`] so that the keyword
//! table, the renderers and the store can all address a limit without
//! repeating the five-way match.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Account that owns the implicit per-cluster association.
pub const ROOT_ACCOUNT: &str = "root";

/// One of the five per-job default limits a cluster carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitField {
    FairShare,
    MaxJobs,
    MaxNodesPerJob,
    MaxWallDurationPerJob,
    MaxCpuSecsPerJob,
}

impl LimitField {
    /// Display order used by previews and listings.
    pub const ALL: [LimitField; 5] = [
        LimitField::FairShare,
        LimitField::MaxCpuSecsPerJob,
        LimitField::MaxJobs,
        LimitField::MaxNodesPerJob,
        LimitField::MaxWallDurationPerJob,
    ];

    /// Column/preview label.
    pub fn label(self) -> &'static str {
        match self {
            LimitField::FairShare => "FairShare",
            LimitField::MaxJobs => "MaxJobs",
            LimitField::MaxNodesPerJob => "MaxNodes",
            LimitField::MaxWallDurationPerJob => "MaxWall",
            LimitField::MaxCpuSecsPerJob => "MaxCPUSecs",
        }
    }
}

impl fmt::Display for LimitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-field optional limits. `None` means unset.
///
/// Parsing produces `Limits<i64>` holding the raw operator values; add
/// normalizes that into `Limits<u32>`, modify into a [`LimitPatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Limits<T = u32> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fairshare: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_jobs: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_nodes_per_job: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_wall_duration_per_job: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cpu_secs_per_job: Option<T>,
}

impl<T: Copy> Limits<T> {
    pub fn get(&self, field: LimitField) -> Option<T> {
        match field {
            LimitField::FairShare => self.fairshare,
            LimitField::MaxJobs => self.max_jobs,
            LimitField::MaxNodesPerJob => self.max_nodes_per_job,
            LimitField::MaxWallDurationPerJob => self.max_wall_duration_per_job,
            LimitField::MaxCpuSecsPerJob => self.max_cpu_secs_per_job,
        }
    }

    pub fn set(&mut self, field: LimitField, value: Option<T>) {
        let slot = match field {
            LimitField::FairShare => &mut self.fairshare,
            LimitField::MaxJobs => &mut self.max_jobs,
            LimitField::MaxNodesPerJob => &mut self.max_nodes_per_job,
            LimitField::MaxWallDurationPerJob => &mut self.max_wall_duration_per_job,
            LimitField::MaxCpuSecsPerJob => &mut self.max_cpu_secs_per_job,
        };
        *slot = value;
    }

    /// Fields that carry a value, in display order.
    pub fn iter_set(&self) -> impl Iterator<Item = (LimitField, T)> + '_ {
        LimitField::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|value| (field, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter_set().next().is_none()
    }
}

/// Modify payload: `None` leaves a field alone, `Some(None)` clears it,
/// `Some(Some(v))` sets it.
pub type LimitPatch = Limits<Option<u32>>;

impl Limits<i64> {
    /// Defaults for new clusters: negative values mean "use the system
    /// default", zero is a real limit.
    pub fn for_add(&self) -> Limits {
        let mut out = Limits::default();
        for (field, value) in self.iter_set() {
            out.set(field, u32::try_from(value).ok());
        }
        out
    }

    /// Patch for existing clusters: zero and negative values clear the field.
    pub fn for_modify(&self) -> LimitPatch {
        let mut out = LimitPatch::default();
        for (field, value) in self.iter_set() {
            let value = u32::try_from(value).ok().filter(|v| *v > 0);
            out.set(field, Some(value));
        }
        out
    }
}

impl LimitPatch {
    /// Fields the patch sets to a value, dropping the cleared ones.
    pub fn assigned(&self) -> Limits {
        let mut out = Limits::default();
        for (field, value) in self.iter_set() {
            out.set(field, value);
        }
        out
    }

    /// Fields the patch clears.
    pub fn cleared(&self) -> impl Iterator<Item = LimitField> + '_ {
        self.iter_set()
            .filter(|(_, value)| value.is_none())
            .map(|(field, _)| field)
    }
}

impl Limits {
    /// Set or clear every field named in `patch`.
    pub fn apply(&mut self, patch: &LimitPatch) {
        for (field, value) in patch.iter_set() {
            self.set(field, value);
        }
    }
}

/// A cluster known to the accounting store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRecord {
    pub name: String,
    #[serde(flatten)]
    pub limits: Limits,
}

impl ClusterRecord {
    pub fn new(name: impl Into<String>, limits: Limits) -> Self {
        Self {
            name: name.into(),
            limits,
        }
    }
}

/// Association row; the core only ever creates the `root` one per cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationRecord {
    pub account: String,
    pub cluster: String,
    #[serde(flatten)]
    pub limits: Limits,
}

impl AssociationRecord {
    /// Root association for `cluster`, copying its limits.
    pub fn root_for(cluster: &ClusterRecord) -> Self {
        Self {
            account: ROOT_ACCOUNT.to_string(),
            cluster: cluster.name.clone(),
            limits: cluster.limits,
        }
    }

    pub fn is_root_of(&self, cluster: &str) -> bool {
        self.account == ROOT_ACCOUNT && self.cluster == cluster
    }
}

/// Name patterns selecting which clusters a command targets.
///
/// Empty means no filter was given. Destructive commands must treat that as
/// "nothing selected".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterCondition {
    names: Vec<String>,
}

impl ClusterCondition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pattern; repeats are collapsed. Returns true if it was new.
    pub fn push(&mut self, pattern: impl Into<String>) -> bool {
        let pattern = pattern.into();
        if self.names.contains(&pattern) {
            return false;
        }
        self.names.push(pattern);
        true
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ClusterCondition {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut cond = ClusterCondition::new();
        for name in iter {
            cond.push(name);
        }
        cond
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(fairshare: i64, max_jobs: i64) -> Limits<i64> {
        Limits {
            fairshare: Some(fairshare),
            max_jobs: Some(max_jobs),
            ..Default::default()
        }
    }

    #[test]
    fn modify_normalization_clears_zero_and_negative() {
        let patch = raw(0, -3).for_modify();
        assert_eq!(patch.fairshare, Some(None));
        assert_eq!(patch.max_jobs, Some(None));
        assert!(patch.assigned().is_empty());

        let patch = raw(7, 0).for_modify();
        assert_eq!(patch.fairshare, Some(Some(7)));
        assert_eq!(patch.max_wall_duration_per_job, None);
        assert_eq!(patch.cleared().collect::<Vec<_>>(), vec![LimitField::MaxJobs]);
    }

    #[test]
    fn add_normalization_keeps_zero() {
        let defaults = raw(0, -1).for_add();
        assert_eq!(defaults.fairshare, Some(0));
        assert_eq!(defaults.max_jobs, None);
    }

    #[test]
    fn oversized_values_become_unset() {
        let defaults = raw(i64::from(u32::MAX) + 1, 5).for_add();
        assert_eq!(defaults.fairshare, None);
        assert_eq!(defaults.max_jobs, Some(5));
    }

    #[test]
    fn apply_sets_and_clears_named_fields() {
        let mut limits = Limits {
            fairshare: Some(1),
            max_jobs: Some(4),
            max_wall_duration_per_job: Some(60),
            ..Default::default()
        };
        limits.apply(&LimitPatch {
            fairshare: Some(Some(9)),
            max_jobs: Some(None),
            ..Default::default()
        });
        assert_eq!(limits.fairshare, Some(9));
        assert_eq!(limits.max_jobs, None);
        assert_eq!(limits.max_wall_duration_per_job, Some(60));
    }

    #[test]
    fn iter_set_follows_display_order() {
        let limits = Limits {
            max_jobs: Some(3),
            fairshare: Some(1),
            max_cpu_secs_per_job: Some(2),
            ..Default::default()
        };
        let fields: Vec<_> = limits.iter_set().map(|(f, _)| f).collect();
        assert_eq!(
            fields,
            vec![
                LimitField::FairShare,
                LimitField::MaxCpuSecsPerJob,
                LimitField::MaxJobs
            ]
        );
    }

    #[test]
    fn condition_collapses_duplicates() {
        let cond: ClusterCondition = ["a", "b", "a"].into_iter().collect();
        assert_eq!(cond.names(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn root_association_copies_limits() {
        let cluster = ClusterRecord::new(
            "alpha",
            Limits {
                max_jobs: Some(10),
                ..Default::default()
            },
        );
        let assoc = AssociationRecord::root_for(&cluster);
        assert!(assoc.is_root_of("alpha"));
        assert_eq!(assoc.limits.max_jobs, Some(10));
    }

    #[test]
    fn cluster_serializes_flat() {
        let cluster = ClusterRecord::new(
            "alpha",
            Limits {
                fairshare: Some(5),
                ..Default::default()
            },
        );
        let json = serde_json::to_value(&cluster).expect("serialize");
        assert_eq!(json, serde_json::json!({"name": "alpha", "fairshare": 5}));
    }
}
