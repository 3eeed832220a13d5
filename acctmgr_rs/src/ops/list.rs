//! `list cluster`

use std::io::Write;

use crate::clause::parse_conditions;
use crate::confirm::Confirm;
use crate::error::CommandError;
use crate::report;
use crate::session::{Outcome, Session};
use crate::store::ClusterStore;

impl<S: ClusterStore, C: Confirm, W: Write> Session<S, C, W> {
    /// Render the clusters matching the condition. Without a condition every
    /// cluster is listed.
    pub fn list_cluster<T: AsRef<str>>(&mut self, tokens: &[T]) -> Result<Outcome, CommandError> {
        let parsed = parse_conditions(tokens);
        let clusters = self
            .store
            .get_clusters(&parsed.condition)
            .map_err(|e| CommandError::backend("listing", e))?;
        report::write_cluster_list(&mut self.out, &self.report, &clusters)?;
        Ok(Outcome::Listed {
            count: clusters.len(),
        })
    }
}
