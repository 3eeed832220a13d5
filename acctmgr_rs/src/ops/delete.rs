//! `delete cluster`

use std::io::Write;

use crate::clause::parse_conditions;
use crate::confirm::Confirm;
use crate::error::CommandError;
use crate::report;
use crate::session::{Outcome, Session};
use crate::store::ClusterStore;

impl<S: ClusterStore, C: Confirm, W: Write> Session<S, C, W> {
    /// Remove the selected clusters and, once committed, their root
    /// associations.
    ///
    /// A condition is mandatory; there is no "delete everything" fallback.
    pub fn delete_cluster<T: AsRef<str>>(
        &mut self,
        tokens: &[T],
    ) -> Result<Outcome, CommandError> {
        let parsed = parse_conditions(tokens);
        if !parsed.any_set || parsed.condition.is_empty() {
            return Err(CommandError::EmptyInput(
                "No conditions given to remove, not executing.",
            ));
        }

        let staged = self
            .store
            .remove_clusters(&self.actor, &parsed.condition)
            .map_err(|e| CommandError::backend("deleting", e))
            .and_then(|affected| {
                if affected.is_empty() {
                    return Err(CommandError::NoneAffected("deleting"));
                }
                report::write_affected(&mut self.out, &self.report, "Deleting", &affected)?;
                Ok(affected)
            });
        let affected = self.rollback_on_err(staged)?;

        if !self.confirm_and_commit("deleting")? {
            return Ok(Outcome::RolledBack);
        }
        for name in &affected {
            self.mirror.remove_with_root(name);
        }
        Ok(Outcome::Committed {
            count: affected.len(),
        })
    }
}
