//! `modify cluster`
//!
//! Tokens before any clause keyword, or after `Where`, select clusters.
//! Tokens after `Set` are assignments. Clauses may repeat in any order.

use std::io::Write;

use crate::clause::{Diagnostic, build_assignment, build_condition};
use crate::confirm::Confirm;
use crate::error::CommandError;
use crate::records::{ClusterCondition, Limits};
use crate::report;
use crate::session::{Outcome, Session};
use crate::store::ClusterStore;
use crate::tokens::{Clause, Token, scan};

pub const UNGUARDED_PROMPT: &str =
    "You didn't set any conditions with 'WHERE'.\nAre you sure you want to continue?";

#[derive(Debug, Clone, Default)]
pub struct ModifyRequest {
    pub condition: ClusterCondition,
    pub cond_set: bool,
    /// Raw assignments, before normalization.
    pub assignment: Limits<i64>,
    pub rec_set: bool,
    pub diagnostics: Vec<Diagnostic>,
}

/// Split a modify command line into its condition and assignment.
pub fn parse_modify<T: AsRef<str>>(tokens: &[T]) -> ModifyRequest {
    let mut req = ModifyRequest::default();
    let mut i = 0;
    while i < tokens.len() {
        let (mut run, start) = match scan(tokens[i].as_ref()) {
            Token::Clause(Clause::Set) => {
                let run = build_assignment(tokens, i + 1, &mut req.assignment);
                req.rec_set |= run.any_set;
                (run, i + 1)
            }
            Token::Clause(Clause::Where) => {
                let run = build_condition(tokens, i + 1, &mut req.condition);
                req.cond_set |= run.any_set;
                (run, i + 1)
            }
            _ => {
                let run = build_condition(tokens, i, &mut req.condition);
                req.cond_set |= run.any_set;
                (run, i)
            }
        };
        req.diagnostics.append(&mut run.diagnostics);
        i = run.end(start);
    }
    req
}

impl<S: ClusterStore, C: Confirm, W: Write> Session<S, C, W> {
    /// Apply `Set` assignments to the clusters selected by `Where`.
    pub fn modify_cluster<T: AsRef<str>>(
        &mut self,
        tokens: &[T],
    ) -> Result<Outcome, CommandError> {
        let req = parse_modify(tokens);
        if !req.rec_set {
            return Err(CommandError::EmptyInput(
                "You didn't give me anything to set.",
            ));
        }
        if !req.cond_set && !self.confirm.confirm(UNGUARDED_PROMPT) {
            writeln!(self.out, " Aborted")?;
            return Ok(Outcome::Aborted);
        }

        let patch = req.assignment.for_modify();
        writeln!(self.out, " {}", self.report.painter.header("Setting"))?;
        report::write_limits(
            &mut self.out,
            &self.report,
            "Cluster Defaults =",
            &patch.assigned(),
        )?;

        let staged = self
            .store
            .modify_clusters(&self.actor, &req.condition, &patch)
            .map_err(|e| CommandError::backend("modifying", e))
            .and_then(|affected| {
                if affected.is_empty() {
                    return Err(CommandError::NoneAffected("modifying"));
                }
                report::write_affected(&mut self.out, &self.report, "Modifying", &affected)?;
                Ok(affected)
            });
        let affected = self.rollback_on_err(staged)?;

        if !self.confirm_and_commit("modifying")? {
            return Ok(Outcome::RolledBack);
        }
        for name in &affected {
            self.mirror.apply_patch(name, &patch);
        }
        Ok(Outcome::Committed {
            count: affected.len(),
        })
    }
}
