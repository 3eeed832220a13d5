//! `add cluster`

use std::io::Write;

use crate::clause::{Diagnostic, parse_limit};
use crate::confirm::Confirm;
use crate::error::CommandError;
use crate::records::{ClusterRecord, Limits};
use crate::report;
use crate::session::{Outcome, Session};
use crate::store::ClusterStore;
use crate::tokens::{ADD_KEYWORDS, AddKey, Token, lookup, scan};

/// Names and shared defaults parsed from an `add` command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddRequest {
    /// Requested names in first-appearance order, without repeats.
    pub names: Vec<String>,
    /// Raw defaults applied to every new cluster.
    pub defaults: Limits<i64>,
    pub limit_set: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl AddRequest {
    fn push_name(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        if !self.names.iter().any(|n| n == name) {
            self.names.push(name.to_string());
        }
    }
}

/// Parse the whole command line as one run of names and defaults.
pub fn parse_add<T: AsRef<str>>(tokens: &[T]) -> AddRequest {
    let mut req = AddRequest::default();
    for raw in tokens.iter().map(|t| t.as_ref()) {
        match scan(raw) {
            Token::Bare(name) => req.push_name(name),
            Token::Clause(_) => req
                .diagnostics
                .push(Diagnostic::UnexpectedClause(raw.to_string()).emit()),
            Token::Pair { key, value } => match lookup(ADD_KEYWORDS, key) {
                Some(AddKey::Names) if value.is_empty() => req
                    .diagnostics
                    .push(Diagnostic::EmptyValue(raw.to_string()).emit()),
                Some(AddKey::Names) => req.push_name(value),
                Some(AddKey::Limit(field)) => match parse_limit(raw, value) {
                    Ok(v) => {
                        req.defaults.set(field, Some(v));
                        req.limit_set = true;
                    }
                    Err(diag) => req.diagnostics.push(diag.emit()),
                },
                None => req
                    .diagnostics
                    .push(Diagnostic::UnknownOption(raw.to_string()).emit()),
            },
        }
    }
    req
}

impl<S: ClusterStore, C: Confirm, W: Write> Session<S, C, W> {
    /// Add every requested cluster that is not already mirrored.
    pub fn add_cluster<T: AsRef<str>>(&mut self, tokens: &[T]) -> Result<Outcome, CommandError> {
        let req = parse_add(tokens);
        if req.names.is_empty() {
            return Err(CommandError::EmptyInput("Need name of cluster to add."));
        }

        let defaults = req.defaults.for_add();
        let mut staged = Vec::with_capacity(req.names.len());
        for name in &req.names {
            if self.mirror.find_cluster(name).is_some() {
                report::write_skip_existing(&mut self.out, &self.report, name)?;
                continue;
            }
            staged.push(ClusterRecord::new(name.as_str(), defaults));
        }

        if staged.is_empty() {
            writeln!(self.out, " Nothing new to add.")?;
            return Ok(Outcome::Unchanged);
        }

        report::write_add_preview(&mut self.out, &self.report, &staged)?;
        if req.limit_set {
            report::write_limits(&mut self.out, &self.report, "Cluster Defaults", &defaults)?;
        }

        let submitted = self
            .store
            .add_clusters(&self.actor, &staged)
            .map_err(|e| CommandError::backend("adding", e));
        self.rollback_on_err(submitted)?;

        if !self.confirm_and_commit("adding")? {
            return Ok(Outcome::RolledBack);
        }
        let count = staged.len();
        for cluster in staged {
            self.mirror.insert_with_root(cluster);
        }
        Ok(Outcome::Committed { count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::LimitField;

    #[test]
    fn names_keep_first_appearance_order() {
        let req = parse_add(&["b", "Names=a", "b", "n=c"]);
        assert_eq!(req.names, vec!["b", "a", "c"]);
        assert!(!req.limit_set);
    }

    #[test]
    fn limits_become_shared_defaults() {
        let req = parse_add(&["x", "fairshare=2", "MaxCPU=600", "maxnodes=-1"]);
        assert!(req.limit_set);
        assert_eq!(req.defaults.get(LimitField::FairShare), Some(2));
        assert_eq!(req.defaults.get(LimitField::MaxCpuSecsPerJob), Some(600));
        assert_eq!(req.defaults.for_add().max_nodes_per_job, None);
    }

    #[test]
    fn clause_keywords_and_unknown_keys_are_reported() {
        let req = parse_add(&["Where", "x", "Colour=red", "Names="]);
        assert_eq!(req.names, vec!["x"]);
        assert_eq!(
            req.diagnostics,
            vec![
                Diagnostic::UnexpectedClause("Where".to_string()),
                Diagnostic::UnknownOption("Colour=red".to_string()),
                Diagnostic::EmptyValue("Names=".to_string()),
            ]
        );
    }
}
