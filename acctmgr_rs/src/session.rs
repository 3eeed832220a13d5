//! Session state shared by every command.
//!
//! A [`Session`] owns the store handle, the confirmation collaborator, the
//! output sink and the [`Mirror`]. Each command borrows it mutably, so
//! commands run strictly one after another.

use std::io::{self, Write};

use tracing::{debug, warn};

use crate::confirm::Confirm;
use crate::error::CommandError;
use crate::mirror::Mirror;
use crate::records::ClusterCondition;
use crate::report::ReportOptions;
use crate::store::{ClusterStore, StoreError};

pub const COMMIT_PROMPT: &str = "Would you like to commit changes?";

/// How a command that did not fail ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Changes were committed; `count` records were affected.
    Committed { count: usize },
    /// The operator declined and the pending changes were discarded.
    RolledBack,
    /// The operator declined before anything was sent to the store.
    Aborted,
    /// Nothing needed doing.
    Unchanged,
    /// A read-only query returned `count` records.
    Listed { count: usize },
}

pub struct Session<S, C, W = io::Stdout> {
    pub(crate) store: S,
    pub(crate) confirm: C,
    pub(crate) out: W,
    pub(crate) mirror: Mirror,
    pub(crate) actor: String,
    pub(crate) report: ReportOptions,
}

impl<S: ClusterStore, C: Confirm, W: Write> Session<S, C, W> {
    /// Session with an empty mirror.
    pub fn new(store: S, confirm: C, out: W, actor: impl Into<String>) -> Self {
        Self {
            store,
            confirm,
            out,
            mirror: Mirror::new(),
            actor: actor.into(),
            report: ReportOptions::default(),
        }
    }

    /// Session whose mirror is loaded from the store's current clusters.
    pub fn load(store: S, confirm: C, out: W, actor: impl Into<String>) -> Result<Self, StoreError> {
        let clusters = store.get_clusters(&ClusterCondition::new())?;
        debug!(clusters = clusters.len(), "loaded mirror");
        let mut session = Self::new(store, confirm, out, actor);
        session.mirror = Mirror::from_clusters(clusters);
        Ok(session)
    }

    pub fn with_mirror(mut self, mirror: Mirror) -> Self {
        self.mirror = mirror;
        self
    }

    pub fn with_report(mut self, report: ReportOptions) -> Self {
        self.report = report;
        self
    }

    pub fn mirror(&self) -> &Mirror {
        &self.mirror
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn confirmer(&self) -> &C {
        &self.confirm
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// Close the transaction opened by a staging call when the command fails
    /// before reaching the commit question, then hand the error back.
    pub(crate) fn rollback_on_err<T>(
        &mut self,
        result: Result<T, CommandError>,
    ) -> Result<T, CommandError> {
        if let Err(err) = &result {
            debug!(%err, "rolling back staged change");
            if let Err(e) = self.store.commit(&self.actor, false) {
                warn!("rollback failed: {e}");
            }
        }
        result
    }

    /// Ask the commit question, then commit or roll back accordingly.
    /// Returns whether the changes were kept.
    pub(crate) fn confirm_and_commit(&mut self, action: &'static str) -> Result<bool, CommandError> {
        let persist = self.confirm.confirm(COMMIT_PROMPT);
        self.store
            .commit(&self.actor, persist)
            .map_err(|e| CommandError::backend(action, e))?;
        debug!(persist, action, "transaction closed");
        Ok(persist)
    }
}
