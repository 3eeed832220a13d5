//! Fatal command outcomes.

use std::io;

use thiserror::Error;

use crate::store::StoreError;

/// Why a command stopped without doing its job. Declining a confirmation
/// is not an error; see [`crate::session::Outcome`].
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required names, conditions or assignments were missing. The store was
    /// not contacted.
    #[error("{0}")]
    EmptyInput(&'static str),

    /// The store refused the request or failed while handling it.
    #[error("problem {action} clusters: {source}")]
    BackendRejected {
        action: &'static str,
        #[source]
        source: StoreError,
    },

    /// The store accepted a modify/delete but reported nothing affected.
    #[error("problem {0} clusters: no clusters matched")]
    NoneAffected(&'static str),

    /// Command line could not be understood at the verb/entity level.
    #[error("{0}")]
    Usage(String),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CommandError {
    pub(crate) fn backend(action: &'static str, source: StoreError) -> Self {
        CommandError::BackendRejected { action, source }
    }
}
