//! # acctmgr
//!
//! **Cluster administration for a resource accounting store.** Parses
//! sacctmgr-style command tokens and drives add, list, modify and delete
//! against a pluggable store, staging every change behind a preview and a
//! commit prompt.
//!
//! ## Features
//!
//! - **Abbreviated keywords** - `Where`, `Set`, `Names=`, `MaxJobs=` and friends
//!   match on case-insensitive prefixes
//! - **Stage → preview → confirm → commit** - nothing is persisted until the
//!   operator says yes (or `--immediate` is given)
//! - **Local mirror** - the session keeps clusters and their root associations
//!   in sync with what was committed
//! - **JSON store** - a single document written atomically on commit
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use acctmgr::confirm::Immediate;
//! use acctmgr::session::Session;
//! use acctmgr::store::MemoryStore;
//!
//! let mut session = Session::load(MemoryStore::new(), Immediate, std::io::stdout(), "root")?;
//! session.add_cluster(&["alpha", "FairShare=10"])?;
//! session.list_cluster::<&str>(&[])?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! acctmgr add cluster alpha beta MaxJobs=500
//! acctmgr modify cluster where alpha set MaxWall=1440
//! acctmgr --long list cluster
//! acctmgr delete cluster beta
//! acctmgr                      # interactive mode
//! ```
//!
//! ## Module Overview
//!
//! - [`tokens`] - token shapes and keyword tables
//! - [`clause`] - condition and assignment builders
//! - [`records`] - cluster, association, limits and condition types
//! - [`store`] - store trait, in-memory and JSON-file backends
//! - [`mirror`] - session-local copy of committed clusters
//! - [`confirm`] - commit prompt
//! - [`session`] / [`ops`] - the four orchestrators
//! - [`report`] - previews and listings
//! - [`cli`] - argv and interactive front end

pub mod clause;
pub mod cli;
pub mod colors;
pub mod config;
pub mod confirm;
pub mod error;
pub mod mirror;
pub mod ops;
pub mod records;
pub mod report;
pub mod session;
pub mod store;
pub mod tokens;
pub mod types;

pub use clause::Diagnostic;
pub use error::CommandError;
pub use records::{AssociationRecord, ClusterCondition, ClusterRecord, LimitPatch, Limits};
pub use session::{Outcome, Session};
pub use store::{ClusterStore, StoreError};
