//! CLI module for the `acctmgr <verb> cluster [tokens]` interface.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │          argv  (or one line per command in interactive mode) │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  parser: verb + entity  →  Command { tokens... }             │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  dispatch → Session::{add,list,modify,delete}_cluster        │
//! │             clause builders → store → confirm → commit       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Structure
//!
//! - [`command`] - Command enum and help text (source of truth)
//! - [`parser`] - verb/entity parser and line splitting
//! - [`dispatch`] - runs a Command against a Session
//! - [`interactive`] - read-eval loop sharing one Session
//! - [`entrypoint`] - clap options, logging, config, store setup

pub mod command;
pub mod dispatch;
pub mod entrypoint;
pub mod interactive;
pub mod parser;

pub use command::{Command, Entity};
pub use dispatch::{DispatchResult, dispatch_command};
pub use interactive::run_interactive;
pub use parser::{parse_command, split_line};
