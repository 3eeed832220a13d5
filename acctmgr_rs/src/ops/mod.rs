//! Cluster command orchestrators.
//!
//! Each submodule adds one command to [`Session`](crate::session::Session):
//!
//! - [`add`] - stage new clusters, confirm, mirror them with root associations
//! - [`list`] - read-only query
//! - [`modify`] - `Where`/`Set` state machine, patch normalization
//! - [`delete`] - guarded removal with cascading association cleanup

pub mod add;
pub mod delete;
pub mod list;
pub mod modify;

pub use add::{AddRequest, parse_add};
pub use modify::{ModifyRequest, parse_modify};
