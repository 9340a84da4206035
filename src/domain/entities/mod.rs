//! Domain Entities
//!
//! Inputs the sync engine consumes (workspace descriptor, server) and the
//! clone plans derived from them.

mod clone_plan;
mod server;
mod workspace;

pub use clone_plan::RepoClonePlan;
pub use server::Server;
pub use workspace::{RepoEntry, SyncPreferences, Workspace, REPOS_DIR};
