//! Sync Module
//!
//! Materializes a local workspace on a remote host.
//!
//! ## Structure
//!
//! - `options` - Per-invocation configuration (`SyncOptions`)
//! - `excludes` - Layered exclude resolution
//! - `planner` - Per-repository clone planning
//! - `orchestrator` - Remote clone script execution
//! - `preview` - Dry-run file count
//! - `result` - `SyncResult`, `RepoResult` and the aggregator
//! - `use_case` - The pipeline (`SyncUseCase`)
//! - `batch` - Multi-workspace types
//!
//! ## Usage
//!
//! ```ignore
//! use hoist::application::sync::{SyncOptions, SyncRequest, SyncUseCase};
//!
//! let use_case = SyncUseCase::new(shell, transport, git);
//! let result = use_case.execute(&SyncRequest {
//!     workspace_dir: &dir,
//!     workspace: &workspace,
//!     server: &server,
//!     options: &SyncOptions::new(),
//! })?;
//! ```

mod batch;
mod excludes;
mod options;
mod orchestrator;
mod planner;
mod preview;
mod result;
mod use_case;

pub use batch::{BatchEntry, BatchTarget};
pub use excludes::{resolve_excludes, DEFAULT_EXCLUDES, ENV_EXCLUDES, FORCE_EXCLUDES, GIT_EXCLUDE};
pub use options::SyncOptions;
pub use orchestrator::{materialize_repos, CloneOutcome};
pub use planner::{plan_clones, ClonePlanning};
pub use preview::count_transferable;
pub use result::{ActionTaken, RepoResult, RepoStatus, ResultAggregator, SyncResult, MISSING_REMOTE};
pub use use_case::{SyncRequest, SyncUseCase};
