//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `SyncUseCase` - Orchestrates a workspace sync (excludes, existence check,
//!   transfer, clone orchestration, aggregation)

pub mod sync;

pub use sync::{
    resolve_excludes, ActionTaken, BatchEntry, BatchTarget, RepoResult, RepoStatus, SyncOptions,
    SyncRequest, SyncResult, SyncUseCase,
};
