//! Sync Use Case
//!
//! Orchestrates one workspace sync:
//! 1. Resolve the exclude list
//! 2. Check whether the destination exists (fatal on any check error)
//! 3. Classify; stop on `skipped` or `dry_run`
//! 4. Plan clones locally
//! 5. Take the remote lock, create the destination, transfer, clone
//! 6. Release the lock and aggregate
//!
//! Pre-flight problems (bad slug, unreadable pattern file) are returned as
//! `Err` before the remote is contacted. Failures after that point land in
//! `SyncResult::error` so the caller still sees whatever was accomplished.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::domain::entities::{RepoClonePlan, Server, Workspace};
use crate::domain::ports::{GitInspector, RemoteShell, TransferRequest, Transport};
use crate::domain::value_objects::{ExcludeList, RemotePath, Slug};
use crate::error::{HoistError, HoistResult};

use super::batch::{BatchEntry, BatchTarget};
use super::excludes::resolve_excludes;
use super::options::SyncOptions;
use super::orchestrator::materialize_repos;
use super::planner::{plan_clones, ClonePlanning};
use super::preview::count_transferable;
use super::result::{ActionTaken, ResultAggregator, SyncResult};

/// Inputs for syncing one workspace.
#[derive(Debug, Clone, Copy)]
pub struct SyncRequest<'a> {
    pub workspace_dir: &'a Path,
    pub workspace: &'a Workspace,
    pub server: &'a Server,
    pub options: &'a SyncOptions,
}

/// Sync use case, parameterized by its ports.
pub struct SyncUseCase<RS, T, G>
where
    RS: RemoteShell,
    T: Transport,
    G: GitInspector,
{
    shell: RS,
    transport: T,
    git: G,
}

impl<RS, T, G> SyncUseCase<RS, T, G>
where
    RS: RemoteShell,
    T: Transport,
    G: GitInspector,
{
    pub fn new(shell: RS, transport: T, git: G) -> Self {
        Self {
            shell,
            transport,
            git,
        }
    }

    pub fn shell(&self) -> &RS {
        &self.shell
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run the pipeline for one workspace.
    pub fn execute(&self, request: &SyncRequest<'_>) -> HoistResult<SyncResult> {
        let mut agg = ResultAggregator::start();
        let options = request
            .options
            .clone()
            .with_workspace_preferences(&request.workspace.sync);

        let slug = Slug::new(&request.workspace.slug)?;
        let excludes = resolve_excludes(&options)?;
        agg.excludes(excludes.clone());

        let destination = request.server.destination(&slug);
        info!(host = self.shell.host(), %destination, "checking remote workspace");

        let exists = match self.shell.exists(&destination) {
            Ok(exists) => exists,
            Err(e) => {
                agg.fail(&e);
                return Ok(agg.finish());
            }
        };

        match agg.existence(exists, options.force, options.dry_run) {
            ActionTaken::Skipped => {
                info!(%destination, "remote workspace exists, skipping");
                return Ok(agg.finish());
            }
            ActionTaken::DryRun => {
                self.preview(&mut agg, request.workspace_dir, &excludes);
                return Ok(agg.finish());
            }
            ActionTaken::ForcedSync => info!(%destination, "remote workspace exists, forcing sync"),
            ActionTaken::Synced => {}
        }

        // Planning skips are reported whatever happens to the remote stages,
        // after any clone-stage results.
        let ClonePlanning { plans, skipped } =
            plan_clones(request.workspace_dir, &request.workspace.repos, &self.git);

        let lock = if options.remote_lock {
            match self.lock(request.server, &slug, &destination) {
                Ok(lock) => Some(lock),
                Err(e) => {
                    agg.repos(skipped);
                    agg.fail(&e);
                    return Ok(agg.finish());
                }
            }
        } else {
            None
        };

        let mutated = self.mutate(&mut agg, request, &destination, &excludes, &plans);
        agg.repos(skipped);
        if let Err(e) = mutated {
            agg.fail(&e);
        }

        if let Some(lock) = lock {
            if let Err(e) = self.shell.unlock(&lock) {
                warn!(%lock, error = %e, "failed to release remote lock");
            }
        }

        let result = agg.finish();
        info!(
            action = ?result.action_taken,
            cloned = result.cloned_count(),
            skipped = result.skipped_count(),
            duration_ms = result.duration_ms,
            "sync finished"
        );
        Ok(result)
    }

    /// Run several workspaces against one server, one after another.
    pub fn execute_batch(
        &self,
        server: &Server,
        options: &SyncOptions,
        targets: Vec<BatchTarget>,
    ) -> Vec<BatchEntry> {
        targets
            .into_iter()
            .map(|target| {
                let slug = target.label();
                let outcome = target.workspace.and_then(|workspace| {
                    self.execute(&SyncRequest {
                        workspace_dir: &target.dir,
                        workspace: &workspace,
                        server,
                        options,
                    })
                });
                if let Err(e) = &outcome {
                    warn!(%slug, error = %e, "workspace sync failed");
                }
                BatchEntry { slug, outcome }
            })
            .collect()
    }

    fn preview(&self, agg: &mut ResultAggregator, root: &Path, excludes: &ExcludeList) {
        match count_transferable(root, excludes) {
            Ok(count) => {
                info!(files = count, "dry run, remote not modified");
                agg.planned_files(count);
            }
            Err(e) => warn!(error = %e, "could not preview transfer"),
        }
    }

    fn lock(&self, server: &Server, slug: &Slug, destination: &RemotePath) -> HoistResult<RemotePath> {
        let lock = server.lock_path(slug);
        debug!(%lock, "acquiring remote lock");
        if self.shell.try_lock(&lock)? {
            Ok(lock)
        } else {
            Err(HoistError::RemoteLocked {
                path: destination.to_string(),
                lock: lock.to_string(),
            })
        }
    }

    fn mutate(
        &self,
        agg: &mut ResultAggregator,
        request: &SyncRequest<'_>,
        destination: &RemotePath,
        excludes: &ExcludeList,
        plans: &[RepoClonePlan],
    ) -> HoistResult<()> {
        self.shell.create_dir(destination)?;

        info!(%destination, "transferring workspace tree");
        let used = self.transport.transfer(&TransferRequest {
            local_root: request.workspace_dir,
            host: &request.server.host,
            destination,
            excludes,
        })?;
        agg.transport(used);

        if !plans.is_empty() {
            info!(count = plans.len(), "materializing repositories");
        }
        let outcome = materialize_repos(&self.shell, destination, plans);
        agg.repos(outcome.results);

        match outcome.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
