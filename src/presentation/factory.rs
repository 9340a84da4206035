//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use crate::application::{SyncOptions, SyncUseCase};
use crate::config::Config;
use crate::domain::entities::Server;
use crate::infrastructure::process::deadline;
use crate::infrastructure::{
    DefaultTransport, FallbackTransport, Git2Inspector, RsyncTransport, SshOptions, SshShell,
    TarPipeTransport,
};

/// Type alias for the concrete SyncUseCase with all dependencies
pub type ConcreteSyncUseCase = SyncUseCase<SshShell, DefaultTransport, Git2Inspector>;

/// ssh options from the `[ssh]` table
pub fn ssh_options(config: &Config) -> SshOptions {
    SshOptions {
        connect_timeout: config.ssh.connect_timeout,
        batch_mode: config.ssh.batch_mode,
    }
}

/// Create a sync use case targeting `server`
///
/// rsync is the primary transport, tar over ssh the fallback. Every remote
/// process gets the deadline configured for its stage.
pub fn create_sync_use_case(config: &Config, server: &Server) -> ConcreteSyncUseCase {
    let ssh = ssh_options(config);
    let timeouts = config.timeouts;

    let shell = SshShell::new(&server.host, ssh.clone())
        .with_timeouts(deadline(timeouts.check), deadline(timeouts.clone));
    let transport = FallbackTransport::new(
        RsyncTransport::new(ssh.clone(), deadline(timeouts.transfer)),
        TarPipeTransport::new(ssh, deadline(timeouts.transfer)),
    );

    SyncUseCase::new(shell, transport, Git2Inspector)
}

/// Base options from configuration; CLI flags are layered on top by the caller.
pub fn base_sync_options(config: &Config) -> SyncOptions {
    SyncOptions::new()
        .with_remote_lock(config.sync.remote_lock)
        .with_exclude_file(config.sync.exclude_file.clone())
}
