//! Remote access
//!
//! ssh-backed implementations of the `RemoteShell` and `Transport` ports.
//! rsync is the preferred transport, a tar stream over ssh the fallback.

mod rsync;
mod ssh;
mod tar;
mod transfer;

pub use rsync::RsyncTransport;
pub use ssh::{SshOptions, SshShell};
pub use tar::TarPipeTransport;
pub use transfer::FallbackTransport;

/// The transport stack used for real syncs.
pub type DefaultTransport = FallbackTransport<RsyncTransport, TarPipeTransport>;
