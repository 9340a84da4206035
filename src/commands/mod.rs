//! Command handlers
//!
//! Each handler returns the process exit code; `Err` means exit 1.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use hoist::config::Config;

pub mod excludes;
pub mod servers;
pub mod sync;

pub fn setup_logging(verbose: u8) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,ignore=warn,globset=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,ignore=warn,globset=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Load configuration for this invocation and print its warnings to stderr.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let cwd = current_dir()?;
    let (config, warnings) = Config::discover(explicit, &cwd).context("failed to load configuration")?;
    for warning in &warnings {
        eprintln!("Warning: {}", warning);
    }
    Ok(config)
}

pub(crate) fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().context("cannot determine current directory")
}
