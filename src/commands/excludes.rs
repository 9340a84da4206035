//! Excludes command handler
//!
//! Prints the exclude list a sync of the workspace would use, without
//! touching any remote.

use std::path::Path;

use anyhow::{Context, Result};

use hoist::application::resolve_excludes;
use hoist::infrastructure::load_workspace;
use hoist::presentation::base_sync_options;
use hoist::presentation::output::{self, OutputFormat};

use super::{current_dir, load_config};
use crate::cli::ExcludeArgs;

pub fn cmd_excludes(
    config_path: Option<&Path>,
    workspace: Option<&Path>,
    excludes: &ExcludeArgs,
    json: bool,
) -> Result<u8> {
    let config = load_config(config_path)?;
    let dir = match workspace {
        Some(dir) => dir.to_path_buf(),
        None => current_dir()?,
    };
    let workspace = load_workspace(&dir)?;

    let options = excludes
        .apply(base_sync_options(&config))
        .with_workspace_preferences(&workspace.sync);
    let list = resolve_excludes(&options).context("failed to resolve exclude patterns")?;

    match OutputFormat::from_json_flag(json) {
        OutputFormat::Json => println!("{}", output::render_excludes_json(&list)),
        OutputFormat::Text => println!("{}", output::render_excludes_text(&list)),
    }
    Ok(0)
}
