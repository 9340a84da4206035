//! Sync command handler

use std::path::{Path, PathBuf};

use anyhow::Result;

use hoist::application::{BatchTarget, SyncRequest};
use hoist::error::HoistError;
use hoist::infrastructure::load_workspace;
use hoist::presentation::output::{self, OutputFormat};
use hoist::presentation::{base_sync_options, create_sync_use_case};

use super::{current_dir, load_config};
use crate::cli::ExcludeArgs;

pub fn cmd_sync(
    config_path: Option<&Path>,
    server: &str,
    workspaces: &[PathBuf],
    force: bool,
    dry_run: bool,
    excludes: &ExcludeArgs,
    json: bool,
) -> Result<u8> {
    let config = load_config(config_path)?;
    let server = config.resolve_server(server);
    let options = excludes
        .apply(base_sync_options(&config))
        .with_force(force)
        .with_dry_run(dry_run);
    let use_case = create_sync_use_case(&config, &server);
    let format = OutputFormat::from_json_flag(json);

    if workspaces.len() > 1 {
        let targets = workspaces
            .iter()
            .map(|dir| BatchTarget::new(dir, load_workspace(dir).map_err(HoistError::from)))
            .collect();
        let entries = use_case.execute_batch(&server, &options, targets);

        match format {
            OutputFormat::Json => println!("{}", output::render_batch_json(&entries)),
            OutputFormat::Text => println!("{}", output::render_batch_text(&entries)),
        }
        return Ok(output::exit_code(&entries));
    }

    let dir = match workspaces.first() {
        Some(dir) => dir.clone(),
        None => current_dir()?,
    };
    let workspace = load_workspace(&dir)?;
    let result = use_case.execute(&SyncRequest {
        workspace_dir: &dir,
        workspace: &workspace,
        server: &server,
        options: &options,
    })?;

    match format {
        OutputFormat::Json => println!("{}", output::render_json(&result)),
        OutputFormat::Text => println!("{}", output::render_text(&result)),
    }
    Ok(output::result_exit_code(&result))
}
