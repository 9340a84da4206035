//! Hoist CLI - materialize local workspaces on remote hosts
//!
//! Usage: hoist <COMMAND>
//!
//! Commands:
//!   sync      Copy workspaces to a server and clone their repositories
//!   excludes  Show the resolved exclude patterns
//!   servers   List configured servers

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    commands::setup_logging(cli.verbose);

    let config = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Sync {
            server,
            workspaces,
            force,
            dry_run,
            excludes,
        } => commands::sync::cmd_sync(
            config, server, workspaces, *force, *dry_run, excludes, cli.json,
        ),
        Commands::Excludes {
            workspace,
            excludes,
        } => commands::excludes::cmd_excludes(config, workspace.as_deref(), excludes, cli.json),
        Commands::Servers => commands::servers::cmd_servers(config, cli.json),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
