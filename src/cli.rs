use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use hoist::application::SyncOptions;

/// Hoist - materialize local workspaces on remote hosts
#[derive(Parser, Debug)]
#[command(name = "hoist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Machine-readable JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: ./.hoist.toml, then the user config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy workspaces to a server and clone their repositories there
    Sync {
        /// Configured server name, or `host[:root]`
        server: String,

        /// Workspace directories (default: current directory)
        #[arg(value_name = "WORKSPACE_DIR")]
        workspaces: Vec<PathBuf>,

        /// Sync even if the remote workspace already exists
        #[arg(short, long)]
        force: bool,

        /// Check the remote and preview the transfer without changing anything
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        excludes: ExcludeArgs,
    },

    /// Show the exclude patterns a sync would use
    Excludes {
        /// Workspace directory (default: current directory)
        #[arg(value_name = "WORKSPACE_DIR")]
        workspace: Option<PathBuf>,

        #[command(flatten)]
        excludes: ExcludeArgs,
    },

    /// List configured servers
    Servers,
}

/// Flags that shape the exclude list
#[derive(Args, Debug, Clone, Default)]
pub struct ExcludeArgs {
    /// Do not transfer `.git` directories
    #[arg(long)]
    pub no_git: bool,

    /// Transfer `.env` files
    #[arg(long)]
    pub include_env: bool,

    /// Extra exclude pattern (repeatable)
    #[arg(short = 'e', long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// File of exclude patterns, one per line
    #[arg(long, value_name = "PATH")]
    pub exclude_file: Option<PathBuf>,

    /// Use only --exclude/--exclude-file patterns; skip the built-in defaults
    #[arg(long)]
    pub only_excludes: bool,
}

impl ExcludeArgs {
    /// Layer these flags over options built from configuration.
    pub fn apply(&self, options: SyncOptions) -> SyncOptions {
        let exclude_file = self.exclude_file.clone().or(options.exclude_file.clone());
        options
            .with_no_git(self.no_git)
            .with_include_env(self.include_env)
            .with_excludes(self.exclude.clone())
            .with_exclude_file(exclude_file)
            .with_only_explicit_excludes(self.only_excludes)
    }
}
