//! cli::commands
//!
//! Command handlers: one module per command, dispatched from [`dispatch`].

mod config_cmd;
mod props;
mod status;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::CommandFactory;

use crate::cli::args::{Cli, Command};

/// Execution context from global CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Base directory for relative path arguments (`--cwd`).
    pub cwd: Option<PathBuf>,
}

impl Context {
    /// Resolve a user-supplied path against `--cwd` / the process cwd.
    pub fn resolve_path(&self, path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }

        let base = match &self.cwd {
            Some(cwd) => cwd.clone(),
            None => std::env::current_dir()?,
        };
        Ok(base.join(path))
    }
}

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Props { path, properties } => props::run(ctx, &path, &properties),
        Command::Status { path } => status::run(ctx, &path),
        Command::Config { action } => config_cmd::run(action),
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "gitglance", &mut std::io::stdout());
            Ok(())
        }
    }
}
