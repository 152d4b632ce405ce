//! cli
//!
//! Command-line interface layer for Gitglance.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Delegate to command handlers
//! - Does NOT compute status itself
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! the [`crate::engine`] through the handlers in [`commands`]. All Git
//! access stays behind the engine and the repository cache.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::Result;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = commands::Context {
        cwd: cli.cwd.clone(),
    };

    commands::dispatch(cli.command, &ctx)
}
