//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use clap_complete::Shell;

/// Gitglance - Git status properties for file-manager integrations
#[derive(Parser, Debug)]
#[command(name = "gitglance")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if gitglance was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Query Git properties for a path
    #[command(
        name = "props",
        long_about = "Query Git properties for a path.\n\n\
            Resolves the repository enclosing PATH and prints the requested \
            properties as a JSON object. Identifiers outside the recognized \
            set are omitted from the output rather than rejected.",
        after_help = "\
EXAMPLES:
    # All recognized properties for a file
    gitglance props src/lib.rs

    # Just the status label and last-change commit
    gitglance props src/lib.rs \\
        -p System.VersionControl.Status \\
        -p System.VersionControl.LastChangeID"
    )]
    Props {
        /// File or directory to query
        path: PathBuf,

        /// Property identifier to request (repeatable, ordered);
        /// defaults to the full recognized set
        #[arg(short = 'p', long = "property")]
        properties: Vec<String>,
    },

    /// Show the repository status summary line
    #[command(name = "status")]
    Status {
        /// Any path inside the repository
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Get or set persisted settings
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(name = "completion")]
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Settings subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective Git executable path
    Get,
    /// Set the Git executable path
    Set {
        /// Path to the Git executable
        exe: String,
    },
    /// Reset the Git executable path to the default
    Unset,
}
