//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. All repository reads flow
//! through this interface. Direct parsing of `.git` internal files outside
//! this module is prohibited. No other module should import `git2`.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - Branch and upstream (ahead/behind) queries
//! - Working tree status classification and counting
//! - Per-path commit history resolution
//! - Submodule introspection
//!
//! # Invariants
//!
//! - Every operation here is read-only with respect to the repository;
//!   nothing mutates the working tree or index
//! - No other module calls git2 directly
//! - All operations return strong types ([`crate::core::types::Oid`])
//!
//! # Example
//!
//! ```ignore
//! use gitglance::git::Git;
//! use std::path::Path;
//!
//! let root = Git::discover_root(Path::new("./src"))?;
//! let git = Git::open(&root)?;
//!
//! let branch = git.current_branch()?;
//! let counts = git.status_counts(None)?;
//! ```

mod interface;

pub use interface::{
    CommitInfo, EntryStatus, Git, GitError, RepoInfo, StatusCounts, SubmoduleInfo,
};
