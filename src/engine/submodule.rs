//! engine::submodule
//!
//! Submodule boundary detection and state classification.
//!
//! A path inside a submodule working tree is classified against the
//! superproject's view of the submodule, in strict priority order:
//!
//! 1. [`SubmoduleState::Changed`] - the commit pinned in the superproject
//!    index differs from the commit actually checked out inside the
//!    submodule (attached or detached)
//! 2. [`SubmoduleState::Dirty`] - the submodule working tree has
//!    uncommitted, untracked, or staged-but-uncommitted changes relative to
//!    its own HEAD
//! 3. [`SubmoduleState::Staged`] - the superproject index gitlink differs
//!    from HEAD (submodule freshly added and staged, or its pinned commit
//!    staged-changed)
//! 4. [`SubmoduleState::Clean`] - none of the above
//!
//! The chain is deliberately an ordered match over a tagged variant so the
//! priority order stays auditable and testable in isolation: a submodule
//! with a changed pinned commit AND a dirty tree reports `Changed`, never
//! `Dirty`.

use crate::core::types::Oid;
use crate::git::{Git, GitError};

/// Classified state of a submodule, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmoduleState {
    /// The pinned commit and the checked-out commit disagree.
    Changed,
    /// The submodule's own working tree has changes.
    Dirty,
    /// The superproject has staged a gitlink change.
    Staged,
    /// Nothing to report.
    Clean,
}

impl SubmoduleState {
    /// The status label shown to the consumer. Clean is the empty string.
    pub fn label(&self) -> &'static str {
        match self {
            SubmoduleState::Changed => "Submodule changed",
            SubmoduleState::Dirty => "Submodule dirty",
            SubmoduleState::Staged => "Staged",
            SubmoduleState::Clean => "",
        }
    }
}

/// A submodule boundary, as seen from the superproject.
#[derive(Debug, Clone)]
pub struct SubmoduleContext {
    /// Submodule path relative to the superproject root (forward slashes).
    pub path: String,
    /// Commit pinned in the superproject index (the gitlink).
    pub bound_commit: Option<Oid>,
    /// Commit pinned in the superproject HEAD tree.
    pub head_commit: Option<Oid>,
    /// Commit actually checked out inside the submodule.
    pub workdir_commit: Option<Oid>,
    /// Whether the submodule's own working tree has any changes.
    pub dirty: bool,
}

/// Classify a submodule context by the priority chain.
pub fn classify(ctx: &SubmoduleContext) -> SubmoduleState {
    let commit_changed = match (&ctx.bound_commit, &ctx.workdir_commit) {
        (Some(bound), Some(workdir)) => bound != workdir,
        _ => false,
    };

    if commit_changed {
        SubmoduleState::Changed
    } else if ctx.dirty {
        SubmoduleState::Dirty
    } else if ctx.bound_commit != ctx.head_commit {
        SubmoduleState::Staged
    } else {
        SubmoduleState::Clean
    }
}

/// Find the submodule whose working tree contains `rel`, if any.
///
/// `rel` is repository-relative with forward-slash separators; a path
/// equal to the submodule path itself counts as inside. Returns the
/// boundary context with dirtiness already computed (an unopenable,
/// e.g. uninitialized, submodule is treated as not dirty).
pub fn find_enclosing(git: &Git, rel: &str) -> Result<Option<SubmoduleContext>, GitError> {
    if rel.is_empty() {
        return Ok(None);
    }

    for info in git.submodules()? {
        let inside = rel == info.path || rel.starts_with(&format!("{}/", info.path));
        if !inside {
            continue;
        }

        let dirty = match git.open_submodule(&info.path) {
            Ok(sub) => sub.is_dirty().unwrap_or(false),
            Err(_) => false,
        };

        return Ok(Some(SubmoduleContext {
            path: info.path,
            bound_commit: info.index_id,
            head_commit: info.head_id,
            workdir_commit: info.workdir_id,
            dirty,
        }));
    }

    Ok(None)
}
