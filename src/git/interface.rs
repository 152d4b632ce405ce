//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module provides the **single doorway** to all Git operations in
//! Gitglance. All Git interactions flow through this interface, which
//! provides structured results and normalizes errors into typed failure
//! categories.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: No repository marker found above a path
//! - [`GitError::NotOwned`]: libgit2 refused the repository because it is
//!   owned by a different user (`safe.directory` refusal)
//! - [`GitError::BareRepo`]: The repository has no working tree
//! - [`GitError::Open`]: Any other open failure, carrying the underlying
//!   message and raw libgit2 error code for diagnostics
//!
//! # Example
//!
//! ```ignore
//! use gitglance::git::Git;
//! use std::path::Path;
//!
//! let root = Git::discover_root(Path::new("."))?;
//! let git = Git::open(&root)?;
//! if let Some(commit) = git.last_commit_for_path("README.md", None)? {
//!     println!("last touched by {}", commit.oid.short(7));
//! }
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::{Oid, TypeError};

/// Errors from Git operations.
///
/// The categorization lets higher layers handle failures distinctly: the
/// resolver turns [`GitError::NotOwned`] into a remediation hint, while the
/// property engine treats per-path lookup failures as omissions.
#[derive(Debug, Error)]
pub enum GitError {
    /// No repository marker found walking up from the path.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// Repository refused because it is owned by a different user.
    ///
    /// libgit2 mirrors git's `safe.directory` ownership check; the caller
    /// can suggest `git config --global --add safe.directory <path>`.
    #[error("repository at {path} is not owned by the current user")]
    NotOwned {
        /// The repository root that was refused
        path: PathBuf,
    },

    /// Repository open failed for another reason.
    #[error("failed to open repository: {message} (code {code})")]
    Open {
        /// The underlying error message
        message: String,
        /// The raw libgit2 error code
        code: i32,
    },

    /// Requested ref does not exist (including unborn HEAD).
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// Object or path not found in repository.
    #[error("object not found: {what}")]
    ObjectNotFound {
        /// The OID or path that was not found
        what: String,
    },

    /// Invalid object id format.
    #[error("invalid object id: {oid}")]
    InvalidOid {
        /// The invalid OID string
        oid: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with richer context.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound => GitError::ObjectNotFound {
                what: context.to_string(),
            },
            git2::ErrorCode::InvalidSpec => GitError::InvalidOid {
                oid: context.to_string(),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound => GitError::ObjectNotFound {
                what: err.message().to_string(),
            },
            git2::ErrorCode::InvalidSpec => GitError::InvalidOid {
                oid: err.message().to_string(),
            },
            _ => GitError::Internal {
                message: err.message().to_string(),
            },
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidOid(msg) => GitError::InvalidOid { oid: msg },
        }
    }
}

/// Information about a Git repository.
#[derive(Debug, Clone)]
pub struct RepoInfo {
    /// Path to .git directory
    pub git_dir: PathBuf,
    /// Path to working directory
    pub work_dir: PathBuf,
}

/// Working tree change counts, split by index (staged) and worktree axes.
///
/// The unstaged `added` count includes untracked files, matching what a
/// status banner reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// Staged additions (new files in the index)
    pub staged_added: usize,
    /// Staged modifications (including renames and typechanges)
    pub staged_modified: usize,
    /// Staged deletions
    pub staged_deleted: usize,
    /// Unstaged additions (untracked files)
    pub added: usize,
    /// Unstaged modifications (including renames and typechanges)
    pub modified: usize,
    /// Unstaged deletions
    pub deleted: usize,
}

impl StatusCounts {
    /// Check if there are no changes at all.
    pub fn is_clean(&self) -> bool {
        *self == StatusCounts::default()
    }
}

/// Status flags for a single tracked or untracked path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryStatus {
    /// The index entry differs from HEAD (any staged change).
    pub staged: bool,
    /// The worktree differs from the index (modified/renamed/typechange).
    pub wt_modified: bool,
    /// The path is untracked.
    pub wt_new: bool,
    /// The path is deleted in the worktree.
    pub wt_deleted: bool,
}

impl EntryStatus {
    /// Check if the entry is unchanged on both axes.
    pub fn is_clean(&self) -> bool {
        *self == EntryStatus::default()
    }
}

/// Information about a commit.
#[derive(Debug, Clone)]
pub struct CommitInfo {
    /// The commit OID
    pub oid: Oid,
    /// First line of the commit message
    pub summary: String,
    /// Full commit message
    pub message: String,
    /// Author name
    pub author_name: String,
    /// Author email
    pub author_email: String,
    /// Author timestamp
    pub author_time: chrono::DateTime<chrono::Utc>,
}

impl CommitInfo {
    /// Build a CommitInfo from a git2 commit.
    fn from_commit(commit: &git2::Commit<'_>) -> Result<Self, GitError> {
        let author = commit.author();
        let author_time = chrono::DateTime::from_timestamp(commit.time().seconds(), 0)
            .unwrap_or(chrono::DateTime::UNIX_EPOCH);

        Ok(CommitInfo {
            oid: Oid::new(commit.id().to_string())?,
            summary: commit.summary().unwrap_or_default().to_string(),
            message: commit.message().unwrap_or_default().to_string(),
            author_name: author.name().unwrap_or_default().to_string(),
            author_email: author.email().unwrap_or_default().to_string(),
            author_time,
        })
    }
}

/// Gitlink state of a submodule as recorded across the three trees.
///
/// `head_id` is the commit pinned by the superproject's HEAD tree,
/// `index_id` the commit pinned by the superproject's index, and
/// `workdir_id` the commit actually checked out inside the submodule.
/// Any of them may be absent (freshly added, not yet committed, or not
/// initialized).
#[derive(Debug, Clone)]
pub struct SubmoduleInfo {
    /// Path of the submodule relative to the superproject root, with
    /// forward-slash separators.
    pub path: String,
    /// Gitlink in the superproject HEAD tree.
    pub head_id: Option<Oid>,
    /// Gitlink in the superproject index.
    pub index_id: Option<Oid>,
    /// Commit checked out in the submodule working tree.
    pub workdir_id: Option<Oid>,
}

/// The Git interface.
///
/// This is the **single point of interaction** with Git. All repository
/// reads flow through this interface. No other module should import `git2`
/// directly.
///
/// A `Git` value is `Send` but not `Sync` (libgit2 repositories are not);
/// shared access is serialized behind the per-handle lock owned by
/// [`crate::repo::cache::RepoCache`].
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Discovery and Opening
    // =========================================================================

    /// Walk upward from `path` to find the enclosing repository root.
    ///
    /// A directory is a root when it contains a `.git` entry. A `.git`
    /// *file* whose gitdir points into a parent's `modules/` store marks a
    /// submodule working tree; discovery skips it and keeps walking so the
    /// superproject wins, letting status queries classify the submodule
    /// boundary themselves.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no marker is found up to the filesystem root
    pub fn discover_root(path: &Path) -> Result<PathBuf, GitError> {
        let start = if path.is_dir() {
            Some(path)
        } else {
            path.parent()
        };

        let mut current = start;
        while let Some(dir) = current {
            let marker = dir.join(".git");
            if marker.exists() {
                if marker.is_file() && is_submodule_gitfile(&marker) {
                    current = dir.parent();
                    continue;
                }
                return Ok(dir.to_path_buf());
            }
            current = dir.parent();
        }

        Err(GitError::NotARepo {
            path: path.to_path_buf(),
        })
    }

    /// Open the repository at an exact root path.
    ///
    /// Opening performs filesystem and object-database I/O and can be slow
    /// for large repositories; callers should go through the repository
    /// cache rather than opening directly.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if `root` is not a repository
    /// - [`GitError::NotOwned`] if libgit2 refuses due to file ownership
    /// - [`GitError::BareRepo`] if the repository has no working directory
    /// - [`GitError::Open`] for any other failure, with message and code
    pub fn open(root: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::open(root).map_err(|e| match e.code() {
            git2::ErrorCode::NotFound => GitError::NotARepo {
                path: root.to_path_buf(),
            },
            git2::ErrorCode::Owner => GitError::NotOwned {
                path: root.to_path_buf(),
            },
            _ => GitError::Open {
                message: e.message().to_string(),
                code: e.raw_code() as i32,
            },
        })?;

        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        Ok(Self { repo })
    }

    /// Get repository information (git_dir and work_dir paths).
    pub fn info(&self) -> Result<RepoInfo, GitError> {
        let git_dir = self.repo.path().to_path_buf();
        let work_dir = self.repo.workdir().ok_or(GitError::BareRepo)?.to_path_buf();

        Ok(RepoInfo { git_dir, work_dir })
    }

    /// Get the working directory path.
    pub fn work_dir(&self) -> Result<PathBuf, GitError> {
        Ok(self.info()?.work_dir)
    }

    // =========================================================================
    // Branch and Upstream
    // =========================================================================

    /// Get the current branch shorthand, if HEAD is on a branch.
    ///
    /// Returns the symbolic target for an unborn branch (fresh repository
    /// with no commits), and `None` for a detached HEAD.
    pub fn current_branch(&self) -> Result<Option<String>, GitError> {
        let head = match self.repo.head() {
            Ok(h) => h,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => {
                // HEAD points at a branch that has no commits yet; surface
                // the branch name from the symbolic ref.
                let head_ref = self
                    .repo
                    .find_reference("HEAD")
                    .map_err(|e| GitError::from_git2(e, "HEAD"))?;
                let name = head_ref
                    .symbolic_target()
                    .and_then(|t| t.strip_prefix("refs/heads/"))
                    .map(|s| s.to_string());
                return Ok(name);
            }
            Err(e) => return Err(e.into()),
        };

        if head.is_branch() {
            if let Some(name) = head.shorthand() {
                return Ok(Some(name.to_string()));
            }
        }

        Ok(None) // Detached HEAD
    }

    /// Get HEAD commit OID.
    ///
    /// # Errors
    ///
    /// - [`GitError::RefNotFound`] if HEAD is unborn (new repository)
    pub fn head_oid(&self) -> Result<Oid, GitError> {
        let head = self.repo.head().map_err(|e| match e.code() {
            git2::ErrorCode::UnbornBranch => GitError::RefNotFound {
                refname: "HEAD".to_string(),
            },
            _ => GitError::from_git2(e, "HEAD"),
        })?;

        let oid = head
            .peel_to_commit()
            .map_err(|e| GitError::from_git2(e, "HEAD"))?
            .id();

        Oid::new(oid.to_string()).map_err(|e| e.into())
    }

    /// Get (ahead, behind) counts of the current branch relative to its
    /// upstream, or `None` when there is no upstream (or no branch).
    pub fn ahead_behind(&self) -> Result<Option<(usize, usize)>, GitError> {
        let branch_name = match self.current_branch()? {
            Some(name) => name,
            None => return Ok(None),
        };

        let branch = match self
            .repo
            .find_branch(&branch_name, git2::BranchType::Local)
        {
            Ok(b) => b,
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let upstream = match branch.upstream() {
            Ok(u) => u,
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let local = match branch.get().target() {
            Some(oid) => oid,
            None => return Ok(None),
        };
        let remote = match upstream.get().target() {
            Some(oid) => oid,
            None => return Ok(None),
        };

        let (ahead, behind) = self
            .repo
            .graph_ahead_behind(local, remote)
            .map_err(|e| GitError::from_git2(e, "ahead/behind"))?;

        Ok(Some((ahead, behind)))
    }

    // =========================================================================
    // Working Tree Status
    // =========================================================================

    /// Count working tree changes, optionally restricted to paths under a
    /// repository-relative directory prefix (forward-slash separators).
    ///
    /// Untracked files are counted as unstaged additions. Ignored files are
    /// never counted.
    pub fn status_counts(&self, prefix: Option<&str>) -> Result<StatusCounts, GitError> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .map_err(|e| GitError::Internal {
                message: e.message().to_string(),
            })?;

        let mut counts = StatusCounts::default();

        for entry in statuses.iter() {
            if let Some(prefix) = prefix {
                let under = entry.path().is_some_and(|p| {
                    p == prefix || p.starts_with(&format!("{}/", prefix))
                });
                if !under {
                    continue;
                }
            }

            let status = entry.status();

            if status.is_index_new() {
                counts.staged_added += 1;
            }
            if status.is_index_modified()
                || status.is_index_renamed()
                || status.is_index_typechange()
            {
                counts.staged_modified += 1;
            }
            if status.is_index_deleted() {
                counts.staged_deleted += 1;
            }

            if status.is_wt_new() {
                counts.added += 1;
            }
            if status.is_wt_modified() || status.is_wt_renamed() || status.is_wt_typechange() {
                counts.modified += 1;
            }
            if status.is_wt_deleted() {
                counts.deleted += 1;
            }
        }

        Ok(counts)
    }

    /// Get the status flags for a single repository-relative path.
    pub fn entry_status(&self, rel: &str) -> Result<EntryStatus, GitError> {
        let status = self
            .repo
            .status_file(Path::new(rel))
            .map_err(|e| GitError::from_git2(e, rel))?;

        Ok(EntryStatus {
            staged: status.is_index_new()
                || status.is_index_modified()
                || status.is_index_deleted()
                || status.is_index_renamed()
                || status.is_index_typechange(),
            wt_modified: status.is_wt_modified()
                || status.is_wt_renamed()
                || status.is_wt_typechange(),
            wt_new: status.is_wt_new(),
            wt_deleted: status.is_wt_deleted(),
        })
    }

    /// Check whether any change exists anywhere in the working tree or
    /// index, untracked files included.
    pub fn is_dirty(&self) -> Result<bool, GitError> {
        Ok(!self.status_counts(None)?.is_clean())
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Find the most recent commit that touched `rel`, walking from `start`
    /// (or HEAD when `start` is `None`).
    ///
    /// A commit touches the path when the blob recorded at that path
    /// differs from every parent (creation and deletion included). The
    /// empty path resolves to the start commit itself. Returns `None` when
    /// the path has never been committed or HEAD is unborn.
    ///
    /// This walks commit history and can be slow on very large
    /// repositories; callers issue it per-path on demand.
    pub fn last_commit_for_path(
        &self,
        rel: &str,
        start: Option<&Oid>,
    ) -> Result<Option<CommitInfo>, GitError> {
        let start_oid = match start {
            Some(oid) => git2::Oid::from_str(oid.as_str())
                .map_err(|e| GitError::from_git2(e, oid.as_str()))?,
            None => match self.head_oid() {
                Ok(oid) => git2::Oid::from_str(oid.as_str())
                    .map_err(|e| GitError::from_git2(e, oid.as_str()))?,
                Err(GitError::RefNotFound { .. }) => return Ok(None),
                Err(e) => return Err(e),
            },
        };

        if rel.is_empty() {
            let commit = self
                .repo
                .find_commit(start_oid)
                .map_err(|e| GitError::from_git2(e, "start commit"))?;
            return Ok(Some(CommitInfo::from_commit(&commit)?));
        }

        let path = Path::new(rel);
        let mut walk = self.repo.revwalk().map_err(|e| GitError::Internal {
            message: e.message().to_string(),
        })?;
        walk.push(start_oid)
            .map_err(|e| GitError::from_git2(e, "revwalk start"))?;
        walk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)
            .map_err(|e| GitError::Internal {
                message: e.message().to_string(),
            })?;

        for oid in walk {
            let oid = oid.map_err(|e| GitError::Internal {
                message: e.message().to_string(),
            })?;
            let commit = self
                .repo
                .find_commit(oid)
                .map_err(|e| GitError::from_git2(e, "walked commit"))?;

            let entry = blob_at(&commit, path)?;

            let touched = if commit.parent_count() == 0 {
                entry.is_some()
            } else {
                // Touched iff the entry differs from every parent; a merge
                // that carried one side through unchanged does not count.
                let mut differs_from_all = true;
                for parent in commit.parents() {
                    if blob_at(&parent, path)? == entry {
                        differs_from_all = false;
                        break;
                    }
                }
                differs_from_all
            };

            if touched {
                return Ok(Some(CommitInfo::from_commit(&commit)?));
            }
        }

        Ok(None)
    }

    // =========================================================================
    // Submodules
    // =========================================================================

    /// List the repository's submodules with their gitlink state.
    pub fn submodules(&self) -> Result<Vec<SubmoduleInfo>, GitError> {
        let submodules = self.repo.submodules().map_err(|e| GitError::Internal {
            message: e.message().to_string(),
        })?;

        let mut infos = Vec::with_capacity(submodules.len());
        for sub in &submodules {
            let path = sub.path().to_string_lossy().replace('\\', "/");
            infos.push(SubmoduleInfo {
                path,
                head_id: oid_opt(sub.head_id())?,
                index_id: oid_opt(sub.index_id())?,
                workdir_id: oid_opt(sub.workdir_id())?,
            });
        }

        Ok(infos)
    }

    /// Open a submodule's own repository.
    ///
    /// # Errors
    ///
    /// - [`GitError::ObjectNotFound`] if no submodule exists at `path`
    pub fn open_submodule(&self, path: &str) -> Result<Git, GitError> {
        let sub = self
            .repo
            .find_submodule(path)
            .map_err(|e| GitError::from_git2(e, path))?;

        let repo = sub.open().map_err(|e| GitError::from_git2(e, path))?;
        Ok(Git { repo })
    }
}

/// Convert an optional git2 OID into a validated `Oid`.
fn oid_opt(oid: Option<git2::Oid>) -> Result<Option<Oid>, GitError> {
    match oid {
        Some(oid) => Ok(Some(Oid::new(oid.to_string())?)),
        None => Ok(None),
    }
}

/// Get the blob (or gitlink) id recorded at `path` in a commit's tree,
/// or `None` when the path is absent from that tree.
fn blob_at(commit: &git2::Commit<'_>, path: &Path) -> Result<Option<git2::Oid>, GitError> {
    let tree = commit.tree().map_err(|e| GitError::Internal {
        message: e.message().to_string(),
    })?;

    match tree.get_path(path) {
        Ok(entry) => Ok(Some(entry.id())),
        Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
        Err(e) => Err(GitError::Internal {
            message: e.message().to_string(),
        }),
    }
}

/// Check whether a `.git` file marks a submodule working tree.
///
/// Submodules carry a gitfile pointing into the superproject's
/// `.git/modules/` store; linked worktrees point elsewhere.
fn is_submodule_gitfile(gitfile: &Path) -> bool {
    match std::fs::read_to_string(gitfile) {
        Ok(content) => content.contains("gitdir:") && content.contains("/modules/"),
        Err(_) => false,
    }
}
