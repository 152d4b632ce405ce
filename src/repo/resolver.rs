//! repo::resolver
//!
//! Filesystem-path → repository resolution.
//!
//! Given any path, the resolver finds the enclosing repository root
//! (translating WSL UNC paths first), obtains the shared handle from the
//! [`crate::repo::cache`], and surfaces failures as structured values the
//! UI layer can render:
//!
//! - [`ResolveError::NotFound`]: no repository marker up to the filesystem
//!   root — "repository not found"
//! - [`ResolveError::NotOwned`]: git refused due to differing file
//!   ownership — rendered distinctly so the caller can suggest the
//!   `safe.directory` remediation
//! - [`ResolveError::OpenFailed`]: anything else, with the underlying
//!   message and numeric code for diagnostics
//!
//! Resolution never opens a repository directly; all handles come from the
//! cache, preserving the at-most-one-handle-per-root invariant.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::git::{Git, GitError};
use crate::repo::cache::{RepoCache, RepositoryHandle};
use crate::wsl;

/// Errors from repository resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No repository marker found walking up from the path.
    #[error("no git repository found for {path}")]
    NotFound {
        /// The path that was searched
        path: PathBuf,
    },

    /// The repository is owned by a different user.
    #[error("repository at {path} is not owned by the current user")]
    NotOwned {
        /// The refused repository root
        path: PathBuf,
    },

    /// The repository could not be opened for another reason.
    #[error("failed to open repository: {message} (code {code})")]
    OpenFailed {
        /// The underlying error message
        message: String,
        /// The numeric error code from the Git capability
        code: i32,
    },
}

impl ResolveError {
    /// A user-facing message, including remediation where one exists.
    pub fn user_message(&self) -> String {
        match self {
            ResolveError::NotFound { path } => {
                format!("{} is not inside a Git repository", path.display())
            }
            ResolveError::NotOwned { path } => format!(
                "the repository at {} is not owned by the current user; \
                 run `git config --global --add safe.directory {}` to trust it",
                path.display(),
                path.display()
            ),
            ResolveError::OpenFailed { message, code } => {
                format!("failed to open repository: {} (code {})", message, code)
            }
        }
    }
}

impl From<GitError> for ResolveError {
    fn from(err: GitError) -> Self {
        match err {
            GitError::NotARepo { path } => ResolveError::NotFound { path },
            GitError::NotOwned { path } => ResolveError::NotOwned { path },
            GitError::Open { message, code } => ResolveError::OpenFailed { message, code },
            GitError::BareRepo => ResolveError::OpenFailed {
                message: "bare repository not supported".to_string(),
                code: 0,
            },
            other => ResolveError::OpenFailed {
                message: other.to_string(),
                code: 0,
            },
        }
    }
}

/// Resolve the repository enclosing `path`, using the process-wide cache.
///
/// WSL UNC paths (`\\wsl$\...`, `\\wsl.localhost\...`) are rewritten to
/// their canonical working-directory form before discovery; callers that
/// shell out to a WSL-hosted git use [`crate::wsl::argument_prefix`] to
/// route the invocation.
pub fn get_repository(path: &Path) -> Result<RepositoryHandle, ResolveError> {
    get_repository_in(RepoCache::global(), path)
}

/// Resolve against a specific cache (exposed for tests).
pub fn get_repository_in(
    cache: &RepoCache,
    path: &Path,
) -> Result<RepositoryHandle, ResolveError> {
    let search_path = translate_wsl(path);

    let root = Git::discover_root(&search_path)?;
    let handle = cache.get_or_open(&root)?;
    Ok(handle)
}

/// Rewrite a WSL UNC path to its canonical form; other paths pass through.
fn translate_wsl(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    if wsl::is_wsl_path(&text) {
        if let Ok(unc) = wsl::working_directory(&text) {
            return PathBuf::from(unc);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_wsl_path_passes_through() {
        let p = Path::new("/home/me/repo");
        assert_eq!(translate_wsl(p), PathBuf::from("/home/me/repo"));
    }

    #[test]
    fn wsl_path_is_canonicalized() {
        let p = Path::new(r"\\wsl.localhost\Ubuntu\home\me\repo");
        assert_eq!(
            translate_wsl(p),
            PathBuf::from(r"\\wsl$\Ubuntu\home\me\repo")
        );
    }

    #[test]
    fn not_owned_message_suggests_remediation() {
        let err = ResolveError::NotOwned {
            path: PathBuf::from("/srv/repo"),
        };
        assert!(err.user_message().contains("safe.directory"));
    }
}
