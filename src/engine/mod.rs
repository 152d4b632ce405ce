//! engine
//!
//! Status/property computation.
//!
//! The [`PropertyEngine`] answers the property-query interface: an ordered
//! set of property identifiers plus one repository-relative path in, a
//! name → value mapping out. Identifiers outside the recognized set are
//! silently omitted; per-property internal failures are omissions too,
//! never errors. Every query is read-only.
//!
//! # Recognized identifiers
//!
//! Identifiers follow the Windows property-system names the file-explorer
//! consumer binds to:
//!
//! - `System.VersionControl.CurrentFolderStatus` - repository summary,
//!   e.g. `Branch: main | +1 ~1 -0 | +0 ~7 -0` (staged add/modify/delete,
//!   then unstaged; unstaged `+` counts untracked files)
//! - `System.VersionControl.Status` - per-item label: empty (clean),
//!   `Staged`, `Staged, Modified`, `Modified`, `Untracked`, or a submodule
//!   label from [`submodule::SubmoduleState`]
//! - `System.VersionControl.LastChangeID` - hex SHA of the last commit
//!   touching the path, empty when never committed
//! - `System.VersionControl.LastChangeAuthorName` / `...LastChangeDate` /
//!   `...LastChangeMessage` - from the same commit, omitted when none

pub mod submodule;

use std::collections::BTreeMap;
use std::path::Path;

use crate::git::{CommitInfo, Git, GitError, StatusCounts};
use crate::repo::{self, RepositoryHandle, ResolveError};

/// Repository summary for the current folder.
pub const PROP_CURRENT_FOLDER_STATUS: &str = "System.VersionControl.CurrentFolderStatus";
/// Per-item status label.
pub const PROP_STATUS: &str = "System.VersionControl.Status";
/// Hex SHA of the last commit touching the item.
pub const PROP_LAST_CHANGE_ID: &str = "System.VersionControl.LastChangeID";
/// Author name of the last commit touching the item.
pub const PROP_LAST_CHANGE_AUTHOR: &str = "System.VersionControl.LastChangeAuthorName";
/// RFC3339 author date of the last commit touching the item.
pub const PROP_LAST_CHANGE_DATE: &str = "System.VersionControl.LastChangeDate";
/// Subject line of the last commit touching the item.
pub const PROP_LAST_CHANGE_MESSAGE: &str = "System.VersionControl.LastChangeMessage";

/// All recognized property identifiers, in presentation order.
pub const RECOGNIZED_PROPERTIES: [&str; 6] = [
    PROP_CURRENT_FOLDER_STATUS,
    PROP_STATUS,
    PROP_LAST_CHANGE_ID,
    PROP_LAST_CHANGE_AUTHOR,
    PROP_LAST_CHANGE_DATE,
    PROP_LAST_CHANGE_MESSAGE,
];

/// Per-path property computation against one repository handle.
pub struct PropertyEngine {
    handle: RepositoryHandle,
}

impl PropertyEngine {
    /// Wrap an already-resolved repository handle.
    pub fn new(handle: RepositoryHandle) -> Self {
        Self { handle }
    }

    /// Resolve the repository enclosing `path` and build an engine for it.
    pub fn for_path(path: &Path) -> Result<Self, ResolveError> {
        Ok(Self::new(repo::get_repository(path)?))
    }

    /// Answer a property query.
    ///
    /// `names` is the ordered set of requested identifiers; `path` is
    /// repository-relative (either separator accepted), empty meaning the
    /// repository root. Unresolvable identifiers are absent from the
    /// result; `Status` and `LastChangeID` are defined as
    /// empty-string-valued for clean/never-committed paths and so always
    /// appear when requested and computable.
    pub fn get_properties(&self, names: &[String], path: &str) -> BTreeMap<String, String> {
        let rel = normalize_rel(path);
        let git = self.lock();

        let mut result = BTreeMap::new();
        // Resolved once per query, shared by the LastChange* family.
        let mut last_commit: Option<Option<CommitInfo>> = None;

        for name in names {
            match name.as_str() {
                PROP_CURRENT_FOLDER_STATUS => {
                    if let Ok(summary) = folder_status(&git) {
                        result.insert(name.clone(), summary);
                    }
                }
                PROP_STATUS => {
                    if let Ok(label) = item_status(&git, &rel) {
                        result.insert(name.clone(), label);
                    }
                }
                PROP_LAST_CHANGE_ID => {
                    if let Some(commit) = resolve_once(&git, &rel, &mut last_commit) {
                        let value = commit
                            .as_ref()
                            .map(|c| c.oid.to_string())
                            .unwrap_or_default();
                        result.insert(name.clone(), value);
                    }
                }
                PROP_LAST_CHANGE_AUTHOR => {
                    if let Some(Some(commit)) = resolve_once(&git, &rel, &mut last_commit) {
                        result.insert(name.clone(), commit.author_name.clone());
                    }
                }
                PROP_LAST_CHANGE_DATE => {
                    if let Some(Some(commit)) = resolve_once(&git, &rel, &mut last_commit) {
                        result.insert(name.clone(), commit.author_time.to_rfc3339());
                    }
                }
                PROP_LAST_CHANGE_MESSAGE => {
                    if let Some(Some(commit)) = resolve_once(&git, &rel, &mut last_commit) {
                        result.insert(name.clone(), commit.summary.clone());
                    }
                }
                _ => {} // unrecognized identifiers are omitted, not errors
            }
        }

        result
    }

    /// Lock the handle, recovering from poisoning (queries are read-only,
    /// so a panicked peer leaves nothing inconsistent behind).
    fn lock(&self) -> std::sync::MutexGuard<'_, Git> {
        match self.handle.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Memoized last-commit resolution; `None` means the lookup itself failed
/// and the property family should be omitted.
fn resolve_once<'a>(
    git: &Git,
    rel: &str,
    cache: &'a mut Option<Option<CommitInfo>>,
) -> Option<&'a Option<CommitInfo>> {
    if cache.is_none() {
        match last_commit_for(git, rel) {
            Ok(commit) => *cache = Some(commit),
            Err(_) => return None,
        }
    }
    cache.as_ref()
}

/// Normalize an incoming repository-relative path: forward slashes,
/// no leading or trailing separators.
fn normalize_rel(path: &str) -> String {
    path.replace('\\', "/").trim_matches('/').to_string()
}

/// Compute the repository summary line.
fn folder_status(git: &Git) -> Result<String, GitError> {
    let head = head_segment(git)?;
    let counts = git.status_counts(None)?;
    Ok(format!("{} | {}", head, format_counts(&counts)))
}

/// The branch segment of the summary: branch name with ahead/behind
/// markers when an upstream has diverged, or the detached-HEAD form.
fn head_segment(git: &Git) -> Result<String, GitError> {
    if let Some(branch) = git.current_branch()? {
        let mut segment = format!("Branch: {}", branch);
        if let Some((ahead, behind)) = git.ahead_behind()? {
            if ahead > 0 || behind > 0 {
                segment.push_str(&format!(" \u{2191}{} \u{2193}{}", ahead, behind));
            }
        }
        return Ok(segment);
    }

    match git.head_oid() {
        Ok(oid) => Ok(format!("Detached: {}", oid.short(7))),
        Err(GitError::RefNotFound { .. }) => Ok("Branch: (none)".to_string()),
        Err(e) => Err(e),
    }
}

/// Render counts as `+A ~M -D | +A ~M -D` (staged, then unstaged).
fn format_counts(counts: &StatusCounts) -> String {
    format!(
        "+{} ~{} -{} | +{} ~{} -{}",
        counts.staged_added,
        counts.staged_modified,
        counts.staged_deleted,
        counts.added,
        counts.modified,
        counts.deleted
    )
}

/// Compute the per-item status label.
///
/// Submodule boundaries take precedence; directories aggregate the counts
/// beneath them; files map their status flags onto the label set.
fn item_status(git: &Git, rel: &str) -> Result<String, GitError> {
    if rel.is_empty() {
        return Ok(String::new());
    }

    if let Some(ctx) = submodule::find_enclosing(git, rel)? {
        return Ok(submodule::classify(&ctx).label().to_string());
    }

    let abs = git.work_dir()?.join(rel);
    if abs.is_dir() {
        let counts = git.status_counts(Some(rel))?;
        if counts.is_clean() {
            return Ok(String::new());
        }
        return Ok(format_counts(&counts));
    }

    let status = git.entry_status(rel)?;
    Ok(file_label(&status).to_string())
}

/// Map file status flags onto the closed label set.
fn file_label(status: &crate::git::EntryStatus) -> &'static str {
    if status.staged && status.wt_modified {
        "Staged, Modified"
    } else if status.staged {
        "Staged"
    } else if status.wt_modified {
        "Modified"
    } else if status.wt_new {
        "Untracked"
    } else {
        ""
    }
}

/// Resolve the last commit touching `rel`.
///
/// Paths inside a submodule resolve against the submodule's own history,
/// starting at its pinned commit; a path never committed there yields
/// `None` (no fallback to superproject history).
fn last_commit_for(git: &Git, rel: &str) -> Result<Option<CommitInfo>, GitError> {
    if let Some(ctx) = submodule::find_enclosing(git, rel)? {
        let sub_rel = rel
            .strip_prefix(&ctx.path)
            .map(|s| s.trim_start_matches('/'))
            .unwrap_or("");
        let sub = git.open_submodule(&ctx.path)?;
        return sub.last_commit_for_path(sub_rel, ctx.bound_commit.as_ref());
    }

    git.last_commit_for_path(rel, None)
}
