//! Integration tests for submodule classification and history dispatch.
//!
//! Fixtures build a real superproject + submodule pair so the priority
//! chain (changed > dirty > staged > clean) is exercised against actual
//! gitlink states.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use gitglance::engine::{PropertyEngine, PROP_LAST_CHANGE_ID, PROP_STATUS};
use gitglance::repo::cache::RepoCache;
use gitglance::repo::resolver::get_repository_in;

/// Superproject with one submodule at `vendor/lib`.
struct Fixture {
    superproject: TempDir,
    // Held for the lifetime of the fixture; the submodule origin must
    // outlive clones taken from it.
    _library: TempDir,
}

impl Fixture {
    /// Build the pair; the submodule is added but not yet committed.
    fn staged() -> Self {
        let library = TempDir::new().unwrap();
        init_repo(library.path());
        std::fs::write(library.path().join("inner.txt"), "lib v1\n").unwrap();
        run_git(library.path(), &["add", "inner.txt"]);
        run_git(library.path(), &["commit", "-m", "library initial"]);

        let superproject = TempDir::new().unwrap();
        init_repo(superproject.path());
        std::fs::write(superproject.path().join("README.txt"), "super\n").unwrap();
        run_git(superproject.path(), &["add", "README.txt"]);
        run_git(superproject.path(), &["commit", "-m", "super initial"]);

        let lib_url = library.path().to_string_lossy().to_string();
        run_git(
            superproject.path(),
            &[
                "-c",
                "protocol.file.allow=always",
                "submodule",
                "add",
                &lib_url,
                "vendor/lib",
            ],
        );

        Self {
            superproject,
            _library: library,
        }
    }

    /// Build the pair with the submodule committed (clean baseline).
    fn committed() -> Self {
        let fixture = Self::staged();
        run_git(fixture.path(), &["commit", "-m", "add submodule"]);
        fixture
    }

    fn path(&self) -> &Path {
        self.superproject.path()
    }

    fn submodule_workdir(&self) -> PathBuf {
        self.path().join("vendor/lib")
    }

    /// Commit a new file inside the submodule working tree, moving its
    /// checked-out HEAD past the pinned commit.
    fn advance_submodule(&self) {
        let workdir = self.submodule_workdir();
        run_git(&workdir, &["config", "user.email", "test@example.com"]);
        run_git(&workdir, &["config", "user.name", "Test User"]);
        std::fs::write(workdir.join("extra.txt"), "extra\n").unwrap();
        run_git(&workdir, &["add", "extra.txt"]);
        run_git(&workdir, &["commit", "-m", "advance submodule"]);
    }

    fn engine(&self) -> PropertyEngine {
        let cache = RepoCache::new();
        let handle = get_repository_in(&cache, self.path()).unwrap();
        PropertyEngine::new(handle)
    }

    fn status_of(&self, rel: &str) -> String {
        let names = vec![PROP_STATUS.to_string()];
        self.engine()
            .get_properties(&names, rel)
            .remove(PROP_STATUS)
            .expect("status property should be present")
    }

    fn last_change_id_of(&self, rel: &str) -> String {
        let names = vec![PROP_LAST_CHANGE_ID.to_string()];
        self.engine()
            .get_properties(&names, rel)
            .remove(PROP_LAST_CHANGE_ID)
            .expect("last change id should be present")
    }
}

fn init_repo(dir: &Path) {
    run_git(dir, &["init", "-b", "main"]);
    run_git(dir, &["config", "user.email", "test@example.com"]);
    run_git(dir, &["config", "user.name", "Test User"]);
}

fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

fn git_stdout(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

// =============================================================================
// Classification
// =============================================================================

#[test]
fn committed_submodule_is_clean() {
    let fixture = Fixture::committed();
    assert_eq!(fixture.status_of("vendor/lib"), "");
}

#[test]
fn freshly_added_submodule_is_staged() {
    let fixture = Fixture::staged();
    assert_eq!(fixture.status_of("vendor/lib"), "Staged");
}

#[test]
fn advanced_checkout_reports_submodule_changed() {
    let fixture = Fixture::committed();
    fixture.advance_submodule();
    assert_eq!(fixture.status_of("vendor/lib"), "Submodule changed");
}

#[test]
fn changed_takes_priority_over_dirty() {
    let fixture = Fixture::committed();
    fixture.advance_submodule();
    // Also dirty: an uncommitted edit on top of the advanced HEAD.
    std::fs::write(fixture.submodule_workdir().join("inner.txt"), "edited\n").unwrap();

    assert_eq!(fixture.status_of("vendor/lib"), "Submodule changed");
}

#[test]
fn uncommitted_edit_reports_submodule_dirty() {
    let fixture = Fixture::committed();
    std::fs::write(fixture.submodule_workdir().join("inner.txt"), "edited\n").unwrap();

    assert_eq!(fixture.status_of("vendor/lib"), "Submodule dirty");
}

#[test]
fn untracked_file_reports_submodule_dirty() {
    let fixture = Fixture::committed();
    std::fs::write(fixture.submodule_workdir().join("scratch.txt"), "x\n").unwrap();

    assert_eq!(fixture.status_of("vendor/lib"), "Submodule dirty");
}

#[test]
fn paths_inside_the_submodule_share_its_classification() {
    let fixture = Fixture::committed();
    fixture.advance_submodule();

    assert_eq!(
        fixture.status_of("vendor/lib/inner.txt"),
        "Submodule changed"
    );
}

// =============================================================================
// History Dispatch
// =============================================================================

#[test]
fn last_change_id_resolves_in_submodule_history() {
    let fixture = Fixture::committed();
    let lib_head = git_stdout(&fixture.submodule_workdir(), &["rev-parse", "HEAD"]);

    // inner.txt was last touched by the library's own initial commit,
    // not by anything in the superproject's history.
    assert_eq!(fixture.last_change_id_of("vendor/lib/inner.txt"), lib_head);
}

#[test]
fn uncommitted_submodule_addition_has_empty_change_id() {
    let fixture = Fixture::committed();
    std::fs::write(fixture.submodule_workdir().join("scratch.txt"), "x\n").unwrap();

    assert_eq!(fixture.last_change_id_of("vendor/lib/scratch.txt"), "");
}

#[test]
fn submodule_path_itself_resolves_to_bound_commit() {
    let fixture = Fixture::committed();
    let bound = git_stdout(&fixture.submodule_workdir(), &["rev-parse", "HEAD"]);

    assert_eq!(fixture.last_change_id_of("vendor/lib"), bound);
}
