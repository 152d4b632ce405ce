//! core::config::schema
//!
//! Configuration file schema.
//!
//! The settings file is a small JSON key/value document; unknown keys are
//! preserved-by-ignore so older binaries tolerate newer files.

use serde::{Deserialize, Serialize};

/// Default Git executable when none is configured.
pub const DEFAULT_GIT_EXE: &str = "git";

/// User-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Path to the Git executable used for shelled-out invocations
    /// (including WSL-routed ones). `None` means use `git` from PATH.
    pub git_exe_path: Option<String>,
}

impl Settings {
    /// The effective Git executable path.
    pub fn effective_git_exe(&self) -> &str {
        self.git_exe_path.as_deref().unwrap_or(DEFAULT_GIT_EXE)
    }
}
