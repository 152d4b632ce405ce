//! `props` command: query Git properties for a path and print them as JSON.

use std::path::Path;

use anyhow::{anyhow, Result};

use crate::cli::commands::Context;
use crate::engine::{PropertyEngine, RECOGNIZED_PROPERTIES};
use crate::repo;

pub fn run(ctx: &Context, path: &Path, properties: &[String]) -> Result<()> {
    let abs = ctx.resolve_path(path)?;

    let handle = repo::get_repository(&abs).map_err(|e| anyhow!(e.user_message()))?;

    // Convert the filesystem path to a repository-relative one.
    let work_dir = {
        let git = match handle.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        git.work_dir()?
    };
    let rel = relative_to(&abs, &work_dir);

    let names: Vec<String> = if properties.is_empty() {
        RECOGNIZED_PROPERTIES.iter().map(|s| s.to_string()).collect()
    } else {
        properties.to_vec()
    };

    let engine = PropertyEngine::new(handle);
    let result = engine.get_properties(&names, &rel);

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Express `abs` relative to the repository working directory, with
/// forward-slash separators; the root itself maps to the empty string.
fn relative_to(abs: &Path, work_dir: &Path) -> String {
    let abs = std::fs::canonicalize(abs).unwrap_or_else(|_| abs.to_path_buf());
    let work_dir = std::fs::canonicalize(work_dir).unwrap_or_else(|_| work_dir.to_path_buf());

    abs.strip_prefix(&work_dir)
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_default()
}
