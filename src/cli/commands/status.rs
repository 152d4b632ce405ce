//! `status` command: print the repository summary line.

use std::path::Path;

use anyhow::{anyhow, Result};

use crate::cli::commands::Context;
use crate::engine::{PropertyEngine, PROP_CURRENT_FOLDER_STATUS};

pub fn run(ctx: &Context, path: &Path) -> Result<()> {
    let abs = ctx.resolve_path(path)?;

    let engine = PropertyEngine::for_path(&abs).map_err(|e| anyhow!(e.user_message()))?;
    let result = engine.get_properties(&[PROP_CURRENT_FOLDER_STATUS.to_string()], "");

    match result.get(PROP_CURRENT_FOLDER_STATUS) {
        Some(summary) => println!("{}", summary),
        None => return Err(anyhow!("could not compute repository status")),
    }
    Ok(())
}
