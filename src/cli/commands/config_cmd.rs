//! `config` command: get/set the persisted Git executable path.

use anyhow::Result;

use crate::cli::args::ConfigAction;
use crate::core::config::ConfigStore;

pub fn run(action: ConfigAction) -> Result<()> {
    let store = ConfigStore::open_default()?;

    match action {
        ConfigAction::Get => {
            println!("{}", store.git_exe_path());
        }
        ConfigAction::Set { exe } => {
            store.set_git_exe_path(Some(exe))?;
            println!("updated {}", store.path().display());
        }
        ConfigAction::Unset => {
            store.set_git_exe_path(None)?;
            println!("updated {}", store.path().display());
        }
    }
    Ok(())
}
