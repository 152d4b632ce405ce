//! core::config
//!
//! JSON-backed settings persistence with external-change notifications.
//!
//! # Overview
//!
//! The store owns one JSON file (the configured Git executable path, see
//! [`schema::Settings`]). A filesystem watcher is an *external*
//! collaborator: it never touches the store directly. Instead it pushes
//! [`ConfigEvent`] messages through a [`ConfigNotifier`] onto a
//! single-consumer queue which the store drains on its own thread of
//! control, so reloads happen under the same locking discipline as every
//! other access - no reentrancy from arbitrary notification threads.
//!
//! # File Location
//!
//! `<user config dir>/gitglance/git_configuration.json`, overridable by
//! constructing the store with an explicit path.
//!
//! # Example
//!
//! ```no_run
//! use gitglance::core::config::ConfigStore;
//!
//! let store = ConfigStore::open_default().unwrap();
//! println!("git executable: {}", store.git_exe_path());
//! ```

pub mod schema;

pub use schema::Settings;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::Mutex;

use thiserror::Error;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("user config directory not found")]
    NoConfigDir,
}

/// Notifications delivered by the external file watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigEvent {
    /// The settings file changed on disk; reload before the next read.
    FileChanged,
}

/// Cloneable sender handed to the watcher collaborator.
pub type ConfigNotifier = Sender<ConfigEvent>;

/// The settings store.
pub struct ConfigStore {
    path: PathBuf,
    state: Mutex<Settings>,
    events: Mutex<Receiver<ConfigEvent>>,
    notifier: ConfigNotifier,
}

impl ConfigStore {
    /// Open the store at the default location.
    pub fn open_default() -> Result<Self, ConfigError> {
        Self::open(Self::default_path()?)
    }

    /// Open the store at an explicit path. A missing file yields defaults.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let settings = Self::load(&path)?;
        let (notifier, events) = channel();

        Ok(Self {
            path,
            state: Mutex::new(settings),
            events: Mutex::new(events),
            notifier,
        })
    }

    /// The default settings file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("gitglance").join("git_configuration.json"))
    }

    /// The path this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a notifier for the external watcher to push change events.
    pub fn notifier(&self) -> ConfigNotifier {
        self.notifier.clone()
    }

    /// The effective Git executable path.
    ///
    /// Drains pending watcher events first, reloading from disk when the
    /// file changed externally.
    pub fn git_exe_path(&self) -> String {
        self.drain_events();
        self.lock_state().effective_git_exe().to_string()
    }

    /// Set and persist the Git executable path (`None` resets to default).
    pub fn set_git_exe_path(&self, exe: Option<String>) -> Result<(), ConfigError> {
        let mut state = self.lock_state();
        state.git_exe_path = exe;
        Self::save(&self.path, &state)
    }

    /// Process queued watcher events.
    fn drain_events(&self) {
        let receiver = match self.events.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let mut changed = false;
        loop {
            match receiver.try_recv() {
                Ok(ConfigEvent::FileChanged) => changed = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if changed {
            // A file that fails to load keeps the last good settings.
            if let Ok(settings) = Self::load(&self.path) {
                *self.lock_state() = settings;
            }
        }
    }

    /// Load settings from disk; a missing file yields defaults.
    fn load(path: &Path) -> Result<Settings, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Settings::default());
            }
            Err(e) => {
                return Err(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Persist settings to disk, creating parent directories as needed.
    fn save(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(settings).map_err(|e| {
            ConfigError::WriteError {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            }
        })?;

        fs::write(path, json).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, Settings> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
