//! Gitglance - Git status properties for file-manager integrations
//!
//! Gitglance answers per-path Git property queries the way a file-explorer
//! property provider needs them answered: given a path and an ordered set of
//! property identifiers, it resolves the enclosing repository, classifies the
//! path's status (submodule-aware), and returns a name → value mapping.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Status/property computation and submodule classification
//! - [`repo`] - Repository discovery and the shared handle cache
//! - [`core`] - Domain types and configuration persistence
//! - [`git`] - Single interface for all Git operations
//! - [`wsl`] - WSL path translation (pure string functions)
//!
//! # Correctness Invariants
//!
//! Gitglance maintains the following invariants:
//!
//! 1. At most one live repository handle exists per canonical root path
//! 2. All Git access flows through the [`git`] doorway; property queries
//!    never mutate working tree or index state
//! 3. Repository-open failures surface as structured results, never panics
//! 4. Unknown property identifiers are omissions, not errors

pub mod cli;
pub mod core;
pub mod engine;
pub mod git;
pub mod repo;
pub mod wsl;
