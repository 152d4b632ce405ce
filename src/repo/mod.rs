//! repo
//!
//! Repository resolution and the shared handle cache.
//!
//! - [`cache`] - Process-wide root-path → handle registry (at most one live
//!   handle per physical repository)
//! - [`resolver`] - Filesystem-path → repository resolution with a
//!   structured failure taxonomy
//!
//! Handles are `Arc<Mutex<Git>>`: distinct repositories can be queried
//! concurrently while queries against one repository serialize behind its
//! lock (libgit2 repositories do not support concurrent reads).

pub mod cache;
pub mod resolver;

pub use cache::{RepoCache, RepositoryHandle};
pub use resolver::{get_repository, ResolveError};
