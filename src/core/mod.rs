//! core
//!
//! Domain types and configuration persistence.
//!
//! - [`types`] - Validated newtypes ([`types::Oid`])
//! - [`config`] - JSON-backed settings store with a watcher event queue

pub mod config;
pub mod types;
