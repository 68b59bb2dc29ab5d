//! Shared test utilities for the benchspec workspace.
//!
//! Standard fixtures reused across crate test suites. Dev-dependency only,
//! never published.
//!
//! # Modules
//!
//! - [`fixtures`] - raw database configs, run contexts and flag sets
//! - [`config_dir`] - [`ConfigDir`](config_dir::ConfigDir) for writing config
//!   documents to disk

pub mod config_dir;
pub mod fixtures;
