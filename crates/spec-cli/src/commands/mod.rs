//! Command implementations for spec-cli

pub mod options;
pub mod resolve;

pub use options::run_options;
pub use resolve::{ResolveArgs, run_resolve};
