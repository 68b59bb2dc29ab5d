//! Option schemas and layered override resolution for benchmark specs
//!
//! This crate turns a raw, loosely typed configuration mapping plus a set of
//! command-line style overrides into a validated, typed spec:
//!
//! - **Schema declaration**: [`OptionSchema`] and [`SpecSchema`], built once
//!   and immutable afterwards
//! - **Override sources**: [`OverrideSource`] lookups reporting whether a flag
//!   was explicitly set
//! - **Default generators**: run-scoped names and random secrets computed at
//!   resolution time from the [`RunContext`]
//! - **Resolution**: [`resolve`] applies override > config > default
//!   precedence and dispatches union options on their discriminator
//! - **Resolved specs**: [`ResolvedSpec`] and the [`SpecRecord`] trait for
//!   typed records
//!
//! # Architecture
//!
//! ```text
//!   raw config ----+
//!                  |
//!   overrides -----+--> resolve --> discriminators --> union dispatch --> ResolvedSpec
//!                  |
//!   run context ---+
//! ```
//!
//! Resolution is pure and synchronous. Schemas are `Send + Sync` and can be
//! shared across threads without locking.

pub mod context;
pub mod defaults;
pub mod error;
pub mod overrides;
pub mod resolve;
pub mod resolved;
pub mod schema;

pub use context::{MAX_RUN_URI_LEN, RunContext};
pub use defaults::{DEFAULT_SECRET_LENGTH, DefaultGenerator, RandomSecret, RunScopedName};
pub use error::{Error, InvalidReason, Result};
pub use overrides::{FlagValue, FlagValues, NoOverrides, OverrideSource};
pub use resolve::resolve;
pub use resolved::{ResolvedSpec, ResolvedValue, SpecRecord, VariantSpec, resolve_record};
pub use schema::{DefaultValue, OptionKind, OptionSchema, SpecSchema, SpecSchemaBuilder, UnionKind};
