//! Override resolution
//!
//! Turns a raw config mapping plus an override source into a
//! [`ResolvedSpec`](crate::ResolvedSpec).
//!
//! # Precedence
//!
//! For each option, the first of these that applies wins:
//!
//! 1. **Explicit override** - the override source reports the option's flag
//!    as explicitly set
//! 2. **Config value** - the raw mapping contains the option's key
//! 3. **Static default**
//! 4. **Generated default** - a [`DefaultGenerator`](crate::DefaultGenerator)
//!    invoked with the run context
//! 5. **Required** - resolution fails with `MissingRequiredOption`
//! 6. **Unset**
//!
//! Every supplied value is validated, whichever step it came from.
//!
//! # Unions
//!
//! Union options are resolved after every other option of their schema, so
//! their discriminator always has its final value before a branch is
//! chosen, whatever the declaration order.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use spec_core::{FlagValues, OptionSchema, RunContext, SpecSchema, resolve};
//!
//! let schema = SpecSchema::builder("db")
//!     .option(OptionSchema::enumeration("database", ["mysql", "postgres"]).required())
//!     .option(OptionSchema::string("database_version").default_value("5.6"))
//!     .build()?;
//!
//! let mut flags = FlagValues::new();
//! flags.parse("database", "postgres");
//!
//! let context = RunContext::new("123")?;
//! let spec = resolve(&schema, &json!({"database": "mysql"}), &flags, &context)?;
//!
//! assert_eq!(spec.string("database")?, Some("postgres"));
//! assert_eq!(spec.string("database_version")?, Some("5.6"));
//! # Ok::<(), spec_core::Error>(())
//! ```

mod dispatch;
mod engine;

pub use engine::resolve;
