//! model-errors-codegen
//!
//! Generates Rust error types from the error names a service model declares.
//! Each generation target supplies a [`ModelErrorsDelegate`]: a
//! [`GenerationPolicy`] of output toggles paired with the callback that emits
//! the decode routine mapping wire error identifiers to variants.
//!
//! ```no_run
//! use model_errors_codegen::{generate_model_errors_file, get_target, ModelErrors};
//!
//! let target = get_target("rust")?;
//! let model = ModelErrors::new("Example", ["Throttling", "AccessDenied"]);
//! let code = generate_model_errors_file(target.as_ref(), &model, "UnknownError")?;
//! # Ok::<(), model_errors_codegen::GeneratorError>(())
//! ```

#![warn(missing_docs)]

pub mod config;
mod delegate;
mod error;
pub mod errors;
pub mod initializer;
pub mod model;
pub mod policy;
pub mod sink;
pub mod targets;

#[cfg(test)]
mod test_support;

pub use config::{parse_params, TargetConfig};
pub use delegate::ModelErrorsDelegate;
pub use error::{GeneratorError, Result, Violation};
pub use errors::{generate_model_errors, generate_model_errors_file};
pub use initializer::{InitializerStrategy, MatchingInitializer, PredicateChainInitializer};
pub use model::ModelErrors;
pub use policy::{GenerationPolicy, OptionSetGeneration};
pub use sink::{EmissionSink, FileBuilder};
pub use targets::{available_targets, custom_target, get_target};
