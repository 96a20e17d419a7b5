//! Built-in generation targets
//!
//! A target pairs a [`GenerationPolicy`] with the initializer generator that
//! honors it. Targets are looked up once per generation run and reused for
//! every error type of that run.

use crate::delegate::ModelErrorsDelegate;
use crate::error::{GeneratorError, Result};
use crate::initializer::InitializerStrategy;
use crate::policy::{GenerationPolicy, OptionSetGeneration};

/// Names of the built-in targets
pub fn available_targets() -> &'static [&'static str] {
    &["rust", "rust-validating", "rust-minimal"]
}

/// Policy and initializer strategy registered for a built-in target
pub fn target_defaults(name: &str) -> Result<(&'static str, GenerationPolicy, InitializerStrategy)> {
    match name.to_lowercase().replace('_', "-").as_str() {
        "rust" => Ok((
            "rust",
            GenerationPolicy::new(OptionSetGeneration::WithStringConvertible)
                .with_serializable_conformance(true)
                .with_string_convertible_conformance(true),
            InitializerStrategy::Match,
        )),
        "rust-validating" | "validating" => Ok((
            "rust-validating",
            GenerationPolicy::new(OptionSetGeneration::WithStringConvertible)
                .with_serializable_conformance(true)
                .with_string_convertible_conformance(true)
                .with_validation_error(true),
            InitializerStrategy::PredicateChain,
        )),
        "rust-minimal" | "minimal" => Ok((
            "rust-minimal",
            GenerationPolicy::new(OptionSetGeneration::NoGeneration),
            InitializerStrategy::Match,
        )),
        other => Err(GeneratorError::UnknownTarget(other.to_string())),
    }
}

/// Get a built-in target by name
pub fn get_target(name: &str) -> Result<Box<dyn ModelErrorsDelegate>> {
    let (canonical, policy, strategy) = target_defaults(name)?;
    Ok(strategy.build(canonical, policy))
}

/// Register a target from explicit data
pub fn custom_target(
    name: impl Into<String>,
    policy: GenerationPolicy,
    strategy: InitializerStrategy,
) -> Box<dyn ModelErrorsDelegate> {
    strategy.build(name, policy)
}
