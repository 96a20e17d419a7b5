//! Target configuration from a parameter string
//!
//! Configuration is supplied once per target as comma separated `key=value`
//! pairs, the same shape protoc passes to plugins:
//!
//! ```text
//! target=rust,option_set=custom:error_kit:RecoverableError,validation=true
//! ```

use crate::delegate::ModelErrorsDelegate;
use crate::error::{GeneratorError, Result};
use crate::initializer::InitializerStrategy;
use crate::policy::OptionSetGeneration;
use crate::targets::{custom_target, target_defaults};

/// Default fallback variant for unrecognized error identifiers
pub const DEFAULT_UNKNOWN_ERROR_NAME: &str = "UnknownError";

/// Target selection plus per-run overrides of its policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetConfig {
    /// Built-in target the policy starts from
    pub target: String,
    /// Option set strategy override
    pub option_set: Option<OptionSetGeneration>,
    /// Serializable conformance override
    pub serializable: Option<bool>,
    /// String convertible conformance override
    pub display: Option<bool>,
    /// Validation error detection override
    pub validation: Option<bool>,
    /// Initializer strategy override
    pub initializer: Option<InitializerStrategy>,
    /// Variant used for unrecognized error identifiers
    pub unknown_error_name: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            target: "rust".to_string(),
            option_set: None,
            serializable: None,
            display: None,
            validation: None,
            initializer: None,
            unknown_error_name: DEFAULT_UNKNOWN_ERROR_NAME.to_string(),
        }
    }
}

impl TargetConfig {
    /// Build the delegate for this configuration
    pub fn resolve(&self) -> Result<Box<dyn ModelErrorsDelegate>> {
        let (name, mut policy, mut strategy) = target_defaults(&self.target)?;

        if let Some(option_set) = &self.option_set {
            policy = policy.with_option_set_generation(option_set.clone());
        }
        if let Some(enabled) = self.serializable {
            policy = policy.with_serializable_conformance(enabled);
        }
        if let Some(enabled) = self.display {
            policy = policy.with_string_convertible_conformance(enabled);
        }
        if let Some(enabled) = self.validation {
            policy = policy.with_validation_error(enabled);
        }
        if let Some(initializer) = self.initializer {
            strategy = initializer;
        }

        policy.validate(name)?;
        tracing::debug!(target_name = name, ?policy, ?strategy, "resolved target");
        Ok(custom_target(name, policy, strategy))
    }
}

/// Parse a parameter string into a target configuration
pub fn parse_params(param: &str) -> Result<TargetConfig> {
    let mut config = TargetConfig::default();

    for part in param.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| GeneratorError::Parse(format!("expected key=value, got '{}'", part)))?;
        let value = value.trim();

        match key.trim() {
            "target" | "backend" => config.target = value.to_string(),
            "option_set" => config.option_set = Some(parse_option_set(value)?),
            "serializable" => config.serializable = Some(parse_bool(key, value)?),
            "display" => config.display = Some(parse_bool(key, value)?),
            "validation" => config.validation = Some(parse_bool(key, value)?),
            "initializer" => config.initializer = Some(InitializerStrategy::parse(value)?),
            "unknown" => config.unknown_error_name = value.to_string(),
            other => {
                return Err(GeneratorError::Parse(format!("unknown parameter: {}", other)));
            }
        }
    }

    Ok(config)
}

/// Parse `display`, `none` or `custom:<library>:<Trait>`
fn parse_option_set(value: &str) -> Result<OptionSetGeneration> {
    match value {
        "display" | "string" => Ok(OptionSetGeneration::WithStringConvertible),
        "none" => Ok(OptionSetGeneration::NoGeneration),
        _ => {
            let custom = value.strip_prefix("custom:").ok_or_else(|| {
                GeneratorError::Parse(format!("invalid option_set: {}", value))
            })?;
            // library paths may contain `::`, the trait follows the last `:`
            let (library_import, conformance_type) = custom.rsplit_once(':').ok_or_else(|| {
                GeneratorError::Parse(format!(
                    "option_set custom expects custom:<library>:<Trait>, got {}",
                    value
                ))
            })?;
            Ok(OptionSetGeneration::custom(library_import, conformance_type))
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(GeneratorError::Parse(format!(
            "{} expects a boolean, got '{}'",
            key.trim(),
            value
        ))),
    }
}
