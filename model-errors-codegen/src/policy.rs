//! Generation policy for model error types
//!
//! A [`GenerationPolicy`] is the per-target description of which optional
//! pieces of an error module are emitted. It is plain data: nothing here
//! writes to a sink.

use crate::error::{GeneratorError, Result, Violation};
use crate::model::{is_valid_ident, is_valid_path};

/// Conformance used for the option set when no custom one is configured
pub const DEFAULT_OPTION_SET_CONFORMANCE: &str = "Display";

/// How the error option set type declares its conformance
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OptionSetGeneration {
    /// Implement `std::fmt::Display` for the option set
    #[default]
    WithStringConvertible,
    /// Implement a caller-supplied trait imported from `library_import`
    WithCustomConformance {
        /// Path the conformance trait is imported from (e.g. `error_kit`)
        library_import: String,
        /// Trait implemented by the option set (e.g. `RecoverableError`)
        conformance_type: String,
    },
    /// Emit the option set without any conformance
    NoGeneration,
}

impl OptionSetGeneration {
    /// Custom conformance shorthand
    pub fn custom(library_import: impl Into<String>, conformance_type: impl Into<String>) -> Self {
        OptionSetGeneration::WithCustomConformance {
            library_import: library_import.into(),
            conformance_type: conformance_type.into(),
        }
    }

    /// Name of the interface the option set is expected to satisfy
    ///
    /// Defined for `NoGeneration` as well, where nothing is declared but
    /// other steps may still refer to the expected name.
    pub fn conformance_name(&self) -> &str {
        match self {
            OptionSetGeneration::WithCustomConformance {
                conformance_type, ..
            } => conformance_type,
            OptionSetGeneration::WithStringConvertible | OptionSetGeneration::NoGeneration => {
                DEFAULT_OPTION_SET_CONFORMANCE
            }
        }
    }

    /// Library import required by the conformance, if any
    pub fn library_import(&self) -> Option<&str> {
        match self {
            OptionSetGeneration::WithCustomConformance { library_import, .. } => {
                Some(library_import)
            }
            OptionSetGeneration::WithStringConvertible | OptionSetGeneration::NoGeneration => None,
        }
    }
}

/// Which optional behaviors are enabled for one target's generation run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationPolicy {
    option_set_generation: OptionSetGeneration,
    generate_serializable_conformance: bool,
    generate_string_convertible_conformance: bool,
    can_expect_validation_error: bool,
}

impl GenerationPolicy {
    /// Policy with the given option set strategy and every toggle off
    pub fn new(option_set_generation: OptionSetGeneration) -> Self {
        Self {
            option_set_generation,
            ..Default::default()
        }
    }

    /// Set whether the error type derives `serde::Serialize`
    pub fn with_serializable_conformance(mut self, enabled: bool) -> Self {
        self.generate_serializable_conformance = enabled;
        self
    }

    /// Set whether the error type implements `Display` and `Error`
    pub fn with_string_convertible_conformance(mut self, enabled: bool) -> Self {
        self.generate_string_convertible_conformance = enabled;
        self
    }

    /// Set whether decoding checks for the validation error shape first
    pub fn with_validation_error(mut self, enabled: bool) -> Self {
        self.can_expect_validation_error = enabled;
        self
    }

    /// Replace the option set strategy
    pub fn with_option_set_generation(mut self, option_set_generation: OptionSetGeneration) -> Self {
        self.option_set_generation = option_set_generation;
        self
    }

    /// The active option set strategy
    pub fn option_set_generation(&self) -> &OptionSetGeneration {
        &self.option_set_generation
    }

    /// Conformance name derived from the active option set strategy
    pub fn effective_option_set_conformance_name(&self) -> &str {
        self.option_set_generation.conformance_name()
    }

    /// Whether the error type declares a serialization conformance
    pub fn generate_serializable_conformance(&self) -> bool {
        self.generate_serializable_conformance
    }

    /// Whether the error type declares a human-readable string conformance
    pub fn generate_string_convertible_conformance(&self) -> bool {
        self.generate_string_convertible_conformance
    }

    /// Whether decoding special-cases the validation error shape
    pub fn can_expect_validation_error(&self) -> bool {
        self.can_expect_validation_error
    }

    /// Check the policy is usable for generation
    pub fn validate(&self, target: &str) -> Result<()> {
        if let OptionSetGeneration::WithCustomConformance {
            library_import,
            conformance_type,
        } = &self.option_set_generation
        {
            if conformance_type.trim().is_empty() {
                return Err(GeneratorError::violation(target, Violation::EmptyConformanceType));
            }
            if !is_valid_ident(conformance_type) {
                return Err(GeneratorError::violation(
                    target,
                    Violation::InvalidIdentifier(conformance_type.clone()),
                ));
            }
            if !is_valid_path(library_import) {
                return Err(GeneratorError::violation(
                    target,
                    Violation::InvalidLibraryImport(library_import.clone()),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_name_defaults() {
        let policy = GenerationPolicy::new(OptionSetGeneration::WithStringConvertible);
        assert_eq!(policy.effective_option_set_conformance_name(), "Display");

        let policy = GenerationPolicy::new(OptionSetGeneration::NoGeneration);
        assert_eq!(policy.effective_option_set_conformance_name(), "Display");
    }

    #[test]
    fn test_effective_name_custom() {
        let policy =
            GenerationPolicy::new(OptionSetGeneration::custom("ErrorKit", "RecoverableError"));
        assert_eq!(policy.effective_option_set_conformance_name(), "RecoverableError");
        assert_eq!(policy.option_set_generation().library_import(), Some("ErrorKit"));
    }

    #[test]
    fn test_effective_name_follows_variant() {
        let policy = GenerationPolicy::new(OptionSetGeneration::custom("kit", "Custom"))
            .with_option_set_generation(OptionSetGeneration::NoGeneration);
        assert_eq!(policy.effective_option_set_conformance_name(), "Display");
        assert_eq!(policy.option_set_generation().library_import(), None);
    }

    #[test]
    fn test_toggles_are_independent() {
        let policy = GenerationPolicy::default().with_serializable_conformance(true);
        assert!(policy.generate_serializable_conformance());
        assert!(!policy.generate_string_convertible_conformance());
        assert!(!policy.can_expect_validation_error());
        assert_eq!(
            policy.option_set_generation(),
            &OptionSetGeneration::WithStringConvertible
        );
    }

    #[test]
    fn test_validate_empty_conformance_type() {
        let policy = GenerationPolicy::new(OptionSetGeneration::custom("ErrorKit", ""));
        let err = policy.validate("rust").unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::ContractViolation {
                ref target,
                violation: Violation::EmptyConformanceType,
            } if target == "rust"
        ));
    }

    #[test]
    fn test_validate_bad_identifiers() {
        let policy = GenerationPolicy::new(OptionSetGeneration::custom("ErrorKit", "Not A Type"));
        assert!(matches!(
            policy.validate("rust"),
            Err(GeneratorError::ContractViolation {
                violation: Violation::InvalidIdentifier(_),
                ..
            })
        ));

        let policy = GenerationPolicy::new(OptionSetGeneration::custom("", "RecoverableError"));
        assert!(matches!(
            policy.validate("rust"),
            Err(GeneratorError::ContractViolation {
                violation: Violation::InvalidLibraryImport(_),
                ..
            })
        ));

        let policy =
            GenerationPolicy::new(OptionSetGeneration::custom("kit<T>", "RecoverableError"));
        let err = policy.validate("rust").unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::ContractViolation {
                ref target,
                violation: Violation::InvalidLibraryImport(ref import),
            } if target == "rust" && import == "kit<T>"
        ));
    }

    #[test]
    fn test_validate_accepts_nested_import() {
        let policy =
            GenerationPolicy::new(OptionSetGeneration::custom("error_kit::traits", "RecoverableError"));
        assert!(policy.validate("rust").is_ok());
        assert!(GenerationPolicy::default().validate("rust").is_ok());
    }
}
