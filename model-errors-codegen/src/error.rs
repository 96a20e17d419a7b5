//! Error types for code generation
//!
//! Every failure in this crate is a generation-time failure. Contract
//! violations carry the target that was being generated and the offending
//! name or option so the model or policy can be fixed.

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Error type for code generation
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Code generation failed
    #[error("code generation error: {0}")]
    CodeGenError(String),

    /// Failed to parse a generation parameter
    #[error("parse error: {0}")]
    Parse(String),

    /// Generated code could not be parsed for formatting
    #[error("failed to format generated code: {0}")]
    Format(String),

    /// No target is registered under the requested name
    #[error("unknown target: {0}")]
    UnknownTarget(String),

    /// The policy or the generator inputs broke the generation contract
    #[error("target '{target}': {violation}")]
    ContractViolation {
        /// Name of the target being generated
        target: String,
        /// What was wrong
        violation: Violation,
    },
}

impl GeneratorError {
    /// Build a contract violation for `target`
    pub fn violation(target: impl Into<String>, violation: Violation) -> Self {
        GeneratorError::ContractViolation {
            target: target.into(),
            violation,
        }
    }
}

impl From<String> for GeneratorError {
    fn from(s: String) -> Self {
        GeneratorError::CodeGenError(s)
    }
}

/// A specific breach of the generator input or policy contract
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// The same error name was declared more than once
    #[error("duplicate error name '{0}'")]
    DuplicateErrorName(String),

    /// Two distinct names produce the same variant identifier
    #[error("error names '{first}' and '{second}' both map to variant '{variant}'")]
    VariantCollision {
        /// First declared name
        first: String,
        /// Second declared name
        second: String,
        /// Shared variant identifier
        variant: String,
    },

    /// The unknown-error identifier is also a declared error
    #[error("unknown error name '{0}' collides with a declared error")]
    UnknownErrorCollision(String),

    /// A name is reserved for a generated variant
    #[error("error name '{0}' is reserved by the generated error type")]
    ReservedName(String),

    /// A name is not usable as a Rust identifier
    #[error("'{0}' is not a valid identifier")]
    InvalidIdentifier(String),

    /// A custom conformance was configured without a type
    #[error("option_set custom conformance type is empty")]
    EmptyConformanceType,

    /// A custom conformance was configured without a library import
    #[error("option_set library import is not a valid path: '{0}'")]
    InvalidLibraryImport(String),
}
