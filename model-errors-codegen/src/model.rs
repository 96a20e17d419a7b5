//! Error names as supplied by the model loader
//!
//! The loader hands over the declared error names of one service model.
//! This module owns the explicit collation used to order them and the
//! input contract every initializer generator checks before emitting.

use crate::error::{GeneratorError, Result, Violation};
use heck::{ToShoutySnakeCase, ToUpperCamelCase};
use std::collections::HashMap;
use std::collections::HashSet;

/// The declared errors of one service model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelErrors {
    /// Base name for generated types (e.g. `Example` -> `ExampleError`)
    pub base_name: String,

    /// Declared error names in model order
    pub error_names: Vec<String>,
}

impl ModelErrors {
    /// Create from a base name and the declared error names
    pub fn new(base_name: impl Into<String>, error_names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            base_name: base_name.into(),
            error_names: error_names.into_iter().map(Into::into).collect(),
        }
    }

    /// Error names ordered by case-sensitive lexicographic (byte-wise) collation
    ///
    /// Uppercase letters sort before lowercase ones, so `"Zeta"` precedes
    /// `"alpha"`. Duplicates are kept so the contract check can report them.
    pub fn sorted_error_names(&self) -> Vec<String> {
        let mut names = self.error_names.clone();
        names.sort();
        names
    }

    /// Name of the generated error enum
    pub fn error_type_name(&self) -> String {
        format!("{}Error", self.base_name.to_upper_camel_case())
    }

    /// Name of the generated option set type
    pub fn option_set_type_name(&self) -> String {
        format!("{}ErrorTypes", self.base_name.to_upper_camel_case())
    }
}

/// Rust variant identifier for a declared error name
pub fn variant_name(error_name: &str) -> String {
    error_name.to_upper_camel_case()
}

/// Associated constant identifier for a declared error name
pub fn constant_name(error_name: &str) -> String {
    error_name.to_shouty_snake_case()
}

/// Whether `name` parses as a single non-keyword Rust identifier
pub(crate) fn is_valid_ident(name: &str) -> bool {
    syn::parse_str::<syn::Ident>(name).is_ok()
}

/// Whether `path` parses as a Rust path usable in a `use` declaration
///
/// `use` paths are module style, so segments carrying generic arguments
/// (`kit<T>`, `kit::<T>`) are rejected.
pub(crate) fn is_valid_path(path: &str) -> bool {
    if path.trim().is_empty() {
        return false;
    }
    match syn::parse_str::<syn::Path>(path) {
        Ok(parsed) => parsed
            .segments
            .iter()
            .all(|segment| matches!(segment.arguments, syn::PathArguments::None)),
        Err(_) => false,
    }
}

/// Check the generator input contract
///
/// `error_names` must be duplicate-free (case-sensitive) and each name must
/// map to its own valid variant identifier. `unknown_error_name` must be a
/// valid identifier distinct from every name and variant. `reserved` lists
/// variant identifiers the generated type already uses.
pub fn validate_error_names(
    target: &str,
    error_names: &[String],
    unknown_error_name: &str,
    reserved: &[&str],
) -> Result<()> {
    let violation = |v: Violation| {
        tracing::warn!(target_name = target, "error model rejected: {}", v);
        GeneratorError::violation(target, v)
    };

    let mut seen = HashSet::new();
    let mut variants: HashMap<String, &str> = HashMap::new();

    for name in error_names {
        if !seen.insert(name.as_str()) {
            return Err(violation(Violation::DuplicateErrorName(name.clone())));
        }

        let variant = variant_name(name);
        if !is_valid_ident(&variant) {
            return Err(violation(Violation::InvalidIdentifier(name.clone())));
        }
        if reserved.contains(&variant.as_str()) {
            return Err(violation(Violation::ReservedName(name.clone())));
        }
        if let Some(first) = variants.get(&variant) {
            return Err(violation(Violation::VariantCollision {
                first: first.to_string(),
                second: name.clone(),
                variant,
            }));
        }
        variants.insert(variant, name);
    }

    if !is_valid_ident(unknown_error_name) {
        return Err(violation(Violation::InvalidIdentifier(
            unknown_error_name.to_string(),
        )));
    }
    if seen.contains(unknown_error_name) || variants.contains_key(unknown_error_name) {
        return Err(violation(Violation::UnknownErrorCollision(
            unknown_error_name.to_string(),
        )));
    }
    if reserved.contains(&unknown_error_name) {
        return Err(violation(Violation::ReservedName(
            unknown_error_name.to_string(),
        )));
    }

    Ok(())
}
