//! Built-in error initializer generators
//!
//! Both strategies emit `pub fn from_error_type(error_type: &str) -> Self`
//! for the generated error enum. They differ only in the shape of the
//! lookup: a `match` over string literals, or a chain of first-match
//! predicates. With validation enabled both test the validation shape first.

mod matching;
mod predicate;

pub use matching::MatchingInitializer;
pub use predicate::PredicateChainInitializer;

use crate::delegate::ModelErrorsDelegate;
use crate::error::{GeneratorError, Result};
use crate::model::{validate_error_names, variant_name};
use crate::policy::GenerationPolicy;
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

/// Variant constructed for validation errors
pub const VALIDATION_ERROR_VARIANT: &str = "ValidationError";

/// Identifiers that denote a validation error
pub const VALIDATION_ERROR_TOKENS: &[&str] = &["ValidationError", "ValidationException"];

/// Prefixes of identifiers that carry a validation message
pub const VALIDATION_ERROR_PREFIXES: &[&str] = &["ValidationError:", "ValidationException:"];

/// Whether a wire identifier has the validation error shape
///
/// Mirrors the `is_validation_error` helper emitted into generated code.
pub(crate) fn is_validation_error_shape(error_type: &str) -> bool {
    VALIDATION_ERROR_TOKENS.contains(&error_type)
        || VALIDATION_ERROR_PREFIXES
            .iter()
            .any(|prefix| error_type.starts_with(prefix))
}

/// Variant identifiers the generated error type reserves under `policy`
pub fn reserved_variants(policy: &GenerationPolicy) -> Vec<&'static str> {
    if policy.can_expect_validation_error() {
        vec![VALIDATION_ERROR_VARIANT]
    } else {
        Vec::new()
    }
}

/// Shape of the emitted lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitializerStrategy {
    /// `match` over the declared names
    #[default]
    Match,
    /// `if error_type == ... { return ...; }` chain
    PredicateChain,
}

impl InitializerStrategy {
    /// Parse a strategy name (`match` or `chain`)
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "match" | "matching" => Ok(InitializerStrategy::Match),
            "chain" | "predicate" | "predicate_chain" | "predicate-chain" => {
                Ok(InitializerStrategy::PredicateChain)
            }
            other => Err(GeneratorError::Parse(format!(
                "unknown initializer strategy: {}",
                other
            ))),
        }
    }

    /// Pair this strategy with a policy as a target delegate
    pub fn build(
        self,
        name: impl Into<String>,
        policy: GenerationPolicy,
    ) -> Box<dyn ModelErrorsDelegate> {
        match self {
            InitializerStrategy::Match => Box::new(MatchingInitializer::new(name, policy)),
            InitializerStrategy::PredicateChain => {
                Box::new(PredicateChainInitializer::new(name, policy))
            }
        }
    }
}

/// Declared names the validation check decodes before their own variant
///
/// With validation enabled, a declared `ValidationException` or
/// `ValidationError:Field` still gets a variant, but `from_error_type`
/// returns the validation variant for it.
pub(crate) fn shadowed_error_names<'a>(
    policy: &GenerationPolicy,
    error_names: &'a [String],
) -> Vec<&'a str> {
    if !policy.can_expect_validation_error() {
        return Vec::new();
    }
    error_names
        .iter()
        .map(String::as_str)
        .filter(|name| is_validation_error_shape(name))
        .collect()
}

/// A declared error ready for emission
struct DecodeCase {
    /// Wire identifier matched exactly
    wire_name: String,
    /// Variant constructed on match
    variant: Ident,
}

/// Check inputs and resolve every name to its variant
///
/// Runs before anything is emitted so a violation leaves the sink untouched.
fn prepare_cases(
    target: &str,
    policy: &GenerationPolicy,
    error_names: &[String],
    unknown_error_name: &str,
) -> Result<(Vec<DecodeCase>, Ident)> {
    validate_error_names(
        target,
        error_names,
        unknown_error_name,
        &reserved_variants(policy),
    )?;

    for name in shadowed_error_names(policy, error_names) {
        tracing::warn!(
            target_name = target,
            error_name = name,
            "declared error is decoded as {}, its own variant is never constructed",
            VALIDATION_ERROR_VARIANT
        );
    }

    let cases = error_names
        .iter()
        .map(|name| DecodeCase {
            wire_name: name.clone(),
            variant: format_ident!("{}", variant_name(name)),
        })
        .collect();

    Ok((cases, format_ident!("{}", unknown_error_name)))
}

/// Generate the validation shape helper
fn generate_validation_helper() -> TokenStream {
    let tokens = VALIDATION_ERROR_TOKENS;
    let prefixes = VALIDATION_ERROR_PREFIXES;

    quote! {
        /// Whether a wire error identifier denotes a validation error
        fn is_validation_error(error_type: &str) -> bool {
            matches!(error_type, #(#tokens)|*)
                #(|| error_type.starts_with(#prefixes))*
        }
    }
}

/// Generate the validation check placed at the top of the routine
fn generate_validation_check() -> TokenStream {
    let variant = format_ident!("{}", VALIDATION_ERROR_VARIANT);
    quote! {
        if Self::is_validation_error(error_type) {
            return Self::#variant(error_type.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_shape() {
        assert!(is_validation_error_shape("ValidationError"));
        assert!(is_validation_error_shape("ValidationException"));
        assert!(is_validation_error_shape(
            "ValidationException: 1 validation error detected"
        ));
        assert!(!is_validation_error_shape("validationexception"));
        assert!(!is_validation_error_shape("Throttling"));
        assert!(!is_validation_error_shape(""));
    }

    #[test]
    fn test_shadowed_error_names() {
        let names: Vec<String> = ["AccessDenied", "ValidationError:Field", "ValidationException"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let policy = GenerationPolicy::default();
        assert!(shadowed_error_names(&policy, &names).is_empty());

        let policy = policy.with_validation_error(true);
        assert_eq!(
            shadowed_error_names(&policy, &names),
            vec!["ValidationError:Field", "ValidationException"]
        );
    }

    #[test]
    fn test_validation_helper_uses_shape_constants() {
        let code = generate_validation_helper().to_string();
        for token in VALIDATION_ERROR_TOKENS.iter().chain(VALIDATION_ERROR_PREFIXES) {
            assert!(code.contains(&format!("\"{}\"", token)));
        }
        assert!(code.contains("is_validation_error"));
    }

    #[test]
    fn test_reserved_variants() {
        let policy = GenerationPolicy::default();
        assert!(reserved_variants(&policy).is_empty());
        let policy = policy.with_validation_error(true);
        assert_eq!(reserved_variants(&policy), vec!["ValidationError"]);
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!(InitializerStrategy::parse("match").unwrap(), InitializerStrategy::Match);
        assert_eq!(
            InitializerStrategy::parse("Chain").unwrap(),
            InitializerStrategy::PredicateChain
        );
        assert!(matches!(
            InitializerStrategy::parse("lookup"),
            Err(GeneratorError::Parse(_))
        ));
    }

    #[test]
    fn test_strategy_build_keeps_policy() {
        let policy = GenerationPolicy::default().with_validation_error(true);
        let delegate = InitializerStrategy::PredicateChain.build("custom", policy.clone());
        assert_eq!(delegate.name(), "custom");
        assert_eq!(delegate.policy(), &policy);
        assert_eq!(delegate.error_option_set_conformance(), "Display");
    }

    mod property_tests {
        use super::*;
        use crate::sink::FileBuilder;
        use crate::test_support::decode;
        use proptest::prelude::*;
        use std::collections::BTreeSet;

        fn emit(strategy: InitializerStrategy, policy: GenerationPolicy, names: &[String]) -> String {
            let delegate = strategy.build("rust", policy);
            let mut builder = FileBuilder::new();
            delegate
                .generate_error_initializer(&mut builder, names, "UnknownError")
                .unwrap();
            builder.contents()
        }

        fn strategies() -> impl Strategy<Value = InitializerStrategy> {
            prop_oneof![
                Just(InitializerStrategy::Match),
                Just(InitializerStrategy::PredicateChain)
            ]
        }

        proptest! {
            #[test]
            fn prop_known_names_decode_to_own_variant(
                names in prop::collection::btree_set("[A-Z][a-z]{2,8}", 0..12),
                strategy in strategies(),
            ) {
                let names: Vec<String> = names.into_iter().collect();
                let code = emit(strategy, GenerationPolicy::default(), &names);

                let mut variants = BTreeSet::new();
                for name in &names {
                    let decoded = decode(&code, name);
                    prop_assert_eq!(&decoded.variant, name);
                    prop_assert_eq!(decoded.payload, None);
                    variants.insert(decoded.variant);
                }
                prop_assert_eq!(variants.len(), names.len());
            }

            #[test]
            fn prop_other_tokens_decode_to_unknown(
                names in prop::collection::btree_set("[A-Z][a-z]{2,8}", 0..12),
                token in "\\PC{0,16}",
                strategy in strategies(),
            ) {
                prop_assume!(!names.contains(&token));
                let names: Vec<String> = names.into_iter().collect();
                let code = emit(strategy, GenerationPolicy::default(), &names);

                let decoded = decode(&code, &token);
                prop_assert_eq!(decoded.variant, "UnknownError");
                prop_assert_eq!(decoded.payload, Some(token));
            }

            #[test]
            fn prop_validation_shape_takes_precedence(
                names in prop::collection::btree_set("[A-Z][a-z]{2,8}", 0..8),
                suffix in "[ a-z0-9]{0,24}",
                strategy in strategies(),
            ) {
                let mut names = names;
                names.insert("ValidationException".to_string());
                let names: Vec<String> = names.into_iter().collect();
                let policy = GenerationPolicy::default().with_validation_error(true);
                let code = emit(strategy, policy, &names);

                let decoded = decode(&code, "ValidationException");
                prop_assert_eq!(decoded.variant, "ValidationError");

                let token = format!("ValidationException:{}", suffix);
                let decoded = decode(&code, &token);
                prop_assert_eq!(decoded.variant, "ValidationError");
                prop_assert_eq!(decoded.payload, Some(token));

                for name in names.iter().filter(|n| !is_validation_error_shape(n)) {
                    prop_assert_eq!(&decode(&code, name).variant, name);
                }
            }
        }
    }
}
