//! First-match predicate chain error initializer
//!
//! Emits one early-returning `if` per declared name, tested in the order
//! given, followed by the unknown error as the tail expression.

use super::{generate_validation_check, generate_validation_helper, prepare_cases};
use crate::delegate::ModelErrorsDelegate;
use crate::error::Result;
use crate::policy::GenerationPolicy;
use crate::sink::EmissionSink;
use quote::quote;

/// Initializer that decodes with a chain of equality predicates
#[derive(Debug, Clone)]
pub struct PredicateChainInitializer {
    name: String,
    policy: GenerationPolicy,
}

impl PredicateChainInitializer {
    /// Bind the initializer to a target name and its policy
    pub fn new(name: impl Into<String>, policy: GenerationPolicy) -> Self {
        Self {
            name: name.into(),
            policy,
        }
    }
}

impl ModelErrorsDelegate for PredicateChainInitializer {
    fn name(&self) -> &str {
        &self.name
    }

    fn policy(&self) -> &GenerationPolicy {
        &self.policy
    }

    fn generate_error_initializer(
        &self,
        sink: &mut dyn EmissionSink,
        error_names: &[String],
        unknown_error_name: &str,
    ) -> Result<()> {
        let (cases, unknown) =
            prepare_cases(&self.name, &self.policy, error_names, unknown_error_name)?;

        let predicates = cases.iter().map(|case| {
            let wire_name = &case.wire_name;
            let variant = &case.variant;
            quote! {
                if error_type == #wire_name {
                    return Self::#variant;
                }
            }
        });

        let (helper, check) = if self.policy.can_expect_validation_error() {
            (generate_validation_helper(), generate_validation_check())
        } else {
            (quote! {}, quote! {})
        };

        let tokens = quote! {
            #helper

            /// Decode a wire error identifier, first match wins
            pub fn from_error_type(error_type: &str) -> Self {
                #check
                #(#predicates)*
                Self::#unknown(error_type.to_string())
            }
        };

        tracing::debug!(
            target_name = %self.name,
            cases = cases.len(),
            "emitting predicate chain error initializer"
        );
        sink.append_tokens(tokens);
        Ok(())
    }
}
