//! Value-matching error initializer
//!
//! Emits a `match` over the declared wire names with a catch-all arm that
//! keeps the unmatched identifier:
//!
//! ```text
//! match error_type {
//!     "AccessDenied" => Self::AccessDenied,
//!     other => Self::UnknownError(other.to_string()),
//! }
//! ```

use super::{generate_validation_check, generate_validation_helper, prepare_cases};
use crate::delegate::ModelErrorsDelegate;
use crate::error::Result;
use crate::policy::GenerationPolicy;
use crate::sink::EmissionSink;
use quote::quote;

/// Initializer that decodes with a `match` expression
#[derive(Debug, Clone)]
pub struct MatchingInitializer {
    name: String,
    policy: GenerationPolicy,
}

impl MatchingInitializer {
    /// Bind the initializer to a target name and its policy
    pub fn new(name: impl Into<String>, policy: GenerationPolicy) -> Self {
        Self {
            name: name.into(),
            policy,
        }
    }
}

impl ModelErrorsDelegate for MatchingInitializer {
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

        let arms = cases.iter().map(|case| {
            let wire_name = &case.wire_name;
            let variant = &case.variant;
            quote! { #wire_name => Self::#variant, }
        });

        let (helper, check) = if self.policy.can_expect_validation_error() {
            (generate_validation_helper(), generate_validation_check())
        } else {
            (quote! {}, quote! {})
        };

        let tokens = quote! {
            #helper

            /// Decode a wire error identifier
            ///
            /// Matching is exact and case-sensitive.
            pub fn from_error_type(error_type: &str) -> Self {
                #check
                match error_type {
                    #(#arms)*
                    other => Self::#unknown(other.to_string()),
                }
            }
        };

        tracing::debug!(
            target_name = %self.name,
            cases = cases.len(),
            "emitting matching error initializer"
        );
        sink.append_tokens(tokens);
        Ok(())
    }
}
