//! Error type generation for service models
//!
//! Emits the option set of declared error identifiers, the error enum, and
//! its decode routine. The enum body wraps whatever the target's delegate
//! emits for the initializer, so the delegate's output lands inside the
//! `impl` block this module opens and closes.

use crate::delegate::ModelErrorsDelegate;
use crate::error::{GeneratorError, Result, Violation};
use crate::initializer::{reserved_variants, VALIDATION_ERROR_VARIANT};
use crate::model::{constant_name, is_valid_ident, validate_error_names, variant_name, ModelErrors};
use crate::policy::OptionSetGeneration;
use crate::sink::{EmissionSink, FileBuilder};
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

/// Generate a complete, formatted error module for `model`
pub fn generate_model_errors_file(
    delegate: &dyn ModelErrorsDelegate,
    model: &ModelErrors,
    unknown_error_name: &str,
) -> Result<String> {
    let mut builder = FileBuilder::new();
    builder.append_tokens(generate_file_header());
    generate_model_errors(delegate, &mut builder, model, unknown_error_name)?;

    let code = builder.finish()?;
    tracing::info!(
        target_name = delegate.name(),
        error_type = %model.error_type_name(),
        errors = model.error_names.len(),
        "generated model errors"
    );
    Ok(code)
}

/// Emit the error types for `model` into `sink`
///
/// Names are sorted before they reach the delegate. Output is staged and
/// only appended to `sink` once every block was generated, so a failure
/// leaves `sink` untouched.
pub fn generate_model_errors(
    delegate: &dyn ModelErrorsDelegate,
    sink: &mut dyn EmissionSink,
    model: &ModelErrors,
    unknown_error_name: &str,
) -> Result<()> {
    let target = delegate.name();
    let policy = delegate.policy();
    policy.validate(target)?;

    let error_names = model.sorted_error_names();
    validate_error_names(
        target,
        &error_names,
        unknown_error_name,
        &reserved_variants(policy),
    )?;

    let error_type = model.error_type_name();
    let option_set_type = model.option_set_type_name();
    if !is_valid_ident(&error_type) {
        return Err(GeneratorError::violation(
            target,
            Violation::InvalidIdentifier(model.base_name.clone()),
        ));
    }

    let types = GeneratedTypes {
        error: format_ident!("{}", error_type),
        option_set: format_ident!("{}", option_set_type),
        unknown: format_ident!("{}", unknown_error_name),
        validation: policy
            .can_expect_validation_error()
            .then(|| format_ident!("{}", VALIDATION_ERROR_VARIANT)),
    };

    let mut staged = FileBuilder::new();

    if let Some(import) = generate_conformance_import(policy.option_set_generation())? {
        staged.append_tokens(import);
    }
    staged.append_tokens(generate_option_set(delegate, &types, &error_names));
    staged.append_tokens(generate_error_enum(
        &types,
        &error_names,
        policy.generate_serializable_conformance(),
    ));

    staged.append(&format!("impl {} {{", types.error));
    delegate.generate_error_initializer(&mut staged, &error_names, unknown_error_name)?;
    staged.append_tokens(generate_accessors(&types, &error_names));
    staged.append("}");

    if policy.generate_string_convertible_conformance() {
        staged.append_tokens(generate_display(&types, &error_names));
    }

    tracing::debug!(
        target_name = target,
        blocks = staged.blocks().len(),
        "emitting error type {}",
        error_type
    );
    for block in staged.blocks() {
        sink.append(block);
    }
    Ok(())
}

/// Identifiers shared by every emitted block
struct GeneratedTypes {
    error: Ident,
    option_set: Ident,
    unknown: Ident,
    validation: Option<Ident>,
}

/// Generate the module header
fn generate_file_header() -> TokenStream {
    quote! {
        //! Error types generated from the service model
        //! @generated

        #![allow(missing_docs)]
        #![allow(dead_code)]
        #![allow(clippy::all)]
    }
}

/// Generate the `use` for a custom option set conformance
fn generate_conformance_import(option_set: &OptionSetGeneration) -> Result<Option<TokenStream>> {
    let Some(library_import) = option_set.library_import() else {
        return Ok(None);
    };
    let path: syn::Path = syn::parse_str(library_import).map_err(|e| {
        GeneratorError::CodeGenError(format!(
            "invalid library import '{}': {}",
            library_import, e
        ))
    })?;
    let conformance = format_ident!("{}", option_set.conformance_name());
    Ok(Some(quote! { use #path::#conformance; }))
}

/// Generate the option set of declared error identifiers
fn generate_option_set(
    delegate: &dyn ModelErrorsDelegate,
    types: &GeneratedTypes,
    error_names: &[String],
) -> TokenStream {
    let option_set = &types.option_set;
    let conformance_doc = format!(
        " Expected to conform to `{}`.",
        delegate.error_option_set_conformance()
    );

    let constants: Vec<Ident> = error_names
        .iter()
        .map(|name| format_ident!("{}", constant_name(name)))
        .collect();
    let declarations = constants.iter().zip(error_names).map(|(constant, name)| {
        quote! {
            pub const #constant: Self = Self { description: #name };
        }
    });

    let conformance = match delegate.policy().option_set_generation() {
        OptionSetGeneration::WithStringConvertible => quote! {
            impl std::fmt::Display for #option_set {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.description)
                }
            }
        },
        OptionSetGeneration::WithCustomConformance {
            conformance_type, ..
        } => {
            let conformance = format_ident!("{}", conformance_type);
            quote! {
                impl #conformance for #option_set {
                    fn description(&self) -> &str {
                        self.description
                    }
                }
            }
        }
        OptionSetGeneration::NoGeneration => quote! {},
    };

    quote! {
        /// Identifiers of the errors declared by the service model
        ///
        #[doc = #conformance_doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct #option_set {
            description: &'static str,
        }

        impl #option_set {
            #(#declarations)*

            /// Every declared error identifier
            pub fn all() -> &'static [Self] {
                &[#(Self::#constants),*]
            }

            /// Wire identifier of the error
            pub const fn description(&self) -> &'static str {
                self.description
            }
        }

        #conformance
    }
}

/// Generate the error enum
fn generate_error_enum(types: &GeneratedTypes, error_names: &[String], serializable: bool) -> TokenStream {
    let error = &types.error;
    let unknown = &types.unknown;

    let variants = error_names.iter().map(|name| {
        let variant = format_ident!("{}", variant_name(name));
        let doc = format!(" The `{}` error", name);
        quote! {
            #[doc = #doc]
            #variant,
        }
    });

    let validation = types.validation.as_ref().map(|variant| {
        quote! {
            /// The request failed validation; carries the wire identifier
            #variant(String),
        }
    });

    let derives = if serializable {
        quote! { #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)] }
    } else {
        quote! { #[derive(Debug, Clone, PartialEq, Eq)] }
    };

    quote! {
        /// Errors declared by the service model
        #derives
        pub enum #error {
            #(#variants)*
            #validation
            /// An error identifier the model does not declare
            #unknown(String),
        }
    }
}

/// Generate the accessors placed after the delegate's initializer
fn generate_accessors(types: &GeneratedTypes, error_names: &[String]) -> TokenStream {
    let option_set = &types.option_set;
    let unknown = &types.unknown;

    let name_arms = error_names.iter().map(|name| {
        let variant = format_ident!("{}", variant_name(name));
        quote! { Self::#variant => #name, }
    });
    let option_arms = error_names.iter().map(|name| {
        let variant = format_ident!("{}", variant_name(name));
        let constant = format_ident!("{}", constant_name(name));
        quote! { Self::#variant => Some(#option_set::#constant), }
    });
    let validation_arm = types.validation.as_ref().map(|variant| {
        quote! { Self::#variant(error_type) => error_type.as_str(), }
    });

    quote! {
        /// Wire identifier of the error
        pub fn error_type_name(&self) -> &str {
            match self {
                #(#name_arms)*
                #validation_arm
                Self::#unknown(error_type) => error_type.as_str(),
            }
        }

        /// Declared error identifier, if the error is one the model declares
        pub fn error_type(&self) -> Option<#option_set> {
            match self {
                #(#option_arms)*
                _ => None,
            }
        }
    }
}

/// Generate `Display` and `Error` for the error enum
fn generate_display(types: &GeneratedTypes, error_names: &[String]) -> TokenStream {
    let error = &types.error;
    let unknown = &types.unknown;
    let unknown_format = format!("{}: {{}}", unknown);

    let arms = error_names.iter().map(|name| {
        let variant = format_ident!("{}", variant_name(name));
        quote! { Self::#variant => f.write_str(#name), }
    });
    let validation_arm = types.validation.as_ref().map(|variant| {
        let format = format!("{}: {{}}", variant);
        quote! { Self::#variant(reason) => write!(f, #format, reason), }
    });

    quote! {
        impl std::fmt::Display for #error {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    #(#arms)*
                    #validation_arm
                    Self::#unknown(error_type) => write!(f, #unknown_format, error_type),
                }
            }
        }

        impl std::error::Error for #error {}
    }
}
