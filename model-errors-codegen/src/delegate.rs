//! Delegate contract for customizing error generation
//!
//! A target registers one [`ModelErrorsDelegate`]: its [`GenerationPolicy`]
//! and the callback that emits the error initializer always travel together,
//! so the toggles a target declares are the toggles its initializer honors.

use crate::error::Result;
use crate::policy::GenerationPolicy;
use crate::sink::EmissionSink;

/// Customizes how a model's error type is generated for one target
pub trait ModelErrorsDelegate: Send + Sync {
    /// Target name, used to attribute contract violations
    fn name(&self) -> &str;

    /// Generation toggles for this target
    fn policy(&self) -> &GenerationPolicy;

    /// Emit the routine decoding a wire error identifier into the error type
    ///
    /// `error_names` must already be sorted by the caller and is never
    /// re-sorted. On a contract violation nothing is appended to `sink`.
    ///
    /// When the policy expects validation errors, the validation check runs
    /// first. A declared name with the validation shape (`ValidationException`,
    /// `ValidationError:Field`) keeps its variant but always decodes to
    /// `ValidationError`; the built-in initializers log a warning naming it.
    fn generate_error_initializer(
        &self,
        sink: &mut dyn EmissionSink,
        error_names: &[String],
        unknown_error_name: &str,
    ) -> Result<()>;

    /// Conformance name the option set is expected to satisfy
    fn error_option_set_conformance(&self) -> &str {
        self.policy().effective_option_set_conformance_name()
    }
}
