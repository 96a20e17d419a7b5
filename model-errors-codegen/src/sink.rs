//! Emission sink for generated source text
//!
//! Generators never return text. They append whole blocks to a sink owned
//! by the driver, so their output interleaves with whatever the surrounding
//! generator writes before and after them.

use crate::error::{GeneratorError, Result};
use proc_macro2::TokenStream;

/// Append-only destination for generated source text
///
/// Not thread-safe: one sink belongs to one target's generation run.
pub trait EmissionSink {
    /// Append a block of source text
    fn append(&mut self, block: &str);

    /// Append a token stream as source text
    fn append_tokens(&mut self, tokens: TokenStream) {
        self.append(&tokens.to_string());
    }
}

impl EmissionSink for String {
    fn append(&mut self, block: &str) {
        if !self.is_empty() {
            self.push('\n');
        }
        self.push_str(block);
    }
}

/// In-memory file accumulator
#[derive(Debug, Default, Clone)]
pub struct FileBuilder {
    blocks: Vec<String>,
}

impl FileBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks appended so far, in order
    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    /// Whether nothing has been appended yet
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Raw accumulated text
    pub fn contents(&self) -> String {
        self.blocks.join("\n")
    }

    /// Format the accumulated text as one Rust source file
    pub fn finish(self) -> Result<String> {
        let content = self.contents();
        let parsed = syn::parse_file(&content).map_err(|e| {
            GeneratorError::Format(format!("generated code does not parse: {}", e))
        })?;
        Ok(prettyplease::unparse(&parsed))
    }
}

impl EmissionSink for FileBuilder {
    fn append(&mut self, block: &str) {
        tracing::trace!(bytes = block.len(), "append block");
        self.blocks.push(block.to_string());
    }
}
