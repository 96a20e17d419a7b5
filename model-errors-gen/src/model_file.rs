//! Error model file parsing
//!
//! A model file lists one declared error name per line. Blank lines and
//! lines starting with `#` are ignored.

use model_errors_codegen::ModelErrors;
use std::path::{Path, PathBuf};

/// Errors reading an error model file
#[derive(Debug, thiserror::Error)]
pub enum ModelFileError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A line holds more than a single name
    #[error("{path}:{line}: expected a single error name, got '{content}'")]
    InvalidLine {
        path: PathBuf,
        line: usize,
        content: String,
    },
}

/// Load the declared errors from `path`
///
/// The base name defaults to the file stem (`example.errors` -> `example`).
pub fn load_model(path: &Path, base_name: Option<&str>) -> Result<ModelErrors, ModelFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| ModelFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let base_name = match base_name {
        Some(name) => name.to_string(),
        None => path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.split('.').next())
            .unwrap_or_default()
            .to_string(),
    };

    let error_names = parse_error_names(&content, path)?;
    Ok(ModelErrors::new(base_name, error_names))
}

/// Extract error names from model file content
fn parse_error_names(content: &str, path: &Path) -> Result<Vec<String>, ModelFileError> {
    let mut names = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if trimmed.split_whitespace().count() > 1 {
            return Err(ModelFileError::InvalidLine {
                path: path.to_path_buf(),
                line: index + 1,
                content: trimmed.to_string(),
            });
        }
        names.push(trimmed.to_string());
    }

    Ok(names)
}
