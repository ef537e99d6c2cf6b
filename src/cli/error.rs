//! Error type for CLI operations

use thiserror::Error;

use crate::export::ExportError;
use crate::import::ImportError;

/// Errors surfaced by CLI commands
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid or missing input selection
    #[error("Invalid input: {0}")]
    Input(String),

    /// Import failure (missing table, bad descriptors)
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Export failure
    #[error(transparent)]
    Export(#[from] ExportError),

    /// IO failure reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON input
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed YAML input
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
