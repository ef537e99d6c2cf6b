//! Import functionality
//!
//! Turns declared structure from external sources into schema trees:
//! - Column descriptors from tabular metadata (no sampling required)

pub mod columns;

/// Error during import
///
/// Carries the failing identifier so callers can name the source in
/// messages surfaced to users.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The declared table or collection does not exist
    #[error("Table or collection '{0}' not found")]
    NotFound(String),
    /// Transport-level failure while reaching the metadata source
    #[error("Connection error for '{identifier}': {message}")]
    Connection { identifier: String, message: String },
    /// Malformed descriptor input
    #[error("Parse error: {0}")]
    Parse(String),
    /// IO error
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ImportError {
    fn from(e: std::io::Error) -> Self {
        ImportError::Io(e.to_string())
    }
}

// Re-export for convenience
pub use columns::{ColumnDescriptor, map_native_type, schema_from_columns};
