//! Export functionality
//!
//! Renders a schema tree into the two textual target forms:
//! - TypeScript interface declarations
//! - JSON Schema validation documents
//!
//! Both renderers treat the tree as read-only and absorb unrecognized
//! shapes into `any` rather than failing. Union normalization is a
//! separate pass applied to the rendered text.

pub mod json_schema;
pub mod normalize;
pub mod typescript;

/// Options shared by both renderers
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Emit optional markers for properties absent from `required`
    pub infer_optional: bool,
    /// Name for the generated interface / schema title
    pub interface_name: String,
    /// Request the external formatting pass / indented serialization
    pub prettify: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            infer_optional: true,
            interface_name: "Generated".to_string(),
            prettify: false,
        }
    }
}

/// Injected text formatter collaborator
///
/// Swappable and fallible; a failure is downgraded to a warning by the
/// renderer and the unformatted text is kept.
pub trait Prettifier {
    /// Reformat the rendered text
    fn format(&self, source: &str) -> anyhow::Result<String>;
}

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// Re-export for convenience
pub use json_schema::JsonSchemaExporter;
pub use typescript::TypeScriptExporter;
