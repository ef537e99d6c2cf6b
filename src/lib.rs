//! Schema Typegen - infer structural schemas from sample data and render
//! them as code
//!
//! Provides:
//! - Schema inference from JSON-shaped samples (pairwise widening into
//!   one tree with correct optionality and union semantics)
//! - Adaptation of declared column metadata into the same schema tree
//! - Rendering to TypeScript interface declarations or JSON Schema
//! - Union normalization of the rendered text (dedup + canonical order)

pub mod export;
pub mod import;
pub mod inference;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use export::normalize::{normalize_declaration, normalize_validation_document};
pub use export::{
    ExportError, GenerateOptions, JsonSchemaExporter, Prettifier, TypeScriptExporter,
};
pub use import::{ColumnDescriptor, ImportError, map_native_type, schema_from_columns};
pub use inference::{
    Format, InferenceConfig, InferenceConfigBuilder, SchemaInferrer, SchemaNode, detect_format,
    infer_schema, merge_nodes,
};
