//! Schema inference engine for JSON-shaped sample data
//!
//! Derives one structural schema tree from an arbitrary number of raw
//! samples, widening per-sample observations pairwise into a consistent
//! tree with correct optionality and union semantics.
//!
//! ## Features
//!
//! - **Type inference** - classify raw values over a closed kind
//!   vocabulary (null, string, number, integer, boolean, array, object,
//!   union, any)
//! - **Format detection** - recognize date-time, uuid and email strings
//! - **Order-independent merging** - the set of observed types never
//!   depends on sample arrival order
//! - **Optionality tracking** - a property is required only when present
//!   in every sample
//!
//! ## Example
//!
//! ```rust
//! use schema_typegen::inference::SchemaInferrer;
//!
//! let mut inferrer = SchemaInferrer::new();
//! inferrer.add_json(r#"{"name": "Alice", "age": 30}"#);
//! inferrer.add_json(r#"{"name": "Bob", "age": 25, "email": "bob@example.com"}"#);
//!
//! let schema = inferrer.finalize();
//! println!("{}", serde_json::to_string_pretty(&schema).unwrap());
//! ```

mod config;
mod formats;
mod inferrer;
mod merge;
mod types;

pub use config::{InferenceConfig, InferenceConfigBuilder};
pub use formats::{Format, detect_format};
pub use inferrer::{SchemaInferrer, infer_schema};
pub use merge::{empty_schema, merge_all, merge_nodes};
pub use types::SchemaNode;
