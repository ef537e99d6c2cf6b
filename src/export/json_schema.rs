//! JSON Schema exporter
//!
//! Builds a validation document isomorphic to the schema tree and
//! serializes it indented or compact.

use serde_json::{Map, Value, json};

use crate::inference::SchemaNode;

use super::{ExportError, GenerateOptions};

/// Exporter for JSON Schema validation documents
#[derive(Debug, Default)]
pub struct JsonSchemaExporter;

impl JsonSchemaExporter {
    /// Create a new JsonSchemaExporter
    pub fn new() -> Self {
        Self
    }

    /// Render a schema as JSON Schema text
    ///
    /// The document root carries the draft identifier and the configured
    /// title; `options.prettify` selects indented serialization.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schema_typegen::export::{GenerateOptions, JsonSchemaExporter};
    /// use schema_typegen::inference::infer_schema;
    ///
    /// let samples = vec![serde_json::json!({"id": 1})];
    /// let schema = infer_schema(&samples);
    /// let text = JsonSchemaExporter::new()
    ///     .export(&schema, &GenerateOptions::default())
    ///     .unwrap();
    /// assert!(text.contains("\"title\":\"Generated\""));
    /// ```
    pub fn export(
        &self,
        schema: &SchemaNode,
        options: &GenerateOptions,
    ) -> Result<String, ExportError> {
        let mut doc = Map::new();
        doc.insert(
            "$schema".to_string(),
            json!("https://json-schema.org/draft/2020-12/schema"),
        );
        doc.insert("title".to_string(), json!(options.interface_name));

        if let Value::Object(body) = self.to_document(schema) {
            for (key, value) in body {
                doc.insert(key, value);
            }
        }

        let doc = Value::Object(doc);
        let serialized = if options.prettify {
            serde_json::to_string_pretty(&doc)
        } else {
            serde_json::to_string(&doc)
        };
        serialized.map_err(|e| ExportError::SerializationError(e.to_string()))
    }

    /// Build the document tree for a schema node
    ///
    /// Primitives map to `{type, format?}` records, arrays and objects
    /// recurse, unions become `anyOf` lists, `any` is the empty
    /// accept-anything schema. The `required` list is omitted when empty.
    pub fn to_document(&self, schema: &SchemaNode) -> Value {
        match schema {
            SchemaNode::Null => json!({"type": "null"}),
            SchemaNode::Boolean => json!({"type": "boolean"}),
            SchemaNode::Integer => json!({"type": "integer"}),
            SchemaNode::Number => json!({"type": "number"}),
            SchemaNode::String { format } => {
                let mut node = Map::new();
                node.insert("type".to_string(), json!("string"));
                if let Some(format) = format {
                    node.insert("format".to_string(), json!(format.as_json_schema_format()));
                }
                Value::Object(node)
            }
            SchemaNode::Array { items } => {
                json!({"type": "array", "items": self.to_document(items)})
            }
            SchemaNode::Object {
                properties,
                required,
            } => {
                let props: Map<String, Value> = properties
                    .iter()
                    .map(|(name, node)| (name.clone(), self.to_document(node)))
                    .collect();
                let mut node = Map::new();
                node.insert("type".to_string(), json!("object"));
                node.insert("properties".to_string(), Value::Object(props));
                if !required.is_empty() {
                    node.insert(
                        "required".to_string(),
                        Value::Array(required.iter().map(|name| json!(name)).collect()),
                    );
                }
                Value::Object(node)
            }
            SchemaNode::Union { variants } => {
                let any_of: Vec<Value> = variants
                    .iter()
                    .map(|variant| self.to_document(variant))
                    .collect();
                json!({"anyOf": any_of})
            }
            SchemaNode::Any => json!({}),
        }
    }
}
