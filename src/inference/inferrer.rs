//! Schema inference engine

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use super::config::InferenceConfig;
use super::formats::detect_format;
use super::merge::{empty_schema, merge_all};
use super::types::SchemaNode;

/// Schema inference engine
///
/// Classifies each raw sample into a [`SchemaNode`] and folds the
/// classifications pairwise into one tree describing the common
/// structure. Never fails on heterogeneous or malformed samples:
/// unparseable JSON text is counted as skipped, unclassifiable shapes
/// widen to `any`.
pub struct SchemaInferrer {
    config: InferenceConfig,
    /// Running merge of every classified sample
    root: Option<SchemaNode>,
    /// Total samples folded
    record_count: usize,
    /// Samples skipped (invalid JSON text)
    skipped_count: usize,
}

impl SchemaInferrer {
    /// Create a new schema inferrer with default configuration
    pub fn new() -> Self {
        Self::with_config(InferenceConfig::default())
    }

    /// Create a new schema inferrer with custom configuration
    pub fn with_config(config: InferenceConfig) -> Self {
        Self {
            config,
            root: None,
            record_count: 0,
            skipped_count: 0,
        }
    }

    /// Add a single JSON string for analysis
    ///
    /// Text that does not parse is counted as skipped rather than
    /// surfaced as an error.
    pub fn add_json(&mut self, json: &str) {
        match serde_json::from_str::<Value>(json) {
            Ok(value) => self.add_value(&value),
            Err(_) => self.skipped_count += 1,
        }
    }

    /// Add a parsed JSON value for analysis
    pub fn add_value(&mut self, value: &Value) {
        // Sample-size bound: surplus samples are ignored
        if self.config.sample_size > 0 && self.record_count >= self.config.sample_size {
            return;
        }

        let classified = self.classify(value, 0);
        self.root = Some(match self.root.take() {
            Some(root) => root.merge_with(classified),
            None => classified,
        });
        self.record_count += 1;
    }

    /// Add a batch of parsed JSON values
    pub fn add_values(&mut self, values: &[Value]) {
        for value in values {
            self.add_value(value);
        }
    }

    /// Classify a single raw value into a schema node
    fn classify(&self, value: &Value, depth: usize) -> SchemaNode {
        if depth > self.config.max_depth {
            return SchemaNode::Any;
        }

        match value {
            Value::Null => SchemaNode::Null,
            Value::Bool(_) => SchemaNode::Boolean,
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    SchemaNode::Integer
                } else {
                    SchemaNode::Number
                }
            }
            Value::String(s) => {
                let format = if self.config.detect_formats {
                    detect_format(s)
                } else {
                    None
                };
                SchemaNode::String { format }
            }
            Value::Array(arr) => {
                let items = arr
                    .iter()
                    .map(|item| self.classify(item, depth + 1))
                    .reduce(SchemaNode::merge_with)
                    .unwrap_or(SchemaNode::Any);
                SchemaNode::array(items)
            }
            Value::Object(obj) => {
                let properties: BTreeMap<String, SchemaNode> = obj
                    .iter()
                    .map(|(key, val)| (key.clone(), self.classify(val, depth + 1)))
                    .collect();
                let required: BTreeSet<String> = properties.keys().cloned().collect();
                SchemaNode::Object {
                    properties,
                    required,
                }
            }
        }
    }

    /// Finalize inference and return the unified schema
    ///
    /// With no samples folded this is the documented degenerate case: an
    /// object with empty properties and nothing required.
    pub fn finalize(self) -> SchemaNode {
        self.root.unwrap_or_else(empty_schema)
    }

    /// Get the number of samples folded
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Get the number of samples skipped as unparseable
    pub fn skipped_count(&self) -> usize {
        self.skipped_count
    }
}

impl Default for SchemaInferrer {
    fn default() -> Self {
        Self::new()
    }
}

/// Infer a schema from a batch of parsed samples with default settings
pub fn infer_schema(samples: &[Value]) -> SchemaNode {
    let inferrer = SchemaInferrer::new();
    merge_all(samples.iter().map(|v| inferrer.classify(v, 0)))
}

#[cfg(test)]
mod tests {
    use super::super::formats::Format;
    use super::*;

    fn props(node: &SchemaNode) -> (&BTreeMap<String, SchemaNode>, &BTreeSet<String>) {
        match node {
            SchemaNode::Object {
                properties,
                required,
            } => (properties, required),
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_infer_simple_object() {
        let mut inferrer = SchemaInferrer::new();
        inferrer.add_json(r#"{"name": "Alice", "age": 30}"#);
        inferrer.add_json(r#"{"name": "Bob", "age": 25}"#);

        assert_eq!(inferrer.record_count(), 2);
        let schema = inferrer.finalize();
        let (properties, required) = props(&schema);
        assert_eq!(properties["name"], SchemaNode::string());
        assert_eq!(properties["age"], SchemaNode::Integer);
        assert!(required.contains("name"));
        assert!(required.contains("age"));
    }

    #[test]
    fn test_infer_optional_fields() {
        let mut inferrer = SchemaInferrer::new();
        inferrer.add_json(r#"{"name": "Alice", "email": "alice@example.com"}"#);
        inferrer.add_json(r#"{"name": "Bob"}"#);

        let schema = inferrer.finalize();
        let (properties, required) = props(&schema);
        assert!(properties.contains_key("email"));
        assert!(required.contains("name"));
        // email is absent from one sample
        assert!(!required.contains("email"));
    }

    #[test]
    fn test_infer_null_widens_to_union() {
        let mut inferrer = SchemaInferrer::new();
        inferrer.add_json(r#"{"a": 1}"#);
        inferrer.add_json(r#"{"a": null}"#);

        let schema = inferrer.finalize();
        let (properties, required) = props(&schema);
        assert!(required.contains("a"));
        match &properties["a"] {
            SchemaNode::Union { variants } => {
                assert_eq!(variants.len(), 2);
                assert!(variants.contains(&SchemaNode::Integer));
                assert!(variants.contains(&SchemaNode::Null));
            }
            other => panic!("expected union, got {:?}", other),
        }
    }

    #[test]
    fn test_infer_array_item_convergence() {
        let mut inferrer = SchemaInferrer::new();
        inferrer.add_json(r#"{"xs": [1, 2]}"#);
        inferrer.add_json(r#"{"xs": ["x"]}"#);

        let schema = inferrer.finalize();
        let (properties, _) = props(&schema);
        match &properties["xs"] {
            SchemaNode::Array { items } => match items.as_ref() {
                SchemaNode::Union { variants } => {
                    assert!(variants.contains(&SchemaNode::Integer));
                    assert!(variants.contains(&SchemaNode::string()));
                }
                other => panic!("expected union items, got {:?}", other),
            },
            other => panic!("expected array, got {:?}", other),
        }
    }

    #[test]
    fn test_infer_empty_array_items_any() {
        let mut inferrer = SchemaInferrer::new();
        inferrer.add_json(r#"{"xs": []}"#);

        let schema = inferrer.finalize();
        let (properties, _) = props(&schema);
        assert_eq!(properties["xs"], SchemaNode::array(SchemaNode::Any));
    }

    #[test]
    fn test_infer_nested_object() {
        let mut inferrer = SchemaInferrer::new();
        inferrer.add_json(r#"{"user": {"name": "Alice", "age": 30}}"#);

        let schema = inferrer.finalize();
        let (properties, _) = props(&schema);
        let (nested, nested_required) = props(&properties["user"]);
        assert!(nested.contains_key("name"));
        assert!(nested.contains_key("age"));
        assert_eq!(nested_required.len(), 2);
    }

    #[test]
    fn test_infer_format_detection() {
        let mut inferrer = SchemaInferrer::new();
        inferrer.add_json(
            r#"{"id": "550e8400-e29b-41d4-a716-446655440000", "at": "2024-01-15T10:30:00Z"}"#,
        );

        let schema = inferrer.finalize();
        let (properties, _) = props(&schema);
        assert_eq!(
            properties["id"],
            SchemaNode::string_with_format(Format::Uuid)
        );
        assert_eq!(
            properties["at"],
            SchemaNode::string_with_format(Format::DateTime)
        );
    }

    #[test]
    fn test_infer_format_detection_disabled() {
        let config = InferenceConfig::builder().detect_formats(false).build();
        let mut inferrer = SchemaInferrer::with_config(config);
        inferrer.add_json(r#"{"id": "550e8400-e29b-41d4-a716-446655440000"}"#);

        let schema = inferrer.finalize();
        let (properties, _) = props(&schema);
        assert_eq!(properties["id"], SchemaNode::string());
    }

    #[test]
    fn test_infer_empty_input_degenerate() {
        let inferrer = SchemaInferrer::new();
        assert_eq!(inferrer.finalize(), SchemaNode::empty_object());
    }

    #[test]
    fn test_skipped_samples() {
        let mut inferrer = SchemaInferrer::new();
        inferrer.add_json(r#"{"a": 1}"#);
        inferrer.add_json("not json at all");

        assert_eq!(inferrer.record_count(), 1);
        assert_eq!(inferrer.skipped_count(), 1);
    }

    #[test]
    fn test_sample_size_limit() {
        let config = InferenceConfig::builder().sample_size(2).build();
        let mut inferrer = SchemaInferrer::with_config(config);

        inferrer.add_json(r#"{"a": 1}"#);
        inferrer.add_json(r#"{"a": 2}"#);
        inferrer.add_json(r#"{"a": "ignored"}"#);

        assert_eq!(inferrer.record_count(), 2);
        let schema = inferrer.finalize();
        let (properties, _) = props(&schema);
        assert_eq!(properties["a"], SchemaNode::Integer);
    }

    #[test]
    fn test_max_depth_widens_to_any() {
        let config = InferenceConfig::builder().max_depth(1).build();
        let mut inferrer = SchemaInferrer::with_config(config);
        inferrer.add_json(r#"{"outer": {"inner": {"deep": 1}}}"#);

        let schema = inferrer.finalize();
        let (properties, _) = props(&schema);
        let (nested, _) = props(&properties["outer"]);
        assert_eq!(nested["inner"], SchemaNode::Any);
    }

    #[test]
    fn test_infer_schema_scalar_samples() {
        let samples = vec![serde_json::json!(1), serde_json::json!(2.5)];
        match infer_schema(&samples) {
            SchemaNode::Union { variants } => {
                assert!(variants.contains(&SchemaNode::Integer));
                assert!(variants.contains(&SchemaNode::Number));
            }
            other => panic!("expected union, got {:?}", other),
        }
    }
}
