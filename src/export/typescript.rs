//! TypeScript declaration exporter
//!
//! Renders a schema tree as a named `interface` block. Rendering never
//! fails: unrecognized structure falls back to `any`, and a failing
//! prettifier collaborator is downgraded to a warning.

use crate::inference::{Format, SchemaNode};

use super::{GenerateOptions, Prettifier};

/// Exporter for TypeScript interface declarations
#[derive(Debug, Default)]
pub struct TypeScriptExporter;

impl TypeScriptExporter {
    /// Create a new TypeScriptExporter
    pub fn new() -> Self {
        Self
    }

    /// Render a schema as a named interface declaration
    ///
    /// When `options.prettify` is set and a prettifier is supplied, the
    /// rendered text is passed through it; on failure the unformatted
    /// text is returned and a warning is emitted.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schema_typegen::export::{GenerateOptions, TypeScriptExporter};
    /// use schema_typegen::inference::infer_schema;
    ///
    /// let samples = vec![serde_json::json!({"id": 1})];
    /// let schema = infer_schema(&samples);
    /// let text = TypeScriptExporter::new().export(&schema, &GenerateOptions::default(), None);
    /// assert!(text.starts_with("interface Generated {"));
    /// ```
    pub fn export(
        &self,
        schema: &SchemaNode,
        options: &GenerateOptions,
        prettifier: Option<&dyn Prettifier>,
    ) -> String {
        let mut output = format!(
            "interface {} {}\n",
            options.interface_name,
            render(schema, options, 0)
        );

        if options.prettify {
            if let Some(prettifier) = prettifier {
                match prettifier.format(&output) {
                    Ok(formatted) => output = formatted,
                    Err(e) => {
                        tracing::warn!("failed to prettify output, keeping unformatted text: {e}");
                    }
                }
            }
        }

        output
    }
}

fn render(schema: &SchemaNode, options: &GenerateOptions, depth: usize) -> String {
    match schema {
        SchemaNode::Null => "null".to_string(),
        SchemaNode::String {
            format: Some(Format::DateTime),
        } => "Date".to_string(),
        SchemaNode::String { .. } => "string".to_string(),
        SchemaNode::Number | SchemaNode::Integer => "number".to_string(),
        SchemaNode::Boolean => "boolean".to_string(),
        SchemaNode::Array { items } => {
            format!("{}[]", render(items, options, depth + 1))
        }
        SchemaNode::Object { properties, .. } if properties.is_empty() => {
            "Record<string, any>".to_string()
        }
        SchemaNode::Object {
            properties,
            required,
        } => {
            let indent = "  ".repeat(depth + 1);
            let mut output = String::from("{\n");
            for (name, value) in properties {
                let optional_marker = if options.infer_optional && !required.contains(name) {
                    "?"
                } else {
                    ""
                };
                output.push_str(&format!(
                    "{indent}{name}{optional_marker}: {};\n",
                    render(value, options, depth + 1)
                ));
            }
            output.push_str(&"  ".repeat(depth));
            output.push('}');
            output
        }
        SchemaNode::Union { variants } => variants
            .iter()
            .map(|variant| render(variant, options, depth))
            .collect::<Vec<_>>()
            .join(" | "),
        SchemaNode::Any => "any".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    fn object(fields: &[(&str, SchemaNode)], required: &[&str]) -> SchemaNode {
        SchemaNode::Object {
            properties: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            required: required.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn options(infer_optional: bool) -> GenerateOptions {
        GenerateOptions {
            infer_optional,
            interface_name: "Sample".to_string(),
            prettify: false,
        }
    }

    #[test]
    fn test_render_primitives() {
        let schema = object(
            &[
                ("a", SchemaNode::string()),
                ("b", SchemaNode::Integer),
                ("c", SchemaNode::Number),
                ("d", SchemaNode::Boolean),
                ("e", SchemaNode::Null),
            ],
            &["a", "b", "c", "d", "e"],
        );
        let text = TypeScriptExporter::new().export(&schema, &options(true), None);
        assert!(text.contains("a: string;"));
        assert!(text.contains("b: number;"));
        assert!(text.contains("c: number;"));
        assert!(text.contains("d: boolean;"));
        assert!(text.contains("e: null;"));
    }

    #[test]
    fn test_render_date_format() {
        let schema = object(
            &[("at", SchemaNode::string_with_format(Format::DateTime))],
            &["at"],
        );
        let text = TypeScriptExporter::new().export(&schema, &options(true), None);
        assert!(text.contains("at: Date;"));
    }

    #[test]
    fn test_render_uuid_stays_string() {
        let schema = object(
            &[("id", SchemaNode::string_with_format(Format::Uuid))],
            &["id"],
        );
        let text = TypeScriptExporter::new().export(&schema, &options(true), None);
        assert!(text.contains("id: string;"));
    }

    #[test]
    fn test_optional_marker_iff_not_required() {
        let schema = object(
            &[("id", SchemaNode::Integer), ("extra", SchemaNode::Boolean)],
            &["id"],
        );
        let text = TypeScriptExporter::new().export(&schema, &options(true), None);
        assert!(text.contains("id: number;"));
        assert!(text.contains("extra?: boolean;"));

        // Markers are suppressed when infer_optional is off
        let text = TypeScriptExporter::new().export(&schema, &options(false), None);
        assert!(text.contains("extra: boolean;"));
        assert!(!text.contains('?'));
    }

    #[test]
    fn test_render_nested_indentation() {
        let inner = object(&[("name", SchemaNode::string())], &["name"]);
        let schema = object(&[("user", inner)], &["user"]);
        let text = TypeScriptExporter::new().export(&schema, &options(true), None);
        assert_eq!(
            text,
            "interface Sample {\n  user: {\n    name: string;\n  };\n}\n"
        );
    }

    #[test]
    fn test_render_arrays() {
        let schema = object(
            &[
                ("tags", SchemaNode::array(SchemaNode::string())),
                ("blob", SchemaNode::array(SchemaNode::Any)),
            ],
            &["tags", "blob"],
        );
        let text = TypeScriptExporter::new().export(&schema, &options(true), None);
        assert!(text.contains("tags: string[];"));
        assert!(text.contains("blob: any[];"));
    }

    #[test]
    fn test_render_union_in_variant_order() {
        let schema = object(
            &[(
                "v",
                SchemaNode::Union {
                    variants: vec![SchemaNode::string(), SchemaNode::Integer, SchemaNode::Null],
                },
            )],
            &["v"],
        );
        let text = TypeScriptExporter::new().export(&schema, &options(true), None);
        assert!(text.contains("v: string | number | null;"));
    }

    #[test]
    fn test_render_empty_object_is_record() {
        let schema = object(&[("meta", SchemaNode::empty_object())], &["meta"]);
        let text = TypeScriptExporter::new().export(&schema, &options(true), None);
        assert!(text.contains("meta: Record<string, any>;"));
    }

    #[test]
    fn test_render_any() {
        let schema = object(&[("x", SchemaNode::Any)], &["x"]);
        let text = TypeScriptExporter::new().export(&schema, &options(true), None);
        assert!(text.contains("x: any;"));
    }

    struct FailingPrettifier;

    impl Prettifier for FailingPrettifier {
        fn format(&self, _source: &str) -> anyhow::Result<String> {
            anyhow::bail!("formatter unavailable")
        }
    }

    struct UppercasePrettifier;

    impl Prettifier for UppercasePrettifier {
        fn format(&self, source: &str) -> anyhow::Result<String> {
            Ok(source.to_uppercase())
        }
    }

    #[test]
    fn test_prettifier_failure_keeps_raw_text() {
        let schema = object(&[("id", SchemaNode::Integer)], &["id"]);
        let opts = GenerateOptions {
            prettify: true,
            ..options(true)
        };
        let text = TypeScriptExporter::new().export(&schema, &opts, Some(&FailingPrettifier));
        assert!(text.contains("id: number;"));
    }

    #[test]
    fn test_prettifier_applied_when_available() {
        let schema = object(&[("id", SchemaNode::Integer)], &["id"]);
        let opts = GenerateOptions {
            prettify: true,
            ..options(true)
        };
        let text = TypeScriptExporter::new().export(&schema, &opts, Some(&UppercasePrettifier));
        assert!(text.contains("ID: NUMBER;"));
    }
}
