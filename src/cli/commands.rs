//! CLI command handlers for schema generation

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::cli::CliError;
use crate::export::normalize::{normalize_declaration, normalize_validation_document};
use crate::export::{GenerateOptions, JsonSchemaExporter, TypeScriptExporter};
use crate::import::{ColumnDescriptor, schema_from_columns};
use crate::inference::{InferenceConfig, SchemaInferrer, SchemaNode};

/// Data source for a generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// JSON samples from a file or inline string
    Json,
    /// Declared column descriptors from a file
    Columns,
}

/// Output target form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// TypeScript interface declaration
    Typescript,
    /// JSON Schema validation document
    JsonSchema,
}

/// A synthetic field spliced into the schema before rendering
///
/// `field_type` accepts `string`, `number`, `integer`, `boolean`,
/// `object` and the `array_<element>` forms.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CustomField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

/// Arguments for the generate command
pub struct GenerateArgs {
    /// Data source kind
    pub source: Source,
    /// Input file (JSON samples or column descriptors)
    pub file: Option<PathBuf>,
    /// Direct JSON input string
    pub json_input: Option<String>,
    /// Table name for the columns source (used in error messages)
    pub table: Option<String>,
    /// Output target form
    pub output: OutputFormat,
    /// Name for the generated interface / schema title
    pub interface_name: String,
    /// Emit optional markers for non-required properties
    pub infer_optional: bool,
    /// Maximum samples to fold (0 = all)
    pub sample_size: usize,
    /// Custom fields to splice into the schema before rendering
    pub custom_fields: Vec<CustomField>,
    /// Prettify output
    pub prettify: bool,
    /// Output file path (stdout if not provided)
    pub out_file: Option<PathBuf>,
}

/// Handle the generate command
pub fn handle_generate(args: &GenerateArgs) -> Result<(), CliError> {
    let mut schema = match args.source {
        Source::Json => infer_from_samples(args)?,
        Source::Columns => adapt_from_columns(args)?,
    };

    apply_custom_fields(&mut schema, &args.custom_fields);

    let options = GenerateOptions {
        infer_optional: args.infer_optional,
        interface_name: args.interface_name.clone(),
        prettify: args.prettify,
    };

    let output = match args.output {
        OutputFormat::Typescript => {
            let rendered = TypeScriptExporter::new().export(&schema, &options, None);
            normalize_declaration(&rendered)
        }
        OutputFormat::JsonSchema => {
            let rendered = JsonSchemaExporter::new().export(&schema, &options)?;
            normalize_validation_document(&rendered, options.prettify)
        }
    };

    if let Some(ref out_file) = args.out_file {
        if let Some(parent) = out_file.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(out_file, &output)?;
        eprintln!("Output written to: {}", out_file.display());
    } else {
        println!("{output}");
    }

    Ok(())
}

/// Infer a schema from JSON samples (file or inline string)
fn infer_from_samples(args: &GenerateArgs) -> Result<SchemaNode, CliError> {
    let text = match (&args.json_input, &args.file) {
        (Some(json), _) => json.clone(),
        (None, Some(file)) => std::fs::read_to_string(file)?,
        (None, None) => {
            return Err(CliError::Input(
                "JSON source selected but no input data or file was provided".to_string(),
            ));
        }
    };

    let value: Value = serde_json::from_str(&text)?;
    // A top-level array is a sample sequence; anything else is one sample
    let samples = match value {
        Value::Array(items) => items,
        other => vec![other],
    };

    let config = InferenceConfig::builder()
        .sample_size(args.sample_size)
        .build();
    let mut inferrer = SchemaInferrer::with_config(config);
    inferrer.add_values(&samples);

    eprintln!("Samples analyzed: {}", inferrer.record_count());
    Ok(inferrer.finalize())
}

/// Adapt a schema from a column-descriptor file (JSON or YAML)
fn adapt_from_columns(args: &GenerateArgs) -> Result<SchemaNode, CliError> {
    let file = args.file.as_ref().ok_or_else(|| {
        CliError::Input("Columns source selected but no descriptor file was provided".to_string())
    })?;

    let text = std::fs::read_to_string(file)?;
    let columns: Vec<ColumnDescriptor> = if is_yaml(file) {
        serde_yaml::from_str(&text)?
    } else {
        serde_json::from_str(&text)?
    };

    let table = args
        .table
        .as_deref()
        .unwrap_or_else(|| file_stem(file))
        .to_string();

    eprintln!("Columns declared for '{}': {}", table, columns.len());
    Ok(schema_from_columns(&table, &columns)?)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn file_stem(path: &Path) -> &str {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("table")
}

/// Splice custom fields into a completed object schema
///
/// Fields are added to `properties` only, never to `required`. A
/// non-object root cannot take custom fields; they are warned about and
/// ignored.
pub fn apply_custom_fields(schema: &mut SchemaNode, fields: &[CustomField]) {
    if fields.is_empty() {
        return;
    }

    match schema {
        SchemaNode::Object { properties, .. } => {
            for field in fields {
                properties.insert(field.name.clone(), custom_field_node(&field.field_type));
            }
        }
        _ => {
            tracing::warn!(
                "custom fields can only be added to an object schema; ignoring {} field(s)",
                fields.len()
            );
        }
    }
}

fn custom_field_node(type_tag: &str) -> SchemaNode {
    if let Some(element) = type_tag.strip_prefix("array_") {
        return SchemaNode::array(custom_field_node(element));
    }
    match type_tag {
        "string" => SchemaNode::string(),
        "number" => SchemaNode::Number,
        "integer" => SchemaNode::Integer,
        "boolean" => SchemaNode::Boolean,
        "object" => SchemaNode::empty_object(),
        _ => SchemaNode::Any,
    }
}
