//! Column-metadata adapter
//!
//! Builds an object schema directly from declared per-column
//! descriptors. The structure is declared, not inferred, so there is
//! exactly one "sample" and no merging.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::ImportError;
use crate::inference::{Format, SchemaNode};

/// One declared column of a tabular source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,
    /// Native type tag as reported by the source (e.g. "VARCHAR(100)",
    /// "timestamptz", "_int4", "ARRAY<bigint>")
    #[serde(alias = "nativeType", alias = "data_type")]
    pub native_type: String,
    /// Whether the column allows NULL values (default: true)
    #[serde(default = "default_true")]
    pub nullable: bool,
}

fn default_true() -> bool {
    true
}

impl ColumnDescriptor {
    /// Create a new descriptor for a nullable column
    pub fn new(name: impl Into<String>, native_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            native_type: native_type.into(),
            nullable: true,
        }
    }

    /// Mark the column NOT NULL
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// Build an object schema from a declared column list
///
/// `required` collects the names of NOT NULL columns. An empty column
/// list means the declared table does not exist and fails with
/// [`ImportError::NotFound`] naming the table.
pub fn schema_from_columns(
    table: &str,
    columns: &[ColumnDescriptor],
) -> Result<SchemaNode, ImportError> {
    if columns.is_empty() {
        return Err(ImportError::NotFound(table.to_string()));
    }

    let mut properties = BTreeMap::new();
    let mut required = BTreeSet::new();

    for column in columns {
        properties.insert(column.name.clone(), map_native_type(&column.native_type));
        if !column.nullable {
            required.insert(column.name.clone());
        }
    }

    Ok(SchemaNode::Object {
        properties,
        required,
    })
}

/// Map a native type tag to the canonical kind vocabulary
///
/// Total: unrecognized tags resolve to a plain string rather than
/// failing. Array conventions (`_elem` udt names, `ARRAY<elem>`,
/// `elem[]`) recurse into the element tag.
pub fn map_native_type(native: &str) -> SchemaNode {
    let tag = native.trim().to_lowercase();

    // Postgres udt names report arrays with a leading underscore
    if let Some(element) = tag.strip_prefix('_') {
        return SchemaNode::array(map_native_type(element));
    }
    if let Some(rest) = tag.strip_prefix("array<") {
        if let Some(element) = rest.strip_suffix('>') {
            return SchemaNode::array(map_native_type(element));
        }
    }
    if let Some(element) = tag.strip_suffix("[]") {
        return SchemaNode::array(map_native_type(element));
    }

    if contains_any(&tag, &["char", "text", "clob"]) {
        return SchemaNode::string();
    }
    if contains_any(&tag, &["int", "serial", "long"]) {
        return SchemaNode::Integer;
    }
    if contains_any(&tag, &["float", "double", "num", "decimal", "real"]) {
        return SchemaNode::Number;
    }
    if tag.contains("bool") {
        return SchemaNode::Boolean;
    }
    if contains_any(&tag, &["date", "time"]) {
        return SchemaNode::string_with_format(Format::DateTime);
    }
    if tag.contains("uuid") {
        return SchemaNode::string_with_format(Format::Uuid);
    }
    if tag.contains("json") {
        // Opaque object: the column is structured but its shape is not
        // declared in the metadata
        return SchemaNode::empty_object();
    }
    if contains_any(&tag, &["bytea", "blob", "binary"]) {
        return SchemaNode::string_with_format(Format::Binary);
    }

    // Safe, lossless fallback
    SchemaNode::string()
}

fn contains_any(tag: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| tag.contains(needle))
}
