//! The schema tree shared by the inference engine, the column adapter
//! and both renderers

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::formats::Format;

/// One inferred or declared structural shape
///
/// The single recursive entity in the system. Serialized form is tagged
/// with `kind` over the closed vocabulary
/// `null | string | number | integer | boolean | array | object | union | any`,
/// which is the interchange shape between the inference engine / column
/// adapter and the renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SchemaNode {
    /// Null type
    Null,
    /// Boolean type
    Boolean,
    /// Integer type (whole numbers)
    Integer,
    /// Number type (floating point)
    Number,
    /// String type with optional format refinement
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<Format>,
    },
    /// Array type with a single running element type
    Array { items: Box<SchemaNode> },
    /// Object type with named properties and the set of names present
    /// in every merged sample
    Object {
        properties: BTreeMap<String, SchemaNode>,
        #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
        required: BTreeSet<String>,
    },
    /// Union of structurally distinct alternatives
    Union { variants: Vec<SchemaNode> },
    /// Unknown or unobserved structure; the identity element of merge
    Any,
}

impl SchemaNode {
    /// Plain string with no format refinement
    pub fn string() -> Self {
        SchemaNode::String { format: None }
    }

    /// String refined by a format tag
    pub fn string_with_format(format: Format) -> Self {
        SchemaNode::String {
            format: Some(format),
        }
    }

    /// Array of the given element type
    pub fn array(items: SchemaNode) -> Self {
        SchemaNode::Array {
            items: Box::new(items),
        }
    }

    /// Object with no known properties (opaque or empty)
    pub fn empty_object() -> Self {
        SchemaNode::Object {
            properties: BTreeMap::new(),
            required: BTreeSet::new(),
        }
    }

    /// Get the kind tag name
    pub fn kind_name(&self) -> &'static str {
        match self {
            SchemaNode::Null => "null",
            SchemaNode::Boolean => "boolean",
            SchemaNode::Integer => "integer",
            SchemaNode::Number => "number",
            SchemaNode::String { .. } => "string",
            SchemaNode::Array { .. } => "array",
            SchemaNode::Object { .. } => "object",
            SchemaNode::Union { .. } => "union",
            SchemaNode::Any => "any",
        }
    }

    /// Merge this node with another, widening as needed
    ///
    /// Pure: consumes both inputs and returns a new node. Commutative and
    /// associative up to the ordering of union variants, so folding a
    /// sample batch in any order observes the same set of types.
    pub fn merge_with(self, other: SchemaNode) -> SchemaNode {
        if self == other {
            return self;
        }

        match (self, other) {
            // Any + X = X
            (SchemaNode::Any, other) | (other, SchemaNode::Any) => other,

            // Equal formats survive the merge, differing formats are
            // dropped back to a plain string
            (SchemaNode::String { format: f1 }, SchemaNode::String { format: f2 }) => {
                SchemaNode::String {
                    format: if f1 == f2 { f1 } else { None },
                }
            }

            // Arrays merge their running element types
            (SchemaNode::Array { items: a }, SchemaNode::Array { items: b }) => SchemaNode::Array {
                items: Box::new((*a).merge_with(*b)),
            },

            // Objects merge by property union; required is the
            // intersection of both sides' required sets
            (
                SchemaNode::Object {
                    properties: mut p1,
                    required: r1,
                },
                SchemaNode::Object {
                    properties: p2,
                    required: r2,
                },
            ) => {
                for (key, node2) in p2 {
                    let merged = match p1.remove(&key) {
                        Some(node1) => node1.merge_with(node2),
                        None => node2,
                    };
                    p1.insert(key, merged);
                }
                SchemaNode::Object {
                    properties: p1,
                    required: r1.intersection(&r2).cloned().collect(),
                }
            }

            // Unions flatten and absorb
            (SchemaNode::Union { variants }, other) | (other, SchemaNode::Union { variants }) => {
                SchemaNode::Union {
                    variants: absorb_variant(variants, other),
                }
            }

            // Differing kinds (null included) widen to a union
            (a, b) => SchemaNode::Union {
                variants: absorb_variant(vec![a], b),
            },
        }
    }
}

/// Fold a node into a variant list, keeping the union invariants
///
/// Nested unions are flattened; a node that shares a structural family
/// with an existing variant is merged into it (so no two variants are
/// deep-equal and unions stay stable under merge order).
fn absorb_variant(variants: Vec<SchemaNode>, node: SchemaNode) -> Vec<SchemaNode> {
    match node {
        SchemaNode::Union { variants: nested } => nested.into_iter().fold(variants, absorb_variant),
        node => {
            let mut variants = variants;
            if let Some(pos) = variants.iter().position(|v| same_family(v, &node)) {
                let existing = variants.remove(pos);
                variants.insert(pos, existing.merge_with(node));
            } else {
                variants.push(node);
            }
            variants
        }
    }
}

/// Whether two nodes merge without widening to a union
fn same_family(a: &SchemaNode, b: &SchemaNode) -> bool {
    matches!(
        (a, b),
        (SchemaNode::Null, SchemaNode::Null)
            | (SchemaNode::Boolean, SchemaNode::Boolean)
            | (SchemaNode::Integer, SchemaNode::Integer)
            | (SchemaNode::Number, SchemaNode::Number)
            | (SchemaNode::String { .. }, SchemaNode::String { .. })
            | (SchemaNode::Array { .. }, SchemaNode::Array { .. })
            | (SchemaNode::Object { .. }, SchemaNode::Object { .. })
            | (SchemaNode::Any, SchemaNode::Any)
    )
}
