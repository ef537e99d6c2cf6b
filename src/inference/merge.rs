//! Folding per-sample schema nodes into one unified tree
//!
//! Each sample classifies to its own [`SchemaNode`]; the fold widens them
//! pairwise, left to right, into the minimum tree that covers every
//! sample. Arrival order never changes the set of observed types, only
//! the pre-normalization ordering of union variants.

use super::types::SchemaNode;

/// The degenerate schema for an empty sample set
///
/// An empty collection is described as an object with no known
/// properties and nothing required.
pub fn empty_schema() -> SchemaNode {
    SchemaNode::empty_object()
}

/// Merge two nodes into their widened combination
pub fn merge_nodes(a: SchemaNode, b: SchemaNode) -> SchemaNode {
    a.merge_with(b)
}

/// Fold a batch of per-sample nodes into a single schema
///
/// Returns the degenerate empty-object schema for an empty batch.
pub fn merge_all<I>(nodes: I) -> SchemaNode
where
    I: IntoIterator<Item = SchemaNode>,
{
    nodes
        .into_iter()
        .reduce(SchemaNode::merge_with)
        .unwrap_or_else(empty_schema)
}
