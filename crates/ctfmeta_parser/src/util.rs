//! Validation helpers shared across the parsers.

use ctfmeta_model::Error;

use crate::kind::NodeKind;
use crate::literal;
use crate::tree::{MetadataTree, NodeId};

/// Whether the node is an unquoted unary string.
#[must_use]
pub fn is_unary_string(tree: &MetadataTree, node: NodeId) -> bool {
    tree.kind(node) == NodeKind::UnaryExpressionString
}

/// Whether the node is a unary string, quoted or not.
#[must_use]
pub fn is_any_unary_string(tree: &MetadataTree, node: NodeId) -> bool {
    matches!(
        tree.kind(node),
        NodeKind::UnaryExpressionString | NodeKind::UnaryExpressionStringQuotes
    )
}

/// Whether the node is a unary integer literal of any base.
#[must_use]
pub fn is_unary_integer(tree: &MetadataTree, node: NodeId) -> bool {
    matches!(
        tree.kind(node),
        NodeKind::UnaryExpressionDec | NodeKind::UnaryExpressionHex | NodeKind::UnaryExpressionOct
    )
}

/// Concatenates a chain of unary strings into one dotted/arrowed path.
///
/// The first node contributes its text verbatim; each following node is
/// prefixed with `.` or `->` depending on the link kind recorded as its
/// first child.
///
/// # Errors
/// Fails when a node is not a unary string or a link kind is missing.
pub fn concatenate_unary_strings(
    tree: &MetadataTree,
    nodes: &[NodeId],
) -> ctfmeta_model::Result<String> {
    let (first, rest) = nodes
        .split_first()
        .ok_or_else(|| Error::structural("empty unary string chain"))?;
    let mut path = literal::parse_unary_string(tree, *first)?;
    for &node in rest {
        let link = tree
            .child(node, 0)
            .ok_or_else(|| Error::structural("chained unary string has no link"))?;
        match tree.kind(link) {
            NodeKind::Arrow => path.push_str("->"),
            NodeKind::Dot => path.push('.'),
            other => {
                return Err(Error::structural(format!(
                    "expected a path link, got {other}"
                )));
            }
        }
        // A chained node holds [link, value]; bare text means a malformed
        // front end, but tolerate it.
        let value = if tree.text(node).is_some() {
            node
        } else {
            tree.child(node, 1)
                .ok_or_else(|| Error::structural("chained unary string has no value"))?
        };
        path.push_str(&literal::parse_unary_string(tree, value)?);
    }
    Ok(path)
}

/// Walks the attribute expressions under a type body and yields each
/// `(key, value-node)` pair. The key is the concatenated left-hand path;
/// the value node is the `CtfRight` side.
///
/// # Errors
/// Fails when a child is not an attribute expression or a key is missing
/// or not string-valued.
pub fn attribute_expressions(
    tree: &MetadataTree,
    node: NodeId,
) -> ctfmeta_model::Result<Vec<(String, NodeId)>> {
    let mut pairs = Vec::with_capacity(tree.child_count(node));
    for &expr in tree.children(node) {
        if tree.kind(expr) != NodeKind::CtfExpressionVal {
            return Err(child_type_error(tree, expr));
        }
        let left = tree
            .first_child_of_kind(expr, NodeKind::CtfLeft)
            .ok_or_else(|| Error::structural("attribute expression has no key"))?;
        let right = tree
            .first_child_of_kind(expr, NodeKind::CtfRight)
            .ok_or_else(|| Error::structural("attribute expression has no value"))?;
        let first_key = tree
            .child(left, 0)
            .ok_or_else(|| Error::structural("attribute expression has an empty key"))?;
        if !is_any_unary_string(tree, first_key) {
            return Err(Error::structural(
                "left side of an attribute expression must be a string",
            ));
        }
        pairs.push((concatenate_unary_strings(tree, tree.children(left))?, right));
    }
    Ok(pairs)
}

/// Builds the error for a child node appearing under a parent that cannot
/// accept its kind.
#[must_use]
pub fn child_type_error(tree: &MetadataTree, child: NodeId) -> Error {
    let parent = tree
        .parent(child)
        .map_or_else(|| NodeKind::Root.to_string(), |p| tree.kind(p).to_string());
    Error::unexpected_child(parent, tree.kind(child).to_string())
}
