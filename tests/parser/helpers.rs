//! Shared TSDL tree-building helpers.
//!
//! Building trees by hand stands in for the grammar front end; these
//! helpers keep the individual tests readable.

use ctfmeta_parser::{NodeId, NodeKind, TreeBuilder};

/// Adds a `key = value;` attribute expression under `parent`.
pub fn attribute(b: &mut TreeBuilder, parent: NodeId, key: &str, kind: NodeKind, value: &str) {
    let e = b.add(parent, NodeKind::CtfExpressionVal);
    let left = b.add(e, NodeKind::CtfLeft);
    b.add_text(left, NodeKind::UnaryExpressionString, key);
    let right = b.add(e, NodeKind::CtfRight);
    b.add_text(right, kind, value);
}

/// Adds an `integer { size = ...; ... }` specifier under `parent`.
pub fn integer(b: &mut TreeBuilder, parent: NodeId, size: &str) -> NodeId {
    let node = b.add(parent, NodeKind::Integer);
    attribute(b, node, "size", NodeKind::UnaryExpressionDec, size);
    node
}

/// Adds a member declaration naming an aliased type, e.g. `uint32_t x;`.
pub fn aliased_member(b: &mut TreeBuilder, body: NodeId, type_name: &str, field_name: &str) {
    let m = b.add(body, NodeKind::StructOrVariantDeclaration);
    let tsl = b.add(m, NodeKind::TypeSpecifierList);
    b.add_text(tsl, NodeKind::Identifier, type_name);
    declarator(b, m, field_name);
}

/// Adds a member declaration with an inline type; returns the type
/// specifier list for the caller to populate.
pub fn inline_member(b: &mut TreeBuilder, body: NodeId, field_name: &str) -> NodeId {
    let m = b.add(body, NodeKind::StructOrVariantDeclaration);
    let tsl = b.add(m, NodeKind::TypeSpecifierList);
    declarator(b, m, field_name);
    tsl
}

fn declarator(b: &mut TreeBuilder, member: NodeId, field_name: &str) {
    let tdl = b.add(member, NodeKind::TypeDeclaratorList);
    let td = b.add(tdl, NodeKind::TypeDeclarator);
    b.add_text(td, NodeKind::Identifier, field_name);
}

/// Adds a `typealias integer { size = N; } := NAME;` statement.
pub fn integer_typealias(b: &mut TreeBuilder, parent: NodeId, size: &str, name: &str) -> NodeId {
    let node = b.add(parent, NodeKind::Typealias);
    let target = b.add(node, NodeKind::TypealiasTarget);
    let tsl = b.add(target, NodeKind::TypeSpecifierList);
    integer(b, tsl, size);
    let alias = b.add(node, NodeKind::TypealiasAlias);
    let alias_tsl = b.add(alias, NodeKind::TypeSpecifierList);
    b.add_text(alias_tsl, NodeKind::Identifier, name);
    node
}
