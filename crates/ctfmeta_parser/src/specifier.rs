//! The type dispatcher.
//!
//! Routes a type specifier list (TSDL) or a materialized structure field
//! class (CTF2) to the matching declaration parser, and substitutes the
//! specialized event-header declarations when a parsed struct matches
//! one of the canonical layouts.

use ctfmeta_model::{
    ByteOrder, Declaration, DeclarationScope, Error, EventHeaderCompactDeclaration,
    EventHeaderLargeDeclaration, Result, StructDeclaration,
};

use crate::TraceContext;
use crate::enumeration;
use crate::float;
use crate::integer;
use crate::kind::NodeKind;
use crate::string;
use crate::structure;
use crate::tree::{MetadataTree, NodeId};
use crate::util;
use crate::variant;

/// Parses a type specifier list into a declaration.
///
/// The first child selects the parser: an inline type body goes to the
/// matching leaf or composite parser, while identifiers and scalar
/// keywords form an alias name that must already be registered in
/// `scope`. `pointers` contribute trailing `*` qualifiers to alias
/// names. A CTF2 structure field class dispatches on the node itself.
///
/// # Errors
/// Fails when the list is empty, an alias name is not registered, or the
/// selected parser rejects its node.
pub fn parse_type_specifier_list(
    tree: &MetadataTree,
    node: NodeId,
    pointers: &[NodeId],
    ctx: &TraceContext,
    scope: &mut DeclarationScope,
) -> Result<Declaration> {
    if tree.kind(node) == NodeKind::StructureField {
        return Ok(refine_structure(structure::parse(tree, node, ctx, scope)?));
    }
    if tree.kind(node) != NodeKind::TypeSpecifierList {
        return Err(Error::structural(format!(
            "expected a type specifier list, got {}",
            tree.kind(node)
        )));
    }
    let first = tree
        .child(node, 0)
        .ok_or_else(|| Error::structural("empty type specifier list"))?;
    match tree.kind(first) {
        NodeKind::Integer => Ok(Declaration::Integer(integer::parse(tree, first, ctx)?)),
        NodeKind::FloatingPoint => Ok(Declaration::Float(float::parse(tree, first, ctx)?)),
        NodeKind::String => Ok(Declaration::Str(string::parse(tree, first)?)),
        NodeKind::Struct => Ok(refine_structure(structure::parse(tree, first, ctx, scope)?)),
        NodeKind::Variant => Ok(Declaration::Variant(variant::parse(tree, first, ctx, scope)?)),
        NodeKind::Enum => Ok(Declaration::Enum(enumeration::parse(tree, first, ctx, scope)?)),
        NodeKind::Identifier => parse_type_declaration(tree, node, pointers, scope),
        kind if kind.is_scalar_keyword() => parse_type_declaration(tree, node, pointers, scope),
        _ => Err(util::child_type_error(tree, first)),
    }
}

/// Resolves an alias name against the scope.
///
/// # Errors
/// Fails when the rendered name has not been registered.
pub fn parse_type_declaration(
    tree: &MetadataTree,
    specifiers: NodeId,
    pointers: &[NodeId],
    scope: &mut DeclarationScope,
) -> Result<Declaration> {
    let name = type_declaration_string(tree, specifiers, pointers)?;
    scope
        .lookup_type(&name)
        .cloned()
        .ok_or_else(|| Error::unknown_type(name))
}

/// Renders a type specifier list (plus pointer qualifiers) to the
/// canonical alias name it declares or references, for example
/// `unsigned long` or `struct packet_context *`.
///
/// # Errors
/// Fails on a nameless struct, variant or enum in the list, or on a
/// specifier kind that cannot appear in an alias name.
pub fn type_declaration_string(
    tree: &MetadataTree,
    specifiers: NodeId,
    pointers: &[NodeId],
) -> Result<String> {
    let mut parts = Vec::with_capacity(tree.child_count(specifiers));
    for &child in tree.children(specifiers) {
        parts.push(specifier_text(tree, child)?);
    }
    if parts.is_empty() {
        return Err(Error::structural("empty type specifier list"));
    }
    let mut name = parts.join(" ");
    for _ in pointers {
        name.push_str(" *");
    }
    Ok(name)
}

fn specifier_text(tree: &MetadataTree, node: NodeId) -> Result<String> {
    let kind = tree.kind(node);
    if kind == NodeKind::Identifier || kind.is_scalar_keyword() {
        if let Some(text) = tree.text(node) {
            return Ok(text.to_owned());
        }
        return keyword_text(kind)
            .map(str::to_owned)
            .ok_or_else(|| Error::structural("type specifier has no text"));
    }
    match kind {
        NodeKind::Struct => prefixed_name(tree, node, NodeKind::StructName, "struct"),
        NodeKind::Variant => prefixed_name(tree, node, NodeKind::VariantName, "variant"),
        NodeKind::Enum => prefixed_name(tree, node, NodeKind::EnumName, "enum"),
        _ => Err(Error::structural(format!(
            "{kind} cannot appear in a type alias name"
        ))),
    }
}

fn prefixed_name(
    tree: &MetadataTree,
    node: NodeId,
    name_kind: NodeKind,
    prefix: &str,
) -> Result<String> {
    let name = tree
        .first_child_of_kind(node, name_kind)
        .ok_or_else(|| Error::structural(format!("nameless {prefix} in a type alias name")))?;
    Ok(format!(
        "{prefix} {}",
        structure::named_child_text(tree, name, "type name")?
    ))
}

fn keyword_text(kind: NodeKind) -> Option<&'static str> {
    Some(match kind {
        NodeKind::FloatTok => "float",
        NodeKind::IntTok => "int",
        NodeKind::LongTok => "long",
        NodeKind::ShortTok => "short",
        NodeKind::SignedTok => "signed",
        NodeKind::UnsignedTok => "unsigned",
        NodeKind::CharTok => "char",
        NodeKind::DoubleTok => "double",
        NodeKind::VoidTok => "void",
        NodeKind::BoolTok => "_Bool",
        NodeKind::ComplexTok => "_Complex",
        NodeKind::ImaginaryTok => "_Imaginary",
        NodeKind::ConstTok => "const",
        _ => return None,
    })
}

/// Substitutes a specialized event-header declaration when the struct
/// matches a canonical layout; otherwise the struct stays as parsed.
fn refine_structure(decl: StructDeclaration) -> Declaration {
    if let Some(byte_order) = header_byte_order(&decl) {
        if EventHeaderCompactDeclaration::matches(&decl) {
            return Declaration::EventHeaderCompact(EventHeaderCompactDeclaration { byte_order });
        }
        if EventHeaderLargeDeclaration::matches(&decl) {
            return Declaration::EventHeaderLarge(EventHeaderLargeDeclaration { byte_order });
        }
    }
    Declaration::Struct(decl)
}

/// The byte order every header integer shares, read off the id
/// enumeration's container.
fn header_byte_order(decl: &StructDeclaration) -> Option<ByteOrder> {
    match decl.field("id") {
        Some(Declaration::Enum(e)) => Some(e.container.byte_order),
        _ => None,
    }
}
