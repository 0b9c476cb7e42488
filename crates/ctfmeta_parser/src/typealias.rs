//! Typealias declaration and resolution.
//!
//! Covers three node shapes: a TSDL `typealias TARGET := ALIAS;`
//! statement, a CTF2 field-class-alias fragment, and a CTF2 member whose
//! field class is either an inline object or a string referencing an
//! earlier alias.

use ctfmeta_model::{Declaration, DeclarationScope, Error, Result};

use crate::TraceContext;
use crate::blob;
use crate::enumeration;
use crate::integer;
use crate::json::field_class;
use crate::kind::NodeKind;
use crate::specifier;
use crate::string;
use crate::structure;
use crate::tree::{MetadataTree, NodeId};
use crate::util;
use crate::variant;

/// Parses a typealias-shaped node and returns the aliased declaration.
///
/// TSDL statements and CTF2 field-class-alias fragments register the
/// result under the alias name in the current scope frame. A CTF2 member
/// is classified without registering; a string field class resolves
/// against the field-class-alias fragments declared earlier in the same
/// document.
///
/// # Errors
/// Fails on a malformed alias shape, a typealias targeting an untagged
/// variant, an unresolvable alias reference, or a duplicate alias name
/// in the current scope frame.
pub fn parse(
    tree: &MetadataTree,
    node: NodeId,
    ctx: &TraceContext,
    scope: &mut DeclarationScope,
) -> Result<Declaration> {
    match tree.kind(node) {
        NodeKind::Typealias => parse_statement(tree, node, ctx, scope),
        NodeKind::FieldClassAlias => {
            let name = tree
                .field_class_alias(node)
                .ok_or_else(|| Error::structural("field-class-alias node has no payload"))?
                .name
                .clone();
            let body = tree
                .child(node, 0)
                .ok_or_else(|| Error::structural("field-class-alias node has no body"))?;
            let declaration = classify(tree, body, ctx, scope)?;
            scope.register_type(&name, declaration.clone())?;
            Ok(declaration)
        }
        NodeKind::StructureFieldMember => classify(tree, node, ctx, scope),
        other => Err(Error::structural(format!(
            "expected a typealias, got {other}"
        ))),
    }
}

fn parse_statement(
    tree: &MetadataTree,
    node: NodeId,
    ctx: &TraceContext,
    scope: &mut DeclarationScope,
) -> Result<Declaration> {
    let mut target = None;
    let mut alias = None;
    for &child in tree.children(node) {
        match tree.kind(child) {
            NodeKind::TypealiasTarget => target = Some(child),
            NodeKind::TypealiasAlias => alias = Some(child),
            _ => return Err(util::child_type_error(tree, child)),
        }
    }
    let target = target.ok_or_else(|| Error::structural("typealias has no target"))?;
    let alias = alias.ok_or_else(|| Error::structural("typealias has no alias"))?;

    let declaration = parse_target(tree, target, ctx, scope)?;
    if let Declaration::Variant(v) = &declaration {
        if !v.is_tagged() {
            return Err(Error::semantic(
                "typealias of an untagged variant is not permitted",
            ));
        }
    }
    let name = parse_alias(tree, alias)?;
    scope.register_type(&name, declaration.clone())?;
    Ok(declaration)
}

/// Parses the target side: a type specifier list plus at most one
/// declarator contributing pointer qualifiers.
fn parse_target(
    tree: &MetadataTree,
    node: NodeId,
    ctx: &TraceContext,
    scope: &mut DeclarationScope,
) -> Result<Declaration> {
    let specifiers = tree
        .first_child_of_kind(node, NodeKind::TypeSpecifierList)
        .ok_or_else(|| Error::structural("typealias target has no type specifier list"))?;
    let mut pointers = Vec::new();
    if let Some(declarators) = tree.first_child_of_kind(node, NodeKind::TypeDeclaratorList) {
        if tree.child_count(declarators) > 1 {
            return Err(Error::semantic(
                "only one type declarator is allowed in a typealias target",
            ));
        }
        if let Some(declarator) = tree.child(declarators, 0) {
            pointers.extend(
                tree.children(declarator)
                    .iter()
                    .copied()
                    .filter(|&c| tree.kind(c) == NodeKind::Pointer),
            );
        }
    }
    specifier::parse_type_specifier_list(tree, specifiers, &pointers, ctx, scope)
}

/// Renders the alias side to its canonical name, for example
/// `unsigned long` or `uint8_t *`.
fn parse_alias(tree: &MetadataTree, node: NodeId) -> Result<String> {
    let mut specifiers = None;
    let mut pointers = Vec::new();
    for &child in tree.children(node) {
        match tree.kind(child) {
            NodeKind::TypeSpecifierList => specifiers = Some(child),
            NodeKind::TypeDeclaratorList => {
                if tree.child_count(child) > 1 {
                    return Err(Error::semantic(
                        "only one type declarator is allowed in a typealias alias",
                    ));
                }
                if let Some(declarator) = tree.child(child, 0) {
                    for &part in tree.children(declarator) {
                        match tree.kind(part) {
                            NodeKind::Pointer => pointers.push(part),
                            NodeKind::Identifier => {
                                return Err(Error::semantic(format!(
                                    "identifier ({}) not expected in a typealias alias",
                                    tree.text(part).unwrap_or_default()
                                )));
                            }
                            _ => return Err(util::child_type_error(tree, part)),
                        }
                    }
                }
            }
            _ => return Err(util::child_type_error(tree, child)),
        }
    }
    let specifiers =
        specifiers.ok_or_else(|| Error::structural("typealias alias has no type specifier list"))?;
    specifier::type_declaration_string(tree, specifiers, &pointers)
}

/// Classifies a CTF2 member by its field-class type tag.
fn classify(
    tree: &MetadataTree,
    node: NodeId,
    ctx: &TraceContext,
    scope: &mut DeclarationScope,
) -> Result<Declaration> {
    let member = tree
        .member(node)
        .ok_or_else(|| Error::structural("member node has no payload"))?;

    if let Some(reference) = member.field_class.as_str() {
        let body = resolve_alias_reference(tree, node, reference)?;
        return structure::member_declaration(tree, body, ctx, scope);
    }

    match member.type_tag() {
        Some(
            field_class::FIXED_UNSIGNED_INTEGER
            | field_class::FIXED_SIGNED_INTEGER
            | field_class::VARIABLE_UNSIGNED_INTEGER
            | field_class::VARIABLE_SIGNED_INTEGER,
        ) => Ok(Declaration::Integer(integer::parse(tree, node, ctx)?)),
        Some(field_class::NULL_TERMINATED_STRING) => {
            Ok(Declaration::Str(string::parse(tree, node)?))
        }
        Some(field_class::STATIC_LENGTH_BLOB) => Ok(Declaration::Blob(blob::parse(tree, node)?)),
        Some(field_class::FIXED_UNSIGNED_ENUMERATION) => {
            Ok(Declaration::Enum(enumeration::parse(tree, node, ctx, scope)?))
        }
        Some(field_class::VARIANT) => {
            Ok(Declaration::Variant(variant::parse(tree, node, ctx, scope)?))
        }
        Some(field_class::STRUCTURE) => {
            let nested = tree
                .first_child_of_kind(node, NodeKind::StructureField)
                .ok_or_else(|| Error::structural("structure member has no structure child"))?;
            specifier::parse_type_specifier_list(tree, nested, &[], ctx, scope)
        }
        Some(other) => Err(Error::semantic(format!("invalid field class: {other}"))),
        None => Err(Error::structural("field class has no type tag")),
    }
}

/// Finds the body of the field-class-alias fragment named `reference`,
/// scanning the document root the member belongs to.
fn resolve_alias_reference(
    tree: &MetadataTree,
    node: NodeId,
    reference: &str,
) -> Result<NodeId> {
    let mut root = node;
    while let Some(parent) = tree.parent(root) {
        root = parent;
    }
    for &fragment in tree.children(root) {
        if let Some(alias) = tree.field_class_alias(fragment) {
            if alias.name == reference {
                return tree
                    .child(fragment, 0)
                    .ok_or_else(|| Error::structural("field-class-alias node has no body"));
            }
        }
    }
    Err(Error::semantic(format!(
        "no previously occurring field class alias named {reference}"
    )))
}
