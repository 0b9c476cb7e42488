//! Variant field-class parser.

use ctfmeta_model::{Declaration, DeclarationScope, Error, Result, VariantDeclaration};

use crate::TraceContext;
use crate::json::field_class;
use crate::kind::NodeKind;
use crate::structure;
use crate::tree::{MetadataTree, NodeId};
use crate::typealias;
use crate::util;

/// Parses a variant from either syntax.
///
/// TSDL: `variant name <tag> { members }`. The tag is optional here; an
/// untagged variant is only rejected where it cannot acquire one, which
/// the typealias parser enforces. Named variants register and resolve
/// like named structs.
///
/// CTF2: a member whose field class is a variant; its options were
/// materialized as member children. CTF2 selectors are location-based
/// rather than name-based, so the result is untagged.
///
/// # Errors
/// Fails on a missing body with no resolvable name, a duplicate member
/// name, or an empty option list.
pub fn parse(
    tree: &MetadataTree,
    node: NodeId,
    ctx: &TraceContext,
    scope: &mut DeclarationScope,
) -> Result<VariantDeclaration> {
    if tree.kind(node) == NodeKind::StructureFieldMember {
        return from_member(tree, node, ctx, scope);
    }
    if tree.kind(node) != NodeKind::Variant {
        return Err(Error::structural(format!(
            "expected a variant specifier, got {}",
            tree.kind(node)
        )));
    }

    let name = tree
        .first_child_of_kind(node, NodeKind::VariantName)
        .map(|n| structure::named_child_text(tree, n, "variant name"))
        .transpose()?;
    let tag = tree
        .first_child_of_kind(node, NodeKind::VariantTag)
        .map(|n| structure::named_child_text(tree, n, "variant tag"))
        .transpose()?;
    let body = tree.first_child_of_kind(node, NodeKind::VariantBody);

    let Some(body) = body else {
        let name = name.ok_or_else(|| Error::structural("variant without a body or a name"))?;
        return match scope.lookup_variant(&name) {
            Some(Declaration::Variant(decl)) => {
                let mut decl = decl.clone();
                // A reference can supply the tag the declaration left open.
                if decl.tag.is_none() {
                    decl.tag = tag;
                }
                Ok(decl)
            }
            _ => Err(Error::semantic(format!(
                "variant {name} has no body and has not been declared"
            ))),
        };
    };

    scope.push();
    let parsed = parse_body(tree, body, tag, ctx, scope);
    scope.pop();
    let decl = parsed?;

    if let Some(name) = name {
        scope.register_variant(&name, Declaration::Variant(decl.clone()))?;
    }
    Ok(decl)
}

fn parse_body(
    tree: &MetadataTree,
    body: NodeId,
    tag: Option<String>,
    ctx: &TraceContext,
    scope: &mut DeclarationScope,
) -> Result<VariantDeclaration> {
    let mut decl = VariantDeclaration::new(tag);
    for &child in tree.children(body) {
        match tree.kind(child) {
            NodeKind::Typealias => {
                typealias::parse(tree, child, ctx, scope)?;
            }
            NodeKind::StructOrVariantDeclaration => {
                for (name, field) in structure::parse_member(tree, child, ctx, scope)? {
                    if decl.has_field(&name) {
                        return Err(Error::semantic(format!(
                            "variant already contains a field named {name}"
                        )));
                    }
                    decl.add_field(name, field);
                }
            }
            _ => return Err(util::child_type_error(tree, child)),
        }
    }
    Ok(decl)
}

fn from_member(
    tree: &MetadataTree,
    node: NodeId,
    ctx: &TraceContext,
    scope: &mut DeclarationScope,
) -> Result<VariantDeclaration> {
    let member = tree
        .member(node)
        .ok_or_else(|| Error::structural("variant member has no payload"))?;
    if member.type_tag() != Some(field_class::VARIANT) {
        return Err(Error::structural(format!(
            "expected a variant field class, got {}",
            member.type_tag().unwrap_or("no type")
        )));
    }
    if tree.child_count(node) == 0 {
        return Err(Error::semantic("cannot have a variant with no options"));
    }

    let mut decl = VariantDeclaration::new(None);
    for &option in tree.children(node) {
        if tree.kind(option) != NodeKind::StructureFieldMember {
            return Err(util::child_type_error(tree, option));
        }
        let name = tree
            .member(option)
            .ok_or_else(|| Error::structural("variant option has no payload"))?
            .name
            .clone();
        if decl.has_field(&name) {
            return Err(Error::semantic(format!(
                "variant already contains a field named {name}"
            )));
        }
        let field = structure::member_declaration(tree, option, ctx, scope)?;
        decl.add_field(name, field);
    }
    Ok(decl)
}
