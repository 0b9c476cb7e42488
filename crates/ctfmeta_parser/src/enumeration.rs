//! Enumeration field-class parser.

use ctfmeta_model::{
    Declaration, DeclarationScope, EnumDeclaration, Error, IntegerDeclaration, Result,
};

use crate::TraceContext;
use crate::integer;
use crate::json::field_class;
use crate::kind::NodeKind;
use crate::literal;
use crate::specifier;
use crate::tree::{MetadataTree, NodeId};
use crate::util;

/// Parses an enumeration field class from either syntax.
///
/// TSDL: `enum name : container { A, B = 2, C = 4 ... 7 }`. The container
/// defaults to whatever `int` resolves to in the current scope. A named
/// enum without a body resolves to a previously registered one; a named
/// enum with a body registers itself.
///
/// # Errors
/// Fails on a missing body and unresolvable name, a non-integer
/// container, an inverted range, or a value outside the container range.
pub fn parse(
    tree: &MetadataTree,
    node: NodeId,
    ctx: &TraceContext,
    scope: &mut DeclarationScope,
) -> Result<EnumDeclaration> {
    if tree.member(node).is_some() {
        return from_member(tree, node, ctx);
    }
    if tree.kind(node) != NodeKind::Enum {
        return Err(Error::structural(format!(
            "expected an enum specifier, got {}",
            tree.kind(node)
        )));
    }

    let name = tree
        .first_child_of_kind(node, NodeKind::EnumName)
        .map(|n| enum_name(tree, n))
        .transpose()?;
    let body = tree.first_child_of_kind(node, NodeKind::EnumBody);

    let Some(body) = body else {
        // Nameless and bodyless is unparseable; named and bodyless is a
        // reference to an earlier declaration.
        let name = name.ok_or_else(|| Error::structural("enum without a body or a name"))?;
        return match scope.lookup_enum(&name) {
            Some(Declaration::Enum(decl)) => Ok(decl.clone()),
            _ => Err(Error::semantic(format!(
                "enum {name} has no body and has not been declared"
            ))),
        };
    };

    let container = container_type(tree, node, ctx, scope)?;
    let mut decl = EnumDeclaration::new(container);
    for &enumerator in tree.children(body) {
        if tree.kind(enumerator) != NodeKind::Enumerator {
            return Err(util::child_type_error(tree, enumerator));
        }
        parse_enumerator(tree, enumerator, &mut decl)?;
    }

    if let Some(name) = name {
        scope.register_enum(&name, Declaration::Enum(decl.clone()))?;
    }
    Ok(decl)
}

fn enum_name(tree: &MetadataTree, name_node: NodeId) -> Result<String> {
    let id = tree
        .child(name_node, 0)
        .ok_or_else(|| Error::structural("enum name node has no identifier"))?;
    tree.text(id)
        .map(str::to_owned)
        .ok_or_else(|| Error::structural("enum name identifier has no text"))
}

fn container_type(
    tree: &MetadataTree,
    node: NodeId,
    ctx: &TraceContext,
    scope: &mut DeclarationScope,
) -> Result<IntegerDeclaration> {
    if let Some(container) = tree.first_child_of_kind(node, NodeKind::EnumContainerType) {
        let list = tree
            .child(container, 0)
            .ok_or_else(|| Error::structural("enum container type is empty"))?;
        match specifier::parse_type_specifier_list(tree, list, &[], ctx, scope)? {
            Declaration::Integer(decl) => Ok(decl),
            _ => Err(Error::semantic("enum container type must be an integer")),
        }
    } else {
        match scope.lookup_type("int") {
            Some(Declaration::Integer(decl)) => Ok(decl.clone()),
            _ => Err(Error::semantic(
                "enum has no container type and int is not declared",
            )),
        }
    }
}

fn parse_enumerator(tree: &MetadataTree, node: NodeId, decl: &mut EnumDeclaration) -> Result<()> {
    let mut label = None;
    let mut bounds = None;
    for &child in tree.children(node) {
        if util::is_any_unary_string(tree, child) {
            label = Some(literal::parse_unary_string(tree, child)?);
        } else {
            match tree.kind(child) {
                NodeKind::EnumValue => {
                    let v = literal::parse_unary_integer(
                        tree,
                        tree.child(child, 0)
                            .ok_or_else(|| Error::structural("enum value is empty"))?,
                    )?;
                    bounds = Some((v, v));
                }
                NodeKind::EnumValueRange => {
                    let low = literal::parse_unary_integer(
                        tree,
                        tree.child(child, 0)
                            .ok_or_else(|| Error::structural("enum range has no low value"))?,
                    )?;
                    let high = literal::parse_unary_integer(
                        tree,
                        tree.child(child, 1)
                            .ok_or_else(|| Error::structural("enum range has no high value"))?,
                    )?;
                    bounds = Some((low, high));
                }
                _ => return Err(util::child_type_error(tree, child)),
            }
        }
    }
    let label = label.ok_or_else(|| Error::structural("enumerator has no label"))?;

    match bounds {
        Some((low, high)) => add_range(decl, low, high, label),
        None => {
            if decl.add_label(label.clone()) {
                Ok(())
            } else {
                Err(Error::semantic(format!("enum cannot add label {label}")))
            }
        }
    }
}

fn add_range(decl: &mut EnumDeclaration, low: i64, high: i64, label: String) -> Result<()> {
    if low > high {
        return Err(Error::semantic(format!(
            "enum low value {low} is greater than high value {high}"
        )));
    }
    let (min, max) = (
        decl.container.minimum_value(),
        decl.container.maximum_value(),
    );
    if i128::from(low) < min || i128::from(high) > max {
        return Err(Error::semantic(format!(
            "enum value {low}..{high} is not in the container range {min}..{max}"
        )));
    }
    if !decl.add_range(low, high, label.clone()) {
        log::warn!("duplicate enum mapping, skipping: {label} = {low}..{high}");
    }
    Ok(())
}

fn from_member(tree: &MetadataTree, node: NodeId, ctx: &TraceContext) -> Result<EnumDeclaration> {
    let member = tree.member(node).expect("checked by caller");
    if member.type_tag() != Some(field_class::FIXED_UNSIGNED_ENUMERATION) {
        return Err(Error::structural(format!(
            "expected an enumeration field class, got {}",
            member.type_tag().unwrap_or("no type")
        )));
    }
    let container = integer::from_field_class(member, false, false, ctx)?;
    let mut decl = EnumDeclaration::new(container);
    if let Some(mappings) = member
        .field_class
        .get("mappings")
        .and_then(serde_json::Value::as_object)
    {
        for (label, pairs) in mappings {
            let pairs = pairs.as_array().ok_or_else(|| {
                Error::semantic(format!("enum mapping {label} is not a range list"))
            })?;
            for pair in pairs {
                let low = pair
                    .get(0)
                    .and_then(serde_json::Value::as_i64)
                    .ok_or_else(|| Error::semantic(format!("bad range in mapping {label}")))?;
                let high = pair
                    .get(1)
                    .and_then(serde_json::Value::as_i64)
                    .ok_or_else(|| Error::semantic(format!("bad range in mapping {label}")))?;
                add_range(&mut decl, low, high, label.clone())?;
            }
        }
    }
    Ok(decl)
}
