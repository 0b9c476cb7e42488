//! Structure field-class parser.

use ctfmeta_model::{Declaration, DeclarationScope, Error, Result, StructDeclaration};

use crate::TraceContext;
use crate::kind::NodeKind;
use crate::literal;
use crate::specifier;
use crate::tree::{MetadataTree, NodeId};
use crate::typealias;
use crate::util;

/// Parses a structure from either syntax.
///
/// TSDL: `struct name { members } align(n)`. A named struct with a body
/// registers itself in the enclosing scope; a named struct without a
/// body resolves to a previously registered one. The body opens a fresh
/// declaration scope, so typealiases inside it do not leak out.
///
/// CTF2: a materialized structure field class whose children are its
/// members.
///
/// # Errors
/// Fails on a missing body with no resolvable name, a duplicate field
/// name, a nameless member, or a malformed `align` attribute.
pub fn parse(
    tree: &MetadataTree,
    node: NodeId,
    ctx: &TraceContext,
    scope: &mut DeclarationScope,
) -> Result<StructDeclaration> {
    if tree.kind(node) == NodeKind::StructureField {
        return from_structure_field(tree, node, ctx, scope);
    }
    if tree.kind(node) != NodeKind::Struct {
        return Err(Error::structural(format!(
            "expected a struct specifier, got {}",
            tree.kind(node)
        )));
    }

    let name = tree
        .first_child_of_kind(node, NodeKind::StructName)
        .map(|n| named_child_text(tree, n, "struct name"))
        .transpose()?;
    let body = tree.first_child_of_kind(node, NodeKind::StructBody);
    let min_alignment = match tree.first_child_of_kind(node, NodeKind::Align) {
        Some(align) => parse_align(tree, align)?,
        None => 1,
    };

    let Some(body) = body else {
        let name = name.ok_or_else(|| Error::structural("struct without a body or a name"))?;
        return match scope.lookup_struct(&name) {
            Some(Declaration::Struct(decl)) => Ok(decl.clone()),
            _ => Err(Error::semantic(format!(
                "struct {name} has no body and has not been declared"
            ))),
        };
    };

    scope.push();
    let parsed = parse_body(tree, body, min_alignment, ctx, scope);
    scope.pop();
    let decl = parsed?;

    if let Some(name) = name {
        scope.register_struct(&name, Declaration::Struct(decl.clone()))?;
    }
    Ok(decl)
}

pub(crate) fn named_child_text(tree: &MetadataTree, node: NodeId, what: &str) -> Result<String> {
    let id = tree
        .child(node, 0)
        .ok_or_else(|| Error::structural(format!("{what} node has no identifier")))?;
    tree.text(id)
        .map(str::to_owned)
        .ok_or_else(|| Error::structural(format!("{what} identifier has no text")))
}

fn parse_align(tree: &MetadataTree, node: NodeId) -> Result<u64> {
    let value = literal::parse_unary_integer(
        tree,
        tree.child(node, 0)
            .ok_or_else(|| Error::structural("align attribute is empty"))?,
    )?;
    let alignment = u64::try_from(value)
        .map_err(|_| Error::semantic(format!("invalid alignment: {value}")))?;
    if !alignment.is_power_of_two() {
        return Err(Error::semantic(format!("invalid alignment: {alignment}")));
    }
    Ok(alignment)
}

fn parse_body(
    tree: &MetadataTree,
    body: NodeId,
    min_alignment: u64,
    ctx: &TraceContext,
    scope: &mut DeclarationScope,
) -> Result<StructDeclaration> {
    let mut decl = StructDeclaration::new(min_alignment);
    for &child in tree.children(body) {
        match tree.kind(child) {
            NodeKind::Typealias => {
                typealias::parse(tree, child, ctx, scope)?;
            }
            NodeKind::StructOrVariantDeclaration => {
                for (name, field) in parse_member(tree, child, ctx, scope)? {
                    if decl.has_field(&name) {
                        return Err(Error::semantic(format!(
                            "struct already contains a field named {name}"
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

/// Parses one member declaration: a type specifier list applied to one
/// or more declarators, yielding a (name, declaration) pair each.
pub(crate) fn parse_member(
    tree: &MetadataTree,
    node: NodeId,
    ctx: &TraceContext,
    scope: &mut DeclarationScope,
) -> Result<Vec<(String, Declaration)>> {
    let specifiers = tree
        .first_child_of_kind(node, NodeKind::TypeSpecifierList)
        .ok_or_else(|| Error::structural("member declaration has no type specifier list"))?;
    let declarators = tree
        .first_child_of_kind(node, NodeKind::TypeDeclaratorList)
        .ok_or_else(|| Error::structural("member declaration has no declarator list"))?;

    let mut fields = Vec::new();
    for &declarator in tree.children(declarators) {
        if tree.kind(declarator) != NodeKind::TypeDeclarator {
            return Err(util::child_type_error(tree, declarator));
        }
        let pointers: Vec<NodeId> = tree
            .children(declarator)
            .iter()
            .copied()
            .filter(|&c| tree.kind(c) == NodeKind::Pointer)
            .collect();
        let identifier = tree
            .first_child_of_kind(declarator, NodeKind::Identifier)
            .ok_or_else(|| Error::structural("member declarator has no name"))?;
        let name = tree
            .text(identifier)
            .ok_or_else(|| Error::structural("member name has no text"))?
            .to_owned();
        let declaration =
            specifier::parse_type_specifier_list(tree, specifiers, &pointers, ctx, scope)?;
        fields.push((name, declaration));
    }
    Ok(fields)
}

fn from_structure_field(
    tree: &MetadataTree,
    node: NodeId,
    ctx: &TraceContext,
    scope: &mut DeclarationScope,
) -> Result<StructDeclaration> {
    let min_alignment = match tree
        .member(node)
        .and_then(|m| m.field_class.get("minimum-alignment"))
        .and_then(serde_json::Value::as_i64)
    {
        Some(value) if value >= 1 => value.unsigned_abs(),
        Some(value) => {
            return Err(Error::semantic(format!(
                "invalid minimum-alignment: {value}"
            )));
        }
        None => 1,
    };
    let mut decl = StructDeclaration::new(min_alignment);

    for &member in tree.children(node) {
        if tree.kind(member) != NodeKind::StructureFieldMember {
            return Err(util::child_type_error(tree, member));
        }
        let name = tree
            .member(member)
            .ok_or_else(|| Error::structural("structure member has no payload"))?
            .name
            .clone();
        if decl.has_field(&name) {
            return Err(Error::semantic(format!(
                "struct already contains a field named {name}"
            )));
        }
        let field = member_declaration(tree, member, ctx, scope)?;
        decl.add_field(name, field);
    }
    Ok(decl)
}

/// Parses the declaration behind one CTF2 member: nested structures go
/// through the dispatcher, everything else through the typealias parser
/// so alias references resolve.
pub(crate) fn member_declaration(
    tree: &MetadataTree,
    member: NodeId,
    ctx: &TraceContext,
    scope: &mut DeclarationScope,
) -> Result<Declaration> {
    if let Some(nested) = tree.first_child_of_kind(member, NodeKind::StructureField) {
        specifier::parse_type_specifier_list(tree, nested, &[], ctx, scope)
    } else {
        typealias::parse(tree, member, ctx, scope)
    }
}
