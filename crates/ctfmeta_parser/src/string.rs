//! String field-class parser.

use ctfmeta_model::{Encoding, Error, Result, StringDeclaration};

use crate::attribute;
use crate::json::field_class;
use crate::kind::NodeKind;
use crate::tree::{MetadataTree, NodeId};
use crate::util;

/// Parses a string field class from either syntax.
///
/// TSDL accepts `string` (defaults) or `string { encoding = ...; }`.
/// CTF2 accepts a null-terminated-string field class, which is always
/// UTF-8.
///
/// # Errors
/// Fails on an unknown attribute or an invalid encoding value.
pub fn parse(tree: &MetadataTree, node: NodeId) -> Result<StringDeclaration> {
    if let Some(member) = tree.member(node) {
        if member.type_tag() != Some(field_class::NULL_TERMINATED_STRING) {
            return Err(Error::structural(format!(
                "expected a string field class, got {}",
                member.type_tag().unwrap_or("no type")
            )));
        }
        return Ok(StringDeclaration {
            encoding: Encoding::Utf8,
        });
    }
    if tree.kind(node) != NodeKind::String {
        return Err(Error::structural(format!(
            "expected a string specifier, got {}",
            tree.kind(node)
        )));
    }

    let mut encoding = Encoding::Utf8;
    for (key, right) in util::attribute_expressions(tree, node)? {
        match key.as_str() {
            "encoding" => encoding = attribute::parse_encoding(tree, right)?,
            other => {
                return Err(Error::semantic(format!("unknown string attribute: {other}")));
            }
        }
    }
    Ok(StringDeclaration { encoding })
}
