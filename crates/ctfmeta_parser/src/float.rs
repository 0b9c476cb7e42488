//! Floating-point field-class parser (TSDL only).

use ctfmeta_model::{Error, FloatDeclaration, Result};

use crate::TraceContext;
use crate::attribute;
use crate::kind::NodeKind;
use crate::tree::{MetadataTree, NodeId};
use crate::util;

const DEFAULT_EXPONENT: u64 = 8;
const DEFAULT_MANTISSA: u64 = 24;
const DEFAULT_ALIGNMENT: u64 = 8;

/// Parses a `floating_point { ... }` specifier. Unknown attribute names
/// are logged and skipped.
///
/// # Errors
/// Fails on malformed attribute values.
pub fn parse(tree: &MetadataTree, node: NodeId, ctx: &TraceContext) -> Result<FloatDeclaration> {
    if tree.kind(node) != NodeKind::FloatingPoint {
        return Err(Error::structural(format!(
            "expected a floating point specifier, got {}",
            tree.kind(node)
        )));
    }

    let mut exponent = DEFAULT_EXPONENT;
    let mut mantissa = DEFAULT_MANTISSA;
    let mut byte_order = ctx.byte_order;
    let mut alignment = 0u64;

    for (key, right) in util::attribute_expressions(tree, node)? {
        match key.as_str() {
            "exp_dig" => exponent = attribute::parse_size(tree, right)?,
            "mant_dig" => mantissa = attribute::parse_size(tree, right)?,
            "byte_order" => byte_order = attribute::parse_byte_order(tree, right, ctx)?,
            "align" => alignment = attribute::parse_alignment(tree, right)?,
            other => log::warn!("unknown floating point attribute, skipping: {other}"),
        }
    }

    if alignment == 0 {
        alignment = DEFAULT_ALIGNMENT;
    }
    Ok(FloatDeclaration {
        exponent,
        mantissa,
        byte_order,
        alignment,
    })
}
