//! Unary literal parsers.
//!
//! Along with the attribute parsers these are the most frequently hit
//! code paths in the crate: nearly every metadata attribute bottoms out
//! in a unary integer or unary string.

use ctfmeta_model::{Error, Result};

use crate::kind::NodeKind;
use crate::tree::{MetadataTree, NodeId};
use crate::util;

/// Parses a unary integer leaf (decimal, hexadecimal or octal) to an
/// `i64`. A leading `-` is accepted on any base.
///
/// # Errors
/// Fails when the node is not a unary integer kind, has no text, or the
/// text does not fit an `i64` in the kind's radix.
pub fn parse_unary_integer(tree: &MetadataTree, node: NodeId) -> Result<i64> {
    if !util::is_unary_integer(tree, node) {
        return Err(Error::structural(format!(
            "expected a unary integer, got {}",
            tree.kind(node)
        )));
    }
    let text = tree
        .text(node)
        .ok_or_else(|| Error::structural("unary integer has no text"))?;

    let negative = text.starts_with('-');
    let digits = text.strip_prefix('-').unwrap_or(text);
    // Magnitudes go through i128 so that i64::MIN survives the sign split.
    let magnitude: Option<i128> = match tree.kind(node) {
        NodeKind::UnaryExpressionDec => digits.parse().ok(),
        NodeKind::UnaryExpressionHex => {
            let digits = digits
                .strip_prefix("0x")
                .or_else(|| digits.strip_prefix("0X"))
                .unwrap_or(digits);
            i128::from_str_radix(digits, 16).ok()
        }
        NodeKind::UnaryExpressionOct => {
            let digits = digits.strip_prefix('0').unwrap_or(digits);
            if digits.is_empty() {
                Some(0)
            } else {
                i128::from_str_radix(digits, 8).ok()
            }
        }
        _ => unreachable!("guarded by is_unary_integer"),
    };
    magnitude
        .map(|m| if negative { -m } else { m })
        .and_then(|v| i64::try_from(v).ok())
        .ok_or_else(|| Error::semantic(format!("invalid integer literal: {text}")))
}

/// Parses a unary string node to its text value.
///
/// Descends to the innermost text-bearing child; when the quoted kind is
/// involved, exactly one leading and one trailing quote character are
/// stripped.
///
/// # Errors
/// Fails when no text can be resolved.
pub fn parse_unary_string(tree: &MetadataTree, node: NodeId) -> Result<String> {
    let mut current = node;
    let mut quoted = tree.kind(node) == NodeKind::UnaryExpressionStringQuotes;
    while tree.text(current).is_none() {
        current = tree
            .child(current, 0)
            .ok_or_else(|| Error::structural("unary string has no value"))?;
        quoted |= tree.kind(current) == NodeKind::UnaryExpressionStringQuotes;
    }
    let text = tree.text(current).expect("loop exits on text");
    if quoted {
        let stripped = text
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .ok_or_else(|| Error::structural(format!("malformed quoted string: {text}")))?;
        Ok(stripped.to_owned())
    } else {
        Ok(text.to_owned())
    }
}
