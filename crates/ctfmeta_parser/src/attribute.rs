//! Shared attribute value parsers.
//!
//! Each function takes the right-hand side of a `key = value;` attribute
//! expression and produces a validated, typed value. They are shared by
//! the integer, float, string and enum parsers.

use ctfmeta_model::{ByteOrder, DisplayBase, Encoding, Error, Result};

use crate::TraceContext;
use crate::literal;
use crate::tree::{MetadataTree, NodeId};
use crate::util;

fn sole_child(tree: &MetadataTree, right: NodeId, what: &str) -> Result<NodeId> {
    if tree.child_count(right) != 1 {
        return Err(Error::structural(format!(
            "invalid value for {what}: expected a single expression"
        )));
    }
    Ok(tree.child(right, 0).expect("count checked"))
}

/// Parses a `size` attribute value. Must be a positive integer.
///
/// # Errors
/// Fails on a non-integer value or a size below one bit.
pub fn parse_size(tree: &MetadataTree, right: NodeId) -> Result<u64> {
    let value = literal::parse_unary_integer(tree, sole_child(tree, right, "size")?)?;
    if value < 1 {
        return Err(Error::semantic(format!("invalid size attribute: {value}")));
    }
    Ok(value.unsigned_abs())
}

/// Parses an `align` attribute value. Must be a positive power of two.
///
/// # Errors
/// Fails on a non-integer value or an alignment that is zero, negative
/// or not a power of two.
pub fn parse_alignment(tree: &MetadataTree, right: NodeId) -> Result<u64> {
    let value = literal::parse_unary_integer(tree, sole_child(tree, right, "align")?)?;
    let alignment = u64::try_from(value)
        .map_err(|_| Error::semantic(format!("invalid alignment: {value}")))?;
    if !alignment.is_power_of_two() {
        return Err(Error::semantic(format!("invalid alignment: {alignment}")));
    }
    Ok(alignment)
}

/// Parses a `byte_order` attribute value. `native` resolves against the
/// trace-level byte order in `ctx`.
///
/// # Errors
/// Fails on a non-string value or an unknown byte order name.
pub fn parse_byte_order(tree: &MetadataTree, right: NodeId, ctx: &TraceContext) -> Result<ByteOrder> {
    let child = sole_child(tree, right, "byte_order")?;
    if !util::is_unary_string(tree, child) {
        return Err(Error::structural("invalid value for byte order"));
    }
    byte_order_from_name(&literal::parse_unary_string(tree, child)?, ctx)
}

/// Resolves a byte order by name, accepting both the TSDL spellings and
/// the CTF2 JSON spellings.
///
/// # Errors
/// Fails on an unknown name.
pub fn byte_order_from_name(name: &str, ctx: &TraceContext) -> Result<ByteOrder> {
    match name {
        "le" | "little-endian" => Ok(ByteOrder::LittleEndian),
        "be" | "network" | "big-endian" => Ok(ByteOrder::BigEndian),
        "native" => Ok(ctx.byte_order),
        other => Err(Error::semantic(format!("invalid byte order: {other}"))),
    }
}

/// Parses a `signed` attribute value: a boolean keyword or an integer
/// where any nonzero value means signed.
///
/// # Errors
/// Fails when the value is neither.
pub fn parse_signed(tree: &MetadataTree, right: NodeId) -> Result<bool> {
    let child = sole_child(tree, right, "signed")?;
    if util::is_unary_integer(tree, child) {
        return Ok(literal::parse_unary_integer(tree, child)? != 0);
    }
    if util::is_unary_string(tree, child) {
        return match literal::parse_unary_string(tree, child)?.as_str() {
            "true" | "TRUE" => Ok(true),
            "false" | "FALSE" => Ok(false),
            other => Err(Error::semantic(format!("invalid signed attribute: {other}"))),
        };
    }
    Err(Error::structural("invalid value for signed"))
}

/// Parses a `base` attribute value: a radix or one of the display-base
/// keywords.
///
/// # Errors
/// Fails on an unknown radix or keyword.
pub fn parse_base(tree: &MetadataTree, right: NodeId) -> Result<DisplayBase> {
    let child = sole_child(tree, right, "base")?;
    if util::is_unary_integer(tree, child) {
        let radix = literal::parse_unary_integer(tree, child)?;
        return DisplayBase::from_radix(radix)
            .ok_or_else(|| Error::semantic(format!("invalid base: {radix}")));
    }
    if util::is_unary_string(tree, child) {
        return match literal::parse_unary_string(tree, child)?.as_str() {
            "decimal" | "dec" | "d" | "i" | "u" => Ok(DisplayBase::Decimal),
            "hexadecimal" | "hex" | "x" | "X" | "p" => Ok(DisplayBase::Hexadecimal),
            "octal" | "oct" | "o" => Ok(DisplayBase::Octal),
            "binary" | "bin" | "b" => Ok(DisplayBase::Binary),
            other => Err(Error::semantic(format!("invalid base: {other}"))),
        };
    }
    Err(Error::structural("invalid value for base"))
}

/// Parses an `encoding` attribute value.
///
/// # Errors
/// Fails on an unknown encoding name.
pub fn parse_encoding(tree: &MetadataTree, right: NodeId) -> Result<Encoding> {
    let child = sole_child(tree, right, "encoding")?;
    if !util::is_unary_string(tree, child) {
        return Err(Error::structural("invalid value for encoding"));
    }
    match literal::parse_unary_string(tree, child)?.as_str() {
        "UTF8" => Ok(Encoding::Utf8),
        "ASCII" => Ok(Encoding::Ascii),
        "none" => Ok(Encoding::None),
        other => Err(Error::semantic(format!("invalid encoding: {other}"))),
    }
}

/// Parses a `map` attribute value into its full dotted clock path, for
/// example `clock.cycle_counter.value`.
///
/// # Errors
/// Fails when the chain is empty or malformed.
pub fn parse_clock_map(tree: &MetadataTree, right: NodeId) -> Result<String> {
    util::concatenate_unary_strings(tree, tree.children(right))
}
