//! Integer field-class parser.

use ctfmeta_model::{DisplayBase, Error, IntegerDeclaration, Result};

use crate::TraceContext;
use crate::attribute;
use crate::kind::NodeKind;
use crate::tree::{MemberPayload, MetadataTree, NodeId};
use crate::util;

use crate::json::field_class;

/// Parses an integer field class from either syntax.
///
/// TSDL: `node` is an `integer { ... }` specifier whose children are
/// attribute expressions. Unknown attribute names are logged and
/// skipped. CTF2: `node` is a member whose field class carries one of
/// the four integer type tags.
///
/// # Errors
/// Fails on malformed attributes, a missing or invalid size, or a
/// non-integer CTF2 type tag.
pub fn parse(tree: &MetadataTree, node: NodeId, ctx: &TraceContext) -> Result<IntegerDeclaration> {
    if let Some(member) = tree.member(node) {
        return from_member(member, ctx);
    }
    if tree.kind(node) != NodeKind::Integer {
        return Err(Error::structural(format!(
            "expected an integer specifier, got {}",
            tree.kind(node)
        )));
    }

    let mut size = 0u64;
    let mut alignment = 0u64;
    let mut signed = false;
    let mut byte_order = ctx.byte_order;
    let mut base = DisplayBase::Decimal;
    let mut encoding = ctfmeta_model::Encoding::None;
    let mut clock = None;

    for (key, right) in util::attribute_expressions(tree, node)? {
        match key.as_str() {
            "signed" => signed = attribute::parse_signed(tree, right)?,
            "byte_order" => byte_order = attribute::parse_byte_order(tree, right, ctx)?,
            "size" => size = attribute::parse_size(tree, right)?,
            "align" => alignment = attribute::parse_alignment(tree, right)?,
            "base" => base = attribute::parse_base(tree, right)?,
            "encoding" => encoding = attribute::parse_encoding(tree, right)?,
            "map" => clock = Some(clock_name(&attribute::parse_clock_map(tree, right)?)),
            other => log::warn!("unknown integer attribute, skipping: {other}"),
        }
    }

    if size == 0 {
        return Err(Error::semantic("integer is missing a size attribute"));
    }
    if alignment == 0 {
        alignment = 1;
    }
    Ok(IntegerDeclaration {
        size,
        alignment,
        signed,
        byte_order,
        base,
        encoding,
        clock,
        varint: false,
        role: None,
    })
}

/// Extracts the clock name from a `clock.NAME.value` map path. A path
/// that does not follow the convention is kept whole.
fn clock_name(path: &str) -> String {
    let mut parts = path.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some("clock"), Some(name), Some("value"), None) => name.to_owned(),
        _ => path.to_owned(),
    }
}

fn from_member(member: &MemberPayload, ctx: &TraceContext) -> Result<IntegerDeclaration> {
    let (signed, varint) = match member.type_tag() {
        Some(field_class::FIXED_UNSIGNED_INTEGER) => (false, false),
        Some(field_class::FIXED_SIGNED_INTEGER) => (true, false),
        Some(field_class::VARIABLE_UNSIGNED_INTEGER) => (false, true),
        Some(field_class::VARIABLE_SIGNED_INTEGER) => (true, true),
        other => {
            return Err(Error::structural(format!(
                "expected an integer field class, got {}",
                other.unwrap_or("no type")
            )));
        }
    };
    from_field_class(member, signed, varint, ctx)
}

/// Builds an integer declaration from a CTF2 field-class object once its
/// signedness and varint-ness are known. The enum parser reuses this for
/// enumeration containers.
pub(crate) fn from_field_class(
    member: &MemberPayload,
    signed: bool,
    varint: bool,
    ctx: &TraceContext,
) -> Result<IntegerDeclaration> {
    let fc = &member.field_class;
    let base = match fc.get("preferred-display-base").and_then(serde_json::Value::as_i64) {
        Some(radix) => DisplayBase::from_radix(radix)
            .ok_or_else(|| Error::semantic(format!("invalid base: {radix}")))?,
        None => DisplayBase::Decimal,
    };
    let role = member.role().map(str::to_owned);

    if varint {
        return Ok(IntegerDeclaration::varint(signed, base, role));
    }

    let size = fc
        .get("length")
        .and_then(serde_json::Value::as_i64)
        .ok_or_else(|| Error::semantic("integer field class is missing a length"))?;
    if size < 1 {
        return Err(Error::semantic(format!("invalid length attribute: {size}")));
    }
    let byte_order = match fc.get("byte-order").and_then(serde_json::Value::as_str) {
        Some(name) => attribute::byte_order_from_name(name, ctx)?,
        None => ctx.byte_order,
    };
    let alignment = match fc.get("alignment").and_then(serde_json::Value::as_i64) {
        Some(value) if value >= 1 => {
            let alignment = value.unsigned_abs();
            if !alignment.is_power_of_two() {
                return Err(Error::semantic(format!("invalid alignment: {value}")));
            }
            alignment
        }
        Some(value) => return Err(Error::semantic(format!("invalid alignment: {value}"))),
        None => 1,
    };
    Ok(IntegerDeclaration {
        size: size.unsigned_abs(),
        alignment,
        signed,
        byte_order,
        base,
        encoding: ctfmeta_model::Encoding::None,
        clock: None,
        varint: false,
        role,
    })
}
