//! Integration tests for event-header recognition in the dispatcher.

use ctfmeta_model::{ByteOrder, Declaration, DeclarationScope};
use ctfmeta_parser::{NodeId, NodeKind, TraceContext, TreeBuilder, specifier};

use crate::helpers;

fn ctx() -> TraceContext {
    TraceContext {
        byte_order: ByteOrder::LittleEndian,
    }
}

/// Builds the canonical LTTng header struct in TSDL form:
///
/// ```text
/// struct {
///     enum : integer { size = ID; } { compact = 0 ... MAX-1, extended = MAX } id;
///     variant <id> {
///         struct { integer { size = TS; } timestamp; } compact;
///         struct { integer { size = 32; } id; integer { size = 64; } timestamp; } extended;
///     } v;
/// } align(8);
/// ```
fn header_struct(
    b: &mut TreeBuilder,
    parent: NodeId,
    id_size: u64,
    compact_timestamp_size: u64,
) -> NodeId {
    let s = b.add(parent, NodeKind::Struct);
    let body = b.add(s, NodeKind::StructBody);

    // enum : uintN { compact, extended } id;
    let id_tsl = helpers::inline_member(b, body, "id");
    let e = b.add(id_tsl, NodeKind::Enum);
    let container = b.add(e, NodeKind::EnumContainerType);
    let container_tsl = b.add(container, NodeKind::TypeSpecifierList);
    helpers::integer(b, container_tsl, &id_size.to_string());
    let enum_body = b.add(e, NodeKind::EnumBody);
    let max = (1i64 << id_size) - 1;
    add_enumerator(b, enum_body, "compact", 0, max - 1);
    add_enumerator(b, enum_body, "extended", max, max);

    // variant <id> { ... } v;
    let v_tsl = helpers::inline_member(b, body, "v");
    let variant = b.add(v_tsl, NodeKind::Variant);
    let tag = b.add(variant, NodeKind::VariantTag);
    b.add_text(tag, NodeKind::Identifier, "id");
    let v_body = b.add(variant, NodeKind::VariantBody);

    let compact_tsl = helpers::inline_member(b, v_body, "compact");
    let compact_struct = b.add(compact_tsl, NodeKind::Struct);
    let compact_body = b.add(compact_struct, NodeKind::StructBody);
    let ts_tsl = helpers::inline_member(b, compact_body, "timestamp");
    helpers::integer(b, ts_tsl, &compact_timestamp_size.to_string());

    let extended_tsl = helpers::inline_member(b, v_body, "extended");
    let extended_struct = b.add(extended_tsl, NodeKind::Struct);
    let extended_body = b.add(extended_struct, NodeKind::StructBody);
    let id_tsl = helpers::inline_member(b, extended_body, "id");
    helpers::integer(b, id_tsl, "32");
    let ts_tsl = helpers::inline_member(b, extended_body, "timestamp");
    helpers::integer(b, ts_tsl, "64");

    let align = b.add(s, NodeKind::Align);
    b.add_text(align, NodeKind::UnaryExpressionDec, "8");
    s
}

fn add_enumerator(b: &mut TreeBuilder, body: NodeId, label: &str, low: i64, high: i64) {
    let e = b.add(body, NodeKind::Enumerator);
    b.add_text(e, NodeKind::UnaryExpressionString, label);
    if low == high {
        let v = b.add(e, NodeKind::EnumValue);
        b.add_text(v, NodeKind::UnaryExpressionDec, &low.to_string());
    } else {
        let r = b.add(e, NodeKind::EnumValueRange);
        b.add_text(r, NodeKind::UnaryExpressionDec, &low.to_string());
        b.add_text(r, NodeKind::UnaryExpressionDec, &high.to_string());
    }
}

fn dispatch(id_size: u64, compact_timestamp_size: u64) -> Declaration {
    let mut b = TreeBuilder::tsdl();
    let list = b.add(b.root(), NodeKind::TypeSpecifierList);
    header_struct(&mut b, list, id_size, compact_timestamp_size);
    let tree = b.finish();
    let mut scope = DeclarationScope::new();
    specifier::parse_type_specifier_list(&tree, list, &[], &ctx(), &mut scope).unwrap()
}

#[test]
fn compact_header_is_recognized() {
    let decl = dispatch(5, 27);
    assert!(matches!(decl, Declaration::EventHeaderCompact(_)));
}

#[test]
fn large_header_is_recognized() {
    let decl = dispatch(16, 32);
    assert!(matches!(decl, Declaration::EventHeaderLarge(_)));
}

#[test]
fn near_miss_stays_a_generic_struct() {
    // A 6-bit id container matches neither canonical layout.
    let decl = dispatch(6, 27);
    assert!(matches!(decl, Declaration::Struct(_)));
}
