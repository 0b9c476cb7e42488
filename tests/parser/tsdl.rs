//! Integration tests for the TSDL side of the parsers.

use ctfmeta_model::{ByteOrder, Declaration, DeclarationScope};
use ctfmeta_parser::{NodeKind, TraceContext, TreeBuilder, clock, specifier, typealias};

use crate::helpers;

fn ctx() -> TraceContext {
    TraceContext {
        byte_order: ByteOrder::LittleEndian,
    }
}

// =============================================================================
// Typealias resolution
// =============================================================================

#[test]
fn typealias_then_member_resolution() {
    let mut b = TreeBuilder::tsdl();
    let root = b.root();
    let alias = helpers::integer_typealias(&mut b, root, "64", "uint64_ccnt_t");
    let list = b.add(root, NodeKind::TypeSpecifierList);
    b.add_text(list, NodeKind::Identifier, "uint64_ccnt_t");
    let tree = b.finish();

    let mut scope = DeclarationScope::new();
    typealias::parse(&tree, alias, &ctx(), &mut scope).unwrap();
    let decl = specifier::parse_type_specifier_list(&tree, list, &[], &ctx(), &mut scope).unwrap();
    assert!(matches!(decl, Declaration::Integer(i) if i.size == 64));
}

#[test]
fn unresolved_alias_reports_the_name() {
    let mut b = TreeBuilder::tsdl();
    let list = b.add(b.root(), NodeKind::TypeSpecifierList);
    b.add_text(list, NodeKind::Identifier, "uint64_ccnt_t");
    let tree = b.finish();

    let mut scope = DeclarationScope::new();
    let err =
        specifier::parse_type_specifier_list(&tree, list, &[], &ctx(), &mut scope).unwrap_err();
    assert!(err.to_string().contains("uint64_ccnt_t"));
}

#[test]
fn duplicate_typealias_fails_fast() {
    let mut b = TreeBuilder::tsdl();
    let root = b.root();
    let first = helpers::integer_typealias(&mut b, root, "8", "byte_t");
    let second = helpers::integer_typealias(&mut b, root, "16", "byte_t");
    let tree = b.finish();

    let mut scope = DeclarationScope::new();
    typealias::parse(&tree, first, &ctx(), &mut scope).unwrap();
    assert!(typealias::parse(&tree, second, &ctx(), &mut scope).is_err());
}

// =============================================================================
// Structs and scoping
// =============================================================================

#[test]
fn struct_body_scope_is_lexical() {
    let mut b = TreeBuilder::tsdl();
    let root = b.root();
    let outer = helpers::integer_typealias(&mut b, root, "32", "uint32_t");
    let s = b.add(root, NodeKind::Struct);
    let body = b.add(s, NodeKind::StructBody);
    // A body-local alias plus a member using an outer one.
    helpers::integer_typealias(&mut b, body, "16", "u16_local");
    helpers::aliased_member(&mut b, body, "u16_local", "a");
    helpers::aliased_member(&mut b, body, "uint32_t", "b");
    let tree = b.finish();

    let mut scope = DeclarationScope::new();
    typealias::parse(&tree, outer, &ctx(), &mut scope).unwrap();
    let decl = ctfmeta_parser::structure::parse(&tree, s, &ctx(), &mut scope).unwrap();
    assert!(decl.has_field("a"));
    assert!(decl.has_field("b"));
    // The body-local alias does not leak into the outer scope.
    assert!(scope.lookup_type("u16_local").is_none());
    assert!(scope.lookup_type("uint32_t").is_some());
}

// =============================================================================
// Clocks
// =============================================================================

#[test]
fn clock_block_round_trip() {
    let mut b = TreeBuilder::tsdl();
    let node = b.add(b.root(), NodeKind::Clock);
    helpers::attribute(&mut b, node, "name", NodeKind::UnaryExpressionString, "monotonic");
    helpers::attribute(&mut b, node, "freq", NodeKind::UnaryExpressionDec, "1000000000");
    helpers::attribute(&mut b, node, "offset_s", NodeKind::UnaryExpressionDec, "1326476837");
    helpers::attribute(&mut b, node, "offset", NodeKind::UnaryExpressionDec, "897235420");
    helpers::attribute(&mut b, node, "precision", NodeKind::UnaryExpressionDec, "1000");
    helpers::attribute(&mut b, node, "absolute", NodeKind::UnaryExpressionString, "false");
    let tree = b.finish();

    let parsed = clock::parse(&tree, node).unwrap();
    assert_eq!(parsed.name(), Some("monotonic"));
    assert_eq!(parsed.frequency(), 1_000_000_000);
    assert_eq!(parsed.offset_seconds(), 1_326_476_837);
    assert_eq!(parsed.offset_cycles(), 897_235_420);
    assert_eq!(parsed.precision(), 1000);
    assert!(!parsed.is_absolute());
}
