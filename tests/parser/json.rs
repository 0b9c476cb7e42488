//! Integration tests for the CTF2 JSON side of the parsers.

use ctfmeta_model::{ByteOrder, Declaration, DeclarationScope};
use ctfmeta_parser::{NodeKind, TraceContext, clock, json, specifier, typealias};
use serde_json::json;

fn ctx() -> TraceContext {
    TraceContext {
        byte_order: ByteOrder::LittleEndian,
    }
}

#[test]
fn packet_header_structure_parses_end_to_end() {
    let tree = json::document_from_fragments(&[
        json!({"type": "preamble", "version": 2}),
        json!({
            "type": "trace-class",
            "packet-header-field-class": {
                "type": "structure",
                "member-classes": [
                    {"name": "magic", "field-class": {
                        "type": "fixed-length-unsigned-integer",
                        "length": 32,
                        "byte-order": "little-endian",
                        "preferred-display-base": 16,
                        "roles": ["packet-magic-number"]
                    }},
                    {"name": "uuid", "field-class": {
                        "type": "static-length-blob",
                        "length": 16,
                        "roles": ["metadata-stream-uuid"]
                    }},
                    {"name": "stream_id", "field-class": {
                        "type": "fixed-length-unsigned-integer",
                        "length": 64,
                        "byte-order": "little-endian"
                    }}
                ]
            }
        }),
    ])
    .unwrap();
    let trace = tree.child(tree.root(), 1).unwrap();
    assert_eq!(tree.kind(trace), NodeKind::TraceClass);
    let header = tree.child(trace, 0).unwrap();

    let mut scope = DeclarationScope::new();
    let decl =
        specifier::parse_type_specifier_list(&tree, header, &[], &ctx(), &mut scope).unwrap();
    let Declaration::Struct(s) = decl else {
        panic!("expected a struct");
    };
    assert_eq!(s.fields.len(), 3);
    assert!(matches!(
        s.field("magic"),
        Some(Declaration::Integer(i)) if i.size == 32 && i.role.as_deref() == Some("packet-magic-number")
    ));
    assert!(matches!(
        s.field("uuid"),
        Some(Declaration::Blob(b)) if b.length == 16
    ));
}

#[test]
fn clock_class_maps_to_the_attribute_bag() {
    let tree = json::fragment_tree(&json!({
        "type": "clock-class",
        "name": "monotonic",
        "frequency": 1_000_000_000u64,
        "precision": 1000,
        "offset-from-origin": {"seconds": 1_326_476_837u64, "cycles": 897_235_420u64},
        "origin": "unix-epoch"
    }))
    .unwrap();
    let node = tree.child(tree.root(), 0).unwrap();

    let parsed = clock::parse(&tree, node).unwrap();
    assert_eq!(parsed.name(), Some("monotonic"));
    assert_eq!(parsed.frequency(), 1_000_000_000);
    assert_eq!(parsed.precision(), 1000);
    assert_eq!(parsed.offset_seconds(), 1_326_476_837);
    assert_eq!(parsed.offset_cycles(), 897_235_420);
    assert!(parsed.has_unix_epoch_origin());
}

#[test]
fn alias_reference_resolves_in_document_order() {
    let tree = json::document_from_fragments(&[
        json!({
            "type": "field-class-alias",
            "name": "cpu_id_t",
            "field-class": {
                "type": "fixed-length-unsigned-integer",
                "length": 16,
                "byte-order": "big-endian"
            }
        }),
        json!({
            "type": "data-stream-class",
            "packet-context-field-class": {
                "type": "structure",
                "member-classes": [
                    {"name": "cpu_id", "field-class": "cpu_id_t"}
                ]
            }
        }),
    ])
    .unwrap();
    let stream = tree.child(tree.root(), 1).unwrap();
    assert_eq!(tree.kind(stream), NodeKind::DataStreamClass);
    let context = tree.child(stream, 0).unwrap();

    let mut scope = DeclarationScope::new();
    let decl =
        specifier::parse_type_specifier_list(&tree, context, &[], &ctx(), &mut scope).unwrap();
    let Declaration::Struct(s) = decl else {
        panic!("expected a struct");
    };
    assert!(matches!(
        s.field("cpu_id"),
        Some(Declaration::Integer(i)) if i.size == 16 && i.byte_order == ByteOrder::BigEndian
    ));
}

#[test]
fn missing_alias_fails_with_its_name() {
    let tree = json::fragment_tree(&json!({
        "type": "event-record-class",
        "payload-field-class": {
            "type": "structure",
            "member-classes": [
                {"name": "x", "field-class": "undeclared_t"}
            ]
        }
    }))
    .unwrap();
    let event = tree.child(tree.root(), 0).unwrap();
    let payload = tree.child(event, 0).unwrap();

    let mut scope = DeclarationScope::new();
    let err =
        specifier::parse_type_specifier_list(&tree, payload, &[], &ctx(), &mut scope).unwrap_err();
    assert!(err.to_string().contains("undeclared_t"));
}

#[test]
fn alias_fragment_registers_into_the_scope() {
    let tree = json::fragment_tree(&json!({
        "type": "field-class-alias",
        "name": "vint_t",
        "field-class": {"type": "variable-length-unsigned-integer"}
    }))
    .unwrap();
    let alias = tree.child(tree.root(), 0).unwrap();

    let mut scope = DeclarationScope::new();
    typealias::parse(&tree, alias, &ctx(), &mut scope).unwrap();
    assert!(matches!(
        scope.lookup_type("vint_t"),
        Some(Declaration::Integer(i)) if i.varint
    ));
}

#[test]
fn wrong_preamble_version_fails_the_document() {
    let err = json::document_from_fragments(&[json!({"type": "preamble", "version": 1})])
        .unwrap_err();
    assert!(err.to_string().contains("version"));
}
