//! Integration tests for declaration scopes.

use ctfmeta_model::{ByteOrder, Declaration, DeclarationScope, ErrorKind, IntegerDeclaration};

fn uint(size: u64) -> Declaration {
    Declaration::Integer(IntegerDeclaration::unsigned(size, ByteOrder::LittleEndian))
}

#[test]
fn lookup_walks_innermost_out() {
    let mut scope = DeclarationScope::new();
    scope.register_type("uint8_t", uint(8)).unwrap();
    scope.push();
    scope.push();
    assert_eq!(scope.lookup_type("uint8_t"), Some(&uint(8)));
    assert!(scope.lookup_type("uint16_t").is_none());
}

#[test]
fn duplicate_registration_in_one_frame_fails_fast() {
    let mut scope = DeclarationScope::new();
    scope.register_type("t", uint(8)).unwrap();
    let err = scope.register_type("t", uint(16)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateName(_)));
    // The original registration is untouched.
    assert_eq!(scope.lookup_type("t"), Some(&uint(8)));
}

#[test]
fn same_name_in_a_deeper_frame_shadows() {
    let mut scope = DeclarationScope::new();
    scope.register_type("t", uint(8)).unwrap();
    scope.push();
    scope.register_type("t", uint(32)).unwrap();
    assert_eq!(scope.lookup_type("t"), Some(&uint(32)));
    scope.pop();
    assert_eq!(scope.lookup_type("t"), Some(&uint(8)));
}

#[test]
fn four_namespaces_are_independent() {
    let mut scope = DeclarationScope::new();
    scope.register_type("x", uint(8)).unwrap();
    scope.register_struct("x", uint(16)).unwrap();
    scope.register_variant("x", uint(32)).unwrap();
    scope.register_enum("x", uint(64)).unwrap();
    assert_eq!(scope.lookup_type("x"), Some(&uint(8)));
    assert_eq!(scope.lookup_struct("x"), Some(&uint(16)));
    assert_eq!(scope.lookup_variant("x"), Some(&uint(32)));
    assert_eq!(scope.lookup_enum("x"), Some(&uint(64)));
}
