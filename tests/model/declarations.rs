//! Integration tests for the declaration sum type.

use ctfmeta_model::{
    BlobDeclaration, ByteOrder, Declaration, DisplayBase, EnumDeclaration,
    EventHeaderCompactDeclaration, FloatDeclaration, IntegerDeclaration, StringDeclaration,
    StructDeclaration, VariantDeclaration,
};

// =============================================================================
// Alignment
// =============================================================================

#[test]
fn alignment_is_uniform_across_the_sum_type() {
    let bo = ByteOrder::LittleEndian;

    let int = Declaration::Integer(IntegerDeclaration::unsigned(32, bo));
    assert_eq!(int.alignment(), 8);

    let float = Declaration::Float(FloatDeclaration {
        exponent: 8,
        mantissa: 24,
        byte_order: bo,
        alignment: 32,
    });
    assert_eq!(float.alignment(), 32);

    let s = Declaration::Str(StringDeclaration::default());
    assert_eq!(s.alignment(), 8);

    let blob = Declaration::Blob(BlobDeclaration {
        length: 16,
        media_type: "application/octet-stream".into(),
        role: None,
    });
    assert_eq!(blob.alignment(), 8);

    let header = Declaration::EventHeaderCompact(EventHeaderCompactDeclaration { byte_order: bo });
    assert_eq!(header.alignment(), 8);
}

#[test]
fn struct_alignment_rises_with_its_fields() {
    let bo = ByteOrder::LittleEndian;
    let mut s = StructDeclaration::new(1);
    s.add_field("a", Declaration::Integer(IntegerDeclaration::unsigned(5, bo)));
    assert_eq!(Declaration::Struct(s.clone()).alignment(), 1);
    s.add_field("b", Declaration::Integer(IntegerDeclaration::unsigned(64, bo)));
    assert_eq!(Declaration::Struct(s).alignment(), 8);
}

#[test]
fn variant_alignment_is_its_widest_member() {
    let bo = ByteOrder::LittleEndian;
    let mut v = VariantDeclaration::new(Some("tag".into()));
    v.add_field("a", Declaration::Integer(IntegerDeclaration::unsigned(3, bo)));
    v.add_field("b", Declaration::Integer(IntegerDeclaration::unsigned(16, bo)));
    assert_eq!(Declaration::Variant(v).alignment(), 8);
}

// =============================================================================
// Integers
// =============================================================================

#[test]
fn varint_constructor_reports_saturated_ranges() {
    let v = IntegerDeclaration::varint(true, DisplayBase::Decimal, None);
    assert!(v.varint);
    assert_eq!(v.minimum_value(), i128::from(i64::MIN));
    assert_eq!(v.maximum_value(), i128::from(i64::MAX));
}

#[test]
fn five_bit_container_bounds() {
    let u5 = IntegerDeclaration::unsigned(5, ByteOrder::LittleEndian);
    assert_eq!(u5.minimum_value(), 0);
    assert_eq!(u5.maximum_value(), 31);
}

// =============================================================================
// Enumerations
// =============================================================================

#[test]
fn overlapping_ranges_prefer_the_first_declaration() {
    let mut e = EnumDeclaration::new(IntegerDeclaration::unsigned(8, ByteOrder::LittleEndian));
    assert!(e.add_range(0, 10, "first"));
    assert!(e.add_range(5, 15, "second"));
    assert_eq!(e.label_for(7), Some("first"));
    assert_eq!(e.label_for(12), Some("second"));
    assert_eq!(e.label_for(16), None);
}
