//! Specialized event-header declarations.
//!
//! Event headers sit in front of every event payload and dominate the
//! decode path. When a parsed struct exactly matches one of the two
//! canonical LTTng layouts, the dispatcher substitutes one of these
//! declarations so the decoder can use a pre-validated fixed shape instead
//! of generic per-field struct decoding.
//!
//! Canonical compact layout:
//!
//! ```text
//! struct {
//!     enum : uint5_t { compact = 0 ... 30, extended = 31 } id;
//!     variant <id> {
//!         struct { uint27_t timestamp } compact;
//!         struct { uint32_t id; uint64_t timestamp } extended;
//!     } v;
//! } align(8);
//! ```
//!
//! The large layout widens `id` to 16 bits and the compact timestamp to 32.

use crate::composite::{StructDeclaration, VariantDeclaration};
use crate::declaration::{ByteOrder, Declaration};

/// Field name of the event id enumeration.
const ID: &str = "id";
/// Field name of the header variant.
const VARIANT: &str = "v";
/// Member selected for ids below the extended marker.
const COMPACT: &str = "compact";
/// Member selected when the id saturates its container.
const EXTENDED: &str = "extended";
/// Field name of the timestamp.
const TIMESTAMP: &str = "timestamp";

/// The compact event header: 5-bit id, 27-bit compact timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventHeaderCompactDeclaration {
    /// Byte order of every integer in the header.
    pub byte_order: ByteOrder,
}

/// The large event header: 16-bit id, 32-bit compact timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventHeaderLargeDeclaration {
    /// Byte order of every integer in the header.
    pub byte_order: ByteOrder,
}

impl EventHeaderCompactDeclaration {
    /// Whether `candidate` is exactly the canonical compact header shape.
    #[must_use]
    pub fn matches(candidate: &StructDeclaration) -> bool {
        matches_header(candidate, 5, 27)
    }
}

impl EventHeaderLargeDeclaration {
    /// Whether `candidate` is exactly the canonical large header shape.
    #[must_use]
    pub fn matches(candidate: &StructDeclaration) -> bool {
        matches_header(candidate, 16, 32)
    }
}

/// Shape test shared by both layouts: `id_size` is the width of the id
/// enumeration's container, `compact_timestamp_size` the width of the
/// timestamp in the compact branch.
fn matches_header(candidate: &StructDeclaration, id_size: u64, compact_timestamp_size: u64) -> bool {
    if candidate.fields.len() != 2 {
        return false;
    }
    let Some(Declaration::Enum(id)) = candidate.field(ID) else {
        return false;
    };
    if id.container.signed || id.container.varint || id.container.size != id_size {
        return false;
    }
    let Some(Declaration::Variant(v)) = candidate.field(VARIANT) else {
        return false;
    };
    matches_variant(v, compact_timestamp_size)
}

fn matches_variant(v: &VariantDeclaration, compact_timestamp_size: u64) -> bool {
    if v.fields.len() != 2 {
        return false;
    }
    let Some(Declaration::Struct(compact)) = v.field(COMPACT) else {
        return false;
    };
    let Some(Declaration::Struct(extended)) = v.field(EXTENDED) else {
        return false;
    };
    matches_compact_branch(compact, compact_timestamp_size) && matches_extended_branch(extended)
}

/// The compact branch holds a lone unsigned timestamp of the layout's width.
fn matches_compact_branch(branch: &StructDeclaration, timestamp_size: u64) -> bool {
    branch.fields.len() == 1 && is_unsigned(branch.field(TIMESTAMP), timestamp_size)
}

/// The extended branch is the same in both layouts: full 32-bit id and
/// 64-bit timestamp.
fn matches_extended_branch(branch: &StructDeclaration) -> bool {
    branch.fields.len() == 2
        && is_unsigned(branch.field(ID), 32)
        && is_unsigned(branch.field(TIMESTAMP), 64)
}

fn is_unsigned(field: Option<&Declaration>, size: u64) -> bool {
    matches!(
        field,
        Some(Declaration::Integer(i)) if !i.signed && !i.varint && i.size == size
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composite::EnumDeclaration;
    use crate::declaration::IntegerDeclaration;

    fn timestamp_struct(size: u64, bo: ByteOrder) -> StructDeclaration {
        let mut s = StructDeclaration::new(1);
        s.add_field(
            TIMESTAMP,
            Declaration::Integer(IntegerDeclaration::unsigned(size, bo)),
        );
        s
    }

    fn extended_struct(bo: ByteOrder) -> StructDeclaration {
        let mut s = StructDeclaration::new(1);
        s.add_field(ID, Declaration::Integer(IntegerDeclaration::unsigned(32, bo)));
        s.add_field(
            TIMESTAMP,
            Declaration::Integer(IntegerDeclaration::unsigned(64, bo)),
        );
        s
    }

    fn header(id_size: u64, compact_timestamp_size: u64, bo: ByteOrder) -> StructDeclaration {
        let mut id = EnumDeclaration::new(IntegerDeclaration::unsigned(id_size, bo));
        let max = (1i64 << id_size) - 1;
        id.add_range(0, max - 1, COMPACT);
        id.add_range(max, max, EXTENDED);

        let mut v = VariantDeclaration::new(Some(ID.into()));
        v.add_field(COMPACT, Declaration::Struct(timestamp_struct(compact_timestamp_size, bo)));
        v.add_field(EXTENDED, Declaration::Struct(extended_struct(bo)));

        let mut s = StructDeclaration::new(8);
        s.add_field(ID, Declaration::Enum(id));
        s.add_field(VARIANT, Declaration::Variant(v));
        s
    }

    #[test]
    fn canonical_compact_matches() {
        let s = header(5, 27, ByteOrder::LittleEndian);
        assert!(EventHeaderCompactDeclaration::matches(&s));
        assert!(!EventHeaderLargeDeclaration::matches(&s));
    }

    #[test]
    fn canonical_large_matches() {
        let s = header(16, 32, ByteOrder::BigEndian);
        assert!(EventHeaderLargeDeclaration::matches(&s));
        assert!(!EventHeaderCompactDeclaration::matches(&s));
    }

    #[test]
    fn missing_field_falls_back() {
        let mut s = header(5, 27, ByteOrder::LittleEndian);
        s.fields.retain(|f| f.name != VARIANT);
        assert!(!EventHeaderCompactDeclaration::matches(&s));
    }

    #[test]
    fn signed_id_container_is_rejected() {
        let mut s = header(5, 27, ByteOrder::LittleEndian);
        if let Some(Declaration::Enum(e)) = s
            .fields
            .iter_mut()
            .find(|f| f.name == ID)
            .map(|f| &mut f.declaration)
        {
            e.container.signed = true;
        }
        assert!(!EventHeaderCompactDeclaration::matches(&s));
    }
}
