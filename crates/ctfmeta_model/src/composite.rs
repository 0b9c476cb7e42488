//! Composite declarations: structs, variants and enumerations.

use crate::declaration::{Declaration, IntegerDeclaration};

// =============================================================================
// Struct
// =============================================================================

/// One named field of a struct or variant, in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct StructField {
    /// Field name.
    pub name: String,
    /// How to decode the field.
    pub declaration: Declaration,
}

/// An ordered sequence of named fields.
#[derive(Clone, Debug, PartialEq)]
pub struct StructDeclaration {
    /// Alignment in bits: the declared minimum, raised to the largest
    /// field alignment.
    pub alignment: u64,
    /// Fields in declaration order.
    pub fields: Vec<StructField>,
}

impl StructDeclaration {
    /// Creates an empty struct with the given minimum alignment.
    #[must_use]
    pub fn new(min_alignment: u64) -> Self {
        Self {
            alignment: min_alignment.max(1),
            fields: Vec::new(),
        }
    }

    /// Appends a field, raising the struct alignment to the field's.
    pub fn add_field(&mut self, name: impl Into<String>, declaration: Declaration) {
        self.alignment = self.alignment.max(declaration.alignment());
        self.fields.push(StructField {
            name: name.into(),
            declaration,
        });
    }

    /// Whether a field with this name exists.
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// The declaration of the named field, if present.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Declaration> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.declaration)
    }
}

// =============================================================================
// Variant
// =============================================================================

/// A union whose active member is selected by a discriminant field.
///
/// A variant is *tagged* when it names the field holding its discriminant.
/// Untagged variants are only legal in positions where an enclosing
/// construct supplies the tag; a `typealias` may never target one.
#[derive(Clone, Debug, PartialEq)]
pub struct VariantDeclaration {
    /// Name of the discriminant field, when tagged.
    pub tag: Option<String>,
    /// Possible members, in declaration order.
    pub fields: Vec<StructField>,
}

impl VariantDeclaration {
    /// Creates an empty variant with an optional tag reference.
    #[must_use]
    pub fn new(tag: Option<String>) -> Self {
        Self {
            tag,
            fields: Vec::new(),
        }
    }

    /// Whether this variant names its discriminant field.
    #[must_use]
    pub fn is_tagged(&self) -> bool {
        self.tag.is_some()
    }

    /// Whether a member with this name exists.
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// The declaration of the named member, if present.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Declaration> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.declaration)
    }

    /// Appends a member.
    pub fn add_field(&mut self, name: impl Into<String>, declaration: Declaration) {
        self.fields.push(StructField {
            name: name.into(),
            declaration,
        });
    }

    /// Alignment of the widest member; 1 for an empty variant.
    #[must_use]
    pub fn alignment(&self) -> u64 {
        self.fields
            .iter()
            .map(|f| f.declaration.alignment())
            .max()
            .unwrap_or(1)
    }
}

// =============================================================================
// Enum
// =============================================================================

/// One labeled value range of an enumeration. `low == high` for single
/// values. Ranges are inclusive on both ends.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumRange {
    /// Low bound, inclusive.
    pub low: i64,
    /// High bound, inclusive.
    pub high: i64,
    /// Label mapped to this range.
    pub label: String,
}

/// An enumeration over an integer container type.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumDeclaration {
    /// The integer type holding the raw value.
    pub container: IntegerDeclaration,
    /// Labeled ranges, in declaration order. Overlap is permitted.
    pub ranges: Vec<EnumRange>,
}

impl EnumDeclaration {
    /// Creates an empty enumeration over the given container.
    #[must_use]
    pub fn new(container: IntegerDeclaration) -> Self {
        Self {
            container,
            ranges: Vec::new(),
        }
    }

    /// Adds a labeled range. Returns false without inserting when an
    /// identical (low, high, label) triple is already present; distinct
    /// overlapping ranges are accepted.
    pub fn add_range(&mut self, low: i64, high: i64, label: impl Into<String>) -> bool {
        let label = label.into();
        if self
            .ranges
            .iter()
            .any(|r| r.low == low && r.high == high && r.label == label)
        {
            return false;
        }
        self.ranges.push(EnumRange { low, high, label });
        true
    }

    /// Adds a label with an auto-incremented value: one past the high
    /// bound of the most recently added range, starting at 0. Returns
    /// false on `i64` overflow.
    pub fn add_label(&mut self, label: impl Into<String>) -> bool {
        let next = match self.ranges.last().map(|r| r.high) {
            Some(i64::MAX) => return false,
            Some(high) => high + 1,
            None => 0,
        };
        self.ranges.push(EnumRange {
            low: next,
            high: next,
            label: label.into(),
        });
        true
    }

    /// The label whose range contains `value`, preferring earlier
    /// declarations when ranges overlap.
    #[must_use]
    pub fn label_for(&self, value: i64) -> Option<&str> {
        self.ranges
            .iter()
            .find(|r| r.low <= value && value <= r.high)
            .map(|r| r.label.as_str())
    }
}
