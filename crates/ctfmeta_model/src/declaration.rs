//! The declaration sum type and its scalar variants.
//!
//! A [`Declaration`] tells the binary decoder how many bits to read, at what
//! alignment and byte order, and how to interpret them. Declarations are
//! built once per metadata document and never mutated afterward.

use crate::composite::{EnumDeclaration, StructDeclaration, VariantDeclaration};
use crate::event_header::{EventHeaderCompactDeclaration, EventHeaderLargeDeclaration};

/// Byte order of a fixed-width value.
///
/// `native` and `network` TSDL keywords are resolved against the trace-wide
/// byte order while parsing; declarations only ever carry a concrete order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    /// Least significant byte first.
    LittleEndian,
    /// Most significant byte first.
    BigEndian,
}

impl ByteOrder {
    /// The byte order of the machine running this code.
    #[must_use]
    pub fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::BigEndian
        } else {
            Self::LittleEndian
        }
    }
}

/// Character encoding of a string or integer field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Encoding {
    /// UTF-8 (the CTF default for strings).
    #[default]
    Utf8,
    /// 7-bit ASCII.
    Ascii,
    /// No encoding; the bytes are not text.
    None,
}

/// Preferred display base of an integer field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DisplayBase {
    /// Base 2.
    Binary,
    /// Base 8.
    Octal,
    /// Base 10 (the default).
    #[default]
    Decimal,
    /// Base 16.
    Hexadecimal,
}

impl DisplayBase {
    /// Maps a numeric radix literal to a display base.
    #[must_use]
    pub fn from_radix(radix: i64) -> Option<Self> {
        match radix {
            2 => Some(Self::Binary),
            8 => Some(Self::Octal),
            10 => Some(Self::Decimal),
            16 => Some(Self::Hexadecimal),
            _ => None,
        }
    }
}

// =============================================================================
// Scalar declarations
// =============================================================================

/// A fixed- or variable-width two's complement integer.
#[derive(Clone, Debug, PartialEq)]
pub struct IntegerDeclaration {
    /// Width in bits. Always at least 1 for fixed-width integers.
    pub size: u64,
    /// Alignment in bits. Never 0; unaligned integers use 1.
    pub alignment: u64,
    /// Signedness. Unsigned unless the metadata says otherwise.
    pub signed: bool,
    /// Byte order of the stored value.
    pub byte_order: ByteOrder,
    /// Preferred display base.
    pub base: DisplayBase,
    /// Encoding, for integers used as text (char arrays).
    pub encoding: Encoding,
    /// Name of the clock this integer samples, if it is a timestamp.
    pub clock: Option<String>,
    /// LEB128-style variable width integer (CTF2 varint field classes).
    pub varint: bool,
    /// CTF2 role of the field (`packet-magic-number`, ...).
    pub role: Option<String>,
}

impl IntegerDeclaration {
    /// Creates a plain unsigned integer of the given width, byte-aligned.
    ///
    /// This is the shape used by the canonical event-header layouts.
    #[must_use]
    pub fn unsigned(size: u64, byte_order: ByteOrder) -> Self {
        Self {
            size,
            alignment: if size % 8 == 0 { 8 } else { 1 },
            signed: false,
            byte_order,
            base: DisplayBase::Decimal,
            encoding: Encoding::None,
            clock: None,
            varint: false,
            role: None,
        }
    }

    /// Creates a variable-width integer declaration. Varints carry no fixed
    /// size, alignment or byte order; the decoder reads them byte by byte.
    #[must_use]
    pub fn varint(signed: bool, base: DisplayBase, role: Option<String>) -> Self {
        Self {
            size: 0,
            alignment: 8,
            signed,
            byte_order: ByteOrder::native(),
            base,
            encoding: Encoding::None,
            clock: None,
            varint: true,
            role,
        }
    }

    /// Smallest value representable in this integer's container.
    ///
    /// Varints have no fixed container; they report the full `i64` range.
    #[must_use]
    pub fn minimum_value(&self) -> i128 {
        if !self.signed {
            0
        } else if self.varint || self.size == 0 || self.size > 64 {
            i128::from(i64::MIN)
        } else {
            -(1i128 << (self.size - 1))
        }
    }

    /// Largest value representable in this integer's container.
    #[must_use]
    pub fn maximum_value(&self) -> i128 {
        if self.varint || self.size == 0 || self.size > 64 {
            if self.signed {
                i128::from(i64::MAX)
            } else {
                i128::from(u64::MAX)
            }
        } else if self.signed {
            (1i128 << (self.size - 1)) - 1
        } else {
            (1i128 << self.size) - 1
        }
    }
}

/// An IEEE-754-style binary float, split into exponent and mantissa widths.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatDeclaration {
    /// Exponent width in bits.
    pub exponent: u64,
    /// Mantissa width in bits, including the implicit bit.
    pub mantissa: u64,
    /// Byte order of the stored value.
    pub byte_order: ByteOrder,
    /// Alignment in bits.
    pub alignment: u64,
}

/// A null-terminated byte string.
#[derive(Clone, Debug, PartialEq)]
pub struct StringDeclaration {
    /// Character encoding; UTF-8 when the metadata is silent.
    pub encoding: Encoding,
}

impl StringDeclaration {
    /// Creates a string declaration with the given encoding.
    #[must_use]
    pub fn new(encoding: Encoding) -> Self {
        Self { encoding }
    }
}

impl Default for StringDeclaration {
    fn default() -> Self {
        Self::new(Encoding::Utf8)
    }
}

/// A fixed-length sequence of opaque bytes with an IANA media type.
#[derive(Clone, Debug, PartialEq)]
pub struct BlobDeclaration {
    /// Length in bytes. Always at least 1.
    pub length: u64,
    /// IANA media type; `application/octet-stream` when unspecified.
    pub media_type: String,
    /// CTF2 role of the field, passed through unchanged.
    pub role: Option<String>,
}

// =============================================================================
// The sum type
// =============================================================================

/// A description of how to decode one typed value out of a byte stream.
///
/// This is a closed set: every consumer matches exhaustively, so adding a
/// variant is a deliberate, compiler-checked event.
#[derive(Clone, Debug, PartialEq)]
pub enum Declaration {
    /// Fixed- or variable-width integer.
    Integer(IntegerDeclaration),
    /// Binary float.
    Float(FloatDeclaration),
    /// Null-terminated string.
    Str(StringDeclaration),
    /// Fixed-length binary blob.
    Blob(BlobDeclaration),
    /// Enumeration over an integer container.
    Enum(EnumDeclaration),
    /// Ordered named fields.
    Struct(StructDeclaration),
    /// Tagged or untagged union.
    Variant(VariantDeclaration),
    /// Struct recognized as the canonical compact event header.
    EventHeaderCompact(EventHeaderCompactDeclaration),
    /// Struct recognized as the canonical large event header.
    EventHeaderLarge(EventHeaderLargeDeclaration),
}

impl Declaration {
    /// Alignment in bits the decoder must honor before reading this value.
    #[must_use]
    pub fn alignment(&self) -> u64 {
        match self {
            Self::Integer(i) => i.alignment,
            Self::Float(f) => f.alignment,
            Self::Str(_) | Self::Blob(_) => 8,
            Self::Enum(e) => e.container.alignment,
            Self::Struct(s) => s.alignment,
            Self::Variant(v) => v.alignment(),
            Self::EventHeaderCompact(_) | Self::EventHeaderLarge(_) => 8,
        }
    }
}
