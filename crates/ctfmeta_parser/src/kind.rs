//! Node kind discriminants.
//!
//! Every metadata node carries an explicit [`NodeKind`] assigned once
//! during tree construction. All dispatch in the parsers happens by
//! pattern matching on this enum; no string comparison against a token
//! table survives past the front ends.

use std::fmt;

/// The kind of a metadata node, covering both concrete syntaxes.
///
/// The TSDL kinds mirror the front end's grammar productions; the CTF2
/// kinds mirror its fragment and field-class node set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Document root.
    Root,

    // -- typealias ----------------------------------------------------------
    /// A `typealias TARGET := ALIAS;` statement.
    Typealias,
    /// The target side of a typealias.
    TypealiasTarget,
    /// The alias side of a typealias.
    TypealiasAlias,

    // -- type specifiers and declarators ------------------------------------
    /// An ordered list of type specifiers.
    TypeSpecifierList,
    /// An ordered list of type declarators.
    TypeDeclaratorList,
    /// One declarator: pointers plus an optional identifier.
    TypeDeclarator,
    /// A `*` pointer qualifier.
    Pointer,
    /// A bare identifier.
    Identifier,

    // -- attribute expressions ----------------------------------------------
    /// A `key = value;` attribute expression.
    CtfExpressionVal,
    /// The key side of an attribute expression.
    CtfLeft,
    /// The value side of an attribute expression.
    CtfRight,

    // -- unary expressions ---------------------------------------------------
    /// Decimal integer literal.
    UnaryExpressionDec,
    /// Hexadecimal integer literal.
    UnaryExpressionHex,
    /// Octal integer literal.
    UnaryExpressionOct,
    /// Unquoted string literal (identifier-like).
    UnaryExpressionString,
    /// Double-quoted string literal, quotes included in the text.
    UnaryExpressionStringQuotes,
    /// An `->` link in an identifier chain.
    Arrow,
    /// A `.` link in an identifier chain.
    Dot,

    // -- type bodies ----------------------------------------------------------
    /// An `integer { ... }` specifier.
    Integer,
    /// A `floating_point { ... }` specifier.
    FloatingPoint,
    /// A `string { ... }` specifier.
    String,
    /// A `struct name { ... } align(n)` specifier.
    Struct,
    /// The name of a struct specifier.
    StructName,
    /// The body of a struct specifier.
    StructBody,
    /// The `align(n)` attribute of a struct specifier.
    Align,
    /// A `variant name <tag> { ... }` specifier.
    Variant,
    /// The name of a variant specifier.
    VariantName,
    /// The `<tag>` reference of a variant specifier.
    VariantTag,
    /// The body of a variant specifier.
    VariantBody,
    /// An `enum name : container { ... }` specifier.
    Enum,
    /// The name of an enum specifier.
    EnumName,
    /// The container type of an enum specifier.
    EnumContainerType,
    /// The body of an enum specifier.
    EnumBody,
    /// One enumerator in an enum body.
    Enumerator,
    /// An explicit single enumerator value.
    EnumValue,
    /// An explicit enumerator value range.
    EnumValueRange,
    /// One member declaration in a struct or variant body.
    StructOrVariantDeclaration,

    // -- clock ----------------------------------------------------------------
    /// A `clock { ... }` block (its children are attribute expressions).
    Clock,

    // -- built-in scalar type keywords ---------------------------------------
    /// The `float` keyword.
    FloatTok,
    /// The `int` keyword.
    IntTok,
    /// The `long` keyword.
    LongTok,
    /// The `short` keyword.
    ShortTok,
    /// The `signed` keyword.
    SignedTok,
    /// The `unsigned` keyword.
    UnsignedTok,
    /// The `char` keyword.
    CharTok,
    /// The `double` keyword.
    DoubleTok,
    /// The `void` keyword.
    VoidTok,
    /// The `_Bool` keyword.
    BoolTok,
    /// The `_Complex` keyword.
    ComplexTok,
    /// The `_Imaginary` keyword.
    ImaginaryTok,
    /// The `const` keyword.
    ConstTok,

    // -- CTF2 JSON fragments --------------------------------------------------
    /// A preamble fragment.
    Preamble,
    /// A trace-class fragment.
    TraceClass,
    /// A clock-class fragment.
    ClockClass,
    /// A field-class-alias fragment.
    FieldClassAlias,
    /// A data-stream-class fragment.
    DataStreamClass,
    /// An event-record-class fragment.
    EventRecordClass,
    /// A structure field-class.
    StructureField,
    /// A named member of a structure or variant field-class.
    StructureFieldMember,
}

impl NodeKind {
    /// Whether this kind is one of the built-in scalar type keywords that
    /// participate in alias names (`unsigned long`, `signed char`, ...).
    #[must_use]
    pub fn is_scalar_keyword(self) -> bool {
        matches!(
            self,
            Self::FloatTok
                | Self::IntTok
                | Self::LongTok
                | Self::ShortTok
                | Self::SignedTok
                | Self::UnsignedTok
                | Self::CharTok
                | Self::DoubleTok
                | Self::VoidTok
                | Self::BoolTok
                | Self::ComplexTok
                | Self::ImaginaryTok
                | Self::ConstTok
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
