//! Declarations, scopes and clocks for CTF trace decoding.
//!
//! This crate provides:
//! - [`Declaration`] - The closed sum type describing how to decode one value
//! - [`DeclarationScope`] - Lexically chained alias registration and lookup
//! - [`Clock`] - Timestamp source metadata (frequency, offsets, precision)
//! - [`Error`] - The single structural/semantic metadata error taxonomy
//!
//! Everything built here is an immutable value object: once a metadata
//! document has been parsed, the resulting declarations can be shared
//! read-only across any number of trace-reading threads.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod clock;
mod composite;
mod declaration;
mod error;
mod event_header;
mod scope;

pub use clock::{Clock, ClockValue, UNIX_EPOCH};
pub use composite::{EnumDeclaration, EnumRange, StructDeclaration, StructField, VariantDeclaration};
pub use declaration::{
    BlobDeclaration, ByteOrder, Declaration, DisplayBase, Encoding, FloatDeclaration,
    IntegerDeclaration, StringDeclaration,
};
pub use error::{Error, ErrorKind, Result};
pub use event_header::{EventHeaderCompactDeclaration, EventHeaderLargeDeclaration};
pub use scope::DeclarationScope;
