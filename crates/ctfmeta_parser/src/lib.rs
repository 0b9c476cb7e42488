//! TSDL and CTF2 JSON metadata parsers.
//!
//! This crate turns metadata documents into the immutable declarations
//! of `ctfmeta_model`. Both concrete syntaxes are normalized into one
//! [`MetadataTree`] first, so every declaration parser is written once:
//! a TSDL front end builds trees through [`TreeBuilder`], while the CTF2
//! adapter in [`json`] builds them from parsed JSON fragments.
//!
//! The entry point for a type is [`specifier::parse_type_specifier_list`],
//! which dispatches on node kinds and substitutes the specialized
//! event-header declarations where a struct matches a canonical layout.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod attribute;
pub mod blob;
pub mod clock;
pub mod enumeration;
pub mod float;
pub mod integer;
pub mod json;
mod kind;
pub mod literal;
pub mod specifier;
pub mod string;
pub mod structure;
mod tree;
pub mod typealias;
pub mod util;
pub mod variant;

pub use kind::NodeKind;
pub use tree::{AliasPayload, JsonPayload, MemberPayload, MetadataTree, NodeId, Syntax, TreeBuilder};

use ctfmeta_model::ByteOrder;

/// Trace-level context the parsers consult while resolving attributes.
///
/// Currently this is just the trace byte order, which `native` and
/// absent `byte_order` attributes resolve against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceContext {
    /// The byte order declared by the trace, used wherever a field class
    /// does not declare its own.
    pub byte_order: ByteOrder,
}

impl Default for TraceContext {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::native(),
        }
    }
}
