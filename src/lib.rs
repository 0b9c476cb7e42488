//! ctfmeta - CTF trace metadata declarations
//!
//! This crate re-exports both layers of the ctfmeta system for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: ctfmeta_parser — TSDL and CTF2 JSON parsers, metadata tree
//! Layer 0: ctfmeta_model  — Declarations, scopes, clocks, errors
//! ```

pub use ctfmeta_model as model;
pub use ctfmeta_parser as parser;
