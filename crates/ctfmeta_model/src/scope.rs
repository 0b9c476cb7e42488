//! Lexically chained declaration scopes.
//!
//! Each nested textual block (trace/stream/event, struct and variant
//! bodies) pushes a frame; lookups walk from the innermost frame outward,
//! while registration only ever writes into the current frame. Frames are
//! discarded when their block finishes parsing; the declarations they
//! helped build outlive them by value.

use std::collections::BTreeMap;

use crate::declaration::Declaration;
use crate::error::{Error, Result};

/// One frame of the scope chain. Type aliases, structs, variants and
/// enums live in separate namespaces, as they do in the metadata language
/// (`struct foo` and `typealias ... := foo` never collide).
#[derive(Debug, Default)]
struct ScopeFrame {
    types: BTreeMap<String, Declaration>,
    structs: BTreeMap<String, Declaration>,
    variants: BTreeMap<String, Declaration>,
    enums: BTreeMap<String, Declaration>,
}

/// An append-only name-to-declaration table with lexical chaining.
///
/// Mutable only during the single parse pass of one metadata document;
/// the declarations handed out of the parser are plain values with no
/// reference back into the scope.
#[derive(Debug)]
pub struct DeclarationScope {
    frames: Vec<ScopeFrame>,
}

impl Default for DeclarationScope {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationScope {
    /// Creates a scope with a single root frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: vec![ScopeFrame::default()],
        }
    }

    /// Enters a nested block.
    pub fn push(&mut self) {
        self.frames.push(ScopeFrame::default());
    }

    /// Leaves the current block, discarding its registrations. The root
    /// frame is never popped.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Number of live frames, root included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    fn current(&mut self) -> &mut ScopeFrame {
        self.frames.last_mut().expect("scope always has a root frame")
    }

    fn register(
        map: fn(&mut ScopeFrame) -> &mut BTreeMap<String, Declaration>,
        frame: &mut ScopeFrame,
        name: &str,
        declaration: Declaration,
    ) -> Result<()> {
        let map = map(frame);
        if map.contains_key(name) {
            // Re-registration in one frame is a schema authoring error;
            // shadowing an outer frame remains legal.
            return Err(Error::duplicate_name(name));
        }
        map.insert(name.to_owned(), declaration);
        Ok(())
    }

    fn lookup<'a>(
        &'a self,
        map: fn(&'a ScopeFrame) -> &'a BTreeMap<String, Declaration>,
        name: &str,
    ) -> Option<&'a Declaration> {
        self.frames.iter().rev().find_map(|frame| map(frame).get(name))
    }

    /// Registers a type alias in the current frame.
    ///
    /// # Errors
    /// Fails when the name is already registered in the current frame.
    pub fn register_type(&mut self, name: &str, declaration: Declaration) -> Result<()> {
        Self::register(|f| &mut f.types, self.current(), name, declaration)
    }

    /// Looks a type alias up through the chain, innermost frame first.
    #[must_use]
    pub fn lookup_type(&self, name: &str) -> Option<&Declaration> {
        self.lookup(|f| &f.types, name)
    }

    /// Registers a named struct in the current frame.
    ///
    /// # Errors
    /// Fails when the name is already registered in the current frame.
    pub fn register_struct(&mut self, name: &str, declaration: Declaration) -> Result<()> {
        Self::register(|f| &mut f.structs, self.current(), name, declaration)
    }

    /// Looks a named struct up through the chain.
    #[must_use]
    pub fn lookup_struct(&self, name: &str) -> Option<&Declaration> {
        self.lookup(|f| &f.structs, name)
    }

    /// Registers a named variant in the current frame.
    ///
    /// # Errors
    /// Fails when the name is already registered in the current frame.
    pub fn register_variant(&mut self, name: &str, declaration: Declaration) -> Result<()> {
        Self::register(|f| &mut f.variants, self.current(), name, declaration)
    }

    /// Looks a named variant up through the chain.
    #[must_use]
    pub fn lookup_variant(&self, name: &str) -> Option<&Declaration> {
        self.lookup(|f| &f.variants, name)
    }

    /// Registers a named enum in the current frame.
    ///
    /// # Errors
    /// Fails when the name is already registered in the current frame.
    pub fn register_enum(&mut self, name: &str, declaration: Declaration) -> Result<()> {
        Self::register(|f| &mut f.enums, self.current(), name, declaration)
    }

    /// Looks a named enum up through the chain.
    #[must_use]
    pub fn lookup_enum(&self, name: &str) -> Option<&Declaration> {
        self.lookup(|f| &f.enums, name)
    }
}
