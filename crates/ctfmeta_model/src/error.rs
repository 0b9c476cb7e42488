//! Error types for the metadata declaration core.
//!
//! Uses `thiserror` for ergonomic error definition. There is one taxonomy:
//! a malformed metadata document produces a structural or semantic error
//! that propagates bottom-up and aborts the whole document. No partial
//! declaration tree is ever returned.

use thiserror::Error;

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for metadata parsing.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context naming the construct under parse.
    pub context: Option<String>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Creates a structural error: the metadata tree has an unexpected shape.
    #[must_use]
    pub fn structural(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Structural(message.into()))
    }

    /// Creates a semantic error: the tree is well-formed but its values are
    /// invalid (bad size, overlapping ranges, forbidden target, ...).
    #[must_use]
    pub fn semantic(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Semantic(message.into()))
    }

    /// Creates an error describing an invalid parent/child node pairing.
    #[must_use]
    pub fn unexpected_child(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnexpectedChild {
            parent: parent.into(),
            child: child.into(),
        })
    }

    /// Creates an unknown-type error for a failed alias lookup.
    #[must_use]
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownType(name.into()))
    }

    /// Creates a duplicate-name error for a second registration in one frame.
    #[must_use]
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateName(name.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The metadata tree has an unexpected shape.
    #[error("{0}")]
    Structural(String),

    /// The tree is well-formed but a value is invalid.
    #[error("{0}")]
    Semantic(String),

    /// A node kind appeared under a parent that cannot contain it.
    #[error("parent {parent} cannot have a child of kind {child}")]
    UnexpectedChild {
        /// Kind name of the parent node.
        parent: String,
        /// Kind name of the offending child node.
        child: String,
    },

    /// A type alias lookup found no declaration.
    #[error("{0} is not a registered type")]
    UnknownType(String),

    /// A name was registered twice in the same scope frame.
    #[error("{0} is already defined in the current scope")]
    DuplicateName(String),
}
