//! Error types for the Jabuti canonicalizer
//!
//! All fallible operations return `Result<T, Error>`.
//!
//! Every variant here is a compiler-internal failure: it means the syntax
//! tree handed over by the front end does not have a shape the grammar can
//! produce, or that an interchange document could not be decoded. Language
//! level problems in a contract (undeclared parties, type mismatches) are
//! reported by the front end's validation listener, never through this type.

use crate::syntax::NodeKind;

/// Canonicalizer error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A slot that every production fills is absent
    #[error("Malformed syntax tree: {node} node has no {slot}")]
    MalformedTree { node: NodeKind, slot: &'static str },

    /// A node has a child count no production allows
    #[error("Malformed syntax tree: {node} node has {found} children, expected {expected}")]
    UnexpectedArity {
        node: NodeKind,
        found: usize,
        expected: &'static str,
    },

    /// A node was handed to a view of a different kind
    #[error("Malformed syntax tree: expected {expected} node, found {found}")]
    UnexpectedKind { expected: NodeKind, found: NodeKind },

    /// Interchange JSON could not be decoded into a syntax tree
    #[error("Syntax tree decode error: {0}")]
    TreeDecode(String),

    /// Canonical serialization failure
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for canonicalizer operations
pub type Result<T> = std::result::Result<T, Error>;
