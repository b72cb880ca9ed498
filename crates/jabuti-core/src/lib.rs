//! Jabuti Core - semantic analysis for the Jabuti contract language
//!
//! Lowers the concrete syntax tree produced by the Jabuti grammar front end
//! into a canonical, target-agnostic [`Contract`] model. Code generators
//! consume that model to emit smart-contract source.
//!
//! # Architecture
//!
//! ```text
//! Front end → SyntaxNode → Canonicalizer → Contract → Code generators
//!                              ↓
//!                       Clause lowering → Message-condition analyzer
//!                              ↓
//!                       Identifier naming {pascal, camel, snake}
//! ```
//!
//! # Guarantees
//!
//! - **Deterministic**: same tree always produces an identical Contract
//! - **Pure**: no I/O, no shared state; calls may run in parallel
//! - **Lossless**: every operand is classified as literal or typed variable
//! - **Unique names**: every generated term name is unique within its clause

pub mod analyzer;
pub mod canonicalizer;
pub mod error;
pub mod lowering;
pub mod naming;
pub mod syntax;

pub use canonicalizer::{canonicalize, canonicalize_json, compute_semantic_hash, serialize_canonical};
pub use error::{Error, Result};
pub use syntax::{NodeKind, SyntaxNode};

use serde::{Deserialize, Serialize};

/// Canonical contract model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub name: String,
    /// Raw date literal, parsed by the code generators
    pub begin_date: String,
    pub due_date: String,
    pub application: String,
    pub process: String,
    /// Contract-level variables; not populated by this pass
    pub variables: Vec<Variable>,
    /// Clauses in declaration order
    pub clauses: Vec<Clause>,
}

/// One logical symbol rendered in the three casing conventions the
/// generated code needs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentifierName {
    pub pascal: String,
    pub camel: String,
    pub snake: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clause {
    pub name: IdentifierName,
    /// Clause category keyword as written in the source
    #[serde(rename = "type")]
    pub kind: String,
    pub role_player: String,
    pub operation: String,
    /// Deduplicated by camel name, in first-discovery order
    pub variables: Vec<Variable>,
    pub terms: Vec<Term>,
    pub messages: Messages,
}

impl Clause {
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn variable(&self, camel: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name.camel == camel)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Messages {
    pub error: String,
    /// No production fills this yet
    pub success: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: IdentifierName,
    #[serde(rename = "type")]
    pub ty: VariableType,
}

/// Inferred variable type. Comparison types are upper-case on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableType {
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "TEXT")]
    Text,
    #[serde(rename = "NUMBER")]
    Number,
}

impl std::fmt::Display for VariableType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            VariableType::Boolean => write!(f, "boolean"),
            VariableType::Text => write!(f, "TEXT"),
            VariableType::Number => write!(f, "NUMBER"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Term {
    Timeout {
        name: IdentifierName,
        /// Raw numeric text
        value: String,
    },
    MessageContent {
        name: IdentifierName,
        condition: Condition,
    },
}

impl Term {
    pub fn name(&self) -> &IdentifierName {
        match self {
            Term::Timeout { name, .. } | Term::MessageContent { name, .. } => name,
        }
    }

    /// Variables bound by this term
    pub fn variables(&self) -> Vec<&Variable> {
        match self {
            Term::Timeout { .. } => Vec::new(),
            Term::MessageContent { condition, .. } => condition.variables(),
        }
    }

    pub fn comparator(&self) -> Option<&str> {
        match self {
            Term::Timeout { .. } => None,
            Term::MessageContent { condition, .. } => condition.comparator(),
        }
    }
}

/// A message-content condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "camelCase")]
pub enum Condition {
    /// Bare truthy check on the message
    Presence { variable: Variable },
    /// Binary comparison between two operands
    Comparison {
        left: Operand,
        comparator: String,
        right: Operand,
    },
}

impl Condition {
    pub fn variables(&self) -> Vec<&Variable> {
        match self {
            Condition::Presence { variable } => vec![variable],
            Condition::Comparison { left, right, .. } => {
                [left, right].into_iter().filter_map(Operand::variable).collect()
            }
        }
    }

    pub fn comparator(&self) -> Option<&str> {
        match self {
            Condition::Presence { .. } => None,
            Condition::Comparison { comparator, .. } => Some(comparator),
        }
    }
}

/// One side of a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    /// Numeric literal, carried as written
    Literal(String),
    Variable(Variable),
}

impl Operand {
    pub fn variable(&self) -> Option<&Variable> {
        match self {
            Operand::Literal(_) => None,
            Operand::Variable(v) => Some(v),
        }
    }
}
