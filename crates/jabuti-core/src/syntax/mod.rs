//! Syntax tree adapter for the concrete syntax tree handed over by the front end
//!
//! The Jabuti grammar front end produces a concrete syntax tree: every node
//! carries a kind, ordered children and, for leaves, its raw source text.
//! This module owns that representation and its JSON interchange form.
//!
//! Positional knowledge ("the third child of a role player is the party")
//! lives only in [`view`], which wraps nodes in typed views with named
//! accessors, and in [`build`], which constructs nodes in the same layout.
//!
//! # Interchange form
//!
//! ```text
//! { "kind": "timeout", "children": [
//!     { "kind": "token", "text": "Timeout" },
//!     { "kind": "token", "text": "(" },
//!     { "kind": "token", "text": "86400" },
//!     { "kind": "token", "text": ")" } ] }
//! ```

pub mod build;
pub mod view;

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Every node kind the Jabuti grammar produces
///
/// The set is closed: adding a production means adding a variant here, and
/// every dispatch point in the crate matches exhaustively on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Contract,
    Variables,
    Dates,
    BeginDate,
    DueDate,
    Parties,
    Application,
    Process,
    Clauses,
    Clause,
    RolePlayer,
    OnBreach,
    Terms,
    TermOrWhen,
    Term,
    Timeout,
    MessageContent,
    Interval,
    MaxNumberOfOperation,
    Identifier,
    Date,
    DateTime,
    /// Keywords, punctuation, operators and literals
    Token,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Contract => "contract",
            NodeKind::Variables => "variables",
            NodeKind::Dates => "dates",
            NodeKind::BeginDate => "begin-date",
            NodeKind::DueDate => "due-date",
            NodeKind::Parties => "parties",
            NodeKind::Application => "application",
            NodeKind::Process => "process",
            NodeKind::Clauses => "clauses",
            NodeKind::Clause => "clause",
            NodeKind::RolePlayer => "role-player",
            NodeKind::OnBreach => "on-breach",
            NodeKind::Terms => "terms",
            NodeKind::TermOrWhen => "term-or-when",
            NodeKind::Term => "term",
            NodeKind::Timeout => "timeout",
            NodeKind::MessageContent => "message-content",
            NodeKind::Interval => "interval",
            NodeKind::MaxNumberOfOperation => "max-number-of-operation",
            NodeKind::Identifier => "identifier",
            NodeKind::Date => "date",
            NodeKind::DateTime => "date-time",
            NodeKind::Token => "token",
        }
    }

    /// Date and datetime literals
    pub fn is_date_literal(&self) -> bool {
        matches!(self, NodeKind::Date | NodeKind::DateTime)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of the concrete syntax tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    /// Source text of a leaf; empty for interior nodes
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    /// Interior node
    pub fn node(kind: NodeKind, children: Vec<SyntaxNode>) -> Self {
        SyntaxNode {
            kind,
            text: String::new(),
            children,
        }
    }

    /// Leaf node of any kind
    pub fn leaf(kind: NodeKind, text: impl Into<String>) -> Self {
        SyntaxNode {
            kind,
            text: text.into(),
            children: Vec::new(),
        }
    }

    pub fn token(text: impl Into<String>) -> Self {
        Self::leaf(NodeKind::Token, text)
    }

    pub fn identifier(text: impl Into<String>) -> Self {
        Self::leaf(NodeKind::Identifier, text)
    }

    /// Decode a tree from its JSON interchange form
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|e| Error::TreeDecode(e.to_string()))
    }

    /// Raw source text of this node.
    ///
    /// Leaves return their own text; interior nodes return the concatenated
    /// text of their leaves, without whitespace, as the front end's
    /// `getText()` does.
    pub fn text(&self) -> Cow<'_, str> {
        if self.children.is_empty() {
            return Cow::Borrowed(&self.text);
        }
        let mut out = String::new();
        for leaf in self.descendants().filter(|n| n.children.is_empty()) {
            out.push_str(&leaf.text);
        }
        Cow::Owned(out)
    }

    pub fn child(&self, index: usize) -> Option<&SyntaxNode> {
        self.children.get(index)
    }

    pub fn children_of(&self, kind: NodeKind) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter(move |c| c.kind == kind)
    }

    pub fn first_child_of(&self, kind: NodeKind) -> Option<&SyntaxNode> {
        self.children_of(kind).next()
    }

    /// Pre-order walk over this node and everything below it
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Iterator returned by [`SyntaxNode::descendants`]
pub struct Descendants<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
