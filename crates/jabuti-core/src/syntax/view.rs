//! Typed views over syntax nodes
//!
//! Each view wraps one node of a known kind and exposes its parts through
//! named accessors. This is the only place that knows which child slot of a
//! production carries which meaning; the layout below is the contract with
//! the front end and [`super::build`] produces exactly this shape.
//!
//! ```text
//! contract        := "contract" identifier "{" (variables | dates | parties | clauses)* "}"
//! dates           := "dates" "{" begin-date due-date "}"
//! begin-date      := "beginDate" "=" (date | date-time)
//! due-date        := "dueDate" "=" (date | date-time)
//! parties         := "parties" "{" application process "}"
//! application     := "application" "=" identifier
//! process         := "process" "=" identifier
//! clauses         := "clauses" "{" clause* "}"
//! clause          := KIND identifier "{" role-player terms on-breach? "}"
//! role-player     := "rolePlayer" "=" identifier
//! on-breach       := "onBreach" "(" token ")"
//! terms           := "terms" "{" (term-or-when | term)* "}"
//! term-or-when    := (term-or-when | term)*
//! term            := "term" identifier "=" (timeout | message-content | interval | max-number-of-operation)
//! timeout         := "Timeout" "(" token ")"
//! message-content := "MessageContent" "(" ")"
//!                  | "MessageContent" "(" operand ")"
//!                  | "MessageContent" "(" operand comparator operand ")"
//! ```
//!
//! Slots that every production fills are returned as `Result` and fail fast
//! with [`Error::MalformedTree`] when absent. Slots the grammar makes
//! optional are returned as `Option`.

use std::borrow::Cow;

use super::{NodeKind, SyntaxNode};
use crate::{Error, Result};

macro_rules! syntax_view {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name<'a> {
            node: &'a SyntaxNode,
        }

        impl<'a> $name<'a> {
            pub const KIND: NodeKind = NodeKind::$kind;

            pub fn cast(node: &'a SyntaxNode) -> Result<Self> {
                if node.kind == Self::KIND {
                    Ok(Self { node })
                } else {
                    Err(Error::UnexpectedKind {
                        expected: Self::KIND,
                        found: node.kind,
                    })
                }
            }

            pub fn syntax(&self) -> &'a SyntaxNode {
                self.node
            }
        }
    };
}

syntax_view!(
    /// Root of a contract document
    ContractSyntax => Contract
);
syntax_view!(DatesSyntax => Dates);
syntax_view!(PartiesSyntax => Parties);
syntax_view!(
    /// One clause: kind token, local name, role player, terms, breach message
    ClauseSyntax => Clause
);
syntax_view!(RolePlayerSyntax => RolePlayer);
syntax_view!(OnBreachSyntax => OnBreach);
syntax_view!(TermsSyntax => Terms);
syntax_view!(TermSyntax => Term);
syntax_view!(TimeoutSyntax => Timeout);
syntax_view!(MessageContentSyntax => MessageContent);

fn slot<'a>(node: &'a SyntaxNode, index: usize, name: &'static str) -> Result<&'a SyntaxNode> {
    node.child(index).ok_or(Error::MalformedTree {
        node: node.kind,
        slot: name,
    })
}

// ── Contract level ─────────────────────────────────────────

impl<'a> ContractSyntax<'a> {
    /// Contract identifier, absent in anonymous contracts
    pub fn name(&self) -> Option<Cow<'a, str>> {
        self.node
            .first_child_of(NodeKind::Identifier)
            .map(|n| n.text())
    }

    /// Direct children in source order
    pub fn sections(&self) -> &'a [SyntaxNode] {
        &self.node.children
    }
}

impl<'a> DatesSyntax<'a> {
    pub fn begin_date(&self) -> Option<Cow<'a, str>> {
        self.date_under(NodeKind::BeginDate)
    }

    pub fn due_date(&self) -> Option<Cow<'a, str>> {
        self.date_under(NodeKind::DueDate)
    }

    fn date_under(&self, kind: NodeKind) -> Option<Cow<'a, str>> {
        self.node
            .first_child_of(kind)?
            .descendants()
            .find(|n| n.kind.is_date_literal())
            .map(|n| n.text())
    }
}

impl<'a> PartiesSyntax<'a> {
    pub fn application(&self) -> Result<Cow<'a, str>> {
        self.role(NodeKind::Application, "application")
    }

    pub fn process(&self) -> Result<Cow<'a, str>> {
        self.role(NodeKind::Process, "process")
    }

    fn role(&self, kind: NodeKind, name: &'static str) -> Result<Cow<'a, str>> {
        let role = self.node.first_child_of(kind).ok_or(Error::MalformedTree {
            node: NodeKind::Parties,
            slot: name,
        })?;
        Ok(slot(role, 2, "party identifier")?.text())
    }
}

// ── Clause level ───────────────────────────────────────────

impl<'a> ClauseSyntax<'a> {
    /// Clause category keyword as written (`right`, `obligation`, ...)
    pub fn kind(&self) -> Result<Cow<'a, str>> {
        Ok(slot(self.node, 0, "clause kind")?.text())
    }

    /// Clause-local name
    pub fn name(&self) -> Result<Cow<'a, str>> {
        self.node
            .first_child_of(NodeKind::Identifier)
            .map(|n| n.text())
            .ok_or(Error::MalformedTree {
                node: NodeKind::Clause,
                slot: "name",
            })
    }

    pub fn role_player(&self) -> Result<RolePlayerSyntax<'a>> {
        let node = self
            .node
            .first_child_of(NodeKind::RolePlayer)
            .ok_or(Error::MalformedTree {
                node: NodeKind::Clause,
                slot: "role player",
            })?;
        RolePlayerSyntax::cast(node)
    }

    /// Operation performed by the role player.
    ///
    /// The grammar has no separate operation production yet; the operation
    /// is read from the role player's party slot.
    pub fn operation(&self) -> Result<Cow<'a, str>> {
        self.role_player()?.party()
    }

    /// Direct children in source order
    pub fn members(&self) -> &'a [SyntaxNode] {
        &self.node.children
    }
}

impl<'a> RolePlayerSyntax<'a> {
    pub fn party(&self) -> Result<Cow<'a, str>> {
        Ok(slot(self.node, 2, "party identifier")?.text())
    }
}

impl<'a> OnBreachSyntax<'a> {
    pub fn message(&self) -> Result<Cow<'a, str>> {
        Ok(slot(self.node, 2, "breach message")?.text())
    }
}

// ── Terms ──────────────────────────────────────────────────

impl<'a> TermsSyntax<'a> {
    /// Every term in the block, in source order, flattening term-or-when
    /// groups at any depth
    pub fn terms(&self) -> Vec<TermSyntax<'a>> {
        let mut out = Vec::new();
        collect_terms(self.node, &mut out);
        out
    }
}

fn collect_terms<'a>(node: &'a SyntaxNode, out: &mut Vec<TermSyntax<'a>>) {
    for child in &node.children {
        match child.kind {
            NodeKind::Term => out.push(TermSyntax { node: child }),
            NodeKind::TermOrWhen => collect_terms(child, out),
            NodeKind::Contract
            | NodeKind::Variables
            | NodeKind::Dates
            | NodeKind::BeginDate
            | NodeKind::DueDate
            | NodeKind::Parties
            | NodeKind::Application
            | NodeKind::Process
            | NodeKind::Clauses
            | NodeKind::Clause
            | NodeKind::RolePlayer
            | NodeKind::OnBreach
            | NodeKind::Terms
            | NodeKind::Timeout
            | NodeKind::MessageContent
            | NodeKind::Interval
            | NodeKind::MaxNumberOfOperation
            | NodeKind::Identifier
            | NodeKind::Date
            | NodeKind::DateTime
            | NodeKind::Token => {}
        }
    }
}

impl<'a> TermSyntax<'a> {
    /// Source-level term label; canonical names do not use it
    pub fn label(&self) -> Option<Cow<'a, str>> {
        self.node
            .child(1)
            .filter(|n| n.kind == NodeKind::Identifier)
            .map(|n| n.text())
    }

    pub fn operation(&self) -> Result<&'a SyntaxNode> {
        slot(self.node, 3, "operation")
    }
}

impl<'a> TimeoutSyntax<'a> {
    pub fn operand(&self) -> Result<Cow<'a, str>> {
        Ok(slot(self.node, 2, "timeout operand")?.text())
    }
}

/// The two shapes a message-content condition can take
#[derive(Debug, Clone, Copy)]
pub enum MessageShape<'a> {
    /// `MessageContent()` or `MessageContent(x)`
    Presence { argument: Option<&'a SyntaxNode> },
    /// `MessageContent(left comparator right)`
    Comparison {
        left: &'a SyntaxNode,
        comparator: &'a SyntaxNode,
        right: &'a SyntaxNode,
    },
}

impl<'a> MessageContentSyntax<'a> {
    /// Classify by arity
    pub fn shape(&self) -> Result<MessageShape<'a>> {
        let children = &self.node.children;
        match children.len() {
            3 => Ok(MessageShape::Presence { argument: None }),
            4 => Ok(MessageShape::Presence {
                argument: Some(&children[2]),
            }),
            6 => Ok(MessageShape::Comparison {
                left: &children[2],
                comparator: &children[3],
                right: &children[4],
            }),
            found => Err(Error::UnexpectedArity {
                node: NodeKind::MessageContent,
                found,
                expected: "3, 4 or 6",
            }),
        }
    }
}
