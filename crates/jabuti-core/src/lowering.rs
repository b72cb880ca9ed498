//! Clause lowering — one clause node to one canonical [`Clause`]
//!
//! Terms are numbered by a per-clause index that names them
//! (`<clause>Timeout<i>`, `<clause>MessageContent<i>`). The index advances
//! for every emitted timeout and for every message-content term, including
//! comparisons that bind no variable. A timeout whose operand is not
//! numeric emits nothing and does not advance it.
//!
//! Variables discovered by the terms are merged into a [`VariableSet`]
//! keyed by camel name.

use indexmap::IndexMap;

use crate::analyzer;
use crate::syntax::view::{ClauseSyntax, OnBreachSyntax, TermSyntax, TermsSyntax, TimeoutSyntax};
use crate::syntax::{NodeKind, SyntaxNode};
use crate::{naming, Clause, IdentifierName, Messages, Result, Term, Variable};

/// Lower a clause node
///
/// # Errors
/// Fails fast with a malformed-tree error if the clause lacks its kind
/// keyword, name or role player, or if any of its terms is malformed.
pub fn lower_clause(node: &SyntaxNode) -> Result<Clause> {
    let syntax = ClauseSyntax::cast(node)?;
    let kind = syntax.kind()?.into_owned();
    let name = naming::clause_name(&kind, &syntax.name()?);
    let role_player = syntax.role_player()?.party()?.into_owned();
    let operation = syntax.operation()?.into_owned();

    tracing::debug!(
        target: "lowering",
        clause = %name.camel,
        role_player = %role_player,
        "lowering clause"
    );

    let mut terms = TermLowering::new(name.clone());
    let mut messages = Messages::default();

    for member in syntax.members() {
        match member.kind {
            NodeKind::OnBreach => {
                messages.error = OnBreachSyntax::cast(member)?.message()?.into_owned();
            }
            NodeKind::Terms => {
                for term in TermsSyntax::cast(member)?.terms() {
                    terms.lower_term(term)?;
                }
            }
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
            | NodeKind::TermOrWhen
            | NodeKind::Term
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

    let clause = Clause {
        name,
        kind,
        role_player,
        operation,
        variables: terms.variables.into_vec(),
        terms: terms.terms,
        messages,
    };

    tracing::debug!(
        target: "lowering",
        clause = %clause.name.camel,
        terms = clause.terms.len(),
        variables = clause.variables.len(),
        "lowered clause"
    );

    Ok(clause)
}

/// Per-clause term state
struct TermLowering {
    clause_name: IdentifierName,
    index: usize,
    terms: Vec<Term>,
    variables: VariableSet,
}

impl TermLowering {
    fn new(clause_name: IdentifierName) -> Self {
        TermLowering {
            clause_name,
            index: 0,
            terms: Vec::new(),
            variables: VariableSet::new(),
        }
    }

    fn term_name(&self, kind: &str) -> IdentifierName {
        self.clause_name.extend(&[kind, self.index.to_string().as_str()])
    }

    fn lower_term(&mut self, term: TermSyntax<'_>) -> Result<()> {
        let operation = term.operation()?;
        let label = term.label().unwrap_or_default();
        match operation.kind {
            NodeKind::Timeout => self.lower_timeout(&label, operation),
            NodeKind::MessageContent => self.lower_message_content(operation),
            NodeKind::Interval | NodeKind::MaxNumberOfOperation => {
                tracing::trace!(
                    target: "lowering",
                    clause = %self.clause_name.camel,
                    term = %label,
                    operation = %operation.kind,
                    "operation has no lowering, skipped"
                );
                Ok(())
            }
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
            | NodeKind::TermOrWhen
            | NodeKind::Term
            | NodeKind::Identifier
            | NodeKind::Date
            | NodeKind::DateTime
            | NodeKind::Token => Ok(()),
        }
    }

    fn lower_timeout(&mut self, label: &str, node: &SyntaxNode) -> Result<()> {
        let value = TimeoutSyntax::cast(node)?.operand()?;
        if !analyzer::is_numeric_literal(&value) {
            tracing::trace!(
                target: "lowering",
                clause = %self.clause_name.camel,
                term = %label,
                operand = %value,
                "non-numeric timeout skipped"
            );
            return Ok(());
        }
        let name = self.term_name("timeout");
        self.terms.push(Term::Timeout {
            name,
            value: value.into_owned(),
        });
        self.index += 1;
        Ok(())
    }

    fn lower_message_content(&mut self, node: &SyntaxNode) -> Result<()> {
        let condition = analyzer::analyze(node, self.index)?;
        let name = self.term_name("messageContent");
        for variable in condition.variables() {
            if let Some(replaced) = self.variables.merge(variable.clone()) {
                tracing::trace!(
                    target: "lowering",
                    clause = %self.clause_name.camel,
                    variable = %replaced.name.camel,
                    from = %replaced.ty,
                    to = %variable.ty,
                    "variable rebound"
                );
            }
        }
        self.terms.push(Term::MessageContent { name, condition });
        self.index += 1;
        Ok(())
    }
}

/// Ordered set of clause variables keyed by camel name.
///
/// Merging a variable whose camel name is already present replaces the
/// stored variable but keeps the position of the first occurrence.
#[derive(Debug, Clone, Default)]
pub struct VariableSet {
    entries: IndexMap<String, Variable>,
}

impl VariableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; returns the variable that was replaced
    pub fn merge(&mut self, variable: Variable) -> Option<Variable> {
        self.entries.insert(variable.name.camel.clone(), variable)
    }

    pub fn into_vec(self) -> Vec<Variable> {
        self.entries.into_values().collect()
    }
}
