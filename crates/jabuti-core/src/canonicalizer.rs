//! Contract canonicalizer — syntax tree to canonical [`Contract`]
//!
//! The canonicalizer walks the direct children of a contract node once, in
//! source order, and dispatches on node kind:
//!
//! - `dates` fills `beginDate` / `dueDate`
//! - `parties` fills `application` / `process`
//! - `clauses` lowers every clause, in order
//! - `variables` is accepted and produces nothing at this stage
//!
//! # Pipeline
//!
//! `interchange JSON → SyntaxNode → canonicalize → serialize_canonical → SHA-256`
//!
//! # Guarantees
//!
//! - **Deterministic**: same tree always produces the same Contract
//! - **Stateless**: no counters or caches survive a call
//! - **Order preserving**: clauses and terms keep source order

use sha2::{Digest, Sha256};

use crate::lowering::lower_clause;
use crate::syntax::view::{ContractSyntax, DatesSyntax, PartiesSyntax};
use crate::syntax::{NodeKind, SyntaxNode};
use crate::{Contract, Error, Result};

// ── Public API ─────────────────────────────────────────────

/// Canonicalize a contract syntax tree
///
/// # Errors
/// Returns `UnexpectedKind` if `root` is not a contract node, and a
/// malformed-tree error if any party, clause or term lacks a slot its
/// production always fills. Nothing is recovered: the first failure aborts.
pub fn canonicalize(root: &SyntaxNode) -> Result<Contract> {
    let syntax = ContractSyntax::cast(root)?;
    tracing::debug!(
        target: "canonicalizer",
        sections = syntax.sections().len(),
        "canonicalizing contract"
    );

    let mut contract = Contract {
        name: syntax.name().map(|n| n.into_owned()).unwrap_or_default(),
        begin_date: String::new(),
        due_date: String::new(),
        application: String::new(),
        process: String::new(),
        variables: Vec::new(),
        clauses: Vec::new(),
    };

    for section in syntax.sections() {
        match section.kind {
            NodeKind::Dates => {
                let dates = DatesSyntax::cast(section)?;
                if let Some(begin) = dates.begin_date() {
                    contract.begin_date = begin.into_owned();
                }
                if let Some(due) = dates.due_date() {
                    contract.due_date = due.into_owned();
                }
            }
            NodeKind::Parties => {
                let parties = PartiesSyntax::cast(section)?;
                contract.application = parties.application()?.into_owned();
                contract.process = parties.process()?.into_owned();
            }
            NodeKind::Clauses => {
                for clause in section.children_of(NodeKind::Clause) {
                    contract.clauses.push(lower_clause(clause)?);
                }
            }
            NodeKind::Variables => {
                tracing::trace!(target: "canonicalizer", "contract variables block not lowered");
            }
            NodeKind::Contract
            | NodeKind::BeginDate
            | NodeKind::DueDate
            | NodeKind::Application
            | NodeKind::Process
            | NodeKind::Clause
            | NodeKind::RolePlayer
            | NodeKind::OnBreach
            | NodeKind::Terms
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

    tracing::debug!(
        target: "canonicalizer",
        contract = %contract.name,
        clauses = contract.clauses.len(),
        "canonicalized contract"
    );

    Ok(contract)
}

/// Decode a tree from its JSON interchange form and canonicalize it
///
/// # Errors
/// Returns `TreeDecode` for input that is not a syntax tree, otherwise as
/// [`canonicalize`].
pub fn canonicalize_json(input: &str) -> Result<Contract> {
    let root = SyntaxNode::from_json(input)?;
    canonicalize(&root)
}

// ── Canonical Serializer ───────────────────────────────────

/// Serialize a Contract to its canonical JSON text
///
/// Produces deterministic output with:
/// - Fixed field order (declaration order of the model types)
/// - 2-space indentation
/// - Trailing newline
pub fn serialize_canonical(contract: &Contract) -> Result<String> {
    let mut out = serde_json::to_string_pretty(contract)
        .map_err(|e| Error::Serialization(e.to_string()))?;
    out.push('\n');
    Ok(out)
}

// ── SHA-256 Hash Computation ──────────────────────────────

/// Compute the SHA-256 semantic hash of a Contract
///
/// The hash is taken over the canonical serialization, so two Contracts
/// hash equally exactly when they are equal.
pub fn compute_semantic_hash(contract: &Contract) -> Result<String> {
    let canonical = serialize_canonical(contract)?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
