//! Randomized property tests for naming and clause lowering.
//!
//! Clauses are synthesized from a small pool of operand names so that
//! repeated references (and therefore variable merging) happen often.

use std::collections::HashSet;

use jabuti_core::lowering::lower_clause;
use jabuti_core::naming;
use jabuti_core::syntax::{build, SyntaxNode};
use jabuti_core::{canonicalize, Clause, Term, VariableType};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum TermCase {
    Timeout(String),
    Presence(Option<String>),
    Comparison(String, &'static str, String),
    Interval,
}

impl TermCase {
    /// Whether lowering emits a term (and advances the index) for this case
    fn emits(&self) -> bool {
        match self {
            TermCase::Timeout(operand) => operand.chars().all(|c| c.is_ascii_digit()),
            TermCase::Presence(_) | TermCase::Comparison(..) => true,
            TermCase::Interval => false,
        }
    }

    fn to_node(&self, label: usize) -> SyntaxNode {
        let operation = match self {
            TermCase::Timeout(operand) => build::timeout(operand),
            TermCase::Presence(argument) => build::presence_check(argument.as_deref()),
            TermCase::Comparison(left, cmp, right) => build::comparison(left, cmp, right),
            TermCase::Interval => build::interval("08:00", "18:00"),
        };
        build::term(&format!("t{}", label), operation)
    }
}

fn arb_operand() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec!["amount", "status", "weight", "couponCode"])
            .prop_map(String::from),
        (0u32..100_000).prop_map(|n| n.to_string()),
        "[A-Z]{1,6}".prop_map(|s| format!("\"{}\"", s)),
        "[a-z]{1,4}".prop_map(|s| format!("'{}'", s)),
    ]
}

fn arb_term() -> impl Strategy<Value = TermCase> {
    prop_oneof![
        prop_oneof![
            (1u32..1_000_000).prop_map(|n| n.to_string()),
            Just("deadline".to_string()),
        ]
        .prop_map(TermCase::Timeout),
        proptest::option::of("[a-z]{1,6}").prop_map(TermCase::Presence),
        (
            arb_operand(),
            prop::sample::select(vec!["==", "!=", "<", "<=", ">", ">="]),
            arb_operand()
        )
            .prop_map(|(l, c, r)| TermCase::Comparison(l, c, r)),
        Just(TermCase::Interval),
    ]
}

fn clause_node(cases: &[TermCase]) -> SyntaxNode {
    let terms = cases.iter().enumerate().map(|(i, c)| c.to_node(i)).collect();
    build::clause("right", "probe", "application", terms, None)
}

fn lower(cases: &[TermCase]) -> Clause {
    lower_clause(&clause_node(cases)).expect("generated clause is well formed")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    // ── Naming ─────────────────────────────────────────

    #[test]
    fn naming_is_pure_and_conventions_agree(
        base in "[a-z][a-zA-Z0-9]{0,8}",
        parts in prop::collection::vec("[a-z0-9]{1,5}", 0..4),
    ) {
        let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
        let first = naming::synthesize(&base, &parts);
        prop_assert_eq!(&first, &naming::synthesize(&base, &parts));

        let folded = first.snake.replace('_', "").to_lowercase();
        prop_assert_eq!(first.pascal.to_lowercase(), folded.clone());
        prop_assert_eq!(first.camel.to_lowercase(), folded);
    }

    // ── Lowering ───────────────────────────────────────

    #[test]
    fn term_index_counts_emitted_terms(cases in prop::collection::vec(arb_term(), 0..12)) {
        let clause = lower(&cases);
        let emitted: Vec<&TermCase> = cases.iter().filter(|c| c.emits()).collect();
        prop_assert_eq!(clause.terms.len(), emitted.len());

        for (i, (term, case)) in clause.terms.iter().zip(emitted).enumerate() {
            let expected = match case {
                TermCase::Timeout(_) => format!("RightProbeTimeout{}", i),
                _ => format!("RightProbeMessageContent{}", i),
            };
            prop_assert_eq!(&term.name().pascal, &expected);
        }
    }

    #[test]
    fn comparator_decides_variable_type(cases in prop::collection::vec(arb_term(), 0..12)) {
        let clause = lower(&cases);
        for term in &clause.terms {
            let Term::MessageContent { .. } = term else { continue };
            let expected = match term.comparator() {
                None => {
                    prop_assert_eq!(term.variables().len(), 1);
                    VariableType::Boolean
                }
                Some("==") | Some("!=") => VariableType::Text,
                Some(_) => VariableType::Number,
            };
            for variable in term.variables() {
                prop_assert_eq!(variable.ty, expected);
            }
        }
    }

    #[test]
    fn clause_variables_are_deduplicated_union(cases in prop::collection::vec(arb_term(), 0..12)) {
        let clause = lower(&cases);

        let mut seen = HashSet::new();
        for variable in &clause.variables {
            prop_assert!(seen.insert(variable.name.camel.clone()), "duplicate {}", variable.name.camel);
        }

        let discovered: HashSet<String> = clause
            .terms
            .iter()
            .flat_map(|t| t.variables())
            .map(|v| v.name.camel.clone())
            .collect();
        prop_assert_eq!(seen, discovered);

        // Last occurrence wins
        for variable in &clause.variables {
            let last = clause
                .terms
                .iter()
                .flat_map(|t| t.variables())
                .filter(|v| v.name.camel == variable.name.camel)
                .last();
            prop_assert_eq!(Some(variable), last);
        }
    }

    #[test]
    fn canonicalization_is_idempotent(cases in prop::collection::vec(arb_term(), 0..8)) {
        let root = build::contract(
            Some("Probe"),
            vec![
                build::parties("app", "proc"),
                build::clauses(vec![clause_node(&cases), clause_node(&cases)]),
            ],
        );
        let first = canonicalize(&root).expect("generated contract is well formed");
        let second = canonicalize(&root).expect("generated contract is well formed");
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first.clauses[0], &first.clauses[1]);
    }
}
