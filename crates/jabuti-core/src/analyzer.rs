//! Message-condition analyzer
//!
//! Classifies a `MessageContent(...)` node and types its operands.
//!
//! A presence check binds one anonymous `boolean` variable. A binary
//! comparison takes its type from the comparator alone: `==` and `!=`
//! compare as `TEXT`, every other comparator as `NUMBER`. Each operand is
//! then classified on its own:
//!
//! | operand text            | result                                        |
//! |-------------------------|-----------------------------------------------|
//! | numeric literal         | `Operand::Literal`, text as written, untyped  |
//! | unquoted, non-numeric   | variable named after the operand              |
//! | quoted literal          | anonymous variable `messageContent<idx><pos>` |

use crate::naming;
use crate::syntax::view::{MessageContentSyntax, MessageShape};
use crate::syntax::SyntaxNode;
use crate::{Condition, Operand, Result, Variable, VariableType};

/// Base name of anonymous variables
const ANONYMOUS_BASE: &str = "messageContent";

/// Which side of a comparison an operand sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn suffix(self) -> &'static str {
        match self {
            Side::Left => "1",
            Side::Right => "2",
        }
    }
}

/// Analyze a message-content node that is the `index`-th term of its clause
///
/// # Errors
/// Returns `UnexpectedKind` if `node` is not a message-content node and
/// `UnexpectedArity` if its child count matches neither shape.
pub fn analyze(node: &SyntaxNode, index: usize) -> Result<Condition> {
    let syntax = MessageContentSyntax::cast(node)?;
    let index = index.to_string();

    let condition = match syntax.shape()? {
        MessageShape::Presence { argument } => {
            if let Some(argument) = argument {
                tracing::trace!(
                    target: "analyzer",
                    index = %index,
                    argument = %argument.text(),
                    "presence check argument not bound"
                );
            }
            Condition::Presence {
                variable: Variable {
                    name: naming::synthesize(ANONYMOUS_BASE, &[index.as_str()]),
                    ty: VariableType::Boolean,
                },
            }
        }
        MessageShape::Comparison {
            left,
            comparator,
            right,
        } => {
            let comparator = comparator.text().into_owned();
            let ty = comparison_type(&comparator);
            Condition::Comparison {
                left: classify_operand(&left.text(), &index, Side::Left, ty),
                right: classify_operand(&right.text(), &index, Side::Right, ty),
                comparator,
            }
        }
    };

    Ok(condition)
}

/// Type both operands of a comparison take
pub fn comparison_type(comparator: &str) -> VariableType {
    match comparator {
        "==" | "!=" => VariableType::Text,
        _ => VariableType::Number,
    }
}

/// Whether operand text is a decimal number (`100`, `-2.5`, `.5`, `1e400`)
///
/// After an optional sign the text must start with a digit or `.`, which
/// rules out the `inf` and `NaN` spellings `f64` parsing also accepts.
pub fn is_numeric_literal(text: &str) -> bool {
    let text = text.trim();
    let unsigned = text.strip_prefix(|c: char| matches!(c, '+' | '-')).unwrap_or(text);
    let starts_numeric = unsigned
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '.');
    starts_numeric && text.parse::<f64>().is_ok()
}

fn is_quoted(text: &str) -> bool {
    text.starts_with('"') || text.starts_with('\'')
}

fn classify_operand(text: &str, index: &str, side: Side, ty: VariableType) -> Operand {
    if is_numeric_literal(text) {
        return Operand::Literal(text.to_string());
    }
    let name = if is_quoted(text) {
        naming::synthesize(ANONYMOUS_BASE, &[index, side.suffix()])
    } else {
        naming::synthesize(text, &[])
    };
    Operand::Variable(Variable { name, ty })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::build;
    use crate::{Error, NodeKind};

    fn comparison(left: &str, cmp: &str, right: &str, index: usize) -> Condition {
        analyze(&build::comparison(left, cmp, right), index).unwrap()
    }

    // ── Presence checks ────────────────────────────────

    #[test]
    fn test_presence_check_without_argument() {
        let cond = analyze(&build::presence_check(None), 4).unwrap();
        match cond {
            Condition::Presence { variable } => {
                assert_eq!(variable.name.camel, "messageContent4");
                assert_eq!(variable.ty, VariableType::Boolean);
            }
            other => panic!("expected presence check, got {:?}", other),
        }
    }

    #[test]
    fn test_presence_check_ignores_argument_text() {
        let a = analyze(&build::presence_check(Some("signed")), 1).unwrap();
        let b = analyze(&build::presence_check(Some("\"x\"")), 1).unwrap();
        assert_eq!(a, b);
    }

    // ── Comparator-driven inference ────────────────────

    #[test]
    fn test_variable_vs_number_literal() {
        let cond = comparison("amount", ">", "100", 0);
        assert_eq!(cond.comparator(), Some(">"));
        let Condition::Comparison { left, right, .. } = cond else {
            panic!("expected comparison");
        };
        let left = left.variable().unwrap();
        assert_eq!(left.name.camel, "amount");
        assert_eq!(left.ty, VariableType::Number);
        assert_eq!(right, Operand::Literal("100".into()));
    }

    #[test]
    fn test_variable_vs_quoted_literal_is_text() {
        let cond = comparison("status", "==", "\"DELIVERED\"", 2);
        let vars = cond.variables();
        assert_eq!(vars.len(), 2);
        assert_eq!(vars[0].name.camel, "status");
        assert_eq!(vars[1].name.camel, "messageContent22");
        assert_eq!(vars[1].name.snake, "messageContent_2_2");
        assert!(vars.iter().all(|v| v.ty == VariableType::Text));
    }

    #[test]
    fn test_quoted_left_operand_uses_position_one() {
        let cond = comparison("'OPEN'", "!=", "state", 0);
        let vars = cond.variables();
        assert_eq!(vars[0].name.camel, "messageContent01");
        assert_eq!(vars[1].name.camel, "state");
        assert!(vars.iter().all(|v| v.ty == VariableType::Text));
    }

    #[test]
    fn test_numeric_literal_not_coerced_by_text_comparator() {
        let cond = comparison("weight", "==", "100", 0);
        let Condition::Comparison { right, .. } = cond else {
            panic!("expected comparison");
        };
        assert_eq!(right, Operand::Literal("100".into()));
    }

    #[test]
    fn test_ordering_comparators_are_number() {
        for cmp in ["<", "<=", ">", ">="] {
            assert_eq!(comparison_type(cmp), VariableType::Number, "{}", cmp);
        }
        assert_eq!(comparison_type("=="), VariableType::Text);
        assert_eq!(comparison_type("!="), VariableType::Text);
    }

    #[test]
    fn test_overflowing_number_stays_literal() {
        let cond = comparison("amount", ">", "1e400", 0);
        let vars = cond.variables();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].name.camel, "amount");
        let Condition::Comparison { right, .. } = cond else {
            panic!("expected comparison");
        };
        assert_eq!(right, Operand::Literal("1e400".into()));
    }

    #[test]
    fn test_literal_vs_literal_has_no_variables() {
        let cond = comparison("1", "<", "2", 0);
        assert!(cond.variables().is_empty());
        assert_eq!(cond.comparator(), Some("<"));
    }

    // ── Numeric detection ──────────────────────────────

    #[test]
    fn test_numeric_literal_detection() {
        for text in ["0", "100", "-5", "+7", "2.5", ".5", "1e3", "1e400", "-1e400"] {
            assert!(is_numeric_literal(text), "{} should be numeric", text);
        }
        for text in [
            "", "amount", "inf", "NaN", "infinity", "-inf", "+NaN", "\"1\"", "1a", "-", "+-1",
        ] {
            assert!(!is_numeric_literal(text), "{} should not be numeric", text);
        }
    }

    // ── Malformed shapes ───────────────────────────────

    #[test]
    fn test_wrong_node_kind() {
        let err = analyze(&build::timeout("1"), 0).unwrap_err();
        assert_eq!(
            err,
            Error::UnexpectedKind {
                expected: NodeKind::MessageContent,
                found: NodeKind::Timeout
            }
        );
    }
}
