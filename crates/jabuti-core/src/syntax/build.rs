//! Constructors for syntax trees in the front end's node layout
//!
//! Front ends that assemble trees programmatically, and tests, use these
//! instead of counting child slots by hand. The layout matches the one
//! documented in [`super::view`].

use super::{NodeKind, SyntaxNode};

fn tok(text: &str) -> SyntaxNode {
    SyntaxNode::token(text)
}

/// Leaf for an operand: identifiers for names, tokens for literals
pub fn operand(text: &str) -> SyntaxNode {
    match text.chars().next() {
        Some(c) if c.is_alphabetic() || c == '_' => SyntaxNode::identifier(text),
        _ => SyntaxNode::token(text),
    }
}

/// Date literal leaf, typed as datetime when it carries a time part
pub fn date_literal(text: &str) -> SyntaxNode {
    let kind = if text.contains('T') || text.contains(' ') {
        NodeKind::DateTime
    } else {
        NodeKind::Date
    };
    SyntaxNode::leaf(kind, text)
}

pub fn contract(name: Option<&str>, sections: Vec<SyntaxNode>) -> SyntaxNode {
    let mut children = vec![tok("contract")];
    if let Some(name) = name {
        children.push(SyntaxNode::identifier(name));
    }
    children.push(tok("{"));
    children.extend(sections);
    children.push(tok("}"));
    SyntaxNode::node(NodeKind::Contract, children)
}

/// Contract-level variable declarations, given as `(name, type)` pairs
pub fn variables(decls: &[(&str, &str)]) -> SyntaxNode {
    let mut children = vec![tok("variables"), tok("{")];
    for (name, ty) in decls {
        children.push(SyntaxNode::identifier(*name));
        children.push(tok("="));
        children.push(tok(ty));
    }
    children.push(tok("}"));
    SyntaxNode::node(NodeKind::Variables, children)
}

pub fn dates(begin: &str, due: &str) -> SyntaxNode {
    SyntaxNode::node(
        NodeKind::Dates,
        vec![
            tok("dates"),
            tok("{"),
            SyntaxNode::node(
                NodeKind::BeginDate,
                vec![tok("beginDate"), tok("="), date_literal(begin)],
            ),
            SyntaxNode::node(
                NodeKind::DueDate,
                vec![tok("dueDate"), tok("="), date_literal(due)],
            ),
            tok("}"),
        ],
    )
}

/// `keyword = party` under a role node (`application`, `process`,
/// `role-player`)
pub fn role(kind: NodeKind, keyword: &str, party: &str) -> SyntaxNode {
    SyntaxNode::node(
        kind,
        vec![tok(keyword), tok("="), SyntaxNode::identifier(party)],
    )
}

pub fn parties(application: &str, process: &str) -> SyntaxNode {
    SyntaxNode::node(
        NodeKind::Parties,
        vec![
            tok("parties"),
            tok("{"),
            role(NodeKind::Application, "application", application),
            role(NodeKind::Process, "process", process),
            tok("}"),
        ],
    )
}

pub fn clauses(clauses: Vec<SyntaxNode>) -> SyntaxNode {
    let mut children = vec![tok("clauses"), tok("{")];
    children.extend(clauses);
    children.push(tok("}"));
    SyntaxNode::node(NodeKind::Clauses, children)
}

/// A clause whose terms block holds `terms` in order
pub fn clause(
    kind: &str,
    name: &str,
    role_player: &str,
    terms: Vec<SyntaxNode>,
    on_breach: Option<&str>,
) -> SyntaxNode {
    let mut children = vec![
        tok(kind),
        SyntaxNode::identifier(name),
        tok("{"),
        role(NodeKind::RolePlayer, "rolePlayer", role_player),
        terms_block(terms),
    ];
    if let Some(message) = on_breach {
        children.push(self::on_breach(message));
    }
    children.push(tok("}"));
    SyntaxNode::node(NodeKind::Clause, children)
}

pub fn terms_block(terms: Vec<SyntaxNode>) -> SyntaxNode {
    let mut children = vec![tok("terms"), tok("{")];
    children.extend(terms);
    children.push(tok("}"));
    SyntaxNode::node(NodeKind::Terms, children)
}

pub fn on_breach(message: &str) -> SyntaxNode {
    SyntaxNode::node(
        NodeKind::OnBreach,
        vec![tok("onBreach"), tok("("), tok(message), tok(")")],
    )
}

/// `term label = operation`
pub fn term(label: &str, operation: SyntaxNode) -> SyntaxNode {
    SyntaxNode::node(
        NodeKind::Term,
        vec![tok("term"), SyntaxNode::identifier(label), tok("="), operation],
    )
}

pub fn timeout(operand: &str) -> SyntaxNode {
    SyntaxNode::node(
        NodeKind::Timeout,
        vec![tok("Timeout"), tok("("), self::operand(operand), tok(")")],
    )
}

/// `MessageContent()` or `MessageContent(argument)`
pub fn presence_check(argument: Option<&str>) -> SyntaxNode {
    let mut children = vec![tok("MessageContent"), tok("(")];
    if let Some(argument) = argument {
        children.push(operand(argument));
    }
    children.push(tok(")"));
    SyntaxNode::node(NodeKind::MessageContent, children)
}

/// `MessageContent(left comparator right)`
pub fn comparison(left: &str, comparator: &str, right: &str) -> SyntaxNode {
    SyntaxNode::node(
        NodeKind::MessageContent,
        vec![
            tok("MessageContent"),
            tok("("),
            operand(left),
            tok(comparator),
            operand(right),
            tok(")"),
        ],
    )
}

/// `Interval(start, end)`; recognized by the grammar, not lowered
pub fn interval(start: &str, end: &str) -> SyntaxNode {
    SyntaxNode::node(
        NodeKind::Interval,
        vec![
            tok("Interval"),
            tok("("),
            date_literal(start),
            tok(","),
            date_literal(end),
            tok(")"),
        ],
    )
}

/// `MaxNumberOfOperation(max, unit)`; recognized by the grammar, not lowered
pub fn max_number_of_operation(max: &str, unit: &str) -> SyntaxNode {
    SyntaxNode::node(
        NodeKind::MaxNumberOfOperation,
        vec![
            tok("MaxNumberOfOperation"),
            tok("("),
            tok(max),
            tok(","),
            tok(unit),
            tok(")"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_leaf_kinds() {
        assert_eq!(operand("amount").kind, NodeKind::Identifier);
        assert_eq!(operand("100").kind, NodeKind::Token);
        assert_eq!(operand("\"DELIVERED\"").kind, NodeKind::Token);
    }

    #[test]
    fn test_date_literal_kinds() {
        assert_eq!(date_literal("2024-01-01").kind, NodeKind::Date);
        assert_eq!(date_literal("2024-01-01T10:00:00Z").kind, NodeKind::DateTime);
    }

    #[test]
    fn test_clause_layout() {
        let node = clause("right", "request", "application", vec![], Some("\"late\""));
        let kinds: Vec<_> = node.children.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Token,
                NodeKind::Identifier,
                NodeKind::Token,
                NodeKind::RolePlayer,
                NodeKind::Terms,
                NodeKind::OnBreach,
                NodeKind::Token,
            ]
        );
    }

    #[test]
    fn test_message_content_arity() {
        assert_eq!(presence_check(None).children.len(), 3);
        assert_eq!(presence_check(Some("signed")).children.len(), 4);
        assert_eq!(comparison("a", "==", "b").children.len(), 6);
    }
}
