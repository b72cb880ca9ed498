//! Identifier naming: one logical symbol, three casing conventions
//!
//! Generated code uses different conventions for different symbol kinds
//! (struct and method names, JSON field names, storage keys), so every
//! synthesized symbol is rendered as `{pascal, camel, snake}` at once.
//!
//! - `pascal`: each segment with its first character upper-cased, joined
//! - `camel`: first segment with its first character lower-cased, the rest
//!   as in `pascal`
//! - `snake`: segments joined with `_`, case preserved
//!
//! Only the first character of a segment is ever recased.

use crate::IdentifierName;

/// Render `base` followed by `parts` in all three conventions
pub fn synthesize(base: &str, parts: &[&str]) -> IdentifierName {
    IdentifierName {
        pascal: upper_first(base),
        camel: lower_first(base),
        snake: base.to_string(),
    }
    .extend(parts)
}

/// Name of a clause from its kind keyword and local name.
///
/// The kind keyword is lower-cased as a whole first, so `PENALTY` and
/// `penalty` yield the same pascal and camel renderings. The snake rendering
/// keeps the keyword as written.
pub fn clause_name(kind: &str, local: &str) -> IdentifierName {
    let lowered = kind.to_lowercase();
    let local_upper = upper_first(local);
    IdentifierName {
        pascal: upper_first(&lowered) + &local_upper,
        camel: lowered + &local_upper,
        snake: format!("{}_{}", kind, local),
    }
}

impl IdentifierName {
    /// Append `parts` to an already composed name, each rendering in its
    /// own convention. The composed prefix is kept as constructed.
    pub fn extend(&self, parts: &[&str]) -> IdentifierName {
        let mut name = self.clone();
        for part in parts {
            let upper = upper_first(part);
            name.pascal.push_str(&upper);
            name.camel.push_str(&upper);
            name.snake.push('_');
            name.snake.push_str(part);
        }
        name
    }
}

impl std::fmt::Display for IdentifierName {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.pascal)
    }
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
