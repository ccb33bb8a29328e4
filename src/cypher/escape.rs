//! Cypher lexical helpers
//!
//! Everything interpolated into a compiled script goes through here. The
//! rendered forms never contain a raw statement delimiter or a line
//! break, so splitting a script on `;` only ever cuts between statements.

use std::fmt;

/// Statement terminator the executor splits on
pub const STATEMENT_DELIMITER: char = ';';

/// Line comment marker
pub const COMMENT_MARKER: &str = "//";

/// Why a name cannot be turned into a Cypher identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierError {
    /// Nothing left after trimming
    Empty,
    /// Contains the statement delimiter
    Delimiter,
    /// Contains a non-whitespace control character
    Control,
}

impl fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierError::Empty => write!(f, "empty identifier"),
            IdentifierError::Delimiter => {
                write!(f, "identifier contains statement delimiter '{}'", STATEMENT_DELIMITER)
            }
            IdentifierError::Control => write!(f, "identifier contains a control character"),
        }
    }
}

/// Trim and replace every inner whitespace character with `_`
pub fn normalize_whitespace(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Normalize a raw name into identifier text (unquoted)
pub fn normalize_identifier(raw: &str) -> Result<String, IdentifierError> {
    let normalized = normalize_whitespace(raw);
    if normalized.is_empty() {
        return Err(IdentifierError::Empty);
    }
    if normalized.contains(STATEMENT_DELIMITER) {
        return Err(IdentifierError::Delimiter);
    }
    if normalized.chars().any(char::is_control) {
        return Err(IdentifierError::Control);
    }
    Ok(normalized)
}

/// Relationship type token: normalized and upper-cased
pub fn normalize_relationship_type(raw: &str) -> Result<String, IdentifierError> {
    normalize_identifier(raw).map(|s| s.to_uppercase())
}

fn is_bare_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Render normalized identifier text, backtick-quoting when needed
pub fn quote_identifier(normalized: &str) -> String {
    if is_bare_identifier(normalized) {
        normalized.to_string()
    } else {
        format!("`{}`", normalized.replace('`', "``"))
    }
}

/// Render a double-quoted Cypher string literal
pub fn string_literal(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == STATEMENT_DELIMITER || c.is_control() => {
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("Factory A"), "Factory_A");
        assert_eq!(normalize_whitespace("  a\tb  c "), "a_b__c");
        assert_eq!(normalize_whitespace("Line"), "Line");
    }

    #[test]
    fn test_normalize_identifier_rejects() {
        assert_eq!(normalize_identifier("   "), Err(IdentifierError::Empty));
        assert_eq!(normalize_identifier("a;b"), Err(IdentifierError::Delimiter));
        assert_eq!(normalize_identifier("a\u{0}b"), Err(IdentifierError::Control));
        // Line breaks are whitespace and become underscores
        assert_eq!(normalize_identifier("a\nb"), Ok("a_b".to_string()));
    }

    #[test]
    fn test_relationship_type() {
        assert_eq!(normalize_relationship_type("feeds into").unwrap(), "FEEDS_INTO");
        assert_eq!(normalize_relationship_type("SHIPS_TO").unwrap(), "SHIPS_TO");
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("Factory_A"), "Factory_A");
        assert_eq!(quote_identifier("_private"), "_private");
        assert_eq!(quote_identifier("3D_Printer"), "`3D_Printer`");
        assert_eq!(quote_identifier("Line-2"), "`Line-2`");
        assert_eq!(quote_identifier("odd`name"), "`odd``name`");
        assert_eq!(quote_identifier("공장"), "`공장`");
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(string_literal("plain"), "\"plain\"");
        assert_eq!(string_literal("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(string_literal("it's"), "\"it\\'s\"");
        assert_eq!(string_literal("a\\b"), "\"a\\\\b\"");
        assert_eq!(string_literal("a;b"), "\"a\\u003Bb\"");
        assert_eq!(string_literal("line1\nline2"), "\"line1\\nline2\"");
    }

    #[test]
    fn test_string_literal_never_breaks_statements() {
        let nasty = "x\"; MATCH (n) DETACH DELETE n; //\r\n\u{7}";
        let lit = string_literal(nasty);
        assert!(!lit.contains(STATEMENT_DELIMITER));
        assert!(!lit.contains('\n'));
        assert!(!lit.contains('\r'));
    }
}
