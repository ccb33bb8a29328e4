//! Splitting a compiled script into executable statements

use super::escape::{COMMENT_MARKER, STATEMENT_DELIMITER};

/// Split script text on the statement delimiter, one fragment per cut.
///
/// The final fragment holds whatever trails the last delimiter (usually
/// comments or nothing).
pub fn split_fragments(script: &str) -> Vec<&str> {
    script.split(STATEMENT_DELIMITER).collect()
}

/// Strip comment lines from a fragment and trim it
pub fn strip_comments(fragment: &str) -> String {
    fragment
        .lines()
        .filter(|line| !line.trim_start().starts_with(COMMENT_MARKER))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Statements a graph client should run, in script order.
///
/// Comment-only and blank fragments are dropped, so an empty schema
/// yields no statements at all.
pub fn executable_statements(script: &str) -> Vec<String> {
    split_fragments(script)
        .into_iter()
        .map(strip_comments)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_only_script() {
        let script = "// header\n// Generated at: now\n\n// 1. Constraints\n\n";
        assert_eq!(split_fragments(script).len(), 1);
        assert!(executable_statements(script).is_empty());
    }

    #[test]
    fn test_statements_and_comments() {
        let script = "// header\nCREATE CONSTRAINT IF NOT EXISTS FOR (n:A) REQUIRE n.id IS UNIQUE;\n\
                      // Example instance: MERGE (n:A {id: \"placeholder_id\"})\n\
                      MERGE (t:OntologyType {name: \"A\"})\nSET t.source = \"manual\";\n// trailing\n";
        let statements = executable_statements(script);
        assert_eq!(statements.len(), 2);
        assert!(statements[0].starts_with("CREATE CONSTRAINT"));
        assert_eq!(
            statements[1],
            "MERGE (t:OntologyType {name: \"A\"})\nSET t.source = \"manual\""
        );
    }

    #[test]
    fn test_indented_comment_is_stripped() {
        assert_eq!(strip_comments("   // note\nRETURN 1"), "RETURN 1");
    }
}
