//! Statement splitter for declaration scripts.
//!
//! A single left-to-right scan that tracks whether the cursor sits in plain
//! SQL, a single-quoted literal, a `--` line comment or a `/* */` block
//! comment. Only a `;` seen in plain SQL ends a statement. Comment text is
//! dropped from the emitted statements.
//!
//! Known limitations, acceptable because scripts are authored in-repo:
//! - block comments do not nest; the first `*/` closes the comment.
//! - a backslash-escaped quote (`\'`) still toggles literal mode. Doubled
//!   quotes (`''`) toggle twice and therefore stay correct.

use std::fmt;

/// Statement terminator.
const TERMINATOR: char = ';';

/// Single-quoted literal delimiter.
const QUOTE: char = '\'';

// ---------------------------------------------------------------------------
// Statement
// ---------------------------------------------------------------------------

/// One executable unit of a script.
///
/// Always trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement(String);

impl Statement {
    /// Wrap `text` if it contains anything but whitespace.
    fn from_fragment(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| Statement(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Statement {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Literal,
    LineComment,
    BlockComment,
}

/// Split `script` into its statements, in source order.
pub fn split(script: &str) -> Vec<Statement> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut mode = Mode::Normal;
    let mut chars = script.chars().peekable();

    while let Some(ch) = chars.next() {
        match mode {
            Mode::Normal => match ch {
                TERMINATOR => {
                    statements.extend(Statement::from_fragment(&current));
                    current.clear();
                }
                QUOTE => {
                    mode = Mode::Literal;
                    current.push(ch);
                }
                '-' if chars.peek() == Some(&'-') => {
                    chars.next();
                    mode = Mode::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    mode = Mode::BlockComment;
                    // Keep tokens on either side of the comment apart.
                    current.push(' ');
                }
                _ => current.push(ch),
            },
            Mode::Literal => {
                if ch == QUOTE {
                    mode = Mode::Normal;
                }
                current.push(ch);
            }
            Mode::LineComment => {
                if ch == '\n' {
                    mode = Mode::Normal;
                    current.push(ch);
                }
            }
            Mode::BlockComment => {
                if ch == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    mode = Mode::Normal;
                }
            }
        }
    }

    statements.extend(Statement::from_fragment(&current));
    statements
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(script: &str) -> Vec<String> {
        split(script).into_iter().map(Statement::into_inner).collect()
    }

    #[test]
    fn splits_on_terminators() {
        assert_eq!(
            texts("CREATE TABLE a (x INTEGER);\nCREATE TABLE b (y INTEGER);\n"),
            vec!["CREATE TABLE a (x INTEGER)", "CREATE TABLE b (y INTEGER)"]
        );
    }

    #[test]
    fn terminator_inside_literal_does_not_split() {
        assert_eq!(
            texts("INSERT INTO t VALUES ('a;b');"),
            vec!["INSERT INTO t VALUES ('a;b')"]
        );
    }

    #[test]
    fn single_terminated_statement_round_trips() {
        let stmt = "UPDATE tags SET priority = 1 WHERE code = 'SAM'";
        assert_eq!(texts(&format!("{stmt};")), vec![stmt]);
    }

    #[test]
    fn terminator_inside_line_comment_does_not_split() {
        assert_eq!(
            texts("SELECT 1 -- note; more text\nFROM t;"),
            vec!["SELECT 1 \nFROM t"]
        );
    }

    #[test]
    fn terminator_inside_block_comment_does_not_split() {
        assert_eq!(
            texts("SELECT /* a; b; c */ 1;"),
            vec!["SELECT   1"]
        );
    }

    #[test]
    fn quote_inside_comment_does_not_open_literal() {
        assert_eq!(
            texts("-- don't panic\nSELECT 1; SELECT 2;"),
            vec!["SELECT 1", "SELECT 2"]
        );
        assert_eq!(
            texts("/* it's fine */ SELECT 1; SELECT 2;"),
            vec!["SELECT 1", "SELECT 2"]
        );
    }

    #[test]
    fn comment_markers_inside_literal_are_plain_text() {
        assert_eq!(
            texts("INSERT INTO t VALUES ('-- not a comment; /* nor this */');"),
            vec!["INSERT INTO t VALUES ('-- not a comment; /* nor this */')"]
        );
    }

    #[test]
    fn doubled_quotes_stay_inside_literal() {
        assert_eq!(
            texts("INSERT INTO t VALUES ('it''s; fine'); SELECT 1;"),
            vec!["INSERT INTO t VALUES ('it''s; fine')", "SELECT 1"]
        );
    }

    #[test]
    fn trailing_statement_without_terminator_is_emitted() {
        assert_eq!(texts("SELECT 1; SELECT 2"), vec!["SELECT 1", "SELECT 2"]);
    }

    #[test]
    fn blank_fragments_are_dropped() {
        assert!(texts("").is_empty());
        assert!(texts(" ;;\n ; ").is_empty());
        assert!(texts("-- only a comment\n/* and another */").is_empty());
    }

    #[test]
    fn nested_block_comment_closes_at_first_marker() {
        // The inner `*/` ends the comment, leaving ` tail */ SELECT 1` as SQL.
        assert_eq!(
            texts("/* outer /* inner */ tail */ SELECT 1;"),
            vec!["tail */ SELECT 1"]
        );
    }

    #[test]
    fn backslash_escaped_quote_toggles_mode() {
        // Documented limitation: `\'` closes the literal, so the `;` that
        // follows splits and the remainder is left in literal mode.
        assert_eq!(
            texts(r"INSERT INTO t VALUES ('a\'; b'); SELECT 1;"),
            vec![r"INSERT INTO t VALUES ('a\'", r"b'); SELECT 1;"]
        );
    }

    #[test]
    fn single_dash_and_slash_are_plain_text() {
        assert_eq!(texts("SELECT 4 - 2 / 1;"), vec!["SELECT 4 - 2 / 1"]);
    }

    #[test]
    fn statements_are_never_empty_after_trim() {
        for stmt in split("  ; SELECT 1 ;\n\n; -- x\n SELECT 2  ;  ") {
            assert!(!stmt.as_str().trim().is_empty());
            assert_eq!(stmt.as_str(), stmt.as_str().trim());
        }
    }
}
