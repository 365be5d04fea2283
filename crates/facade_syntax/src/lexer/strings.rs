//! String and character literal scanning.
//!
//! Literal contents are never decoded; the lexer only has to find where a literal ends so that quotes, braces and
//! comment markers inside it do not leak into the token stream.

use super::Lexer;

impl Lexer<'_> {
    /// Scan a literal starting at a bare `"`.
    pub(super) fn scan_quoted(&mut self, start: usize) {
        let terminated = if self.rest().starts_with("\"\"\"") {
            self.skip_raw_string()
        } else {
            self.skip_string_body(false, false)
        };
        self.finish_string(start, terminated);
    }

    /// Scan a literal whose `@`/`$` prefix has already been consumed.
    pub(super) fn scan_prefixed_string(&mut self, start: usize, verbatim: bool, interpolated: bool) {
        let terminated = if !verbatim && self.rest().starts_with("\"\"\"") {
            self.skip_raw_string()
        } else {
            self.skip_string_body(verbatim, interpolated)
        };
        self.finish_string(start, terminated);
    }

    pub(super) fn scan_char(&mut self, start: usize) {
        if !self.skip_char_body() {
            self.error("unterminated character literal", start);
            return;
        }
        self.add_literal(start);
    }

    fn finish_string(&mut self, start: usize, terminated: bool) {
        if !terminated {
            self.error("unterminated string literal", start);
            return;
        }
        // UTF-8 string literals: "abc"u8
        if self.rest().starts_with("u8") || self.rest().starts_with("U8") {
            self.pos += 2;
        }
        self.add_literal(start);
    }

    /// Skip a `"`-delimited body. The cursor sits on the opening quote.
    fn skip_string_body(&mut self, verbatim: bool, interpolated: bool) -> bool {
        self.advance();
        while let Some(c) = self.peek() {
            if c == '\n' && !verbatim {
                return false;
            }
            self.advance();
            match c {
                '"' if verbatim && self.peek() == Some('"') => {
                    self.advance();
                }
                '"' => return true,
                '\\' if !verbatim => {
                    self.advance();
                }
                '{' if interpolated && self.peek() == Some('{') => {
                    self.advance();
                }
                '{' if interpolated => {
                    if !self.skip_hole() {
                        return false;
                    }
                }
                _ => {}
            }
        }
        false
    }

    /// Skip an interpolation hole; the opening `{` is already consumed.
    fn skip_hole(&mut self) -> bool {
        let mut depth = 1usize;
        while let Some(c) = self.peek() {
            match c {
                '{' => {
                    depth += 1;
                    self.advance();
                }
                '}' => {
                    self.advance();
                    depth -= 1;
                    if depth == 0 {
                        return true;
                    }
                }
                '"' => {
                    let closed = if self.rest().starts_with("\"\"\"") {
                        self.skip_raw_string()
                    } else {
                        self.skip_string_body(false, false)
                    };
                    if !closed {
                        return false;
                    }
                }
                '\'' => {
                    if !self.skip_char_body() {
                        return false;
                    }
                }
                '@' | '$' => {
                    let prefix_len = self.rest().chars().take_while(|c| matches!(c, '@' | '$')).count();
                    let prefix = &self.rest()[..prefix_len];
                    if self.peek_at(prefix_len) == Some('"') && super::is_string_prefix(prefix) {
                        let verbatim = prefix.contains('@');
                        let interpolated = prefix.contains('$');
                        self.pos += prefix_len;
                        if !self.skip_string_body(verbatim, interpolated) {
                            return false;
                        }
                    } else {
                        self.advance();
                    }
                }
                _ => {
                    self.advance();
                }
            }
        }
        false
    }

    /// Skip a raw string literal. The closing run must be as long as the opening run.
    fn skip_raw_string(&mut self) -> bool {
        let quotes = self.rest().chars().take_while(|c| *c == '"').count();
        self.pos += quotes;
        let closer = "\"".repeat(quotes);
        match self.rest().find(&closer) {
            Some(offset) => {
                self.pos += offset + quotes;
                true
            }
            None => {
                self.pos = self.source.len();
                false
            }
        }
    }

    fn skip_char_body(&mut self) -> bool {
        self.advance();
        while let Some(c) = self.peek() {
            if c == '\n' {
                return false;
            }
            self.advance();
            match c {
                '\\' => {
                    self.advance();
                }
                '\'' => return true,
                _ => {}
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::{TokenKind, lex};

    fn single_literal(source: &str) -> String {
        let tokens = lex(source).unwrap_or_else(|errs| panic!("failed to lex {source:?}: {errs:?}"));
        assert_eq!(tokens.len(), 2, "expected one literal for {source:?}, got {tokens:?}");
        match &tokens[0].kind {
            TokenKind::Literal(raw) => raw.clone(),
            other => panic!("expected literal, got {other:?}"),
        }
    }

    #[test]
    fn test_regular_string_with_escapes() {
        assert_eq!(single_literal(r#""a \"quoted\" word""#), r#""a \"quoted\" word""#);
    }

    #[test]
    fn test_verbatim_string_spans_lines() {
        let source = "@\"C:\\dir\n\"\"x\"\"\"";
        assert_eq!(single_literal(source), source);
    }

    #[test]
    fn test_interpolated_string_with_nested_literal() {
        let source = r#"$"{(flag ? "yes" : "no")} {{braces}} {count:N2}""#;
        assert_eq!(single_literal(source), source);
    }

    #[test]
    fn test_raw_string() {
        let source = "\"\"\"\n  a \"quoted\" \"\" run\n  \"\"\"";
        assert_eq!(single_literal(source), source);
    }

    #[test]
    fn test_utf8_suffix() {
        assert_eq!(single_literal("\"abc\"u8"), "\"abc\"u8");
    }

    #[test]
    fn test_char_literals() {
        assert_eq!(single_literal(r"'\''"), r"'\''");
        assert_eq!(single_literal("'{'"), "'{'");
    }

    #[test]
    fn test_comment_markers_inside_strings() {
        assert_eq!(single_literal("\"// not a comment\""), "\"// not a comment\"");
    }

    #[test]
    fn test_unterminated_string() {
        let errors = lex("\"open\nint").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("unterminated string"));
    }
}
