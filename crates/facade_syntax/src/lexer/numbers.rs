//! Numeric literal scanning.

use super::Lexer;

impl Lexer<'_> {
    /// Scan a numeric literal, including digit separators, suffixes and exponents.
    pub(super) fn scan_number(&mut self, start: usize) {
        let rest = self.rest();
        let radix_prefixed = ["0x", "0X", "0b", "0B"].iter().any(|p| rest.starts_with(p));

        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance();
                if !radix_prefixed && matches!(c, 'e' | 'E') && matches!(self.peek(), Some('+' | '-')) {
                    self.advance();
                }
            } else if c == '.' && self.peek_at(1).is_some_and(|n| n.is_ascii_digit()) {
                self.advance();
            } else {
                break;
            }
        }

        self.add_literal(start);
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::{TokenKind, lex};

    fn texts(source: &str) -> Vec<String> {
        lex(source)
            .unwrap()
            .into_iter()
            .filter(|t| t.kind != TokenKind::Eof)
            .map(|t| t.text().to_string())
            .collect()
    }

    #[test]
    fn test_numeric_forms() {
        assert_eq!(texts("1_000"), vec!["1_000"]);
        assert_eq!(texts("0xFF_EEul"), vec!["0xFF_EEul"]);
        assert_eq!(texts("1.5e-3f"), vec!["1.5e-3f"]);
        assert_eq!(texts(".5m"), vec![".5m"]);
    }

    #[test]
    fn test_hex_digit_e_is_not_an_exponent() {
        assert_eq!(texts("0x1E+2"), vec!["0x1E", "+", "2"]);
    }

    #[test]
    fn test_member_access_on_integer() {
        assert_eq!(texts("1.ToString"), vec!["1", ".", "ToString"]);
        assert_eq!(texts("1..2"), vec!["1", "..", "2"]);
    }
}
