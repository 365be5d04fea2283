//! Lexer for C# declaration sources
//!
//! Handles tokenization including:
//! - Reserved keywords (registry-backed) and identifiers, including `@verbatim` identifiers
//! - Numeric, character and string literals (regular, verbatim, interpolated and raw)
//! - Punctuation (`::`, `=>`, `?`, etc.)
//! - Comments and preprocessor lines, which are dropped
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - String/char literal scanning
//! - `numbers` - Numeric literal scanning

mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::Span;
use crate::diagnostics::SyntaxError;
use facade_core::lang::punctuation;

/// Lexer for C# source code.
///
/// Converts source text into a flat token stream. Trivia (whitespace, comments, `#` directives) never reaches the
/// parser.
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    /// Only whitespace has been seen since the last newline.
    at_line_start: bool,
    tokens: Vec<Token>,
    errors: Vec<SyntaxError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            at_line_start: true,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(self) -> Result<Vec<Token>, Vec<SyntaxError>> {
        let (tokens, errors) = self.tokenize_with_recovery();
        if errors.is_empty() { Ok(tokens) } else { Err(errors) }
    }

    /// Tokenize everything, returning the tokens that could be produced together with all errors.
    pub fn tokenize_with_recovery(mut self) -> (Vec<Token>, Vec<SyntaxError>) {
        while self.pos < self.source.len() {
            self.scan_token();
        }
        self.tokens
            .push(Token::new(TokenKind::Eof, Span::new(self.pos, self.pos)));
        (self.tokens, self.errors)
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&mut self, message: impl Into<String>, start: usize) {
        self.errors
            .push(SyntaxError::lexical(message, Span::new(start, self.pos.max(start + 1))));
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.pos)));
    }

    fn add_literal(&mut self, start: usize) {
        let raw = self.source[start..self.pos].to_string();
        self.add_token(TokenKind::Literal(raw), start);
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.pos;
        let Some(c) = self.peek() else {
            return;
        };

        if c == '\n' {
            self.advance();
            self.at_line_start = true;
            return;
        }
        if c.is_whitespace() || c == '\u{feff}' {
            self.advance();
            return;
        }
        if c == '#' && self.at_line_start {
            self.skip_line();
            return;
        }

        self.at_line_start = false;

        if self.rest().starts_with("//") {
            self.skip_line();
            return;
        }
        if self.rest().starts_with("/*") {
            self.skip_block_comment(start);
            return;
        }

        match c {
            '"' => self.scan_quoted(start),
            '\'' => self.scan_char(start),
            '@' | '$' => self.scan_prefixed(start),
            '0'..='9' => self.scan_number(start),
            '.' if self.peek_at(1).is_some_and(|n| n.is_ascii_digit()) => self.scan_number(start),
            _ if is_ident_start(c) => self.scan_identifier(start),
            _ => self.scan_punctuation(start, c),
        }
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn skip_block_comment(&mut self, start: usize) {
        self.pos += 2;
        match self.rest().find("*/") {
            Some(end) => self.pos += end + 2,
            None => {
                self.pos = self.source.len();
                self.error("unterminated block comment", start);
            }
        }
    }

    /// `@` and `$` prefix verbatim identifiers, verbatim strings and interpolated strings.
    fn scan_prefixed(&mut self, start: usize) {
        let prefix: String = self
            .rest()
            .chars()
            .take_while(|c| matches!(c, '@' | '$'))
            .collect();
        let next = self.peek_at(prefix.chars().count());

        if prefix == "@" && next.is_some_and(is_ident_start) {
            self.advance();
            self.scan_identifier(start);
            return;
        }
        if next == Some('"') && is_string_prefix(&prefix) {
            self.pos += prefix.len();
            let verbatim = prefix.contains('@');
            let interpolated = prefix.contains('$');
            self.scan_prefixed_string(start, verbatim, interpolated);
            return;
        }

        self.advance();
        self.error(format!("unexpected character '{}'", &prefix[..1]), start);
    }

    fn scan_identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start..self.pos];

        // `@class` is an identifier even though `class` is reserved.
        if let Some(id) = keyword_id(spelling) {
            self.add_token(TokenKind::Keyword(id), start);
        } else {
            self.add_token(TokenKind::Ident(spelling.to_string()), start);
        }
    }

    fn scan_punctuation(&mut self, start: usize, c: char) {
        for id in punctuation::MULTI_CHAR {
            if self.rest().starts_with(punctuation::as_str(*id)) {
                self.pos += punctuation::as_str(*id).len();
                self.add_token(TokenKind::Punctuation(*id), start);
                return;
            }
        }

        self.advance();
        match punctuation::from_char(c) {
            Some(id) => self.add_token(TokenKind::Punctuation(id), start),
            None => self.error(format!("unexpected character '{c}'"), start),
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_string_prefix(prefix: &str) -> bool {
    let dollars = prefix.chars().filter(|c| *c == '$').count();
    let ats = prefix.chars().filter(|c| *c == '@').count();
    ats <= 1 && (ats == 1 || dollars >= 1)
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<SyntaxError>> {
    Lexer::new(source).tokenize()
}

/// Lex a source string, keeping every token that could be produced.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex_with_recovery(source: &str) -> (Vec<Token>, Vec<SyntaxError>) {
    Lexer::new(source).tokenize_with_recovery()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use facade_core::lang::keywords::KeywordId;
    use facade_core::lang::punctuation::PunctuationId;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_punctuation_registry_parity() {
        for (id, spelling) in punctuation::PUNCTUATION {
            let tokens = lex(spelling).unwrap_or_else(|errs| panic!("failed to lex {spelling:?}: {errs:?}"));
            assert_eq!(tokens.len(), 2, "{spelling:?} should be a single token");
            assert!(tokens[0].kind.is_punctuation(*id));
        }
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("public interface IThing"),
            vec![
                TokenKind::Keyword(KeywordId::Public),
                TokenKind::Keyword(KeywordId::Interface),
                TokenKind::Ident("IThing".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_verbatim_identifier_keeps_prefix() {
        assert_eq!(
            kinds("@class"),
            vec![TokenKind::Ident("@class".to_string()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_unicode_identifier() {
        assert_eq!(
            kinds("Größe"),
            vec![TokenKind::Ident("Größe".to_string()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_comments_and_directives_are_dropped() {
        let source = "#region Demo\n// line\n/* block\n comment */ int\n    #endregion\n";
        let kinds = kinds(source);
        assert_eq!(kinds, vec![TokenKind::Keyword(KeywordId::Int), TokenKind::Eof]);
    }

    #[test]
    fn test_hash_after_code_is_not_a_directive() {
        assert!(lex("int x; #if DEBUG\n").is_err());
    }

    #[test]
    fn test_generic_closers_are_separate_tokens() {
        let kinds = kinds("List<List<int>>");
        let closers = kinds
            .iter()
            .filter(|k| k.is_punctuation(PunctuationId::Gt))
            .count();
        assert_eq!(closers, 2);
    }

    #[test]
    fn test_multi_char_punctuation() {
        let kinds = kinds("global::System => x");
        assert!(kinds[1].is_punctuation(PunctuationId::ColonColon));
        assert!(kinds[3].is_punctuation(PunctuationId::FatArrow));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let errors = lex("int /* never closed").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("block comment"));
    }

    #[test]
    fn test_recovery_keeps_tokens() {
        let (tokens, errors) = lex_with_recovery("int ` string");
        assert_eq!(errors.len(), 1);
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].kind, TokenKind::Keyword(KeywordId::String));
    }

    #[test]
    fn test_spans() {
        let tokens = lex("  void Run").unwrap();
        assert_eq!(tokens[0].span, Span::new(2, 6));
        assert_eq!(tokens[1].span, Span::new(7, 10));
        assert_eq!(tokens[2].span, Span::new(10, 10));
    }
}
