//! Token types for the C# lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words
//! - `Punctuation(PunctuationId)` for punctuation and operators
//!
//! ## Notes
//! - Contextual keywords are plain identifiers; use `crate::token_helpers` to test them.
//! - Literals keep their raw lexeme. The declaration parser never evaluates them, it only re-renders default values.

use crate::ast::Span;
use facade_core::lang::keywords::{self, KeywordId};
use facade_core::lang::punctuation::{self, PunctuationId};

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Keyword(KeywordId),
    Punctuation(PunctuationId),

    /// Identifier as written (verbatim identifiers keep their `@`).
    Ident(String),
    /// Numeric, character or string literal, raw.
    Literal(String),

    Eof,
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Source spelling of the token.
    pub fn text(&self) -> &str {
        match &self.kind {
            TokenKind::Keyword(id) => keywords::as_str(*id),
            TokenKind::Punctuation(id) => punctuation::as_str(*id),
            TokenKind::Ident(name) | TokenKind::Literal(name) => name,
            TokenKind::Eof => "",
        }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
