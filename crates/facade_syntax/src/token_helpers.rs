//! Ergonomic token matching and rendering helpers.
//!
//! These keep call sites free of nested `matches!` on registry IDs and of string comparisons for contextual
//! keywords.

use facade_core::lang::contextual::{self, ContextualKeyword};
use facade_core::lang::keywords::KeywordId;
use facade_core::lang::punctuation::PunctuationId;

use crate::lexer::{Token, TokenKind};

impl TokenKind {
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    pub fn is_ident(&self) -> bool {
        matches!(self, TokenKind::Ident(_))
    }

    /// Identifier spelling, if this is an identifier.
    pub fn ident(&self) -> Option<&str> {
        match self {
            TokenKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Return `true` if this is an identifier spelled like the given contextual keyword.
    pub fn is_contextual(&self, id: ContextualKeyword) -> bool {
        self.ident().and_then(contextual::from_str) == Some(id)
    }
}

/// Re-render a token run as compact source text.
///
/// A single space is inserted only between two word-like tokens (keywords, identifiers, literals), which is enough to
/// keep the result lexically equivalent to the input.
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut prev_wordlike = false;
    for token in tokens {
        let wordlike = matches!(
            token.kind,
            TokenKind::Keyword(_) | TokenKind::Ident(_) | TokenKind::Literal(_)
        );
        if wordlike && prev_wordlike {
            out.push(' ');
        }
        out.push_str(token.text());
        prev_wordlike = wordlike;
    }
    out
}
