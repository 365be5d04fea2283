//! Punctuation vocabulary.
//!
//! This module defines the punctuation and operator tokens the C# lexer produces. The declaration parser only needs
//! structure (delimiters, separators, arrows); the remaining operators are kept so that default-value expressions
//! can be re-rendered verbatim.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** and exact: compound operators such as `==` are lexed as two `=`
//!   tokens, except for the few multi-character tokens listed in [`MULTI_CHAR`].
//!
//! ## Examples
//! ```rust
//! use facade_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("::"), Some(PunctuationId::ColonColon));
//! assert_eq!(punctuation::as_str(PunctuationId::FatArrow), "=>");
//! ```

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Lt,
    Gt,

    // Separators / access
    Comma,
    Semicolon,
    Colon,
    ColonColon,
    Dot,
    DotDot,

    // Arrows
    FatArrow,
    Arrow,

    // Operators and markers
    Eq,
    Question,
    Star,
    Amp,
    Plus,
    Minus,
    Slash,
    Percent,
    Bang,
    Tilde,
    Pipe,
    Caret,
}

/// Registry of all punctuation spellings.
pub const PUNCTUATION: &[(PunctuationId, &str)] = &[
    (PunctuationId::LParen, "("),
    (PunctuationId::RParen, ")"),
    (PunctuationId::LBracket, "["),
    (PunctuationId::RBracket, "]"),
    (PunctuationId::LBrace, "{"),
    (PunctuationId::RBrace, "}"),
    (PunctuationId::Lt, "<"),
    (PunctuationId::Gt, ">"),
    (PunctuationId::Comma, ","),
    (PunctuationId::Semicolon, ";"),
    (PunctuationId::Colon, ":"),
    (PunctuationId::ColonColon, "::"),
    (PunctuationId::Dot, "."),
    (PunctuationId::DotDot, ".."),
    (PunctuationId::FatArrow, "=>"),
    (PunctuationId::Arrow, "->"),
    (PunctuationId::Eq, "="),
    (PunctuationId::Question, "?"),
    (PunctuationId::Star, "*"),
    (PunctuationId::Amp, "&"),
    (PunctuationId::Plus, "+"),
    (PunctuationId::Minus, "-"),
    (PunctuationId::Slash, "/"),
    (PunctuationId::Percent, "%"),
    (PunctuationId::Bang, "!"),
    (PunctuationId::Tilde, "~"),
    (PunctuationId::Pipe, "|"),
    (PunctuationId::Caret, "^"),
];

/// Multi-character tokens, longest match first.
pub const MULTI_CHAR: &[PunctuationId] = &[
    PunctuationId::ColonColon,
    PunctuationId::FatArrow,
    PunctuationId::Arrow,
    PunctuationId::DotDot,
];

/// Canonical spelling.
pub fn as_str(id: PunctuationId) -> &'static str {
    PUNCTUATION
        .iter()
        .find(|(p, _)| *p == id)
        .map(|(_, s)| *s)
        .expect("punctuation spelling missing")
}

/// Lookup by spelling.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|(_, spelling)| *spelling == s).map(|(p, _)| *p)
}

/// Lookup a single-character token.
pub fn from_char(c: char) -> Option<PunctuationId> {
    let mut buf = [0u8; 4];
    from_str(c.encode_utf8(&mut buf))
}
