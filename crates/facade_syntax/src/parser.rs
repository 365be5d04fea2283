//! Declaration parser for C# sources
//!
//! Converts a token stream into a [`CompilationUnit`]: using directives, namespaces (block and file-scoped), type
//! declarations and member signatures. Everything below the signature level (method bodies, accessor bodies,
//! initializers, top-level statements) is skipped as a balanced token run.
//!
//! ## Examples
//!
//! ```rust
//! use facade_syntax::{lexer, parser};
//!
//! let source = "namespace Demo { public partial class Facade : IThing { } }";
//! let tokens = lexer::lex(source).unwrap();
//! let unit = parser::parse(&tokens).unwrap();
//! assert_eq!(unit.members.len(), 1);
//! ```

use crate::ast::*;
use crate::diagnostics::SyntaxError;
use crate::lexer::{Token, TokenKind};
use crate::token_helpers::render_tokens;
use facade_core::lang::contextual::ContextualKeyword;
use facade_core::lang::keywords::{self, KeywordId};
use facade_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/members.rs");
include!("parser/types.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
