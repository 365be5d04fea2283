//! Declaration-level C# syntax frontend: lexer, parser, AST, diagnostics.
//!
//! This crate is dependency-light and intended for reuse by the generator and the CLI.
//!
//! ## Notes
//! - This crate is intentionally “syntax-only”: it does not do name resolution or binding.
//! - Only declarations are modeled. Method bodies, initializers and top-level statements are skipped as balanced
//!   token runs, which keeps the parser tolerant of code that is still being edited.
//! - Vocabulary identity (keywords/punctuation) comes from `facade_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use facade_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("namespace Demo { public interface IThing { void Run(); } }").unwrap();
//! let unit = parser::parse(&tokens).unwrap();
//! assert_eq!(unit.members.len(), 1);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;
