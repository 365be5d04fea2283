//! C# vocabulary registries.
//!
//! Callers work with **stable IDs** (e.g. `KeywordId`, `PunctuationId`) and look up spellings and metadata via
//! registry tables instead of comparing strings across the codebase.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings and metadata for shared use (diagnostics,
//!   emission, display).
//!
//! ## Examples
//! ```rust
//! use facade_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("interface"), Some(KeywordId::Interface));
//! assert_eq!(keywords::as_str(KeywordId::Interface), "interface");
//! ```

pub mod accessibility;
pub mod contextual;
pub mod keywords;
pub mod marker;
pub mod punctuation;
