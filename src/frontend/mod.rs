//! Reference host front end
//!
//! - `lexer`, `parser`, `ast`, `diagnostics`: declaration-level C# syntax (from `facade_syntax`)
//! - `compilation`: the parsed files of one generator pass
//! - `symbols`: symbol table implementing the generator's semantic model

// Syntax components are provided by the shared facade_syntax crate.
pub use facade_syntax::{ast, diagnostics, lexer, parser};

pub mod compilation;
pub mod symbols;
