//! Provide the canonical vocabulary shared by the facadegen front end and generator.
//!
//! This crate is intentionally small and dependency-free. It contains the pieces of knowledge that more than one
//! layer needs to agree on:
//! - the C# keyword registries used by the lexer and parser,
//! - the accessibility table used by the symbol table and the emitter,
//! - the marker capability identity (`FacadeGenerator.IFacadeGenerator<T>`) and its source text.
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global state, and no AST or symbol types.
//! - Changing the marker identity in [`lang::marker`] is a breaking change for every consumer project.

pub mod lang;
