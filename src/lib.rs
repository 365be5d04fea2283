#![forbid(unsafe_code)]
//! Facade source generator for C#
//!
//! A partial type that realizes the marker `FacadeGenerator.IFacadeGenerator<TInterface>` gets a generated part that
//! implements `TInterface` by forwarding every member to a user-supplied `GetImplementation()`.
//! This crate provides the generator pipeline (scanner, resolver, emitter, driver), a reference front end that
//! supplies symbols for it, and the `facadegen` CLI.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `generator` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Skips are values**: a candidate that cannot be generated yields a `Skip`, never an error or a panic.

pub mod cli;
pub mod frontend;
pub mod generator;

pub use frontend::ast;
pub use frontend::compilation::Compilation;
pub use frontend::diagnostics;
pub use frontend::lexer;
pub use frontend::parser;
pub use frontend::symbols::SymbolTable;

pub use generator::{CancellationToken, GenerateError, GeneratedUnit, Generator, GeneratorConfig, SourceOutput};
