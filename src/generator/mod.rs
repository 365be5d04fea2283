//! Facade generator pipeline.
//!
//! - `scanner`: syntactic candidate discovery
//! - `resolver`: marker lookup and target interface resolution
//! - `emitter`: forwarding source text for a resolved candidate
//! - `driver`: one pass over a compilation (dedupe, cancellation, caching, registration)
//!
//! Symbols are only reached through [`SemanticModel`], so the pipeline runs against any host that implements it.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod cache;
pub mod cancel;
pub mod config;
pub mod driver;
pub mod emitter;
pub mod host;
pub mod model;
pub mod outcome;
pub mod resolver;
pub mod scanner;
pub mod writer;

pub use cancel::CancellationToken;
pub use config::GeneratorConfig;
pub use driver::Generator;
pub use host::{GeneratorHost, SourceOutput};
pub use model::SemanticModel;
pub use outcome::{GenerateError, GeneratedUnit, GenerationReport, Skip, SkipReason};
