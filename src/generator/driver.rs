//! Pass orchestration: scan, resolve, emit, register.

use std::collections::HashSet;

use facade_core::lang::marker;
use rayon::prelude::*;

use crate::frontend::compilation::Compilation;
use crate::frontend::symbols::SymbolTable;
use crate::generator::cache::GenerationCache;
use crate::generator::cancel::CancellationToken;
use crate::generator::config::GeneratorConfig;
use crate::generator::emitter;
use crate::generator::host::GeneratorHost;
use crate::generator::model::SemanticModel;
use crate::generator::outcome::{GenerateError, GenerationReport, Outcome, SkipReason, SkippedCandidate};
use crate::generator::resolver;
use crate::generator::scanner::{self, CandidateDeclaration};

/// The facade generator.
///
/// ## Examples
/// ```rust
/// use facadegen::frontend::compilation::Compilation;
/// use facadegen::generator::{CancellationToken, Generator, GeneratorConfig, SourceOutput};
///
/// let mut compilation = Compilation::with_marker();
/// compilation.add_source(
///     "Api.cs",
///     "using FacadeGenerator; namespace Demo { public interface IApi { void Run(); } \
///      public partial class Api : IFacadeGenerator<IApi> { } }",
/// );
///
/// let mut generator = Generator::new(GeneratorConfig::default());
/// let mut output = SourceOutput::new();
/// generator.execute(&compilation, &mut output, &CancellationToken::new()).unwrap();
/// assert!(output.get("Api.generated").unwrap().contains("GetImplementation().Run();"));
/// ```
#[derive(Debug, Default)]
pub struct Generator {
    config: GeneratorConfig,
    cache: GenerationCache,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config, cache: GenerationCache::new() }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn cache(&self) -> &GenerationCache {
        &self.cache
    }

    /// Register the marker declaration with the host.
    pub fn initialize<H: GeneratorHost + ?Sized>(&self, host: &mut H) {
        host.add_source(marker::MARKER_HINT_NAME, marker::MARKER_SOURCE);
    }

    /// Run one pass against the reference symbol table.
    pub fn execute<H: GeneratorHost + ?Sized>(
        &mut self,
        compilation: &Compilation,
        host: &mut H,
        cancel: &CancellationToken,
    ) -> Result<GenerationReport, GenerateError> {
        let table = SymbolTable::build(compilation);
        self.execute_with_model(compilation, &table, host, cancel)
    }

    /// Run one pass against an injected semantic model.
    ///
    /// ## Errors
    /// Returns [`GenerateError::Cancelled`] if `cancel` fires before registration; the host is then left untouched.
    #[tracing::instrument(skip_all, fields(version = compilation.version(), parallel = self.config.parallel))]
    pub fn execute_with_model<M, H>(
        &mut self,
        compilation: &Compilation,
        model: &M,
        host: &mut H,
        cancel: &CancellationToken,
    ) -> Result<GenerationReport, GenerateError>
    where
        M: SemanticModel + ?Sized,
        H: GeneratorHost + ?Sized,
    {
        let version = compilation.version();
        let candidates = unique_candidates(compilation, model);
        tracing::debug!(candidates = candidates.len(), "scanned");

        let cache = &self.cache;
        let config = &self.config;
        let process = |candidate: &CandidateDeclaration| -> Result<(Outcome, bool), GenerateError> {
            if cancel.is_cancelled() {
                return Err(GenerateError::Cancelled);
            }
            if let Some(hit) = cache.get(candidate.id, version) {
                return Ok((hit.clone(), true));
            }
            let outcome = resolver::resolve(model, candidate)
                .and_then(|target| emitter::emit(model, candidate, &target, config));
            Ok((outcome, false))
        };

        let outcomes: Vec<(Outcome, bool)> = if config.parallel {
            candidates.par_iter().map(process).collect::<Result<_, _>>()?
        } else {
            candidates.iter().map(process).collect::<Result<_, _>>()?
        };
        if cancel.is_cancelled() {
            return Err(GenerateError::Cancelled);
        }

        let mut report = GenerationReport::default();
        for (candidate, (outcome, hit)) in candidates.iter().zip(outcomes) {
            if hit {
                report.cache_hits += 1;
            } else {
                self.cache.insert(candidate.id, version, outcome.clone());
            }
            match outcome {
                Ok(unit) => {
                    host.add_source(unit.hint_name(), unit.text());
                    report.generated.push(unit.hint_name().to_string());
                }
                Err(skip) => {
                    tracing::debug!(container = %candidate.name, reason = %skip.reason, "skipped");
                    if self.config.report_skips && skip.reason != SkipReason::NoMarker {
                        report.skipped.push(SkippedCandidate {
                            decl: candidate.id,
                            name: candidate.name.clone(),
                            reason: skip.reason,
                        });
                    }
                }
            }
        }

        tracing::debug!(generated = report.generated.len(), cache_hits = report.cache_hits, "pass complete");
        Ok(report)
    }
}

/// Candidates with duplicate declarations and extra parts of partial types removed.
fn unique_candidates<M: SemanticModel + ?Sized>(compilation: &Compilation, model: &M) -> Vec<CandidateDeclaration> {
    let mut decls = HashSet::new();
    let mut symbols = HashSet::new();
    scanner::candidates(compilation)
        .into_iter()
        .filter(|c| decls.insert(c.id) && model.symbol_for(c.id).is_none_or(|s| symbols.insert(s)))
        .collect()
}
