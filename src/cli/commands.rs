//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use facade_core::lang::marker;
use facade_syntax::diagnostics::SyntaxError;
use miette::{NamedSource, Report};

use crate::frontend::compilation::Compilation;
use crate::frontend::{lexer, parser};
use crate::generator::{CancellationToken, GenerationReport, Generator, GeneratorConfig, GeneratorHost, SourceOutput};

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (100 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Directories never scanned for sources.
const SKIPPED_DIRS: &[&str] = &["bin", "obj"];

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(file_path: &str) -> CliResult<String> {
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path, e)))
}

/// Render a syntax error with source context.
pub fn format_syntax_error(file_path: &str, source: &str, error: &SyntaxError) -> String {
    let report = Report::new(error.clone()).with_source_code(NamedSource::new(file_path, source.to_string()));
    format!("{report:?}")
}

fn format_errors(file_path: &str, source: &str, errors: &[SyntaxError]) -> String {
    let mut msg = String::new();
    for err in errors {
        msg.push_str(&format_syntax_error(file_path, source, err));
        msg.push('\n');
    }
    msg.trim_end().to_string()
}

/// Validate the output directory to prevent path traversal.
fn validate_output_dir(out_dir: &Path) -> CliResult<()> {
    for component in out_dir.components() {
        if let std::path::Component::ParentDir = component {
            return Err(CliError::failure(format!(
                "Output directory '{}' contains path traversal (..)",
                out_dir.display()
            )));
        }
    }

    if out_dir.is_absolute() {
        tracing::warn!("Using absolute output path: {}. Consider using a relative path.", out_dir.display());
    }

    Ok(())
}

/// Collect `.cs` files under `path`, sorted, skipping hidden directories and build output.
pub fn collect_cs_files(path: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if path.is_file() {
        if path.extension().is_some_and(|ext| ext == "cs") {
            files.push(path.to_path_buf());
        }
    } else if path.is_dir() {
        if let Ok(entries) = fs::read_dir(path) {
            for entry in entries.flatten() {
                let entry_path = entry.path();
                if entry_path.is_dir() {
                    let name = entry_path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                    if !name.starts_with('.') && !SKIPPED_DIRS.contains(&name) {
                        files.extend(collect_cs_files(&entry_path));
                    }
                } else if entry_path.extension().is_some_and(|ext| ext == "cs") {
                    files.push(entry_path);
                }
            }
        }
    }

    files.sort();
    files
}

/// Parse every `.cs` file under `paths` into one compilation (marker included).
///
/// Syntax errors are printed and do not stop the other files from being used.
pub fn load_compilation(paths: &[PathBuf], exclude: Option<&Path>) -> CliResult<Compilation> {
    let mut files: Vec<PathBuf> = paths.iter().flat_map(|p| collect_cs_files(p)).collect();
    // Previously generated output must not feed the next pass. Both sides are canonicalized so that `./Generated/..`
    // and `Generated` compare equal.
    if let Some(excluded) = exclude.and_then(|dir| fs::canonicalize(dir).ok()) {
        files.retain(|f| !fs::canonicalize(f).is_ok_and(|f| f.starts_with(&excluded)));
    }
    files.sort();
    files.dedup();

    if files.is_empty() {
        return Err(CliError::failure("No .cs files found"));
    }

    let mut compilation = Compilation::with_marker();
    for file in &files {
        let path = file.to_string_lossy().to_string();
        let source = read_source(&path)?;
        compilation.add_source(path, source);
    }

    for (file, err) in compilation.diagnostics() {
        tracing::warn!(path = %file.path, "syntax error: {}", err);
        eprintln!("{}", format_syntax_error(&file.path, &file.text, err));
    }

    Ok(compilation)
}

fn run_pass<H: GeneratorHost + ?Sized>(
    compilation: &Compilation,
    config: GeneratorConfig,
    host: &mut H,
) -> CliResult<GenerationReport> {
    let mut generator = Generator::new(config);
    generator.initialize(host);
    generator
        .execute(compilation, host, &CancellationToken::new())
        .map_err(|e| CliError::failure(format!("Error: {e}")))
}

/// `*.generated.cs` files directly inside `dir`, sorted.
pub fn generated_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.is_file() && path.to_string_lossy().ends_with(GENERATED_FILE_SUFFIX))
                .collect()
        })
        .unwrap_or_default();
    files.sort();
    files
}

const GENERATED_FILE_SUFFIX: &str = ".generated.cs";

/// Host that writes each unit to `<dir>/<hint>.cs`, leaving identical files untouched.
#[derive(Debug)]
pub struct DirectoryHost {
    dir: PathBuf,
    registered: BTreeSet<PathBuf>,
    pub written: Vec<PathBuf>,
    pub unchanged: usize,
    pub removed: Vec<PathBuf>,
    pub errors: Vec<String>,
}

impl DirectoryHost {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            registered: BTreeSet::new(),
            written: Vec::new(),
            unchanged: 0,
            removed: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Delete generated files that this pass did not register, e.g. parts of types that are no longer facades.
    pub fn prune_stale(&mut self) {
        for path in generated_files(&self.dir) {
            if self.registered.contains(&path) {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => self.removed.push(path),
                Err(e) => self.errors.push(format!("Error removing {}: {}", path.display(), e)),
            }
        }
    }
}

impl GeneratorHost for DirectoryHost {
    fn add_source(&mut self, hint_name: &str, text: &str) {
        let path = self.dir.join(format!("{hint_name}.cs"));
        self.registered.insert(path.clone());
        if fs::read_to_string(&path).is_ok_and(|existing| existing == text) {
            self.unchanged += 1;
            return;
        }
        match fs::write(&path, text) {
            Ok(()) => self.written.push(path),
            Err(e) => self.errors.push(format!("Error writing {}: {}", path.display(), e)),
        }
    }
}

/// Arguments of `facadegen generate`.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub paths: Vec<PathBuf>,
    pub output: PathBuf,
    pub check: bool,
    pub explain: bool,
    pub config: GeneratorConfig,
}

/// Generate facade sources into the output directory (or check that they are current).
pub fn generate(request: &GenerateRequest) -> CliResult<ExitCode> {
    validate_output_dir(&request.output)?;
    let compilation = load_compilation(&request.paths, Some(&request.output))?;

    if request.check {
        let mut output = SourceOutput::new();
        let report = run_pass(&compilation, request.config.clone(), &mut output)?;
        explain(&report, request.explain);

        let expected: BTreeSet<PathBuf> =
            output.hint_names().map(|hint| request.output.join(format!("{hint}.cs"))).collect();
        let stale: Vec<PathBuf> = output
            .iter()
            .map(|(hint, text)| (request.output.join(format!("{hint}.cs")), text))
            .filter(|(path, text)| !fs::read_to_string(path).is_ok_and(|existing| existing == *text))
            .map(|(path, _)| path)
            .collect();
        let orphaned: Vec<PathBuf> =
            generated_files(&request.output).into_iter().filter(|path| !expected.contains(path)).collect();
        for path in &stale {
            println!("Out of date: {}", path.display());
        }
        for path in &orphaned {
            println!("No longer generated: {}", path.display());
        }
        let outdated = stale.len() + orphaned.len();
        if outdated > 0 {
            return Err(CliError::failure(format!("\n{outdated} generated file(s) out of date")));
        }
        println!("✓ {} generated file(s) up to date", output.len());
        return Ok(ExitCode::SUCCESS);
    }

    fs::create_dir_all(&request.output).map_err(|e| {
        CliError::failure(format!("Error creating output directory '{}': {}", request.output.display(), e))
    })?;
    let mut host = DirectoryHost::new(&request.output);
    let report = run_pass(&compilation, request.config.clone(), &mut host)?;
    explain(&report, request.explain);
    host.prune_stale();

    for path in &host.written {
        println!("Generated: {}", path.display());
    }
    for path in &host.removed {
        println!("Removed: {}", path.display());
    }
    for err in &host.errors {
        eprintln!("{err}");
    }
    println!(
        "\n✓ {} file(s) written, {} unchanged, {} removed",
        host.written.len(),
        host.unchanged,
        host.removed.len()
    );

    if !host.errors.is_empty() {
        return Err(CliError::new("", ExitCode::FAILURE));
    }
    Ok(ExitCode::SUCCESS)
}

fn explain(report: &GenerationReport, enabled: bool) {
    if !enabled {
        return;
    }
    for skipped in &report.skipped {
        println!("Skipped {}: {}", skipped.name, skipped.reason);
    }
}

/// Print generated sources (without the marker) to stdout.
pub fn emit(paths: &[PathBuf], config: GeneratorConfig) -> CliResult<ExitCode> {
    let compilation = load_compilation(paths, None)?;
    let mut output = SourceOutput::new();
    let mut generator = Generator::new(config);
    generator
        .execute(&compilation, &mut output, &CancellationToken::new())
        .map_err(|e| CliError::failure(format!("Error: {e}")))?;

    for (hint, text) in output.iter() {
        println!("// ---- {hint}.cs ----");
        print!("{text}");
    }
    Ok(ExitCode::SUCCESS)
}

/// Print the marker interface source.
pub fn print_marker() -> CliResult<ExitCode> {
    print!("{}", marker::MARKER_SOURCE);
    Ok(ExitCode::SUCCESS)
}

/// Tokenize and display tokens.
pub fn lex_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lexer::lex(&source).map_err(|errs| CliError::failure(format_errors(file_path, &source, &errs)))?;

    for tok in &tokens {
        println!("{:?}", tok);
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse and display AST.
pub fn parse_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lexer::lex(&source).map_err(|errs| CliError::failure(format_errors(file_path, &source, &errs)))?;
    let unit = parser::parse(&tokens).map_err(|errs| CliError::failure(format_errors(file_path, &source, &errs)))?;

    println!("{:#?}", unit);
    Ok(ExitCode::SUCCESS)
}
