//! Compilation: the set of parsed source files one generator pass runs over.
//!
//! Files are parsed with recovery, so a file with syntax errors still contributes every declaration that parsed
//! cleanly. Every compilation, clone and mutation gets a fresh [`Compilation::version`] from a process-wide counter,
//! so two different programs never share a version. The generation cache keys on it.

use std::sync::atomic::{AtomicU64, Ordering};

use facade_core::lang::marker;
use facade_syntax::ast::{CompilationUnit, MemberDecl, NamespaceMember, Span, Spanned, TypeDecl, UsingDirective};
use facade_syntax::diagnostics::SyntaxError;
use facade_syntax::parser;

use crate::generator::GeneratorHost;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub usize);

/// Identity of one type declaration: its file and its position in a preorder walk of that file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId {
    pub file: FileId,
    pub ordinal: usize,
}

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub id: FileId,
    pub path: String,
    pub text: String,
    pub unit: CompilationUnit,
    pub diagnostics: Vec<SyntaxError>,
}

impl SourceFile {
    fn parse(id: FileId, path: String, text: String) -> Self {
        let (unit, diagnostics) = parser::parse_source(&text);
        if !diagnostics.is_empty() {
            tracing::debug!(path = %path, errors = diagnostics.len(), "source file has syntax errors");
        }
        Self { id, path, text, unit, diagnostics }
    }
}

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

fn next_version() -> u64 {
    NEXT_VERSION.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug)]
pub struct Compilation {
    files: Vec<SourceFile>,
    version: u64,
}

impl Default for Compilation {
    fn default() -> Self {
        Self { files: Vec::new(), version: next_version() }
    }
}

impl Clone for Compilation {
    /// A clone may be edited independently, so it never shares the original's version.
    fn clone(&self) -> Self {
        Self { files: self.files.clone(), version: next_version() }
    }
}

impl Compilation {
    pub fn new() -> Self {
        Self::default()
    }

    /// A compilation that already contains the marker declaration.
    pub fn with_marker() -> Self {
        let mut compilation = Self::new();
        compilation.add_source(format!("{}.cs", marker::MARKER_HINT_NAME), marker::MARKER_SOURCE);
        compilation
    }

    pub fn add_source(&mut self, path: impl Into<String>, text: impl Into<String>) -> FileId {
        let id = FileId(self.files.len());
        self.files.push(SourceFile::parse(id, path.into(), text.into()));
        self.version = next_version();
        id
    }

    /// Re-parse an existing file with new text. Returns `false` for an unknown id.
    pub fn replace_source(&mut self, id: FileId, text: impl Into<String>) -> bool {
        let Some(slot) = self.files.get_mut(id.0) else {
            return false;
        };
        let path = std::mem::take(&mut slot.path);
        *slot = SourceFile::parse(id, path, text.into());
        self.version = next_version();
        true
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.0)
    }

    pub fn find_file(&self, path: &str) -> Option<FileId> {
        self.files.iter().find(|f| f.path == path).map(|f| f.id)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn has_errors(&self) -> bool {
        self.files.iter().any(|f| !f.diagnostics.is_empty())
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = (&SourceFile, &SyntaxError)> {
        self.files.iter().flat_map(|file| file.diagnostics.iter().map(move |err| (file, err)))
    }

    /// Every type declaration, in program order, nested declarations right after their container.
    pub fn declarations(&self) -> Vec<DeclSite<'_>> {
        let mut sites = Vec::new();
        for file in &self.files {
            let mut walker = DeclWalker {
                file: file.id,
                ordinal: 0,
                scopes: vec![ScopeLevel { namespace: Vec::new(), usings: &file.unit.usings }],
                enclosing: Vec::new(),
                out: &mut sites,
            };
            walker.namespace_members(&file.unit.members);
        }
        sites
    }
}

impl GeneratorHost for Compilation {
    /// Generated sources join the compilation; re-adding a hint replaces the earlier text.
    fn add_source(&mut self, hint_name: &str, text: &str) {
        let path = format!("{hint_name}.cs");
        match self.find_file(&path) {
            Some(id) => {
                self.replace_source(id, text);
            }
            None => {
                Compilation::add_source(self, path, text);
            }
        }
    }
}

/// One namespace level in effect at a declaration, with the using directives written at that level.
#[derive(Debug, Clone)]
pub struct ScopeLevel<'a> {
    /// Fully-qualified namespace; empty for the compilation-unit level.
    pub namespace: Vec<String>,
    pub usings: &'a [Spanned<UsingDirective>],
}

/// A type declaration together with the context it was declared in.
#[derive(Debug, Clone)]
pub struct DeclSite<'a> {
    pub id: DeclId,
    pub decl: &'a TypeDecl,
    pub span: Span,
    /// Outermost (compilation unit) first.
    pub scopes: Vec<ScopeLevel<'a>>,
    /// Enclosing type declarations, outermost first.
    pub enclosing: Vec<&'a TypeDecl>,
    /// Declaration of the nearest enclosing type.
    pub parent: Option<DeclId>,
}

impl DeclSite<'_> {
    pub fn namespace(&self) -> &[String] {
        self.scopes.last().map(|s| s.namespace.as_slice()).unwrap_or(&[])
    }

    pub fn is_nested(&self) -> bool {
        !self.enclosing.is_empty()
    }
}

struct DeclWalker<'a, 'o> {
    file: FileId,
    ordinal: usize,
    scopes: Vec<ScopeLevel<'a>>,
    enclosing: Vec<(&'a TypeDecl, DeclId)>,
    out: &'o mut Vec<DeclSite<'a>>,
}

impl<'a> DeclWalker<'a, '_> {
    fn namespace_members(&mut self, members: &'a [Spanned<NamespaceMember>]) {
        for member in members {
            match &member.node {
                NamespaceMember::Namespace(ns) => {
                    // `namespace A.B` opens one level per segment; its usings belong to the innermost one
                    let base = self.scopes.last().map(|s| s.namespace.clone()).unwrap_or_default();
                    let count = ns.name.segments.len();
                    for (i, segment) in ns.name.segments.iter().enumerate() {
                        let mut namespace = if i == 0 {
                            base.clone()
                        } else {
                            self.scopes.last().map(|s| s.namespace.clone()).unwrap_or_default()
                        };
                        namespace.push(segment.clone());
                        let usings: &'a [Spanned<UsingDirective>] = if i + 1 == count { &ns.usings } else { &[] };
                        self.scopes.push(ScopeLevel { namespace, usings });
                    }
                    self.namespace_members(&ns.members);
                    self.scopes.truncate(self.scopes.len() - count);
                }
                NamespaceMember::Type(decl) => self.type_decl(decl, member.span),
            }
        }
    }

    fn type_decl(&mut self, decl: &'a TypeDecl, span: Span) {
        let id = DeclId { file: self.file, ordinal: self.ordinal };
        self.ordinal += 1;
        self.out.push(DeclSite {
            id,
            decl,
            span,
            scopes: self.scopes.clone(),
            enclosing: self.enclosing.iter().map(|(d, _)| *d).collect(),
            parent: self.enclosing.last().map(|(_, id)| *id),
        });

        self.enclosing.push((decl, id));
        for member in &decl.members {
            if let MemberDecl::Type(nested) = &member.node {
                self.type_decl(nested, member.span);
            }
        }
        self.enclosing.pop();
    }
}
