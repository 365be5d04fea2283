//! Candidate discovery.
//!
//! Purely syntactic: a candidate is any class, struct, record or record struct declaration, wherever it is nested.
//! Whether it is actually a facade is decided later by the resolver.

use facade_syntax::ast::{Span, TypeDecl, TypeDeclKind};

use crate::frontend::compilation::{Compilation, DeclId};

/// A container declaration worth resolving. Valid for one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateDeclaration {
    pub id: DeclId,
    pub name: String,
    pub span: Span,
}

/// Return `true` for declarations that can implement an interface through a partial part.
pub fn is_candidate(decl: &TypeDecl) -> bool {
    matches!(
        decl.kind,
        TypeDeclKind::Class | TypeDeclKind::Struct | TypeDeclKind::Record | TypeDeclKind::RecordStruct
    )
}

/// Every candidate in the compilation, in program order.
pub fn candidates(compilation: &Compilation) -> Vec<CandidateDeclaration> {
    compilation
        .declarations()
        .into_iter()
        .filter(|site| is_candidate(site.decl))
        .map(|site| CandidateDeclaration { id: site.id, name: site.decl.name.clone(), span: site.span })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_kinds() {
        let mut compilation = Compilation::new();
        compilation.add_source(
            "kinds.cs",
            r#"
namespace K
{
    class C { interface INested { } struct S { } }
    interface I { }
    enum E { A, B }
    delegate void D();
    record R(int X);
    record struct RS;
    public partial struct P { }
}
"#,
        );
        let names: Vec<String> = candidates(&compilation).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["C", "S", "R", "RS", "P"]);
    }

    #[test]
    fn test_marker_file_has_no_candidates() {
        assert!(candidates(&Compilation::with_marker()).is_empty());
    }
}
