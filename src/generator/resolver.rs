//! Target resolution: from a candidate to the interface its marker names.

use facade_core::lang::marker;

use crate::generator::model::{MemberDescriptor, ResolvedType, SemanticModel, SymbolId, TypeKind};
use crate::generator::outcome::{Skip, SkipReason};
use crate::generator::scanner::CandidateDeclaration;

/// The interface a facade forwards to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetInterfaceDescriptor {
    pub symbol: SymbolId,
    pub ty: ResolvedType,
    /// Fully-qualified display, type arguments included.
    pub display: String,
    pub kind: TypeKind,
    pub members: Vec<MemberDescriptor>,
}

impl TargetInterfaceDescriptor {
    pub fn type_args(&self) -> &[ResolvedType] {
        self.ty.type_args()
    }
}

/// Find the marker among the candidate's interfaces and describe its type argument.
///
/// When the marker is realized more than once (e.g. through two base types), the first one in interface order wins.
pub fn resolve<M: SemanticModel + ?Sized>(
    model: &M,
    candidate: &CandidateDeclaration,
) -> Result<TargetInterfaceDescriptor, Skip> {
    let symbol = model.symbol_for(candidate.id).ok_or(SkipReason::SymbolUnavailable)?;

    let marker_type = model
        .all_interfaces(symbol)
        .into_iter()
        .find(|iface| {
            iface
                .symbol()
                .and_then(|s| model.identity(s))
                .is_some_and(|id| !id.nested && marker::is_marker_identity(&id.namespace, &id.name, id.arity))
        })
        .ok_or(SkipReason::NoMarker)?;

    let target = match marker_type.type_args() {
        [single] => single.clone(),
        _ => return Err(SkipReason::NoMarker.into()),
    };

    let kind = model.type_kind(&target);
    let target_symbol = match target.symbol() {
        Some(s) if kind == TypeKind::Interface => s,
        _ => return Err(SkipReason::TargetNotInterface(kind).into()),
    };

    Ok(TargetInterfaceDescriptor {
        symbol: target_symbol,
        display: model.display(&target),
        members: model.interface_members(&target),
        kind,
        ty: target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::compilation::Compilation;
    use crate::frontend::symbols::SymbolTable;
    use crate::generator::scanner;

    fn resolve_named(source: &str, name: &str) -> Result<TargetInterfaceDescriptor, Skip> {
        let mut compilation = Compilation::with_marker();
        compilation.add_source("test.cs", source);
        let table = SymbolTable::build(&compilation);
        let candidate = scanner::candidates(&compilation)
            .into_iter()
            .find(|c| c.name == name)
            .unwrap_or_else(|| panic!("no candidate {name}"));
        resolve(&table, &candidate)
    }

    #[test]
    fn test_resolves_interface_target() {
        let target = resolve_named(
            "using FacadeGenerator; namespace A { interface IApi { void Run(); } partial class Api : IFacadeGenerator<IApi> { } }",
            "Api",
        )
        .unwrap();
        assert_eq!(target.display, "A.IApi");
        assert_eq!(target.kind, TypeKind::Interface);
        assert_eq!(target.members.len(), 1);
    }

    #[test]
    fn test_no_marker() {
        let skip = resolve_named("namespace A { interface IApi { } partial class Api : IApi { } }", "Api").unwrap_err();
        assert_eq!(skip.reason, SkipReason::NoMarker);
    }

    #[test]
    fn test_marker_lookalike_in_other_namespace() {
        let skip = resolve_named(
            "namespace Other { interface IFacadeGenerator<T> { } } namespace A { interface I { } partial class F : Other.IFacadeGenerator<I> { } }",
            "F",
        )
        .unwrap_err();
        assert_eq!(skip.reason, SkipReason::NoMarker);
    }

    #[test]
    fn test_class_argument_is_not_an_interface() {
        let skip = resolve_named(
            "using FacadeGenerator; namespace A { class Poco { } partial class F : IFacadeGenerator<Poco> { } }",
            "F",
        )
        .unwrap_err();
        assert_eq!(skip.reason, SkipReason::TargetNotInterface(TypeKind::Class));
    }

    #[test]
    fn test_other_non_interface_arguments() {
        let cases = [
            ("IFacadeGenerator<string>", TypeKind::Class),
            ("IFacadeGenerator<int[]>", TypeKind::Array),
            ("IFacadeGenerator<IUnknown>", TypeKind::Error),
            ("IFacadeGenerator<E>", TypeKind::Enum),
        ];
        for (base, kind) in cases {
            let source = format!("using FacadeGenerator; namespace A {{ enum E {{ X }} partial class F : {base} {{ }} }}");
            let skip = resolve_named(&source, "F").unwrap_err();
            assert_eq!(skip.reason, SkipReason::TargetNotInterface(kind), "{base}");
        }
    }

    #[test]
    fn test_type_parameter_argument() {
        let skip = resolve_named(
            "using FacadeGenerator; namespace A { partial class F<T> : IFacadeGenerator<T> where T : class { } }",
            "F",
        )
        .unwrap_err();
        assert_eq!(skip.reason, SkipReason::TargetNotInterface(TypeKind::TypeParameter));
    }

    #[test]
    fn test_marker_inherited_from_base_class() {
        let target = resolve_named(
            r#"
using FacadeGenerator;
namespace A
{
    interface IApi { }
    abstract class FacadeBase : IFacadeGenerator<IApi> { }
    partial class Api : FacadeBase { }
}
"#,
            "Api",
        )
        .unwrap();
        assert_eq!(target.display, "A.IApi");
    }

    #[test]
    fn test_first_marker_wins() {
        let target = resolve_named(
            r#"
using FacadeGenerator;
namespace A
{
    interface IOne { }
    interface ITwo { }
    interface IViaTwo : IFacadeGenerator<ITwo> { }
    partial class Api : IFacadeGenerator<IOne>, IViaTwo { }
}
"#,
            "Api",
        )
        .unwrap();
        assert_eq!(target.display, "A.IOne");
    }
}
