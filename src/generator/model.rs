//! Semantic vocabulary shared by the generator and its host.
//!
//! The generator never looks at another file's syntax directly. Everything it needs to know about symbols
//! (interfaces realized by a type, the kind of a type argument, the members of the target interface) comes through
//! [`SemanticModel`]. The reference host implements it in `frontend::symbols`; another host only has to answer the
//! same questions.

use std::fmt;

use facade_core::lang::accessibility::Accessibility;
use facade_core::lang::keywords::{self, KeywordId};
use facade_syntax::ast::{AccessorKind, ParamModifier, RefReturn, TypeDeclKind};

use crate::frontend::compilation::DeclId;

/// Opaque identity of a named type declared in the compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub usize);

/// Original-definition identity of a named type (type arguments erased).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeIdentity {
    pub namespace: Vec<String>,
    pub name: String,
    pub arity: usize,
    pub nested: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    TypeParameter,
    Array,
    Pointer,
    /// The type could not be bound to a declaration.
    Error,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Delegate => "delegate",
            TypeKind::TypeParameter => "type parameter",
            TypeKind::Array => "array",
            TypeKind::Pointer => "pointer",
            TypeKind::Error => "unresolved type",
        };
        write!(f, "{text}")
    }
}

/// A bound type, with type arguments substituted where known.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolvedType {
    /// A type declared in the compilation, constructed with `args`.
    Named { symbol: SymbolId, args: Vec<ResolvedType> },
    /// A named type that is not declared in the compilation; kept as written.
    External(ExternalType),
    TypeParameter(String),
    Predefined(KeywordId),
    Array { element: Box<ResolvedType>, ranks: Vec<usize> },
    Nullable(Box<ResolvedType>),
    Pointer(Box<ResolvedType>),
    Tuple(Vec<TupleItem>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternalType {
    pub qualifier: Option<String>,
    pub segments: Vec<(String, Vec<ResolvedType>)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TupleItem {
    pub ty: ResolvedType,
    pub name: Option<String>,
}

impl ResolvedType {
    pub fn named(symbol: SymbolId, args: Vec<ResolvedType>) -> Self {
        ResolvedType::Named { symbol, args }
    }

    /// Type arguments of a constructed named type; empty for everything else.
    pub fn type_args(&self) -> &[ResolvedType] {
        match self {
            ResolvedType::Named { args, .. } => args,
            ResolvedType::External(external) => external.segments.last().map(|(_, args)| args.as_slice()).unwrap_or(&[]),
            _ => &[],
        }
    }

    pub fn symbol(&self) -> Option<SymbolId> {
        match self {
            ResolvedType::Named { symbol, .. } => Some(*symbol),
            _ => None,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, ResolvedType::Predefined(KeywordId::Void))
    }

    /// Kind of types that do not need a symbol lookup; `None` for named types.
    pub fn structural_kind(&self) -> Option<TypeKind> {
        match self {
            ResolvedType::Named { .. } => None,
            ResolvedType::External(_) => Some(TypeKind::Error),
            ResolvedType::TypeParameter(_) => Some(TypeKind::TypeParameter),
            ResolvedType::Predefined(KeywordId::Object | KeywordId::String) => Some(TypeKind::Class),
            ResolvedType::Predefined(_) | ResolvedType::Tuple(_) => Some(TypeKind::Struct),
            ResolvedType::Array { .. } => Some(TypeKind::Array),
            ResolvedType::Pointer(_) => Some(TypeKind::Pointer),
            ResolvedType::Nullable(inner) => inner.structural_kind(),
        }
    }

    /// Render everything except named symbols, which `named` renders.
    pub fn render(&self, named: &dyn Fn(SymbolId, &[ResolvedType]) -> String) -> String {
        match self {
            ResolvedType::Named { symbol, args } => named(*symbol, args),
            ResolvedType::External(external) => {
                let mut out = String::new();
                if let Some(qualifier) = &external.qualifier {
                    out.push_str(qualifier);
                    out.push_str("::");
                }
                for (i, (name, args)) in external.segments.iter().enumerate() {
                    if i > 0 {
                        out.push('.');
                    }
                    out.push_str(name);
                    out.push_str(&render_args(args, named));
                }
                out
            }
            ResolvedType::TypeParameter(name) => name.clone(),
            ResolvedType::Predefined(id) => keywords::as_str(*id).to_string(),
            ResolvedType::Array { element, ranks } => {
                let mut out = element.render(named);
                for rank in ranks {
                    out.push('[');
                    out.push_str(&",".repeat(rank.saturating_sub(1)));
                    out.push(']');
                }
                out
            }
            ResolvedType::Nullable(inner) => format!("{}?", inner.render(named)),
            ResolvedType::Pointer(inner) => format!("{}*", inner.render(named)),
            ResolvedType::Tuple(items) => {
                let items: Vec<String> = items
                    .iter()
                    .map(|item| match &item.name {
                        Some(name) => format!("{} {name}", item.ty.render(named)),
                        None => item.ty.render(named),
                    })
                    .collect();
                format!("({})", items.join(", "))
            }
        }
    }
}

/// `<A, B>` for a non-empty argument list.
pub fn render_args(args: &[ResolvedType], named: &dyn Fn(SymbolId, &[ResolvedType]) -> String) -> String {
    if args.is_empty() {
        return String::new();
    }
    let args: Vec<String> = args.iter().map(|a| a.render(named)).collect();
    format!("<{}>", args.join(", "))
}

// ============================================================================
// Member descriptors
// ============================================================================

/// One interface member, with every type already rendered for the generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberDescriptor {
    Method(MethodDescriptor),
    /// Properties and indexers (an indexer has parameters).
    Property(PropertyDescriptor),
    Event(EventDescriptor),
}

impl MemberDescriptor {
    pub fn name(&self) -> &str {
        match self {
            MemberDescriptor::Method(m) => &m.name,
            MemberDescriptor::Property(p) => &p.name,
            MemberDescriptor::Event(e) => &e.name,
        }
    }

    pub fn is_static(&self) -> bool {
        match self {
            MemberDescriptor::Method(m) => m.is_static,
            MemberDescriptor::Property(p) => p.is_static,
            MemberDescriptor::Event(e) => e.is_static,
        }
    }

    /// Key under which two members are the same slot of an interface.
    ///
    /// Method type parameters count by position, so `M<T>(T)` and `M<U>(U)` share a slot.
    pub fn signature(&self) -> String {
        match self {
            MemberDescriptor::Method(m) => {
                let params: Vec<String> = m.params.iter().map(|p| p.signature_part(&m.erase(&p.ty))).collect();
                format!("M:{}`{}({})", m.name, m.type_params.len(), params.join(","))
            }
            MemberDescriptor::Property(p) if p.is_indexer() => {
                let params: Vec<String> = p.params.iter().map(|p| p.signature_part(&p.ty)).collect();
                format!("I:[{}]", params.join(","))
            }
            MemberDescriptor::Property(p) => format!("P:{}", p.name),
            MemberDescriptor::Event(e) => format!("E:{}", e.name),
        }
    }

    /// Whether one forwarder for `self` also implements `hidden`, a base member in the same slot.
    ///
    /// A `new` redeclaration with another return type, property type or fewer accessors does not.
    pub fn satisfies(&self, hidden: &MemberDescriptor) -> bool {
        match (self, hidden) {
            (MemberDescriptor::Method(a), MemberDescriptor::Method(b)) => {
                let constraints = |m: &MethodDescriptor| m.constraints.iter().map(|c| m.erase(c)).collect::<Vec<_>>();
                a.ref_return == b.ref_return
                    && a.erase(&a.return_type) == b.erase(&b.return_type)
                    && a.params.iter().map(|p| p.modifier).eq(b.params.iter().map(|p| p.modifier))
                    && constraints(a) == constraints(b)
            }
            (MemberDescriptor::Property(a), MemberDescriptor::Property(b)) => {
                a.ty == b.ty && b.accessors.iter().all(|k| a.accessors.contains(k))
            }
            (MemberDescriptor::Event(a), MemberDescriptor::Event(b)) => a.ty == b.ty,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: String,
    pub type_params: Vec<String>,
    /// Rendered clauses, e.g. `where T : class, new()`.
    pub constraints: Vec<String>,
    pub params: Vec<ParamDescriptor>,
    pub return_type: String,
    pub ref_return: Option<RefReturn>,
    pub is_static: bool,
}

impl MethodDescriptor {
    pub fn returns_void(&self) -> bool {
        self.ref_return.is_none() && self.return_type == keywords::as_str(KeywordId::Void)
    }

    /// `ty` with this method's type parameters replaced by their position (`T` becomes ``` ``0 ```).
    pub fn erase(&self, ty: &str) -> String {
        if self.type_params.is_empty() {
            return ty.to_string();
        }
        let is_ident = |c: char| c.is_alphanumeric() || c == '_' || c == '@';
        let mut out = String::with_capacity(ty.len());
        let mut rest = ty;
        while let Some(c) = rest.chars().next() {
            if !is_ident(c) {
                out.push(c);
                rest = &rest[c.len_utf8()..];
                continue;
            }
            let end = rest.find(|c: char| !is_ident(c)).unwrap_or(rest.len());
            let word = &rest[..end];
            // A segment after `.` names a member type, never a method type parameter.
            match self.type_params.iter().position(|p| p == word) {
                Some(index) if !out.ends_with('.') => out.push_str(&format!("``{index}")),
                _ => out.push_str(word),
            }
            rest = &rest[end..];
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDescriptor {
    pub scoped: bool,
    pub modifier: Option<ParamModifier>,
    pub ty: String,
    pub name: String,
    /// Default value, verbatim.
    pub default: Option<String>,
}

impl ParamDescriptor {
    fn signature_part(&self, ty: &str) -> String {
        match self.modifier {
            Some(ParamModifier::Ref | ParamModifier::Out | ParamModifier::In | ParamModifier::RefReadonly) => {
                format!("&{ty}")
            }
            _ => ty.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub ty: String,
    pub params: Vec<ParamDescriptor>,
    pub accessors: Vec<AccessorKind>,
    pub is_static: bool,
}

impl PropertyDescriptor {
    pub fn is_indexer(&self) -> bool {
        !self.params.is_empty()
    }

    pub fn has(&self, accessor: AccessorKind) -> bool {
        self.accessors.contains(&accessor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDescriptor {
    pub name: String,
    pub ty: String,
    pub is_static: bool,
}

// ============================================================================
// Container shape
// ============================================================================

/// What the emitter needs to know to re-open a container type as another partial declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerShape {
    pub name: String,
    pub kind: TypeDeclKind,
    pub type_params: Vec<String>,
    /// Empty for the global namespace.
    pub namespace: Vec<String>,
    /// Outermost first.
    pub enclosing: Vec<EnclosingType>,
    pub is_partial: bool,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnclosingType {
    pub name: String,
    pub kind: TypeDeclKind,
    pub type_params: Vec<String>,
    pub is_partial: bool,
}

// ============================================================================
// Semantic model
// ============================================================================

/// Symbol resolution service queried by the resolver and the emitter.
///
/// Implementations must be shareable across threads: candidates can be processed in parallel against one model.
pub trait SemanticModel: Sync {
    /// Symbol declared by a type declaration, if the declaration could be bound.
    fn symbol_for(&self, decl: DeclId) -> Option<SymbolId>;

    /// Every interface the symbol realizes, transitively, with type arguments substituted.
    fn all_interfaces(&self, symbol: SymbolId) -> Vec<ResolvedType>;

    /// Original-definition identity of a symbol.
    fn identity(&self, symbol: SymbolId) -> Option<TypeIdentity>;

    fn type_kind(&self, ty: &ResolvedType) -> TypeKind;

    /// Source text that names `ty` from any namespace.
    fn display(&self, ty: &ResolvedType) -> String;

    /// Members of an interface, own members first, then inherited ones.
    ///
    /// A base member hidden by a redeclaration that [satisfies](MemberDescriptor::satisfies) it is dropped. One hidden
    /// by an incompatible redeclaration is kept, so two entries then share a signature.
    fn interface_members(&self, interface: &ResolvedType) -> Vec<MemberDescriptor>;

    fn declared_accessibility(&self, symbol: SymbolId) -> Accessibility;

    /// Using directives in scope at the symbol's declarations, rendered, first-seen order.
    fn using_directives(&self, symbol: SymbolId) -> Vec<String>;

    fn container_shape(&self, symbol: SymbolId) -> Option<ContainerShape>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_named(_: SymbolId, _: &[ResolvedType]) -> String {
        "Named".to_string()
    }

    #[test]
    fn test_render_structural_types() {
        let list = ResolvedType::External(ExternalType {
            qualifier: None,
            segments: vec![("List".to_string(), vec![ResolvedType::Predefined(KeywordId::Int)])],
        });
        assert_eq!(list.render(&no_named), "List<int>");

        let grid = ResolvedType::Array {
            element: Box::new(ResolvedType::Nullable(Box::new(ResolvedType::named(SymbolId(0), vec![])))),
            ranks: vec![2],
        };
        assert_eq!(grid.render(&no_named), "Named?[,]");
    }

    #[test]
    fn test_structural_kinds() {
        assert_eq!(ResolvedType::Predefined(KeywordId::String).structural_kind(), Some(TypeKind::Class));
        assert_eq!(ResolvedType::Predefined(KeywordId::Int).structural_kind(), Some(TypeKind::Struct));
        assert_eq!(ResolvedType::TypeParameter("T".into()).structural_kind(), Some(TypeKind::TypeParameter));
        assert_eq!(ResolvedType::named(SymbolId(3), vec![]).structural_kind(), None);
    }

    #[test]
    fn test_signature_ignores_parameter_names() {
        let method = |param: &str| {
            MemberDescriptor::Method(MethodDescriptor {
                name: "Run".into(),
                type_params: vec![],
                constraints: vec![],
                params: vec![ParamDescriptor {
                    scoped: false,
                    modifier: Some(ParamModifier::Ref),
                    ty: "int".into(),
                    name: param.into(),
                    default: None,
                }],
                return_type: "void".into(),
                ref_return: None,
                is_static: false,
            })
        };
        assert_eq!(method("a").signature(), method("b").signature());
        assert_eq!(method("a").signature(), "M:Run`0(&int)");
    }

    fn generic(param: &str, return_type: &str) -> MethodDescriptor {
        MethodDescriptor {
            name: "Map".into(),
            type_params: vec![param.into()],
            constraints: vec![format!("where {param} : class")],
            params: vec![ParamDescriptor {
                scoped: false,
                modifier: None,
                ty: format!("System.Func<{param}, {param}[]>"),
                name: "f".into(),
                default: None,
            }],
            return_type: return_type.into(),
            ref_return: None,
            is_static: false,
        }
    }

    #[test]
    fn test_signature_erases_method_type_parameter_names() {
        let t = MemberDescriptor::Method(generic("T", "T"));
        let u = MemberDescriptor::Method(generic("U", "U"));
        assert_eq!(t.signature(), u.signature());
        assert_eq!(t.signature(), "M:Map`1(System.Func<``0, ``0[]>)");
        assert!(u.satisfies(&t));
    }

    #[test]
    fn test_erase_leaves_qualified_segments() {
        let method = generic("T", "void");
        assert_eq!(method.erase("A.T"), "A.T");
        assert_eq!(method.erase("TValue"), "TValue");
        assert_eq!(method.erase("(T a, int b)"), "(``0 a, int b)");
    }

    #[test]
    fn test_hiding_member_with_other_type_does_not_satisfy() {
        let base = MemberDescriptor::Method(generic("T", "object"));
        let hiding = MemberDescriptor::Method(generic("T", "string"));
        assert_eq!(base.signature(), hiding.signature());
        assert!(!hiding.satisfies(&base));

        let property = |ty: &str, accessors: Vec<AccessorKind>| {
            MemberDescriptor::Property(PropertyDescriptor {
                name: "Size".into(),
                ty: ty.into(),
                params: vec![],
                accessors,
                is_static: false,
            })
        };
        let read_write = property("int", vec![AccessorKind::Get, AccessorKind::Set]);
        let read_only = property("int", vec![AccessorKind::Get]);
        assert!(read_write.satisfies(&read_only));
        assert!(!read_only.satisfies(&read_write));
        assert!(!property("long", vec![AccessorKind::Get]).satisfies(&read_only));
    }
}
