//! Abstract Syntax Tree definitions for the C# declaration subset.
//!
//! The tree keeps exactly what the generator needs to reason about declarations: namespaces, using directives,
//! type declarations with their modifiers/type parameters/base lists, and the signatures of methods, properties,
//! indexers and events. Bodies are not represented.

use std::fmt;

use facade_core::lang::accessibility::AccessModifier;
use facade_core::lang::keywords::{self, KeywordId};

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Identifier as written, including a verbatim `@` prefix when present.
pub type Ident = String;

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompilationUnit {
    pub usings: Vec<Spanned<UsingDirective>>,
    pub members: Vec<Spanned<NamespaceMember>>,
}

// ============================================================================
// Using directives and namespaces
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct UsingDirective {
    /// `global using ...;`
    pub is_global: bool,
    pub kind: UsingKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UsingKind {
    /// `using System.Collections.Generic;`
    Namespace(QualifiedName),
    /// `using static System.Math;`
    Static(TypeRef),
    /// `using Map = System.Collections.Generic.Dictionary<string, int>;`
    Alias { alias: Ident, target: TypeRef },
}

impl fmt::Display for UsingDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_global {
            write!(f, "global ")?;
        }
        match &self.kind {
            UsingKind::Namespace(name) => write!(f, "using {name};"),
            UsingKind::Static(ty) => write!(f, "using static {ty};"),
            UsingKind::Alias { alias, target } => write!(f, "using {alias} = {target};"),
        }
    }
}

/// Dotted name such as `System.Collections.Generic`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QualifiedName {
    /// `global::` qualifier
    pub global: bool,
    pub segments: Vec<Ident>,
}

impl QualifiedName {
    pub fn new(segments: Vec<Ident>) -> Self {
        Self { global: false, segments }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.global {
            write!(f, "global::")?;
        }
        write!(f, "{}", self.segments.join("."))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NamespaceMember {
    Namespace(NamespaceDecl),
    Type(TypeDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceDecl {
    pub name: QualifiedName,
    /// `namespace Foo;` applies to the rest of the file.
    pub file_scoped: bool,
    pub usings: Vec<Spanned<UsingDirective>>,
    pub members: Vec<Spanned<NamespaceMember>>,
}

// ============================================================================
// Modifiers
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Public,
    Private,
    Protected,
    Internal,
    File,
    Static,
    Abstract,
    Sealed,
    Partial,
    Readonly,
    Ref,
    Unsafe,
    New,
    Virtual,
    Override,
    Extern,
    Const,
    Volatile,
    Async,
    Required,
}

/// Modifiers in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Modifiers(pub Vec<Modifier>);

impl Modifiers {
    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_partial(&self) -> bool {
        self.contains(Modifier::Partial)
    }

    pub fn is_static(&self) -> bool {
        self.contains(Modifier::Static)
    }

    /// The access modifiers among these, in source order.
    pub fn access_modifiers(&self) -> Vec<AccessModifier> {
        self.0
            .iter()
            .filter_map(|m| match m {
                Modifier::Public => Some(AccessModifier::Public),
                Modifier::Private => Some(AccessModifier::Private),
                Modifier::Protected => Some(AccessModifier::Protected),
                Modifier::Internal => Some(AccessModifier::Internal),
                Modifier::File => Some(AccessModifier::File),
                _ => None,
            })
            .collect()
    }
}

// ============================================================================
// Type declarations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeDeclKind {
    Class,
    Struct,
    Interface,
    Enum,
    /// `record` / `record class`
    Record,
    RecordStruct,
    Delegate,
}

impl TypeDeclKind {
    /// Keyword(s) that introduce a declaration of this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            TypeDeclKind::Class => "class",
            TypeDeclKind::Struct => "struct",
            TypeDeclKind::Interface => "interface",
            TypeDeclKind::Enum => "enum",
            TypeDeclKind::Record => "record",
            TypeDeclKind::RecordStruct => "record struct",
            TypeDeclKind::Delegate => "delegate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variance {
    In,
    Out,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParam {
    pub variance: Option<Variance>,
    pub name: Ident,
}

/// `where T : class, new()`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintClause {
    pub param: Ident,
    pub constraints: Vec<TypeConstraint>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeConstraint {
    Class { nullable: bool },
    Struct,
    Unmanaged,
    NotNull,
    Default,
    New,
    Type(TypeRef),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub modifiers: Modifiers,
    pub kind: TypeDeclKind,
    pub name: Ident,
    pub type_params: Vec<TypeParam>,
    pub bases: Vec<Spanned<TypeRef>>,
    pub constraints: Vec<ConstraintClause>,
    pub members: Vec<Spanned<MemberDecl>>,
}

impl TypeDecl {
    pub fn arity(&self) -> usize {
        self.type_params.len()
    }
}

// ============================================================================
// Members
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum MemberDecl {
    Method(MethodDecl),
    Property(PropertyDecl),
    Indexer(IndexerDecl),
    Event(EventDecl),
    Type(TypeDecl),
}

/// `ref` / `ref readonly` on a return type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefReturn {
    Ref,
    RefReadonly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub modifiers: Modifiers,
    pub ref_return: Option<RefReturn>,
    pub return_type: TypeRef,
    pub name: Ident,
    pub type_params: Vec<TypeParam>,
    pub params: Vec<Param>,
    pub constraints: Vec<ConstraintClause>,
    pub has_body: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamModifier {
    Ref,
    Out,
    In,
    RefReadonly,
    Params,
    This,
}

impl ParamModifier {
    pub fn keyword(self) -> &'static str {
        match self {
            ParamModifier::Ref => "ref",
            ParamModifier::Out => "out",
            ParamModifier::In => "in",
            ParamModifier::RefReadonly => "ref readonly",
            ParamModifier::Params => "params",
            ParamModifier::This => "this",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub scoped: bool,
    pub modifier: Option<ParamModifier>,
    pub ty: TypeRef,
    pub name: Ident,
    /// Default value re-rendered from its tokens.
    pub default: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    Get,
    Set,
    Init,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    pub modifiers: Modifiers,
    pub ty: TypeRef,
    pub name: Ident,
    pub accessors: Vec<AccessorKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexerDecl {
    pub modifiers: Modifiers,
    pub ty: TypeRef,
    pub params: Vec<Param>,
    pub accessors: Vec<AccessorKind>,
}

/// `event EventHandler Changed;` (field-like events may declare several names).
#[derive(Debug, Clone, PartialEq)]
pub struct EventDecl {
    pub modifiers: Modifiers,
    pub ty: TypeRef,
    pub names: Vec<Ident>,
}

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    /// `int`, `string`, `void`, ...
    Predefined(KeywordId),
    Named(NamedTypeRef),
    /// Element type followed by rank specifiers in source order; `int[][,]` has ranks `[1, 2]`.
    Array { element: Box<TypeRef>, ranks: Vec<usize> },
    Nullable(Box<TypeRef>),
    Pointer(Box<TypeRef>),
    Tuple(Vec<TupleElement>),
}

/// `global::System.Collections.Generic.List<int>`
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTypeRef {
    /// Alias qualifier before `::`, almost always `global`.
    pub qualifier: Option<Ident>,
    pub segments: Vec<TypeSegment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSegment {
    pub name: Ident,
    pub args: Vec<TypeRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TupleElement {
    pub ty: TypeRef,
    pub name: Option<Ident>,
}

impl TypeRef {
    /// Return `true` for the `void` keyword type.
    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Predefined(KeywordId::Void))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Predefined(id) => write!(f, "{}", keywords::as_str(*id)),
            TypeRef::Named(named) => write!(f, "{named}"),
            TypeRef::Array { element, ranks } => {
                write!(f, "{element}")?;
                for rank in ranks {
                    write!(f, "[{}]", ",".repeat(rank.saturating_sub(1)))?;
                }
                Ok(())
            }
            TypeRef::Nullable(inner) => write!(f, "{inner}?"),
            TypeRef::Pointer(inner) => write!(f, "{inner}*"),
            TypeRef::Tuple(elements) => {
                write!(f, "(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element.ty)?;
                    if let Some(name) = &element.name {
                        write!(f, " {name}")?;
                    }
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for NamedTypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(qualifier) = &self.qualifier {
            write!(f, "{qualifier}::")?;
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment.name)?;
            if !segment.args.is_empty() {
                let args: Vec<String> = segment.args.iter().map(|a| a.to_string()).collect();
                write!(f, "<{}>", args.join(", "))?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for TypeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeConstraint::Class { nullable: false } => write!(f, "class"),
            TypeConstraint::Class { nullable: true } => write!(f, "class?"),
            TypeConstraint::Struct => write!(f, "struct"),
            TypeConstraint::Unmanaged => write!(f, "unmanaged"),
            TypeConstraint::NotNull => write!(f, "notnull"),
            TypeConstraint::Default => write!(f, "default"),
            TypeConstraint::New => write!(f, "new()"),
            TypeConstraint::Type(ty) => write!(f, "{ty}"),
        }
    }
}
