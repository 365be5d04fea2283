//! Symbol table for the reference host.
//!
//! Binds the type declarations of a [`Compilation`] into named type symbols and answers the generator's semantic
//! queries through [`SemanticModel`].
//!
//! Binding happens in two phases:
//! 1. **Declare**: every declaration site becomes (or joins) a symbol keyed by container, namespace, name and
//!    arity, so the parts of a partial type merge into one symbol.
//! 2. **Resolve bases**: base lists are bound once every symbol exists, so declaration order across files does not
//!    matter.
//!
//! Member signatures are bound lazily, per query, because they depend on the type arguments of the interface being
//! asked about.
//!
//! ## Name lookup
//! A simple name is looked up in this order, first hit wins:
//! - type parameters in scope
//! - types nested in the enclosing types, innermost first
//! - each namespace level, innermost first: its types and sub-namespaces, then the namespaces its using directives
//!   import, then its aliases
//!
//! Names that bind to nothing are kept as written ([`ResolvedType::External`]); the copied using directives make them
//! resolve again in the generated file.

use std::collections::{HashMap, HashSet};

use facade_core::lang::accessibility::{self, Accessibility};
use facade_syntax::ast::{
    ConstraintClause, MemberDecl, Modifier, NamedTypeRef, Param, TypeConstraint, TypeDecl, TypeDeclKind, TypeRef,
    TypeSegment, UsingDirective, UsingKind,
};

use crate::frontend::compilation::{Compilation, DeclId, DeclSite};
use crate::generator::model::{
    ContainerShape, EnclosingType, EventDescriptor, ExternalType, MemberDescriptor, MethodDescriptor,
    ParamDescriptor, PropertyDescriptor, ResolvedType, SemanticModel, SymbolId, TupleItem, TypeIdentity, TypeKind,
    render_args,
};

/// Expansion limit for base lists; stops `interface I<T> : I<List<T>>` and class cycles.
const MAX_BASE_DEPTH: usize = 32;

/// A namespace level at one declaration, owned.
#[derive(Debug, Clone)]
struct Scope {
    namespace: Vec<String>,
    usings: Vec<UsingDirective>,
}

/// One declaration of a symbol. Nested type declarations are stripped from `decl`; they are symbols of their own.
#[derive(Debug, Clone)]
struct DeclRecord {
    id: DeclId,
    decl: TypeDecl,
    /// Outermost first.
    scopes: Vec<Scope>,
}

#[derive(Debug, Clone)]
pub struct TypeSymbol {
    pub id: SymbolId,
    pub name: String,
    pub kind: TypeDeclKind,
    pub type_params: Vec<String>,
    pub namespace: Vec<String>,
    pub container: Option<SymbolId>,
    decls: Vec<DeclRecord>,
    nested: Vec<SymbolId>,
}

impl TypeSymbol {
    pub fn arity(&self) -> usize {
        self.type_params.len()
    }

    /// Declarations merged into this symbol, in program order.
    pub fn declarations(&self) -> impl Iterator<Item = DeclId> + '_ {
        self.decls.iter().map(|d| d.id)
    }

    fn is_partial(&self) -> bool {
        self.decls.iter().all(|d| d.decl.modifiers.is_partial())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SymbolKey {
    container: Option<SymbolId>,
    namespace: Vec<String>,
    name: String,
    arity: usize,
}

/// Where a type reference is being bound.
struct LookupContext<'t> {
    scopes: &'t [Scope],
    /// Innermost first.
    types: Vec<SymbolId>,
    type_params: Vec<String>,
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<TypeSymbol>,
    by_decl: HashMap<DeclId, SymbolId>,
    by_key: HashMap<SymbolKey, SymbolId>,
    /// Top-level types per namespace. Every namespace (and prefix of one) that was declared has an entry.
    namespaces: HashMap<Vec<String>, Vec<SymbolId>>,
    /// `global using` directives from every file.
    global_usings: Vec<UsingDirective>,
    /// Bound base lists, indexed by symbol.
    bases: Vec<Vec<ResolvedType>>,
}

impl SymbolTable {
    /// Bind every declaration of the compilation.
    #[tracing::instrument(skip_all, fields(files = compilation.files().len(), version = compilation.version()))]
    pub fn build(compilation: &Compilation) -> Self {
        let mut table = Self::default();
        table.namespaces.insert(Vec::new(), Vec::new());

        for file in compilation.files() {
            table
                .global_usings
                .extend(file.unit.usings.iter().filter(|u| u.node.is_global).map(|u| u.node.clone()));
        }

        // Sites arrive in preorder, so a container is always declared before its nested types.
        for site in compilation.declarations() {
            table.declare(&site);
        }

        let bases: Vec<Vec<ResolvedType>> =
            (0..table.symbols.len()).map(|i| table.bind_bases(SymbolId(i))).collect();
        table.bases = bases;

        tracing::debug!(symbols = table.symbols.len(), "symbol table built");
        table
    }

    pub fn symbols(&self) -> &[TypeSymbol] {
        &self.symbols
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&TypeSymbol> {
        self.symbols.get(id.0)
    }

    /// Find a declared type by dotted name, e.g. `Demo.Outer.Inner`.
    pub fn find(&self, qualified_name: &str, arity: usize) -> Option<SymbolId> {
        let parts: Vec<&str> = qualified_name.split('.').collect();
        let (last, path) = parts.split_last()?;
        self.symbols
            .iter()
            .filter(|s| s.arity() == arity && same_name(&s.name, last))
            .find(|s| {
                let full = self.path_of(s.id);
                full.len() == path.len() && full.iter().zip(path.iter()).all(|(a, b)| same_name(a, b))
            })
            .map(|s| s.id)
    }

    /// Namespace segments followed by containing type names.
    fn path_of(&self, id: SymbolId) -> Vec<String> {
        let symbol = &self.symbols[id.0];
        let mut containers = Vec::new();
        let mut current = symbol.container;
        while let Some(outer) = current {
            containers.push(self.symbols[outer.0].name.clone());
            current = self.symbols[outer.0].container;
        }
        containers.reverse();
        let mut path = symbol.namespace.clone();
        path.extend(containers);
        path
    }

    // ========================================================================
    // Phase 1: declare
    // ========================================================================

    fn declare(&mut self, site: &DeclSite<'_>) {
        let container = site.parent.and_then(|p| self.by_decl.get(&p).copied());
        let namespace = site.namespace().to_vec();
        let key = SymbolKey {
            container,
            namespace: namespace.clone(),
            name: plain_name(&site.decl.name).to_string(),
            arity: site.decl.arity(),
        };

        let id = match self.by_key.get(&key) {
            Some(id) => *id,
            None => {
                let id = SymbolId(self.symbols.len());
                self.symbols.push(TypeSymbol {
                    id,
                    name: site.decl.name.clone(),
                    kind: site.decl.kind,
                    type_params: site.decl.type_params.iter().map(|p| p.name.clone()).collect(),
                    namespace: namespace.clone(),
                    container,
                    decls: Vec::new(),
                    nested: Vec::new(),
                });
                match container {
                    Some(outer) => self.symbols[outer.0].nested.push(id),
                    None => {
                        for len in 0..namespace.len() {
                            self.namespaces.entry(namespace[..len].to_vec()).or_default();
                        }
                        self.namespaces.entry(namespace).or_default().push(id);
                    }
                }
                self.by_key.insert(key, id);
                id
            }
        };

        let mut decl = site.decl.clone();
        decl.members.retain(|m| !matches!(m.node, MemberDecl::Type(_)));
        let scopes = site
            .scopes
            .iter()
            .map(|s| Scope {
                namespace: s.namespace.clone(),
                usings: s.usings.iter().map(|u| u.node.clone()).collect(),
            })
            .collect();
        self.symbols[id.0].decls.push(DeclRecord { id: site.id, decl, scopes });
        self.by_decl.insert(site.id, id);
    }

    // ========================================================================
    // Phase 2: bases
    // ========================================================================

    fn bind_bases(&self, id: SymbolId) -> Vec<ResolvedType> {
        let symbol = &self.symbols[id.0];
        let mut bases: Vec<ResolvedType> = Vec::new();
        for record in &symbol.decls {
            // Base lists see the type's own parameters but not its nested types.
            let mut ctx = self.context_for(id, record);
            ctx.types.remove(0);
            for base in &record.decl.bases {
                let bound = self.bind(&base.node, &ctx);
                if !bases.contains(&bound) {
                    bases.push(bound);
                }
            }
        }
        bases
    }

    fn context_for<'t>(&self, id: SymbolId, record: &'t DeclRecord) -> LookupContext<'t> {
        let mut types = Vec::new();
        let mut type_params = Vec::new();
        let mut current = Some(id);
        while let Some(t) = current {
            types.push(t);
            type_params.extend(self.symbols[t.0].type_params.iter().cloned());
            current = self.symbols[t.0].container;
        }
        LookupContext { scopes: &record.scopes, types, type_params }
    }

    // ========================================================================
    // Binding type references
    // ========================================================================

    fn bind(&self, ty: &TypeRef, ctx: &LookupContext<'_>) -> ResolvedType {
        match ty {
            TypeRef::Predefined(id) => ResolvedType::Predefined(*id),
            TypeRef::Named(named) => self.bind_named(named, ctx),
            TypeRef::Array { element, ranks } => ResolvedType::Array {
                element: Box::new(self.bind(element, ctx)),
                ranks: ranks.clone(),
            },
            TypeRef::Nullable(inner) => ResolvedType::Nullable(Box::new(self.bind(inner, ctx))),
            TypeRef::Pointer(inner) => ResolvedType::Pointer(Box::new(self.bind(inner, ctx))),
            TypeRef::Tuple(elements) => ResolvedType::Tuple(
                elements
                    .iter()
                    .map(|e| TupleItem { ty: self.bind(&e.ty, ctx), name: e.name.clone() })
                    .collect(),
            ),
        }
    }

    fn bind_named(&self, named: &NamedTypeRef, ctx: &LookupContext<'_>) -> ResolvedType {
        let mut segments: Vec<(String, Vec<ResolvedType>)> = named
            .segments
            .iter()
            .map(|s| (s.name.clone(), s.args.iter().map(|a| self.bind(a, ctx)).collect()))
            .collect();
        let simple = named.qualifier.is_none() && named.segments.len() == 1 && named.segments[0].args.is_empty();

        let found = match named.qualifier.as_deref() {
            Some("global") => self.lookup_path(&[], &named.segments),
            Some(_) => None,
            None => {
                if simple && ctx.type_params.iter().any(|p| same_name(p, &named.segments[0].name)) {
                    return ResolvedType::TypeParameter(named.segments[0].name.clone());
                }
                self.lookup(&named.segments, ctx)
            }
        };

        if let Some(symbol) = found {
            let args = segments.pop().map(|(_, args)| args).unwrap_or_default();
            return ResolvedType::named(symbol, args);
        }

        if simple {
            if let Some(target) = self.alias_target(&named.segments[0].name, ctx) {
                return target;
            }
        }

        ResolvedType::External(ExternalType { qualifier: named.qualifier.clone(), segments })
    }

    fn lookup(&self, segments: &[TypeSegment], ctx: &LookupContext<'_>) -> Option<SymbolId> {
        let (first, rest) = segments.split_first()?;

        for t in &ctx.types {
            if let Some(id) = self.nested_type(*t, &first.name, first.args.len()) {
                return self.descend(id, rest);
            }
        }

        for (depth, scope) in ctx.scopes.iter().enumerate().rev() {
            if let Some(id) = self.lookup_path(&scope.namespace, segments) {
                return Some(id);
            }
            for namespace in self.imported_namespaces(scope, depth == 0) {
                if let Some(id) = self.type_in_namespace(&namespace, &first.name, first.args.len()) {
                    return self.descend(id, rest);
                }
            }
        }
        None
    }

    /// Bind `segments` starting in namespace `base`, walking into sub-namespaces left to right.
    fn lookup_path(&self, base: &[String], segments: &[TypeSegment]) -> Option<SymbolId> {
        let mut namespace = base.to_vec();
        for (i, segment) in segments.iter().enumerate() {
            if let Some(id) = self.type_in_namespace(&namespace, &segment.name, segment.args.len()) {
                return self.descend(id, &segments[i + 1..]);
            }
            if !segment.args.is_empty() {
                return None;
            }
            namespace.push(plain_name(&segment.name).to_string());
            if !self.namespaces.contains_key(&namespace) {
                return None;
            }
        }
        None
    }

    fn descend(&self, mut id: SymbolId, rest: &[TypeSegment]) -> Option<SymbolId> {
        for segment in rest {
            id = self.nested_type(id, &segment.name, segment.args.len())?;
        }
        Some(id)
    }

    fn type_in_namespace(&self, namespace: &[String], name: &str, arity: usize) -> Option<SymbolId> {
        self.namespaces.get(namespace)?.iter().copied().find(|id| {
            let symbol = &self.symbols[id.0];
            symbol.arity() == arity && same_name(&symbol.name, name)
        })
    }

    fn nested_type(&self, outer: SymbolId, name: &str, arity: usize) -> Option<SymbolId> {
        self.symbols[outer.0].nested.iter().copied().find(|id| {
            let symbol = &self.symbols[id.0];
            symbol.arity() == arity && same_name(&symbol.name, name)
        })
    }

    fn scope_usings<'s>(&'s self, scope: &'s Scope, outermost: bool) -> impl Iterator<Item = &'s UsingDirective> {
        let globals: &[UsingDirective] = if outermost { &self.global_usings } else { &[] };
        scope.usings.iter().filter(|u| !u.is_global).chain(globals.iter())
    }

    fn imported_namespaces(&self, scope: &Scope, outermost: bool) -> Vec<Vec<String>> {
        self.scope_usings(scope, outermost)
            .filter_map(|u| match &u.kind {
                UsingKind::Namespace(name) => Some(name.segments.iter().map(|s| plain_name(s).to_string()).collect()),
                _ => None,
            })
            .collect()
    }

    /// Bind `using Alias = Target;`. Targets are bound as fully-qualified names; one that binds to nothing keeps the
    /// alias name, since the alias directive is copied along with the other usings.
    fn alias_target(&self, name: &str, ctx: &LookupContext<'_>) -> Option<ResolvedType> {
        for (depth, scope) in ctx.scopes.iter().enumerate().rev() {
            for using in self.scope_usings(scope, depth == 0) {
                if let UsingKind::Alias { alias, target } = &using.kind {
                    if same_name(alias, name) {
                        let root = [Scope { namespace: Vec::new(), usings: Vec::new() }];
                        let root_ctx = LookupContext { scopes: &root, types: Vec::new(), type_params: Vec::new() };
                        return match self.bind(target, &root_ctx) {
                            ResolvedType::External(_) => None,
                            bound => Some(bound),
                        };
                    }
                }
            }
        }
        None
    }

    // ========================================================================
    // Queries
    // ========================================================================

    fn substitution(&self, id: SymbolId, args: &[ResolvedType]) -> HashMap<String, ResolvedType> {
        let params = &self.symbols[id.0].type_params;
        if params.len() != args.len() {
            return HashMap::new();
        }
        params.iter().cloned().zip(args.iter().cloned()).collect()
    }

    fn collect_interfaces(
        &self,
        id: SymbolId,
        args: &[ResolvedType],
        out: &mut Vec<ResolvedType>,
        depth: usize,
    ) {
        if depth > MAX_BASE_DEPTH {
            return;
        }
        let subst = self.substitution(id, args);
        for base in &self.bases[id.0] {
            let base = substitute(base, &subst);
            match &base {
                ResolvedType::Named { symbol, args } => {
                    let is_interface = self.symbols[symbol.0].kind == TypeDeclKind::Interface;
                    if is_interface {
                        if out.contains(&base) {
                            continue;
                        }
                        out.push(base.clone());
                    }
                    self.collect_interfaces(*symbol, args, out, depth + 1);
                }
                // An unbound base may still be an interface; the caller sees it as an unresolved type.
                ResolvedType::External(_) => {
                    if !out.contains(&base) {
                        out.push(base);
                    }
                }
                _ => {}
            }
        }
    }

    fn collect_members(
        &self,
        id: SymbolId,
        args: &[ResolvedType],
        out: &mut Vec<MemberDescriptor>,
        seen: &mut HashSet<String>,
        visited: &mut HashSet<ResolvedType>,
        depth: usize,
    ) {
        if depth > MAX_BASE_DEPTH || !visited.insert(ResolvedType::named(id, args.to_vec())) {
            return;
        }
        let subst = self.substitution(id, args);
        let symbol = &self.symbols[id.0];
        for record in &symbol.decls {
            let ctx = self.context_for(id, record);
            for member in &record.decl.members {
                for descriptor in self.describe(&member.node, &ctx, &subst) {
                    let signature = descriptor.signature();
                    if seen.insert(signature.clone()) {
                        out.push(descriptor);
                    } else if !out.iter().any(|m| m.signature() == signature && m.satisfies(&descriptor)) {
                        // Hidden by an incompatible redeclaration: keep it so the conflict stays visible.
                        out.push(descriptor);
                    }
                }
            }
        }

        for base in &self.bases[id.0] {
            if let ResolvedType::Named { symbol, args } = substitute(base, &subst) {
                if self.symbols[symbol.0].kind == TypeDeclKind::Interface {
                    self.collect_members(symbol, &args, out, seen, visited, depth + 1);
                }
            }
        }
    }

    /// Descriptors for one interface member. Private members are implementation details of the interface.
    fn describe(
        &self,
        member: &MemberDecl,
        ctx: &LookupContext<'_>,
        subst: &HashMap<String, ResolvedType>,
    ) -> Vec<MemberDescriptor> {
        let render = |ty: &TypeRef, ctx: &LookupContext<'_>, subst: &HashMap<String, ResolvedType>| {
            self.display(&substitute(&self.bind(ty, ctx), subst))
        };

        match member {
            MemberDecl::Method(method) => {
                if method.modifiers.contains(Modifier::Private) {
                    return Vec::new();
                }
                let type_params: Vec<String> = method.type_params.iter().map(|p| p.name.clone()).collect();
                let mut method_ctx = LookupContext {
                    scopes: ctx.scopes,
                    types: ctx.types.clone(),
                    type_params: ctx.type_params.clone(),
                };
                method_ctx.type_params.extend(type_params.iter().cloned());
                // Method type parameters shadow the interface's.
                let mut method_subst = subst.clone();
                method_subst.retain(|name, _| !type_params.contains(name));

                vec![MemberDescriptor::Method(MethodDescriptor {
                    name: method.name.clone(),
                    constraints: method
                        .constraints
                        .iter()
                        .map(|c| self.render_constraint(c, &method_ctx, &method_subst))
                        .collect(),
                    params: self.describe_params(&method.params, &method_ctx, &method_subst),
                    return_type: render(&method.return_type, &method_ctx, &method_subst),
                    ref_return: method.ref_return,
                    is_static: method.modifiers.is_static(),
                    type_params,
                })]
            }
            MemberDecl::Property(property) if !property.modifiers.contains(Modifier::Private) => {
                vec![MemberDescriptor::Property(PropertyDescriptor {
                    name: property.name.clone(),
                    ty: render(&property.ty, ctx, subst),
                    params: Vec::new(),
                    accessors: property.accessors.clone(),
                    is_static: property.modifiers.is_static(),
                })]
            }
            MemberDecl::Indexer(indexer) if !indexer.modifiers.contains(Modifier::Private) => {
                vec![MemberDescriptor::Property(PropertyDescriptor {
                    name: "this".to_string(),
                    ty: render(&indexer.ty, ctx, subst),
                    params: self.describe_params(&indexer.params, ctx, subst),
                    accessors: indexer.accessors.clone(),
                    is_static: indexer.modifiers.is_static(),
                })]
            }
            MemberDecl::Event(event) if !event.modifiers.contains(Modifier::Private) => {
                let ty = render(&event.ty, ctx, subst);
                event
                    .names
                    .iter()
                    .map(|name| {
                        MemberDescriptor::Event(EventDescriptor {
                            name: name.clone(),
                            ty: ty.clone(),
                            is_static: event.modifiers.is_static(),
                        })
                    })
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    fn describe_params(
        &self,
        params: &[Param],
        ctx: &LookupContext<'_>,
        subst: &HashMap<String, ResolvedType>,
    ) -> Vec<ParamDescriptor> {
        params
            .iter()
            .map(|p| ParamDescriptor {
                scoped: p.scoped,
                modifier: p.modifier,
                ty: self.display(&substitute(&self.bind(&p.ty, ctx), subst)),
                name: p.name.clone(),
                default: p.default.clone(),
            })
            .collect()
    }

    fn render_constraint(
        &self,
        clause: &ConstraintClause,
        ctx: &LookupContext<'_>,
        subst: &HashMap<String, ResolvedType>,
    ) -> String {
        let constraints: Vec<String> = clause
            .constraints
            .iter()
            .map(|c| match c {
                TypeConstraint::Type(ty) => self.display(&substitute(&self.bind(ty, ctx), subst)),
                other => other.to_string(),
            })
            .collect();
        format!("where {} : {}", clause.param, constraints.join(", "))
    }

    fn qualified_name(&self, id: SymbolId, args: &[ResolvedType]) -> String {
        let symbol = &self.symbols[id.0];
        let mut containers = Vec::new();
        let mut current = symbol.container;
        while let Some(outer) = current {
            // Containers carry their own parameters, which are in scope wherever the nested type is named.
            let outer = &self.symbols[outer.0];
            let params: Vec<ResolvedType> =
                outer.type_params.iter().map(|p| ResolvedType::TypeParameter(p.clone())).collect();
            containers.push(format!("{}{}", outer.name, render_args(&params, &|s, a| self.qualified_name(s, a))));
            current = outer.container;
        }
        containers.reverse();
        let mut path = symbol.namespace.clone();
        path.extend(containers);
        path.push(symbol.name.clone());
        format!("{}{}", path.join("."), render_args(args, &|s, a| self.qualified_name(s, a)))
    }

    fn declared_kind(kind: TypeDeclKind) -> TypeKind {
        match kind {
            TypeDeclKind::Class | TypeDeclKind::Record => TypeKind::Class,
            TypeDeclKind::Struct | TypeDeclKind::RecordStruct => TypeKind::Struct,
            TypeDeclKind::Interface => TypeKind::Interface,
            TypeDeclKind::Enum => TypeKind::Enum,
            TypeDeclKind::Delegate => TypeKind::Delegate,
        }
    }
}

impl SemanticModel for SymbolTable {
    fn symbol_for(&self, decl: DeclId) -> Option<SymbolId> {
        self.by_decl.get(&decl).copied()
    }

    fn all_interfaces(&self, symbol: SymbolId) -> Vec<ResolvedType> {
        let mut out = Vec::new();
        if symbol.0 < self.symbols.len() {
            let args: Vec<ResolvedType> = self.symbols[symbol.0]
                .type_params
                .iter()
                .map(|p| ResolvedType::TypeParameter(p.clone()))
                .collect();
            self.collect_interfaces(symbol, &args, &mut out, 0);
        }
        out
    }

    fn identity(&self, symbol: SymbolId) -> Option<TypeIdentity> {
        let symbol = self.symbols.get(symbol.0)?;
        Some(TypeIdentity {
            namespace: symbol.namespace.clone(),
            name: plain_name(&symbol.name).to_string(),
            arity: symbol.arity(),
            nested: symbol.container.is_some(),
        })
    }

    fn type_kind(&self, ty: &ResolvedType) -> TypeKind {
        match ty {
            ResolvedType::Named { symbol, .. } => self
                .symbols
                .get(symbol.0)
                .map(|s| Self::declared_kind(s.kind))
                .unwrap_or(TypeKind::Error),
            ResolvedType::Nullable(inner) => self.type_kind(inner),
            other => other.structural_kind().unwrap_or(TypeKind::Error),
        }
    }

    fn display(&self, ty: &ResolvedType) -> String {
        ty.render(&|symbol, args| self.qualified_name(symbol, args))
    }

    fn interface_members(&self, interface: &ResolvedType) -> Vec<MemberDescriptor> {
        let ResolvedType::Named { symbol, args } = interface else {
            return Vec::new();
        };
        if self.symbols.get(symbol.0).map(|s| s.kind) != Some(TypeDeclKind::Interface) {
            return Vec::new();
        }
        let mut out = Vec::new();
        self.collect_members(*symbol, args, &mut out, &mut HashSet::new(), &mut HashSet::new(), 0);
        out
    }

    fn declared_accessibility(&self, symbol: SymbolId) -> Accessibility {
        let Some(symbol) = self.symbols.get(symbol.0) else {
            return Accessibility::NotApplicable;
        };
        symbol
            .decls
            .iter()
            .find_map(|d| accessibility::from_modifiers(&d.decl.modifiers.access_modifiers()))
            .unwrap_or_else(|| Accessibility::default_for(symbol.container.is_some()))
    }

    fn using_directives(&self, symbol: SymbolId) -> Vec<String> {
        let Some(symbol) = self.symbols.get(symbol.0) else {
            return Vec::new();
        };
        let mut out: Vec<String> = Vec::new();
        for record in &symbol.decls {
            // Global usings already apply to every file, generated ones included.
            for using in record.scopes.iter().flat_map(|s| s.usings.iter()).filter(|u| !u.is_global) {
                let text = using.to_string();
                if !out.contains(&text) {
                    out.push(text);
                }
            }
        }
        out
    }

    fn container_shape(&self, symbol: SymbolId) -> Option<ContainerShape> {
        let target = self.symbols.get(symbol.0)?;
        let mut enclosing = Vec::new();
        let mut current = target.container;
        while let Some(outer) = current {
            let outer = &self.symbols[outer.0];
            enclosing.push(EnclosingType {
                name: outer.name.clone(),
                kind: outer.kind,
                type_params: outer.type_params.clone(),
                is_partial: outer.is_partial(),
            });
            current = outer.container;
        }
        enclosing.reverse();

        Some(ContainerShape {
            name: target.name.clone(),
            kind: target.kind,
            type_params: target.type_params.clone(),
            namespace: target.namespace.clone(),
            enclosing,
            is_partial: target.is_partial(),
            is_static: target.decls.iter().any(|d| d.decl.modifiers.is_static()),
        })
    }
}

/// Replace type parameters by their arguments.
fn substitute(ty: &ResolvedType, subst: &HashMap<String, ResolvedType>) -> ResolvedType {
    if subst.is_empty() {
        return ty.clone();
    }
    let all = |types: &[ResolvedType]| types.iter().map(|t| substitute(t, subst)).collect::<Vec<_>>();
    match ty {
        ResolvedType::TypeParameter(name) => subst.get(name).cloned().unwrap_or_else(|| ty.clone()),
        ResolvedType::Named { symbol, args } => ResolvedType::named(*symbol, all(args)),
        ResolvedType::External(external) => ResolvedType::External(ExternalType {
            qualifier: external.qualifier.clone(),
            segments: external.segments.iter().map(|(name, args)| (name.clone(), all(args))).collect(),
        }),
        ResolvedType::Predefined(_) => ty.clone(),
        ResolvedType::Array { element, ranks } => ResolvedType::Array {
            element: Box::new(substitute(element, subst)),
            ranks: ranks.clone(),
        },
        ResolvedType::Nullable(inner) => ResolvedType::Nullable(Box::new(substitute(inner, subst))),
        ResolvedType::Pointer(inner) => ResolvedType::Pointer(Box::new(substitute(inner, subst))),
        ResolvedType::Tuple(items) => ResolvedType::Tuple(
            items
                .iter()
                .map(|i| TupleItem { ty: substitute(&i.ty, subst), name: i.name.clone() })
                .collect(),
        ),
    }
}

/// Identifier without its verbatim `@` prefix; `@Foo` and `Foo` name the same thing.
fn plain_name(name: &str) -> &str {
    name.strip_prefix('@').unwrap_or(name)
}

fn same_name(a: &str, b: &str) -> bool {
    plain_name(a) == plain_name(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use facade_syntax::ast::{AccessorKind, ParamModifier};

    fn table(sources: &[&str]) -> SymbolTable {
        let mut compilation = Compilation::with_marker();
        for (i, source) in sources.iter().enumerate() {
            compilation.add_source(format!("file{i}.cs"), *source);
        }
        SymbolTable::build(&compilation)
    }

    fn id(table: &SymbolTable, name: &str, arity: usize) -> SymbolId {
        table.find(name, arity).unwrap_or_else(|| panic!("symbol {name} not found"))
    }

    const FACADE: &str = r#"
using System.Collections.Generic;
using FacadeGenerator;

namespace TestFacadeSourceGen
{
    public class Poco { }

    public interface ITest
    {
        void Test();
        string TestTwo(string argument, ICollection<Poco> moreArguments);
    }

    public partial class TestFacade : IFacadeGenerator<ITest>
    {
    }
}
"#;

    #[test]
    fn test_marker_resolves_through_using() {
        let table = table(&[FACADE]);
        let facade = id(&table, "TestFacadeSourceGen.TestFacade", 0);
        let interfaces = table.all_interfaces(facade);
        assert_eq!(interfaces.len(), 1);

        let marker = interfaces[0].symbol().unwrap();
        let identity = table.identity(marker).unwrap();
        assert_eq!(identity.name, "IFacadeGenerator");
        assert_eq!(identity.namespace, vec!["FacadeGenerator".to_string()]);
        assert_eq!(table.display(&interfaces[0]), "FacadeGenerator.IFacadeGenerator<TestFacadeSourceGen.ITest>");

        let target = &interfaces[0].type_args()[0];
        assert_eq!(table.type_kind(target), TypeKind::Interface);
    }

    #[test]
    fn test_interface_members_render_bound_and_external_types() {
        let table = table(&[FACADE]);
        let itest = ResolvedType::named(id(&table, "TestFacadeSourceGen.ITest", 0), vec![]);
        let members = table.interface_members(&itest);
        assert_eq!(members.len(), 2);
        let MemberDescriptor::Method(two) = &members[1] else {
            panic!("expected a method");
        };
        assert_eq!(two.return_type, "string");
        assert_eq!(two.params[1].ty, "ICollection<TestFacadeSourceGen.Poco>");
        assert_eq!(two.params[1].name, "moreArguments");
    }

    #[test]
    fn test_using_directives_of_interface() {
        let table = table(&[FACADE]);
        let itest = id(&table, "TestFacadeSourceGen.ITest", 0);
        assert_eq!(
            table.using_directives(itest),
            vec!["using System.Collections.Generic;".to_string(), "using FacadeGenerator;".to_string()]
        );
    }

    #[test]
    fn test_partial_declarations_merge() {
        let table = table(&[
            "namespace A { public partial class Split : IOne { } public interface IOne { } }",
            "namespace A { partial class Split : ITwo { } interface ITwo { } }",
        ]);
        let split = id(&table, "A.Split", 0);
        assert_eq!(table.symbol(split).map(|s| s.declarations().count()), Some(2));
        assert_eq!(table.all_interfaces(split).len(), 2);
        assert_eq!(table.declared_accessibility(split), Accessibility::Public);
    }

    #[test]
    fn test_interfaces_through_base_class_and_base_interface() {
        let table = table(&[r#"
namespace A
{
    interface IRoot { }
    interface IChild : IRoot { }
    class Base : IChild { }
    class Derived : Base { }
}
"#]);
        let derived = id(&table, "A.Derived", 0);
        let names: Vec<String> = table.all_interfaces(derived).iter().map(|t| table.display(t)).collect();
        assert_eq!(names, vec!["A.IChild".to_string(), "A.IRoot".to_string()]);
    }

    #[test]
    fn test_generic_substitution() {
        let table = table(&[r#"
namespace A
{
    public class Poco { }
    public interface IRepo<T> where T : class
    {
        T Get(int id);
        void Map<T2>(T source, T2 target) where T2 : T;
    }
    public interface IPocoRepo : IRepo<Poco> { }
}
"#]);
        let repo = ResolvedType::named(id(&table, "A.IPocoRepo", 0), vec![]);
        let members = table.interface_members(&repo);
        assert_eq!(members.len(), 2);
        let MemberDescriptor::Method(get) = &members[0] else { panic!() };
        assert_eq!(get.return_type, "A.Poco");
        let MemberDescriptor::Method(map) = &members[1] else { panic!() };
        assert_eq!(map.params[0].ty, "A.Poco");
        assert_eq!(map.params[1].ty, "T2");
        assert_eq!(map.constraints, vec!["where T2 : A.Poco".to_string()]);
    }

    #[test]
    fn test_method_type_parameter_shadows_interface_parameter() {
        let table = table(&["namespace A { interface IBox<T> { T Echo<T>(T value); } class Use : IBox<int> { } }"]);
        let args = table.all_interfaces(id(&table, "A.Use", 0));
        let members = table.interface_members(&args[0]);
        let MemberDescriptor::Method(echo) = &members[0] else { panic!() };
        assert_eq!(echo.return_type, "T");
        assert_eq!(echo.params[0].ty, "T");
    }

    #[test]
    fn test_inherited_members_dedupe_by_signature() {
        let table = table(&[r#"
namespace A
{
    interface IBase { void Run(ref int count); int Size { get; } }
    interface IMid : IBase { new void Run(ref int other); }
    interface ITop : IMid, IBase { event System.EventHandler Changed; }
}
"#]);
        let top = ResolvedType::named(id(&table, "A.ITop", 0), vec![]);
        let members = table.interface_members(&top);
        let names: Vec<&str> = members.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["Changed", "Run", "Size"]);
        let MemberDescriptor::Method(run) = &members[1] else { panic!() };
        assert_eq!(run.params[0].name, "other");
        assert_eq!(run.params[0].modifier, Some(ParamModifier::Ref));
    }

    #[test]
    fn test_incompatible_hidden_member_is_kept() {
        let table = table(&[r#"
namespace A
{
    interface IBase { object Get(); T Echo<T>(T value); }
    interface IApi : IBase { new string Get(); new U Echo<U>(U value); }
}
"#]);
        let api = ResolvedType::named(id(&table, "A.IApi", 0), vec![]);
        let members = table.interface_members(&api);
        let returns: Vec<&str> = members
            .iter()
            .map(|m| match m {
                MemberDescriptor::Method(m) => m.return_type.as_str(),
                _ => panic!("unexpected member {m:?}"),
            })
            .collect();
        assert_eq!(returns, vec!["string", "U", "object"]);
    }

    #[test]
    fn test_properties_and_indexers() {
        let table = table(&["namespace A { interface IBag { string this[int i] { get; } object Value { get; set; } } }"]);
        let bag = ResolvedType::named(id(&table, "A.IBag", 0), vec![]);
        let members = table.interface_members(&bag);
        let MemberDescriptor::Property(indexer) = &members[0] else { panic!() };
        assert!(indexer.is_indexer());
        assert_eq!(indexer.accessors, vec![AccessorKind::Get]);
        let MemberDescriptor::Property(value) = &members[1] else { panic!() };
        assert!(value.has(AccessorKind::Set));
    }

    #[test]
    fn test_accessibility_defaults() {
        let table = table(&["namespace A { class Top { class Inner { } protected internal class Both { } } }"]);
        assert_eq!(table.declared_accessibility(id(&table, "A.Top", 0)), Accessibility::Internal);
        assert_eq!(table.declared_accessibility(id(&table, "A.Top.Inner", 0)), Accessibility::Private);
        assert_eq!(table.declared_accessibility(id(&table, "A.Top.Both", 0)), Accessibility::ProtectedOrInternal);
    }

    #[test]
    fn test_nested_lookup_and_container_shape() {
        let table = table(&[r#"
namespace A.B
{
    public partial class Outer
    {
        public interface IInner { }
        internal partial class Facade : IInner { }
    }
}
"#]);
        let facade = id(&table, "A.B.Outer.Facade", 0);
        let interfaces = table.all_interfaces(facade);
        assert_eq!(table.display(&interfaces[0]), "A.B.Outer.IInner");

        let shape = table.container_shape(facade).unwrap();
        assert_eq!(shape.namespace, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(shape.enclosing.len(), 1);
        assert_eq!(shape.enclosing[0].name, "Outer");
        assert_eq!(shape.enclosing[0].kind, TypeDeclKind::Class);
        assert!(shape.enclosing[0].is_partial);
        assert!(shape.is_partial);
    }

    #[test]
    fn test_generic_enclosing_type_shape() {
        let table = table(&["namespace A { partial class Outer<TKey> { static partial class Facade { } } }"]);
        let shape = table.container_shape(id(&table, "A.Outer.Facade", 0)).unwrap();
        assert_eq!(shape.enclosing[0].type_params, vec!["TKey".to_string()]);
        assert!(shape.is_static);
        assert_eq!(table.declared_accessibility(id(&table, "A.Outer.Facade", 0)), Accessibility::Private);
    }

    #[test]
    fn test_global_qualified_alias_and_unknown_names() {
        let table = table(&[r#"
using Repo = global::Data.IStore;
namespace Data { public interface IStore { } }
namespace App
{
    class One : global::Data.IStore { }
    class Two : Repo { }
    class Three : Data.IStore { }
    class Four : IMissing { }
}
"#]);
        for name in ["App.One", "App.Two", "App.Three"] {
            let interfaces = table.all_interfaces(id(&table, name, 0));
            assert_eq!(table.display(&interfaces[0]), "Data.IStore", "{name}");
        }
        let four = table.all_interfaces(id(&table, "App.Four", 0));
        assert_eq!(table.type_kind(&four[0]), TypeKind::Error);
        assert_eq!(table.display(&four[0]), "IMissing");
    }

    #[test]
    fn test_base_cycles_terminate() {
        let table = table(&["namespace A { interface I1 : I2 { void M(); } interface I2 : I1 { } class C : C { } }"]);
        assert!(table.all_interfaces(id(&table, "A.C", 0)).is_empty());
        let i1 = ResolvedType::named(id(&table, "A.I1", 0), vec![]);
        assert_eq!(table.interface_members(&i1).len(), 1);
        assert_eq!(table.all_interfaces(id(&table, "A.I1", 0)).len(), 2);
    }

    #[test]
    fn test_private_and_static_interface_members() {
        let table = table(&["namespace A { interface I { private void Hidden() { } static int Count() => 0; void Run(); } }"]);
        let i = ResolvedType::named(id(&table, "A.I", 0), vec![]);
        let members = table.interface_members(&i);
        assert_eq!(members.len(), 2);
        assert!(members[0].is_static());
        assert!(!members[1].is_static());
    }
}
