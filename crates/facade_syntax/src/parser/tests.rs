#[cfg(test)]
/// Parser unit tests.
///
/// These tests cover the declaration forms the generator relies on and the parser's recovery behavior (one bad
/// member must not hide its neighbours).
mod tests {
    use super::*;
    use crate::lexer;

    fn parse_str(source: &str) -> Result<CompilationUnit, Vec<SyntaxError>> {
        let tokens = lexer::lex(source).map_err(|_| vec![])?;
        parse(&tokens)
    }

    fn only_namespace(unit: &CompilationUnit) -> &NamespaceDecl {
        assert_eq!(unit.members.len(), 1);
        match &unit.members[0].node {
            NamespaceMember::Namespace(ns) => ns,
            other => panic!("expected namespace, got {other:?}"),
        }
    }

    fn only_type(members: &[Spanned<NamespaceMember>]) -> &TypeDecl {
        assert_eq!(members.len(), 1);
        match &members[0].node {
            NamespaceMember::Type(decl) => decl,
            other => panic!("expected type, got {other:?}"),
        }
    }

    fn methods(decl: &TypeDecl) -> Vec<&MethodDecl> {
        decl.members
            .iter()
            .filter_map(|m| match &m.node {
                MemberDecl::Method(method) => Some(method),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_parse_facade_and_interface() {
        let source = r#"
using System.Collections.Generic;
using FacadeGenerator;

namespace TestFacadeSourceGen
{
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
        let unit = parse_str(source).unwrap();
        assert_eq!(unit.usings.len(), 2);
        assert_eq!(unit.usings[0].node.to_string(), "using System.Collections.Generic;");

        let ns = only_namespace(&unit);
        assert_eq!(ns.name.to_string(), "TestFacadeSourceGen");
        assert!(!ns.file_scoped);
        assert_eq!(ns.members.len(), 2);

        let NamespaceMember::Type(iface) = &ns.members[0].node else {
            panic!("expected interface");
        };
        assert_eq!(iface.kind, TypeDeclKind::Interface);
        let iface_methods = methods(iface);
        assert_eq!(iface_methods.len(), 2);
        assert!(iface_methods[0].return_type.is_void());
        assert!(!iface_methods[0].has_body);
        assert_eq!(iface_methods[1].params.len(), 2);
        assert_eq!(iface_methods[1].params[1].ty.to_string(), "ICollection<Poco>");

        let NamespaceMember::Type(facade) = &ns.members[1].node else {
            panic!("expected class");
        };
        assert!(facade.modifiers.is_partial());
        assert_eq!(facade.bases.len(), 1);
        assert_eq!(facade.bases[0].node.to_string(), "IFacadeGenerator<ITest>");
    }

    #[test]
    fn test_file_scoped_namespace() {
        let source = "namespace Demo.Inner;\n\nusing System;\n\npublic interface IThing { int Count { get; } }\n";
        let unit = parse_str(source).unwrap();
        let ns = only_namespace(&unit);
        assert!(ns.file_scoped);
        assert_eq!(ns.name.segments, vec!["Demo", "Inner"]);
        assert_eq!(ns.usings.len(), 1);
        let decl = only_type(&ns.members);
        assert_eq!(decl.name, "IThing");
    }

    #[test]
    fn test_global_and_alias_usings() {
        let source = "global using System.Linq;\nusing static System.Math;\nusing Map = System.Collections.Generic.Dictionary<string, int>;\n";
        let unit = parse_str(source).unwrap();
        assert_eq!(unit.usings.len(), 3);
        assert!(unit.usings[0].node.is_global);
        assert!(matches!(unit.usings[1].node.kind, UsingKind::Static(_)));
        match &unit.usings[2].node.kind {
            UsingKind::Alias { alias, target } => {
                assert_eq!(alias, "Map");
                assert_eq!(target.to_string(), "System.Collections.Generic.Dictionary<string, int>");
            }
            other => panic!("expected alias, got {other:?}"),
        }
    }

    #[test]
    fn test_top_level_statements_are_skipped() {
        let source = r#"
using System;
using var stream = Open();
Console.WriteLine("hi");
if (true) { Run(); }
public interface IThing { void Run(); }
"#;
        let unit = parse_str(source).unwrap();
        assert_eq!(unit.usings.len(), 1);
        let decl = only_type(&unit.members);
        assert_eq!(decl.name, "IThing");
    }

    #[test]
    fn test_generic_method_with_constraints_and_ref_kinds() {
        let source = r#"
interface IStore
{
    ref readonly T Find<T>(in int key, out bool found, ref T fallback, params T[] extra) where T : class?, new();
    Task<(int Count, string Name)> Summarize(CancellationToken token = default);
}
"#;
        let unit = parse_str(source).unwrap();
        let decl = only_type(&unit.members);
        let methods = methods(decl);
        assert_eq!(methods.len(), 2);

        let find = methods[0];
        assert_eq!(find.ref_return, Some(RefReturn::RefReadonly));
        assert_eq!(find.type_params.len(), 1);
        let modifiers: Vec<_> = find.params.iter().map(|p| p.modifier).collect();
        assert_eq!(
            modifiers,
            vec![
                Some(ParamModifier::In),
                Some(ParamModifier::Out),
                Some(ParamModifier::Ref),
                Some(ParamModifier::Params)
            ]
        );
        assert_eq!(find.params[3].ty.to_string(), "T[]");
        assert_eq!(find.constraints.len(), 1);
        assert_eq!(
            find.constraints[0].constraints,
            vec![TypeConstraint::Class { nullable: true }, TypeConstraint::New]
        );

        let summarize = methods[1];
        assert_eq!(summarize.return_type.to_string(), "Task<(int Count, string Name)>");
        assert_eq!(summarize.params[0].default.as_deref(), Some("default"));
    }

    #[test]
    fn test_properties_indexers_and_events() {
        let source = r#"
public interface IBag
{
    int Count { get; }
    string Name { get; set; }
    string Id { get; init; }
    int this[int index] { get; set; }
    event EventHandler Changed;
    bool IsEmpty => Count == 0;
}
"#;
        let unit = parse_str(source).unwrap();
        let decl = only_type(&unit.members);
        let kinds: Vec<&str> = decl
            .members
            .iter()
            .map(|m| match &m.node {
                MemberDecl::Property(_) => "property",
                MemberDecl::Indexer(_) => "indexer",
                MemberDecl::Event(_) => "event",
                MemberDecl::Method(_) => "method",
                MemberDecl::Type(_) => "type",
            })
            .collect();
        assert_eq!(kinds, vec!["property", "property", "property", "indexer", "event", "property"]);

        let MemberDecl::Property(id) = &decl.members[2].node else {
            panic!("expected property");
        };
        assert_eq!(id.accessors, vec![AccessorKind::Get, AccessorKind::Init]);

        let MemberDecl::Indexer(indexer) = &decl.members[3].node else {
            panic!("expected indexer");
        };
        assert_eq!(indexer.params[0].name, "index");
    }

    #[test]
    fn test_class_members_that_are_not_forwarded() {
        let source = r#"
public sealed partial class Service : Base(42), IService
{
    private const int Limit = 10;
    private readonly List<int> _items = new() { 1, 2 };
    public Service(int x) : base(x) { }
    ~Service() { }
    public static Service operator +(Service a, Service b) => a;
    public static implicit operator int(Service s) => 0;
    void IService.Hidden() { }
    public int Value { get; set; } = 5;
    public void Run() { if (true) { } }
}
"#;
        let unit = parse_str(source).unwrap();
        let decl = only_type(&unit.members);
        assert_eq!(decl.bases.len(), 2);
        assert_eq!(decl.members.len(), 2);
        assert!(matches!(decl.members[0].node, MemberDecl::Property(_)));
        let methods = methods(decl);
        assert_eq!(methods[0].name, "Run");
        assert!(methods[0].has_body);
    }

    #[test]
    fn test_nested_types_and_records() {
        let source = r#"
namespace Outer
{
    public static partial class Holder
    {
        public partial class Inner : IFacadeGenerator<IThing> { }
        public record Point(int X, int Y);
        public readonly record struct Pair<T>(T Left, T Right) where T : notnull;
        private enum Mode : byte { A = 1, B }
        public delegate void Callback(int value);
    }
}
"#;
        let unit = parse_str(source).unwrap();
        let ns = only_namespace(&unit);
        let holder = only_type(&ns.members);
        assert!(holder.modifiers.is_static());
        let kinds: Vec<TypeDeclKind> = holder
            .members
            .iter()
            .filter_map(|m| match &m.node {
                MemberDecl::Type(t) => Some(t.kind),
                _ => None,
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                TypeDeclKind::Class,
                TypeDeclKind::Record,
                TypeDeclKind::RecordStruct,
                TypeDeclKind::Enum,
                TypeDeclKind::Delegate
            ]
        );
    }

    #[test]
    fn test_generic_interface_with_variance() {
        let unit = parse_str("interface IMap<in TKey, out TValue> : IEnumerable<TValue> where TKey : notnull { }").unwrap();
        let decl = only_type(&unit.members);
        assert_eq!(decl.arity(), 2);
        assert_eq!(decl.type_params[0].variance, Some(Variance::In));
        assert_eq!(decl.type_params[1].variance, Some(Variance::Out));
        assert_eq!(decl.constraints[0].constraints, vec![TypeConstraint::NotNull]);
    }

    #[test]
    fn test_attributes_are_ignored() {
        let source = r#"
[assembly: InternalsVisibleTo("Tests")]
namespace Demo
{
    [Obsolete("old")]
    public interface IThing
    {
        [return: NotNull]
        string Name([CallerMemberName] string caller = "");
    }
}
"#;
        let unit = parse_str(source).unwrap();
        let ns = only_namespace(&unit);
        let decl = only_type(&ns.members);
        let methods = methods(decl);
        assert_eq!(methods[0].params[0].default.as_deref(), Some("\"\""));
    }

    #[test]
    fn test_array_nullable_and_qualified_types() {
        let unit = parse_str("interface I { global::System.String?[][,] Grid(int*[] raw); }").unwrap();
        let decl = only_type(&unit.members);
        let method = methods(decl)[0];
        assert_eq!(method.return_type.to_string(), "global::System.String?[][,]");
        assert_eq!(method.params[0].ty.to_string(), "int*[]");
    }

    #[test]
    fn test_recovery_keeps_following_members() {
        let source = r#"
interface IBroken
{
    void Good();
    void Bad(int);
    int Also { get; }
}
"#;
        let tokens = lexer::lex(source).unwrap();
        let (unit, errors) = parse_with_recovery(&tokens);
        assert_eq!(errors.len(), 1, "one bad member should produce one error: {errors:?}");
        let decl = only_type(&unit.members);
        assert_eq!(decl.members.len(), 2);
    }

    #[test]
    fn test_unclosed_namespace_keeps_members() {
        let tokens = lexer::lex("namespace Demo { interface I { }").unwrap();
        let (unit, errors) = parse_with_recovery(&tokens);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("close namespace"));
        let ns = only_namespace(&unit);
        assert_eq!(ns.members.len(), 1);
    }

    #[test]
    fn test_parse_source_reports_lexical_errors_first() {
        let (unit, errors) = parse_source("interface I { void Run(); } `");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, crate::diagnostics::ErrorKind::Lexical);
        assert_eq!(unit.members.len(), 1);
    }

    #[test]
    fn test_empty_token_stream() {
        let unit = parse(&[]).unwrap();
        assert!(unit.members.is_empty());
    }
}
