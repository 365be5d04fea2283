//! Source emission for a resolved facade.
//!
//! The generated part re-opens the container (and every enclosing type) and adds:
//! - the interface to the base list
//! - a `private partial` accessor declaration the user implements
//! - one public forwarding member per interface member
//!
//! Output depends only on the descriptors and the config, so it is byte-identical across runs.

use facade_core::lang::accessibility;
use facade_core::lang::marker;
use facade_syntax::ast::{AccessorKind, ParamModifier, RefReturn};

use crate::generator::config::GeneratorConfig;
use crate::generator::model::{
    ContainerShape, EventDescriptor, MemberDescriptor, MethodDescriptor, ParamDescriptor, PropertyDescriptor,
    SemanticModel,
};
use crate::generator::outcome::{GeneratedUnit, Skip, SkipReason};
use crate::generator::resolver::TargetInterfaceDescriptor;
use crate::generator::scanner::CandidateDeclaration;
use crate::generator::writer::CSharpWriter;

/// Produce the generated unit for a candidate whose target has been resolved.
pub fn emit<M: SemanticModel + ?Sized>(
    model: &M,
    candidate: &CandidateDeclaration,
    target: &TargetInterfaceDescriptor,
    config: &GeneratorConfig,
) -> Result<GeneratedUnit, Skip> {
    let symbol = model.symbol_for(candidate.id).ok_or(SkipReason::SymbolUnavailable)?;
    let shape = model.container_shape(symbol).ok_or(SkipReason::SymbolUnavailable)?;

    if shape.namespace.is_empty() {
        return Err(SkipReason::GlobalNamespace.into());
    }
    let level = model.declared_accessibility(symbol);
    let access = accessibility::emission_keyword(level).ok_or(SkipReason::UnsupportedAccessibility(level))?;
    check_shape(&shape)?;

    let members = forwarded_members(&target.members)?;

    let usings = model.using_directives(target.symbol);
    let text = Emission { config, target, shape: &shape, access }.render(&usings, &members);
    Ok(GeneratedUnit::new(marker::hint_name(&shape.name), text))
}

/// Instance members to forward, one per interface slot.
///
/// A slot whose hidden base member needs a different signature than the visible one cannot be implemented by a
/// single public forwarder, and neither can an `init` accessor.
fn forwarded_members(members: &[MemberDescriptor]) -> Result<Vec<&MemberDescriptor>, Skip> {
    let mut out: Vec<&MemberDescriptor> = Vec::new();
    for member in members.iter().filter(|m| !m.is_static()) {
        if let MemberDescriptor::Property(p) = member {
            if p.has(AccessorKind::Init) {
                return Err(SkipReason::UnforwardableMember(p.name.clone()).into());
            }
        }
        let signature = member.signature();
        match out.iter().find(|m| m.signature() == signature) {
            Some(visible) if visible.satisfies(member) => {}
            Some(_) => return Err(SkipReason::UnforwardableMember(member.name().to_string()).into()),
            None => out.push(member),
        }
    }
    Ok(out)
}

fn check_shape(shape: &ContainerShape) -> Result<(), Skip> {
    if !shape.is_partial {
        return Err(SkipReason::NotPartial.into());
    }
    if let Some(outer) = shape.enclosing.iter().find(|t| !t.is_partial) {
        return Err(SkipReason::EnclosingNotPartial(outer.name.clone()).into());
    }
    if shape.is_static {
        return Err(SkipReason::StaticContainer.into());
    }
    Ok(())
}

struct Emission<'a> {
    config: &'a GeneratorConfig,
    target: &'a TargetInterfaceDescriptor,
    shape: &'a ContainerShape,
    access: &'static str,
}

impl Emission<'_> {
    fn render(&self, usings: &[String], members: &[&MemberDescriptor]) -> String {
        let mut w = CSharpWriter::new(self.config.indent_width);

        if self.config.emit_header {
            w.line(marker::AUTO_GENERATED_HEADER);
        }
        if self.config.nullable_directive {
            w.line("#nullable enable");
        }
        if self.config.emit_header || self.config.nullable_directive {
            w.blank_line();
        }
        for using in usings {
            w.line(using);
        }
        if !usings.is_empty() {
            w.blank_line();
        }

        w.block(&format!("namespace {}", self.shape.namespace.join(".")), |w| {
            self.enclosing(w, 0, members);
        });
        w.finish()
    }

    fn enclosing(&self, w: &mut CSharpWriter, depth: usize, members: &[&MemberDescriptor]) {
        match self.shape.enclosing.get(depth) {
            Some(outer) => {
                let header =
                    format!("partial {} {}{}", outer.kind.keyword(), outer.name, type_params(&outer.type_params));
                w.block(&header, |w| self.enclosing(w, depth + 1, members));
            }
            None => self.container(w, members),
        }
    }

    fn container(&self, w: &mut CSharpWriter, members: &[&MemberDescriptor]) {
        let header = format!(
            "{} partial {} {}{} : {}",
            self.access,
            self.shape.kind.keyword(),
            self.shape.name,
            type_params(&self.shape.type_params),
            self.target.display
        );
        w.block(&header, |w| {
            w.line(&format!("private partial {} {}();", self.target.display, self.config.accessor_name));
            for member in members {
                w.blank_line();
                match member {
                    MemberDescriptor::Method(method) => self.method(w, method),
                    MemberDescriptor::Property(property) if property.is_indexer() => self.indexer(w, property),
                    MemberDescriptor::Property(property) => self.property(w, property),
                    MemberDescriptor::Event(event) => self.event(w, event),
                }
            }
        });
    }

    fn method(&self, w: &mut CSharpWriter, method: &MethodDescriptor) {
        let ref_kind = match method.ref_return {
            Some(RefReturn::Ref) => "ref ",
            Some(RefReturn::RefReadonly) => "ref readonly ",
            None => "",
        };
        let generics = type_params(&method.type_params);
        w.line(&format!(
            "public {ref_kind}{} {}{generics}({})",
            method.return_type,
            method.name,
            parameters(&method.params)
        ));
        w.indent();
        for clause in &method.constraints {
            w.line(clause);
        }
        w.dedent();

        let call = format!("{}().{}{generics}({})", self.config.accessor_name, method.name, arguments(&method.params));
        let body = if method.ref_return.is_some() {
            format!("return ref {call};")
        } else if method.returns_void() {
            format!("{call};")
        } else {
            format!("return {call};")
        };
        w.braced(|w| w.line(&body));
    }

    fn property(&self, w: &mut CSharpWriter, property: &PropertyDescriptor) {
        let target = format!("{}().{}", self.config.accessor_name, property.name);
        w.line(&format!("public {} {}", property.ty, property.name));
        self.accessors(w, property, &target);
    }

    fn indexer(&self, w: &mut CSharpWriter, indexer: &PropertyDescriptor) {
        let target = format!("{}()[{}]", self.config.accessor_name, arguments(&indexer.params));
        w.line(&format!("public {} this[{}]", indexer.ty, parameters(&indexer.params)));
        self.accessors(w, indexer, &target);
    }

    fn accessors(&self, w: &mut CSharpWriter, property: &PropertyDescriptor, target: &str) {
        w.braced(|w| {
            if property.has(AccessorKind::Get) {
                w.line(&format!("get => {target};"));
            }
            if property.has(AccessorKind::Set) {
                w.line(&format!("set => {target} = value;"));
            }
        });
    }

    fn event(&self, w: &mut CSharpWriter, event: &EventDescriptor) {
        let target = format!("{}().{}", self.config.accessor_name, event.name);
        w.line(&format!("public event {} {}", event.ty, event.name));
        w.braced(|w| {
            w.line(&format!("add => {target} += value;"));
            w.line(&format!("remove => {target} -= value;"));
        });
    }
}

fn type_params(params: &[String]) -> String {
    if params.is_empty() {
        String::new()
    } else {
        format!("<{}>", params.join(", "))
    }
}

fn parameters(params: &[ParamDescriptor]) -> String {
    params
        .iter()
        .map(|p| {
            let mut out = String::new();
            if p.scoped {
                out.push_str("scoped ");
            }
            if let Some(modifier) = p.modifier {
                out.push_str(modifier.keyword());
                out.push(' ');
            }
            out.push_str(&p.ty);
            out.push(' ');
            out.push_str(&p.name);
            if let Some(default) = &p.default {
                out.push_str(" = ");
                out.push_str(default);
            }
            out
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Forwarding arguments: every parameter by name, in order, with its ref kind.
fn arguments(params: &[ParamDescriptor]) -> String {
    params
        .iter()
        .map(|p| match p.modifier {
            Some(ParamModifier::Ref) => format!("ref {}", p.name),
            Some(ParamModifier::Out) => format!("out {}", p.name),
            Some(ParamModifier::In | ParamModifier::RefReadonly) => format!("in {}", p.name),
            Some(ParamModifier::Params | ParamModifier::This) | None => p.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::compilation::Compilation;
    use crate::frontend::symbols::SymbolTable;
    use crate::generator::{resolver, scanner};

    fn emit_named(source: &str, name: &str, config: &GeneratorConfig) -> Result<GeneratedUnit, Skip> {
        let mut compilation = Compilation::with_marker();
        compilation.add_source("test.cs", source);
        let table = SymbolTable::build(&compilation);
        let candidate = scanner::candidates(&compilation)
            .into_iter()
            .find(|c| c.name == name)
            .unwrap_or_else(|| panic!("no candidate {name}"));
        let target = resolver::resolve(&table, &candidate)?;
        emit(&table, &candidate, &target, config)
    }

    fn bare() -> GeneratorConfig {
        GeneratorConfig::new().with_header(false).with_nullable_directive(false)
    }

    #[test]
    fn test_minimal_facade() {
        let unit = emit_named(
            "namespace A { public interface IApi { } public partial class Api : FacadeGenerator.IFacadeGenerator<IApi> { } }",
            "Api",
            &bare(),
        )
        .unwrap();
        assert_eq!(unit.hint_name(), "Api.generated");
        assert_eq!(
            unit.text(),
            "namespace A\n{\n    public partial class Api : A.IApi\n    {\n        private partial A.IApi GetImplementation();\n    }\n}\n"
        );
    }

    #[test]
    fn test_header_and_accessor_name() {
        let config = GeneratorConfig::new().with_accessor_name("Target").with_indent_width(2);
        let unit = emit_named(
            "namespace A { interface IApi { int Count { get; } } partial struct Api : FacadeGenerator.IFacadeGenerator<IApi> { } }",
            "Api",
            &config,
        )
        .unwrap();
        let expected = "\
// <auto-generated/>
#nullable enable

namespace A
{
  internal partial struct Api : A.IApi
  {
    private partial A.IApi Target();

    public int Count
    {
      get => Target().Count;
    }
  }
}
";
        assert_eq!(unit.text(), expected);
    }

    #[test]
    fn test_ref_kinds_generics_and_defaults() {
        let unit = emit_named(
            r#"
namespace A
{
    interface IApi
    {
        ref readonly T Find<T>(in T key, out int index, ref int hint, params T[] rest) where T : struct;
        void Log(string message = "none", int level = 1);
    }
    partial class Api : FacadeGenerator.IFacadeGenerator<IApi> { }
}
"#,
            "Api",
            &bare(),
        )
        .unwrap();
        let text = unit.text();
        assert!(text.contains("        public ref readonly T Find<T>(in T key, out int index, ref int hint, params T[] rest)\n            where T : struct\n        {\n            return ref GetImplementation().Find<T>(in key, out index, ref hint, rest);\n        }\n"), "{text}");
        assert!(text.contains("        public void Log(string message = \"none\", int level = 1)\n        {\n            GetImplementation().Log(message, level);\n        }\n"), "{text}");
    }

    #[test]
    fn test_indexer_and_event() {
        let unit = emit_named(
            "namespace A { interface IApi { string this[int row, int col] { get; set; } event System.EventHandler Changed; } partial class Api : FacadeGenerator.IFacadeGenerator<IApi> { } }",
            "Api",
            &bare(),
        )
        .unwrap();
        let text = unit.text();
        assert!(text.contains("public string this[int row, int col]\n        {\n            get => GetImplementation()[row, col];\n            set => GetImplementation()[row, col] = value;\n        }"), "{text}");
        assert!(text.contains("public event System.EventHandler Changed\n        {\n            add => GetImplementation().Changed += value;\n            remove => GetImplementation().Changed -= value;\n        }"), "{text}");
    }

    #[test]
    fn test_nested_container() {
        let unit = emit_named(
            "namespace A { public static partial class Outer<TKey> { interface IApi { } private partial class Api : FacadeGenerator.IFacadeGenerator<IApi> { } } }",
            "Api",
            &bare(),
        )
        .unwrap();
        assert_eq!(
            unit.text(),
            "namespace A\n{\n    partial class Outer<TKey>\n    {\n        private partial class Api : A.Outer<TKey>.IApi\n        {\n            private partial A.Outer<TKey>.IApi GetImplementation();\n        }\n    }\n}\n"
        );
    }

    #[test]
    fn test_shape_skips() {
        let cases = [
            ("public partial class Api : FacadeGenerator.IFacadeGenerator<A.IApi> { } namespace A { public interface IApi { } }", SkipReason::GlobalNamespace),
            ("namespace A { interface IApi { } class Api : FacadeGenerator.IFacadeGenerator<IApi> { } }", SkipReason::NotPartial),
            ("namespace A { class Outer { interface IApi { } partial class Api : FacadeGenerator.IFacadeGenerator<IApi> { } } }", SkipReason::EnclosingNotPartial("Outer".to_string())),
            ("namespace A { interface IApi { } static partial class Api : FacadeGenerator.IFacadeGenerator<IApi> { } }", SkipReason::StaticContainer),
            ("namespace A { interface IApi { int Id { get; init; } } partial class Api : FacadeGenerator.IFacadeGenerator<IApi> { } }", SkipReason::UnforwardableMember("Id".to_string())),
            ("namespace A { interface IBase { object Get(); } interface IApi : IBase { new string Get(); } partial class Api : FacadeGenerator.IFacadeGenerator<IApi> { } }", SkipReason::UnforwardableMember("Get".to_string())),
            ("namespace A { interface IBase { int Size { get; set; } } interface IApi : IBase { new int Size { get; } } partial class Api : FacadeGenerator.IFacadeGenerator<IApi> { } }", SkipReason::UnforwardableMember("Size".to_string())),
        ];
        for (source, reason) in cases {
            let skip = emit_named(source, "Api", &bare()).unwrap_err();
            assert_eq!(skip.reason, reason, "{source}");
        }
    }

    #[test]
    fn test_accessibility_table() {
        let cases = [
            ("public", Some("public")),
            ("internal", Some("internal")),
            ("protected", Some("protected")),
            ("private", Some("private")),
            ("private protected", Some("private protected")),
            ("protected internal", None),
        ];
        for (modifier, keyword) in cases {
            let source = format!(
                "namespace A {{ partial class Outer {{ interface IApi {{ }} {modifier} partial class Api : FacadeGenerator.IFacadeGenerator<IApi> {{ }} }} }}"
            );
            let result = emit_named(&source, "Api", &bare());
            match keyword {
                Some(keyword) => {
                    let text = result.unwrap().text().to_string();
                    assert!(text.contains(&format!("        {keyword} partial class Api : A.Outer.IApi")), "{text}");
                }
                None => assert!(matches!(
                    result.unwrap_err().reason,
                    SkipReason::UnsupportedAccessibility(_)
                )),
            }
        }
    }

    #[test]
    fn test_static_members_are_not_forwarded() {
        let unit = emit_named(
            "namespace A { interface IApi { static abstract IApi Create(); void Run(); } partial class Api : FacadeGenerator.IFacadeGenerator<IApi> { } }",
            "Api",
            &bare(),
        )
        .unwrap();
        assert!(!unit.text().contains("Create"));
        assert!(unit.text().contains("public void Run()"));
    }

    #[test]
    fn test_compatible_hiding_forwards_once() {
        let unit = emit_named(
            "namespace A { interface IBase { T Echo<T>(T value); int Size { get; } } interface IApi : IBase { new U Echo<U>(U other); new int Size { get; set; } } partial class Api : FacadeGenerator.IFacadeGenerator<IApi> { } }",
            "Api",
            &bare(),
        )
        .unwrap();
        let text = unit.text();
        assert_eq!(text.matches("Echo<").count(), 2, "{text}");
        assert!(text.contains("public U Echo<U>(U other)"), "{text}");
        assert_eq!(text.matches("public int Size").count(), 1, "{text}");
    }
}
