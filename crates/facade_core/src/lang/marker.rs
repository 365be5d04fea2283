//! Marker capability identity.
//!
//! Consumers opt a partial type into generation by realizing `FacadeGenerator.IFacadeGenerator<TInterface>`. The
//! generator registers the declaration below once per compilation and matches implemented interfaces against its
//! *unparameterized* identity (namespace + name + arity).
//!
//! ## Notes
//! - Changing any of these constants is a breaking change for every consumer project.

/// Namespace that declares the marker.
pub const MARKER_NAMESPACE: &str = "FacadeGenerator";

/// Simple name of the marker interface.
pub const MARKER_NAME: &str = "IFacadeGenerator";

/// Number of type parameters the marker takes.
pub const MARKER_ARITY: usize = 1;

/// Suffix appended to a container name to form its output key.
pub const GENERATED_SUFFIX: &str = ".generated";

/// Output key of the marker declaration itself.
pub const MARKER_HINT_NAME: &str = "IFacadeGenerator.generated";

/// Name of the accessor the generated code calls unless configured otherwise.
pub const DEFAULT_ACCESSOR_NAME: &str = "GetImplementation";

/// First line of every generated unit.
pub const AUTO_GENERATED_HEADER: &str = "// <auto-generated/>";

/// Source text of the marker declaration.
pub const MARKER_SOURCE: &str = "// <auto-generated/>
#nullable enable

namespace FacadeGenerator
{
    internal interface IFacadeGenerator<T> where T : class
    {
    }
}
";

/// Output key for a generated container.
///
/// ## Examples
/// ```rust
/// assert_eq!(facade_core::lang::marker::hint_name("TestFacade"), "TestFacade.generated");
/// ```
pub fn hint_name(container_name: &str) -> String {
    format!("{container_name}{GENERATED_SUFFIX}")
}

/// Return `true` if a type identity (namespace path, simple name, arity) is the marker.
pub fn is_marker_identity(namespace: &[String], name: &str, arity: usize) -> bool {
    name == MARKER_NAME
        && arity == MARKER_ARITY
        && namespace.len() == 1
        && namespace[0] == MARKER_NAMESPACE
}

/// Display form of the unparameterized marker, e.g. for diagnostics.
pub fn marker_display() -> String {
    format!("{MARKER_NAMESPACE}.{MARKER_NAME}<T>")
}
