//! Per-candidate outcomes and the pass report.

use std::fmt;

use facade_core::lang::accessibility::Accessibility;
use miette::Diagnostic;
use thiserror::Error;

use crate::frontend::compilation::DeclId;
use crate::generator::model::TypeKind;

/// One generated source: hint name plus text. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    hint_name: String,
    text: String,
}

impl GeneratedUnit {
    pub fn new(hint_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self { hint_name: hint_name.into(), text: text.into() }
    }

    pub fn hint_name(&self) -> &str {
        &self.hint_name
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Why a candidate produced no unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    // Resolution misses
    SymbolUnavailable,
    NoMarker,
    TargetNotInterface(TypeKind),
    // Unsupported shapes
    GlobalNamespace,
    UnsupportedAccessibility(Accessibility),
    NotPartial,
    EnclosingNotPartial(String),
    StaticContainer,
    UnforwardableMember(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::SymbolUnavailable => write!(f, "declaration has no symbol"),
            SkipReason::NoMarker => write!(f, "does not implement the facade marker"),
            SkipReason::TargetNotInterface(kind) => write!(f, "marker type argument is a {kind}, not an interface"),
            SkipReason::GlobalNamespace => write!(f, "declared in the global namespace"),
            SkipReason::UnsupportedAccessibility(level) => write!(f, "`{level}` accessibility is not supported"),
            SkipReason::NotPartial => write!(f, "declaration is not partial"),
            SkipReason::EnclosingNotPartial(name) => write!(f, "enclosing type `{name}` is not partial"),
            SkipReason::StaticContainer => write!(f, "static types cannot implement interfaces"),
            SkipReason::UnforwardableMember(name) => write!(f, "member `{name}` has an init accessor"),
        }
    }
}

/// The "no generation" outcome. A value, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skip {
    pub reason: SkipReason,
}

impl Skip {
    pub fn new(reason: SkipReason) -> Self {
        Self { reason }
    }
}

impl From<SkipReason> for Skip {
    fn from(reason: SkipReason) -> Self {
        Self::new(reason)
    }
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

/// Outcome of one candidate.
pub type Outcome = Result<GeneratedUnit, Skip>;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum GenerateError {
    #[error("generation cancelled")]
    #[diagnostic(code(facadegen::cancelled), help("no sources were registered for this pass"))]
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCandidate {
    pub decl: DeclId,
    pub name: String,
    pub reason: SkipReason,
}

/// What one pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Hint names registered, in candidate order.
    pub generated: Vec<String>,
    /// Skipped candidates; filled only when skip reporting is enabled.
    pub skipped: Vec<SkippedCandidate>,
    pub cache_hits: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_messages() {
        let skip = Skip::from(SkipReason::UnsupportedAccessibility(Accessibility::ProtectedOrInternal));
        assert_eq!(skip.to_string(), "`protected internal` accessibility is not supported");
        assert_eq!(
            SkipReason::TargetNotInterface(TypeKind::Class).to_string(),
            "marker type argument is a class, not an interface"
        );
    }

    #[test]
    fn test_cancelled_diagnostic_code() {
        let err = GenerateError::Cancelled;
        assert_eq!(err.to_string(), "generation cancelled");
        assert_eq!(err.code().map(|c| c.to_string()).as_deref(), Some("facadegen::cancelled"));
    }
}
