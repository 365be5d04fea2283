//! Contextual keywords.
//!
//! C# reserves only a fixed set of words; many others (`partial`, `record`, `where`, `get`, ...) are keywords only in
//! specific positions and remain valid identifiers elsewhere. The lexer therefore produces ordinary identifiers for
//! them and the parser asks this registry whether an identifier plays a contextual role.
//!
//! ## Examples
//! ```rust
//! use facade_core::lang::contextual::{self, ContextualKeyword};
//!
//! assert_eq!(contextual::from_str("partial"), Some(ContextualKeyword::Partial));
//! assert_eq!(contextual::as_str(ContextualKeyword::Where), "where");
//! ```

/// Stable identifier for contextual keywords the declaration parser cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextualKeyword {
    // Declaration modifiers
    Partial,
    File,
    Async,
    Required,
    Scoped,

    // Declarations
    Record,
    Global,
    Where,

    // Accessors
    Get,
    Set,
    Init,
    Add,
    Remove,

    // Constraints
    Unmanaged,
    NotNull,
}

/// Registry of contextual keyword spellings.
pub const CONTEXTUAL_KEYWORDS: &[(ContextualKeyword, &str)] = &[
    (ContextualKeyword::Partial, "partial"),
    (ContextualKeyword::File, "file"),
    (ContextualKeyword::Async, "async"),
    (ContextualKeyword::Required, "required"),
    (ContextualKeyword::Scoped, "scoped"),
    (ContextualKeyword::Record, "record"),
    (ContextualKeyword::Global, "global"),
    (ContextualKeyword::Where, "where"),
    (ContextualKeyword::Get, "get"),
    (ContextualKeyword::Set, "set"),
    (ContextualKeyword::Init, "init"),
    (ContextualKeyword::Add, "add"),
    (ContextualKeyword::Remove, "remove"),
    (ContextualKeyword::Unmanaged, "unmanaged"),
    (ContextualKeyword::NotNull, "notnull"),
];

/// Canonical spelling.
pub fn as_str(id: ContextualKeyword) -> &'static str {
    CONTEXTUAL_KEYWORDS
        .iter()
        .find(|(k, _)| *k == id)
        .map(|(_, s)| *s)
        .expect("contextual keyword spelling missing")
}

/// Lookup by spelling. Verbatim identifiers (`@partial`) never match.
pub fn from_str(s: &str) -> Option<ContextualKeyword> {
    CONTEXTUAL_KEYWORDS.iter().find(|(_, spelling)| *spelling == s).map(|(k, _)| *k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spellings_round_trip() {
        for (id, spelling) in CONTEXTUAL_KEYWORDS {
            assert_eq!(from_str(spelling), Some(*id));
            assert_eq!(as_str(*id), *spelling);
        }
    }

    #[test]
    fn test_verbatim_identifier_is_not_contextual() {
        assert_eq!(from_str("@partial"), None);
    }
}
