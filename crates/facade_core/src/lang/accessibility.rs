//! Declared accessibility and its emission table.
//!
//! The generator re-declares the container type with the same accessibility it was written with. Only five levels
//! have an emission keyword; every other level voids generation for that container.
//!
//! | Level | Keyword |
//! |-------|---------|
//! | `Private` | `private` |
//! | `ProtectedAndInternal` | `private protected` |
//! | `Protected` | `protected` |
//! | `Internal` | `internal` |
//! | `Public` | `public` |
//!
//! ## Examples
//! ```rust
//! use facade_core::lang::accessibility::{self, AccessModifier, Accessibility};
//!
//! let level = accessibility::from_modifiers(&[AccessModifier::Private, AccessModifier::Protected]);
//! assert_eq!(level, Some(Accessibility::ProtectedAndInternal));
//! assert_eq!(accessibility::emission_keyword(Accessibility::ProtectedAndInternal), Some("private protected"));
//! assert_eq!(accessibility::emission_keyword(Accessibility::File), None);
//! ```

use std::fmt;

/// Accessibility as reported for a type symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessibility {
    /// Modifier combination that does not form a valid accessibility.
    NotApplicable,
    Private,
    /// `private protected`
    ProtectedAndInternal,
    Protected,
    Internal,
    /// `protected internal`
    ProtectedOrInternal,
    Public,
    /// `file` (file-local type)
    File,
}

/// A single access modifier keyword as written in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessModifier {
    Public,
    Private,
    Protected,
    Internal,
    File,
}

/// The levels that have an emission keyword, in ascending order of visibility.
pub const RECOGNIZED: [Accessibility; 5] = [
    Accessibility::Private,
    Accessibility::ProtectedAndInternal,
    Accessibility::Protected,
    Accessibility::Internal,
    Accessibility::Public,
];

impl Accessibility {
    /// Accessibility of a type declared without any access modifier.
    pub fn default_for(nested: bool) -> Self {
        if nested { Accessibility::Private } else { Accessibility::Internal }
    }

    /// Return `true` if this level has an emission keyword.
    pub fn is_recognized(self) -> bool {
        emission_keyword(self).is_some()
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Accessibility::NotApplicable => "not applicable",
            Accessibility::Private => "private",
            Accessibility::ProtectedAndInternal => "private protected",
            Accessibility::Protected => "protected",
            Accessibility::Internal => "internal",
            Accessibility::ProtectedOrInternal => "protected internal",
            Accessibility::Public => "public",
            Accessibility::File => "file",
        };
        f.write_str(name)
    }
}

/// Keyword(s) used to re-declare a type with the given accessibility.
///
/// ## Returns
/// - `Some(keyword)` for the five recognized levels.
/// - `None` for `ProtectedOrInternal`, `File` and `NotApplicable`.
pub fn emission_keyword(level: Accessibility) -> Option<&'static str> {
    match level {
        Accessibility::Private => Some("private"),
        Accessibility::ProtectedAndInternal => Some("private protected"),
        Accessibility::Protected => Some("protected"),
        Accessibility::Internal => Some("internal"),
        Accessibility::Public => Some("public"),
        Accessibility::ProtectedOrInternal | Accessibility::File | Accessibility::NotApplicable => None,
    }
}

/// Combine the access modifiers written on a declaration.
///
/// ## Returns
/// - `None` when no access modifier was written (the caller applies [`Accessibility::default_for`]).
/// - `Some(Accessibility::NotApplicable)` for combinations C# rejects (e.g. `public private`).
pub fn from_modifiers(modifiers: &[AccessModifier]) -> Option<Accessibility> {
    let has = |m: AccessModifier| modifiers.contains(&m);
    if modifiers.is_empty() {
        return None;
    }

    let level = match (
        has(AccessModifier::Public),
        has(AccessModifier::Private),
        has(AccessModifier::Protected),
        has(AccessModifier::Internal),
        has(AccessModifier::File),
    ) {
        (true, false, false, false, false) => Accessibility::Public,
        (false, true, false, false, false) => Accessibility::Private,
        (false, false, true, false, false) => Accessibility::Protected,
        (false, false, false, true, false) => Accessibility::Internal,
        (false, false, false, false, true) => Accessibility::File,
        (false, true, true, false, false) => Accessibility::ProtectedAndInternal,
        (false, false, true, true, false) => Accessibility::ProtectedOrInternal,
        _ => Accessibility::NotApplicable,
    };
    Some(level)
}
