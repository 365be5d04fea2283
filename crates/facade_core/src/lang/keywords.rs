//! Define the reserved keyword vocabulary of C#.
//!
//! This module is the single source of truth for reserved words: a stable identifier ([`KeywordId`]) plus a const
//! metadata table ([`KEYWORDS`]) that records canonical spellings and categories.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**, like C# itself.
//! - Contextual keywords (`partial`, `record`, `where`, ...) are *not* reserved and live in
//!   [`crate::lang::contextual`]; the lexer produces identifiers for them.
//! - A verbatim identifier (`@class`) is never a keyword; the lexer handles the `@` prefix.
//!
//! ## Examples
//! ```rust
//! use facade_core::lang::keywords::{self, KeywordCategory, KeywordId};
//!
//! assert_eq!(keywords::from_str("void"), Some(KeywordId::Void));
//! assert_eq!(keywords::category(KeywordId::Void), KeywordCategory::PredefinedType);
//! assert_eq!(keywords::from_str("partial"), None);
//! ```

/// Stable identifier for every reserved C# keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeywordId {
    // Declaration modifiers
    Abstract,
    Const,
    Extern,
    Internal,
    Override,
    Private,
    Protected,
    Public,
    Readonly,
    Sealed,
    Static,
    Unsafe,
    Virtual,
    Volatile,

    // Declarations
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    Event,
    Namespace,
    Using,
    Operator,
    Implicit,
    Explicit,
    This,
    Base,

    // Predefined types
    Bool,
    Byte,
    Char,
    Decimal,
    Double,
    Float,
    Int,
    Long,
    Object,
    SByte,
    Short,
    String,
    UInt,
    ULong,
    UShort,
    Void,

    // Parameter modifiers
    Params,
    Ref,
    Out,
    In,

    // Literals
    True,
    False,
    Null,
    Default,

    // Statements and expressions (only lexed; the parser skips bodies)
    As,
    Break,
    Case,
    Catch,
    Checked,
    Continue,
    Do,
    Else,
    Finally,
    Fixed,
    For,
    ForEach,
    Goto,
    If,
    Is,
    Lock,
    New,
    Return,
    SizeOf,
    StackAlloc,
    Switch,
    Throw,
    Try,
    TypeOf,
    Unchecked,
    While,
}

/// High-level grouping used by the parser and by display code.
///
/// ## Notes
/// - Categories are metadata only; they do not enforce parsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    /// Declaration modifiers such as `public` or `static`.
    Modifier,
    /// Keywords that introduce or shape declarations.
    Declaration,
    /// Built-in type aliases (`int`, `string`, `void`, ...).
    PredefinedType,
    /// Parameter passing modes.
    ParameterModifier,
    /// Literal keywords.
    Literal,
    /// Statement and expression keywords.
    Statement,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
}

/// Registry of all reserved keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped by category for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Declaration modifiers
    info(KeywordId::Abstract, "abstract", KeywordCategory::Modifier),
    info(KeywordId::Const, "const", KeywordCategory::Modifier),
    info(KeywordId::Extern, "extern", KeywordCategory::Modifier),
    info(KeywordId::Internal, "internal", KeywordCategory::Modifier),
    info(KeywordId::Override, "override", KeywordCategory::Modifier),
    info(KeywordId::Private, "private", KeywordCategory::Modifier),
    info(KeywordId::Protected, "protected", KeywordCategory::Modifier),
    info(KeywordId::Public, "public", KeywordCategory::Modifier),
    info(KeywordId::Readonly, "readonly", KeywordCategory::Modifier),
    info(KeywordId::Sealed, "sealed", KeywordCategory::Modifier),
    info(KeywordId::Static, "static", KeywordCategory::Modifier),
    info(KeywordId::Unsafe, "unsafe", KeywordCategory::Modifier),
    info(KeywordId::Virtual, "virtual", KeywordCategory::Modifier),
    info(KeywordId::Volatile, "volatile", KeywordCategory::Modifier),
    // Declarations
    info(KeywordId::Class, "class", KeywordCategory::Declaration),
    info(KeywordId::Struct, "struct", KeywordCategory::Declaration),
    info(KeywordId::Interface, "interface", KeywordCategory::Declaration),
    info(KeywordId::Enum, "enum", KeywordCategory::Declaration),
    info(KeywordId::Delegate, "delegate", KeywordCategory::Declaration),
    info(KeywordId::Event, "event", KeywordCategory::Declaration),
    info(KeywordId::Namespace, "namespace", KeywordCategory::Declaration),
    info(KeywordId::Using, "using", KeywordCategory::Declaration),
    info(KeywordId::Operator, "operator", KeywordCategory::Declaration),
    info(KeywordId::Implicit, "implicit", KeywordCategory::Declaration),
    info(KeywordId::Explicit, "explicit", KeywordCategory::Declaration),
    info(KeywordId::This, "this", KeywordCategory::Declaration),
    info(KeywordId::Base, "base", KeywordCategory::Declaration),
    // Predefined types
    info(KeywordId::Bool, "bool", KeywordCategory::PredefinedType),
    info(KeywordId::Byte, "byte", KeywordCategory::PredefinedType),
    info(KeywordId::Char, "char", KeywordCategory::PredefinedType),
    info(KeywordId::Decimal, "decimal", KeywordCategory::PredefinedType),
    info(KeywordId::Double, "double", KeywordCategory::PredefinedType),
    info(KeywordId::Float, "float", KeywordCategory::PredefinedType),
    info(KeywordId::Int, "int", KeywordCategory::PredefinedType),
    info(KeywordId::Long, "long", KeywordCategory::PredefinedType),
    info(KeywordId::Object, "object", KeywordCategory::PredefinedType),
    info(KeywordId::SByte, "sbyte", KeywordCategory::PredefinedType),
    info(KeywordId::Short, "short", KeywordCategory::PredefinedType),
    info(KeywordId::String, "string", KeywordCategory::PredefinedType),
    info(KeywordId::UInt, "uint", KeywordCategory::PredefinedType),
    info(KeywordId::ULong, "ulong", KeywordCategory::PredefinedType),
    info(KeywordId::UShort, "ushort", KeywordCategory::PredefinedType),
    info(KeywordId::Void, "void", KeywordCategory::PredefinedType),
    // Parameter modifiers
    info(KeywordId::Params, "params", KeywordCategory::ParameterModifier),
    info(KeywordId::Ref, "ref", KeywordCategory::ParameterModifier),
    info(KeywordId::Out, "out", KeywordCategory::ParameterModifier),
    info(KeywordId::In, "in", KeywordCategory::ParameterModifier),
    // Literals
    info(KeywordId::True, "true", KeywordCategory::Literal),
    info(KeywordId::False, "false", KeywordCategory::Literal),
    info(KeywordId::Null, "null", KeywordCategory::Literal),
    info(KeywordId::Default, "default", KeywordCategory::Literal),
    // Statements and expressions (only lexed; the parser skips bodies)
    info(KeywordId::As, "as", KeywordCategory::Statement),
    info(KeywordId::Break, "break", KeywordCategory::Statement),
    info(KeywordId::Case, "case", KeywordCategory::Statement),
    info(KeywordId::Catch, "catch", KeywordCategory::Statement),
    info(KeywordId::Checked, "checked", KeywordCategory::Statement),
    info(KeywordId::Continue, "continue", KeywordCategory::Statement),
    info(KeywordId::Do, "do", KeywordCategory::Statement),
    info(KeywordId::Else, "else", KeywordCategory::Statement),
    info(KeywordId::Finally, "finally", KeywordCategory::Statement),
    info(KeywordId::Fixed, "fixed", KeywordCategory::Statement),
    info(KeywordId::For, "for", KeywordCategory::Statement),
    info(KeywordId::ForEach, "foreach", KeywordCategory::Statement),
    info(KeywordId::Goto, "goto", KeywordCategory::Statement),
    info(KeywordId::If, "if", KeywordCategory::Statement),
    info(KeywordId::Is, "is", KeywordCategory::Statement),
    info(KeywordId::Lock, "lock", KeywordCategory::Statement),
    info(KeywordId::New, "new", KeywordCategory::Statement),
    info(KeywordId::Return, "return", KeywordCategory::Statement),
    info(KeywordId::SizeOf, "sizeof", KeywordCategory::Statement),
    info(KeywordId::StackAlloc, "stackalloc", KeywordCategory::Statement),
    info(KeywordId::Switch, "switch", KeywordCategory::Statement),
    info(KeywordId::Throw, "throw", KeywordCategory::Statement),
    info(KeywordId::Try, "try", KeywordCategory::Statement),
    info(KeywordId::TypeOf, "typeof", KeywordCategory::Statement),
    info(KeywordId::Unchecked, "unchecked", KeywordCategory::Statement),
    info(KeywordId::While, "while", KeywordCategory::Statement),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Return `true` if `id` names a predefined type (`int`, `string`, `void`, ...).
pub fn is_predefined_type(id: KeywordId) -> bool {
    category(id) == KeywordCategory::PredefinedType
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling is a reserved keyword.
/// - `None` otherwise (including contextual keywords).
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo { id, canonical, category }
}
