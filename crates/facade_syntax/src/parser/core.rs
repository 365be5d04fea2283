/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()` entrypoints.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.
type PResult<T> = Result<T, SyntaxError>;

/// Returned by `peek` once the stream is exhausted, so an empty token slice behaves like a lone `Eof`.
static EOF_TOKEN: Token = Token {
    kind: TokenKind::Eof,
    span: Span::new(0, 0),
};

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass and recovers from errors by skipping to the next member boundary, so one bad member
///   never hides the declarations around it.
/// - Most parsing helpers are implemented on `Parser` but split across multiple files.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `facade_syntax::lexer`.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    /// Parse the entire token stream into a [`CompilationUnit`].
    ///
    /// ## Errors
    /// Returns every [`SyntaxError`] found if any member failed to parse.
    pub fn parse(self) -> Result<CompilationUnit, Vec<SyntaxError>> {
        let (unit, errors) = self.parse_with_recovery();
        if errors.is_empty() { Ok(unit) } else { Err(errors) }
    }

    /// Parse the token stream, returning the declarations that parsed cleanly alongside all errors.
    pub fn parse_with_recovery(mut self) -> (CompilationUnit, Vec<SyntaxError>) {
        let mut unit = CompilationUnit::default();
        self.namespace_body(&mut unit.usings, &mut unit.members, false);
        (unit, self.errors)
    }
}
