/// Parse a token stream into a [`CompilationUnit`].
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `facade_syntax::lexer`.
///
/// ## Errors
/// Returns `Err(Vec<SyntaxError>)` if any declaration failed to parse.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<CompilationUnit, Vec<SyntaxError>> {
    Parser::new(tokens).parse()
}

/// Parse a token stream, keeping every declaration that parsed cleanly.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse_with_recovery(tokens: &[Token]) -> (CompilationUnit, Vec<SyntaxError>) {
    Parser::new(tokens).parse_with_recovery()
}

/// Lex and parse source text in one step, with recovery at both stages.
///
/// Lexical errors come first in the returned list.
pub fn parse_source(source: &str) -> (CompilationUnit, Vec<SyntaxError>) {
    let (tokens, mut errors) = crate::lexer::lex_with_recovery(source);
    let (unit, parse_errors) = parse_with_recovery(&tokens);
    errors.extend(parse_errors);
    (unit, errors)
}
