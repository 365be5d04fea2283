/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`)
/// - Matching / expecting keywords, contextual keywords and punctuation
/// - Skipping balanced token runs (`skip_group`, `skip_member`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &'a Token {
        self.peek_at(0)
    }

    /// Return the token `n` positions ahead without consuming anything.
    fn peek_at(&self, n: usize) -> &'a Token {
        let tokens: &'a [Token] = self.tokens;
        tokens
            .get(self.pos + n)
            .or_else(|| tokens.last())
            .unwrap_or(&EOF_TOKEN)
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.span,
            None => self.peek().span,
        }
    }

    /// Span from `start` through the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.previous_span())
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    fn check_contextual(&self, id: ContextualKeyword) -> bool {
        self.peek().kind.is_contextual(id)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_contextual(&mut self, id: ContextualKeyword) -> bool {
        if self.check_contextual(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn error_here(&self, msg: &str) -> SyntaxError {
        let found = match &self.peek().kind {
            TokenKind::Eof => "end of file".to_string(),
            _ => format!("'{}'", self.peek().text()),
        };
        SyntaxError::syntax(format!("{msg}, found {found}"), self.peek().span)
    }

    fn expect_punct(&mut self, id: PunctuationId, msg: &str) -> PResult<&'a Token> {
        if self.check_punct(id) {
            Ok(self.advance())
        } else {
            Err(self.error_here(msg))
        }
    }

    fn expect_ident(&mut self, msg: &str) -> PResult<Ident> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name.clone())
            }
            _ => Err(self.error_here(msg)),
        }
    }

    // ========================================================================
    // Skipping
    // ========================================================================

    /// Skip a balanced `(...)`, `[...]` or `{...}` group starting at the current opener.
    fn skip_group(&mut self) -> PResult<()> {
        let open_span = self.peek().span;
        let mut depth = 0usize;
        loop {
            let token = self.advance();
            match &token.kind {
                TokenKind::Eof => {
                    return Err(SyntaxError::syntax("unclosed delimiter", open_span)
                        .with_hint("check that every '(', '[' and '{' has a matching closer"));
                }
                TokenKind::Punctuation(p) if is_opener(*p) => depth += 1,
                TokenKind::Punctuation(p) if is_closer(*p) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
    }

    /// Skip `[...]` attribute sections.
    fn skip_attributes(&mut self) -> PResult<()> {
        while self.check_punct(PunctuationId::LBracket) {
            self.skip_group()?;
        }
        Ok(())
    }

    /// Skip an expression up to and including the terminating `;`.
    fn skip_to_semicolon(&mut self) -> PResult<()> {
        loop {
            match &self.peek().kind {
                TokenKind::Eof => return Err(self.error_here("expected ';'")),
                TokenKind::Punctuation(PunctuationId::Semicolon) => {
                    self.advance();
                    return Ok(());
                }
                TokenKind::Punctuation(PunctuationId::RBrace) => return Err(self.error_here("expected ';'")),
                TokenKind::Punctuation(p) if is_opener(*p) => self.skip_group()?,
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Skip the rest of a member (or top-level statement) that is not modeled.
    ///
    /// Stops after a depth-0 `;`, after a depth-0 body `{...}` that is not followed by an initializer, or in front
    /// of the `}` that closes the enclosing body.
    fn skip_member(&mut self) {
        let mut depth = 0usize;
        let mut in_initializer = false;
        loop {
            let kind = &self.peek().kind;
            match kind {
                TokenKind::Eof => return,
                TokenKind::Punctuation(PunctuationId::RBrace) if depth == 0 => return,
                TokenKind::Punctuation(PunctuationId::Semicolon) if depth == 0 => {
                    self.advance();
                    return;
                }
                TokenKind::Punctuation(PunctuationId::Eq | PunctuationId::FatArrow) if depth == 0 => {
                    in_initializer = true;
                    self.advance();
                }
                TokenKind::Punctuation(p) if is_opener(*p) => {
                    depth += 1;
                    self.advance();
                }
                TokenKind::Punctuation(p) if is_closer(*p) => {
                    depth = depth.saturating_sub(1);
                    let closed_body = depth == 0 && *p == PunctuationId::RBrace;
                    self.advance();
                    if closed_body && !in_initializer {
                        if self.check_punct(PunctuationId::Eq) || self.check_punct(PunctuationId::FatArrow) {
                            continue;
                        }
                        self.match_punct(PunctuationId::Semicolon);
                        return;
                    }
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Index just past a balanced `<...>` run starting at `offset`, if the run looks like a type argument list.
    fn angle_run_end(&self, offset: usize) -> Option<usize> {
        if !self.peek_at(offset).kind.is_punctuation(PunctuationId::Lt) {
            return None;
        }
        let mut depth = 0usize;
        let mut i = offset;
        loop {
            match &self.peek_at(i).kind {
                TokenKind::Punctuation(PunctuationId::Lt) => depth += 1,
                TokenKind::Punctuation(PunctuationId::Gt) => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i + 1);
                    }
                }
                TokenKind::Eof
                | TokenKind::Literal(_)
                | TokenKind::Punctuation(
                    PunctuationId::Semicolon
                    | PunctuationId::LBrace
                    | PunctuationId::RBrace
                    | PunctuationId::Eq
                    | PunctuationId::FatArrow,
                ) => return None,
                _ => {}
            }
            i += 1;
        }
    }
}

fn is_opener(p: PunctuationId) -> bool {
    matches!(p, PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::LBrace)
}

fn is_closer(p: PunctuationId) -> bool {
    matches!(p, PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace)
}
