/// Type references.
///
/// Parses the type syntax that can appear in declarations: predefined types, (qualified, generic, alias-qualified)
/// names, tuples, and the `?`, `[]`/`[,]` and `*` suffixes. Types are kept as written; binding happens later.
impl<'a> Parser<'a> {
    fn type_ref(&mut self) -> PResult<TypeRef> {
        let mut ty = match &self.peek().kind {
            TokenKind::Punctuation(PunctuationId::LParen) => self.tuple_type()?,
            TokenKind::Keyword(id) if keywords::is_predefined_type(*id) => {
                self.advance();
                TypeRef::Predefined(*id)
            }
            TokenKind::Ident(_) => TypeRef::Named(self.named_type()?),
            _ => return Err(self.error_here("expected type")),
        };

        loop {
            if self.match_punct(PunctuationId::Question) {
                ty = TypeRef::Nullable(Box::new(ty));
            } else if self.match_punct(PunctuationId::Star) {
                ty = TypeRef::Pointer(Box::new(ty));
            } else if let Some(rank) = self.array_rank() {
                ty = match ty {
                    TypeRef::Array { element, mut ranks } => {
                        ranks.push(rank);
                        TypeRef::Array { element, ranks }
                    }
                    other => TypeRef::Array {
                        element: Box::new(other),
                        ranks: vec![rank],
                    },
                };
            } else {
                return Ok(ty);
            }
        }
    }

    /// Consume a `[` `,`* `]` rank specifier and return its rank.
    fn array_rank(&mut self) -> Option<usize> {
        if !self.check_punct(PunctuationId::LBracket) {
            return None;
        }
        let mut commas = 0;
        while self.peek_at(1 + commas).kind.is_punctuation(PunctuationId::Comma) {
            commas += 1;
        }
        if !self.peek_at(1 + commas).kind.is_punctuation(PunctuationId::RBracket) {
            return None;
        }
        self.pos += commas + 2;
        Some(commas + 1)
    }

    fn named_type(&mut self) -> PResult<NamedTypeRef> {
        let qualifier = if self.peek_at(1).kind.is_punctuation(PunctuationId::ColonColon) {
            let alias = self.expect_ident("expected alias name")?;
            self.advance();
            Some(alias)
        } else {
            None
        };

        let mut segments = vec![self.type_segment()?];
        while self.check_punct(PunctuationId::Dot) && self.peek_at(1).kind.is_ident() {
            self.advance();
            segments.push(self.type_segment()?);
        }
        Ok(NamedTypeRef { qualifier, segments })
    }

    fn type_segment(&mut self) -> PResult<TypeSegment> {
        let name = self.expect_ident("expected type name")?;
        let mut args = Vec::new();
        if self.match_punct(PunctuationId::Lt) {
            loop {
                args.push(self.type_ref()?);
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
            self.expect_punct(PunctuationId::Gt, "expected '>' to close type argument list")?;
        }
        Ok(TypeSegment { name, args })
    }

    fn tuple_type(&mut self) -> PResult<TypeRef> {
        self.advance();
        let mut elements = Vec::new();
        loop {
            let ty = self.type_ref()?;
            let name = match &self.peek().kind {
                TokenKind::Ident(name) => {
                    self.advance();
                    Some(name.clone())
                }
                _ => None,
            };
            elements.push(TupleElement { ty, name });
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::RParen, "expected ')' to close tuple type")?;
        if elements.len() < 2 {
            return Err(SyntaxError::syntax("tuple types need at least two elements", self.previous_span()));
        }
        Ok(TypeRef::Tuple(elements))
    }
}
