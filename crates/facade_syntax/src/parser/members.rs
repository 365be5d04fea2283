/// Type members.
///
/// Methods, properties, indexers and events are parsed down to their signatures. Members the generator never
/// forwards (fields, constructors, destructors, operators, explicit interface implementations) are skipped and
/// produce no node.
impl<'a> Parser<'a> {
    /// Parse one member. `Ok(None)` means the member was recognized and skipped.
    fn member_declaration(&mut self) -> PResult<Option<Spanned<MemberDecl>>> {
        if self.check_punct(PunctuationId::LBracket) {
            self.skip_attributes()?;
            return Ok(None);
        }

        let start = self.peek().span;
        let modifiers = self.modifiers();

        if let Some(kind) = self.type_decl_kind() {
            let decl = self.type_declaration(modifiers, kind)?;
            return Ok(Some(Spanned::new(MemberDecl::Type(decl), self.span_from(start))));
        }

        if self.check_keyword(KeywordId::Event) {
            return Ok(self
                .event_declaration(modifiers)?
                .map(|event| Spanned::new(MemberDecl::Event(event), self.span_from(start))));
        }

        let unmodeled = modifiers.contains(Modifier::Const)
            || self.check_punct(PunctuationId::Tilde)
            || self.check_keyword(KeywordId::Implicit)
            || self.check_keyword(KeywordId::Explicit)
            || self.check_keyword(KeywordId::Delegate)
            || self.check_keyword(KeywordId::Fixed)
            || (self.peek().kind.is_ident() && self.peek_at(1).kind.is_punctuation(PunctuationId::LParen));
        if unmodeled {
            self.skip_member();
            return Ok(None);
        }

        let ref_return = if self.match_keyword(KeywordId::Ref) {
            if self.match_keyword(KeywordId::Readonly) {
                Some(RefReturn::RefReadonly)
            } else {
                Some(RefReturn::Ref)
            }
        } else {
            None
        };

        let ty = self.type_ref()?;

        if self.check_keyword(KeywordId::Operator) {
            self.skip_member();
            return Ok(None);
        }

        if self.match_keyword(KeywordId::This) {
            let params = self.params(PunctuationId::LBracket, PunctuationId::RBracket)?;
            let accessors = self.accessors_or_expression_body()?;
            let indexer = IndexerDecl {
                modifiers,
                ty,
                params,
                accessors,
            };
            return Ok(Some(Spanned::new(MemberDecl::Indexer(indexer), self.span_from(start))));
        }

        if self.is_explicit_interface_name() {
            self.skip_member();
            return Ok(None);
        }

        let name = self.expect_ident("expected member name")?;

        if self.check_punct(PunctuationId::Lt) || self.check_punct(PunctuationId::LParen) {
            let method = self.method_rest(modifiers, ref_return, ty, name)?;
            return Ok(Some(Spanned::new(MemberDecl::Method(method), self.span_from(start))));
        }

        if self.check_punct(PunctuationId::LBrace) || self.check_punct(PunctuationId::FatArrow) {
            let accessors = self.accessors_or_expression_body()?;
            // `{ get; } = initializer;`
            if self.match_punct(PunctuationId::Eq) {
                self.skip_to_semicolon()?;
            }
            let property = PropertyDecl {
                modifiers,
                ty,
                name,
                accessors,
            };
            return Ok(Some(Spanned::new(MemberDecl::Property(property), self.span_from(start))));
        }

        // Field: `T name;`, `T a, b;`, `T name = value;`
        if self.check_punct(PunctuationId::Semicolon)
            || self.check_punct(PunctuationId::Comma)
            || self.check_punct(PunctuationId::Eq)
            || self.check_punct(PunctuationId::LBracket)
        {
            self.skip_member();
            return Ok(None);
        }

        Err(self.error_here("expected '(', '{', '=>' or ';' after member name"))
    }

    /// `IFoo.Member` / `IFoo<T>.Member`: explicit implementations are never forwarded.
    fn is_explicit_interface_name(&self) -> bool {
        if !self.peek().kind.is_ident() {
            return false;
        }
        let after_name = self.angle_run_end(1).unwrap_or(1);
        let next = &self.peek_at(after_name).kind;
        next.is_punctuation(PunctuationId::Dot) || next.is_punctuation(PunctuationId::ColonColon)
    }

    fn method_rest(
        &mut self,
        modifiers: Modifiers,
        ref_return: Option<RefReturn>,
        return_type: TypeRef,
        name: Ident,
    ) -> PResult<MethodDecl> {
        let type_params = self.type_params()?;
        let params = self.params(PunctuationId::LParen, PunctuationId::RParen)?;
        let constraints = self.constraint_clauses()?;

        let has_body = if self.match_punct(PunctuationId::Semicolon) {
            false
        } else if self.check_punct(PunctuationId::LBrace) {
            self.skip_group()?;
            true
        } else if self.match_punct(PunctuationId::FatArrow) {
            self.skip_to_semicolon()?;
            true
        } else {
            return Err(self.error_here("expected method body or ';'"));
        };

        Ok(MethodDecl {
            modifiers,
            ref_return,
            return_type,
            name,
            type_params,
            params,
            constraints,
            has_body,
        })
    }

    /// A delimited parameter list: `(...)` for methods and delegates, `[...]` for indexers.
    fn params(&mut self, open: PunctuationId, close: PunctuationId) -> PResult<Vec<Param>> {
        let mut params = Vec::new();
        self.expect_punct(open, "expected parameter list")?;
        if self.match_punct(close) {
            return Ok(params);
        }
        loop {
            params.push(self.param(close)?);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(close, "expected ',' or end of parameter list")?;
        Ok(params)
    }

    fn param(&mut self, close: PunctuationId) -> PResult<Param> {
        self.skip_attributes()?;

        let scoped = self.check_contextual(ContextualKeyword::Scoped)
            && matches!(self.peek_at(1).kind, TokenKind::Ident(_) | TokenKind::Keyword(_));
        if scoped {
            self.advance();
        }

        let mut modifier = None;
        loop {
            let next = if self.match_keyword(KeywordId::Ref) {
                if self.match_keyword(KeywordId::Readonly) {
                    ParamModifier::RefReadonly
                } else {
                    ParamModifier::Ref
                }
            } else if self.match_keyword(KeywordId::Out) {
                ParamModifier::Out
            } else if self.match_keyword(KeywordId::In) {
                ParamModifier::In
            } else if self.match_keyword(KeywordId::Params) {
                ParamModifier::Params
            } else if self.match_keyword(KeywordId::This) {
                ParamModifier::This
            } else {
                break;
            };
            // `this ref T` keeps the ref-kind; the receiver marker only matters when nothing else is present.
            if modifier.is_none() || modifier == Some(ParamModifier::This) {
                modifier = Some(next);
            }
        }

        let ty = self.type_ref()?;
        let name = self.expect_ident("expected parameter name")?;

        let default = if self.match_punct(PunctuationId::Eq) {
            Some(self.default_value(close)?)
        } else {
            None
        };

        Ok(Param {
            scoped,
            modifier,
            ty,
            name,
            default,
        })
    }

    /// Capture a default value up to the next depth-0 `,` or list closer, re-rendered as source text.
    fn default_value(&mut self, close: PunctuationId) -> PResult<String> {
        let start = self.pos;
        loop {
            match &self.peek().kind {
                TokenKind::Eof => return Err(self.error_here("expected end of default value")),
                TokenKind::Punctuation(p) if *p == PunctuationId::Comma || *p == close => break,
                TokenKind::Punctuation(p) if is_opener(*p) => self.skip_group()?,
                _ => {
                    self.advance();
                }
            }
        }
        if self.pos == start {
            return Err(self.error_here("expected default value"));
        }
        Ok(render_tokens(&self.tokens[start..self.pos]))
    }

    /// `{ get; set; }` accessor lists or a `=> expr;` getter-only body.
    fn accessors_or_expression_body(&mut self) -> PResult<Vec<AccessorKind>> {
        if self.match_punct(PunctuationId::FatArrow) {
            self.skip_to_semicolon()?;
            return Ok(vec![AccessorKind::Get]);
        }

        self.expect_punct(PunctuationId::LBrace, "expected accessor list")?;
        let mut accessors = Vec::new();
        while !self.check_punct(PunctuationId::RBrace) {
            self.skip_attributes()?;
            // Accessor-level accessibility and `readonly` do not change what is forwarded.
            while matches!(
                self.peek().kind,
                TokenKind::Keyword(
                    KeywordId::Private | KeywordId::Protected | KeywordId::Internal | KeywordId::Readonly
                )
            ) {
                self.advance();
            }

            let kind = if self.match_contextual(ContextualKeyword::Get) {
                AccessorKind::Get
            } else if self.match_contextual(ContextualKeyword::Set) {
                AccessorKind::Set
            } else if self.match_contextual(ContextualKeyword::Init) {
                AccessorKind::Init
            } else {
                return Err(self.error_here("expected 'get', 'set' or 'init' accessor"));
            };
            accessors.push(kind);
            self.accessor_body()?;
        }
        self.advance();
        Ok(accessors)
    }

    /// `;`, `{ ... }` or `=> expr;` after an accessor keyword.
    fn accessor_body(&mut self) -> PResult<()> {
        if self.match_punct(PunctuationId::Semicolon) {
            Ok(())
        } else if self.check_punct(PunctuationId::LBrace) {
            self.skip_group()
        } else if self.match_punct(PunctuationId::FatArrow) {
            self.skip_to_semicolon()
        } else {
            Err(self.error_here("expected accessor body or ';'"))
        }
    }

    /// `event T Name;`, `event T A, B;` or `event T Name { add ... remove ... }`.
    fn event_declaration(&mut self, modifiers: Modifiers) -> PResult<Option<EventDecl>> {
        self.advance();
        let ty = self.type_ref()?;
        if self.is_explicit_interface_name() {
            self.skip_member();
            return Ok(None);
        }

        let mut names = vec![self.expect_ident("expected event name")?];
        if self.check_punct(PunctuationId::LBrace) {
            self.skip_group()?;
            return Ok(Some(EventDecl { modifiers, ty, names }));
        }

        loop {
            if self.match_punct(PunctuationId::Eq) {
                self.default_value(PunctuationId::Semicolon)?;
            }
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
            names.push(self.expect_ident("expected event name")?);
        }
        self.expect_punct(PunctuationId::Semicolon, "expected ';' after event declaration")?;
        Ok(Some(EventDecl { modifiers, ty, names }))
    }
}
