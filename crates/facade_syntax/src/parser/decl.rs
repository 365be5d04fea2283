/// Namespace-level declarations.
///
/// This chunk parses what can appear directly in a compilation unit or namespace body: `extern alias`, using
/// directives, nested namespaces and type declarations (including their headers: type parameters, base lists and
/// constraint clauses).
impl<'a> Parser<'a> {
    // ========================================================================
    // Namespace bodies
    // ========================================================================

    /// Parse namespace-level items until EOF or, when `braced`, until the closing `}` (left unconsumed).
    fn namespace_body(
        &mut self,
        usings: &mut Vec<Spanned<UsingDirective>>,
        members: &mut Vec<Spanned<NamespaceMember>>,
        braced: bool,
    ) {
        loop {
            if self.is_at_end() {
                return;
            }
            if self.check_punct(PunctuationId::RBrace) {
                if braced {
                    return;
                }
                let err = self.error_here("unexpected '}'");
                self.errors.push(err);
                self.advance();
                continue;
            }
            if self.match_punct(PunctuationId::Semicolon) {
                continue;
            }

            let before = self.pos;
            match self.namespace_item(usings, members, braced) {
                Ok(()) => {}
                Err(err) => {
                    self.errors.push(err);
                    self.skip_member();
                }
            }
            if self.pos == before {
                self.advance();
            }
        }
    }

    fn namespace_item(
        &mut self,
        usings: &mut Vec<Spanned<UsingDirective>>,
        members: &mut Vec<Spanned<NamespaceMember>>,
        braced: bool,
    ) -> PResult<()> {
        let start = self.peek().span;

        if self.check_keyword(KeywordId::Extern) && self.peek_at(1).kind.ident() == Some("alias") {
            return self.skip_to_semicolon();
        }

        let is_global_using =
            self.check_contextual(ContextualKeyword::Global) && self.peek_at(1).kind.is_keyword(KeywordId::Using);
        if is_global_using || self.check_keyword(KeywordId::Using) {
            if let Some(using) = self.using_directive() {
                usings.push(Spanned::new(using, self.span_from(start)));
                return Ok(());
            }
            return self.skip_statement(braced);
        }

        if self.check_keyword(KeywordId::Namespace) {
            let namespace = self.namespace_declaration()?;
            members.push(Spanned::new(NamespaceMember::Namespace(namespace), self.span_from(start)));
            return Ok(());
        }

        // Attributes are not modeled; consuming them as their own item keeps `[assembly: ...]` from swallowing the
        // namespace that follows.
        if self.check_punct(PunctuationId::LBracket) {
            return self.skip_attributes();
        }

        let save = self.pos;
        let modifiers = self.modifiers();
        if let Some(kind) = self.type_decl_kind() {
            let decl = self.type_declaration(modifiers, kind)?;
            members.push(Spanned::new(NamespaceMember::Type(decl), self.span_from(start)));
            return Ok(());
        }

        self.pos = save;
        self.skip_statement(braced)
    }

    /// Skip a top-level statement. Statements are legal only in the compilation unit itself.
    fn skip_statement(&mut self, braced: bool) -> PResult<()> {
        let start = self.peek().span;
        self.skip_member();
        if braced {
            return Err(SyntaxError::syntax("expected a type or namespace declaration", start)
                .with_hint("statements are only allowed at the top level of a file"));
        }
        Ok(())
    }

    /// Try to parse a using directive at the current `using` (or `global using`).
    ///
    /// Returns `None` with the position restored when the tokens form a using *statement* instead
    /// (`using var x = ...;`, `using (...)`).
    fn using_directive(&mut self) -> Option<UsingDirective> {
        let save = self.pos;
        let errors = self.errors.len();
        let parsed = self.using_directive_inner();
        if parsed.is_none() {
            self.pos = save;
            self.errors.truncate(errors);
        }
        parsed
    }

    fn using_directive_inner(&mut self) -> Option<UsingDirective> {
        let is_global = self.match_contextual(ContextualKeyword::Global);
        if !self.match_keyword(KeywordId::Using) {
            return None;
        }

        let kind = if self.match_keyword(KeywordId::Static) {
            UsingKind::Static(self.type_ref().ok()?)
        } else if self.peek().kind.is_ident() && self.peek_at(1).kind.is_punctuation(PunctuationId::Eq) {
            let alias = self.expect_ident("expected alias name").ok()?;
            self.advance();
            UsingKind::Alias {
                alias,
                target: self.type_ref().ok()?,
            }
        } else {
            UsingKind::Namespace(self.qualified_name().ok()?)
        };

        if !self.match_punct(PunctuationId::Semicolon) {
            return None;
        }
        Some(UsingDirective { is_global, kind })
    }

    /// `Name(.Name)*`, optionally prefixed by `global::`.
    fn qualified_name(&mut self) -> PResult<QualifiedName> {
        let global = self.check_contextual(ContextualKeyword::Global)
            && self.peek_at(1).kind.is_punctuation(PunctuationId::ColonColon);
        if global {
            self.advance();
            self.advance();
        }
        let mut segments = vec![self.expect_ident("expected name")?];
        while self.match_punct(PunctuationId::Dot) {
            segments.push(self.expect_ident("expected name after '.'")?);
        }
        Ok(QualifiedName { global, segments })
    }

    fn namespace_declaration(&mut self) -> PResult<NamespaceDecl> {
        self.advance();
        let name = self.qualified_name()?;
        let mut namespace = NamespaceDecl {
            name,
            file_scoped: false,
            usings: Vec::new(),
            members: Vec::new(),
        };

        if self.match_punct(PunctuationId::Semicolon) {
            // File-scoped: everything up to EOF belongs to this namespace.
            namespace.file_scoped = true;
            self.namespace_body(&mut namespace.usings, &mut namespace.members, false);
            return Ok(namespace);
        }

        self.expect_punct(PunctuationId::LBrace, "expected '{' or ';' after namespace name")?;
        self.namespace_body(&mut namespace.usings, &mut namespace.members, true);
        if !self.match_punct(PunctuationId::RBrace) {
            // Keep what was parsed; the namespace simply runs to EOF.
            let err = self.error_here("expected '}' to close namespace");
            self.errors.push(err);
        }
        self.match_punct(PunctuationId::Semicolon);
        Ok(namespace)
    }

    // ========================================================================
    // Modifiers
    // ========================================================================

    fn modifiers(&mut self) -> Modifiers {
        let mut modifiers = Vec::new();
        loop {
            let modifier = match &self.peek().kind {
                TokenKind::Keyword(id) => match id {
                    KeywordId::Public => Modifier::Public,
                    KeywordId::Private => Modifier::Private,
                    KeywordId::Protected => Modifier::Protected,
                    KeywordId::Internal => Modifier::Internal,
                    KeywordId::Static => Modifier::Static,
                    KeywordId::Abstract => Modifier::Abstract,
                    KeywordId::Sealed => Modifier::Sealed,
                    KeywordId::Unsafe => Modifier::Unsafe,
                    KeywordId::Virtual => Modifier::Virtual,
                    KeywordId::Override => Modifier::Override,
                    KeywordId::Extern => Modifier::Extern,
                    KeywordId::Const => Modifier::Const,
                    KeywordId::Volatile => Modifier::Volatile,
                    KeywordId::New if !self.peek_at(1).kind.is_punctuation(PunctuationId::LParen) => Modifier::New,
                    // `readonly` before `ref` belongs to a `ref readonly` return; `ref readonly` is handled there.
                    KeywordId::Readonly => Modifier::Readonly,
                    KeywordId::Ref if self.ref_is_type_modifier() => Modifier::Ref,
                    _ => break,
                },
                TokenKind::Ident(_) => match self.contextual_modifier() {
                    Some(modifier) => modifier,
                    None => break,
                },
                _ => break,
            };
            self.advance();
            modifiers.push(modifier);
        }
        Modifiers(modifiers)
    }

    /// `ref` is a type modifier only in `ref struct` / `ref partial struct`.
    fn ref_is_type_modifier(&self) -> bool {
        let next = &self.peek_at(1).kind;
        next.is_keyword(KeywordId::Struct) || next.is_contextual(ContextualKeyword::Partial)
    }

    /// Contextual keywords act as modifiers only when another declaration token follows.
    fn contextual_modifier(&self) -> Option<Modifier> {
        let modifier = if self.check_contextual(ContextualKeyword::Partial) {
            Modifier::Partial
        } else if self.check_contextual(ContextualKeyword::File) {
            Modifier::File
        } else if self.check_contextual(ContextualKeyword::Async) {
            Modifier::Async
        } else if self.check_contextual(ContextualKeyword::Required) {
            Modifier::Required
        } else {
            return None;
        };
        match &self.peek_at(1).kind {
            TokenKind::Ident(_) | TokenKind::Keyword(_) => Some(modifier),
            TokenKind::Punctuation(PunctuationId::LParen) if modifier == Modifier::Async => Some(modifier),
            _ => None,
        }
    }

    // ========================================================================
    // Type declarations
    // ========================================================================

    /// Classify the current token as the start of a type declaration, without consuming it.
    fn type_decl_kind(&self) -> Option<TypeDeclKind> {
        match &self.peek().kind {
            TokenKind::Keyword(KeywordId::Class) => Some(TypeDeclKind::Class),
            TokenKind::Keyword(KeywordId::Struct) => Some(TypeDeclKind::Struct),
            TokenKind::Keyword(KeywordId::Interface) => Some(TypeDeclKind::Interface),
            TokenKind::Keyword(KeywordId::Enum) => Some(TypeDeclKind::Enum),
            TokenKind::Keyword(KeywordId::Delegate) if !self.peek_at(1).kind.is_punctuation(PunctuationId::Star) => {
                Some(TypeDeclKind::Delegate)
            }
            TokenKind::Ident(_) if self.check_contextual(ContextualKeyword::Record) => match &self.peek_at(1).kind {
                TokenKind::Keyword(KeywordId::Struct) => Some(TypeDeclKind::RecordStruct),
                TokenKind::Keyword(KeywordId::Class) | TokenKind::Ident(_) => Some(TypeDeclKind::Record),
                _ => None,
            },
            _ => None,
        }
    }

    /// Parse a type declaration whose kind was classified by [`Parser::type_decl_kind`].
    fn type_declaration(&mut self, modifiers: Modifiers, kind: TypeDeclKind) -> PResult<TypeDecl> {
        self.advance();
        if kind == TypeDeclKind::RecordStruct || (kind == TypeDeclKind::Record && self.check_keyword(KeywordId::Class))
        {
            self.advance();
        }

        if kind == TypeDeclKind::Delegate {
            return self.delegate_declaration(modifiers);
        }

        let name = self.expect_ident("expected type name")?;
        let type_params = self.type_params()?;

        let mut decl = TypeDecl {
            modifiers,
            kind,
            name,
            type_params,
            bases: Vec::new(),
            constraints: Vec::new(),
            members: Vec::new(),
        };

        // Primary constructor / positional record parameters.
        if self.check_punct(PunctuationId::LParen) {
            self.skip_group()?;
        }

        if self.match_punct(PunctuationId::Colon) {
            loop {
                let start = self.peek().span;
                let base = self.type_ref()?;
                decl.bases.push(Spanned::new(base, self.span_from(start)));
                // `: Base(args)` forwards primary constructor arguments.
                if self.check_punct(PunctuationId::LParen) {
                    self.skip_group()?;
                }
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }

        decl.constraints = self.constraint_clauses()?;

        if kind == TypeDeclKind::Enum {
            if self.check_punct(PunctuationId::LBrace) {
                self.skip_group()?;
            } else {
                self.expect_punct(PunctuationId::LBrace, "expected enum body")?;
            }
            self.match_punct(PunctuationId::Semicolon);
            return Ok(decl);
        }

        if self.match_punct(PunctuationId::Semicolon) {
            return Ok(decl);
        }
        self.expect_punct(PunctuationId::LBrace, "expected '{' to open type body")?;
        decl.members = self.type_body();
        self.expect_punct(PunctuationId::RBrace, "expected '}' to close type body")?;
        self.match_punct(PunctuationId::Semicolon);
        Ok(decl)
    }

    fn delegate_declaration(&mut self, modifiers: Modifiers) -> PResult<TypeDecl> {
        // Delegates are recorded by name only; their signature is not needed for forwarding.
        self.match_keyword(KeywordId::Ref);
        self.match_keyword(KeywordId::Readonly);
        self.type_ref()?;
        let name = self.expect_ident("expected delegate name")?;
        let type_params = self.type_params()?;
        self.params(PunctuationId::LParen, PunctuationId::RParen)?;
        let constraints = self.constraint_clauses()?;
        self.expect_punct(PunctuationId::Semicolon, "expected ';' after delegate declaration")?;
        Ok(TypeDecl {
            modifiers,
            kind: TypeDeclKind::Delegate,
            name,
            type_params,
            bases: Vec::new(),
            constraints,
            members: Vec::new(),
        })
    }

    /// `<[attrs] [in|out] T, ...>`; empty when no `<` follows.
    fn type_params(&mut self) -> PResult<Vec<TypeParam>> {
        let mut params = Vec::new();
        if !self.match_punct(PunctuationId::Lt) {
            return Ok(params);
        }
        loop {
            self.skip_attributes()?;
            let variance = if self.match_keyword(KeywordId::In) {
                Some(Variance::In)
            } else if self.match_keyword(KeywordId::Out) {
                Some(Variance::Out)
            } else {
                None
            };
            let name = self.expect_ident("expected type parameter name")?;
            params.push(TypeParam { variance, name });
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::Gt, "expected '>' to close type parameter list")?;
        Ok(params)
    }

    /// Zero or more `where T : ...` clauses.
    fn constraint_clauses(&mut self) -> PResult<Vec<ConstraintClause>> {
        let mut clauses = Vec::new();
        while self.check_contextual(ContextualKeyword::Where) && self.peek_at(1).kind.is_ident() {
            self.advance();
            let param = self.expect_ident("expected type parameter name")?;
            self.expect_punct(PunctuationId::Colon, "expected ':' in constraint clause")?;
            let mut constraints = Vec::new();
            loop {
                constraints.push(self.type_constraint()?);
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
            clauses.push(ConstraintClause { param, constraints });
        }
        Ok(clauses)
    }

    fn type_constraint(&mut self) -> PResult<TypeConstraint> {
        if self.match_keyword(KeywordId::Class) {
            let nullable = self.match_punct(PunctuationId::Question);
            return Ok(TypeConstraint::Class { nullable });
        }
        if self.match_keyword(KeywordId::Struct) {
            return Ok(TypeConstraint::Struct);
        }
        if self.match_keyword(KeywordId::Default) {
            return Ok(TypeConstraint::Default);
        }
        if self.match_keyword(KeywordId::New) {
            self.expect_punct(PunctuationId::LParen, "expected '(' after 'new'")?;
            self.expect_punct(PunctuationId::RParen, "expected ')' in 'new()' constraint")?;
            return Ok(TypeConstraint::New);
        }
        let ends_constraint = |kind: &TokenKind| {
            kind.is_punctuation(PunctuationId::Comma)
                || kind.is_punctuation(PunctuationId::LBrace)
                || kind.is_punctuation(PunctuationId::Semicolon)
                || kind.is_punctuation(PunctuationId::FatArrow)
                || kind.is_contextual(ContextualKeyword::Where)
        };
        if ends_constraint(&self.peek_at(1).kind) {
            if self.match_contextual(ContextualKeyword::Unmanaged) {
                return Ok(TypeConstraint::Unmanaged);
            }
            if self.match_contextual(ContextualKeyword::NotNull) {
                return Ok(TypeConstraint::NotNull);
            }
        }
        Ok(TypeConstraint::Type(self.type_ref()?))
    }

    /// Members of a type body up to (not including) the closing `}`.
    fn type_body(&mut self) -> Vec<Spanned<MemberDecl>> {
        let mut members = Vec::new();
        while !self.is_at_end() && !self.check_punct(PunctuationId::RBrace) {
            let before = self.pos;
            if self.match_punct(PunctuationId::Semicolon) {
                continue;
            }
            match self.member_declaration() {
                Ok(Some(member)) => members.push(member),
                Ok(None) => {}
                Err(err) => {
                    self.errors.push(err);
                    self.skip_member();
                }
            }
            if self.pos == before {
                self.advance();
            }
        }
        members
    }
}
