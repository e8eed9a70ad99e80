use std::collections::VecDeque;

use rowan::{Checkpoint, GreenNodeBuilder};
use text_size::{TextRange, TextSize};

use crate::lexer::{lex_with_errors, Token};
use crate::syntax_kind::SyntaxKind;
use crate::{GoParse, ParseError};

use SyntaxKind::*;

pub fn parse_go(input: &str) -> GoParse {
    let _span = tracing::debug_span!(target: "tern.syntax", "parse_go", len = input.len()).entered();
    let parse = Parser::new(input).parse();
    if !parse.errors.is_empty() {
        tracing::debug!(target: "tern.syntax", errors = parse.errors.len(), "parsed with errors");
    }
    parse
}

/// Shape of a parsed simple statement.
enum SimpleStmt {
    /// A lone expression, not yet wrapped; the caller decides whether it is an
    /// `ExprStmt` or a bare condition/tag.
    Expr(Checkpoint),
    Range,
    Other,
}

struct Parser<'a> {
    input: &'a str,
    tokens: VecDeque<Token>,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<ParseError>,
    /// Set inside `if`/`for`/`switch` headers, where `T {` opens the body rather than a
    /// composite literal.
    no_composite: bool,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        let (tokens, lex_errors) = lex_with_errors(input);
        let errors = lex_errors
            .into_iter()
            .map(|e| ParseError {
                message: e.message,
                range: e.range,
            })
            .collect();
        Self {
            input,
            tokens: tokens.into_iter().filter(|t| t.kind != Eof).collect(),
            builder: GreenNodeBuilder::new(),
            errors,
            no_composite: false,
        }
    }

    fn parse(mut self) -> GoParse {
        self.builder.start_node(SourceFile.into());

        if self.at(PackageKw) {
            self.package_clause();
            self.top_level_terminator();
        } else {
            self.error_here("expected `package` clause");
        }

        while self.at(ImportKw) {
            self.import_decl();
            self.top_level_terminator();
        }

        while !self.at(Eof) {
            let before = self.tokens.len();
            match self.current() {
                Semicolon => {
                    self.bump();
                    continue;
                }
                FuncKw => self.func_decl(),
                VarKw | ConstKw | TypeKw => self.decl(),
                ImportKw => {
                    self.error_here("imports must appear before other declarations");
                    self.import_decl();
                }
                _ => {
                    self.error_here("expected declaration");
                    self.recover_to(&[Semicolon, FuncKw, VarKw, ConstKw, TypeKw]);
                }
            }
            self.top_level_terminator();
            self.ensure_progress(before);
        }

        self.eat_trivia();
        self.builder.finish_node();

        GoParse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    fn top_level_terminator(&mut self) {
        if self.at(Semicolon) {
            self.bump();
        } else if !self.at(Eof) {
            self.error_here("expected `;` or newline after declaration");
            self.recover_to(&[Semicolon, FuncKw, VarKw, ConstKw, TypeKw]);
            self.eat(Semicolon);
        }
    }

    // --- Declarations ---

    fn package_clause(&mut self) {
        self.start_node(PackageClause);
        self.bump();
        self.expect_name("expected package name");
        self.finish_node();
    }

    fn import_decl(&mut self) {
        self.start_node(ImportDecl);
        self.bump();
        if self.at(LParen) {
            self.group(Self::import_spec);
        } else {
            self.import_spec();
        }
        self.finish_node();
    }

    fn import_spec(&mut self) {
        self.start_node(ImportSpec);
        match self.current() {
            Ident => self.name(),
            Dot => self.bump(),
            _ => {}
        }
        if matches!(self.current(), StringLiteral | RawStringLiteral) {
            self.bump();
        } else {
            self.error_here("expected import path");
        }
        self.finish_node();
    }

    /// `( spec ; spec ; ... )`
    fn group(&mut self, spec: fn(&mut Self)) {
        self.bump();
        while !self.at(RParen) && !self.at(Eof) {
            if self.eat(Semicolon) {
                continue;
            }
            let before = self.tokens.len();
            spec(self);
            if !self.at(RParen) && !self.eat(Semicolon) {
                self.error_here("expected `;` or `)`");
                self.recover_to(&[Semicolon, RParen]);
            }
            self.ensure_progress(before);
        }
        self.expect(RParen, "expected `)`");
    }

    fn decl(&mut self) {
        let (node, spec): (SyntaxKind, fn(&mut Self)) = match self.current() {
            VarKw => (VarDecl, Self::value_spec),
            ConstKw => (ConstDecl, Self::value_spec),
            _ => (TypeDecl, Self::type_spec),
        };
        self.start_node(node);
        self.bump();
        if self.at(LParen) {
            self.group(spec);
        } else {
            spec(self);
        }
        self.finish_node();
    }

    fn value_spec(&mut self) {
        self.start_node(ValueSpec);
        self.expect_name("expected name");
        while self.eat(Comma) {
            self.expect_name("expected name");
        }
        if !matches!(self.current(), Eq | Semicolon | RParen | RBrace | Eof) {
            self.type_();
        }
        if self.eat(Eq) {
            self.expr_list();
        }
        self.finish_node();
    }

    fn type_spec(&mut self) {
        self.start_node(TypeSpec);
        self.expect_name("expected type name");
        if self.at(LBrack) && self.at_type_params() {
            self.type_param_list();
        }
        self.eat(Eq);
        self.type_();
        self.finish_node();
    }

    /// `type L[T any] ...` against the array type of `type A [N]int`.
    fn at_type_params(&self) -> bool {
        self.nth(1) == Ident
            && matches!(
                self.nth(2),
                Ident | Comma | Tilde | LBrack | MapKw | ChanKw | FuncKw | StructKw | InterfaceKw
            )
    }

    /// `[K comparable, V any]` after the name of a generic function or type.
    fn type_param_list(&mut self) {
        self.start_node(TypeParamList);
        self.bump();
        while !self.at(RBrack) && !self.at(Eof) {
            let before = self.tokens.len();
            self.start_node(TypeParam);
            self.expect_name("expected type parameter name");
            while self.eat(Comma) {
                self.expect_name("expected type parameter name");
            }
            self.constraint(false);
            self.finish_node();
            if !self.eat(Comma) {
                break;
            }
            self.ensure_progress(before);
        }
        self.expect(RBrack, "expected `]`");
        self.finish_node();
    }

    /// `~int | ~string`. A lone type without `~` stays a plain type when `bare_ok`.
    fn constraint(&mut self, bare_ok: bool) {
        let cp = self.checkpoint();
        let mut union = false;
        loop {
            union |= self.eat(Tilde);
            self.type_();
            if !self.eat(Pipe) {
                break;
            }
            union = true;
        }
        if union || !bare_ok {
            self.wrap(cp, Constraint);
        }
    }

    fn func_decl(&mut self) {
        self.start_node(FuncDecl);
        self.bump();
        if self.at(LParen) {
            self.start_node(Receiver);
            self.param_list();
            self.finish_node();
        }
        self.expect_name("expected function name");
        if self.at(LBrack) {
            self.type_param_list();
        }
        self.signature();
        if self.at(LBrace) {
            self.block();
        }
        self.finish_node();
    }

    fn signature(&mut self) {
        if self.at(LParen) {
            self.param_list();
        } else {
            self.error_here("expected parameter list");
        }
        if self.at(LParen) {
            self.start_node(FuncResult);
            self.param_list();
            self.finish_node();
        } else if self.at_type_start() {
            self.start_node(FuncResult);
            self.type_();
            self.finish_node();
        }
    }

    fn param_list(&mut self) {
        self.start_node(ParamList);
        self.bump();
        let named = self.params_are_named();
        while !self.at(RParen) && !self.at(Eof) {
            let before = self.tokens.len();
            self.param(named);
            if !self.eat(Comma) {
                break;
            }
            self.ensure_progress(before);
        }
        self.expect(RParen, "expected `)`");
        self.finish_node();
    }

    fn param(&mut self, named: bool) {
        self.start_node(Param);
        if named {
            self.expect_name("expected parameter name");
            // `a, b int` groups names in front of one type.
            while self.at(Comma) && self.nth(1) == Ident {
                self.bump();
                self.name();
            }
        }
        self.eat(Ellipsis);
        self.type_();
        self.finish_node();
    }

    /// Scans the rest of a parameter list: if any entry is `name Type`, every entry starts
    /// with a name; otherwise entries are bare types.
    fn params_are_named(&self) -> bool {
        let mut depth = 0usize;
        let mut segment: Vec<SyntaxKind> = Vec::with_capacity(2);
        for kind in self.lookahead() {
            match kind {
                LParen | LBrack | LBrace => depth += 1,
                RParen | RBrack | RBrace if depth == 0 => break,
                RParen | RBrack | RBrace => depth -= 1,
                Comma if depth == 0 => {
                    segment.clear();
                    continue;
                }
                _ => {}
            }
            if segment.len() < 2 {
                segment.push(kind);
                if segment.len() == 2 && segment[0] == Ident && segment[1] != Dot {
                    return true;
                }
            }
        }
        false
    }

    // --- Types ---

    fn at_type_start(&self) -> bool {
        matches!(
            self.current(),
            Ident | Star | LBrack | MapKw | ChanKw | FuncKw | StructKw | InterfaceKw | Arrow
        )
    }

    fn type_(&mut self) -> Option<SyntaxKind> {
        let kind = match self.current() {
            Ident => {
                self.start_node(TypeName);
                self.bump();
                if self.at(Dot) && self.nth(1) == Ident {
                    self.bump();
                    self.bump();
                }
                if self.at(LBrack) {
                    self.type_arg_list();
                }
                self.finish_node();
                TypeName
            }
            Star => {
                self.start_node(PointerType);
                self.bump();
                self.type_();
                self.finish_node();
                PointerType
            }
            LBrack => {
                let cp = self.checkpoint();
                self.bump();
                let kind = if self.eat(RBrack) {
                    SliceType
                } else {
                    if !self.eat(Ellipsis) {
                        let saved = std::mem::replace(&mut self.no_composite, false);
                        self.expr();
                        self.no_composite = saved;
                    }
                    self.expect(RBrack, "expected `]`");
                    ArrayType
                };
                self.type_();
                self.wrap(cp, kind);
                kind
            }
            MapKw => {
                self.start_node(MapType);
                self.bump();
                self.expect(LBrack, "expected `[`");
                self.type_();
                self.expect(RBrack, "expected `]`");
                self.type_();
                self.finish_node();
                MapType
            }
            ChanKw => {
                self.start_node(ChanType);
                self.bump();
                self.eat(Arrow);
                self.type_();
                self.finish_node();
                ChanType
            }
            Arrow => {
                self.start_node(ChanType);
                self.bump();
                self.expect(ChanKw, "expected `chan`");
                self.type_();
                self.finish_node();
                ChanType
            }
            FuncKw => {
                self.start_node(FuncType);
                self.bump();
                self.signature();
                self.finish_node();
                FuncType
            }
            StructKw => {
                self.struct_type();
                StructType
            }
            InterfaceKw => {
                self.interface_type();
                InterfaceType
            }
            _ => {
                self.error_here("expected type");
                return None;
            }
        };
        Some(kind)
    }

    /// `[int, string]` instantiating a generic type.
    fn type_arg_list(&mut self) {
        self.start_node(TypeArgList);
        self.bump();
        while !self.at(RBrack) && !self.at(Eof) {
            let before = self.tokens.len();
            self.type_();
            if !self.eat(Comma) {
                break;
            }
            self.ensure_progress(before);
        }
        self.expect(RBrack, "expected `]`");
        self.finish_node();
    }

    fn struct_type(&mut self) {
        self.start_node(StructType);
        self.bump();
        if self.expect(LBrace, "expected `{`") {
            self.member_list(Self::field_decl);
            self.expect(RBrace, "expected `}`");
        }
        self.finish_node();
    }

    fn field_decl(&mut self) {
        self.start_node(FieldDecl);
        let embedded = self.at(Star)
            || (self.at(Ident)
                && matches!(
                    self.nth(1),
                    Semicolon | RBrace | Dot | StringLiteral | RawStringLiteral
                ));
        if !embedded {
            self.expect_name("expected field name");
            while self.eat(Comma) {
                self.expect_name("expected field name");
            }
        }
        self.type_();
        if matches!(self.current(), StringLiteral | RawStringLiteral) {
            self.bump();
        }
        self.finish_node();
    }

    fn interface_type(&mut self) {
        self.start_node(InterfaceType);
        self.bump();
        if self.expect(LBrace, "expected `{`") {
            self.member_list(Self::interface_elem);
            self.expect(RBrace, "expected `}`");
        }
        self.finish_node();
    }

    fn interface_elem(&mut self) {
        if self.at(Ident) && self.nth(1) == LParen {
            self.start_node(MethodSpec);
            self.name();
            self.signature();
            self.finish_node();
        } else {
            self.constraint(true);
        }
    }

    /// `{ member ; member ... }` body of struct and interface types, without the braces.
    fn member_list(&mut self, member: fn(&mut Self)) {
        while !self.at(RBrace) && !self.at(Eof) {
            if self.eat(Semicolon) {
                continue;
            }
            let before = self.tokens.len();
            member(self);
            if !self.at(RBrace) && !self.eat(Semicolon) {
                self.error_here("expected `;` or `}`");
                self.recover_to(&[Semicolon, RBrace]);
            }
            self.ensure_progress(before);
        }
    }

    // --- Statements ---

    fn block(&mut self) {
        self.start_node(Block);
        self.expect(LBrace, "expected `{`");
        let saved = std::mem::replace(&mut self.no_composite, false);
        self.stmt_list(&[RBrace]);
        self.no_composite = saved;
        self.expect(RBrace, "expected `}`");
        self.finish_node();
    }

    fn stmt_list(&mut self, end: &[SyntaxKind]) {
        loop {
            let kind = self.current();
            if kind == Eof || end.contains(&kind) {
                break;
            }
            if kind == Semicolon {
                self.bump();
                continue;
            }

            let before = self.tokens.len();
            self.stmt();
            let kind = self.current();
            if kind == Semicolon {
                self.bump();
            } else if kind != Eof && !end.contains(&kind) {
                self.error_here("expected `;` or newline after statement");
                let mut recovery = vec![Semicolon];
                recovery.extend_from_slice(end);
                self.recover_to(&recovery);
            }
            self.ensure_progress(before);
        }
    }

    fn stmt(&mut self) {
        match self.current() {
            VarKw | ConstKw | TypeKw => {
                self.start_node(DeclStmt);
                self.decl();
                self.finish_node();
            }
            ReturnKw => {
                self.start_node(ReturnStmt);
                self.bump();
                if !self.at_stmt_end() {
                    self.expr_list();
                }
                self.finish_node();
            }
            IfKw => self.if_stmt(),
            ForKw => self.for_stmt(),
            SwitchKw => self.switch_stmt(),
            SelectKw => self.select_stmt(),
            LBrace => self.block(),
            DeferKw | GoKw => {
                let kind = if self.at(DeferKw) { DeferStmt } else { GoStmt };
                self.start_node(kind);
                self.bump();
                self.expr();
                self.finish_node();
            }
            BreakKw | ContinueKw | GotoKw => {
                self.start_node(BranchStmt);
                self.bump();
                if self.at(Ident) {
                    self.bump();
                }
                self.finish_node();
            }
            FallthroughKw => {
                self.start_node(BranchStmt);
                self.bump();
                self.finish_node();
            }
            Ident if self.nth(1) == Colon => {
                self.start_node(LabeledStmt);
                self.name();
                self.bump();
                if !self.at_stmt_end() {
                    self.stmt();
                }
                self.finish_node();
            }
            _ => {
                if let SimpleStmt::Expr(cp) = self.simple_stmt(false) {
                    self.wrap(cp, ExprStmt);
                }
            }
        }
    }

    fn at_stmt_end(&self) -> bool {
        matches!(
            self.current(),
            Semicolon | RBrace | Eof | CaseKw | DefaultKw
        )
    }

    fn simple_stmt(&mut self, range_ok: bool) -> SimpleStmt {
        let cp = self.checkpoint();
        if range_ok && self.at(RangeKw) {
            self.bump();
            self.expr();
            self.wrap(cp, RangeClause);
            return SimpleStmt::Range;
        }

        self.expr();
        let mut count = 1;
        while self.eat(Comma) {
            self.expr();
            count += 1;
        }

        let op = self.current();
        if op.is_assign_op() {
            self.wrap(cp, ExprList);
            self.bump();
            if range_ok && matches!(op, Eq | ColonEq) && self.at(RangeKw) {
                self.bump();
                self.expr();
                self.wrap(cp, RangeClause);
                return SimpleStmt::Range;
            }
            self.expr_list();
            self.wrap(cp, AssignStmt);
            return SimpleStmt::Other;
        }

        if count > 1 {
            self.wrap(cp, ExprList);
            self.error_here("expected `:=` or `=` after expression list");
            self.wrap(cp, ExprStmt);
            return SimpleStmt::Other;
        }

        match op {
            PlusPlus | MinusMinus => {
                self.bump();
                self.wrap(cp, IncDecStmt);
                SimpleStmt::Other
            }
            Arrow => {
                self.bump();
                self.expr();
                self.wrap(cp, SendStmt);
                SimpleStmt::Other
            }
            _ => SimpleStmt::Expr(cp),
        }
    }

    fn if_stmt(&mut self) {
        self.start_node(IfStmt);
        self.bump();

        let saved = std::mem::replace(&mut self.no_composite, true);
        if self.at(LBrace) {
            self.error_here("missing condition in if statement");
        } else if self.eat(Semicolon) {
            self.expr();
        } else {
            match self.simple_stmt(false) {
                SimpleStmt::Expr(cp) => {
                    if self.at(Semicolon) {
                        self.wrap(cp, ExprStmt);
                        self.bump();
                        self.expr();
                    }
                }
                _ => {
                    if self.expect(Semicolon, "expected condition after init statement") {
                        self.expr();
                    }
                }
            }
        }
        self.no_composite = saved;

        if self.at(LBrace) {
            self.block();
        } else {
            self.error_here("expected `{` after if condition");
        }

        if self.eat(ElseKw) {
            match self.current() {
                IfKw => self.if_stmt(),
                LBrace => self.block(),
                _ => self.error_here("expected `if` or `{` after `else`"),
            }
        }
        self.finish_node();
    }

    fn for_stmt(&mut self) {
        self.start_node(ForStmt);
        self.bump();

        let saved = std::mem::replace(&mut self.no_composite, true);
        if !self.at(LBrace) {
            let cp = self.checkpoint();
            if self.at(Semicolon) {
                self.for_clause_rest(cp);
            } else {
                match self.simple_stmt(true) {
                    SimpleStmt::Range => {}
                    SimpleStmt::Expr(expr_cp) => {
                        if self.at(Semicolon) {
                            self.wrap(expr_cp, ExprStmt);
                            self.for_clause_rest(cp);
                        }
                    }
                    SimpleStmt::Other => self.for_clause_rest(cp),
                }
            }
        }
        self.no_composite = saved;

        if self.at(LBrace) {
            self.block();
        } else {
            self.error_here("expected `{` after for clause");
        }
        self.finish_node();
    }

    /// `; cond ; post` after the init statement of a three-clause `for`.
    fn for_clause_rest(&mut self, cp: Checkpoint) {
        self.expect(Semicolon, "expected `;` in for clause");
        if !self.at(Semicolon) {
            self.expr();
        }
        self.expect(Semicolon, "expected `;` in for clause");
        if !self.at(LBrace) {
            if let SimpleStmt::Expr(expr_cp) = self.simple_stmt(false) {
                self.wrap(expr_cp, ExprStmt);
            }
        }
        self.wrap(cp, ForClause);
    }

    fn switch_stmt(&mut self) {
        self.start_node(SwitchStmt);
        self.bump();

        let saved = std::mem::replace(&mut self.no_composite, true);
        if self.eat(Semicolon) {
            if !self.at(LBrace) {
                self.switch_tag();
            }
        } else if !self.at(LBrace) {
            match self.simple_stmt(false) {
                SimpleStmt::Expr(cp) => {
                    if self.at(Semicolon) {
                        self.wrap(cp, ExprStmt);
                        self.bump();
                        if !self.at(LBrace) {
                            self.switch_tag();
                        }
                    }
                }
                _ => {
                    if self.eat(Semicolon) && !self.at(LBrace) {
                        self.switch_tag();
                    }
                }
            }
        }
        self.no_composite = saved;

        if self.expect(LBrace, "expected `{` after switch header") {
            self.clauses(Self::case_clause);
        }
        self.finish_node();
    }

    /// `case`/`default` clauses up to and including the closing brace.
    fn clauses(&mut self, clause: fn(&mut Self)) {
        while !self.at(RBrace) && !self.at(Eof) {
            if self.eat(Semicolon) {
                continue;
            }
            if matches!(self.current(), CaseKw | DefaultKw) {
                clause(self);
            } else {
                self.error_here("expected `case` or `default`");
                self.recover_to(&[CaseKw, DefaultKw, RBrace]);
            }
        }
        self.expect(RBrace, "expected `}`");
    }

    /// Tag expression, or the `v := x.(type)` guard of a type switch.
    fn switch_tag(&mut self) {
        // A lone expression stays bare; the guard becomes an `AssignStmt`.
        let _ = self.simple_stmt(false);
    }

    fn case_clause(&mut self) {
        self.start_node(CaseClause);
        if self.eat(CaseKw) {
            self.expr_list();
        } else {
            self.bump();
        }
        self.expect(Colon, "expected `:`");
        self.stmt_list(&[CaseKw, DefaultKw, RBrace]);
        self.finish_node();
    }

    fn select_stmt(&mut self) {
        self.start_node(SelectStmt);
        self.bump();
        if self.expect(LBrace, "expected `{` after `select`") {
            self.clauses(Self::comm_clause);
        }
        self.finish_node();
    }

    /// `case v := <-ch:`, `case ch <- v:`, `case <-ch:` or `default:`.
    fn comm_clause(&mut self) {
        self.start_node(CommClause);
        if self.eat(CaseKw) {
            if let SimpleStmt::Expr(cp) = self.simple_stmt(false) {
                self.wrap(cp, ExprStmt);
            }
        } else {
            self.bump();
        }
        self.expect(Colon, "expected `:`");
        self.stmt_list(&[CaseKw, DefaultKw, RBrace]);
        self.finish_node();
    }

    // --- Expressions ---

    fn expr_list(&mut self) {
        self.start_node(ExprList);
        self.expr();
        while self.eat(Comma) {
            self.expr();
        }
        self.finish_node();
    }

    fn expr(&mut self) {
        self.binary_expr(1);
    }

    fn binary_expr(&mut self, min_prec: u8) {
        let cp = self.checkpoint();
        self.unary_expr();
        loop {
            let prec = self.current().binary_precedence();
            if prec == 0 || prec < min_prec {
                break;
            }
            self.bump();
            self.binary_expr(prec + 1);
            self.wrap(cp, BinaryExpr);
        }
    }

    fn unary_expr(&mut self) {
        match self.current() {
            Arrow if self.nth(1) == ChanKw => {
                self.type_();
            }
            Plus | Minus | Bang | Caret | Star | Amp | Arrow | Tilde => {
                self.start_node(UnaryExpr);
                self.bump();
                self.unary_expr();
                self.finish_node();
            }
            _ => self.primary_expr(),
        }
    }

    fn primary_expr(&mut self) {
        let cp = self.checkpoint();
        let Some(mut kind) = self.operand() else {
            return;
        };
        let mut literal_type = matches!(kind, NameRef | ArrayType | SliceType | MapType | StructType);
        let mut type_literal = matches!(kind, ArrayType | SliceType | MapType | StructType);

        loop {
            let next = match self.current() {
                Dot => {
                    self.bump();
                    if self.eat(LParen) {
                        if !self.eat(TypeKw) {
                            self.type_();
                        }
                        self.expect(RParen, "expected `)`");
                        TypeAssertExpr
                    } else {
                        self.expect(Ident, "expected field or method name");
                        SelectorExpr
                    }
                }
                LParen => {
                    self.arg_list();
                    CallExpr
                }
                LBrack => self.index_or_slice(),
                LBrace if literal_type && (type_literal || !self.no_composite) => {
                    self.literal_value();
                    CompositeLit
                }
                _ => break,
            };
            // `pkg.T{}` and `List[int]{}` still name a type.
            literal_type = (next == SelectorExpr && kind == NameRef)
                || (next == IndexExpr && matches!(kind, NameRef | SelectorExpr));
            type_literal = false;
            kind = next;
            self.wrap(cp, kind);
        }
    }

    fn operand(&mut self) -> Option<SyntaxKind> {
        let kind = match self.current() {
            Ident => {
                self.start_node(NameRef);
                self.bump();
                self.finish_node();
                NameRef
            }
            kind if kind.is_literal() => {
                self.start_node(Literal);
                self.bump();
                self.finish_node();
                Literal
            }
            LParen => {
                self.start_node(ParenExpr);
                self.bump();
                let saved = std::mem::replace(&mut self.no_composite, false);
                self.expr();
                self.no_composite = saved;
                self.expect(RParen, "expected `)`");
                self.finish_node();
                ParenExpr
            }
            FuncKw => self.func_lit_or_type(),
            LBrack | MapKw | ChanKw | StructKw | InterfaceKw => self.type_()?,
            _ => {
                self.error_here("expected expression");
                if !matches!(
                    self.current(),
                    Semicolon | Comma | Colon | RParen | RBrack | LBrace | RBrace | Eof
                ) {
                    self.start_node(Error);
                    self.bump();
                    self.finish_node();
                }
                return None;
            }
        };
        Some(kind)
    }

    fn func_lit_or_type(&mut self) -> SyntaxKind {
        let cp = self.checkpoint();
        self.bump();
        self.signature();
        let kind = if self.at(LBrace) {
            self.block();
            FuncLit
        } else {
            FuncType
        };
        self.wrap(cp, kind);
        kind
    }

    fn arg_list(&mut self) {
        self.start_node(ArgList);
        self.bump();
        let saved = std::mem::replace(&mut self.no_composite, false);
        while !self.at(RParen) && !self.at(Eof) {
            let before = self.tokens.len();
            self.expr();
            self.eat(Ellipsis);
            if !self.eat(Comma) {
                break;
            }
            self.ensure_progress(before);
        }
        self.no_composite = saved;
        self.expect(RParen, "expected `)`");
        self.finish_node();
    }

    fn index_or_slice(&mut self) -> SyntaxKind {
        self.bump();
        let saved = std::mem::replace(&mut self.no_composite, false);
        let mut kind = IndexExpr;
        if !self.at(Colon) {
            self.expr();
            // `Pair[int, string]` instantiates a generic function or type.
            while self.eat(Comma) && !self.at(RBrack) {
                self.expr();
            }
        }
        while self.eat(Colon) {
            kind = SliceExpr;
            if !self.at(Colon) && !self.at(RBrack) {
                self.expr();
            }
        }
        self.no_composite = saved;
        self.expect(RBrack, "expected `]`");
        kind
    }

    fn literal_value(&mut self) {
        self.start_node(LiteralValue);
        self.bump();
        let saved = std::mem::replace(&mut self.no_composite, false);
        while !self.at(RBrace) && !self.at(Eof) {
            let before = self.tokens.len();
            let cp = self.checkpoint();
            self.element();
            if self.eat(Colon) {
                self.element();
                self.wrap(cp, KeyedElement);
            }
            if !self.eat(Comma) {
                break;
            }
            self.ensure_progress(before);
        }
        self.no_composite = saved;
        self.expect(RBrace, "expected `}`");
        self.finish_node();
    }

    fn element(&mut self) {
        if self.at(LBrace) {
            self.literal_value();
        } else {
            self.expr();
        }
    }

    // --- Token plumbing ---

    fn lookahead(&self) -> impl Iterator<Item = SyntaxKind> + '_ {
        self.tokens
            .iter()
            .map(|t| t.kind)
            .filter(|kind| !kind.is_trivia())
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.lookahead().nth(n).unwrap_or(Eof)
    }

    fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind, message: &str) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error_here(message);
            false
        }
    }

    fn name(&mut self) {
        self.start_node(Name);
        self.bump();
        self.finish_node();
    }

    fn expect_name(&mut self, message: &str) {
        if self.at(Ident) {
            self.name();
        } else {
            self.error_here(message);
        }
    }

    fn eat_trivia(&mut self) {
        while self.tokens.front().is_some_and(|t| t.kind.is_trivia()) {
            self.bump_any();
        }
    }

    fn bump(&mut self) {
        self.eat_trivia();
        self.bump_any();
    }

    fn bump_any(&mut self) {
        if let Some(tok) = self.tokens.pop_front() {
            self.builder.token(tok.kind.into(), tok.text(self.input));
        }
    }

    fn start_node(&mut self, kind: SyntaxKind) {
        self.eat_trivia();
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.eat_trivia();
        self.builder.checkpoint()
    }

    /// Wraps everything produced since `cp` in a node of `kind`.
    fn wrap(&mut self, cp: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(cp, kind.into());
        self.builder.finish_node();
    }

    fn recover_to(&mut self, recovery: &[SyntaxKind]) {
        let kind = self.current();
        if kind == Eof || recovery.contains(&kind) {
            return;
        }
        self.start_node(Error);
        while !self.at(Eof) && !recovery.contains(&self.current()) {
            self.bump();
        }
        self.finish_node();
    }

    /// Loops that parse lists call this so a token nobody accepts cannot stall them.
    fn ensure_progress(&mut self, before: usize) {
        if self.tokens.len() == before && !self.at(Eof) {
            self.start_node(Error);
            self.bump();
            self.finish_node();
        }
    }

    fn error_here(&mut self, message: &str) {
        let range = self.current_range();
        self.errors.push(ParseError {
            message: message.to_string(),
            range,
        });
    }

    fn current_range(&self) -> TextRange {
        self.tokens
            .iter()
            .find(|t| !t.kind.is_trivia())
            .map(|t| t.range)
            .unwrap_or_else(|| TextRange::empty(TextSize::of(self.input)))
    }
}
