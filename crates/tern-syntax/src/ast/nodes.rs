use crate::ast::{support, AstNode};
use crate::syntax_kind::SyntaxKind;
use crate::{SyntaxNode, SyntaxToken};

ast_node! {
    SourceFile,
    PackageClause,
    ImportDecl,
    ImportSpec,
    FuncDecl,
    Receiver,
    ParamList,
    Param,
    FuncResult,
    VarDecl,
    ConstDecl,
    TypeDecl,
    ValueSpec,
    TypeSpec,
    /// Identifier introduced by a declaration.
    Name,
    Block,
    DeclStmt,
    AssignStmt,
    IncDecStmt,
    SendStmt,
    ExprStmt,
    ReturnStmt,
    IfStmt,
    ForStmt,
    ForClause,
    RangeClause,
    SwitchStmt,
    CaseClause,
    SelectStmt,
    CommClause,
    DeferStmt,
    GoStmt,
    BranchStmt,
    LabeledStmt,
    ExprList,
    /// Identifier used in expression position.
    NameRef,
    Literal,
    CompositeLit,
    LiteralValue,
    KeyedElement,
    FuncLit,
    ParenExpr,
    SelectorExpr,
    IndexExpr,
    SliceExpr,
    TypeAssertExpr,
    CallExpr,
    ArgList,
    UnaryExpr,
    BinaryExpr,
    TypeName,
    PointerType,
    SliceType,
    ArrayType,
    MapType,
    ChanType,
    FuncType,
    StructType,
    FieldDecl,
    InterfaceType,
    MethodSpec,
    TypeParamList,
    TypeParam,
    /// `~int | string` union, the bound of a type parameter or an interface element.
    Constraint,
    TypeArgList,
}

ast_enum! {
    /// Top-level declaration.
    Decl { FuncDecl, VarDecl, ConstDecl, TypeDecl }
}

ast_enum! {
    Stmt {
        DeclStmt,
        AssignStmt,
        IncDecStmt,
        SendStmt,
        ExprStmt,
        ReturnStmt,
        IfStmt,
        ForStmt,
        SwitchStmt,
        SelectStmt,
        Block,
        DeferStmt,
        GoStmt,
        BranchStmt,
        LabeledStmt,
    }
}

ast_enum! {
    /// Statements allowed in the init/post position of `if`, `for` and `switch` headers.
    SimpleStmt { AssignStmt, IncDecStmt, SendStmt, ExprStmt }
}

ast_enum! {
    TypeRef {
        TypeName,
        PointerType,
        SliceType,
        ArrayType,
        MapType,
        ChanType,
        FuncType,
        StructType,
        InterfaceType,
    }
}

ast_enum! {
    /// Go treats types as expressions (conversions, `make([]T, n)`), so type nodes cast too.
    Expr {
        NameRef,
        Literal,
        CompositeLit,
        FuncLit,
        ParenExpr,
        SelectorExpr,
        IndexExpr,
        SliceExpr,
        TypeAssertExpr,
        CallExpr,
        UnaryExpr,
        BinaryExpr,
        TypeRef,
    }
}

ast_enum! {
    /// One entry of a composite literal's `{ ... }`.
    Element { KeyedElement, LiteralValue, Expr }
}

fn ident_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    support::token(node, SyntaxKind::Ident)
}

// --- Declarations ---

impl SourceFile {
    pub fn package(&self) -> Option<PackageClause> {
        support::child(&self.syntax)
    }

    pub fn package_name(&self) -> Option<String> {
        self.package()?.name().map(|n| n.text())
    }

    pub fn imports(&self) -> impl Iterator<Item = ImportDecl> + '_ {
        support::children(&self.syntax)
    }

    pub fn decls(&self) -> impl Iterator<Item = Decl> + '_ {
        support::children(&self.syntax)
    }
}

impl PackageClause {
    pub fn name(&self) -> Option<Name> {
        support::child(&self.syntax)
    }
}

impl ImportDecl {
    pub fn specs(&self) -> impl Iterator<Item = ImportSpec> + '_ {
        support::children(&self.syntax)
    }
}

impl ImportSpec {
    /// Explicit local name (`import f "fmt"`).
    pub fn alias(&self) -> Option<Name> {
        support::child(&self.syntax)
    }

    pub fn is_dot_import(&self) -> bool {
        support::token(&self.syntax, SyntaxKind::Dot).is_some()
    }

    pub fn path_token(&self) -> Option<SyntaxToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|tok| {
                matches!(
                    tok.kind(),
                    SyntaxKind::StringLiteral | SyntaxKind::RawStringLiteral
                )
            })
    }

    /// Import path without quotes.
    pub fn path(&self) -> Option<String> {
        let token = self.path_token()?;
        Some(token.text().trim_matches(['"', '`']).to_string())
    }

    /// Name the import is referred to by in the file.
    pub fn local_name(&self) -> Option<String> {
        if let Some(alias) = self.alias() {
            return Some(alias.text());
        }
        let path = self.path()?;
        Some(path.rsplit('/').next().unwrap_or(&path).to_string())
    }
}

impl FuncDecl {
    pub fn receiver(&self) -> Option<Receiver> {
        support::child(&self.syntax)
    }

    pub fn name(&self) -> Option<Name> {
        support::child(&self.syntax)
    }

    pub fn type_params(&self) -> Option<TypeParamList> {
        support::child(&self.syntax)
    }

    pub fn param_list(&self) -> Option<ParamList> {
        support::child(&self.syntax)
    }

    pub fn result(&self) -> Option<FuncResult> {
        support::child(&self.syntax)
    }

    pub fn body(&self) -> Option<Block> {
        support::child(&self.syntax)
    }
}

impl Receiver {
    pub fn param_list(&self) -> Option<ParamList> {
        support::child(&self.syntax)
    }

    pub fn param(&self) -> Option<Param> {
        self.param_list()?.params().next()
    }
}

impl ParamList {
    pub fn params(&self) -> impl Iterator<Item = Param> + '_ {
        support::children(&self.syntax)
    }
}

impl Param {
    pub fn names(&self) -> impl Iterator<Item = Name> + '_ {
        support::children(&self.syntax)
    }

    pub fn ty(&self) -> Option<TypeRef> {
        support::child(&self.syntax)
    }

    pub fn is_variadic(&self) -> bool {
        support::token(&self.syntax, SyntaxKind::Ellipsis).is_some()
    }
}

impl FuncResult {
    /// Parenthesised results: `(int, error)` or `(n int, err error)`.
    pub fn param_list(&self) -> Option<ParamList> {
        support::child(&self.syntax)
    }

    /// A single unparenthesised result type.
    pub fn ty(&self) -> Option<TypeRef> {
        support::child(&self.syntax)
    }
}

impl VarDecl {
    pub fn specs(&self) -> impl Iterator<Item = ValueSpec> + '_ {
        support::children(&self.syntax)
    }
}

impl ConstDecl {
    pub fn specs(&self) -> impl Iterator<Item = ValueSpec> + '_ {
        support::children(&self.syntax)
    }
}

impl TypeDecl {
    pub fn specs(&self) -> impl Iterator<Item = TypeSpec> + '_ {
        support::children(&self.syntax)
    }
}

impl ValueSpec {
    pub fn names(&self) -> impl Iterator<Item = Name> + '_ {
        support::children(&self.syntax)
    }

    pub fn ty(&self) -> Option<TypeRef> {
        support::child(&self.syntax)
    }

    pub fn values(&self) -> Option<ExprList> {
        support::child(&self.syntax)
    }
}

impl TypeSpec {
    pub fn name(&self) -> Option<Name> {
        support::child(&self.syntax)
    }

    pub fn type_params(&self) -> Option<TypeParamList> {
        support::child(&self.syntax)
    }

    pub fn ty(&self) -> Option<TypeRef> {
        support::child(&self.syntax)
    }

    pub fn is_alias(&self) -> bool {
        support::token(&self.syntax, SyntaxKind::Eq).is_some()
    }
}

impl Name {
    pub fn ident_token(&self) -> Option<SyntaxToken> {
        ident_token(&self.syntax)
    }

    pub fn text(&self) -> String {
        self.ident_token()
            .map(|tok| tok.text().to_string())
            .unwrap_or_default()
    }
}

// --- Statements ---

impl Block {
    pub fn stmts(&self) -> impl Iterator<Item = Stmt> + '_ {
        support::children(&self.syntax)
    }
}

impl DeclStmt {
    pub fn decl(&self) -> Option<Decl> {
        support::child(&self.syntax)
    }
}

impl AssignStmt {
    pub fn lhs(&self) -> Option<ExprList> {
        support::child(&self.syntax)
    }

    pub fn rhs(&self) -> Option<ExprList> {
        support::children(&self.syntax).nth(1)
    }

    pub fn op_token(&self) -> Option<SyntaxToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|tok| tok.kind().is_assign_op())
    }

    /// `true` for short variable declarations (`:=`).
    pub fn is_define(&self) -> bool {
        self.op_token()
            .is_some_and(|tok| tok.kind() == SyntaxKind::ColonEq)
    }
}

impl ExprList {
    pub fn exprs(&self) -> impl Iterator<Item = Expr> + '_ {
        support::children(&self.syntax)
    }
}

impl IncDecStmt {
    pub fn expr(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }
}

impl SendStmt {
    pub fn channel(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }

    pub fn value(&self) -> Option<Expr> {
        support::children(&self.syntax).nth(1)
    }
}

impl ExprStmt {
    pub fn expr(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }
}

impl ReturnStmt {
    pub fn values(&self) -> Option<ExprList> {
        support::child(&self.syntax)
    }
}

impl IfStmt {
    pub fn init(&self) -> Option<SimpleStmt> {
        support::token(&self.syntax, SyntaxKind::Semicolon)?;
        support::children_before(&self.syntax, SyntaxKind::Semicolon).next()
    }

    pub fn condition(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }

    pub fn then_branch(&self) -> Option<Block> {
        support::child(&self.syntax)
    }

    /// Either a nested `IfStmt` or a `Block`.
    pub fn else_branch(&self) -> Option<Stmt> {
        support::children_after(&self.syntax, SyntaxKind::ElseKw).next()
    }
}

impl ForStmt {
    pub fn clause(&self) -> Option<ForClause> {
        support::child(&self.syntax)
    }

    pub fn range_clause(&self) -> Option<RangeClause> {
        support::child(&self.syntax)
    }

    /// Condition of `for cond { }`.
    pub fn condition(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }

    pub fn body(&self) -> Option<Block> {
        support::child(&self.syntax)
    }
}

impl ForClause {
    pub fn init(&self) -> Option<SimpleStmt> {
        support::children_before(&self.syntax, SyntaxKind::Semicolon).next()
    }

    pub fn condition(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }

    pub fn post(&self) -> Option<SimpleStmt> {
        let mut semis = 0;
        self.syntax
            .children_with_tokens()
            .filter(|it| {
                if it.kind() == SyntaxKind::Semicolon {
                    semis += 1;
                }
                semis == 2
            })
            .filter_map(|it| it.into_node())
            .find_map(SimpleStmt::cast)
    }
}

impl RangeClause {
    pub fn lhs(&self) -> Option<ExprList> {
        support::child(&self.syntax)
    }

    pub fn is_define(&self) -> bool {
        support::token(&self.syntax, SyntaxKind::ColonEq).is_some()
    }

    pub fn expr(&self) -> Option<Expr> {
        support::children_after(&self.syntax, SyntaxKind::RangeKw).next()
    }
}

impl SwitchStmt {
    fn header(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        let has_init = support::token(&self.syntax, SyntaxKind::Semicolon).is_some();
        let mut seen_semi = !has_init;
        self.syntax
            .children_with_tokens()
            .take_while(|it| it.kind() != SyntaxKind::LBrace)
            .filter(move |it| {
                if it.kind() == SyntaxKind::Semicolon {
                    seen_semi = true;
                }
                seen_semi
            })
            .filter_map(|it| it.into_node())
    }

    pub fn init(&self) -> Option<SimpleStmt> {
        support::token(&self.syntax, SyntaxKind::Semicolon)?;
        support::children_before(&self.syntax, SyntaxKind::Semicolon).next()
    }

    /// Tag expression of an expression switch, or the `x.(type)` of a type switch
    /// without a binding.
    pub fn tag(&self) -> Option<Expr> {
        self.header().find_map(Expr::cast)
    }

    /// `v := x.(type)` guard of a type switch.
    pub fn guard(&self) -> Option<AssignStmt> {
        self.header().find_map(AssignStmt::cast)
    }

    pub fn clauses(&self) -> impl Iterator<Item = CaseClause> + '_ {
        support::children(&self.syntax)
    }
}

impl CaseClause {
    pub fn values(&self) -> Option<ExprList> {
        support::child(&self.syntax)
    }

    pub fn is_default(&self) -> bool {
        support::token(&self.syntax, SyntaxKind::DefaultKw).is_some()
    }

    pub fn stmts(&self) -> impl Iterator<Item = Stmt> + '_ {
        support::children(&self.syntax)
    }
}

impl SelectStmt {
    pub fn clauses(&self) -> impl Iterator<Item = CommClause> + '_ {
        support::children(&self.syntax)
    }
}

impl CommClause {
    /// The send or receive after `case`; `None` for `default`.
    pub fn comm(&self) -> Option<SimpleStmt> {
        support::children_before(&self.syntax, SyntaxKind::Colon).next()
    }

    pub fn is_default(&self) -> bool {
        support::token(&self.syntax, SyntaxKind::DefaultKw).is_some()
    }

    pub fn stmts(&self) -> impl Iterator<Item = Stmt> + '_ {
        support::children_after(&self.syntax, SyntaxKind::Colon)
    }
}

impl DeferStmt {
    pub fn call(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }
}

impl GoStmt {
    pub fn call(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }
}

impl LabeledStmt {
    pub fn label(&self) -> Option<Name> {
        support::child(&self.syntax)
    }

    pub fn stmt(&self) -> Option<Stmt> {
        support::child(&self.syntax)
    }
}

// --- Expressions ---

impl NameRef {
    pub fn ident_token(&self) -> Option<SyntaxToken> {
        ident_token(&self.syntax)
    }

    pub fn text(&self) -> String {
        self.ident_token()
            .map(|tok| tok.text().to_string())
            .unwrap_or_default()
    }
}

impl Literal {
    pub fn token(&self) -> Option<SyntaxToken> {
        support::first_significant_token(&self.syntax)
    }

    pub fn kind(&self) -> Option<SyntaxKind> {
        self.token().map(|tok| tok.kind())
    }
}

impl CompositeLit {
    /// `T`, `pkg.T` or a type literal in front of the braces.
    pub fn type_expr(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }

    pub fn literal_value(&self) -> Option<LiteralValue> {
        support::child(&self.syntax)
    }
}

impl LiteralValue {
    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        support::children(&self.syntax)
    }
}

impl KeyedElement {
    pub fn key(&self) -> Option<Element> {
        support::child(&self.syntax)
    }

    pub fn value(&self) -> Option<Element> {
        support::children(&self.syntax).nth(1)
    }
}

impl FuncLit {
    pub fn param_list(&self) -> Option<ParamList> {
        support::child(&self.syntax)
    }

    pub fn result(&self) -> Option<FuncResult> {
        support::child(&self.syntax)
    }

    pub fn body(&self) -> Option<Block> {
        support::child(&self.syntax)
    }
}

impl ParenExpr {
    pub fn expr(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }
}

impl SelectorExpr {
    pub fn expr(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }

    pub fn field_token(&self) -> Option<SyntaxToken> {
        ident_token(&self.syntax)
    }
}

impl IndexExpr {
    pub fn base(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }

    /// Every entry of `f[int, string]`; a plain index has one.
    pub fn indices(&self) -> impl Iterator<Item = Expr> + '_ {
        support::children_after(&self.syntax, SyntaxKind::LBrack)
    }
}

impl SliceExpr {
    pub fn base(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }

    pub fn bounds(&self) -> impl Iterator<Item = Expr> + '_ {
        support::children_after(&self.syntax, SyntaxKind::LBrack)
    }
}

impl TypeAssertExpr {
    pub fn expr(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }

    pub fn ty(&self) -> Option<TypeRef> {
        support::children_after(&self.syntax, SyntaxKind::LParen).next()
    }

    /// `x.(type)` in a type switch header.
    pub fn is_type_switch(&self) -> bool {
        support::token(&self.syntax, SyntaxKind::TypeKw).is_some()
    }
}

impl CallExpr {
    pub fn callee(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }

    pub fn arg_list(&self) -> Option<ArgList> {
        support::child(&self.syntax)
    }

    pub fn args(&self) -> Vec<Expr> {
        self.arg_list()
            .map(|list| list.args().collect())
            .unwrap_or_default()
    }
}

impl ArgList {
    pub fn args(&self) -> impl Iterator<Item = Expr> + '_ {
        support::children(&self.syntax)
    }

    /// `f(xs...)`
    pub fn has_ellipsis(&self) -> bool {
        support::token(&self.syntax, SyntaxKind::Ellipsis).is_some()
    }
}

impl UnaryExpr {
    pub fn op_token(&self) -> Option<SyntaxToken> {
        support::first_significant_token(&self.syntax)
    }

    pub fn op_kind(&self) -> Option<SyntaxKind> {
        self.op_token().map(|tok| tok.kind())
    }

    pub fn operand(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }
}

impl BinaryExpr {
    pub fn lhs(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }

    pub fn rhs(&self) -> Option<Expr> {
        support::children(&self.syntax).nth(1)
    }

    pub fn op_token(&self) -> Option<SyntaxToken> {
        support::first_significant_token(&self.syntax)
    }

    pub fn op_kind(&self) -> Option<SyntaxKind> {
        self.op_token().map(|tok| tok.kind())
    }
}

// --- Types ---

impl TypeName {
    /// Package qualifier of `pkg.T`.
    pub fn qualifier(&self) -> Option<SyntaxToken> {
        let mut idents = support::tokens(&self.syntax, SyntaxKind::Ident);
        let first = idents.next()?;
        idents.next().map(|_| first)
    }

    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::tokens(&self.syntax, SyntaxKind::Ident).last()
    }

    pub fn type_args(&self) -> Option<TypeArgList> {
        support::child(&self.syntax)
    }
}

impl PointerType {
    pub fn elem(&self) -> Option<TypeRef> {
        support::child(&self.syntax)
    }
}

impl SliceType {
    pub fn elem(&self) -> Option<TypeRef> {
        support::child(&self.syntax)
    }
}

impl ArrayType {
    /// Length expression; `None` for `[...]T`.
    pub fn len(&self) -> Option<Expr> {
        support::children_before(&self.syntax, SyntaxKind::RBrack).next()
    }

    pub fn elem(&self) -> Option<TypeRef> {
        support::children_after(&self.syntax, SyntaxKind::RBrack).next()
    }
}

impl MapType {
    pub fn key(&self) -> Option<TypeRef> {
        support::child(&self.syntax)
    }

    pub fn value(&self) -> Option<TypeRef> {
        support::children(&self.syntax).nth(1)
    }
}

impl ChanType {
    pub fn elem(&self) -> Option<TypeRef> {
        support::child(&self.syntax)
    }

    /// `<-chan T`
    pub fn is_recv_only(&self) -> bool {
        support::first_significant_token(&self.syntax)
            .is_some_and(|tok| tok.kind() == SyntaxKind::Arrow)
    }

    /// `chan<- T`
    pub fn is_send_only(&self) -> bool {
        !self.is_recv_only() && support::token(&self.syntax, SyntaxKind::Arrow).is_some()
    }
}

impl FuncType {
    pub fn param_list(&self) -> Option<ParamList> {
        support::child(&self.syntax)
    }

    pub fn result(&self) -> Option<FuncResult> {
        support::child(&self.syntax)
    }
}

impl StructType {
    pub fn fields(&self) -> impl Iterator<Item = FieldDecl> + '_ {
        support::children(&self.syntax)
    }
}

impl FieldDecl {
    pub fn names(&self) -> impl Iterator<Item = Name> + '_ {
        support::children(&self.syntax)
    }

    pub fn ty(&self) -> Option<TypeRef> {
        support::child(&self.syntax)
    }

    pub fn is_embedded(&self) -> bool {
        self.names().next().is_none()
    }
}

impl InterfaceType {
    pub fn methods(&self) -> impl Iterator<Item = MethodSpec> + '_ {
        support::children(&self.syntax)
    }

    pub fn embedded(&self) -> impl Iterator<Item = TypeRef> + '_ {
        support::children(&self.syntax)
    }
}

impl MethodSpec {
    pub fn name(&self) -> Option<Name> {
        support::child(&self.syntax)
    }

    pub fn param_list(&self) -> Option<ParamList> {
        support::child(&self.syntax)
    }

    pub fn result(&self) -> Option<FuncResult> {
        support::child(&self.syntax)
    }
}

impl TypeParamList {
    pub fn params(&self) -> impl Iterator<Item = TypeParam> + '_ {
        support::children(&self.syntax)
    }

    /// Parameter names in declaration order.
    pub fn names(&self) -> Vec<Name> {
        self.params().flat_map(|param| param.names().collect::<Vec<_>>()).collect()
    }
}

impl TypeParam {
    pub fn names(&self) -> impl Iterator<Item = Name> + '_ {
        support::children(&self.syntax)
    }

    pub fn constraint(&self) -> Option<Constraint> {
        support::child(&self.syntax)
    }
}

impl Constraint {
    pub fn terms(&self) -> impl Iterator<Item = TypeRef> + '_ {
        support::children(&self.syntax)
    }
}

impl TypeArgList {
    pub fn types(&self) -> impl Iterator<Item = TypeRef> + '_ {
        support::children(&self.syntax)
    }
}
