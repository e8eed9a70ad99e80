use rowan::Language;

/// Unified syntax kind for both tokens and nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // --- Trivia ---
    Whitespace,
    LineComment,
    BlockComment,

    // --- Identifiers & literals ---
    Ident,
    IntLiteral,
    FloatLiteral,
    ImaginaryLiteral,
    RuneLiteral,
    StringLiteral,
    RawStringLiteral,

    // --- Keywords ---
    BreakKw,
    CaseKw,
    ChanKw,
    ConstKw,
    ContinueKw,
    DefaultKw,
    DeferKw,
    ElseKw,
    FallthroughKw,
    ForKw,
    FuncKw,
    GoKw,
    GotoKw,
    IfKw,
    ImportKw,
    InterfaceKw,
    MapKw,
    PackageKw,
    RangeKw,
    ReturnKw,
    SelectKw,
    StructKw,
    SwitchKw,
    TypeKw,
    VarKw,

    // --- Operators ---
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    Pipe,
    Caret,
    Shl,
    Shr,
    AmpCaret,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    AmpEq,
    PipeEq,
    CaretEq,
    ShlEq,
    ShrEq,
    AmpCaretEq,
    AmpAmp,
    PipePipe,
    Arrow,
    PlusPlus,
    MinusMinus,
    EqEq,
    Lt,
    Gt,
    Eq,
    Bang,
    Tilde,
    NotEq,
    LtEq,
    GtEq,
    ColonEq,
    Ellipsis,

    // --- Separators ---
    LParen,
    RParen,
    LBrack,
    RBrack,
    LBrace,
    RBrace,
    Comma,
    Dot,
    /// Either an explicit `;` or a newline the lexer turned into a statement terminator.
    Semicolon,
    Colon,

    Error,
    Eof,

    // --- Nodes: declarations ---
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
    Name,

    // --- Nodes: statements ---
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

    // --- Nodes: expressions ---
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

    // --- Nodes: types ---
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
    Constraint,
    TypeArgList,

    #[doc(hidden)]
    __Last,
}

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::Whitespace | SyntaxKind::LineComment | SyntaxKind::BlockComment
        )
    }

    pub fn is_keyword(self) -> bool {
        (SyntaxKind::BreakKw as u16..=SyntaxKind::VarKw as u16).contains(&(self as u16))
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            SyntaxKind::IntLiteral
                | SyntaxKind::FloatLiteral
                | SyntaxKind::ImaginaryLiteral
                | SyntaxKind::RuneLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::RawStringLiteral
        )
    }

    pub fn is_assign_op(self) -> bool {
        matches!(
            self,
            SyntaxKind::Eq
                | SyntaxKind::ColonEq
                | SyntaxKind::PlusEq
                | SyntaxKind::MinusEq
                | SyntaxKind::StarEq
                | SyntaxKind::SlashEq
                | SyntaxKind::PercentEq
                | SyntaxKind::AmpEq
                | SyntaxKind::PipeEq
                | SyntaxKind::CaretEq
                | SyntaxKind::ShlEq
                | SyntaxKind::ShrEq
                | SyntaxKind::AmpCaretEq
        )
    }

    /// Go binary operator precedence (5 binds tightest); `0` for non-operators.
    pub fn binary_precedence(self) -> u8 {
        match self {
            SyntaxKind::PipePipe => 1,
            SyntaxKind::AmpAmp => 2,
            SyntaxKind::EqEq
            | SyntaxKind::NotEq
            | SyntaxKind::Lt
            | SyntaxKind::LtEq
            | SyntaxKind::Gt
            | SyntaxKind::GtEq => 3,
            SyntaxKind::Plus | SyntaxKind::Minus | SyntaxKind::Pipe | SyntaxKind::Caret => 4,
            SyntaxKind::Star
            | SyntaxKind::Slash
            | SyntaxKind::Percent
            | SyntaxKind::Shl
            | SyntaxKind::Shr
            | SyntaxKind::Amp
            | SyntaxKind::AmpCaret => 5,
            _ => 0,
        }
    }

    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        Some(match text {
            "break" => SyntaxKind::BreakKw,
            "case" => SyntaxKind::CaseKw,
            "chan" => SyntaxKind::ChanKw,
            "const" => SyntaxKind::ConstKw,
            "continue" => SyntaxKind::ContinueKw,
            "default" => SyntaxKind::DefaultKw,
            "defer" => SyntaxKind::DeferKw,
            "else" => SyntaxKind::ElseKw,
            "fallthrough" => SyntaxKind::FallthroughKw,
            "for" => SyntaxKind::ForKw,
            "func" => SyntaxKind::FuncKw,
            "go" => SyntaxKind::GoKw,
            "goto" => SyntaxKind::GotoKw,
            "if" => SyntaxKind::IfKw,
            "import" => SyntaxKind::ImportKw,
            "interface" => SyntaxKind::InterfaceKw,
            "map" => SyntaxKind::MapKw,
            "package" => SyntaxKind::PackageKw,
            "range" => SyntaxKind::RangeKw,
            "return" => SyntaxKind::ReturnKw,
            "select" => SyntaxKind::SelectKw,
            "struct" => SyntaxKind::StructKw,
            "switch" => SyntaxKind::SwitchKw,
            "type" => SyntaxKind::TypeKw,
            "var" => SyntaxKind::VarKw,
            _ => return None,
        })
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(value: SyntaxKind) -> Self {
        rowan::SyntaxKind(value as u16)
    }
}

/// Rowan language marker for Go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GoLanguage {}

impl Language for GoLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> SyntaxKind {
        if raw.0 < SyntaxKind::__Last as u16 {
            // SAFETY: We've verified the numeric value is within the enum range.
            unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
        } else {
            SyntaxKind::Error
        }
    }

    fn kind_to_raw(kind: SyntaxKind) -> rowan::SyntaxKind {
        kind.into()
    }
}
