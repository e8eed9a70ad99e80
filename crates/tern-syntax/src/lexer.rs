//! Lossless Go lexer.
//!
//! Every byte of the input ends up in exactly one token. Newlines that terminate a
//! statement (Go's automatic semicolon insertion) are emitted as [`SyntaxKind::Semicolon`]
//! tokens whose text is the newline itself.

use text_size::{TextRange, TextSize};

use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub range: TextRange,
}

impl Token {
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.range]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub range: TextRange,
}

pub fn lex(input: &str) -> Vec<Token> {
    lex_with_errors(input).0
}

pub fn lex_with_errors(input: &str) -> (Vec<Token>, Vec<LexError>) {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == SyntaxKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }
    (tokens, lexer.errors)
}

pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    /// Whether a newline at this point terminates the current statement.
    insert_semi: bool,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            insert_semi: false,
            errors: Vec::new(),
        }
    }

    pub fn next_token(&mut self) -> Token {
        let start = self.pos;
        let Some(c) = self.peek() else {
            return self.token(SyntaxKind::Eof, start);
        };

        if c == '\n' && self.insert_semi {
            self.pos += 1;
            self.insert_semi = false;
            return self.token(SyntaxKind::Semicolon, start);
        }

        if is_whitespace(c) {
            while let Some(c) = self.peek() {
                if c == '\n' && self.insert_semi {
                    break;
                }
                if !is_whitespace(c) {
                    break;
                }
                self.pos += c.len_utf8();
            }
            return self.token(SyntaxKind::Whitespace, start);
        }

        if self.rest().starts_with("//") {
            while let Some(c) = self.peek() {
                if c == '\n' {
                    break;
                }
                self.pos += c.len_utf8();
            }
            return self.token(SyntaxKind::LineComment, start);
        }

        if self.rest().starts_with("/*") {
            self.pos += 2;
            match self.rest().find("*/") {
                Some(end) => self.pos += end + 2,
                None => {
                    self.pos = self.input.len();
                    self.error("unterminated block comment", start);
                }
            }
            return self.token(SyntaxKind::BlockComment, start);
        }

        let kind = if is_ident_start(c) {
            self.ident_or_keyword()
        } else if c.is_ascii_digit()
            || (c == '.' && self.nth_char(1).is_some_and(|c| c.is_ascii_digit()))
        {
            self.number()
        } else if c == '"' {
            self.string()
        } else if c == '`' {
            self.raw_string()
        } else if c == '\'' {
            self.rune()
        } else {
            self.punct(c)
        };

        self.insert_semi = matches!(
            kind,
            SyntaxKind::Ident
                | SyntaxKind::IntLiteral
                | SyntaxKind::FloatLiteral
                | SyntaxKind::ImaginaryLiteral
                | SyntaxKind::RuneLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::RawStringLiteral
                | SyntaxKind::BreakKw
                | SyntaxKind::ContinueKw
                | SyntaxKind::FallthroughKw
                | SyntaxKind::ReturnKw
                | SyntaxKind::PlusPlus
                | SyntaxKind::MinusMinus
                | SyntaxKind::RParen
                | SyntaxKind::RBrack
                | SyntaxKind::RBrace
        );

        self.token(kind, start)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn nth_char(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn token(&self, kind: SyntaxKind, start: usize) -> Token {
        Token {
            kind,
            range: TextRange::new(
                TextSize::from(start as u32),
                TextSize::from(self.pos as u32),
            ),
        }
    }

    fn error(&mut self, message: &str, start: usize) {
        self.errors.push(LexError {
            message: message.to_string(),
            range: TextRange::new(
                TextSize::from(start as u32),
                TextSize::from(self.pos as u32),
            ),
        });
    }

    fn ident_or_keyword(&mut self) -> SyntaxKind {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !is_ident_continue(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        SyntaxKind::from_keyword(&self.input[start..self.pos]).unwrap_or(SyntaxKind::Ident)
    }

    fn number(&mut self) -> SyntaxKind {
        let start = self.pos;
        let mut kind = SyntaxKind::IntLiteral;

        let radix_prefix = self.peek() == Some('0')
            && matches!(
                self.nth_char(1),
                Some('x' | 'X' | 'o' | 'O' | 'b' | 'B')
            );
        if radix_prefix {
            self.pos += 2;
            let hex = matches!(self.input.as_bytes()[start + 1], b'x' | b'X');
            self.digits(|c| c.is_ascii_hexdigit());
            if hex && self.peek() == Some('.') {
                self.pos += 1;
                self.digits(|c| c.is_ascii_hexdigit());
                kind = SyntaxKind::FloatLiteral;
            }
            if hex && matches!(self.peek(), Some('p' | 'P')) {
                self.exponent();
                kind = SyntaxKind::FloatLiteral;
            }
        } else {
            self.digits(|c| c.is_ascii_digit());
            if self.peek() == Some('.') {
                self.pos += 1;
                self.digits(|c| c.is_ascii_digit());
                kind = SyntaxKind::FloatLiteral;
            }
            if matches!(self.peek(), Some('e' | 'E')) {
                self.exponent();
                kind = SyntaxKind::FloatLiteral;
            }
        }

        if self.eat('i') {
            kind = SyntaxKind::ImaginaryLiteral;
        }
        kind
    }

    fn digits(&mut self, accept: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !(accept(c) || c == '_') {
                break;
            }
            self.pos += 1;
        }
    }

    fn exponent(&mut self) {
        self.pos += 1;
        if matches!(self.peek(), Some('+' | '-')) {
            self.pos += 1;
        }
        self.digits(|c| c.is_ascii_digit());
    }

    fn string(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.peek() {
                None | Some('\n') => {
                    self.error("unterminated string literal", start);
                    break;
                }
                Some('"') => {
                    self.pos += 1;
                    break;
                }
                Some('\\') => {
                    self.pos += 1;
                    self.bump();
                }
                Some(c) => self.pos += c.len_utf8(),
            }
        }
        SyntaxKind::StringLiteral
    }

    fn raw_string(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        match self.rest().find('`') {
            Some(end) => self.pos += end + 1,
            None => {
                self.pos = self.input.len();
                self.error("unterminated raw string literal", start);
            }
        }
        SyntaxKind::RawStringLiteral
    }

    fn rune(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.peek() {
                None | Some('\n') => {
                    self.error("unterminated rune literal", start);
                    break;
                }
                Some('\'') => {
                    self.pos += 1;
                    break;
                }
                Some('\\') => {
                    self.pos += 1;
                    self.bump();
                }
                Some(c) => self.pos += c.len_utf8(),
            }
        }
        SyntaxKind::RuneLiteral
    }

    fn punct(&mut self, c: char) -> SyntaxKind {
        let start = self.pos;
        self.pos += c.len_utf8();
        match c {
            '(' => SyntaxKind::LParen,
            ')' => SyntaxKind::RParen,
            '[' => SyntaxKind::LBrack,
            ']' => SyntaxKind::RBrack,
            '{' => SyntaxKind::LBrace,
            '}' => SyntaxKind::RBrace,
            ',' => SyntaxKind::Comma,
            ';' => SyntaxKind::Semicolon,
            '~' => SyntaxKind::Tilde,
            '.' => {
                if self.rest().starts_with("..") {
                    self.pos += 2;
                    SyntaxKind::Ellipsis
                } else {
                    SyntaxKind::Dot
                }
            }
            ':' => {
                if self.eat('=') {
                    SyntaxKind::ColonEq
                } else {
                    SyntaxKind::Colon
                }
            }
            '+' => {
                if self.eat('+') {
                    SyntaxKind::PlusPlus
                } else if self.eat('=') {
                    SyntaxKind::PlusEq
                } else {
                    SyntaxKind::Plus
                }
            }
            '-' => {
                if self.eat('-') {
                    SyntaxKind::MinusMinus
                } else if self.eat('=') {
                    SyntaxKind::MinusEq
                } else {
                    SyntaxKind::Minus
                }
            }
            '*' => self.with_eq(SyntaxKind::Star, SyntaxKind::StarEq),
            '/' => self.with_eq(SyntaxKind::Slash, SyntaxKind::SlashEq),
            '%' => self.with_eq(SyntaxKind::Percent, SyntaxKind::PercentEq),
            '^' => self.with_eq(SyntaxKind::Caret, SyntaxKind::CaretEq),
            '=' => self.with_eq(SyntaxKind::Eq, SyntaxKind::EqEq),
            '!' => self.with_eq(SyntaxKind::Bang, SyntaxKind::NotEq),
            '&' => {
                if self.eat('&') {
                    SyntaxKind::AmpAmp
                } else if self.eat('^') {
                    self.with_eq(SyntaxKind::AmpCaret, SyntaxKind::AmpCaretEq)
                } else {
                    self.with_eq(SyntaxKind::Amp, SyntaxKind::AmpEq)
                }
            }
            '|' => {
                if self.eat('|') {
                    SyntaxKind::PipePipe
                } else {
                    self.with_eq(SyntaxKind::Pipe, SyntaxKind::PipeEq)
                }
            }
            '<' => {
                if self.eat('-') {
                    SyntaxKind::Arrow
                } else if self.eat('<') {
                    self.with_eq(SyntaxKind::Shl, SyntaxKind::ShlEq)
                } else {
                    self.with_eq(SyntaxKind::Lt, SyntaxKind::LtEq)
                }
            }
            '>' => {
                if self.eat('>') {
                    self.with_eq(SyntaxKind::Shr, SyntaxKind::ShrEq)
                } else {
                    self.with_eq(SyntaxKind::Gt, SyntaxKind::GtEq)
                }
            }
            _ => {
                self.error("unexpected character", start);
                SyntaxKind::Error
            }
        }
    }

    fn with_eq(&mut self, plain: SyntaxKind, with_eq: SyntaxKind) -> SyntaxKind {
        if self.eat('=') {
            with_eq
        } else {
            plain
        }
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn is_ident_start(c: char) -> bool {
    c == '_' || unicode_ident::is_xid_start(c)
}

fn is_ident_continue(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}
