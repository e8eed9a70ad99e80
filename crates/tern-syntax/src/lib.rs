//! Go syntax tree for Tern.
//!
//! The parser is lossless: every byte of the input, including whitespace and comments,
//! is kept in the rowan tree, so node ranges map directly onto source offsets.

pub mod ast;
mod lexer;
mod parser;
mod syntax_kind;

pub use lexer::{lex, lex_with_errors, LexError, Lexer, Token};
pub use parser::parse_go;
pub use syntax_kind::{GoLanguage, SyntaxKind};
pub use text_size::{TextRange, TextSize};

use rowan::{GreenNode, NodeOrToken, TokenAtOffset};

pub type SyntaxNode = rowan::SyntaxNode<GoLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<GoLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<GoLanguage>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub range: TextRange,
}

/// Result of parsing one Go file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoParse {
    pub green: GreenNode,
    pub errors: Vec<ParseError>,
}

impl GoParse {
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn source_file(&self) -> Option<ast::SourceFile> {
        ast::AstNode::cast(self.syntax())
    }

    pub fn token_at_offset(&self, offset: TextSize) -> TokenAtOffset<SyntaxToken> {
        self.syntax().token_at_offset(offset)
    }
}

/// Returns the chain of nodes enclosing `range`, innermost first and ending at the root.
///
/// Whitespace and comments at either end of the selection are ignored, so selecting a
/// statement together with its indentation behaves like selecting the statement itself.
/// For an empty range (a cursor) the token to the right of the cursor wins, unless it is
/// trivia.
pub fn path_enclosing_range(root: &SyntaxNode, range: TextRange) -> Vec<SyntaxNode> {
    let range = trim_trivia(root, range);

    let start = if range.is_empty() {
        cursor_token(root, range.start()).and_then(|tok| tok.parent())
    } else if range.end() > root.text_range().end() {
        None
    } else {
        match root.covering_element(range) {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(tok) => tok.parent(),
        }
    };

    start
        .map(|node| node.ancestors().collect())
        .unwrap_or_default()
}

fn is_insignificant(tok: &SyntaxToken) -> bool {
    tok.kind().is_trivia() || (tok.kind() == SyntaxKind::Semicolon && tok.text() == "\n")
}

fn trim_trivia(root: &SyntaxNode, range: TextRange) -> TextRange {
    if range.is_empty() {
        return range;
    }
    let mut significant = root
        .descendants_with_tokens()
        .filter_map(|it| it.into_token())
        .filter(|tok| !is_insignificant(tok))
        .map(|tok| tok.text_range())
        .filter(|r| r.intersect(range).is_some_and(|i| !i.is_empty()));

    let Some(first) = significant.next() else {
        return TextRange::empty(range.start());
    };
    let last = significant.last().unwrap_or(first);

    TextRange::new(
        range.start().max(first.start()),
        range.end().min(last.end()),
    )
}

fn cursor_token(root: &SyntaxNode, offset: TextSize) -> Option<SyntaxToken> {
    if offset > root.text_range().end() {
        return None;
    }
    match root.token_at_offset(offset) {
        TokenAtOffset::None => None,
        TokenAtOffset::Single(tok) => Some(tok),
        TokenAtOffset::Between(left, right) => {
            if is_insignificant(&right) && !is_insignificant(&left) {
                Some(left)
            } else {
                Some(right)
            }
        }
    }
}
