//! "Replace := with var declaration".
//!
//! Rewrites a short variable declaration into an explicitly typed `var` declaration followed
//! by a plain assignment:
//!
//! ```text
//! y := compute()      =>      var y int
//!                             y = compute()
//! ```

use lsp_types::CodeActionKind;
use tern_core::{indentation_at, line_terminator, TextRange};
use tern_syntax::ast::{self, AstNode};
use tern_syntax::{path_enclosing_range, SyntaxKind, SyntaxNode};
use tern_types::Type;
use thiserror::Error;

use crate::code_action::{CodeActionError, CodeActionSink, CodeActionsRequest};
use crate::edit::{WorkspaceEdit, WorkspaceTextEdit};
use crate::offsets::OffsetTranslator;

pub const VAR_DECLARATION: CodeActionKind =
    CodeActionKind::new("refactor.rewrite.varDeclaration");

pub const VAR_DECLARATION_TITLE: &str = "Replace := with var declaration";

/// Offers the rewrite for the innermost `:=` statement enclosing the request's range.
///
/// Inapplicable selections push nothing and return `Ok(())`.
pub fn replace_with_var_declaration(
    req: &CodeActionsRequest<'_>,
    sink: &mut dyn CodeActionSink,
) -> Result<(), CodeActionError> {
    req.check_cancelled()?;
    if !req.wants(&VAR_DECLARATION) {
        tracing::trace!(target: "tern.refactor", "var declaration kind not requested");
        return Ok(());
    }

    let candidate = match Candidate::find(req) {
        Ok(candidate) => candidate,
        Err(reason) => {
            tracing::debug!(
                target: "tern.refactor",
                %reason,
                "var declaration rewrite not applicable"
            );
            return Ok(());
        }
    };

    let offsets = req.offsets();
    let stmt = offsets.range(candidate.stmt)?;
    let op = offsets.range(candidate.op)?;

    let source = req.source();
    let indent = indentation_at(source, req.line_index(), stmt.start());
    let eol = line_terminator(source);
    let name = &candidate.name;
    // Only `:=` changes; the text on either side, comments included, is kept.
    let replacement = format!(
        "var {name} {ty}{eol}{indent}{target}={value}",
        ty = candidate.ty,
        target = &source[TextRange::new(stmt.start(), op.start())],
        value = &source[TextRange::new(op.end(), stmt.end())],
    );
    tracing::debug!(
        target: "tern.refactor",
        name = %name,
        ty = %candidate.ty,
        range = ?stmt,
        "offering var declaration rewrite"
    );

    let edit = WorkspaceEdit::new(vec![WorkspaceTextEdit::replace(
        req.file_id(),
        stmt,
        replacement,
    )]);
    req.add_edit_action(sink, VAR_DECLARATION_TITLE, VAR_DECLARATION, None, edit)
}

/// A `name := value` statement the rewrite applies to.
struct Candidate {
    stmt: TextRange,
    name: String,
    /// The `:=` token.
    op: TextRange,
    ty: Type,
}

#[derive(Debug, Error)]
enum NotApplicable {
    #[error("no `:=` statement encloses the selection")]
    NoShortVarDecl,
    #[error("`:=` declares {0} names")]
    TargetCount(usize),
    #[error("`:=` assigns {0} values")]
    ValueCount(usize),
    #[error("the declared name is not a plain identifier")]
    NotAnIdentifier,
    #[error("the statement is not directly inside a block")]
    NotInBlock,
    #[error("the type of `{0}` is unknown")]
    UnknownType(String),
    #[error("`{name}` has type `{ty}`, which a var declaration cannot spell")]
    UnsupportedType { name: String, ty: Type },
}

impl Candidate {
    fn find(req: &CodeActionsRequest<'_>) -> Result<Candidate, NotApplicable> {
        let root = req.parse().syntax();
        let assign = path_enclosing_range(&root, req.range())
            .into_iter()
            .filter_map(ast::AssignStmt::cast)
            .find(ast::AssignStmt::is_define)
            .ok_or(NotApplicable::NoShortVarDecl)?;

        let targets: Vec<ast::Expr> = assign
            .lhs()
            .map(|list| list.exprs().collect())
            .unwrap_or_default();
        let values: Vec<ast::Expr> = assign
            .rhs()
            .map(|list| list.exprs().collect())
            .unwrap_or_default();
        if targets.len() != 1 {
            return Err(NotApplicable::TargetCount(targets.len()));
        }
        if values.len() != 1 {
            return Err(NotApplicable::ValueCount(values.len()));
        }

        if !is_block_statement(assign.syntax()) {
            return Err(NotApplicable::NotInBlock);
        }

        let ident = match &targets[0] {
            ast::Expr::NameRef(name) => name.ident_token(),
            _ => None,
        }
        .filter(|ident| ident.text() != "_")
        .ok_or(NotApplicable::NotAnIdentifier)?;
        let name = ident.text().to_string();

        let ty = req
            .types()
            .type_of_ident(&ident)
            .ok_or_else(|| NotApplicable::UnknownType(name.clone()))?;
        if ty.is_untyped() || ty.is_tuple() || ty.contains_invalid() {
            return Err(NotApplicable::UnsupportedType { name, ty });
        }

        let op = assign
            .op_token()
            .ok_or(NotApplicable::NoShortVarDecl)?
            .text_range();
        Ok(Candidate {
            stmt: assign.syntax().text_range(),
            name,
            op,
            ty,
        })
    }
}

/// `var` declarations are statements, so they cannot replace the init clause of an `if`,
/// `for` or `switch` header, nor the receive of a `select` case.
fn is_block_statement(stmt: &SyntaxNode) -> bool {
    let Some(parent) = stmt.parent() else {
        return false;
    };
    match parent.kind() {
        SyntaxKind::Block | SyntaxKind::CaseClause => true,
        SyntaxKind::CommClause => ast::CommClause::cast(parent)
            .and_then(|clause| clause.comm())
            .map_or(true, |comm| comm.syntax() != stmt),
        SyntaxKind::LabeledStmt => is_block_statement(&parent),
        _ => false,
    }
}
