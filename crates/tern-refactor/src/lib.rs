//! Code actions for Go sources.
//!
//! A [`CodeActionsRequest`] bundles one parsed and type-checked document with the user's
//! selection; [`code_actions`] runs every enabled action against it and returns LSP
//! [`lsp_types::CodeAction`]s whose edits are `document_changes` for that document.
//!
//! ```text
//! let parse = tern_syntax::parse_go(&text);
//! let info = tern_types::check_file(&parse);
//! let req = CodeActionsRequest::new(document, &text, &parse, &info, selection);
//! let actions = code_actions(&req)?;
//! ```

mod code_action;
mod edit;
pub mod lsp;
mod offsets;
mod replace_declaration;

pub use code_action::{
    code_actions, kind_matches, CodeActionError, CodeActionSink, CodeActionsRequest,
};
pub use edit::{EditError, FileId, WorkspaceEdit, WorkspaceTextEdit};
pub use lsp::{DocumentSnapshot, LspConversionError};
pub use offsets::{OffsetError, OffsetTranslator, SourceOffsets};
pub use replace_declaration::{
    replace_with_var_declaration, VAR_DECLARATION, VAR_DECLARATION_TITLE,
};
pub use tern_config::CodeActionsConfig;
