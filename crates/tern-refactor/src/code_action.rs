use lsp_types::{CodeAction, CodeActionKind, Diagnostic, OptionalVersionedTextDocumentIdentifier};
use tern_config::CodeActionsConfig;
use tern_core::{LineIndex, TextRange};
use tern_syntax::GoParse;
use tern_types::TypeOracle;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::edit::{EditError, FileId, WorkspaceEdit};
use crate::lsp::{self, DocumentSnapshot, LspConversionError};
use crate::offsets::{OffsetError, SourceOffsets};
use crate::replace_declaration::{replace_with_var_declaration, VAR_DECLARATION};

#[derive(Debug, Error)]
pub enum CodeActionError {
    #[error("code action request was cancelled")]
    Cancelled,
    #[error("failed to translate syntax positions: {0}")]
    OffsetTranslation(#[from] OffsetError),
    #[error("failed to convert edit: {0}")]
    EditConversion(#[from] LspConversionError),
    #[error(transparent)]
    Edit(#[from] EditError),
}

/// Receives the actions computed for a request.
pub trait CodeActionSink {
    fn add(&mut self, action: CodeAction);
}

impl CodeActionSink for Vec<CodeAction> {
    fn add(&mut self, action: CodeAction) {
        self.push(action);
    }
}

/// Everything a code action may look at: one parsed and type-checked document and the
/// selection inside it.
pub struct CodeActionsRequest<'a> {
    document: OptionalVersionedTextDocumentIdentifier,
    source: &'a str,
    line_index: LineIndex,
    parse: &'a GoParse,
    types: &'a (dyn TypeOracle + Sync),
    range: TextRange,
    only: Option<Vec<CodeActionKind>>,
    cancel: CancellationToken,
    config: CodeActionsConfig,
}

impl<'a> CodeActionsRequest<'a> {
    pub fn new(
        document: OptionalVersionedTextDocumentIdentifier,
        source: &'a str,
        parse: &'a GoParse,
        types: &'a (dyn TypeOracle + Sync),
        range: TextRange,
    ) -> Self {
        Self {
            document,
            source,
            line_index: LineIndex::new(source),
            parse,
            types,
            range,
            only: None,
            cancel: CancellationToken::new(),
            config: CodeActionsConfig::default(),
        }
    }

    /// Builds a request from an LSP selection. Returns `None` if `range` does not map onto
    /// `source`.
    pub fn from_lsp_range(
        document: OptionalVersionedTextDocumentIdentifier,
        source: &'a str,
        parse: &'a GoParse,
        types: &'a (dyn TypeOracle + Sync),
        range: lsp_types::Range,
    ) -> Option<Self> {
        let mut req = Self::new(document, source, parse, types, TextRange::default());
        req.range = lsp::lsp_range_to_text_range(source, &req.line_index, range)?;
        Some(req)
    }

    /// Restricts the request to actions whose kind matches one of `kinds`.
    pub fn with_only(mut self, kinds: Vec<CodeActionKind>) -> Self {
        self.only = Some(kinds);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn with_config(mut self, config: CodeActionsConfig) -> Self {
        self.config = config;
        self
    }

    pub fn document(&self) -> &OptionalVersionedTextDocumentIdentifier {
        &self.document
    }

    pub fn file_id(&self) -> FileId {
        FileId::new(self.document.uri.as_str())
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn parse(&self) -> &'a GoParse {
        self.parse
    }

    pub fn types(&self) -> &'a (dyn TypeOracle + Sync) {
        self.types
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn config(&self) -> &CodeActionsConfig {
        &self.config
    }

    pub fn offsets(&self) -> SourceOffsets<'a> {
        SourceOffsets::new(self.source)
    }

    pub fn check_cancelled(&self) -> Result<(), CodeActionError> {
        if self.cancel.is_cancelled() {
            return Err(CodeActionError::Cancelled);
        }
        Ok(())
    }

    /// `true` if the client accepts actions of `kind`.
    ///
    /// An absent or empty `only` list accepts everything.
    pub fn wants(&self, kind: &CodeActionKind) -> bool {
        match &self.only {
            Some(only) if !only.is_empty() => {
                only.iter().any(|requested| kind_matches(requested, kind))
            }
            _ => true,
        }
    }

    /// Normalizes `edit`, converts it to `document_changes` and reports it as an action.
    pub fn add_edit_action(
        &self,
        sink: &mut dyn CodeActionSink,
        title: impl Into<String>,
        kind: CodeActionKind,
        diagnostics: Option<Vec<Diagnostic>>,
        mut edit: WorkspaceEdit,
    ) -> Result<(), CodeActionError> {
        edit.normalize()?;
        let edit = lsp::workspace_edit_to_lsp(self, &edit)?;
        sink.add(lsp::code_action_for_edit(title, kind, diagnostics, edit));
        Ok(())
    }
}

impl DocumentSnapshot for CodeActionsRequest<'_> {
    fn text(&self, file: &FileId) -> Option<&str> {
        (file.as_str() == self.document.uri.as_str()).then_some(self.source)
    }

    fn version(&self, _file: &FileId) -> Option<i32> {
        self.document.version
    }
}

/// LSP kind matching: `refactor` accepts `refactor.rewrite` but not `refactorX`.
pub fn kind_matches(requested: &CodeActionKind, kind: &CodeActionKind) -> bool {
    let requested = requested.as_str();
    let kind = kind.as_str();
    requested.is_empty()
        || kind == requested
        || kind
            .strip_prefix(requested)
            .is_some_and(|rest| rest.starts_with('.'))
}

type ComputeFn = fn(&CodeActionsRequest<'_>, &mut dyn CodeActionSink) -> Result<(), CodeActionError>;

struct Registered {
    kind: CodeActionKind,
    enabled: fn(&CodeActionsConfig) -> bool,
    compute: ComputeFn,
}

const CODE_ACTIONS: &[Registered] = &[Registered {
    kind: VAR_DECLARATION,
    enabled: |config| config.var_declaration,
    compute: replace_with_var_declaration,
}];

/// Runs every enabled code action for `req`.
pub fn code_actions(req: &CodeActionsRequest<'_>) -> Result<Vec<CodeAction>, CodeActionError> {
    let _span = tracing::debug_span!(
        target: "tern.refactor",
        "code_actions",
        uri = req.document.uri.as_str(),
        range = ?req.range,
    )
    .entered();

    req.check_cancelled()?;

    let mut actions: Vec<CodeAction> = Vec::new();
    for action in CODE_ACTIONS {
        if !(action.enabled)(&req.config) {
            tracing::debug!(
                target: "tern.refactor",
                kind = action.kind.as_str(),
                "code action disabled by configuration"
            );
            continue;
        }
        (action.compute)(req, &mut actions)?;
    }

    tracing::debug!(target: "tern.refactor", count = actions.len(), "computed code actions");
    Ok(actions)
}
