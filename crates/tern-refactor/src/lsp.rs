use lsp_types::{
    CodeAction, CodeActionKind, Diagnostic, DocumentChangeOperation, DocumentChanges, OneOf,
    OptionalVersionedTextDocumentIdentifier, Range, TextDocumentEdit,
    TextEdit as LspTextEdit, Uri, WorkspaceEdit as LspWorkspaceEdit,
};
use tern_core::{LineIndex, TextEdit, TextRange};
use thiserror::Error;

use crate::edit::{FileId, WorkspaceEdit};

#[derive(Debug, Error)]
pub enum LspConversionError {
    #[error("unknown file {0:?}")]
    UnknownFile(FileId),
    #[error("invalid uri for {0:?}")]
    InvalidUri(FileId),
    #[error("range {0:?} does not map onto the document")]
    InvalidRange(Range),
    #[error(transparent)]
    InvalidEdit(#[from] tern_core::EditError),
}

/// Text and version of the documents a [`WorkspaceEdit`] may touch.
pub trait DocumentSnapshot {
    fn text(&self, file: &FileId) -> Option<&str>;

    fn version(&self, _file: &FileId) -> Option<i32> {
        None
    }
}

pub fn text_range_to_lsp(text: &str, index: &LineIndex, range: TextRange) -> Range {
    Range::new(
        index.to_wide(text, range.start()).into(),
        index.to_wide(text, range.end()).into(),
    )
}

/// `None` for positions past the end of a line, inside a surrogate pair, or out of order.
pub fn lsp_range_to_text_range(text: &str, index: &LineIndex, range: Range) -> Option<TextRange> {
    let start = index.from_wide(text, range.start.into())?;
    let end = index.from_wide(text, range.end.into())?;
    (start <= end).then(|| TextRange::new(start, end))
}

/// Converts byte-offset edits on `text` into LSP edits.
///
/// The edits are validated against `text` first; they are returned in reverse document order.
pub fn text_edits_to_lsp(
    text: &str,
    edits: &[TextEdit],
) -> Result<Vec<LspTextEdit>, LspConversionError> {
    let mut edits = edits.to_vec();
    tern_core::normalize_text_edits(text, &mut edits)?;

    let index = LineIndex::new(text);
    // Some clients apply edits one after another; going backwards keeps earlier ranges valid.
    Ok(edits
        .into_iter()
        .rev()
        .map(|edit| LspTextEdit {
            range: text_range_to_lsp(text, &index, edit.range),
            new_text: edit.replacement,
        })
        .collect())
}

/// Converts LSP edits on `text` back into byte-offset edits.
pub fn text_edits_from_lsp(
    text: &str,
    edits: &[LspTextEdit],
) -> Result<Vec<TextEdit>, LspConversionError> {
    let index = LineIndex::new(text);
    edits
        .iter()
        .map(|edit| {
            let range = lsp_range_to_text_range(text, &index, edit.range)
                .ok_or(LspConversionError::InvalidRange(edit.range))?;
            Ok(TextEdit::new(range, edit.new_text.clone()))
        })
        .collect()
}

/// Wraps `edits` into a document change for one versioned document.
pub fn document_change_edit(
    document: OptionalVersionedTextDocumentIdentifier,
    edits: Vec<LspTextEdit>,
) -> TextDocumentEdit {
    TextDocumentEdit {
        text_document: document,
        edits: edits.into_iter().map(OneOf::Left).collect(),
    }
}

/// Convert an internal [`WorkspaceEdit`] into an LSP edit made of `document_changes`.
pub fn workspace_edit_to_lsp(
    documents: &dyn DocumentSnapshot,
    edit: &WorkspaceEdit,
) -> Result<LspWorkspaceEdit, LspConversionError> {
    let mut document_edits = Vec::new();
    for (file, edits) in edit.edits_by_file() {
        let text = documents
            .text(file)
            .ok_or_else(|| LspConversionError::UnknownFile(file.clone()))?;
        let document = OptionalVersionedTextDocumentIdentifier {
            uri: file_id_to_uri(file)?,
            version: documents.version(file),
        };
        document_edits.push(document_change_edit(document, text_edits_to_lsp(text, &edits)?));
    }

    Ok(LspWorkspaceEdit {
        changes: None,
        document_changes: Some(DocumentChanges::Edits(document_edits)),
        change_annotations: None,
    })
}

pub fn code_action_for_edit(
    title: impl Into<String>,
    kind: CodeActionKind,
    diagnostics: Option<Vec<Diagnostic>>,
    edit: LspWorkspaceEdit,
) -> CodeAction {
    CodeAction {
        title: title.into(),
        kind: Some(kind),
        diagnostics,
        edit: Some(edit),
        command: None,
        is_preferred: None,
        disabled: None,
        data: None,
    }
}

/// Applies the parts of `edit` that target `uri` to `text`.
pub fn apply_workspace_edit(
    text: &str,
    uri: &Uri,
    edit: &LspWorkspaceEdit,
) -> Result<String, LspConversionError> {
    let mut lsp_edits: Vec<LspTextEdit> = Vec::new();

    if let Some(changes) = &edit.changes {
        if let Some(edits) = changes.get(uri) {
            lsp_edits.extend(edits.iter().cloned());
        }
    }

    let document_edits: Vec<&TextDocumentEdit> = match &edit.document_changes {
        Some(DocumentChanges::Edits(edits)) => edits.iter().collect(),
        Some(DocumentChanges::Operations(ops)) => ops
            .iter()
            .filter_map(|op| match op {
                DocumentChangeOperation::Edit(edit) => Some(edit),
                DocumentChangeOperation::Op(_) => None,
            })
            .collect(),
        None => Vec::new(),
    };
    for document in document_edits
        .into_iter()
        .filter(|document| &document.text_document.uri == uri)
    {
        lsp_edits.extend(document.edits.iter().map(|edit| match edit {
            OneOf::Left(edit) => edit.clone(),
            OneOf::Right(annotated) => annotated.text_edit.clone(),
        }));
    }

    let edits = text_edits_from_lsp(text, &lsp_edits)?;
    Ok(tern_core::apply_text_edits(text, &edits)?)
}

pub(crate) fn file_id_to_uri(file: &FileId) -> Result<Uri, LspConversionError> {
    file.as_str()
        .parse::<Uri>()
        .map_err(|_| LspConversionError::InvalidUri(file.clone()))
}
