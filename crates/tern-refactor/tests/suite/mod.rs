use pretty_assertions::assert_eq;
use lsp_types::{CodeAction, DocumentChanges, OneOf, OptionalVersionedTextDocumentIdentifier};
use tern_core::TextRange;
use tern_refactor::{code_actions, CodeActionsRequest};
use tern_syntax::{parse_go, GoParse};
use tern_test_utils::{extract_cursor, extract_range};
use tern_types::{check_file, TypeInfo};

mod request;
mod var_declaration;

pub(crate) const URI: &str = "file:///work/main.go";

pub(crate) fn document() -> OptionalVersionedTextDocumentIdentifier {
    OptionalVersionedTextDocumentIdentifier {
        uri: URI.parse().expect("valid uri"),
        version: Some(3),
    }
}

/// A fixture with its markers removed, parsed and type-checked.
pub(crate) struct Fixture {
    pub(crate) text: String,
    pub(crate) selection: TextRange,
    pub(crate) parse: GoParse,
    pub(crate) info: TypeInfo,
}

impl Fixture {
    /// Accepts either a `/*start*/.../*end*/` selection or a `$0` cursor.
    pub(crate) fn new(fixture: &str) -> Fixture {
        let (text, selection) = if fixture.contains("/*start*/") {
            extract_range(fixture)
        } else {
            let (text, cursor) = extract_cursor(fixture);
            (text, TextRange::empty(cursor))
        };
        let parse = parse_go(&text);
        assert_eq!(parse.errors, Vec::new(), "fixture should parse cleanly");
        let info = check_file(&parse);
        Fixture {
            text,
            selection,
            parse,
            info,
        }
    }

    pub(crate) fn request(&self) -> CodeActionsRequest<'_> {
        CodeActionsRequest::new(document(), &self.text, &self.parse, &self.info, self.selection)
    }

    pub(crate) fn actions(&self) -> Vec<CodeAction> {
        code_actions(&self.request()).expect("code actions should not fail")
    }
}

/// The single LSP text edit carried by `action`.
pub(crate) fn only_edit(action: &CodeAction) -> lsp_types::TextEdit {
    let edit = action.edit.as_ref().expect("action has an edit");
    assert_eq!(edit.changes, None);
    let Some(DocumentChanges::Edits(documents)) = &edit.document_changes else {
        panic!("expected document edits, got {edit:?}");
    };
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].text_document, document());
    assert_eq!(documents[0].edits.len(), 1);
    match &documents[0].edits[0] {
        OneOf::Left(edit) => edit.clone(),
        OneOf::Right(annotated) => panic!("unexpected annotated edit {annotated:?}"),
    }
}
