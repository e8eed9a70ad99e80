use lsp_types::{CodeAction, CodeActionKind, Position, Range};
use pretty_assertions::assert_eq;
use tern_refactor::{
    code_actions, replace_with_var_declaration, CodeActionError, CodeActionSink,
    CodeActionsConfig, CodeActionsRequest,
};
use tokio_util::sync::CancellationToken;

use super::{document, only_edit, Fixture};

const SIMPLE: &str = "package p\n\nfunc f() {\n\t$0n := 42\n\t_ = n\n}\n";

#[test]
fn cancelled_requests_fail_before_doing_any_work() {
    let fixture = Fixture::new(SIMPLE);
    let token = CancellationToken::new();
    token.cancel();
    let request = fixture.request().with_cancellation(token.clone());

    assert!(matches!(
        code_actions(&request),
        Err(CodeActionError::Cancelled)
    ));

    let mut sink: Vec<CodeAction> = Vec::new();
    assert!(matches!(
        replace_with_var_declaration(&request, &mut sink),
        Err(CodeActionError::Cancelled)
    ));
    assert!(sink.is_empty());
}

#[test]
fn only_filter_uses_kind_prefixes() {
    let fixture = Fixture::new(SIMPLE);
    let count = |kinds: Vec<&'static str>| {
        let request = fixture
            .request()
            .with_only(kinds.into_iter().map(CodeActionKind::new).collect());
        code_actions(&request).unwrap().len()
    };

    assert_eq!(count(vec!["refactor"]), 1);
    assert_eq!(count(vec!["refactor.rewrite"]), 1);
    assert_eq!(count(vec!["quickfix", "refactor.rewrite.varDeclaration"]), 1);
    assert_eq!(count(vec!["quickfix"]), 0);
    assert_eq!(count(vec!["refactor.extract"]), 0);
    assert_eq!(count(vec![]), 1);
}

#[test]
fn disabled_action_is_skipped() {
    let fixture = Fixture::new(SIMPLE);
    let request = fixture.request().with_config(CodeActionsConfig {
        var_declaration: false,
    });
    assert_eq!(code_actions(&request).unwrap(), Vec::new());

    let enabled = fixture.request().with_config(CodeActionsConfig::default());
    assert_eq!(code_actions(&enabled).unwrap().len(), 1);
}

#[test]
fn lsp_ranges_are_converted_to_byte_offsets() {
    let fixture = Fixture::new("package p\n\nfunc f() {\n\ts := \"😃\"; n := len(s)\n\t_ = n\n}\n");
    // `n` follows a surrogate pair, so its UTF-16 column differs from its byte column.
    let line = "\ts := \"😃\"; n := len(s)";
    let utf16_col = line[..line.find("n :=").unwrap()].encode_utf16().count() as u32;

    let request = CodeActionsRequest::from_lsp_range(
        document(),
        &fixture.text,
        &fixture.parse,
        &fixture.info,
        Range::new(Position::new(3, utf16_col), Position::new(3, utf16_col)),
    )
    .expect("range maps onto the document");
    let actions = code_actions(&request).unwrap();
    assert_eq!(actions.len(), 1);
    let edit = only_edit(&actions[0]);
    assert_eq!(edit.new_text, "var n int\n\tn = len(s)");
    assert_eq!(edit.range.start, Position::new(3, utf16_col));
}

#[test]
fn invalid_lsp_ranges_yield_no_request() {
    let fixture = Fixture::new(SIMPLE);
    let past_end_of_line = Range::new(Position::new(3, 40), Position::new(3, 41));
    assert!(CodeActionsRequest::from_lsp_range(
        document(),
        &fixture.text,
        &fixture.parse,
        &fixture.info,
        past_end_of_line,
    )
    .is_none());
}

#[test]
fn actions_can_be_collected_by_any_sink() {
    #[derive(Default)]
    struct Titles(Vec<String>);

    impl CodeActionSink for Titles {
        fn add(&mut self, action: CodeAction) {
            self.0.push(action.title);
        }
    }

    let fixture = Fixture::new(SIMPLE);
    let mut titles = Titles::default();
    replace_with_var_declaration(&fixture.request(), &mut titles).unwrap();
    assert_eq!(titles.0, vec!["Replace := with var declaration".to_string()]);
}

#[test]
fn request_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CodeActionsRequest<'static>>();
}
