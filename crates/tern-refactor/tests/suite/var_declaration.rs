use lsp_types::{CodeActionKind, Position, Range};
use pretty_assertions::assert_eq;
use tern_refactor::{VAR_DECLARATION, VAR_DECLARATION_TITLE};
use tern_test_utils::apply_lsp_edits;

use super::{only_edit, Fixture};

const COMPUTE: &str = r#"package main

func compute() int { return 1 }

func main() {
    /*start*/y := compute()/*end*/
    _ = y
}
"#;

/// Applies the only action offered for `fixture` and returns the rewritten text.
fn rewrite(fixture: &str) -> String {
    let fixture = Fixture::new(fixture);
    let actions = fixture.actions();
    assert_eq!(actions.len(), 1, "expected exactly one action: {actions:?}");
    apply_lsp_edits(&fixture.text, &[only_edit(&actions[0])])
}

#[track_caller]
fn assert_no_action(fixture: &str) {
    let actions = Fixture::new(fixture).actions();
    assert!(actions.is_empty(), "expected no actions, got {actions:?}");
}

#[test]
fn rewrites_call_result_and_keeps_the_call() {
    let fixture = Fixture::new(COMPUTE);
    let actions = fixture.actions();
    assert_eq!(actions.len(), 1);

    let action = &actions[0];
    assert_eq!(action.title, "Replace := with var declaration");
    assert_eq!(action.title, VAR_DECLARATION_TITLE);
    assert_eq!(
        action.kind,
        Some(CodeActionKind::new("refactor.rewrite.varDeclaration"))
    );

    let edit = only_edit(action);
    assert_eq!(edit.new_text, "var y int\n    y = compute()");
    assert!(edit.new_text.ends_with("compute()"));
    assert_eq!(
        edit.range,
        Range::new(Position::new(5, 4), Position::new(5, 18))
    );

    assert_eq!(
        apply_lsp_edits(&fixture.text, &[edit]),
        r#"package main

func compute() int { return 1 }

func main() {
    var y int
    y = compute()
    _ = y
}
"#
    );
}

#[test]
fn first_line_declares_the_resolved_type() {
    let cases = [
        ("1", "int"),
        ("\"s\"", "string"),
        ("[]string{}", "[]string"),
        ("map[string]*T{}", "map[string]*T"),
        ("&T{}", "*T"),
        ("T{}.f", "func(int) error"),
        ("make(chan<- int)", "chan<- int"),
        ("struct{ A int }{}", "struct{A int}"),
    ];
    for (value, ty) in cases {
        let fixture = format!(
            "package p\n\ntype T struct{{ f func(int) error }}\n\nfunc g() {{\n\t$0v := {value}\n\t_ = v\n}}\n"
        );
        let rewritten = rewrite(&fixture);
        assert!(
            rewritten.contains(&format!("\tvar v {ty}\n\tv = {value}\n")),
            "value `{value}`:\n{rewritten}"
        );
    }
}

#[test]
fn second_line_reuses_the_statement_indentation() {
    for indent in ["", "\t", "\t\t", "  ", "  \t"] {
        let fixture = format!(
            "package p\n\nfunc f() {{\n{indent}/*start*/x := 2.5/*end*/\n{indent}_ = x\n}}\n"
        );
        let rewritten = rewrite(&fixture);
        let expected = format!(
            "package p\n\nfunc f() {{\n{indent}var x float64\n{indent}x = 2.5\n{indent}_ = x\n}}\n"
        );
        assert_eq!(rewritten, expected, "indent {indent:?}");
    }
}

#[test]
fn indentation_of_nested_blocks() {
    let rewritten = rewrite(
        r#"package p

func f(xs []int) {
	for _, x := range xs {
		if x > 0 {
			$0double := x * 2
			_ = double
		}
	}
}
"#,
    );
    assert!(
        rewritten.contains("\t\t\tvar double int\n\t\t\tdouble = x * 2\n"),
        "{rewritten}"
    );
}

#[test]
fn edit_spans_exactly_the_statement() {
    let fixture = Fixture::new(
        "package p\n\nfunc f() {\n\tva$0lue := \"😃\" + \"x\" // trailing\n\t_ = value\n}\n",
    );
    let statement = "value := \"😃\" + \"x\"";
    let text = &fixture.text;
    let start = text.find(statement).unwrap();
    let end = start + statement.len();

    let actions = fixture.actions();
    assert_eq!(actions.len(), 1);
    let rewritten = apply_lsp_edits(text, &[only_edit(&actions[0])]);

    assert!(rewritten.starts_with(&text[..start]));
    assert!(rewritten.ends_with(&text[end..]));
    assert_eq!(
        &rewritten[start..rewritten.len() - (text.len() - end)],
        "var value string\n\tvalue = \"😃\" + \"x\""
    );
}

#[test]
fn innermost_short_var_decl_wins() {
    let rewritten = rewrite(
        r#"package p

func f() {
	outer := func() int {
		$0inner := len("abc")
		return inner
	}
	_ = outer
}
"#,
    );
    assert!(
        rewritten.contains("\t\tvar inner int\n\t\tinner = len(\"abc\")\n"),
        "{rewritten}"
    );
    assert!(rewritten.contains("\touter := func() int {"), "{rewritten}");
}

#[test]
fn selection_inside_the_value_expression() {
    let rewritten = rewrite(
        r#"package p

func f(m map[string][]byte) {
	data := m[/*start*/"key"/*end*/]
	_ = data
}
"#,
    );
    assert!(
        rewritten.contains("\tvar data []byte\n\tdata = m[\"key\"]\n"),
        "{rewritten}"
    );
}

#[test]
fn multiple_targets_are_not_rewritten() {
    assert_no_action(
        r#"package p

func two() (int, error) { return 0, nil }

func f() {
	/*start*/n, err := two()/*end*/
	_, _ = n, err
}
"#,
    );
    assert_no_action("package p\n\nfunc f() {\n\t$0a, b := 1, 2\n\t_, _ = a, b\n}\n");
}

#[test]
fn multi_value_call_into_one_name_is_not_rewritten() {
    assert_no_action(
        "package p\n\nfunc two() (int, error) { return 0, nil }\n\nfunc f() {\n\t$0v := two()\n\t_ = v\n}\n",
    );
}

#[test]
fn unresolved_types_are_not_rewritten() {
    assert_no_action("package p\n\nfunc f() {\n\t$0v := undefined()\n\t_ = v\n}\n");
    assert_no_action(
        "package p\n\nimport \"strings\"\n\nfunc f() {\n\t$0v := strings.ToUpper(\"a\")\n\t_ = v\n}\n",
    );
    assert_no_action("package p\n\nfunc f() {\n\t$0v := []Missing{}\n\t_ = v\n}\n");
}

#[test]
fn untyped_nil_is_not_rewritten() {
    assert_no_action("package p\n\nfunc f() {\n\t$0v := nil\n\t_ = v\n}\n");
}

#[test]
fn header_init_statements_are_not_rewritten() {
    assert_no_action("package p\n\nfunc f() {\n\tif $0v := 1; v > 0 {\n\t}\n}\n");
    assert_no_action("package p\n\nfunc f() {\n\tfor $0i := 0; i < 3; i++ {\n\t}\n}\n");
    assert_no_action("package p\n\nfunc f(x int) {\n\tswitch $0y := x; y {\n\t}\n}\n");
}

#[test]
fn plain_and_compound_assignments_are_not_rewritten() {
    assert_no_action("package p\n\nfunc f() {\n\tx := 1\n\t$0x = 2\n\t_ = x\n}\n");
    assert_no_action("package p\n\nfunc f() {\n\tx := 1\n\t$0x += 2\n\t_ = x\n}\n");
}

#[test]
fn selection_outside_any_statement_offers_nothing() {
    assert_no_action("package p\n\nfunc f$0() {\n\tx := 1\n\t_ = x\n}\n");
}

#[test]
fn kind_constant_matches_the_emitted_kind() {
    let actions = Fixture::new(COMPUTE).actions();
    assert_eq!(actions[0].kind.as_ref(), Some(&VAR_DECLARATION));
}

#[test]
fn comments_around_the_operator_survive() {
    let rewritten = rewrite(
        "package p\n\nfunc f() {\n\t$0x /* count */ := /* keep me */ 1 // trailing\n\t_ = x\n}\n",
    );
    assert_eq!(
        rewritten,
        "package p\n\nfunc f() {\n\tvar x int\n\tx /* count */ = /* keep me */ 1 // trailing\n\t_ = x\n}\n"
    );
}

#[test]
fn crlf_documents_keep_their_line_endings() {
    let rewritten = rewrite("package p\r\n\r\nfunc f() {\r\n\t$0x := \"s\"\r\n\t_ = x\r\n}\r\n");
    assert_eq!(
        rewritten,
        "package p\r\n\r\nfunc f() {\r\n\tvar x string\r\n\tx = \"s\"\r\n\t_ = x\r\n}\r\n"
    );
}

#[test]
fn select_case_bodies_are_rewritten() {
    let rewritten = rewrite(
        r#"package p

func f(ch chan []byte) {
	select {
	case data := <-ch:
		$0n := len(data)
		_ = n
	default:
	}
}
"#,
    );
    assert!(rewritten.contains("\t\tvar n int\n\t\tn = len(data)\n"), "{rewritten}");
    assert!(rewritten.contains("\tcase data := <-ch:\n"), "{rewritten}");
}

#[test]
fn select_receive_is_not_rewritten() {
    assert_no_action(
        "package p\n\nfunc f(ch chan int) {\n\tselect {\n\tcase $0v := <-ch:\n\t\t_ = v\n\t}\n}\n",
    );
}

#[test]
fn labeled_statements_are_rewritten_under_their_label() {
    let rewritten = rewrite("package p\n\nfunc f() {\nretry:\n\t$0x := 1\n\tif x > 1 {\n\t\tgoto retry\n\t}\n}\n");
    assert_eq!(
        rewritten,
        "package p\n\nfunc f() {\nretry:\n\tvar x int\n\tx = 1\n\tif x > 1 {\n\t\tgoto retry\n\t}\n}\n"
    );
}

#[test]
fn generic_functions_spell_their_type_parameters() {
    let rewritten = rewrite(
        r#"package p

func First[T any](xs []T) T {
	$0head := xs[0]
	return head
}
"#,
    );
    assert!(rewritten.contains("\tvar head T\n\thead = xs[0]\n"), "{rewritten}");

    let rewritten = rewrite(
        r#"package p

type Stack[T any] struct{ items []T }

func (s *Stack[T]) Peek() T { return s.items[len(s.items)-1] }

func f(s *Stack[string]) {
	$0top := s.Peek()
	_ = top
}
"#,
    );
    assert!(rewritten.contains("\tvar top string\n\ttop = s.Peek()\n"), "{rewritten}");
}

#[test]
fn inferred_generic_calls_are_not_rewritten() {
    assert_no_action(
        "package p\n\nfunc Id[T any](v T) T { return v }\n\nfunc f() {\n\t$0x := Id(1)\n\t_ = x\n}\n",
    );
}
