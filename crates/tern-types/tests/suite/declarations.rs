use pretty_assertions::assert_eq;
use tern_syntax::parse_go;
use tern_types::{check_file, ObjectKind};

use super::{check_at, type_at};

#[test]
fn short_var_decl_takes_the_result_type_of_a_call() {
    let ty = type_at(
        r#"package main

func compute() int { return 1 }

func main() {
	$0y := compute()
	_ = y
}
"#,
    );
    assert_eq!(ty.as_deref(), Some("int"));
}

#[test]
fn untyped_constants_take_their_default_type() {
    let cases = [
        ("1", "int"),
        ("2.5", "float64"),
        ("'x'", "rune"),
        ("\"s\"", "string"),
        ("`raw`", "string"),
        ("1 + 2.0", "float64"),
        ("'a' + 1", "rune"),
        ("1i", "complex128"),
        ("true", "bool"),
        ("1 < 2", "bool"),
        ("1 << 3", "int"),
    ];
    for (value, expected) in cases {
        let fixture = format!("package p\n\nfunc f() {{\n\t$0v := {value}\n\t_ = v\n}}\n");
        assert_eq!(type_at(&fixture).as_deref(), Some(expected), "value `{value}`");
    }
}

#[test]
fn nil_stays_untyped() {
    let (_, ty) = check_at("package p\n\nfunc f() {\n\t$0v := nil\n\t_ = v\n}\n");
    assert_eq!(ty.as_deref(), Some("untyped nil"));
}

#[test]
fn multi_value_call_assigned_to_one_name_is_a_tuple() {
    let fixture = r#"package p

func two() (int, error) { return 0, nil }

func f() {
	$0x := two()
	_ = x
}
"#;
    assert_eq!(type_at(fixture).as_deref(), Some("(int, error)"));
}

#[test]
fn call_without_results_is_an_empty_tuple() {
    let fixture = "package p\n\nfunc g() {}\n\nfunc f() {\n\t$0x := g()\n\t_ = x\n}\n";
    assert_eq!(type_at(fixture).as_deref(), Some("()"));
}

#[test]
fn multi_value_call_spreads_over_names() {
    let base = r#"package p

func two() (int, error) { return 0, nil }

func f() {
	a, err := two()
	_, _ = a, err
}
"#;
    let fixture = base.replace("a, err :=", "$0a, err :=");
    assert_eq!(type_at(&fixture).as_deref(), Some("int"));
    let fixture = base.replace("a, err :=", "a, $0err :=");
    assert_eq!(type_at(&fixture).as_deref(), Some("error"));
}

#[test]
fn redeclared_name_in_short_var_decl_reuses_the_object() {
    let fixture = r#"package p

func two() (int, error) { return 0, nil }

func f() {
	a, err := two()
	b, $0err := two()
	_, _, _ = a, b, err
}
"#;
    let (text, cursor) = tern_test_utils::extract_cursor(fixture);
    let parse = parse_go(&text);
    let info = check_file(&parse);
    let tok = parse.syntax().token_at_offset(cursor).right_biased().unwrap();
    assert!(info.def_of(&tok).is_none());
    let object = info.use_of(&tok).expect("use of the first err");
    assert_eq!(object.kind, ObjectKind::Var);
    let first_err = text.find("err :=").unwrap() as u32;
    assert_eq!(object.decl.map(|r| u32::from(r.start())), Some(first_err));
}

#[test]
fn inner_scopes_shadow_outer_declarations() {
    let base = r#"package p

func f() {
	x := 1
	if true {
		x := "s"
		_ = x
	}
	_ = x
}
"#;
    let inner = base.replacen("_ = x", "_ = $0x", 1);
    assert_eq!(type_at(&inner).as_deref(), Some("string"));
    let outer = base.replace("\t_ = x\n}", "\t_ = $0x\n}");
    assert_eq!(type_at(&outer).as_deref(), Some("int"));
}

#[test]
fn package_level_vars_resolve_in_any_order() {
    let fixture = "package p\n\nvar $0total = count * 2\n\nvar count = 3\n";
    assert_eq!(type_at(fixture).as_deref(), Some("int"));
}

#[test]
fn const_group_repeats_the_previous_type() {
    let fixture = r#"package p

type Color int

const (
	Red Color = iota
	Green
)

func f() {
	$0c := Green
	_ = c
}
"#;
    assert_eq!(type_at(fixture).as_deref(), Some("Color"));
}

#[test]
fn array_length_from_constant_expression() {
    let fixture = r#"package p

const size = 4

var $0buf [size * 2]byte
"#;
    assert_eq!(type_at(fixture).as_deref(), Some("[8]byte"));
}

#[test]
fn parameters_and_named_results_are_in_scope() {
    let fixture = r#"package p

func f(names ...string) (count int) {
	$0n := names
	_ = n
	return count
}
"#;
    assert_eq!(type_at(fixture).as_deref(), Some("[]string"));
}

#[test]
fn type_switch_clause_variable_takes_the_case_type() {
    let base = r#"package p

func f(x any) {
	switch v := x.(type) {
	case int:
		_ = v
	case string, error:
		_ = v
	}
}
"#;
    let first = base.replacen("_ = v", "_ = $0v", 1);
    assert_eq!(type_at(&first).as_deref(), Some("int"));
    let second = base.replace("\t\t_ = v\n\t}", "\t\t_ = $0v\n\t}");
    assert_eq!(type_at(&second).as_deref(), Some("any"));
}

#[test]
fn select_clauses_scope_their_receive_variables() {
    let fixture = r#"package p

func f(ch chan int, done chan struct{}) {
	select {
	case v := <-ch:
		$0w := v * 2
		_ = w
	case <-done:
	default:
	}
}
"#;
    assert_eq!(type_at(fixture).as_deref(), Some("int"));
}

#[test]
fn undefined_names_are_reported_and_stay_untyped() {
    let (info, ty) = check_at("package p\n\nfunc f() {\n\t$0x := missing()\n\t_ = x\n}\n");
    assert_eq!(ty, None);
    let messages: Vec<String> = info.errors.iter().map(|e| e.to_string()).collect();
    assert_eq!(messages, vec!["undefined: missing".to_string()]);
}

#[test]
fn local_type_declarations() {
    let fixture = r#"package p

func f() {
	type pair struct{ a, b int }
	$0v := pair{1, 2}
	_ = v
}
"#;
    assert_eq!(type_at(fixture).as_deref(), Some("pair"));
}

#[test]
fn aliases_resolve_to_their_target() {
    let fixture = r#"package p

type Names = []string

func f(n Names) {
	$0m := n
	_ = m
}
"#;
    assert_eq!(type_at(fixture).as_deref(), Some("[]string"));
}
