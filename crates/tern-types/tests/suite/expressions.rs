use pretty_assertions::assert_eq;

use super::type_at;

const SHAPES: &str = r#"package shapes

import (
	"bytes"
	"strings"
)

type Base struct {
	ID int
}

type Point struct {
	Base
	X, Y float64
	Tags []string
}

func (p *Point) Len() float64 { return p.X }

type Shape interface {
	Area() float64
}

func f(ch chan string, s Shape, err error, xs []byte, m map[string][]int) {
	_ = 0
}
"#;

/// Checks `expr` as the initializer of a short variable declaration inside `f` above.
fn init_type(expr: &str) -> Option<String> {
    let fixture = SHAPES.replace("\t_ = 0\n", &format!("\t$0v := {expr}\n\t_ = v\n"));
    type_at(&fixture)
}

#[test]
fn composite_literals_and_pointers() {
    assert_eq!(init_type("Point{X: 1}").as_deref(), Some("Point"));
    assert_eq!(init_type("&Point{X: 1}").as_deref(), Some("*Point"));
    assert_eq!(init_type("[]*Point{{X: 1}}").as_deref(), Some("[]*Point"));
    assert_eq!(init_type("[...]int{1, 2, 3}").as_deref(), Some("[3]int"));
    assert_eq!(
        init_type("map[string]Point{\"a\": {}}").as_deref(),
        Some("map[string]Point")
    );
    assert_eq!(init_type("new(int)").as_deref(), Some("*int"));
}

#[test]
fn fields_methods_and_embedding() {
    assert_eq!(init_type("(&Point{}).Len()").as_deref(), Some("float64"));
    assert_eq!(init_type("Point{}.Y").as_deref(), Some("float64"));
    assert_eq!(init_type("Point{}.ID").as_deref(), Some("int"));
    assert_eq!(init_type("Point{}.Tags").as_deref(), Some("[]string"));
    assert_eq!(init_type("s.Area()").as_deref(), Some("float64"));
    assert_eq!(init_type("err.Error()").as_deref(), Some("string"));
    assert_eq!(init_type("s.Area").as_deref(), Some("func() float64"));
}

#[test]
fn imported_types_are_qualified_and_imported_functions_unknown() {
    assert_eq!(init_type("&bytes.Buffer{}").as_deref(), Some("*bytes.Buffer"));
    assert_eq!(init_type("strings.ToUpper(\"a\")"), None);
}

#[test]
fn index_slice_and_receive() {
    assert_eq!(init_type("xs[0]").as_deref(), Some("byte"));
    assert_eq!(init_type("xs[1:]").as_deref(), Some("[]byte"));
    assert_eq!(init_type("\"abc\"[1:]").as_deref(), Some("string"));
    assert_eq!(init_type("m[\"k\"]").as_deref(), Some("[]int"));
    assert_eq!(init_type("<-ch").as_deref(), Some("string"));
    assert_eq!(init_type("s.(*Point)").as_deref(), Some("*Point"));
}

#[test]
fn builtins_and_conversions() {
    assert_eq!(init_type("len(xs)").as_deref(), Some("int"));
    assert_eq!(init_type("append(xs, 1)").as_deref(), Some("[]byte"));
    assert_eq!(init_type("make(map[string]int)").as_deref(), Some("map[string]int"));
    assert_eq!(init_type("float32(1)").as_deref(), Some("float32"));
    assert_eq!(init_type("[]byte(\"s\")").as_deref(), Some("[]byte"));
    assert_eq!(init_type("string(xs)").as_deref(), Some("string"));
    assert_eq!(init_type("(*Point)(nil)").as_deref(), Some("*Point"));
    assert_eq!(init_type("recover()").as_deref(), Some("any"));
}

#[test]
fn operators() {
    assert_eq!(init_type("len(xs) * 2").as_deref(), Some("int"));
    assert_eq!(init_type("2 * len(xs)").as_deref(), Some("int"));
    assert_eq!(init_type("xs[0] << 1").as_deref(), Some("byte"));
    assert_eq!(init_type("len(xs) > 0 && true").as_deref(), Some("bool"));
    assert_eq!(init_type("!true").as_deref(), Some("bool"));
    assert_eq!(init_type("-1.5").as_deref(), Some("float64"));
    assert_eq!(init_type("\"a\" + \"b\"").as_deref(), Some("string"));
}

#[test]
fn function_literals() {
    assert_eq!(
        init_type("func(a int, rest ...string) (bool, error) { return a > 0, nil }").as_deref(),
        Some("func(a int, rest ...string) (bool, error)")
    );
    assert_eq!(
        init_type("func() int { n := 1; return n }()").as_deref(),
        Some("int")
    );
}

#[test]
fn range_clause_variables() {
    let fixture = SHAPES.replace(
        "\t_ = 0\n",
        "\tfor i, $0r := range \"hi\" {\n\t\t_, _ = i, r\n\t}\n",
    );
    assert_eq!(type_at(&fixture).as_deref(), Some("rune"));

    let fixture = SHAPES.replace(
        "\t_ = 0\n",
        "\tfor $0k, vs := range m {\n\t\t_, _ = k, vs\n\t}\n",
    );
    assert_eq!(type_at(&fixture).as_deref(), Some("string"));

    let fixture = SHAPES.replace(
        "\t_ = 0\n",
        "\tfor _, $0p := range []Point{} {\n\t\t_ = p\n\t}\n",
    );
    assert_eq!(type_at(&fixture).as_deref(), Some("Point"));
}

#[test]
fn comma_ok_forms() {
    let fixture = SHAPES.replace("\t_ = 0\n", "\tv, $0ok := m[\"k\"]\n\t_, _ = v, ok\n");
    assert_eq!(type_at(&fixture).as_deref(), Some("bool"));

    let fixture = SHAPES.replace("\t_ = 0\n", "\t$0p, ok := s.(*Point)\n\t_, _ = p, ok\n");
    assert_eq!(type_at(&fixture).as_deref(), Some("*Point"));

    let fixture = SHAPES.replace("\t_ = 0\n", "\t$0msg, ok := <-ch\n\t_, _ = msg, ok\n");
    assert_eq!(type_at(&fixture).as_deref(), Some("string"));
}
