use pretty_assertions::assert_eq;

use super::type_at;

const GENERICS: &str = r#"package p

type List[T any] struct {
	items []T
	head  *List[T]
}

func (l *List[T]) First() T { return l.items[0] }

type Pair[K comparable, V any] struct {
	Key K
	Val V
}

type Number interface {
	~int | ~float64
}

func Map[T, U any](xs []T, f func(T) U) []U {
	_ = 0
	return nil
}

func Keys[K comparable, V any](m map[K]V) []K { return nil }

func Sum[N Number](xs ...N) N { return xs[0] }

func use(l *List[string], p Pair[string, int]) {
	_ = 1
}
"#;

/// Type of `v := expr` placed in the body of the generic `Map`.
fn in_generic_body(expr: &str) -> Option<String> {
    let fixture = GENERICS.replace("\t_ = 0\n", &format!("\t$0v := {expr}\n\t_ = v\n"));
    type_at(&fixture)
}

/// Type of `v := expr` placed in `use`, where every type is instantiated.
fn in_caller(expr: &str) -> Option<String> {
    let fixture = GENERICS.replace("\t_ = 1\n", &format!("\t$0v := {expr}\n\t_ = v\n"));
    type_at(&fixture)
}

#[test]
fn type_parameters_are_types_inside_the_body() {
    assert_eq!(in_generic_body("xs[0]").as_deref(), Some("T"));
    assert_eq!(in_generic_body("f(xs[0])").as_deref(), Some("U"));
    assert_eq!(in_generic_body("T(xs[0])").as_deref(), Some("T"));
    assert_eq!(in_generic_body("len(xs)").as_deref(), Some("int"));
}

#[test]
fn instantiated_types_substitute_their_arguments() {
    assert_eq!(in_caller("l.First()").as_deref(), Some("string"));
    assert_eq!(in_caller("l.items").as_deref(), Some("[]string"));
    assert_eq!(in_caller("l.head").as_deref(), Some("*List[string]"));
    assert_eq!(in_caller("p.Val").as_deref(), Some("int"));
    assert_eq!(
        in_caller("Pair[string, int]{Key: \"a\"}").as_deref(),
        Some("Pair[string, int]")
    );
}

#[test]
fn explicit_instantiation_types_the_call() {
    assert_eq!(in_caller("Keys[string, int](nil)").as_deref(), Some("[]string"));
    assert_eq!(
        in_caller("Map[int, string]").as_deref(),
        Some("func(xs []int, f func(int) string) []string")
    );
}

#[test]
fn inferred_and_uninstantiated_generics_stay_unknown() {
    assert_eq!(in_caller("Keys(map[string]int{})"), None);
    assert_eq!(in_caller("Sum(1, 2)"), None);
    assert_eq!(in_caller("Map"), None);
}
