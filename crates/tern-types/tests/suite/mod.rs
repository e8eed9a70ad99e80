mod declarations;
mod expressions;
mod generics;

use pretty_assertions::assert_eq;
use tern_syntax::{parse_go, SyntaxKind};
use tern_test_utils::extract_cursor;
use tern_types::{check_file, TypeInfo, TypeOracle};

/// Type-checks a fixture and returns the type of the identifier at `$0`, as Go prints it.
pub(crate) fn type_at(fixture: &str) -> Option<String> {
    let (info, ty) = check_at(fixture);
    assert_eq!(info.errors, Vec::new(), "unexpected type errors");
    ty
}

pub(crate) fn check_at(fixture: &str) -> (TypeInfo, Option<String>) {
    let (text, cursor) = extract_cursor(fixture);
    let parse = parse_go(&text);
    assert_eq!(parse.errors, Vec::new(), "unexpected parse errors");
    let info = check_file(&parse);
    let tok = parse
        .syntax()
        .token_at_offset(cursor)
        .right_biased()
        .expect("token at cursor");
    assert_eq!(tok.kind(), SyntaxKind::Ident, "cursor must sit on an identifier");
    let ty = info.type_of_ident(&tok).map(|ty| ty.to_string());
    (info, ty)
}
