use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;

use super::cli::{tern, MAIN_GO};

const REWRITTEN: &str = r#"package main

func compute() int { return 1 }

func main() {
    var y int
    y = compute()
    _ = y
}
"#;

#[test]
fn prints_the_rewritten_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("main.go");
    file.write_str(MAIN_GO).unwrap();

    tern()
        .arg("rewrite")
        .arg(file.path())
        .args(["--line", "6:5"])
        .assert()
        .success()
        .stdout(predicate::str::diff(REWRITTEN));
    file.assert(MAIN_GO);
}

#[test]
fn in_place_writes_the_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("main.go");
    file.write_str(MAIN_GO).unwrap();

    tern()
        .arg("rewrite")
        .arg(file.path())
        .args(["--line", "6", "--in-place"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let text = std::fs::read_to_string(file.path()).unwrap();
    assert_eq!(text, REWRITTEN);
}

#[cfg(unix)]
#[test]
fn in_place_keeps_the_file_mode() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let file = temp.child("main.go");
    file.write_str(MAIN_GO).unwrap();
    std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o644)).unwrap();

    tern()
        .arg("rewrite")
        .arg(file.path())
        .args(["--line", "6", "--in-place"])
        .assert()
        .success();

    file.assert(REWRITTEN);
    let mode = std::fs::metadata(file.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
}

#[test]
fn no_applicable_action_exits_with_one() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("main.go");
    file.write_str("package main\n\nfunc main() {\n\ta, b := 1, 2\n\t_, _ = a, b\n}\n")
        .unwrap();

    tern()
        .arg("rewrite")
        .arg(file.path())
        .args(["--line", "4", "--in-place"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no code action"));
    file.assert("package main\n\nfunc main() {\n\ta, b := 1, 2\n\t_, _ = a, b\n}\n");
}
