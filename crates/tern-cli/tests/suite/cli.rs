use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

pub(crate) fn tern() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tern"));
    cmd.env_remove("TERN_CONFIG_PATH").env_remove("RUST_LOG");
    cmd
}

pub(crate) const MAIN_GO: &str = r#"package main

func compute() int { return 1 }

func main() {
    y := compute()
    _ = y
}
"#;

#[test]
fn help_mentions_commands() {
    tern().arg("--help").assert().success().stdout(
        predicate::str::contains("code-actions")
            .and(predicate::str::contains("rewrite"))
            .and(predicate::str::contains("parse")),
    );
}

#[test]
fn lists_actions_at_a_line() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("main.go");
    file.write_str(MAIN_GO).unwrap();

    tern()
        .arg("code-actions")
        .arg(file.path())
        .args(["--line", "6"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "Replace := with var declaration (refactor.rewrite.varDeclaration)\n",
        ));
}

#[test]
fn json_output_carries_the_document_edit() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("main.go");
    file.write_str(MAIN_GO).unwrap();
    let start = MAIN_GO.find("y :=").unwrap();
    let end = start + "y := compute()".len();

    let output = tern()
        .arg("code-actions")
        .arg(file.path())
        .args(["--range", &format!("{start}..{end}"), "--json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let actions: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let action = &actions[0];
    assert_eq!(action["title"], "Replace := with var declaration");
    assert_eq!(action["kind"], "refactor.rewrite.varDeclaration");
    let edit = &action["edit"]["documentChanges"][0]["edits"][0];
    assert_eq!(edit["newText"], "var y int\n    y = compute()");
    assert_eq!(edit["range"]["start"]["line"], 5);
    assert_eq!(edit["range"]["start"]["character"], 4);
}

#[test]
fn no_actions_prints_nothing() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("main.go");
    file.write_str(MAIN_GO).unwrap();

    tern()
        .arg("code-actions")
        .arg(file.path())
        .args(["--line", "3"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn selection_is_required() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("main.go");
    file.write_str(MAIN_GO).unwrap();

    tern()
        .arg("code-actions")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--range").or(predicate::str::contains("--line")));
}

#[test]
fn selection_past_the_end_is_an_error() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("main.go");
    file.write_str(MAIN_GO).unwrap();

    tern()
        .arg("code-actions")
        .arg(file.path())
        .args(["--line", "99"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("past the end of the file"));
}

#[test]
fn missing_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    tern()
        .arg("code-actions")
        .arg(temp.path().join("missing.go"))
        .args(["--line", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing.go"));
}

#[test]
fn parse_prints_tree_and_errors() {
    let temp = TempDir::new().unwrap();
    let good = temp.child("good.go");
    good.write_str(MAIN_GO).unwrap();
    tern()
        .arg("parse")
        .arg(good.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("SourceFile@").and(predicate::str::contains("AssignStmt@")));

    let bad = temp.child("bad.go");
    bad.write_str("package p\n\nfunc f( {\n").unwrap();
    tern()
        .arg("parse")
        .arg(bad.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("error:"));
}

#[test]
fn config_can_disable_the_action() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("main.go");
    file.write_str(MAIN_GO).unwrap();
    temp.child("tern.toml")
        .write_str("[code_actions]\nvar_declaration = false\n")
        .unwrap();

    tern()
        .arg("code-actions")
        .arg(file.path())
        .args(["--line", "6"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn invalid_config_is_reported() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("main.go");
    file.write_str(MAIN_GO).unwrap();
    temp.child(".tern.toml")
        .write_str("[code_actions]\nunknown = true\n")
        .unwrap();

    tern()
        .arg("code-actions")
        .arg(file.path())
        .args(["--line", "6"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to load configuration"));
}
