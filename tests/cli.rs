use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_help_lists_modes() {
    cargo_bin_cmd!("outline-tree")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--console"))
        .stdout(predicate::str::contains("--serve"))
        .stdout(predicate::str::contains("--slash"));
}

#[test]
fn test_render_from_stdin() {
    cargo_bin_cmd!("outline-tree")
        .write_stdin("/\n a\n  x\n b\n")
        .assert()
        .success()
        .stdout("/\n├─ a\n│  └─ x\n└─ b\n");
}

#[test]
fn test_render_file_with_slash() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("outline.txt");
    fs::write(&path, "/\n a\n  x\n b\n").unwrap();

    cargo_bin_cmd!("outline-tree")
        .arg("--slash")
        .arg(&path)
        .assert()
        .success()
        .stdout("/\n├─ a/\n│  └─ x\n└─ b\n");
}

#[test]
fn test_blank_input_prints_nothing() {
    cargo_bin_cmd!("outline-tree")
        .write_stdin("\n\n  \n")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_missing_file_fails_with_context() {
    cargo_bin_cmd!("outline-tree")
        .arg("/definitely/not/here.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_stored_input_falls_back_to_example() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");

    cargo_bin_cmd!("outline-tree")
        .arg("--stored")
        .env("OUTLINE_TREE_STATE", &state)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("/\n├─ .github\n"))
        .stdout(predicate::str::ends_with("└─ render.yaml\n"));
}

#[test]
fn test_stored_input_and_option_are_used() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");
    fs::write(
        &state,
        r#"{"outline-tree.input": "/\n a\n  b", "outline-tree.slash": "true"}"#,
    )
    .unwrap();

    cargo_bin_cmd!("outline-tree")
        .args(["--stored", "--state"])
        .arg(&state)
        .assert()
        .success()
        .stdout("/\n└─ a/\n   └─ b\n");
}

#[test]
fn test_serve_mode_applies_slash_flag() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");
    fs::write(&state, r#"{"outline-tree.input": "/\n a\n  b"}"#).unwrap();

    let frame = |body: &str| format!("Content-Length: {}\r\n\r\n{}", body.len(), body);
    let stdin = [
        frame(r#"{"seq":1,"type":"request","command":"load"}"#),
        frame(r#"{"seq":2,"type":"request","command":"disconnect"}"#),
    ]
    .concat();

    cargo_bin_cmd!("outline-tree")
        .args(["--serve", "--slash", "--state"])
        .arg(&state)
        .write_stdin(stdin)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""appendSlash":true"#))
        .stdout(predicate::str::contains(r#""output":"/\n└─ a/\n   └─ b\n""#));
}
