//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn repo_pilot() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("repo-pilot"))
}

#[test]
fn test_cli_version() {
    let mut cmd = repo_pilot();
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("repo-pilot"));
}

#[test]
fn test_cli_help_lists_subcommands() {
    let mut cmd = repo_pilot();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_info_previews_directory() {
    let temp = TempDir::new().expect("temp dir");
    fs::write(temp.path().join("main.py"), "print('hello')\n").expect("write file");
    fs::write(temp.path().join("lib.rs"), "pub fn f() {}\n").expect("write file");

    let mut cmd = repo_pilot();
    cmd.args(["info", temp.path().to_str().expect("utf8 path")]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Added folder"))
        .stdout(predicate::str::contains("Statistics:"))
        .stdout(predicate::str::contains("Files added: 2"));
}

#[test]
fn test_info_prunes_denylisted_directories() {
    let temp = TempDir::new().expect("temp dir");
    fs::create_dir_all(temp.path().join("node_modules/pkg")).expect("mkdir");
    fs::write(temp.path().join("node_modules/pkg/index.js"), "module.exports = 1;")
        .expect("write file");
    fs::write(temp.path().join("app.js"), "console.log(1);\n").expect("write file");

    let mut cmd = repo_pilot();
    cmd.args(["info", temp.path().to_str().expect("utf8 path")]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("app.js"))
        .stdout(predicate::str::contains("node_modules").not());
}

#[test]
fn test_info_reports_oversize_skips() {
    let temp = TempDir::new().expect("temp dir");
    fs::write(temp.path().join("big.txt"), "a".repeat(4096)).expect("write file");

    let mut cmd = repo_pilot();
    cmd.args([
        "info",
        temp.path().to_str().expect("utf8 path"),
        "--max-file-bytes",
        "1024",
    ]);
    cmd.assert().success().stdout(predicate::str::contains("Skipped (oversize): 1"));
}

#[test]
fn test_info_rejects_missing_path() {
    let mut cmd = repo_pilot();
    cmd.args(["info", "/definitely/not/a/real/path"]);
    cmd.assert().failure();
}

#[test]
fn test_info_rejects_file_argument() {
    let temp = TempDir::new().expect("temp dir");
    let file = temp.path().join("single.txt");
    fs::write(&file, "content").expect("write file");

    let mut cmd = repo_pilot();
    cmd.args(["info", file.to_str().expect("utf8 path")]);
    cmd.assert().failure().stderr(predicate::str::contains("not a directory"));
}

#[test]
fn test_chat_fails_fast_without_api_key() {
    let temp = TempDir::new().expect("temp dir");

    let mut cmd = repo_pilot();
    cmd.arg("chat")
        .current_dir(temp.path())
        .env_remove("REPO_PILOT_API_KEY")
        .env_remove("DEEPSEEK_API_KEY");
    cmd.assert().failure().stderr(predicate::str::contains("no API key"));
}

#[test]
fn test_completions_generate_bash_script() {
    let mut cmd = repo_pilot();
    cmd.args(["completions", "bash"]);
    cmd.assert().success().stdout(predicate::str::contains("repo-pilot"));
}
