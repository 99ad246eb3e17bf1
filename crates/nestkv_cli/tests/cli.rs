//! Binary-level tests for the `nestkv` CLI.

use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

fn nestkv() -> Command {
    Command::new(env!("CARGO_BIN_EXE_nestkv"))
}

fn script(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create script file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write script");
    file
}

#[test]
fn run_executes_script() {
    let file = script("PUT k 1\nBEGIN\nPUT k 2\nGET k\nCOMMIT\nGET k\n");
    let output = nestkv().arg("run").arg(file.path()).output().unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "OK\nOK\nOK\n1\nOK\n2\n"
    );
}

#[test]
fn run_stop_on_error_fails_process() {
    let file = script("COMMIT\nPUT k 1\n");
    let output = nestkv()
        .args(["run", "--stop-on-error"])
        .arg(file.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "ERR no active transaction\n"
    );
}

#[test]
fn run_json_summary() {
    let file = script("PUT a 1\nGET b\n");
    let output = nestkv()
        .args(["--format", "json", "run"])
        .arg(file.path())
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    let summary_line = stdout.lines().last().unwrap();
    let summary: serde_json::Value = serde_json::from_str(summary_line).unwrap();
    assert_eq!(summary["executed"], 2);
    assert_eq!(summary["errors"], 1);
}

#[test]
fn tombstones_flag_changes_delete() {
    let file = script("PUT k 1\nBEGIN\nDEL k\nCOMMIT\nEXISTS k\n");

    let local = nestkv().arg("run").arg(file.path()).output().unwrap();
    assert!(String::from_utf8_lossy(&local.stdout).ends_with("1\n"));

    let tomb = nestkv()
        .args(["--tombstones", "run"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(String::from_utf8_lossy(&tomb.stdout).ends_with("0\n"));
}

#[test]
fn shell_reads_stdin() {
    let mut child = nestkv()
        .arg("shell")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"put x 7\nget x\nrollback\nexit\nget x\n")
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "OK\n7\nERR no active transaction\nBYE\n"
    );
}

#[test]
fn missing_script_is_an_error() {
    let output = nestkv()
        .args(["run", "/definitely/not/here.nkv"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}
