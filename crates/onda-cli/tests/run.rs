// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! CLI smoke tests against the built binary.

use std::process::Command;

fn onda() -> Command {
    Command::new(env!("CARGO_BIN_EXE_onda"))
}

#[test]
fn runs_a_program_from_a_string() {
    let output = onda()
        .args(["-s", "def add(a, b) { return a + b }\nprint(add(2, 3))"])
        .output()
        .expect("binary runs");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "5\n");
}

#[test]
fn exit_code_mirrors_the_script_result() {
    let output = onda()
        .args(["-s", "return 7"])
        .output()
        .expect("binary runs");
    assert_eq!(output.status.code(), Some(7));

    let output = onda().args(["-s", "exit 3"]).output().expect("binary runs");
    assert_eq!(output.status.code(), Some(3));

    let output = onda().args(["-s", "x = 1"]).output().expect("binary runs");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn runtime_errors_print_a_traceback_to_stderr() {
    let output = onda()
        .args(["-s", "print(1 / 0)"])
        .output()
        .expect("binary runs");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("division by zero"), "stderr: {}", stderr);
}

#[test]
fn runs_a_script_file() {
    let dir = std::env::temp_dir().join(format!("onda-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join("hello.onda");
    std::fs::write(&path, "for i from 0 till 3 { print(i) }").expect("write script");

    let output = onda()
        .arg(path.to_string_lossy().as_ref())
        .output()
        .expect("binary runs");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "0\n1\n2\n");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_file_fails_with_a_file_error() {
    let output = onda()
        .arg("/no/such/script.onda")
        .output()
        .expect("binary runs");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot read"), "stderr: {}", stderr);
}
