//! End-to-end tests for the comm binary.
//!
//! Tests cover:
//! 1. Column layout and suppression flags
//! 2. Case-insensitive comparison
//! 3. stdin operand
//! 4. Usage and open errors
//! 5. Extension flags (--output-delimiter, --sequential, --stats)

use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

// =============================================================================
// Helper functions
// =============================================================================

fn create_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

fn run_comm(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_comm"))
        .args(args)
        .output()
        .expect("Failed to run comm")
}

fn run_comm_with_stdin(args: &[&str], stdin_content: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_comm"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn comm");

    if let Some(mut stdin) = child.stdin.take() {
        // The child may exit before reading (usage errors).
        let _ = stdin.write_all(stdin_content.as_bytes());
    }

    child.wait_with_output().expect("Failed to wait for comm")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Run comm on two in-memory inputs with extra flags.
fn comm(flags: &[&str], a: &str, b: &str) -> Output {
    let fa = create_file(a);
    let fb = create_file(b);
    let mut args: Vec<&str> = flags.to_vec();
    args.push(fa.path().to_str().unwrap());
    args.push(fb.path().to_str().unwrap());
    run_comm(&args)
}

const A: &str = "a\nb\nd\n";
const B: &str = "b\nc\nd\n";

// =============================================================================
// Column layout
// =============================================================================

#[test]
fn test_three_columns() {
    let output = comm(&[], A, B);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "a\n\t\tb\n\tc\n\t\td\n");
}

#[test]
fn test_suppress_column_1() {
    let output = comm(&["-1"], A, B);
    assert_eq!(stdout(&output), "\t\tb\n\tc\n\t\td\n");
}

#[test]
fn test_suppress_column_2() {
    let output = comm(&["-2"], A, B);
    assert_eq!(stdout(&output), "a\n\t\tb\n\t\td\n");
}

#[test]
fn test_suppress_column_3() {
    let output = comm(&["-3"], A, B);
    assert_eq!(stdout(&output), "a\n\tc\n");
}

#[test]
fn test_combined_short_flags() {
    let output = comm(&["-12"], A, B);
    assert_eq!(stdout(&output), "\t\tb\n\t\td\n");

    let output = comm(&["-1", "-2", "-3"], A, B);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_crlf_input() {
    let output = comm(&[], "a\r\nb\r\n", "b\r\n");
    assert_eq!(stdout(&output), "a\n\t\tb\n");
}

#[test]
fn test_empty_file() {
    let output = comm(&[], "", "x\ny\n");
    assert_eq!(stdout(&output), "\tx\n\ty\n");

    let output = comm(&[], "", "");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
}

// =============================================================================
// Case-insensitive comparison
// =============================================================================

#[test]
fn test_ignore_case_uses_second_file_text() {
    let output = comm(&["-i"], "Apple\n", "apple\n");
    assert_eq!(stdout(&output), "\t\tapple\n");
}

#[test]
fn test_case_sensitive_by_default() {
    let output = comm(&[], "Apple\n", "apple\n");
    assert_eq!(stdout(&output), "Apple\n\tapple\n");
}

// =============================================================================
// stdin
// =============================================================================

#[test]
fn test_stdin_as_first_input() {
    let fb = create_file(B);
    let output = run_comm_with_stdin(&["-", fb.path().to_str().unwrap()], A);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "a\n\t\tb\n\tc\n\t\td\n");
}

#[test]
fn test_stdin_twice_rejected() {
    let output = run_comm_with_stdin(&["-", "-"], A);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("standard input"));
    assert_eq!(stdout(&output), "");
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_wrong_argument_count() {
    let fa = create_file(A);
    let output = run_comm(&[fa.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Usage"));
    assert_eq!(stdout(&output), "");

    let output = run_comm(&[
        fa.path().to_str().unwrap(),
        fa.path().to_str().unwrap(),
        fa.path().to_str().unwrap(),
    ]);
    assert!(!output.status.success());
}

#[test]
fn test_missing_file() {
    let fa = create_file(A);
    let output = run_comm(&[fa.path().to_str().unwrap(), "/no/such/file.txt"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("/no/such/file.txt"));
    assert_eq!(stdout(&output), "");
}

// =============================================================================
// Extension flags
// =============================================================================

#[test]
fn test_output_delimiter() {
    let output = comm(&["--output-delimiter", "|"], A, B);
    assert_eq!(stdout(&output), "a\n||b\n|c\n||d\n");
}

#[test]
fn test_sequential_matches_threaded() {
    let threaded = comm(&["-i"], "apple\nBanana\ncherry\n", "APPLE\nbanana\ndate\n");
    let sequential = comm(
        &["-i", "--sequential"],
        "apple\nBanana\ncherry\n",
        "APPLE\nbanana\ndate\n",
    );
    assert_eq!(stdout(&threaded), stdout(&sequential));
    assert_eq!(stdout(&threaded), "\t\tAPPLE\n\t\tbanana\ncherry\n\tdate\n");
}

#[test]
fn test_channel_capacity_one() {
    let output = comm(&["--channel-capacity", "1"], A, B);
    assert_eq!(stdout(&output), "a\n\t\tb\n\tc\n\t\td\n");
}

#[test]
fn test_stats_on_stderr() {
    let output = comm(&["--stats"], A, B);
    assert_eq!(stdout(&output), "a\n\t\tb\n\tc\n\t\td\n");
    assert!(
        stderr(&output).contains("Only A: 1, Only B: 1, Both: 2"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn test_rerun_is_byte_identical() {
    let fa = create_file("k1\nk3\nk5\n");
    let fb = create_file("k2\nk3\nk4\n");
    let args = [fa.path().to_str().unwrap(), fb.path().to_str().unwrap()];
    let first = run_comm(&args);
    let second = run_comm(&args);
    assert_eq!(first.stdout, second.stdout);
}
