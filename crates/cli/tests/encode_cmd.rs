//! CLI tests for `tspl encode` and `tspl sample`.

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

use assert_cmd::cargo;

const PRICE_TAG_TSPL: &str = "SIZE 38 mm 20 mm\r\n\
    DIRECTION 1\r\n\
    CLS\r\n\
    TEXT 25,68,\"0\",0,12,12,1,\"SIZE:32\"\r\n\
    TEXT 300,68,\"0\",0,12,12,1,\"Rs. 750\"\r\n\
    BARCODE 33,304,\"128\",20,1,0,2,4, \"2024123030\"\r\n\
    PRINT 1,1\r\n\
    EOP";

fn tspl_cmd() -> Command {
    Command::new(cargo::cargo_bin!("tspl"))
}

fn write_temp_job(content: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("job.json");
    fs::write(&path, content).unwrap();
    (dir, path.to_string_lossy().to_string())
}

fn sample_json() -> String {
    let output = tspl_cmd().arg("sample").output().expect("run sample");
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn sample_is_a_valid_job() {
    let json: serde_json::Value = serde_json::from_str(&sample_json()).expect("sample is JSON");
    assert_eq!(json["size"]["unit"], "mm");
    assert_eq!(json["elements"].as_array().map(Vec::len), Some(3));
}

#[test]
fn encode_writes_raw_tspl() {
    let (_dir, path) = write_temp_job(&sample_json());
    let output = tspl_cmd().args(["encode", &path]).output().unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8(output.stdout).unwrap(), PRICE_TAG_TSPL);
}

#[test]
fn encode_json_lists_commands() {
    let (_dir, path) = write_temp_job(&sample_json());
    let output = tspl_cmd()
        .args(["encode", &path, "--output", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let commands = json["commands"].as_array().unwrap();
    assert_eq!(commands.len(), 8);
    assert_eq!(commands[0], "SIZE 38 mm 20 mm\r\n");
    assert_eq!(commands[7], "EOP");
}

#[test]
fn encode_reads_stdin() {
    let mut child = tspl_cmd()
        .args(["encode", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(br#"{"size": {"width": 4, "height": 3}}"#)
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "SIZE 4 3\r\nDIRECTION 1\r\nCLS\r\n"
    );
}

#[test]
fn encode_reports_out_of_range_parameter() {
    let (_dir, path) = write_temp_job(
        r#"{"size": {"width": 4, "height": 3}, "print": {"sets": 11}}"#,
    );
    let output = tspl_cmd().args(["encode", &path]).output().unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "nothing encoded on failure");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("sets given to set_print must be in range 1-10, but 11 was given."),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn encode_points_at_json_syntax_error() {
    let (_dir, path) = write_temp_job("{\n  \"size\": {\"width\": 4,, \"height\": 3}\n}\n");
    let output = tspl_cmd().args(["encode", &path]).output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid job file"), "unexpected stderr: {stderr}");
    assert!(stderr.contains("job.json"), "excerpt names the file: {stderr}");
}
