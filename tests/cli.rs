use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn jsonmend() -> Command {
    Command::cargo_bin("jsonmend").unwrap()
}

#[test]
fn cli_stdin_stdout_basic() {
    jsonmend()
        .write_stdin("{'a':1, b: 'x'}")
        .assert()
        .success()
        .stdout(predicate::function(|out: &[u8]| {
            std::str::from_utf8(out)
                .ok()
                .and_then(|s| serde_json::from_str::<serde_json::Value>(s).ok())
                .is_some()
        }));
}

#[test]
fn cli_file_to_output_file() {
    let dir = tempdir().unwrap();
    let inp = dir.path().join("in.json");
    let out = dir.path().join("out.json");
    fs::write(&inp, "{a:1,}").unwrap();
    jsonmend()
        .args([inp.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .assert()
        .success();
    let s = fs::read_to_string(out).unwrap();
    let v: serde_json::Value = serde_json::from_str(&s).unwrap();
    assert_eq!(v, serde_json::json!({"a": 1}));
}

#[test]
fn cli_overwrite_and_pretty() {
    let dir = tempdir().unwrap();
    let inp = dir.path().join("inplace.json");
    fs::write(&inp, "{'a':1, b:2}").unwrap();

    jsonmend()
        .args(["--overwrite", inp.to_str().unwrap()])
        .assert()
        .success();
    let s = fs::read_to_string(&inp).unwrap();
    let v: serde_json::Value = serde_json::from_str(&s).unwrap();
    assert_eq!(v, serde_json::json!({"a": 1, "b": 2}));

    jsonmend()
        .args(["--overwrite", "--pretty", inp.to_str().unwrap()])
        .assert()
        .success();
    let pretty = fs::read_to_string(&inp).unwrap();
    assert!(pretty.contains('\n') && pretty.contains("  "));
}

#[test]
fn cli_stream_ndjson_aggregates() {
    let dir = tempdir().unwrap();
    let inp = dir.path().join("records.jsonl");
    fs::write(&inp, "{a:1}\n{b:2}\n").unwrap();
    let assert = jsonmend()
        .args(["--stream", "--chunk-size", "7", inp.to_str().unwrap()])
        .assert()
        .success();
    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v.as_array().map(|a| a.len()), Some(2));
}

#[test]
fn cli_unrepairable_input_exits_nonzero() {
    jsonmend()
        .write_stdin("1 2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unexpected character"));
}

#[test]
fn cli_unknown_option_exits_with_usage_error() {
    jsonmend().arg("--bogus").assert().code(2);
}
