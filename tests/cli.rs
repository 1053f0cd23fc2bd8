//! End-to-end CLI contract tests: exit codes, diff output, write behavior.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CANONICAL_DOC: &str = r#"{
    "Foo": {
        "description": "d",
        "version": "1",
        "website": "w",
        "containers": {
            "app": {
                "image": "img",
                "launch_order": 1,
                "ports": {
                    "80": {
                        "description": "pd",
                        "label": "pl",
                        "host_default": 80
                    }
                }
            }
        }
    }
}
"#;

const CANONICAL_INDEX: &str = "{\n    \"foo\": \"a.json\"\n}\n";

const MESSY_DOC: &str = r#"{"Foo": {"description": "d", "version": "1", "website": "w",
"containers": {"app": {"image": "img", "launch_order": "1",
"ports": {"80": {"description": "pd", "label": "pl", "host_default": "80"}}}}}}"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Fixture {
            dir: TempDir::new().unwrap(),
        }
    }

    fn write(&self, name: &str, content: &str) {
        std::fs::write(self.dir.path().join(name), content).unwrap();
    }

    fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).unwrap()
    }

    fn cmd(&self) -> Command {
        let mut c = Command::cargo_bin("rockonfmt").unwrap();
        c.current_dir(self.dir.path()).env("NO_COLOR", "1");
        c
    }
}

#[test]
fn check_succeeds_on_canonical_input() {
    let fx = Fixture::new();
    fx.write("a.json", CANONICAL_DOC);
    fx.write("root.json", CANONICAL_INDEX);

    fx.cmd().args(["--check", "a.json"]).assert().success();
}

#[test]
fn divergence_fails_without_diff() {
    let fx = Fixture::new();
    fx.write("a.json", MESSY_DOC);
    fx.write("root.json", CANONICAL_INDEX);

    fx.cmd().args(["--check", "a.json"]).assert().code(1);
}

#[test]
fn diff_mode_emits_unified_diff_and_exits_zero() {
    let fx = Fixture::new();
    fx.write("a.json", MESSY_DOC);
    fx.write("root.json", CANONICAL_INDEX);

    fx.cmd()
        .args(["--diff", "a.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--- a/a.json"))
        .stdout(predicate::str::contains("+++ b/a.json"))
        .stdout(predicate::str::contains("@@"));
}

#[test]
fn diff_mode_is_quiet_on_canonical_input() {
    let fx = Fixture::new();
    fx.write("a.json", CANONICAL_DOC);
    fx.write("root.json", CANONICAL_INDEX);

    fx.cmd()
        .args(["--check", "--diff", "a.json"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn write_mode_rewrites_and_is_idempotent() {
    let fx = Fixture::new();
    fx.write("a.json", MESSY_DOC);
    fx.write("root.json", "{}");

    // First pass formats the document and the index; divergence without
    // --diff still exits 1.
    fx.cmd().args(["--write", "a.json"]).assert().code(1);
    assert_eq!(fx.read("a.json"), CANONICAL_DOC);
    assert_eq!(fx.read("root.json"), CANONICAL_INDEX);

    // Second pass finds nothing to do.
    fx.cmd().args(["--write", "a.json"]).assert().success();
    assert_eq!(fx.read("a.json"), CANONICAL_DOC);
}

#[test]
fn stale_index_entry_is_replaced_under_write() {
    let fx = Fixture::new();
    fx.write("a.json", CANONICAL_DOC);
    fx.write("root.json", "{\n    \"Bar\": \"a.json\"\n}\n");

    fx.cmd()
        .args(["--write", "a.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("name mismatch"));
    assert_eq!(fx.read("root.json"), CANONICAL_INDEX);
}

#[test]
fn unmatched_pattern_exits_2() {
    let fx = Fixture::new();
    fx.write("root.json", CANONICAL_INDEX);

    fx.cmd()
        .args(["--check", "missing-*.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no matching files"));
}

#[test]
fn malformed_json_document_exits_3() {
    let fx = Fixture::new();
    fx.write("a.json", "{not json");
    fx.write("root.json", CANONICAL_INDEX);

    fx.cmd().args(["--check", "a.json"]).assert().code(3);
}

#[test]
fn missing_index_exits_4() {
    let fx = Fixture::new();
    fx.write("a.json", CANONICAL_DOC);

    fx.cmd()
        .args(["--check", "a.json"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("index"));
}

#[test]
fn malformed_index_exits_5() {
    let fx = Fixture::new();
    fx.write("a.json", CANONICAL_DOC);
    fx.write("root.json", "{oops");

    fx.cmd().args(["--check", "a.json"]).assert().code(5);
}

#[test]
fn schema_mismatch_in_json_document_exits_1() {
    let fx = Fixture::new();
    fx.write("a.json", r#"{"Foo": {"version": "1"}}"#);
    fx.write("root.json", CANONICAL_INDEX);

    fx.cmd().args(["--check", "a.json"]).assert().code(1);
}

#[test]
fn non_json_input_is_skipped_with_advisory() {
    let fx = Fixture::new();
    fx.write("notes.txt", "[1, 2]");
    fx.write("root.json", "{}\n");

    fx.cmd()
        .args(["--check", "notes.txt"])
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping"));
}

#[test]
fn explicit_root_flag_overrides_default_location() {
    let fx = Fixture::new();
    std::fs::create_dir(fx.dir.path().join("ix")).unwrap();
    fx.write("a.json", CANONICAL_DOC);
    fx.write("ix/custom.json", CANONICAL_INDEX);

    fx.cmd()
        .args(["--check", "--root", "ix/custom.json", "a.json"])
        .assert()
        .success();
}

#[test]
fn json_output_prints_machine_readable_envelope() {
    let fx = Fixture::new();
    fx.write("a.json", MESSY_DOC);
    fx.write("root.json", CANONICAL_INDEX);

    let assert = fx
        .cmd()
        .args(["--output", "json", "a.json"])
        .assert()
        .code(1);
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(v["summary"]["divergent"], 1);
    assert_eq!(v["results"][0]["changed"], true);
}
