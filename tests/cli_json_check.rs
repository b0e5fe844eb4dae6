mod common;

use common::{fixtures, TestEnv};
use serde_json::Value;

#[test]
fn test_check_json_emits_ndjson_event_stream() {
    let env = TestEnv::new();
    env.write_valid_entry("owner/repo", "owner/repo");

    let result = env.run(&["check", "--json"]);

    assert!(result.success, "got:\n{}", result.combined_output());

    let lines: Vec<&str> = result
        .stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .collect();
    assert!(
        lines.len() > 1,
        "expected NDJSON (multiple lines), got:\n{}",
        result.stdout
    );

    let first: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["event"], "start");
    assert_eq!(first["command"], "check");

    let last: Value = serde_json::from_str(lines[lines.len() - 1]).unwrap();
    assert_eq!(last["event"], "complete");
    assert_eq!(last["command"], "check");
    assert_eq!(last["success"], true);
    assert_eq!(last["entries"], 1);

    assert!(
        lines.iter().any(|l| {
            serde_json::from_str::<Value>(l)
                .ok()
                .is_some_and(|v| v["event"] == "entry" && v["entry"] == "owner/repo")
        }),
        "expected an entry event, got:\n{}",
        result.stdout
    );
}

#[test]
fn test_check_json_reports_violations_per_entry() {
    let env = TestEnv::new();
    env.write_manifest("owner/sparse", &fixtures::manifest("owner/sparse"));
    env.write_topic("owner/sparse", "only.md", &fixtures::topic("only", 0));

    let result = env.run(&["check", "--json"]);

    assert!(!result.success);

    let entry = result
        .stdout
        .lines()
        .filter_map(|l| serde_json::from_str::<Value>(l).ok())
        .find(|v| v["event"] == "entry")
        .expect("expected an entry event");

    assert_eq!(entry["entry"], "owner/sparse");
    assert_eq!(entry["errors"], 1);
    let violations = entry["violations"].as_array().unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0]["kind"], "insufficient-topics");
    assert_eq!(violations[0]["severity"], "error");

    let complete = result
        .stdout
        .lines()
        .filter_map(|l| serde_json::from_str::<Value>(l).ok())
        .find(|v| v["event"] == "complete")
        .unwrap();
    assert_eq!(complete["success"], false);
}

#[test]
fn test_check_json_reports_fatal_entries() {
    let env = TestEnv::new();
    env.write_manifest("owner/broken", "not json");

    let result = env.run(&["check", "--json"]);

    assert!(!result.success);

    let entry = result
        .stdout
        .lines()
        .filter_map(|l| serde_json::from_str::<Value>(l).ok())
        .find(|v| v["event"] == "entry")
        .unwrap();

    assert!(entry["fatal"]
        .as_str()
        .unwrap()
        .contains("malformed grimoire.json"));
}
