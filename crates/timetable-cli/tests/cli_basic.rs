//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own data directory.

use std::process::Command;

use tempfile::TempDir;

const CATALOG: &str = r#"const courseData = [
    {
        "code": "COMP 1021",
        "title": "Introduction to Computer Science",
        "credits": 3,
        "matchingRequired": true,
        "sections": [
            {"id": "L1", "slots": [{"time": "Mo 09:00AM - 10:20AM", "venue": "LTA", "instructor": "LEE"}]},
            {"id": "T1", "slots": [{"time": "We 09:00AM - 10:00AM", "venue": "2404", "instructor": "TA"}]},
            {"id": "T2", "slots": [{"time": "Th 09:00AM - 10:00AM", "venue": "2405", "instructor": "TA"}]}
        ]
    },
    {
        "code": "MATH 1013",
        "title": "Calculus IB",
        "credits": 4,
        "matchingRequired": false,
        "sections": [
            {"id": "L1", "slots": [{"time": "Mo 09:30AM - 10:30AM", "venue": "LTC", "instructor": "CHAN"}]}
        ]
    }
];"#;

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("courses.json"), CATALOG).unwrap();
    dir
}

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(dir: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_timetable"))
        .arg("--data-dir")
        .arg(dir.path())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).unwrap()
}

#[test]
fn test_catalog_subjects() {
    let dir = workspace();
    let (stdout, _, code) = run_cli(&dir, &["catalog", "subjects"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["COMP", "MATH"]);
}

#[test]
fn test_select_lecture_then_tutorial() {
    let dir = workspace();

    let pending = run_json(&dir, &["select", "COMP 1021", "L1", "--json"]);
    assert_eq!(pending["outcome"], "pending");
    assert_eq!(pending["lecture_id"], "L1");

    let committed = run_json(&dir, &["select", "COMP 1021", "T1", "--json"]);
    assert_eq!(committed["outcome"], "committed");
    assert_eq!(
        committed["added"],
        serde_json::json!(["COMP 1021-L1", "COMP 1021-T1"])
    );

    let (stdout, _, code) = run_cli(&dir, &["plan", "credits"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "3");
}

#[test]
fn test_mismatched_tutorial_is_rejected() {
    let dir = workspace();
    run_json(&dir, &["select", "COMP 1021", "L1", "--json"]);

    let rejected = run_json(&dir, &["select", "COMP 1021", "T2", "--json"]);
    assert_eq!(rejected["outcome"], "rejected");
    assert_eq!(rejected["reason"], "invalid_match");

    let (stdout, _, _) = run_cli(&dir, &["plan", "show"]);
    assert!(stdout.contains("pending: COMP 1021 L1"));
}

#[test]
fn test_cancel_pending() {
    let dir = workspace();
    run_json(&dir, &["select", "COMP 1021", "L1", "--json"]);

    let (stdout, _, code) = run_cli(&dir, &["cancel"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("cancelled COMP 1021 L1"));

    let (stdout, _, _) = run_cli(&dir, &["cancel"]);
    assert!(stdout.contains("nothing pending"));
}

#[test]
fn test_conflict_is_reported_but_committed() {
    let dir = workspace();
    run_json(&dir, &["select", "COMP 1021", "L1", "--json"]);
    run_json(&dir, &["select", "COMP 1021", "T1", "--json"]);

    let (stdout, _, code) = run_cli(&dir, &["select", "MATH 1013", "L1"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Time Conflict with COMP 1021 L1"));
    assert!(stdout.contains("Added: MATH 1013-L1"));
}

#[test]
fn test_layout_json_splits_overlap() {
    let dir = workspace();
    run_json(&dir, &["select", "COMP 1021", "L1", "--json"]);
    run_json(&dir, &["select", "COMP 1021", "T1", "--json"]);
    run_json(&dir, &["select", "MATH 1013", "L1", "--json"]);

    let rows = run_json(&dir, &["layout", "--json"]);
    let monday: Vec<_> = rows
        .as_array()
        .unwrap()
        .iter()
        .filter(|r| r["day"] == 1)
        .collect();
    assert_eq!(monday.len(), 2);
    for row in &monday {
        assert_eq!(row["column_count"], 2);
    }
    assert_ne!(monday[0]["column"], monday[1]["column"]);
}

#[test]
fn test_remove_by_tutorial_uid_removes_course() {
    let dir = workspace();
    run_json(&dir, &["select", "COMP 1021", "L1", "--json"]);
    run_json(&dir, &["select", "COMP 1021", "T1", "--json"]);

    let (stdout, _, code) = run_cli(&dir, &["remove", "COMP 1021-T1", "--yes"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("COMP 1021-L1"));

    let plan = run_json(&dir, &["plan", "show", "--json"]);
    assert_eq!(plan["items"], serde_json::json!([]));
}

#[test]
fn test_remove_unknown_fails() {
    let dir = workspace();
    let (_, stderr, code) = run_cli(&dir, &["remove", "COMP 1021", "--yes"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_plans_are_independent() {
    let dir = workspace();
    run_json(&dir, &["select", "MATH 1013", "L1", "--json"]);

    let (_, _, code) = run_cli(&dir, &["plan", "use", "Plan 2"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(&dir, &["plan", "credits"]);
    assert_eq!(stdout.trim(), "0");

    let (stdout, _, _) = run_cli(&dir, &["plan", "list"]);
    assert!(stdout.contains("  Plan 1"));
    assert!(stdout.contains("* Plan 2"));
}

#[test]
fn test_config_set_get() {
    let dir = workspace();
    let (_, _, code) = run_cli(&dir, &["config", "set", "conflicts.policy", "strict"]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(&dir, &["config", "get", "conflicts.policy"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "strict");

    let (_, _, code) = run_cli(&dir, &["config", "set", "conflicts.policy", "sometimes"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_list_and_unknown_key() {
    let dir = workspace();
    let (stdout, _, code) = run_cli(&dir, &["config", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("catalog.path = courses.json"));
    assert!(stdout.contains("conflicts.policy = advisory"));

    let (_, stderr, code) = run_cli(&dir, &["config", "get", "conflicts.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown configuration key: conflicts.nope"));

    let (_, _, code) = run_cli(&dir, &["config", "reset", "--yes"]);
    assert_eq!(code, 0);
}
