//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory
//! and checks exit codes and JSON output.

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_teamboard"))
        .args(args)
        .env("TEAMBOARD_DATA_DIR", data_dir)
        .env_remove("TEAMBOARD_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_ok(data_dir: &Path, args: &[&str]) -> String {
    let (code, stdout, stderr) = run_cli(data_dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    stdout
}

fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let stdout = run_ok(data_dir, args);
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

fn seed(dir: &Path) {
    for name in ["alice", "bob", "carol"] {
        run_ok(dir, &["member", "add", name]);
    }
    run_ok(dir, &["member", "add", "lead", "--role", "leader"]);
}

#[test]
fn test_member_list() {
    let dir = TempDir::new().unwrap();
    seed(dir.path());
    let members = run_json(dir.path(), &["member", "list"]);
    assert_eq!(members.as_array().unwrap().len(), 4);
}

#[test]
fn test_activity_add_and_list() {
    let dir = TempDir::new().unwrap();
    seed(dir.path());
    let out = run_ok(
        dir.path(),
        &["activity", "add", "alice", "簽單 (5分)", "--date", "2026-03-04"],
    );
    assert!(out.contains("activity logged:"));

    let list = run_json(dir.path(), &["activity", "list", "--member", "alice"]);
    let first = &list.as_array().unwrap()[0];
    assert_eq!(first["activity_type"], "policy_signed");
    assert_eq!(first["points"], 5);
    assert_eq!(first["occurred_on"], "2026-03-04");
}

#[test]
fn test_activity_add_rejects_unknown_type() {
    let dir = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["activity", "add", "alice", "lunch"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Unknown activity type"));
}

#[test]
fn test_activity_edit_recomputes_points() {
    let dir = TempDir::new().unwrap();
    seed(dir.path());
    run_ok(
        dir.path(),
        &["activity", "add", "bob", "meeting", "--date", "2026-03-04"],
    );
    let list = run_json(dir.path(), &["activity", "list"]);
    let id = list[0]["id"].as_i64().unwrap().to_string();

    run_ok(dir.path(), &["activity", "edit", &id, "--type", "new_member_code"]);
    let list = run_json(dir.path(), &["activity", "list"]);
    assert_eq!(list[0]["points"], 8);
    assert_eq!(list[0]["occurred_on"], "2026-03-04");

    run_ok(dir.path(), &["activity", "delete", &id]);
    let (code, _, _) = run_cli(dir.path(), &["activity", "delete", &id]);
    assert_ne!(code, 0);
}

#[test]
fn test_activity_types_and_template() {
    let dir = TempDir::new().unwrap();
    let types = run_json(dir.path(), &["activity", "types"]);
    assert_eq!(types.as_array().unwrap().len(), 6);

    let template = run_ok(dir.path(), &["activity", "template", "recruit_talk"]);
    assert!(!template.trim().is_empty());
}

#[test]
fn test_points_board_and_incentive() {
    let dir = TempDir::new().unwrap();
    seed(dir.path());
    for kind in ["policy_signed", "meeting", "meeting"] {
        run_ok(
            dir.path(),
            &["activity", "add", "alice", kind, "--date", "2026-03-03"],
        );
    }

    let board = run_json(dir.path(), &["board", "points", "2026-03-04"]);
    let rows = board.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["member"], "alice");
    assert_eq!(rows[0]["score"], 7);
    assert_eq!(rows[0]["rank"], 1);

    let week = run_json(dir.path(), &["incentive", "week", "--date", "2026-03-04"]);
    assert_eq!(week["week_start"], "2026-03-02");
    assert_eq!(week["outcome"]["penalty_pool"], 200);
    assert_eq!(week["outcome"]["winners"][0], "alice");
}

#[test]
fn test_revenue_board_rejects_week() {
    let dir = TempDir::new().unwrap();
    seed(dir.path());
    run_ok(dir.path(), &["revenue", "set", "bob", "2026-02", "25000"]);

    let board = run_json(dir.path(), &["board", "revenue", "2026-Q1"]);
    assert_eq!(board[0]["member"], "bob");
    assert_eq!(board[0]["fyc"], 25000.0);

    let (code, _, _) = run_cli(dir.path(), &["board", "revenue", "2026-02-03"]);
    assert_ne!(code, 0);

    let champion = run_json(dir.path(), &["board", "champion", "2026-02"]);
    assert_eq!(champion["member"], "bob");
}

#[test]
fn test_inbox_show_and_ack() {
    let dir = TempDir::new().unwrap();
    seed(dir.path());
    run_ok(dir.path(), &["activity", "add", "alice", "meeting"]);
    run_ok(dir.path(), &["activity", "add", "bob", "meeting"]);

    let pending = run_json(dir.path(), &["inbox", "show", "bob"]);
    let pending = pending.as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["member"], "alice");

    run_ok(dir.path(), &["inbox", "ack", "bob"]);
    let pending = run_json(dir.path(), &["inbox", "show", "bob"]);
    assert!(pending.as_array().unwrap().is_empty());
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    assert_eq!(
        run_ok(dir.path(), &["config", "get", "incentive.min_activity_count"]).trim(),
        "3"
    );
    run_ok(dir.path(), &["config", "set", "incentive.penalty_per_miss", "150"]);
    assert_eq!(
        run_ok(dir.path(), &["config", "get", "incentive.penalty_per_miss"]).trim(),
        "150"
    );

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "incentive.min_activity_count", "0"]);
    assert_ne!(code, 0);

    run_ok(dir.path(), &["config", "reset"]);
    assert_eq!(
        run_ok(dir.path(), &["config", "get", "incentive.penalty_per_miss"]).trim(),
        "100"
    );
}

#[test]
fn test_config_switches_laggard_rule_to_score() {
    let dir = TempDir::new().unwrap();
    seed(dir.path());
    run_ok(
        dir.path(),
        &["config", "set", "incentive.laggard_rule", r#"{"score":{"min_score":5}}"#],
    );
    let rule = run_ok(dir.path(), &["config", "get", "incentive.laggard_rule"]);
    let rule: serde_json::Value = serde_json::from_str(rule.trim()).unwrap();
    assert_eq!(rule["score"]["min_score"], 5);

    // two signed policies: below the count minimum but above the score floor
    for _ in 0..2 {
        run_ok(
            dir.path(),
            &["activity", "add", "alice", "policy_signed", "--date", "2026-03-03"],
        );
    }
    let week = run_json(dir.path(), &["incentive", "week", "--date", "2026-03-03"]);
    let laggards = week["outcome"]["laggards"].as_array().unwrap();
    assert!(!laggards.iter().any(|m| m == "alice"));
    assert_eq!(week["outcome"]["winners"][0], "alice");

    run_ok(dir.path(), &["config", "set", "incentive.laggard_rule", "count"]);
    assert_eq!(
        run_ok(dir.path(), &["config", "get", "incentive.laggard_rule"]).trim(),
        "count"
    );
}

#[test]
fn test_config_season_start_can_be_cleared() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["config", "set", "incentive.season_start", "2026-01-05"]);
    assert_eq!(
        run_ok(dir.path(), &["config", "get", "incentive.season_start"]).trim(),
        "2026-01-05"
    );
    run_ok(dir.path(), &["config", "set", "incentive.season_start", ""]);
    assert_eq!(
        run_ok(dir.path(), &["config", "get", "incentive.season_start"]).trim(),
        "null"
    );
}

#[test]
fn test_config_list_and_section_reset() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["config", "set", "targets.mdrt_fyc", "900000"]);
    run_ok(dir.path(), &["config", "set", "leaderboard.include_leaders", "true"]);

    let listing = run_ok(dir.path(), &["config", "list"]);
    assert!(listing.contains("[targets]"));
    assert!(listing.contains("mdrt_fyc = 900000"));

    run_ok(dir.path(), &["config", "reset", "targets"]);
    let json = run_json(dir.path(), &["config", "list", "--json"]);
    assert_eq!(json["targets"]["mdrt_fyc"], 800000.0);
    assert_eq!(json["leaderboard"]["include_leaders"], true);

    let (code, _, _) = run_cli(dir.path(), &["config", "reset", "theme"]);
    assert_ne!(code, 0);

    let path = run_ok(dir.path(), &["config", "path"]);
    assert!(path.trim().ends_with("config.toml"));
}

#[test]
fn test_board_rejects_week_before_calendar_start() {
    let dir = TempDir::new().unwrap();
    seed(dir.path());
    let (code, _, stderr) = run_cli(dir.path(), &["board", "points", "--", "-262143-01-01"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}
