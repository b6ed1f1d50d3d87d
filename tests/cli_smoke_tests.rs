mod common;

use assert_cmd::Command;
use predicates::{prelude::*, str::contains};
use serde_json::Value;

fn cli(base: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("cashflow_cli").expect("binary built");
    cmd.arg("--data-dir")
        .arg(base)
        .args(["--owner", "alice", "--today", "2025-03-12", "--no-color"]);
    cmd
}

#[test]
fn schedule_balance_and_project_round_trip() {
    let base = common::temp_base_dir();

    cli(&base)
        .args(["schedule", "add", "Rent", "1200", "expense", "monthly", "2025-03-31"])
        .assert()
        .success()
        .stdout(contains("Added schedule `Rent`"));
    cli(&base)
        .args(["balance", "set", "1000"])
        .assert()
        .success()
        .stdout(contains("Balance set to 1000.00"));
    cli(&base)
        .args(["hold", "add", "Check", "25.50", "expense"])
        .assert()
        .success();

    let output = cli(&base)
        .args(["project", "--json"])
        .output()
        .expect("run project");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(json["owner"], "alice");
    assert_eq!(json["today"], "2025-03-12");
    let upcoming = json["upcoming"].as_array().expect("upcoming array");
    assert_eq!(upcoming[0]["name"], "Check");
    assert_eq!(upcoming[1]["name"], "Rent");
    assert_eq!(upcoming[1]["date"], "2025-03-31");
    assert_eq!(json["running"][0]["date"], "2025-03-12");
    assert!(json["rejected"].as_array().expect("rejected").is_empty());
}

#[test]
fn schedules_listing_shows_catalog() {
    let base = common::temp_base_dir();
    for (name, day) in [("Phone", "2025-04-20"), ("Water", "2025-04-09")] {
        cli(&base)
            .args(["schedule", "add", name, "30", "expense", "Monthly", day])
            .assert()
            .success();
    }
    cli(&base)
        .arg("schedules")
        .assert()
        .success()
        .stdout(contains("Water").and(contains("Phone")));

    cli(&base)
        .args(["schedule", "remove", "Water"])
        .assert()
        .success();
    cli(&base)
        .args(["schedule", "remove", "Water"])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}

#[test]
fn skip_add_and_remove_by_name() {
    let base = common::temp_base_dir();
    cli(&base)
        .args(["skip", "add", "Paycheck", "200", "income", "2025-03-20"])
        .assert()
        .success()
        .stdout(contains("Skipping `Paycheck` on 2025-03-20"));
    cli(&base)
        .args(["skip", "list"])
        .assert()
        .success()
        .stdout(contains("Expense"));
    cli(&base)
        .args(["skip", "remove", "Paycheck"])
        .assert()
        .success()
        .stdout(contains("Removed skip"));
}

#[test]
fn invalid_input_is_reported() {
    let base = common::temp_base_dir();
    cli(&base)
        .args(["schedule", "add", "Gym", "40", "expense", "fortnightly", "2025-04-01"])
        .assert()
        .failure()
        .stderr(contains("unknown frequency"));
    cli(&base)
        .arg("teleport")
        .assert()
        .failure()
        .stderr(contains("Unknown command `teleport`"));
}

#[test]
fn owner_is_required_for_account_commands() {
    let base = common::temp_base_dir();
    Command::cargo_bin("cashflow_cli")
        .expect("binary built")
        .env("CASHFLOW_HOME", &base)
        .env_remove("RUST_LOG")
        .arg("project")
        .assert()
        .failure()
        .stderr(contains("no account owner"));
}

#[test]
fn help_lists_commands() {
    let base = common::temp_base_dir();
    cli(&base)
        .arg("help")
        .assert()
        .success()
        .stdout(contains("schedule").and(contains("balance")));
}
