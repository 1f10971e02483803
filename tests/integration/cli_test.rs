//! End-to-end tests of the rankscan binary

use predicates::prelude::*;
use std::fs;

use crate::helpers::Sandbox;

const HUNT_LOG: &str = "\
[10:00:00] You feel stronger.
[10:01:00] You feel stronger.
[10:02:00] You feel nimble.
[10:03:00] You have learned a little about the ways of the Rat.
[10:04:00] * You recover the Rat fur, worth 100c. Your share is 40c.
[10:05:00] * Bob recovers the Rat fur, worth 50c. Your share is 10c.
";

#[test]
fn help_lists_commands() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn config_init_writes_defaults_and_tables() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["config", "init"]).assert().success();

    let home = sandbox.home_path();
    assert!(home.join("config.toml").exists());
    assert!(home.join("rankmessages.txt").exists());
    assert!(home.join("trainers.txt").exists());
    assert!(home.join("specialphrases.txt").exists());

    let config = fs::read_to_string(home.join("config.toml")).unwrap();
    assert!(config.contains("workers = 4"));
}

#[test]
fn scan_prints_ranks_studies_and_coins() {
    let sandbox = Sandbox::new();
    sandbox.with_character("Mira");
    sandbox.write_log("session.txt", HUNT_LOG);

    sandbox
        .cmd()
        .args(["scan", "Mira"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stonewall  2"))
        .stdout(predicate::str::contains("learned a little about Rat (ways)  1"))
        .stdout(predicate::str::contains("Coins: 150c (skinned 100c, shares 50c)"))
        .stdout(predicate::str::contains("Rat: Total 150c, share 50c, you skinned 1"));

    let store = fs::read_to_string(sandbox.home_path().join("characters.json")).unwrap();
    assert!(store.contains("\"Stonewall\": 2"));
}

#[test]
fn scan_json_is_machine_readable() {
    let sandbox = Sandbox::new();
    sandbox.with_character("Mira");
    sandbox.write_log("session.txt", HUNT_LOG);

    let output = sandbox.cmd().args(["scan", "Mira", "--json"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["ranks"]["Aldo"], 1);
    assert_eq!(value["skinned_total"], 100);
    assert_eq!(value["creatures"]["learned a little about Rat (ways)"], "1");
}

#[test]
fn show_and_export_use_stored_results() {
    let sandbox = Sandbox::new();
    sandbox.with_character("Mira");
    sandbox.write_log("session.txt", HUNT_LOG);
    sandbox.cmd().args(["scan", "Mira"]).assert().success();

    sandbox
        .cmd()
        .args(["show", "Mira"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Aldo"));

    let csv_path = sandbox.home_path().join("out.csv");
    sandbox
        .cmd()
        .args(["export", "Mira", "--output"])
        .arg(&csv_path)
        .assert()
        .success();
    let csv = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(
        csv,
        "Trainer,Ranks\nAldo,1\nStonewall,2\nlearned a little about Rat (ways),1\n"
    );
}

#[test]
fn ignored_study_is_left_out_of_export() {
    let sandbox = Sandbox::new();
    sandbox.with_character("Mira");
    sandbox.write_log("session.txt", HUNT_LOG);
    sandbox.cmd().args(["scan", "Mira"]).assert().success();
    sandbox
        .cmd()
        .args(["ignore", "add", "Mira", "learned a little about Rat (ways)"])
        .assert()
        .success();

    sandbox
        .cmd()
        .args(["export", "Mira"])
        .assert()
        .success()
        .stdout("Trainer,Ranks\nAldo,1\nStonewall,2\n");
}

#[test]
fn misaligned_tables_stop_the_scan() {
    let sandbox = Sandbox::new();
    sandbox.with_character("Mira");
    sandbox.write_tables(&["You feel stronger", "You feel nimble"], &["Stonewall"], &[]);
    sandbox.write_log("session.txt", HUNT_LOG);

    sandbox
        .cmd()
        .args(["scan", "Mira"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Table alignment error"));
    let store = fs::read_to_string(sandbox.home_path().join("characters.json")).unwrap();
    assert!(!store.contains("Stonewall"));
}

#[test]
fn failed_folder_still_reports_the_rest() {
    let sandbox = Sandbox::new();
    sandbox.with_character("Mira");
    sandbox.write_log("session.txt", HUNT_LOG);
    let missing = sandbox.home_path().join("no-such-folder");
    sandbox
        .cmd()
        .args(["folder", "add", "Mira"])
        .arg(&missing)
        .assert()
        .success();

    sandbox
        .cmd()
        .args(["scan", "Mira"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Stonewall  2"))
        .stderr(predicate::str::contains("1 of 2 folder(s) failed"));
}

#[test]
fn unknown_character_is_an_error() {
    let sandbox = Sandbox::new();
    sandbox.write_tables(&[], &[], &[]);
    sandbox
        .cmd()
        .args(["scan", "Nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown character 'Nobody'"));
}

#[test]
fn search_lists_matching_logs() {
    let sandbox = Sandbox::new();
    sandbox.with_character("Mira");
    let hit = sandbox.write_log("session.txt", HUNT_LOG);
    sandbox.write_log("other.txt", "nothing to see\n");

    sandbox
        .cmd()
        .args(["search", "Mira", "Bob recovers"])
        .assert()
        .success()
        .stdout(predicate::str::contains(hit.display().to_string()))
        .stdout(predicate::str::contains("other.txt").not());
}

#[test]
fn completions_are_generated() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["completions", "--shell", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rankscan"));
}
