//! Integration tests for the `bm` CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn blockmath() -> Command {
    let mut cmd = Command::cargo_bin("blockmath").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

fn dir_arg(dir: &TempDir) -> String {
    dir.path().to_str().unwrap().to_string()
}

/// Every number from 1 to 20, ten times over. Each question's answer is hit
/// within twenty lines of it appearing, so this always finishes a session.
fn sweep_answers() -> String {
    let round: String = (1..=20).map(|n| format!("{n}\n")).collect();
    round.repeat(10)
}

fn play_full_session(dir: &TempDir) {
    blockmath()
        .args([
            "play", "-c", "steve", "-t", "basic", "-s", "42", "--delay-ms", "0", "-d",
        ])
        .arg(dir_arg(dir))
        .write_stdin(sweep_answers())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Question 1/10")
                .and(predicate::str::contains("Question 10/10"))
                .and(predicate::str::contains("Session complete"))
                .and(predicate::str::contains("10/10")),
        );
}

// ---------------------------------------------------------------------------
// topics
// ---------------------------------------------------------------------------

#[test]
fn topics_lists_catalog() {
    blockmath()
        .arg("topics")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Redstone Basics")
                .and(predicate::str::contains("End Portal"))
                .and(predicate::str::contains("10-20")),
        );
}

// ---------------------------------------------------------------------------
// stats
// ---------------------------------------------------------------------------

#[test]
fn stats_fresh_roster() {
    let dir = TempDir::new().unwrap();
    blockmath()
        .args(["stats", "-d"])
        .arg(dir_arg(&dir))
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Steve")
                .and(predicate::str::contains("Skeleton"))
                .and(predicate::str::contains("0/100")),
        );
}

#[test]
fn stats_single_character() {
    let dir = TempDir::new().unwrap();
    blockmath()
        .args(["stats", "cat", "-d"])
        .arg(dir_arg(&dir))
        .assert()
        .success()
        .stdout(predicate::str::contains("Cat").and(predicate::str::contains("level 1")));
}

#[test]
fn stats_unknown_character_fails() {
    let dir = TempDir::new().unwrap();
    blockmath()
        .args(["stats", "herobrine", "-d"])
        .arg(dir_arg(&dir))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown character"));
}

// ---------------------------------------------------------------------------
// history / toggle
// ---------------------------------------------------------------------------

#[test]
fn history_empty_for_new_player() {
    let dir = TempDir::new().unwrap();
    blockmath()
        .args(["history", "alex", "-d"])
        .arg(dir_arg(&dir))
        .assert()
        .success()
        .stdout(predicate::str::contains("No records yet"));
}

#[test]
fn toggle_out_of_range_fails() {
    let dir = TempDir::new().unwrap();
    blockmath()
        .args(["toggle", "3", "-d"])
        .arg(dir_arg(&dir))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no history entry at index 3"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_full_session_is_recorded() {
    let dir = TempDir::new().unwrap();
    play_full_session(&dir);

    let raw = fs::read_to_string(dir.path().join("history.json")).unwrap();
    let history: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["character"], "steve");
    assert_eq!(entries[0]["correct"], 10);
    assert_eq!(entries[0]["details"].as_array().unwrap().len(), 10);
    assert_eq!(entries[0]["details_visible"], false);

    let raw = fs::read_to_string(dir.path().join("characters.json")).unwrap();
    let characters: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let steve = &characters["steve"];
    assert!(steve["level"].as_u64().unwrap() > 1 || steve["experience"].as_u64().unwrap() > 0);

    blockmath()
        .args(["history", "steve", "-d"])
        .arg(dir_arg(&dir))
        .assert()
        .success()
        .stdout(predicate::str::contains("10/10").and(predicate::str::contains("Redstone Basics")));
}

#[test]
fn toggle_shows_details() {
    let dir = TempDir::new().unwrap();
    play_full_session(&dir);

    blockmath()
        .args(["toggle", "0", "-c", "steve", "-d"])
        .arg(dir_arg(&dir))
        .assert()
        .success()
        .stdout(
            predicate::str::contains("now shown")
                .and(predicate::str::contains("Details for entry 0"))
                .and(predicate::str::contains("÷")),
        );

    let raw = fs::read_to_string(dir.path().join("history.json")).unwrap();
    let history: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(history[0]["details_visible"], true);

    blockmath()
        .args(["toggle", "0", "-d"])
        .arg(dir_arg(&dir))
        .assert()
        .success()
        .stdout(predicate::str::contains("now hidden"));
}

#[test]
fn history_details_flag_expands_entries() {
    let dir = TempDir::new().unwrap();
    play_full_session(&dir);

    blockmath()
        .args(["history", "steve", "--details", "-d"])
        .arg(dir_arg(&dir))
        .assert()
        .success()
        .stdout(predicate::str::contains("Details for entry 0"));
}

#[test]
fn play_quit_leaves_no_history() {
    let dir = TempDir::new().unwrap();
    blockmath()
        .args(["play", "-c", "alex", "-s", "1", "-d"])
        .arg(dir_arg(&dir))
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Session abandoned"));

    assert!(!dir.path().join("history.json").exists());
}

#[test]
fn play_wrong_choice_keeps_question_open() {
    // Basic answers never exceed 9, so 20 is always an offered wrong choice.
    let dir = TempDir::new().unwrap();
    blockmath()
        .args([
            "play", "-c", "steve", "-t", "basic", "-s", "7", "--delay-ms", "0", "-d",
        ])
        .arg(dir_arg(&dir))
        .write_stdin("20\n20\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Question 1/10")
                .and(predicate::str::contains("Wrong! Try again."))
                .and(predicate::str::contains("20 was already tried"))
                .and(predicate::str::contains("Question 2/10").not())
                .and(predicate::str::contains("Session abandoned")),
        );

    assert!(!dir.path().join("history.json").exists());
}

#[test]
fn play_rejects_unoffered_and_non_numeric_input() {
    let dir = TempDir::new().unwrap();
    blockmath()
        .args(["play", "-c", "creeper", "-s", "9", "-d"])
        .arg(dir_arg(&dir))
        .write_stdin("21\nmeow\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("21 is not one of the choices")
                .and(predicate::str::contains("Enter one of the numbers shown")),
        );
}

#[test]
fn play_unknown_topic_fails() {
    let dir = TempDir::new().unwrap();
    blockmath()
        .args(["play", "-c", "steve", "-t", "nether", "-d"])
        .arg(dir_arg(&dir))
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown topic"));
}
