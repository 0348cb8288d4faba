//! Integration tests for the edge-speak CLI.
//!
//! These tests only drive paths that stop before any network access.

use assert_cmd::Command;
use predicates::prelude::*;

fn edge_speak_cmd() -> Command {
    Command::cargo_bin("edge-speak").unwrap()
}

#[test]
fn cli_shows_help() {
    edge_speak_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Edge read-aloud service"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn cli_shows_version() {
    edge_speak_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("edge-speak 0.1.0"));
}

#[test]
fn cli_rejects_unknown_flags() {
    edge_speak_cmd()
        .arg("--voice")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}

#[test]
fn cli_unsupported_language_exits_successfully() {
    edge_speak_cmd()
        .write_stdin("fr\n1\nBonjour\n0\n1\nbonjour\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to the Edge TTS speech synthesizer!"))
        .stdout(predicate::str::contains(
            "no voices are available for language 'fr'",
        ))
        .stdout(predicate::str::contains("Choose a voice type").not());
}

#[test]
fn cli_language_prompt_is_case_insensitive_for_rejection() {
    edge_speak_cmd()
        .write_stdin("  DE \n")
        .assert()
        .success()
        .stdout(predicate::str::contains("language 'de'"));
}

#[test]
fn cli_closed_stdin_exits_successfully() {
    edge_speak_cmd()
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter the voice language code (e.g. ru, en): "));
}
