//! Smoke tests for the `rec-cli` binary, run as a subprocess against a
//! throwaway database file so each test gets a clean session store.

use assert_cmd::Command;
use predicates::str::contains;

fn cli(db_path: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("rec-cli").unwrap();
    cmd.arg("--db-path").arg(db_path);
    cmd
}

#[test]
fn start_prints_the_first_question_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("cli.redb");

    cli(&db_path)
        .args(["start", "--domain", "movies"])
        .assert()
        .success()
        .stdout(contains("sessionId"))
        .stdout(contains("\"current\": 1"));
}

#[test]
fn answer_on_an_unknown_session_fails_with_session_expired() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("cli.redb");

    cli(&db_path)
        .args(["answer", "00000000-0000-0000-0000-000000000000", "q1", "a"])
        .assert()
        .failure();
}

#[test]
fn adjust_with_an_unknown_type_fails() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("cli.redb");

    let session_id = cli(&db_path)
        .args(["start", "--domain", "movies", "--format", "compact"])
        .output()
        .unwrap()
        .stdout;
    let session_id: serde_json::Value = serde_json::from_slice(&session_id).unwrap();
    let session_id = session_id["sessionId"].as_str().unwrap();

    cli(&db_path)
        .args(["adjust", session_id, "sideways"])
        .assert()
        .failure();
}
