//! Concurrency tests for the ppt binary.
//!
//! Separate processes may write the state file at the same time. The last
//! writer wins, but the file on disk must always be a complete state blob.

use assert_cmd::Command;
use std::thread;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("ppt"))
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_parallel_writers_leave_valid_state() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    let handles: Vec<_> = (1..=8)
        .map(|day| {
            let data_dir = data_dir.clone();
            thread::spawn(move || {
                let date = format!("2024-01-{:02}", day);
                cli()
                    .arg("--data-dir")
                    .arg(&data_dir)
                    .args(["--today", "2024-01-10", "log", "--date", date.as_str()])
                    .assert()
                    .success();
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("writer thread panicked");
    }

    let content = std::fs::read_to_string(data_dir.join("ppt_v2_state.json")).unwrap();
    let state: serde_json::Value = serde_json::from_str(&content).expect("state must stay valid");
    let sessions = state["sessions"].as_array().unwrap();
    assert!(!sessions.is_empty());
    assert!(sessions.len() <= 8);

    // No temp files left behind
    let extras: Vec<_> = std::fs::read_dir(&data_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name() != "ppt_v2_state.json")
        .collect();
    assert!(extras.is_empty(), "unexpected files: {:?}", extras);
}

#[test]
fn test_sequential_writers_keep_every_session() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    for day in 1..=5 {
        let date = format!("2024-01-{:02}", day);
        cli()
            .arg("--data-dir")
            .arg(&data_dir)
            .args(["--today", "2024-01-10", "log", "--date", date.as_str()])
            .assert()
            .success();
    }

    let content = std::fs::read_to_string(data_dir.join("ppt_v2_state.json")).unwrap();
    let state: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(state["sessions"].as_array().unwrap().len(), 5);
}
