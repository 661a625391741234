//! End-to-end runs of the `reviewxai` binary

use std::process::Command;

use tempfile::TempDir;

fn reviewxai(dir: &TempDir) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_reviewxai"));
    // logs/ and the config lookup stay inside the temp dir
    command.current_dir(dir.path());
    command
}

#[test]
fn test_failed_command_reports_error_once() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("reviews.csv"), "id,review\n1,great!\n").unwrap();

    let output = reviewxai(&dir)
        .args(["batch", "reviews.csv", "--column", "text"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("❌").count(), 1, "{stderr}");
    assert!(stderr.contains("Column not found: text"), "{stderr}");
    // no Debug dump of the error from the runtime
    assert!(!stderr.contains("Error: UnknownColumn"), "{stderr}");
}

#[test]
fn test_config_command_succeeds() {
    let dir = TempDir::new().unwrap();
    let output = reviewxai(&dir).arg("config").output().unwrap();
    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stderr).contains('❌'));
}
