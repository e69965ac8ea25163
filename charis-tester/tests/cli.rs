use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "charis-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_charis-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("shuffle-integrity"));
}

#[test]
fn cli_smoke_run_emits_a_json_report() {
    let exe = env!("CARGO_BIN_EXE_charis-tester");
    let output_path = temp_path("smoke");
    let output = Command::new(exe)
        .args([
            "--scenarios",
            "smoke",
            "--seeds",
            "1",
            "--iterations",
            "2",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Charis Assessment Tester"));
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("\"scenario_name\": \"smoke\""));
    assert!(content.contains("\"passed\": true"));
}

#[test]
fn cli_rejects_an_unreadable_data_dir() {
    let exe = env!("CARGO_BIN_EXE_charis-tester");
    let output = Command::new(exe)
        .args([
            "--scenarios",
            "smoke",
            "--iterations",
            "1",
            "--data-dir",
            "/nonexistent/charis-feeds",
        ])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("loading feeds from"));
}
