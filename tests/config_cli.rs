use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

fn write_temp_config(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be available")
        .as_nanos();
    path.push(format!("mmck-config-{}.{}", nanos, extension));
    fs::write(&path, contents).expect("config write should succeed");
    path
}

fn cmd() -> Command {
    Command::cargo_bin("mmck-sim").expect("binary should build")
}

#[test]
fn toml_config_file_runs() {
    let config = r#"
arrival_rate = 1.5
service_rate = 2.0
channels = 2
queue_capacity = 3
horizon_hours = 24.0
runs = 10
patience_hours = 2.0
seed = 42
"#;
    let path = write_temp_config(config, "toml");

    cmd()
        .args(["--config", path.to_str().unwrap(), "--format", "summary"])
        .assert()
        .success()
        .stdout(contains("Summary:"))
        .stdout(contains("refusal probability:"));
}

#[test]
fn json_config_file_runs() {
    let config = r#"{
  "arrival_rate": 1.5,
  "service_rate": 2.0,
  "channels": 2,
  "queue_capacity": 3,
  "horizon_hours": 24.0,
  "runs": 10,
  "patience_hours": 2.0,
  "seed": 42
}"#;
    let path = write_temp_config(config, "json");

    cmd()
        .args(["--config", path.to_str().unwrap(), "--format", "summary"])
        .assert()
        .success()
        .stdout(contains("system load:"));
}

#[test]
fn cli_flags_override_config_file() {
    let config = r#"
arrival_rate = 1.5
service_rate = 2.0
channels = 2
queue_capacity = 3
horizon_hours = 24.0
runs = 10
patience_hours = 2.0
"#;
    let path = write_temp_config(config, "toml");

    // The flag wins over the file's valid run count, so validation sees 0.
    cmd()
        .args(["--config", path.to_str().unwrap(), "--runs", "0"])
        .assert()
        .failure()
        .stderr(contains("Error: run count must be >= 1"));
}

#[test]
fn unsupported_config_extension_fails() {
    let path = write_temp_config("arrival_rate: 1.5", "yaml");

    cmd()
        .args(["--config", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("Error: unsupported config format 'yaml'"));
}

#[test]
fn malformed_toml_config_fails() {
    let path = write_temp_config("arrival_rate = ", "toml");

    cmd()
        .args(["--config", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("Error: failed to parse TOML"));
}

#[test]
fn missing_config_file_fails() {
    cmd()
        .args(["--config", "/nonexistent/mmck.toml"])
        .assert()
        .failure()
        .stderr(contains("Error: failed to read config"));
}
