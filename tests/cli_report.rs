// tests/cli_report.rs - End-to-end runs of the drivedata binary

mod common;

use std::process::{Command, Output};

use common::FIXTURE;
use tempfile::TempDir;

fn workspace() -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    std::fs::write(dir.path().join("drives.csv"), FIXTURE).expect("failed to write fixture");
    dir
}

fn run(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_drivedata"))
        .args(args)
        .current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute drivedata")
}

#[test]
fn all_flag_reports_every_global_section() {
    let dir = workspace();
    let output = run(&dir, &["-a", "-f", "drives.csv"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("REGION: global ===> Drive power-on hours"));
    assert!(stdout.contains("REGION: global ===> Drive model quantities"));
    assert!(stdout.contains("REGION: global ===> Drive size quantities"));
    assert!(!stdout.contains("REGION: us-east"));
}

#[test]
fn no_section_flag_is_invalid_input() {
    let dir = workspace();
    let output = run(&dir, &["-f", "drives.csv"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Specify one of"));
}

#[test]
fn unknown_region_exits_with_known_list() {
    let dir = workspace();
    let output = run(&dir, &["-p", "-r", "mars", "-f", "drives.csv"]);
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Region 'mars' not found"));
    assert!(stderr.contains("global us-east eu-west"));
}

#[test]
fn missing_file_exits_nonzero() {
    let dir = workspace();
    let output = run(&dir, &["-p", "-f", "nope.csv"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("file not found"));
}

#[test]
fn bad_header_is_invalid_input() {
    let dir = workspace();
    std::fs::write(dir.path().join("bad.csv"), "Host,Model\nx.y.z,M\n").unwrap();
    let output = run(&dir, &["-p", "-f", "bad.csv"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("column header"));
}

#[test]
fn invalid_power_cycle_count_warns_on_stderr() {
    let dir = workspace();
    let output = run(&dir, &["-p", "-f", "drives.csv"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid Power_Cycle_Count"));
}

#[test]
fn json_output_parses() {
    let dir = workspace();
    let output = run(&dir, &["-m", "--json", "-r", "us-east", "-f", "drives.csv"]);
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not valid JSON");
    assert_eq!(value["regions"][0]["models"]["ST4000NM0033"], 2);
}

#[test]
fn config_file_switches_model_count_policy() {
    let dir = workspace();
    std::fs::write(
        dir.path().join("drivedata.toml"),
        "[ingest]\nmodel_counts = \"legacy\"\n",
    )
    .unwrap();
    let output = run(&dir, &["-m", "--json", "-r", "us-east", "-f", "drives.csv"]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["regions"][0]["models"]["ST4000NM0033"], 3);
}

#[test]
fn broken_config_is_invalid_input() {
    let dir = workspace();
    std::fs::write(dir.path().join("custom.toml"), "[ingest\n").unwrap();
    let output = run(&dir, &["-p", "--config", "custom.toml", "-f", "drives.csv"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn missing_named_config_is_invalid_input() {
    let dir = workspace();
    let output = run(&dir, &["-p", "--config", "absent.toml", "-f", "drives.csv"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid config"));
}

#[test]
fn legacy_model_counts_flag_overrides_default() {
    let dir = workspace();
    let output = run(
        &dir,
        &["-m", "--json", "--legacy-model-counts", "-r", "us-east", "-f", "drives.csv"],
    );
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["regions"][0]["models"]["ST4000NM0033"], 3);
}

#[test]
fn reject_malformed_flag_drops_bare_hostnames() {
    let dir = workspace();
    let text = "Hostname,Model,Serial,Size,Power_Cycle_Count,Power_On_Hours\n\
                localhost,ST-1,S1,100,1,10\n\
                h2.r.x,ST-1,S2,100,1,10\n";
    std::fs::write(dir.path().join("hosts.csv"), text).unwrap();

    let kept = run(&dir, &["-p", "--json", "-f", "hosts.csv"]);
    assert!(kept.status.success());
    let kept: serde_json::Value = serde_json::from_slice(&kept.stdout).unwrap();
    assert_eq!(kept["counters"]["malformed_hostnames"], 1);
    assert_eq!(kept["counters"]["rejected_records"], 0);
    assert_eq!(kept["regions"][0]["stats"]["count"], 2);

    let dropped = run(&dir, &["-p", "--json", "--reject-malformed", "-f", "hosts.csv"]);
    assert!(dropped.status.success());
    let dropped: serde_json::Value = serde_json::from_slice(&dropped.stdout).unwrap();
    assert_eq!(dropped["counters"]["rejected_records"], 1);
    assert_eq!(dropped["regions"][0]["region"], "global");
    assert_eq!(dropped["regions"][0]["stats"]["count"], 1);
    assert!(dropped["regions"]
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["region"] != "(unresolved)"));
}
