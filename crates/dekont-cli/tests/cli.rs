//! Command-line behavior of the `dekont` binary.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../dekont-core/tests/fixtures")
        .join(name)
}

/// `dekont` with an isolated user config directory.
fn dekont(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("dekont").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"));
    cmd
}

fn json_stdout(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).unwrap()
}

#[test]
fn test_text_command_outputs_record() {
    let home = TempDir::new().unwrap();
    let output = dekont(&home)
        .args(["text", fixture("garanti.txt").to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value = json_stdout(&output);
    assert_eq!(value["bank"], "garanti");
    assert_eq!(value["sender"]["name"], "AHMET YILMAZ");
    assert_eq!(value["amount"].as_f64(), Some(1250.5));
    assert_eq!(value["transactionDate"], "04.11.2025");
}

#[test]
fn test_text_command_reads_stdin() {
    let home = TempDir::new().unwrap();
    let output = dekont(&home)
        .args(["text", "-"])
        .write_stdin("İşlem Tarihi: 04.11.2025\nTUTAR: 1.234,56 TL\nGÖNDEREN: ALI VELI\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value = json_stdout(&output);
    assert_eq!(value["bank"], "unknown");
    assert_eq!(value["sender"]["name"], "ALİ VELİ");
}

#[test]
fn test_text_command_csv() {
    let home = TempDir::new().unwrap();
    dekont(&home)
        .args(["text", fixture("halkbank.txt").to_str().unwrap(), "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("bank,transaction_date,amount"))
        .stdout(predicate::str::contains("halkbank,10.11.2025,3000.00"));
}

#[test]
fn test_missing_file_prints_error_object() {
    let home = TempDir::new().unwrap();
    let output = dekont(&home)
        .args(["process", "/nonexistent/dekont.pdf"])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let value = json_stdout(&output);
    assert!(value["error"].as_str().unwrap().contains("not found"));
}

#[test]
fn test_invalid_pdf_prints_error_object() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("broken.pdf");
    std::fs::write(&path, "this is not a pdf").unwrap();

    let output = dekont(&home)
        .args(["process", path.to_str().unwrap()])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let value = json_stdout(&output);
    assert!(value["error"].as_str().unwrap().contains("broken.pdf"));
}

#[test]
fn test_config_file_controls_excerpt() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("dekont.json");
    std::fs::write(&config, r#"{"extraction": {"excerpt_chars": 5}}"#).unwrap();

    let output = dekont(&home)
        .args(["--config", config.to_str().unwrap()])
        .args(["text", fixture("ing.txt").to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value = json_stdout(&output);
    assert_eq!(value["diagnostics"]["rawExcerpt"], "ING B");
}

#[test]
fn test_config_init_get_set() {
    let home = TempDir::new().unwrap();

    dekont(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    dekont(&home)
        .args(["config", "get", "extraction.excerpt_chars"])
        .assert()
        .success()
        .stdout(predicate::str::contains("500"));

    dekont(&home)
        .args(["config", "set", "extraction.excerpt_chars", "80"])
        .assert()
        .success();

    dekont(&home)
        .args(["config", "get", "extraction.excerpt_chars"])
        .assert()
        .success()
        .stdout(predicate::str::contains("80"));

    dekont(&home)
        .args(["config", "set", "extraction.no_such_key", "1"])
        .assert()
        .failure();

    dekont(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_config_set_writes_file_given_with_config_flag() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("custom.json");
    let config_arg = config.to_str().unwrap();

    dekont(&home)
        .args(["--config", config_arg, "config", "set", "extraction.excerpt_chars", "10"])
        .assert()
        .success();

    assert!(config.exists());
    assert!(!home.path().join(".config/dekont/config.json").exists());

    dekont(&home)
        .args(["--config", config_arg, "config", "get", "extraction.excerpt_chars"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10"));

    let output = dekont(&home)
        .args(["--config", config_arg])
        .args(["text", fixture("ing.txt").to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value = json_stdout(&output);
    assert_eq!(value["diagnostics"]["rawExcerpt"].as_str().unwrap().chars().count(), 10);
}

#[test]
fn test_batch_writes_outputs_and_summary() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("in");
    let output = home.path().join("out");
    std::fs::create_dir_all(&input).unwrap();
    for name in ["ziraat.txt", "enpara.txt"] {
        std::fs::copy(fixture(name), input.join(name)).unwrap();
    }
    std::fs::write(input.join("scan.pdf"), "not a pdf").unwrap();

    let pattern = format!("{}/*", input.display());
    dekont(&home)
        .args(["batch", &pattern, "--output-dir", output.to_str().unwrap()])
        .args(["--summary", "--continue-on-error", "--jobs", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("scan.pdf"));

    let ziraat: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output.join("ziraat.json")).unwrap())
            .unwrap();
    assert_eq!(ziraat["bank"], "ziraat");
    assert!(output.join("enpara.json").exists());
    assert!(!output.join("scan.json").exists());

    let summary = std::fs::read_to_string(output.join("summary.csv")).unwrap();
    assert_eq!(summary.lines().count(), 4);
    assert!(summary.contains("scan.pdf,error"));
    assert!(summary.contains("ziraat.txt,success,ziraat,20.10.2025,2500.00"));
}

#[test]
fn test_batch_succeeds_when_every_file_extracts() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("in");
    std::fs::create_dir_all(&input).unwrap();
    std::fs::copy(fixture("halkbank.txt"), input.join("halkbank.txt")).unwrap();

    let pattern = format!("{}/*.txt", input.display());
    dekont(&home)
        .args(["batch", &pattern, "--continue-on-error"])
        .assert()
        .success();
}

#[test]
fn test_batch_stops_on_error_by_default() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("scan.pdf"), "not a pdf").unwrap();

    let pattern = format!("{}/*.pdf", home.path().display());
    dekont(&home).args(["batch", &pattern]).assert().failure();
}
