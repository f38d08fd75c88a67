//! End-to-end tests for the `erp` binary.
//!
//! Each test points the binary at its own temporary data directory.

#![allow(deprecated)] // Command::cargo_bin

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn erp(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("erp").unwrap();
    cmd.env("ERP_CLI_DATA_DIR", dir.path()).arg("--year").arg("2017");
    cmd
}

/// Add a record and return its generated ID
fn add(dir: &TempDir, manager: &str, values: &[&str]) -> String {
    let output = erp(dir)
        .args(["table", manager, "add"])
        .args(values)
        .output()
        .unwrap();
    assert!(output.status.success(), "add failed: {:?}", output);

    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .trim()
        .strip_prefix("Added record ")
        .expect("add prints the new ID")
        .to_string()
}

#[test]
fn init_creates_settings_and_tables() {
    let dir = TempDir::new().unwrap();

    erp(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data/sales/sales.csv").exists());
    assert!(dir.path().join("data/store/games.csv").exists());
}

#[test]
fn uninitialized_dir_hints_at_init() {
    let dir = TempDir::new().unwrap();

    erp(&dir)
        .args(["table", "store", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Run 'erp init'"));

    erp(&dir).arg("init").assert().success();

    erp(&dir)
        .args(["table", "store", "list"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn config_shows_year_override() {
    let dir = TempDir::new().unwrap();

    erp(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Current year:   2017"));
}

#[test]
fn table_round_trip() {
    let dir = TempDir::new().unwrap();
    let id = add(&dir, "store", &["Age of Empires", "Ensemble Studios", "43", "4"]);

    let stored = fs::read_to_string(dir.path().join("data/store/games.csv")).unwrap();
    assert_eq!(stored.trim(), format!("{};Age of Empires;Ensemble Studios;43;4", id));

    erp(&dir)
        .args(["table", "store", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ensemble Studios"));

    erp(&dir)
        .args(["table", "store", "update", &id, "--set", "In stock=9"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Updated record {}", id)));

    erp(&dir)
        .args(["table", "store", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("In stock"))
        .stdout(predicate::str::contains("9"));

    erp(&dir)
        .args(["table", "store", "remove", &id])
        .assert()
        .success();

    erp(&dir)
        .args(["table", "store", "show", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn invalid_value_is_rejected() {
    let dir = TempDir::new().unwrap();

    erp(&dir)
        .args(["table", "hr", "add", "Joe Doe", "2050"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value for Birth year"));

    let stored = dir.path().join("data/hr/persons.csv");
    assert!(!stored.exists() || fs::read_to_string(stored).unwrap().is_empty());
}

#[test]
fn unknown_manager_is_rejected() {
    let dir = TempDir::new().unwrap();

    erp(&dir)
        .args(["table", "payroll", "list"])
        .assert()
        .failure();
}

#[test]
fn sales_reports() {
    let dir = TempDir::new().unwrap();
    let cheap = add(&dir, "sales", &["Age of Empires", "11", "3", "7", "2016", "kH14Jt#&"]);
    add(&dir, "sales", &["Astebreed", "25", "3", "10", "2016", "jH34Jk#&"]);
    add(&dir, "sales", &["Sid Meier's Civilization", "35", "9", "30", "2015", "jH34Jk#&"]);

    erp(&dir)
        .args(["report", "sales", "lowest-price"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Lowest priced sale: {}", cheap)));

    erp(&dir)
        .args(["report", "sales", "sold-between", "2016/1/1", "2016/12/31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Astebreed"))
        .stdout(predicate::str::contains("Civilization").not());

    erp(&dir)
        .args(["report", "analyser", "top-spender"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jH34Jk#&"))
        .stdout(predicate::str::contains("60"));
}

#[test]
fn report_rejects_bad_date() {
    let dir = TempDir::new().unwrap();

    erp(&dir)
        .args(["report", "sales", "sold-between", "2016/13/1", "2016/12/31"])
        .assert()
        .failure();
}

#[test]
fn audit_lists_changes() {
    let dir = TempDir::new().unwrap();
    let id = add(&dir, "crm", &["Missy Stoney", "ms@mail.com", "1"]);
    erp(&dir)
        .args(["table", "crm", "remove", &id])
        .assert()
        .success();

    erp(&dir)
        .args(["audit", "--limit", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE"))
        .stdout(predicate::str::contains("DELETE"))
        .stdout(predicate::str::contains(id.as_str()));
}

#[test]
fn menu_saves_on_end_of_input() {
    let dir = TempDir::new().unwrap();

    erp(&dir)
        .arg("menu")
        .write_stdin("2\n2\nAnn Smith\n1985\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Input closed. Changes saved."));

    let stored = fs::read_to_string(dir.path().join("data/hr/persons.csv")).unwrap();
    assert!(stored.contains(";Ann Smith;1985"));
}
