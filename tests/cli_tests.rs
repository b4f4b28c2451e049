//! Integration tests for the frontacc-conv binary

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use tempfile::TempDir;

const HEADERS: &[&str] = &[
    "Type", "Ref", "#", "Date", "Dimension", "", "Person/Item", "Memo", "Debit", "Credit", "Balance",
];

/// A January report: opening 2,000.00, one deposit, one payment, closing 1,650.00.
fn write_report(path: &Path, headers: &[&str], closing: f64) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let date_format = Format::new().set_num_format("mm/dd/yyyy");

    sheet.write_string(0, 0, "GL Account Transactions").unwrap();
    sheet.write_string(3, 1, "2025-01-01 - 2025-01-31").unwrap();
    sheet.write_string(6, 0, "Opening Balance").unwrap();
    sheet.write_number(6, 8, 2000.0).unwrap();
    for (col, label) in headers.iter().enumerate() {
        if !label.is_empty() {
            sheet.write_string(7, col as u16, *label).unwrap();
        }
    }

    sheet.write_string(8, 0, "Bank Deposit").unwrap();
    sheet.write_string(8, 1, "010/2025").unwrap();
    let d1 = ExcelDateTime::from_ymd(2025, 1, 6).unwrap();
    sheet.write_datetime_with_format(8, 3, &d1, &date_format).unwrap();
    sheet.write_string(8, 6, "[4] Northwind Traders / Main").unwrap();
    sheet.write_string(8, 7, "Payment for\ninvoice 77").unwrap();
    sheet.write_number(8, 8, 150.0).unwrap();
    sheet.write_number(8, 10, 2150.0).unwrap();

    sheet.write_string(9, 0, "Bank Payment").unwrap();
    sheet.write_string(9, 1, "011/2025").unwrap();
    let d2 = ExcelDateTime::from_ymd(2025, 1, 28).unwrap();
    sheet.write_datetime_with_format(9, 3, &d2, &date_format).unwrap();
    sheet.write_string(9, 7, "Office rent").unwrap();
    sheet.write_number(9, 9, 500.0).unwrap();
    sheet.write_number(9, 10, 1650.0).unwrap();

    sheet.write_string(11, 0, "Ending Balance").unwrap();
    sheet.write_number(11, 8, closing).unwrap();
    workbook.save(path).unwrap();
}

fn cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("frontacc-conv"));
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_help() {
    let tmp = TempDir::new().unwrap();
    cmd(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("gl2qif"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_cli_version() {
    let tmp = TempDir::new().unwrap();
    cmd(tmp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("frontacc-conv"));
}

#[test]
fn test_gl2qif_converts_report() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("gl.xlsx");
    let output = tmp.path().join("gl.qif");
    write_report(&input, HEADERS, 1650.0);

    cmd(tmp.path())
        .arg("gl2qif")
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully converted"))
        .stdout(predicate::str::contains("Opening Balance: 2,000.00"))
        .stdout(predicate::str::contains("Closing Balance: 1,650.00"))
        .stdout(predicate::str::contains("Records: 2"));

    let qif = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        qif,
        "!Type:Bank\n\
         D01/06/2025\nT150.00\nN010/2025\nMBank Deposit: Payment forinvoice 77\nPNorthwind Traders\n^\n\
         D01/28/2025\nT-500.00\nN011/2025\nMBank Payment: Office rent\n^\n"
    );
}

#[test]
fn test_gl2qif_account_type_and_date_format() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("gl.xlsx");
    let output = tmp.path().join("gl.qif");
    write_report(&input, HEADERS, 1650.0);

    cmd(tmp.path())
        .args(["gl2qif"])
        .arg(&input)
        .arg(&output)
        .args(["CCard", "--date-format", "%Y-%m-%d"])
        .assert()
        .success();

    let qif = std::fs::read_to_string(&output).unwrap();
    assert!(qif.starts_with("!Type:CCard\nD2025-01-06\n"));
}

#[test]
fn test_gl2qif_missing_column_fails_without_output() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("gl.xlsx");
    let output = tmp.path().join("gl.qif");
    let mut headers = HEADERS.to_vec();
    headers[3] = "";
    write_report(&input, &headers, 1650.0);

    cmd(tmp.path())
        .arg("gl2qif")
        .arg(&input)
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing expected column 'Date' at D8"));
    assert!(!output.exists());
}

#[test]
fn test_gl2qif_balance_mismatch_fails_without_output() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("gl.xlsx");
    let output = tmp.path().join("gl.qif");
    write_report(&input, HEADERS, 1700.0);

    cmd(tmp.path())
        .arg("gl2qif")
        .arg(&input)
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Final calculated balance 1650.00 does not match closing balance 1700.00",
        ));
    assert!(!output.exists());
}

#[test]
fn test_gl2qif_time_date_format_fails_without_output() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("gl.xlsx");
    let output = tmp.path().join("gl.qif");
    write_report(&input, HEADERS, 1650.0);

    cmd(tmp.path())
        .arg("gl2qif")
        .arg(&input)
        .arg(&output)
        .args(["--date-format", "%H"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid date format: %H"));
    assert!(!output.exists());
}

#[test]
fn test_gl2qif_no_verify_writes_anyway() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("gl.xlsx");
    let output = tmp.path().join("gl.qif");
    write_report(&input, HEADERS, 1700.0);

    cmd(tmp.path())
        .arg("gl2qif")
        .arg(&input)
        .arg(&output)
        .arg("--no-verify")
        .assert()
        .success();
    assert!(output.exists());
}

#[test]
fn test_gl2qif_missing_input() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("gl.qif");

    cmd(tmp.path())
        .arg("gl2qif")
        .arg(tmp.path().join("nope.xlsx"))
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Input file not found"));
    assert!(!output.exists());
}

#[test]
fn test_gl2qif_rejects_unknown_account_type() {
    let tmp = TempDir::new().unwrap();
    cmd(tmp.path())
        .args(["gl2qif", "in.xlsx", "out.qif", "Savings"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown account type"));
}

#[test]
fn test_settings_file_supplies_defaults() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("gl.xlsx");
    let output = tmp.path().join("gl.qif");
    write_report(&input, HEADERS, 1650.0);

    let config_dir = tmp.path().join(".config").join("frontacc-conv");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("settings.json"),
        r#"{"account_type": "Cash", "date_format": "%d.%m.%Y"}"#,
    )
    .unwrap();

    cmd(tmp.path())
        .arg("gl2qif")
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    let qif = std::fs::read_to_string(&output).unwrap();
    assert!(qif.starts_with("!Type:Cash\nD06.01.2025\n"));
}

#[test]
fn test_config_init_writes_defaults() {
    let tmp = TempDir::new().unwrap();
    cmd(tmp.path())
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"account_type\": \"Bank\""));
    assert!(tmp.path().join(".config/frontacc-conv/settings.json").exists());
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    cmd(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("frontacc-conv"));
}
