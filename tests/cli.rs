use assert_cmd::Command;
use predicates::prelude::*;

fn oncalendar() -> Command {
    Command::cargo_bin("oncalendar").unwrap()
}

// ============================================================
// Validation
// ============================================================

#[test]
fn test_valid_expression() {
    oncalendar()
        .arg("Mon..Fri *-*-* 09:00")
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{2713} valid"));
}

#[test]
fn test_invalid_expression() {
    oncalendar()
        .arg("MonFri")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\u{2717} invalid"));
}

#[test]
fn test_shorthand_with_timezone() {
    oncalendar().arg("weekly Pacific/Auckland").assert().success();
}

#[test]
fn test_unknown_timezone() {
    oncalendar()
        .arg("daily Definitely/NotAZone")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("unknown timezone 'Definitely/NotAZone'"));
}

#[test]
fn test_no_timezone_check() {
    oncalendar()
        .args(["--no-timezone-check", "daily Definitely/NotAZone"])
        .assert()
        .success();
}

#[test]
fn test_multiple_expressions_are_prefixed() {
    oncalendar()
        .args(["hourly", "2030-30-0312:30"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("hourly: \u{2713} valid"))
        .stdout(predicate::str::contains("2030-30-0312:30: \u{2717} invalid"));
}

#[test]
fn test_rich_error() {
    oncalendar()
        .args(["--rich", "Mon2030-30-03"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("  Mon2030-30-03"))
        .stderr(predicate::str::contains("^^^^"));
}

// ============================================================
// Input sources
// ============================================================

#[test]
fn test_stdin() {
    oncalendar()
        .arg("--stdin")
        .write_stdin("# timers\ndaily\n\n  Wed, 17:48  \n")
        .assert()
        .success()
        .stdout(predicate::str::contains("daily: \u{2713} valid"))
        .stdout(predicate::str::contains("Wed, 17:48: \u{2713} valid"));
}

#[test]
fn test_stdin_with_invalid_line() {
    oncalendar()
        .arg("--stdin")
        .write_stdin("daily\n12:30:\n")
        .assert()
        .code(1);
}

#[test]
fn test_no_expression() {
    oncalendar()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no expression provided"));
}

// ============================================================
// Output modes
// ============================================================

#[test]
fn test_json_output() {
    let output = oncalendar()
        .args(["--json", "sat,sunday 10:00", "12:30:"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["expression"], "sat,sunday 10:00");
    assert_eq!(entries[0]["valid"], true);
    assert_eq!(entries[0]["normalized"], "Sat,Sun 10:00");
    assert_eq!(entries[0]["error"], serde_json::Value::Null);
    assert_eq!(entries[1]["valid"], false);
    assert!(entries[1]["error"].is_string());
}

#[test]
fn test_parse_output() {
    oncalendar()
        .args(["--parse", "Mon 12:00 UTC"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"calendar\""))
        .stdout(predicate::str::contains("\"timezone\": \"UTC\""));
}

#[test]
fn test_parse_invalid() {
    oncalendar()
        .args(["--parse", "12:00:00:00"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_normalize_output() {
    oncalendar()
        .args(["--normalize", "  monday,FRI,   *-*-*  8:15 "])
        .assert()
        .success()
        .stdout("Mon,Fri *-*-* 8:15\n");
}

#[test]
fn test_normalize_needs_single_expression() {
    oncalendar()
        .args(["--normalize", "daily", "weekly"])
        .assert()
        .code(2);
}

#[test]
fn test_version() {
    oncalendar()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("oncalendar"));
}
