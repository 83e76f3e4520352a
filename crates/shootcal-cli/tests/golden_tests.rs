use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use similar::{ChangeTag, TextDiff};

fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

fn fixture_dir() -> PathBuf {
    project_root().join("fixtures").join("data")
}

fn golden_dir() -> PathBuf {
    project_root().join("golden")
}

fn update_golden() -> bool {
    std::env::var("UPDATE_GOLDEN").is_ok()
}

fn diff_strings(expected: &str, actual: &str) -> String {
    let diff = TextDiff::from_lines(expected, actual);
    let mut out = String::new();
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        out.push_str(&format!("{sign}{change}"));
    }
    out
}

fn shootcal(data_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_shootcal"))
        .args(args)
        .arg("--data-dir")
        .arg(data_dir)
        .env_remove("SHOOTCAL_DATA_DIR")
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute shootcal")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "shootcal failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).unwrap();
    for entry in fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}

/// A writable copy of the fixture data directory.
fn scratch_data() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    copy_dir(&fixture_dir(), dir.path());
    dir
}

fn read_calendar(data_dir: &Path, project: &str) -> Value {
    let path = data_dir.join("projects").join(project).join("calendar.json");
    let content = fs::read_to_string(&path).unwrap();
    serde_json::from_str(&content).unwrap()
}

fn day<'a>(calendar: &'a Value, date: &str) -> &'a Value {
    calendar["days"]
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["date"] == date)
        .unwrap_or_else(|| panic!("no day {date}"))
}

#[test]
fn golden_text_output() {
    let golden = golden_dir();
    let cases: [(&str, &[&str]); 2] = [
        ("generate_pilot", &["generate", "--project", "pilot"]),
        ("counts_harbour", &["counts", "--project", "harbour"]),
    ];

    for (name, args) in cases {
        let golden_path = golden.join(format!("{name}.txt"));
        let output = shootcal(&fixture_dir(), args);

        assert!(
            output.status.success(),
            "shootcal failed for {}: {}",
            name,
            String::from_utf8_lossy(&output.stderr)
        );

        let actual = String::from_utf8(output.stdout).expect("Output is not valid UTF-8");

        if update_golden() {
            fs::create_dir_all(&golden).ok();
            fs::write(&golden_path, &actual)
                .unwrap_or_else(|e| panic!("Failed to write golden file {golden_path:?}: {e}"));
            eprintln!("Updated golden file: {golden_path:?}");
            continue;
        }

        let expected = fs::read_to_string(&golden_path).unwrap_or_else(|e| {
            panic!(
                "Golden file {golden_path:?} not found: {e}\n\
                 Hint: Run with UPDATE_GOLDEN=1 to generate golden files"
            )
        });

        if actual != expected {
            let diff = diff_strings(&expected, &actual);
            panic!(
                "Golden test mismatch for {name}:\n\n\
                 {diff}\n\n\
                 Run with UPDATE_GOLDEN=1 to refresh snapshots"
            );
        }
    }
}

#[test]
fn generate_json_document() {
    let output = shootcal(
        &fixture_dir(),
        &["generate", "--project", "pilot", "--output-format", "json"],
    );
    let calendar = stdout_json(&output);

    assert_eq!(calendar["projectId"], "pilot");
    assert_eq!(calendar["days"].as_array().unwrap().len(), 19);
    assert_eq!(calendar["departmentCounts"]["main"], 9);
    assert_eq!(calendar["departmentCounts"]["sixthDay"], 1);
    assert_eq!(calendar["locationAreas"].as_array().unwrap().len(), 2);
    assert!(calendar["lastUpdated"].is_string());

    let saturday = day(&calendar, "2024-01-13");
    assert_eq!(saturday["dayType"], "working-weekend");
    assert_eq!(saturday["isWorkingWeekend"], true);
    assert_eq!(saturday["shootDay"], 6);
}

#[test]
fn data_dir_from_environment() {
    let output = Command::new(env!("CARGO_BIN_EXE_shootcal"))
        .args(["generate", "--project", "pilot", "--output-format", "json"])
        .env("SHOOTCAL_DATA_DIR", fixture_dir())
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute shootcal");

    let calendar = stdout_json(&output);
    assert_eq!(calendar["days"].as_array().unwrap().len(), 19);
}

#[test]
fn regenerate_keeps_user_edits() {
    let data = scratch_data();
    let output = shootcal(data.path(), &["generate", "--project", "pilot", "--write"]);
    assert!(output.status.success());

    let path = data.path().join("projects/pilot/calendar.json");
    let mut calendar = read_calendar(data.path(), "pilot");
    let days = calendar["days"].as_array_mut().unwrap();
    days[8]["notes"] = Value::from("Bring umbrellas");
    days[8]["location"] = Value::from("Harbour");
    days[12]["notes"] = Value::from("Working Weekend: stale text");
    fs::write(&path, serde_json::to_string_pretty(&calendar).unwrap()).unwrap();

    let output = shootcal(data.path(), &["generate", "--project", "pilot", "--write"]);
    assert!(output.status.success());

    let calendar = read_calendar(data.path(), "pilot");
    let tuesday = day(&calendar, "2024-01-09");
    assert_eq!(tuesday["notes"], "Bring umbrellas");
    assert_eq!(tuesday["locationArea"], "north");
    assert_eq!(tuesday["shootDay"], 2);
    assert_eq!(day(&calendar, "2024-01-13")["notes"], "Working Weekend: Night shoot");
    assert_eq!(calendar["locationCounts"]["Harbour"], 1);
    assert_eq!(calendar["areaCounts"]["north"], 1);
}

#[test]
fn fresh_generate_drops_user_edits() {
    let data = scratch_data();
    assert!(
        shootcal(data.path(), &["generate", "--project", "pilot", "--write"])
            .status
            .success()
    );

    let path = data.path().join("projects/pilot/calendar.json");
    let mut calendar = read_calendar(data.path(), "pilot");
    calendar["days"][8]["location"] = Value::from("Harbour");
    fs::write(&path, serde_json::to_string(&calendar).unwrap()).unwrap();

    let output = shootcal(
        data.path(),
        &["generate", "--project", "pilot", "--fresh", "--output-format", "json"],
    );
    let calendar = stdout_json(&output);
    assert_eq!(day(&calendar, "2024-01-09")["location"], "");
}

#[test]
fn refuses_to_replace_calendar_with_empty_one() {
    let data = scratch_data();
    assert!(
        shootcal(data.path(), &["generate", "--project", "pilot", "--write"])
            .status
            .success()
    );

    fs::write(
        data.path().join("projects/pilot/main.json"),
        r#"{"id": "pilot", "prepStartDate": "2024-01-01", "shootStartDate": ""}"#,
    )
    .unwrap();

    let output = shootcal(
        data.path(),
        &["generate", "--project", "pilot", "--write", "--output-format", "json"],
    );
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        read_calendar(data.path(), "pilot")["days"]
            .as_array()
            .unwrap()
            .len(),
        19
    );
}

#[test]
fn incomplete_project_prints_empty_calendar() {
    let data = scratch_data();
    fs::write(
        data.path().join("projects/pilot/main.json"),
        r#"{"id": "pilot", "prepStartDate": "2024-01-01"}"#,
    )
    .unwrap();

    let output = shootcal(data.path(), &["generate", "--project", "pilot"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "pilot: no days (project dates incomplete)\n"
    );
}

#[test]
fn move_day_swaps_and_saves() {
    let data = scratch_data();
    let output = shootcal(
        data.path(),
        &[
            "move-day",
            "--project",
            "harbour",
            "--from",
            "2024-03-04",
            "--to",
            "2024-03-06",
            "--write",
            "--output-format",
            "json",
        ],
    );
    let report = stdout_json(&output);

    assert_eq!(report["fromDate"], "2024-03-04");
    assert_eq!(report["toDate"], "2024-03-06");
    assert_eq!(report["mode"], "swap");
    assert_eq!(report["originalShootDay"], 1);
    assert_eq!(report["targetShootDay"], Value::Null);
    assert_eq!(report["newShootDay"], 2);
    assert_eq!(report["shootDays"], 3);
    assert_eq!(report["saved"], true);

    let calendar = read_calendar(data.path(), "harbour");
    let moved = day(&calendar, "2024-03-06");
    assert_eq!(moved["location"], "Harbour");
    assert_eq!(moved["callTime"], "05:30");
    assert_eq!(moved["dayOfWeek"], "Wednesday");
    assert_eq!(moved["isShootDay"], true);
    assert_eq!(moved["shootDay"], 2);
    assert_eq!(moved["dayType"], "shoot");

    let vacated = day(&calendar, "2024-03-04");
    assert_eq!(vacated["location"], "TBC");
    assert!(vacated.get("callTime").is_none());
    assert_eq!(vacated["isShootDay"], false);
    assert_eq!(vacated["shootDay"], Value::Null);

    assert_eq!(day(&calendar, "2024-03-05")["shootDay"], 1);
    assert_eq!(calendar["customLayout"]["collapsed"], true);
    assert!(calendar["lastUpdated"].is_string());
}

#[test]
fn move_day_without_write_leaves_file_alone() {
    let data = scratch_data();
    let before = read_calendar(data.path(), "harbour");

    let output = shootcal(
        data.path(),
        &[
            "move-day",
            "--project",
            "harbour",
            "--from",
            "2024-03-04",
            "--to",
            "2024-03-05",
        ],
    );
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("Moved shoot day 1 from 2024-03-04 to 2024-03-05 (swap)"));
    assert!(text.contains("Dry run"));

    assert_eq!(read_calendar(data.path(), "harbour"), before);
}

#[test]
fn rejected_moves_report_status() {
    let cases = [
        ("2024-03-06", "2024-03-05", "swap", "not_a_shoot_day"),
        ("2024-03-04", "2024-03-10", "swap", "ineligible_destination"),
        ("2024-03-04", "2025-01-01", "swap", "day_not_found"),
        ("2024-03-04", "2024-03-05", "shift", "unsupported_mode"),
    ];

    for (from, to, mode, status) in cases {
        let output = shootcal(
            &fixture_dir(),
            &[
                "move-day",
                "--project",
                "harbour",
                "--from",
                from,
                "--to",
                to,
                "--mode",
                mode,
                "--output-format",
                "json",
            ],
        );

        assert_eq!(output.status.code(), Some(2), "case {status}");
        let envelope: Value = serde_json::from_slice(&output.stderr).unwrap();
        assert_eq!(envelope["status"], status);
        assert_eq!(envelope["exit_code"], 2);
        assert!(envelope["error"].is_string());
    }
}

#[test]
fn show_day_prints_record() {
    let output = shootcal(
        &fixture_dir(),
        &[
            "show-day",
            "--project",
            "harbour",
            "--date",
            "2024-03-04",
            "--output-format",
            "json",
        ],
    );
    let record = stdout_json(&output);

    assert_eq!(record["location"], "Harbour");
    assert_eq!(record["secondUnit"], "Splinter unit");
    assert_eq!(record["departments"].as_array().unwrap().len(), 3);
}

#[test]
fn show_day_text() {
    let output = shootcal(
        &fixture_dir(),
        &["show-day", "--project", "harbour", "--date", "2024-03-09"],
    );
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("Date: 2024-03-09 Saturday"));
    assert!(text.contains("Type: working-weekend"));
    assert!(text.contains("Area: south"));
    assert!(text.contains("Notes: -"));
}

#[test]
fn input_errors_exit_with_2() {
    let cases: [&[&str]; 5] = [
        &["generate", "--project", "ghost"],
        &["generate", "--project", "../pilot"],
        &["counts", "--project", "pilot"],
        &["show-day", "--project", "harbour", "--date", "2025-01-01"],
        &["counts", "--project", "harbour", "--output-format", "yaml"],
    ];

    for args in cases {
        let output = shootcal(&fixture_dir(), args);
        assert_eq!(output.status.code(), Some(2), "args {args:?}");
        let stderr = String::from_utf8(output.stderr).unwrap();
        assert!(stderr.starts_with("Error: "), "args {args:?}: {stderr}");
    }
}

#[test]
fn malformed_calendar_exits_with_3() {
    let data = scratch_data();
    fs::write(data.path().join("projects/harbour/calendar.json"), "[1, 2").unwrap();

    let output = shootcal(
        data.path(),
        &["counts", "--project", "harbour", "--output-format", "json"],
    );
    assert_eq!(output.status.code(), Some(3));
    let envelope: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(envelope["exit_code"], 3);
}
