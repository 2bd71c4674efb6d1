//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const EECS: &str = "../../courses/eecs2311.toml";
const MATH: &str = "../../courses/math1013.json";
const BIOL: &str = "../../courses/biol1000.toml";

fn gradecast() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("gradecast").unwrap()
}

/// The only file written into `dir`.
fn single_file(dir: &Path) -> PathBuf {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1, "expected one file in {}", dir.display());
    entries.remove(0)
}

#[test]
fn standing_table() {
    gradecast()
        .args(["standing", "--course", EECS])
        .assert()
        .success()
        .stdout(predicate::str::contains("Course: EECS 2311"))
        .stdout(predicate::str::contains(
            "Current standing: 60.0% (70 graded, 30 remaining)",
        ));
}

#[test]
fn standing_json() {
    let output = gradecast()
        .args(["standing", "--course", EECS, "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["graded_weight_pct"], 70.0);
    assert_eq!(json["remaining_weight_pct"], 30.0);
    let standing = json["current_standing"].as_f64().unwrap();
    assert!((standing - 60.0).abs() < 1e-9);
}

#[test]
fn target_scenario() {
    gradecast()
        .args(["target", "--course", EECS])
        .assert()
        .success()
        .stdout(predicate::str::contains("93.3%"))
        .stdout(predicate::str::contains("(28.00 / 30 remaining weight)"))
        .stdout(predicate::str::contains("Challenging"));
}

#[test]
fn target_override_from_command_line() {
    gradecast()
        .args(["target", "--course", EECS, "--target", "80", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"classification\": \"Not Possible\""))
        .stdout(predicate::str::contains("\"required_average_display\": \"> 100%\""));
}

#[test]
fn target_rejects_out_of_range() {
    gradecast()
        .args(["target", "--course", EECS, "--target", "120"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("outside 0..=100"));
}

#[test]
fn target_already_achieved() {
    gradecast()
        .args(["target", "--course", BIOL])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already Achieved"));
}

#[test]
fn target_from_json_course() {
    gradecast()
        .args(["target", "--course", MATH])
        .assert()
        .success()
        .stdout(predicate::str::contains("77.5%"))
        .stdout(predicate::str::contains("Achievable"));
}

#[test]
fn minimum_for_remaining_assessment() {
    gradecast()
        .args(["minimum", "--course", EECS, "--assessment", "Assignments"])
        .assert()
        .success()
        .stdout(predicate::str::contains("90.0%"));
}

#[test]
fn minimum_rejects_graded_and_unknown() {
    gradecast()
        .args(["minimum", "--course", EECS, "--assessment", "Midterm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already graded"));

    gradecast()
        .args(["minimum", "--course", EECS, "--assessment", "Quiz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown assessment: Quiz"));
}

#[test]
fn what_if_meets_target() {
    gradecast()
        .args([
            "what-if",
            "--course",
            EECS,
            "--set",
            "Assignments=95",
            "--set",
            "Participation=90",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("70.0%"))
        .stdout(predicate::str::contains("on track"));
}

#[test]
fn what_if_reports_unscored() {
    gradecast()
        .args(["what-if", "--course", EECS, "--set", "Assignments=95"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not counted"))
        .stdout(predicate::str::contains("Participation"))
        .stdout(predicate::str::contains("below target"));
}

#[test]
fn what_if_default_json() {
    let output = gradecast()
        .args(["what-if", "--course", EECS, "--default", "75", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    // 42 + 0.75 * 30
    let projected = json["projected_grade"].as_f64().unwrap();
    assert!((projected - 64.5).abs() < 1e-9);
    assert_eq!(json["status"], "below");
    assert!(json["unscored"].as_array().unwrap().is_empty());
}

#[test]
fn what_if_graded_override_policy() {
    gradecast()
        .args(["what-if", "--course", EECS, "--set", "Final=90"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("locked"));

    gradecast()
        .args([
            "what-if",
            "--course",
            EECS,
            "--set",
            "Final=90",
            "--allow-graded",
        ])
        .assert()
        .success();
}

#[test]
fn what_if_rejects_malformed_set() {
    gradecast()
        .args(["what-if", "--course", EECS, "--set", "Final"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NAME=SCORE"));
}

#[test]
fn validate_directory() {
    gradecast()
        .args(["validate", "--course", "../../courses"])
        .assert()
        .success()
        .stdout(predicate::str::contains("EECS 2311"))
        .stdout(predicate::str::contains("MATH 1013"))
        .stdout(predicate::str::contains("BIOL 1000"))
        .stdout(predicate::str::contains("All courses valid"));
}

#[test]
fn validate_warns_on_unbalanced_weights() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("short.toml");
    std::fs::write(
        &path,
        "[course]\nname = \"Short\"\ntarget_grade = 70\n\n[[assessments]]\nname = \"Exam\"\nweight = 60\n",
    )
    .unwrap();

    gradecast()
        .arg("validate")
        .arg("--course")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("weights total 60, not 100"))
        .stdout(predicate::str::contains("1 warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    gradecast()
        .args(["validate", "--course", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn convert_letter_grade() {
    gradecast()
        .args(["convert", "--value", "B+", "--from", "letter"])
        .assert()
        .success()
        .stdout(predicate::str::contains("88.0%"));
}

#[test]
fn convert_rejects_unknown_scale() {
    gradecast()
        .args(["convert", "--value", "3", "--from", "hex"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown grade scale"));
}

#[test]
fn report_writes_all_formats() {
    let dir = TempDir::new().unwrap();

    gradecast()
        .args(["report", "--course", EECS, "--format", "all", "--output"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("JSON report"))
        .stdout(predicate::str::contains("HTML report"))
        .stdout(predicate::str::contains("Markdown report"));

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 3);
    assert!(names.iter().all(|n| n.starts_with("eecs-2311-")));
    assert!(names.iter().any(|n| n.ends_with(".html")));
    assert!(names.iter().any(|n| n.ends_with(".md")));
}

#[test]
fn report_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    gradecast()
        .args(["report", "--course", EECS, "--format", "pdf", "--output"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown report format"));
}

#[test]
fn compare_reports_shows_progress() {
    let dir = TempDir::new().unwrap();
    let early_course = dir.path().join("early.toml");
    std::fs::write(
        &early_course,
        r#"[course]
name = "EECS 2311"
target_grade = 70

[[assessments]]
name = "Midterm"
weight = 30
score = 80

[[assessments]]
name = "Final"
weight = 40

[[assessments]]
name = "Assignments"
weight = 20

[[assessments]]
name = "Participation"
weight = 10
"#,
    )
    .unwrap();

    let early_dir = dir.path().join("early");
    let later_dir = dir.path().join("later");
    gradecast()
        .arg("report")
        .arg("--course")
        .arg(&early_course)
        .arg("--output")
        .arg(&early_dir)
        .assert()
        .success();
    gradecast()
        .args(["report", "--course", EECS, "--output"])
        .arg(&later_dir)
        .assert()
        .success();

    let baseline = single_file(&early_dir);
    let current = single_file(&later_dir);

    gradecast()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress for EECS 2311"))
        .stdout(predicate::str::contains("Newly graded"))
        .stdout(predicate::str::contains("Final 45.0%"));

    gradecast()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .arg("--fail-on-decline")
        .assert()
        .failure();
}

#[test]
fn compare_nonexistent_report() {
    gradecast()
        .args([
            "compare",
            "--baseline",
            "no_such_file.json",
            "--current",
            "also_no_file.json",
        ])
        .assert()
        .failure();
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    gradecast()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created gradecast.toml"))
        .stdout(predicate::str::contains("Created courses/example.toml"));

    assert!(dir.path().join("gradecast.toml").exists());
    assert!(dir.path().join("courses/example.toml").exists());

    // The generated files work with the other commands.
    gradecast()
        .current_dir(dir.path())
        .args(["target", "--course", "courses/example.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Example Course"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    gradecast()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    gradecast()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn explicit_config_is_used() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "ungraded_default = 100\ndecimals = 2\n").unwrap();

    gradecast()
        .args(["what-if", "--course", EECS, "--config"])
        .arg(&config)
        .assert()
        .success()
        // 42 + 30
        .stdout(predicate::str::contains("72.00%"))
        .stdout(predicate::str::contains("on track"));
}

#[test]
fn missing_config_is_error() {
    gradecast()
        .args(["standing", "--course", EECS, "--config", "no-such-config.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn help_output() {
    gradecast()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Weighted grade standing and target planner",
        ));
}

#[test]
fn version_output() {
    gradecast()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gradecast"));
}
