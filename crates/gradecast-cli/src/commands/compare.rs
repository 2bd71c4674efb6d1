//! The `gradecast compare` command.

use std::path::PathBuf;

use anyhow::Result;

use gradecast_core::report::CourseReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: f64,
    fail_on_decline: bool,
    format: String,
) -> Result<()> {
    let baseline = CourseReport::load_json(&baseline_path)?;
    let current = CourseReport::load_json(&current_path)?;

    if baseline.course.name != current.course.name {
        tracing::warn!(
            baseline = %baseline.course.name,
            current = %current.course.name,
            "comparing reports for different courses"
        );
    }

    let report = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            println!(
                "Progress for {}: standing {:.1}% -> {:.1}% ({:+.1}), needed {:.1}% -> {:.1}%, outlook {} -> {}",
                report.course,
                report.standing_before,
                report.standing_after,
                report.standing_delta,
                report.required_before.clamp(0.0, 100.0),
                report.required_after.clamp(0.0, 100.0),
                report.classification_before,
                report.classification_after
            );

            if !report.newly_graded.is_empty() {
                println!("\nNewly graded:");
                for g in &report.newly_graded {
                    println!("  {} {:.1}%", g.assessment, g.score);
                }
            }

            if !report.score_changes.is_empty() {
                println!("\nChanged scores:");
                for c in &report.score_changes {
                    println!(
                        "  {} {:.1}% -> {:.1}% ({:+.1})",
                        c.assessment, c.baseline_score, c.current_score, c.delta
                    );
                }
            }

            if !report.added.is_empty() {
                println!("\n{} added assessment(s)", report.added.len());
            }
            if !report.removed.is_empty() {
                println!("{} removed assessment(s)", report.removed.len());
            }
        }
    }

    if fail_on_decline && report.has_declined() {
        std::process::exit(1);
    }

    Ok(())
}
