//! Markdown summary of a course report.

use std::path::Path;

use anyhow::{Context, Result};

use gradecast_core::model::format_weight;
use gradecast_core::report::CourseReport;
use gradecast_core::whatif::ProjectionStatus;

/// Generate a Markdown summary from a course report.
pub fn generate_markdown(report: &CourseReport) -> String {
    let mut md = String::new();
    let target = &report.target;

    md.push_str(&format!("# {}\n\n", report.course.name));
    md.push_str(&format!(
        "Target **{:.1}%** (York {}, {}) | generated {}\n\n",
        report.course.target_grade,
        report.target_equivalent.letter,
        report.target_equivalent.description,
        report.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    md.push_str("## Summary\n\n");
    md.push_str(&format!(
        "- Current standing: **{:.1}%** over {} weight graded\n",
        report.standing.current_standing,
        format_weight(report.standing.graded_weight)
    ));
    if target.achievable {
        md.push_str(&format!(
            "- Needed on remaining {} weight: **{:.1}%**\n",
            format_weight(target.remaining_weight),
            target.required_average
        ));
    } else {
        md.push_str("- Needed on remaining work: **> 100%**\n");
    }
    md.push_str(&format!(
        "- Outlook: **{}**. {}\n",
        target.classification,
        target.classification.explanation()
    ));
    md.push_str(&format!(
        "- Best possible final grade: {:.1}%\n",
        target.maximum_possible
    ));
    if !report.standing.weights_balanced {
        md.push_str(&format!(
            "- Warning: weights total {}, not 100\n",
            format_weight(report.standing.total_weight)
        ));
    }
    md.push('\n');

    md.push_str("## Assessments\n\n");
    md.push_str("| Assessment | Weight | Score |\n");
    md.push_str("|------------|--------|-------|\n");
    for a in &report.assessments {
        let score = a
            .percent
            .map(|p| format!("{p:.1}%"))
            .unwrap_or_else(|| "-".to_string());
        md.push_str(&format!("| {} | {} | {} |\n", a.name, a.weight, score));
    }
    md.push('\n');

    if !report.minimums.is_empty() {
        md.push_str("## Minimum per remaining assessment\n\n");
        md.push_str("| Assessment | Minimum |\n");
        md.push_str("|------------|---------|\n");
        for m in &report.minimums {
            let text = if m.achievable {
                format!("{:.1}%", m.minimum_required)
            } else {
                "out of reach".to_string()
            };
            md.push_str(&format!("| {} | {} |\n", m.assessment, text));
        }
        md.push('\n');
    }

    md.push_str("## Projection\n\n");
    let status = match report.projection_status {
        ProjectionStatus::OnTrack => "on track",
        ProjectionStatus::Below => "below target",
    };
    md.push_str(&format!(
        "Projected final grade: **{:.1}%** ({status})\n",
        report.projection.projected_grade
    ));
    if !report.projection.unscored.is_empty() {
        md.push_str(&format!(
            "\nNot counted (no score assumed): {}\n",
            report.projection.unscored.join(", ")
        ));
    }

    if !report.warnings.is_empty() {
        md.push_str("\n## Warnings\n\n");
        for w in &report.warnings {
            match &w.assessment {
                Some(a) => md.push_str(&format!("- {a}: {}\n", w.message)),
                None => md.push_str(&format!("- {}\n", w.message)),
            }
        }
    }

    md
}

/// Write a Markdown report to a file.
pub fn write_markdown_report(report: &CourseReport, path: &Path) -> Result<()> {
    let md = generate_markdown(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, md)
        .with_context(|| format!("failed to write Markdown report to {}", path.display()))?;
    Ok(())
}
