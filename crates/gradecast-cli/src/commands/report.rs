//! The `gradecast report` command.

use std::path::PathBuf;

use anyhow::Result;

use gradecast_core::report::CourseReport;
use gradecast_report::html::write_html_report;
use gradecast_report::markdown::write_markdown_report;
use gradecast_report::ReportFormat;

use super::{load_config, load_course};

/// File-name friendly version of a course name.
fn slug(name: &str) -> String {
    let slug: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let slug = slug
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "course".to_string()
    } else {
        slug
    }
}

pub fn execute(
    course_path: PathBuf,
    format: String,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config)?;
    let course = load_course(&course_path, None)?;
    let formats = ReportFormat::parse_list(&format).map_err(|e| anyhow::anyhow!("{e}"))?;
    let output = output.unwrap_or_else(|| config.output_dir.clone());

    let report = CourseReport::build(&course, &config.projection_options())?;

    std::fs::create_dir_all(&output)?;
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");
    let stem = format!("{}-{timestamp}", slug(&course.name));

    for fmt in formats {
        let path = output.join(format!("{stem}.{}", fmt.extension()));
        match fmt {
            ReportFormat::Json => {
                report.save_json(&path)?;
                println!("JSON report: {}", path.display());
            }
            ReportFormat::Html => {
                write_html_report(&report, &path)?;
                println!("HTML report: {}", path.display());
            }
            ReportFormat::Markdown => {
                write_markdown_report(&report, &path)?;
                println!("Markdown report: {}", path.display());
            }
        }
    }
    tracing::info!(course = %course.name, "report written");

    Ok(())
}
