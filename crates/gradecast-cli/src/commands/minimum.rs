//! The `gradecast minimum` command.

use std::path::PathBuf;

use anyhow::Result;

use gradecast_core::api::MinimumRequiredRequest;

use super::{load_config, load_course, pct, print_json};

pub fn execute(
    course_path: PathBuf,
    assessment: String,
    target: Option<f64>,
    json: bool,
    config: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config)?;
    let course = load_course(&course_path, target)?;

    let response = MinimumRequiredRequest {
        assessments: course.assessments,
        target_grade: course.target_grade,
        assessment_name: assessment,
    }
    .handle()?;

    if json {
        return print_json(&response);
    }

    if response.achievable {
        println!(
            "Minimum on {} for {}: {} (assuming 100 on every other remaining assessment)",
            response.assessment_name,
            pct(course.target_grade, config.decimals),
            pct(response.minimum_required, config.decimals)
        );
    } else {
        println!(
            "{} cannot be reached through {}, even with 100 everywhere else.",
            pct(course.target_grade, config.decimals),
            response.assessment_name
        );
    }

    Ok(())
}
