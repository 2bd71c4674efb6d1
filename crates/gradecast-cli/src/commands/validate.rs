//! The `gradecast validate` command.

use std::path::PathBuf;

use anyhow::Result;

use gradecast_core::structure::validate_course;

pub fn execute(course_path: PathBuf) -> Result<()> {
    let courses = if course_path.is_dir() {
        gradecast_core::parser::load_course_directory(&course_path)?
    } else {
        vec![gradecast_core::parser::parse_course(&course_path)?]
    };

    let mut total_warnings = 0;

    for course in &courses {
        println!(
            "Course: {} ({} assessments, {} graded)",
            course.name,
            course.assessments.len(),
            course.graded_count()
        );

        let warnings = validate_course(course);
        for w in &warnings {
            let prefix = w
                .assessment
                .as_ref()
                .map(|name| format!("  [{name}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if courses.is_empty() {
        println!("No course files found.");
    } else if total_warnings == 0 {
        println!("All courses valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
