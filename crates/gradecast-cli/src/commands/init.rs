//! The `gradecast init` command.

use anyhow::Result;

use gradecast_core::config::STARTER_CONFIG;

pub fn execute() -> Result<()> {
    if std::path::Path::new("gradecast.toml").exists() {
        println!("gradecast.toml already exists, skipping.");
    } else {
        std::fs::write("gradecast.toml", STARTER_CONFIG)?;
        println!("Created gradecast.toml");
    }

    std::fs::create_dir_all("courses")?;
    let example_path = std::path::Path::new("courses/example.toml");
    if example_path.exists() {
        println!("courses/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_COURSE)?;
        println!("Created courses/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit courses/example.toml with your syllabus weights and scores");
    println!("  2. Run: gradecast validate --course courses/example.toml");
    println!("  3. Run: gradecast target --course courses/example.toml");

    Ok(())
}

const EXAMPLE_COURSE: &str = r#"[course]
name = "Example Course"
target_grade = 75

# Weights are percentage points of the final grade and should total 100.

[[assessments]]
name = "Assignment 1"
weight = 10
raw_score = 17
total_score = 20

[[assessments]]
name = "Midterm"
weight = 30
score = 72

[[assessments]]
name = "Assignment 2"
weight = 10

[[assessments]]
name = "Final Exam"
weight = 50
"#;
