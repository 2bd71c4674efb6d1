//! Course file parser.
//!
//! Loads courses from TOML (or JSON, by extension) files and directories.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Assessment, Course, Score};

/// Intermediate structure for parsing course files.
#[derive(Debug, Deserialize)]
struct CourseFile {
    course: CourseHeader,
    #[serde(default)]
    assessments: Vec<FileAssessment>,
}

#[derive(Debug, Deserialize)]
struct CourseHeader {
    name: String,
    target_grade: f64,
}

#[derive(Debug, Deserialize)]
struct FileAssessment {
    name: String,
    weight: f64,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    raw_score: Option<f64>,
    #[serde(default)]
    total_score: Option<f64>,
}

impl FileAssessment {
    fn into_assessment(self) -> Result<Assessment> {
        let score = match (self.score, self.raw_score, self.total_score) {
            (Some(_), Some(_), _) => anyhow::bail!(
                "assessment '{}': give either score or raw_score, not both",
                self.name
            ),
            (Some(p), None, None) => Some(Score::Percent(p)),
            (Some(_), None, Some(_)) => anyhow::bail!(
                "assessment '{}': total_score needs raw_score, not score",
                self.name
            ),
            (None, Some(raw), Some(total)) => Some(Score::Fraction { raw, total }),
            (None, Some(_), None) => {
                anyhow::bail!("assessment '{}': raw_score needs total_score", self.name)
            }
            (None, None, Some(_)) => {
                anyhow::bail!("assessment '{}': total_score without raw_score", self.name)
            }
            (None, None, None) => None,
        };
        Ok(Assessment {
            name: self.name,
            weight: self.weight,
            score,
        })
    }
}

/// Which syntax a course file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseFormat {
    Toml,
    Json,
}

impl CourseFormat {
    /// Pick the format from the file extension; anything but `.json` is TOML.
    pub fn from_path(path: &Path) -> Self {
        if path.extension().is_some_and(|ext| ext == "json") {
            CourseFormat::Json
        } else {
            CourseFormat::Toml
        }
    }
}

/// Parse a single course file.
pub fn parse_course(path: &Path) -> Result<Course> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read course file: {}", path.display()))?;

    parse_course_str(&content, path)
}

/// Parse course file content; `source_path` picks the format and labels errors.
pub fn parse_course_str(content: &str, source_path: &Path) -> Result<Course> {
    let parsed: CourseFile = match CourseFormat::from_path(source_path) {
        CourseFormat::Toml => toml::from_str(content)
            .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?,
        CourseFormat::Json => serde_json::from_str(content)
            .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?,
    };

    let assessments = parsed
        .assessments
        .into_iter()
        .map(FileAssessment::into_assessment)
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("invalid assessment in {}", source_path.display()))?;

    let course = Course::new(parsed.course.name, parsed.course.target_grade, assessments);
    course
        .validate()
        .with_context(|| format!("invalid course: {}", source_path.display()))?;

    Ok(course)
}

/// Recursively load all course files (`.toml` and `.json`) from a directory.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_course_directory(dir: &Path) -> Result<Vec<Course>> {
    let mut courses = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            courses.extend(load_course_directory(&path)?);
        } else if path
            .extension()
            .is_some_and(|ext| ext == "toml" || ext == "json")
        {
            match parse_course(&path) {
                Ok(course) => courses.push(course),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(courses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[course]
name = "EECS 2311"
target_grade = 70

[[assessments]]
name = "Midterm"
weight = 30
score = 80

[[assessments]]
name = "Final"
weight = 40
raw_score = 36
total_score = 80

[[assessments]]
name = "Assignments"
weight = 20

[[assessments]]
name = "Participation"
weight = 10
"#;

    #[test]
    fn parse_valid_toml() {
        let course = parse_course_str(VALID_TOML, &PathBuf::from("c.toml")).unwrap();
        assert_eq!(course.name, "EECS 2311");
        assert_eq!(course.target_grade, 70.0);
        assert_eq!(course.assessments.len(), 4);
        assert_eq!(course.assessments[0].score, Some(Score::Percent(80.0)));
        assert_eq!(
            course.assessments[1].score,
            Some(Score::Fraction {
                raw: 36.0,
                total: 80.0
            })
        );
        assert!(!course.assessments[2].is_graded());
        assert_eq!(course.assessments[1].percent().unwrap(), Some(45.0));
    }

    #[test]
    fn parse_json_by_extension() {
        let json = r#"{
            "course": {"name": "MATH 1013", "target_grade": 80},
            "assessments": [
                {"name": "Quiz", "weight": 50, "score": 90},
                {"name": "Exam", "weight": 50}
            ]
        }"#;
        let course = parse_course_str(json, &PathBuf::from("c.json")).unwrap();
        assert_eq!(course.name, "MATH 1013");
        assert_eq!(course.graded_count(), 1);
    }

    #[test]
    fn missing_assessments_is_empty_course() {
        let toml = r#"
[course]
name = "Empty"
target_grade = 50
"#;
        let course = parse_course_str(toml, &PathBuf::from("e.toml")).unwrap();
        assert!(course.assessments.is_empty());
    }

    #[test]
    fn both_score_forms_rejected() {
        let toml = r#"
[course]
name = "Bad"
target_grade = 70

[[assessments]]
name = "Lab"
weight = 100
score = 80
raw_score = 8
total_score = 10
"#;
        let err = parse_course_str(toml, &PathBuf::from("b.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("not both"));
    }

    #[test]
    fn raw_score_needs_total() {
        let toml = r#"
[course]
name = "Bad"
target_grade = 70

[[assessments]]
name = "Lab"
weight = 100
raw_score = 8
"#;
        let err = parse_course_str(toml, &PathBuf::from("b.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("needs total_score"));
    }

    #[test]
    fn engine_validation_runs() {
        let toml = r#"
[course]
name = "Bad"
target_grade = 70

[[assessments]]
name = "Lab"
weight = -5
"#;
        let err = parse_course_str(toml, &PathBuf::from("b.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("non-negative"));

        let bad_target = "[course]\nname = \"X\"\ntarget_grade = 120\n";
        assert!(parse_course_str(bad_target, &PathBuf::from("t.toml")).is_err());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_course_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn load_directory_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("good.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("bad.toml"), "not = [toml").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let nested = dir.path().join("winter");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("second.toml"), VALID_TOML).unwrap();

        let courses = load_course_directory(dir.path()).unwrap();
        assert_eq!(courses.len(), 2);
        assert!(courses.iter().all(|c| c.name == "EECS 2311"));
    }

    #[test]
    fn load_directory_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("c.toml");
        std::fs::write(&file, VALID_TOML).unwrap();
        assert!(load_course_directory(&file).is_err());
    }
}
