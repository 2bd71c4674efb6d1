//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use gradecast_core::config::{load_config_from, GradecastConfig};
use gradecast_core::model::Course;

pub mod compare;
pub mod convert;
pub mod init;
pub mod minimum;
pub mod report;
pub mod standing;
pub mod target;
pub mod validate;
pub mod what_if;

fn load_config(path: Option<PathBuf>) -> Result<GradecastConfig> {
    load_config_from(path.as_deref())
}

/// Parse a course file, replacing its target when one was given on the command line.
fn load_course(path: &Path, target: Option<f64>) -> Result<Course> {
    let mut course = gradecast_core::parser::parse_course(path)?;
    if let Some(target) = target {
        gradecast_core::model::validate_target(target)?;
        course.target_grade = target;
    }
    Ok(course)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize response")?;
    println!("{json}");
    Ok(())
}

/// Format a percentage with the configured precision.
fn pct(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}%")
}
