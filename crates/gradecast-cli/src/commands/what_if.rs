//! The `gradecast what-if` command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Color, Table};

use gradecast_core::api::WhatIfRequest;
use gradecast_core::whatif::{OverridePolicy, ProjectionStatus};

use super::{load_config, load_course, pct, print_json};

/// Parse a `name=score` pair for `--set`.
pub fn parse_override(s: &str) -> Result<(String, f64), String> {
    let (name, score) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=SCORE, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing assessment name in '{s}'"));
    }
    let score: f64 = score
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", score.trim()))?;
    Ok((name.to_string(), score))
}

pub fn execute(
    course_path: PathBuf,
    overrides: Vec<(String, f64)>,
    ungraded_default: Option<f64>,
    allow_graded: bool,
    target: Option<f64>,
    json: bool,
    config: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config)?;
    let course = load_course(&course_path, target)?;

    let mut options = config.projection_options();
    if let Some(score) = ungraded_default {
        options = options.with_ungraded_default(score);
    }
    if allow_graded {
        options = options.with_policy(OverridePolicy::AllowGraded);
    }

    let overrides: BTreeMap<String, f64> = overrides.into_iter().collect();
    let request = WhatIfRequest {
        assessments: course.assessments.clone(),
        target_grade: course.target_grade,
        overrides,
        ungraded_default: options.ungraded_default,
        override_policy: options.policy,
    };
    let response = request.handle()?;

    if json {
        return print_json(&response);
    }

    let d = config.decimals;
    let mut table = Table::new();
    table.set_header(vec!["Assessment", "Weight", "Score used", "Contribution"]);
    for a in &course.assessments {
        let used = if let Some(s) = request.overrides.get(&a.name) {
            format!("{} (what-if)", pct(*s, d))
        } else if let Some(p) = a.percent()? {
            pct(p, d)
        } else if let Some(s) = request.ungraded_default {
            format!("{} (default)", pct(s, d))
        } else {
            "-".to_string()
        };
        let contribution = response
            .per_assessment_contribution
            .get(&a.name)
            .map(|c| format!("{c:.2}"))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(&a.name),
            Cell::new(a.weight),
            Cell::new(used),
            Cell::new(contribution),
        ]);
    }

    let (status, color) = match response.status {
        ProjectionStatus::OnTrack => ("on track", Color::Green),
        ProjectionStatus::Below => ("below target", Color::Red),
    };

    println!("Course: {}", course.name);
    println!("{table}");
    let mut summary = Table::new();
    summary.add_row(vec![
        Cell::new("Projected final grade"),
        Cell::new(pct(response.projected_grade, d)),
        Cell::new(status).fg(color),
    ]);
    println!("{summary}");
    if !response.unscored.is_empty() {
        println!(
            "Not counted (no score assumed): {}. Pass --default to assume one.",
            response.unscored.join(", ")
        );
    }

    Ok(())
}
