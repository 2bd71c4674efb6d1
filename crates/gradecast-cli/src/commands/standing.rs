//! The `gradecast standing` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradecast_core::api::GetStandingRequest;
use gradecast_core::model::format_weight;

use super::{load_config, load_course, pct, print_json};

pub fn execute(course_path: PathBuf, json: bool, config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config)?;
    let course = load_course(&course_path, None)?;

    let response = GetStandingRequest {
        assessments: course.assessments.clone(),
    }
    .handle()?;

    if json {
        return print_json(&response);
    }

    let d = config.decimals;
    let mut table = Table::new();
    table.set_header(vec!["Assessment", "Weight", "Score"]);
    for a in &course.assessments {
        let score = match a.percent()? {
            Some(p) => pct(p, d),
            None => "-".to_string(),
        };
        table.add_row(vec![
            Cell::new(&a.name),
            Cell::new(a.weight),
            Cell::new(score),
        ]);
    }

    println!("Course: {}", course.name);
    println!("{table}");
    println!(
        "Current standing: {} ({} graded, {} remaining)",
        pct(response.current_standing, d),
        format_weight(response.graded_weight_pct),
        format_weight(response.remaining_weight_pct)
    );
    if !response.weights_balanced {
        println!(
            "WARNING: assessment weights total {}, not 100",
            format_weight(response.total_weight_pct)
        );
    }

    Ok(())
}
