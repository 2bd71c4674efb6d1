//! The `gradecast target` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Color, Table};

use gradecast_core::api::CheckTargetRequest;
use gradecast_core::feasibility::Tone;

use super::{load_config, load_course, pct, print_json};

pub fn execute(
    course_path: PathBuf,
    target: Option<f64>,
    json: bool,
    config: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config)?;
    let course = load_course(&course_path, target)?;

    let response = CheckTargetRequest::for_course(&course).handle()?;

    if json {
        return print_json(&response);
    }

    let d = config.decimals;
    let color = match response.tone {
        Tone::Positive => Color::Green,
        Tone::Caution => Color::Yellow,
        Tone::Negative => Color::Red,
    };

    let mut table = Table::new();
    table.set_header(vec!["", "Value"]);
    table.add_row(vec![
        Cell::new("Target"),
        Cell::new(format!(
            "{} (York {}, {})",
            pct(response.target_grade, d),
            response.york_equivalent.letter,
            response.york_equivalent.description
        )),
    ]);
    table.add_row(vec![
        Cell::new("Current standing"),
        Cell::new(pct(response.current_standing, d)),
    ]);
    table.add_row(vec![
        Cell::new("Needed on remaining work"),
        Cell::new(format!(
            "{} {}",
            response.required_average_display, response.required_fraction_display
        )),
    ]);
    table.add_row(vec![
        Cell::new("Outlook"),
        Cell::new(response.classification).fg(color),
    ]);
    table.add_row(vec![
        Cell::new("Best possible"),
        Cell::new(pct(response.maximum_possible, d)),
    ]);
    if response.achievable && response.required_points > 0.0 {
        let r = &response.risk_ranges;
        table.add_row(vec![
            Cell::new("Minimum / safe / stretch"),
            Cell::new(format!(
                "{} / {} / {}",
                pct(r.minimum, d),
                pct(r.safe, d),
                pct(r.stretch, d)
            )),
        ]);
    }

    println!("Course: {}", course.name);
    println!("{table}");
    println!("{}", response.explanation_text);

    Ok(())
}
