//! The `gradecast convert` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradecast_core::scale::{convert, GradeScale};

use super::print_json;

pub fn execute(value: String, from: String, json: bool) -> Result<()> {
    let scale: GradeScale = from.parse().map_err(|e: String| anyhow::anyhow!("{e}"))?;
    let conversion = convert(&value, scale)?;

    if json {
        return print_json(&conversion);
    }

    let mut table = Table::new();
    table.set_header(vec!["Scale", "Value"]);
    table.add_row(vec![
        Cell::new("Percentage"),
        Cell::new(format!("{:.1}%", conversion.percentage)),
    ]);
    table.add_row(vec![Cell::new("4.0"), Cell::new(format!("{:.1}", conversion.four))]);
    table.add_row(vec![Cell::new("9.0"), Cell::new(format!("{:.1}", conversion.nine))]);
    table.add_row(vec![Cell::new("10.0"), Cell::new(format!("{:.1}", conversion.ten))]);
    table.add_row(vec![Cell::new("Letter"), Cell::new(&conversion.letter)]);
    table.add_row(vec![
        Cell::new("York"),
        Cell::new(format!(
            "{} ({}, {})",
            conversion.york.letter, conversion.york.grade_point, conversion.york.description
        )),
    ]);

    println!("{value} on the {scale} scale:");
    println!("{table}");
    println!("Conversions are approximate; institutions publish their own tables.");

    Ok(())
}
