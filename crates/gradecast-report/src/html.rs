//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use gradecast_core::feasibility::{Classification, Tone};
use gradecast_core::model::format_weight;
use gradecast_core::report::CourseReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn tone_class(classification: Classification) -> &'static str {
    match classification.tone() {
        Tone::Positive => "positive",
        Tone::Caution => "caution",
        Tone::Negative => "negative",
    }
}

/// Generate an HTML report from a course report.
pub fn generate_html(report: &CourseReport) -> String {
    let mut html = String::new();
    let target = &report.target;

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>gradecast report: {}</title>\n",
        html_escape(&report.course.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&report.course.name)));
    html.push_str(&format!(
        "<p class=\"meta\">Target <strong>{:.1}%</strong> ({} / {}) | {} of {} assessments graded | {}</p>\n",
        report.course.target_grade,
        html_escape(&report.target_equivalent.letter),
        html_escape(&report.target_equivalent.description),
        report.course.graded_count,
        report.course.assessment_count,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary cards
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n<div class=\"cards\">\n");
    html.push_str(&card(
        "Current standing",
        &format!("{:.1}%", report.standing.current_standing),
        &format!("{} weight graded", report.standing.graded_weight),
        "",
    ));
    let required = if target.achievable {
        format!("{:.1}%", target.required_average)
    } else {
        "&gt; 100%".to_string()
    };
    html.push_str(&card(
        "Needed on remaining work",
        &required,
        &format!("{} weight remaining", format_weight(target.remaining_weight)),
        tone_class(target.classification),
    ));
    html.push_str(&card(
        "Outlook",
        &html_escape(target.classification.label()),
        &html_escape(target.classification.explanation()),
        tone_class(target.classification),
    ));
    html.push_str(&card(
        "Best possible",
        &format!("{:.1}%", target.maximum_possible),
        "if every remaining assessment scores 100",
        "",
    ));
    html.push_str("</div>\n");

    if target.achievable && target.remaining_weight > 0.0 {
        let r = &target.risk_ranges;
        html.push_str(&format!(
            "<p class=\"ranges\">Minimum {:.1}% | safe {:.1}% | stretch {:.1}%</p>\n",
            r.minimum, r.safe, r.stretch
        ));
    }
    if !report.standing.weights_balanced {
        html.push_str(&format!(
            "<p class=\"warning\">Assessment weights total {}, not 100.</p>\n",
            format_weight(report.standing.total_weight)
        ));
    }
    html.push_str("</section>\n");

    // Assessments
    html.push_str("<section class=\"assessments\">\n");
    html.push_str("<h2>Assessments</h2>\n");
    html.push_str("<table>\n");
    html.push_str("<thead><tr><th>Assessment</th><th>Weight</th><th>Score</th><th>Contribution</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for a in &report.assessments {
        let (class, score) = match a.percent {
            Some(p) => ("graded", format!("{p:.1}%")),
            None => ("ungraded", "-".to_string()),
        };
        let contribution = report
            .projection
            .per_assessment_contribution
            .get(&a.name)
            .map(|c| format!("{c:.2}"))
            .unwrap_or_else(|| "-".to_string());
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            class,
            html_escape(&a.name),
            a.weight,
            score,
            contribution
        ));
    }
    html.push_str("</tbody></table>\n");

    if !report.projection.per_assessment_contribution.is_empty() {
        html.push_str(&generate_contribution_chart(report));
    }
    html.push_str("</section>\n");

    // Minimums
    if !report.minimums.is_empty() {
        html.push_str("<section class=\"minimums\">\n");
        html.push_str("<h2>Minimum per remaining assessment</h2>\n");
        html.push_str(
            "<p class=\"meta\">Assumes every other remaining assessment scores 100.</p>\n",
        );
        html.push_str("<table>\n");
        html.push_str("<thead><tr><th>Assessment</th><th>Minimum</th></tr></thead>\n<tbody>\n");
        for m in &report.minimums {
            let (class, text) = if m.achievable {
                ("", format!("{:.1}%", m.minimum_required))
            } else {
                ("negative", "out of reach".to_string())
            };
            html.push_str(&format!(
                "<tr><td>{}</td><td class=\"{}\">{}</td></tr>\n",
                html_escape(&m.assessment),
                class,
                text
            ));
        }
        html.push_str("</tbody></table>\n</section>\n");
    }

    // Projection
    html.push_str("<section class=\"projection\">\n");
    html.push_str("<h2>Projection</h2>\n");
    html.push_str(&format!(
        "<p>Projected final grade <strong>{:.1}%</strong> ({})</p>\n",
        report.projection.projected_grade,
        match report.projection_status {
            gradecast_core::whatif::ProjectionStatus::OnTrack => "on track",
            gradecast_core::whatif::ProjectionStatus::Below => "below target",
        }
    ));
    if !report.projection.unscored.is_empty() {
        let names: Vec<String> = report
            .projection
            .unscored
            .iter()
            .map(|n| html_escape(n))
            .collect();
        html.push_str(&format!(
            "<p class=\"meta\">Not counted (no score assumed): {}</p>\n",
            names.join(", ")
        ));
    }
    html.push_str("</section>\n");

    if !report.warnings.is_empty() {
        html.push_str("<section class=\"warnings\">\n<h2>Warnings</h2>\n<ul>\n");
        for w in &report.warnings {
            let prefix = w
                .assessment
                .as_deref()
                .map(|a| format!("<strong>{}</strong>: ", html_escape(a)))
                .unwrap_or_default();
            html.push_str(&format!("<li>{}{}</li>\n", prefix, html_escape(&w.message)));
        }
        html.push_str("</ul>\n</section>\n");
    }

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

fn card(title: &str, value: &str, detail: &str, class: &str) -> String {
    format!(
        "<div class=\"card {class}\"><h3>{title}</h3><p class=\"value\">{value}</p><p class=\"detail\">{detail}</p></div>\n"
    )
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &CourseReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

/// Horizontal bars of each assessment's contribution to the final grade.
fn generate_contribution_chart(report: &CourseReport) -> String {
    let bar_height = 24;
    let max_width = 400;
    let padding = 8;
    let label_width = 200;

    let rows: Vec<(&str, f64, f64)> = report
        .assessments
        .iter()
        .filter_map(|a| {
            report
                .projection
                .per_assessment_contribution
                .get(&a.name)
                .map(|&c| (a.name.as_str(), c, a.weight))
        })
        .collect();

    let total_height = rows.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 80,
        total_height
    );

    for (i, (name, contribution, weight)) in rows.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = (contribution / 100.0 * max_width as f64) as usize;
        let full = (weight / 100.0 * max_width as f64) as usize;
        let ratio = if *weight > 0.0 {
            contribution / weight
        } else {
            0.0
        };

        let color = if ratio >= 0.8 {
            "#22c55e"
        } else if ratio >= 0.6 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(name)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"#9ca3af\" rx=\"4\"/>\n",
            label_width, y, full, bar_height
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.2} / {}</text>\n",
            label_width + full.max(width) + 8,
            y + bar_height / 2,
            contribution,
            weight
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --positive: #dcfce7; --caution: #fef3c7; --negative: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --positive: #064e3b; --caution: #78350f; --negative: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 1rem; }
.card { border: 1px solid var(--border); border-radius: 8px; padding: 1rem; }
.card h3 { margin: 0; font-size: 0.9rem; color: #6b7280; }
.card .value { font-size: 1.8rem; font-weight: bold; margin: 0.5rem 0; }
.card .detail { margin: 0; font-size: 0.85rem; }
.positive { background: var(--positive); }
.caution { background: var(--caution); }
.negative { background: var(--negative); }
.warning { color: #b45309; font-weight: bold; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
tr.ungraded td { color: #6b7280; font-style: italic; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use gradecast_core::model::{Assessment, Course};
    use gradecast_core::whatif::ProjectionOptions;

    fn make_test_report() -> CourseReport {
        let course = Course::new(
            "EECS <2311>",
            70.0,
            vec![
                Assessment::graded("Midterm", 30.0, 80.0),
                Assessment::graded("Final", 40.0, 45.0),
                Assessment::ungraded("Assignments", 20.0),
                Assessment::ungraded("Participation", 10.0),
            ],
        );
        let mut report = CourseReport::build(&course, &ProjectionOptions::default()).unwrap();
        report.id = uuid::Uuid::nil();
        report.created_at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
        report
    }

    #[test]
    fn html_report_contains_required_elements() {
        let report = make_test_report();
        let html = generate_html(&report);

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Midterm"));
        assert!(html.contains("Participation"));
        assert!(html.contains("93.3%"));
        assert!(html.contains("Challenging"));
        assert!(html.contains("card caution"));
        assert!(html.contains("<svg"));
        assert!(html.contains("Not counted"));
        assert!(html.contains("2025-03-14 09:30:00 UTC"));
    }

    #[test]
    fn html_escapes_course_name() {
        let html = generate_html(&make_test_report());
        assert!(html.contains("EECS &lt;2311&gt;"));
        assert!(!html.contains("<h1>EECS <2311>"));
    }

    #[test]
    fn html_marks_unreachable_targets() {
        let course = Course::new(
            "Done",
            90.0,
            vec![Assessment::graded("Exam", 100.0, 60.0)],
        );
        let report = CourseReport::build(&course, &ProjectionOptions::default()).unwrap();
        let html = generate_html(&report);
        assert!(html.contains("&gt; 100%"));
        assert!(html.contains("Not Possible"));
        assert!(html.contains("card negative"));
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.html");

        write_html_report(&report, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<!DOCTYPE html>"));
    }
}
