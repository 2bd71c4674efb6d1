//! Course report snapshots with JSON persistence and progress comparison.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::feasibility::{
    compute_minimum_for_assessment, required_from, Classification, MinimumRequiredResult,
    RequiredAverageResult,
};
use crate::ledger::Ledger;
use crate::model::{validate_target, Course};
use crate::scale::{york_equivalent, YorkGrade};
use crate::standing::{standing_from, StandingResult};
use crate::structure::{validate_course, ValidationWarning};
use crate::whatif::{project, ProjectionOptions, ProjectionStatus, WhatIfResult};

/// A full snapshot of one course at one point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    pub course: CourseSummary,
    /// Assessments in syllabus order, scores normalized.
    pub assessments: Vec<AssessmentLine>,
    pub standing: StandingResult,
    pub target: RequiredAverageResult,
    /// York letter grade the target corresponds to.
    pub target_equivalent: YorkGrade,
    /// Projection with no overrides, under the options the report was built with.
    pub projection: WhatIfResult,
    pub projection_status: ProjectionStatus,
    /// Minimum score on each ungraded assessment.
    pub minimums: Vec<MinimumRequiredResult>,
    #[serde(default)]
    pub warnings: Vec<ValidationWarning>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSummary {
    pub name: String,
    pub target_grade: f64,
    pub assessment_count: usize,
    pub graded_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentLine {
    pub name: String,
    pub weight: f64,
    /// Normalized percentage; absent when ungraded.
    pub percent: Option<f64>,
}

impl CourseReport {
    /// Run every engine query against `course` and collect the results.
    pub fn build(course: &Course, options: &ProjectionOptions) -> Result<Self, EngineError> {
        validate_target(course.target_grade)?;
        let ledger = Ledger::build(&course.assessments)?;
        let standing = standing_from(&ledger);
        let target = required_from(&ledger, course.target_grade);
        let projection = project(&course.assessments, &BTreeMap::new(), options)?;

        let minimums = ledger
            .ungraded()
            .map(|e| {
                compute_minimum_for_assessment(&course.assessments, course.target_grade, e.name())
            })
            .collect::<Result<Vec<_>, _>>()?;

        let assessments = ledger
            .entries
            .iter()
            .map(|e| AssessmentLine {
                name: e.name().to_string(),
                weight: e.weight(),
                percent: e.percent,
            })
            .collect();

        tracing::debug!(course = %course.name, "built course report");

        Ok(Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            course: CourseSummary {
                name: course.name.clone(),
                target_grade: course.target_grade,
                assessment_count: course.assessments.len(),
                graded_count: course.graded_count(),
            },
            assessments,
            standing,
            target,
            target_equivalent: york_equivalent(course.target_grade),
            projection_status: projection.status(course.target_grade),
            projection,
            minimums,
            warnings: validate_course(course),
        })
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: CourseReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare this report against an earlier one of the same course.
    ///
    /// Score changes smaller than `threshold` percentage points are ignored.
    pub fn compare(&self, baseline: &CourseReport, threshold: f64) -> ProgressReport {
        let before: BTreeMap<&str, &AssessmentLine> = baseline
            .assessments
            .iter()
            .map(|a| (a.name.as_str(), a))
            .collect();

        let mut score_changes = Vec::new();
        let mut newly_graded = Vec::new();
        let mut added = Vec::new();

        for line in &self.assessments {
            match before.get(line.name.as_str()) {
                None => added.push(line.name.clone()),
                Some(old) => match (old.percent, line.percent) {
                    (None, Some(score)) => newly_graded.push(NewlyGraded {
                        assessment: line.name.clone(),
                        score,
                    }),
                    (Some(b), Some(c)) if (c - b).abs() > threshold => {
                        score_changes.push(ScoreChange {
                            assessment: line.name.clone(),
                            baseline_score: b,
                            current_score: c,
                            delta: c - b,
                        })
                    }
                    _ => {}
                },
            }
        }

        let removed = baseline
            .assessments
            .iter()
            .filter(|a| !self.assessments.iter().any(|c| c.name == a.name))
            .map(|a| a.name.clone())
            .collect();

        ProgressReport {
            course: self.course.name.clone(),
            standing_before: baseline.standing.current_standing,
            standing_after: self.standing.current_standing,
            standing_delta: self.standing.current_standing - baseline.standing.current_standing,
            required_before: baseline.target.raw_required_average,
            required_after: self.target.raw_required_average,
            required_delta: self.target.raw_required_average
                - baseline.target.raw_required_average,
            classification_before: baseline.target.classification,
            classification_after: self.target.classification,
            threshold,
            score_changes,
            newly_graded,
            added,
            removed,
        }
    }
}

/// Result of comparing two snapshots of a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub course: String,
    pub standing_before: f64,
    pub standing_after: f64,
    pub standing_delta: f64,
    /// Raw average needed on remaining work, before and after.
    pub required_before: f64,
    pub required_after: f64,
    pub required_delta: f64,
    pub classification_before: Classification,
    pub classification_after: Classification,
    pub threshold: f64,
    /// Scores that were already recorded and changed.
    pub score_changes: Vec<ScoreChange>,
    /// Assessments graded since the baseline.
    pub newly_graded: Vec<NewlyGraded>,
    /// Assessments in current but not baseline.
    pub added: Vec<String>,
    /// Assessments in baseline but not current.
    pub removed: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreChange {
    pub assessment: String,
    pub baseline_score: f64,
    pub current_score: f64,
    pub delta: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewlyGraded {
    pub assessment: String,
    pub score: f64,
}

impl ProgressReport {
    /// Format the progress report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**{}:** standing {:.1}% → {:.1}% ({:+.1}), outlook {} → {}\n\n",
            self.course,
            self.standing_before,
            self.standing_after,
            self.standing_delta,
            self.classification_before,
            self.classification_after
        ));

        if !self.newly_graded.is_empty() {
            md.push_str("### Newly graded\n\n");
            md.push_str("| Assessment | Score |\n");
            md.push_str("|------------|-------|\n");
            for g in &self.newly_graded {
                md.push_str(&format!("| {} | {:.1}% |\n", g.assessment, g.score));
            }
            md.push('\n');
        }

        if !self.score_changes.is_empty() {
            md.push_str("### Changed scores\n\n");
            md.push_str("| Assessment | Baseline | Current | Delta |\n");
            md.push_str("|------------|----------|---------|-------|\n");
            for c in &self.score_changes {
                md.push_str(&format!(
                    "| {} | {:.1}% | {:.1}% | {:+.1} |\n",
                    c.assessment, c.baseline_score, c.current_score, c.delta
                ));
            }
            md.push('\n');
        }

        if !self.added.is_empty() {
            md.push_str(&format!("Added: {}\n\n", self.added.join(", ")));
        }
        if !self.removed.is_empty() {
            md.push_str(&format!("Removed: {}\n\n", self.removed.join(", ")));
        }

        md
    }

    /// Returns true if the average needed on remaining work rose past the threshold.
    pub fn has_declined(&self) -> bool {
        self.required_delta > self.threshold
    }
}
