//! What-if projection under hypothetical scores.
//!
//! Overrides apply for the duration of one call; the caller's assessments are
//! never touched.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::ledger::Ledger;
use crate::model::{Assessment, GRADE_EPSILON};

/// Conventional planning score for ungraded work when callers want one.
///
/// Never applied implicitly: pass it through
/// [`ProjectionOptions::ungraded_default`] to opt in.
pub const SUGGESTED_UNGRADED_DEFAULT: f64 = 75.0;

/// Whether overrides may replace real scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverridePolicy {
    /// Overrides on graded assessments are rejected.
    #[default]
    UngradedOnly,
    /// Overrides replace real scores for this projection.
    AllowGraded,
}

/// Caller choices for a projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionOptions {
    /// Score assumed for ungraded work without an override; `None` leaves it unscored.
    #[serde(default)]
    pub ungraded_default: Option<f64>,
    #[serde(default)]
    pub policy: OverridePolicy,
}

impl ProjectionOptions {
    pub fn with_ungraded_default(mut self, score: f64) -> Self {
        self.ungraded_default = Some(score);
        self
    }

    pub fn with_policy(mut self, policy: OverridePolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Whether a projection meets the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionStatus {
    OnTrack,
    Below,
}

impl fmt::Display for ProjectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionStatus::OnTrack => write!(f, "on_track"),
            ProjectionStatus::Below => write!(f, "below"),
        }
    }
}

/// Outcome of a what-if projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfResult {
    /// Projected final grade, normalized by declared total weight.
    pub projected_grade: f64,
    /// Points each scored assessment contributes per 100 points of final grade.
    pub per_assessment_contribution: BTreeMap<String, f64>,
    /// Ungraded assessments that had neither an override nor a default.
    #[serde(default)]
    pub unscored: Vec<String>,
}

impl WhatIfResult {
    /// Exact equality with the target counts as on track.
    pub fn status(&self, target: f64) -> ProjectionStatus {
        if self.projected_grade + GRADE_EPSILON >= target {
            ProjectionStatus::OnTrack
        } else {
            ProjectionStatus::Below
        }
    }
}

fn check_hypothetical(name: &str, score: f64) -> Result<(), EngineError> {
    if score.is_finite() && (0.0..=100.0).contains(&score) {
        Ok(())
    } else {
        Err(EngineError::invalid_score(
            name,
            format!("hypothetical score {score} is outside 0..=100"),
        ))
    }
}

/// Project the final grade with `overrides` (assessment name to percentage).
pub fn project(
    assessments: &[Assessment],
    overrides: &BTreeMap<String, f64>,
    options: &ProjectionOptions,
) -> Result<WhatIfResult, EngineError> {
    let ledger = Ledger::build(assessments)?;

    if let Some(default) = options.ungraded_default {
        check_hypothetical("ungraded default", default)?;
    }
    for (name, &score) in overrides {
        let entry = ledger
            .find(name)
            .ok_or_else(|| EngineError::UnknownAssessment(name.clone()))?;
        check_hypothetical(name, score)?;
        if entry.percent.is_some() && options.policy == OverridePolicy::UngradedOnly {
            return Err(EngineError::LockedGrade(name.clone()));
        }
    }

    let mut weighted = 0.0;
    let mut per_assessment_contribution = BTreeMap::new();
    let mut unscored = Vec::new();

    for entry in &ledger.entries {
        let effective = overrides
            .get(entry.name())
            .copied()
            .or(entry.percent)
            .or(options.ungraded_default);

        match effective {
            Some(score) => {
                weighted += score * entry.weight();
                per_assessment_contribution
                    .insert(entry.name().to_string(), score * entry.weight() / 100.0);
            }
            None => unscored.push(entry.name().to_string()),
        }
    }

    let projected_grade = if ledger.total_weight > 0.0 {
        weighted / ledger.total_weight
    } else {
        0.0
    };

    tracing::debug!(
        projected = projected_grade,
        overrides = overrides.len(),
        unscored = unscored.len(),
        "computed what-if projection"
    );

    Ok(WhatIfResult {
        projected_grade,
        per_assessment_contribution,
        unscored,
    })
}

/// Project with a single hypothetical score.
pub fn project_single(
    assessments: &[Assessment],
    name: &str,
    score: f64,
    options: &ProjectionOptions,
) -> Result<WhatIfResult, EngineError> {
    let overrides = BTreeMap::from([(name.to_string(), score)]);
    project(assessments, &overrides, options)
}
