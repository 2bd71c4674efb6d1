//! Request/response shapes for callers of the engine.
//!
//! These are what an outer layer (CLI, HTTP handler, UI bridge) exchanges as
//! JSON. Numbers are plain percentages in [0, 100], never fractions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::feasibility::{
    compute_minimum_for_assessment, required_from, Classification, RiskRanges, Tone,
};
use crate::ledger::Ledger;
use crate::model::{format_weight, validate_target, Assessment, Course};
use crate::scale::{york_equivalent, YorkGrade};
use crate::standing::standing_from;
use crate::whatif::{project, OverridePolicy, ProjectionOptions, ProjectionStatus};

/// Current standing request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetStandingRequest {
    pub assessments: Vec<Assessment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetStandingResponse {
    pub current_standing: f64,
    pub graded_weight_pct: f64,
    pub remaining_weight_pct: f64,
    pub total_weight_pct: f64,
    pub weights_balanced: bool,
}

impl GetStandingRequest {
    pub fn handle(&self) -> Result<GetStandingResponse, EngineError> {
        let ledger = Ledger::build(&self.assessments)?;
        let s = standing_from(&ledger);
        Ok(GetStandingResponse {
            current_standing: s.current_standing,
            graded_weight_pct: s.graded_weight,
            remaining_weight_pct: s.remaining_weight,
            total_weight_pct: s.total_weight,
            weights_balanced: s.weights_balanced,
        })
    }
}

/// Target feasibility request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckTargetRequest {
    pub assessments: Vec<Assessment>,
    pub target_grade: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckTargetResponse {
    pub target_grade: f64,
    pub current_standing: f64,
    /// Clamped to [0, 100].
    pub required_average: f64,
    /// Unclamped; negative when secured, above 100 when out of reach.
    pub raw_required_average: f64,
    pub required_average_display: String,
    pub required_fraction_display: String,
    pub achievable: bool,
    pub classification: Classification,
    pub tone: Tone,
    pub explanation_text: String,
    pub maximum_possible: f64,
    pub required_points: f64,
    pub york_equivalent: YorkGrade,
    pub risk_ranges: RiskRanges,
}

impl CheckTargetRequest {
    pub fn for_course(course: &Course) -> Self {
        Self {
            assessments: course.assessments.clone(),
            target_grade: course.target_grade,
        }
    }

    pub fn handle(&self) -> Result<CheckTargetResponse, EngineError> {
        validate_target(self.target_grade)?;
        let ledger = Ledger::build(&self.assessments)?;
        let standing = standing_from(&ledger);
        let required = required_from(&ledger, self.target_grade);

        let required_average_display = if required.achievable {
            format!("{:.1}%", required.required_average)
        } else {
            "> 100%".to_string()
        };
        let needed_on_remaining =
            (self.target_grade * ledger.total_weight - ledger.completed).max(0.0) / 100.0;
        let required_fraction_display = format!(
            "({needed_on_remaining:.2} / {} remaining weight)",
            format_weight(required.remaining_weight)
        );

        Ok(CheckTargetResponse {
            target_grade: self.target_grade,
            current_standing: standing.current_standing,
            required_average: required.required_average,
            raw_required_average: required.raw_required_average,
            required_average_display,
            required_fraction_display,
            achievable: required.achievable,
            classification: required.classification,
            tone: required.classification.tone(),
            explanation_text: required.classification.explanation().to_string(),
            maximum_possible: required.maximum_possible,
            required_points: required.required_points,
            york_equivalent: york_equivalent(self.target_grade),
            risk_ranges: required.risk_ranges,
        })
    }
}

/// Minimum score on one remaining assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinimumRequiredRequest {
    pub assessments: Vec<Assessment>,
    pub target_grade: f64,
    pub assessment_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimumRequiredResponse {
    pub assessment_name: String,
    pub minimum_required: f64,
    pub raw_minimum_required: f64,
    pub achievable: bool,
}

impl MinimumRequiredRequest {
    pub fn handle(&self) -> Result<MinimumRequiredResponse, EngineError> {
        let m = compute_minimum_for_assessment(
            &self.assessments,
            self.target_grade,
            &self.assessment_name,
        )?;
        Ok(MinimumRequiredResponse {
            assessment_name: m.assessment,
            minimum_required: m.minimum_required,
            raw_minimum_required: m.raw_minimum_required,
            achievable: m.achievable,
        })
    }
}

/// What-if scenario request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatIfRequest {
    pub assessments: Vec<Assessment>,
    pub target_grade: f64,
    #[serde(default)]
    pub overrides: BTreeMap<String, f64>,
    #[serde(default)]
    pub ungraded_default: Option<f64>,
    #[serde(default)]
    pub override_policy: OverridePolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfResponse {
    pub projected_grade: f64,
    pub per_assessment_contribution: BTreeMap<String, f64>,
    pub status: ProjectionStatus,
    pub unscored: Vec<String>,
}

impl WhatIfRequest {
    pub fn handle(&self) -> Result<WhatIfResponse, EngineError> {
        validate_target(self.target_grade)?;
        let options = ProjectionOptions {
            ungraded_default: self.ungraded_default,
            policy: self.override_policy,
        };
        let r = project(&self.assessments, &self.overrides, &options)?;
        Ok(WhatIfResponse {
            projected_grade: r.projected_grade,
            status: r.status(self.target_grade),
            per_assessment_contribution: r.per_assessment_contribution,
            unscored: r.unscored,
        })
    }
}
