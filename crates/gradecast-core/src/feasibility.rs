//! Required average, minimum-required, and feasibility classification.
//!
//! All final-grade quantities are normalized by the declared total weight, so
//! a course whose weights do not sum to 100 still gets consistent answers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::ledger::Ledger;
use crate::model::{validate_target, Assessment, GRADE_EPSILON};

/// Reported required average when the target can no longer be reached.
///
/// Always paired with `achievable == false`; callers branch on that flag.
pub const IMPOSSIBLE_SENTINEL: f64 = 101.0;

/// Whether a required score is attainable, allowing for float noise in the
/// weighted sums.
fn within_reach(raw: f64) -> bool {
    raw <= 100.0 + GRADE_EPSILON
}

/// How hard the target is, as a step function of the unclamped required average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "Already Achieved")]
    AlreadyAchieved,
    Comfortable,
    Achievable,
    Challenging,
    Risky,
    #[serde(rename = "Not Possible")]
    NotPossible,
}

/// Presentation tone for a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Caution,
    Negative,
}

impl Classification {
    /// Classify an unclamped required average. Upper edges are inclusive.
    pub fn from_required_average(raw: f64) -> Self {
        if raw <= 0.0 {
            Classification::AlreadyAchieved
        } else if raw <= 70.0 {
            Classification::Comfortable
        } else if raw <= 85.0 {
            Classification::Achievable
        } else if raw <= 95.0 {
            Classification::Challenging
        } else if within_reach(raw) {
            Classification::Risky
        } else {
            Classification::NotPossible
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Classification::AlreadyAchieved => "Already Achieved",
            Classification::Comfortable => "Comfortable",
            Classification::Achievable => "Achievable",
            Classification::Challenging => "Challenging",
            Classification::Risky => "Risky",
            Classification::NotPossible => "Not Possible",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Classification::AlreadyAchieved
            | Classification::Comfortable
            | Classification::Achievable => Tone::Positive,
            Classification::Challenging | Classification::Risky => Tone::Caution,
            Classification::NotPossible => Tone::Negative,
        }
    }

    /// Human-readable explanation shown next to the classification.
    pub fn explanation(&self) -> &'static str {
        match self {
            Classification::AlreadyAchieved => {
                "You have already secured your target grade, whatever happens on the remaining work."
            }
            Classification::Comfortable => {
                "Very achievable: a moderate score on the remaining work gets you there."
            }
            Classification::Achievable => {
                "Your target is reachable with solid performance on the remaining assessments."
            }
            Classification::Challenging => {
                "You will need strong performance on the remaining work to hit your target."
            }
            Classification::Risky => {
                "This will be very difficult: you need near-perfect scores on everything left."
            }
            Classification::NotPossible => {
                "The target grade is no longer mathematically reachable with the remaining weight."
            }
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Minimum / safe / stretch score bands on the remaining work.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskRanges {
    pub minimum: f64,
    pub safe: f64,
    pub stretch: f64,
}

impl RiskRanges {
    const SAFE_MARGIN: f64 = 3.0;
    const STRETCH_MARGIN: f64 = 8.0;

    /// Build bands from a clamped required average.
    pub fn from_required(required: f64) -> Self {
        Self {
            minimum: required,
            safe: (required + Self::SAFE_MARGIN).min(100.0),
            stretch: (required + Self::STRETCH_MARGIN).min(100.0),
        }
    }
}

/// What it takes to reach the target from here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequiredAverageResult {
    /// Required average on remaining work, clamped to [0, 100] for display.
    pub required_average: f64,
    /// Unclamped value; negative when already secured, above 100 when out of reach.
    pub raw_required_average: f64,
    pub achievable: bool,
    pub classification: Classification,
    /// Final grade if every remaining assessment scored 100.
    pub maximum_possible: f64,
    /// Final-grade points still needed (never negative).
    pub required_points: f64,
    /// Weight still to be graded.
    pub remaining_weight: f64,
    pub risk_ranges: RiskRanges,
}

/// Compute the average needed on the remaining work to reach `target`.
pub fn compute_required(
    assessments: &[Assessment],
    target: f64,
) -> Result<RequiredAverageResult, EngineError> {
    validate_target(target)?;
    let ledger = Ledger::build(assessments)?;
    Ok(required_from(&ledger, target))
}

pub(crate) fn required_from(ledger: &Ledger<'_>, target: f64) -> RequiredAverageResult {
    let remaining = ledger.remaining_weight();
    let secured = ledger.secured_grade();

    let (raw, achievable) = if remaining <= 0.0 {
        let achieved = secured + GRADE_EPSILON >= target;
        if achieved {
            (0.0, true)
        } else {
            (IMPOSSIBLE_SENTINEL, false)
        }
    } else {
        let raw = (target * ledger.total_weight - ledger.completed) / remaining;
        (raw, within_reach(raw))
    };

    let required_average = raw.clamp(0.0, 100.0);
    let maximum_possible = if ledger.total_weight > 0.0 {
        (ledger.completed + 100.0 * remaining) / ledger.total_weight
    } else {
        0.0
    };

    let result = RequiredAverageResult {
        required_average,
        raw_required_average: raw,
        achievable,
        classification: Classification::from_required_average(raw),
        maximum_possible,
        required_points: (target - secured).max(0.0),
        remaining_weight: remaining,
        risk_ranges: RiskRanges::from_required(required_average),
    };
    tracing::debug!(
        target_grade = target,
        raw_required = raw,
        classification = %result.classification,
        "computed required average"
    );
    result
}

/// Minimum score needed on one remaining assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimumRequiredResult {
    pub assessment: String,
    /// Clamped to [0, 100].
    pub minimum_required: f64,
    pub raw_minimum_required: f64,
    pub achievable: bool,
}

/// Minimum score on `name` to reach `target`, assuming every other remaining
/// assessment scores 100.
pub fn compute_minimum_for_assessment(
    assessments: &[Assessment],
    target: f64,
    name: &str,
) -> Result<MinimumRequiredResult, EngineError> {
    validate_target(target)?;
    let ledger = Ledger::build(assessments)?;

    let entry = ledger
        .find(name)
        .ok_or_else(|| EngineError::UnknownAssessment(name.to_string()))?;
    if entry.percent.is_some() {
        return Err(EngineError::AlreadyGraded(name.to_string()));
    }
    let own_weight = entry.weight();

    let others_at_max: f64 = ledger
        .ungraded()
        .filter(|e| e.name() != name)
        .map(|e| 100.0 * e.weight())
        .sum();
    let needed = target * ledger.total_weight - ledger.completed - others_at_max;

    let raw = if own_weight > 0.0 {
        needed / own_weight
    } else if needed <= GRADE_EPSILON {
        0.0
    } else {
        IMPOSSIBLE_SENTINEL
    };

    tracing::debug!(
        assessment = name,
        target_grade = target,
        raw_minimum = raw,
        "computed minimum"
    );
    Ok(MinimumRequiredResult {
        assessment: name.to_string(),
        minimum_required: raw.clamp(0.0, 100.0),
        raw_minimum_required: raw,
        achievable: within_reach(raw),
    })
}
