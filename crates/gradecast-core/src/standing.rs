//! Current standing from graded work.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::ledger::Ledger;
use crate::model::Assessment;

/// Tolerance for deciding whether declared weights add up to 100.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Where a student stands on the work graded so far.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandingResult {
    /// Weighted average over graded assessments only; 0 when nothing is graded.
    pub current_standing: f64,
    /// Weight of graded assessments.
    pub graded_weight: f64,
    /// Weight still to be graded (`total_weight - graded_weight`).
    pub remaining_weight: f64,
    /// Sum of all declared weights.
    pub total_weight: f64,
    /// Points already banked toward a 100-point final grade.
    pub secured_points: f64,
    /// Whether declared weights total 100.
    pub weights_balanced: bool,
}

/// Compute the current standing.
///
/// Ungraded assessments are excluded from the average entirely, so a course
/// with nothing graded has a standing of 0 rather than NaN.
pub fn compute_standing(assessments: &[Assessment]) -> Result<StandingResult, EngineError> {
    let ledger = Ledger::build(assessments)?;
    Ok(standing_from(&ledger))
}

pub(crate) fn standing_from(ledger: &Ledger<'_>) -> StandingResult {
    let current_standing = if ledger.graded_weight > 0.0 {
        ledger.completed / ledger.graded_weight
    } else {
        0.0
    };
    let weights_balanced = (ledger.total_weight - 100.0).abs() <= WEIGHT_TOLERANCE;
    if !weights_balanced {
        tracing::warn!(
            total_weight = ledger.total_weight,
            "assessment weights do not total 100"
        );
    }

    let result = StandingResult {
        current_standing,
        graded_weight: ledger.graded_weight,
        remaining_weight: ledger.remaining_weight(),
        total_weight: ledger.total_weight,
        secured_points: ledger.completed / 100.0,
        weights_balanced,
    };
    tracing::debug!(
        standing = result.current_standing,
        graded = result.graded_weight,
        remaining = result.remaining_weight,
        "computed standing"
    );
    result
}
