//! Core data model types for gradecast.
//!
//! A course is a name, a target grade, and an ordered list of weighted
//! assessments. Assessments without a score are ungraded; they are never
//! treated as a score of zero.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EngineError;

/// Tolerance used when comparing grades that went through floating-point sums.
pub const GRADE_EPSILON: f64 = 1e-9;

/// A recorded score, either as a percentage or as `raw / total`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    /// Points earned out of points available (e.g. 18 / 20).
    Fraction { raw: f64, total: f64 },
    /// A percentage in [0, 100].
    Percent(f64),
}

impl Score {
    /// Normalize to a percentage in [0, 100].
    ///
    /// `name` is only used to label the error.
    pub fn to_percent(&self, name: &str) -> Result<f64, EngineError> {
        let percent = match *self {
            Score::Percent(p) => {
                if !p.is_finite() {
                    return Err(EngineError::invalid_score(name, "score is not a number"));
                }
                p
            }
            Score::Fraction { raw, total } => {
                if !raw.is_finite() || !total.is_finite() {
                    return Err(EngineError::invalid_score(name, "score is not a number"));
                }
                if total <= 0.0 {
                    return Err(EngineError::invalid_score(
                        name,
                        format!("total {total} must be greater than 0"),
                    ));
                }
                if raw > total {
                    return Err(EngineError::invalid_score(
                        name,
                        format!("raw score {raw} exceeds total {total}"),
                    ));
                }
                raw / total * 100.0
            }
        };

        if !(0.0..=100.0).contains(&percent) {
            return Err(EngineError::invalid_score(
                name,
                format!("{percent} is outside 0..=100"),
            ));
        }
        Ok(percent)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Percent(p) => write!(f, "{p}%"),
            Score::Fraction { raw, total } => write!(f, "{raw}/{total}"),
        }
    }
}

/// A single weighted assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Name, unique within a course.
    pub name: String,
    /// Weight in percentage points of the final grade.
    pub weight: f64,
    /// The recorded score; `None` means not graded yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
}

impl Assessment {
    pub fn ungraded(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            score: None,
        }
    }

    pub fn graded(name: impl Into<String>, weight: f64, percent: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            score: Some(Score::Percent(percent)),
        }
    }

    pub fn fraction(name: impl Into<String>, weight: f64, raw: f64, total: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            score: Some(Score::Fraction { raw, total }),
        }
    }

    pub fn is_graded(&self) -> bool {
        self.score.is_some()
    }

    /// The normalized percentage, or `None` when ungraded.
    pub fn percent(&self) -> Result<Option<f64>, EngineError> {
        self.score.map(|s| s.to_percent(&self.name)).transpose()
    }
}

/// A course snapshot handed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    /// Target final grade in [0, 100].
    pub target_grade: f64,
    /// Assessments in syllabus order.
    #[serde(default)]
    pub assessments: Vec<Assessment>,
}

impl Course {
    pub fn new(name: impl Into<String>, target_grade: f64, assessments: Vec<Assessment>) -> Self {
        Self {
            name: name.into(),
            target_grade,
            assessments,
        }
    }

    /// Check everything the engine would reject: target, weights, scores, names.
    pub fn validate(&self) -> Result<(), EngineError> {
        validate_target(self.target_grade)?;
        crate::ledger::Ledger::build(&self.assessments).map(|_| ())
    }

    pub fn find(&self, name: &str) -> Option<&Assessment> {
        self.assessments.iter().find(|a| a.name == name)
    }

    pub fn total_weight(&self) -> f64 {
        self.assessments.iter().map(|a| a.weight).sum()
    }

    pub fn graded_count(&self) -> usize {
        self.assessments.iter().filter(|a| a.is_graded()).count()
    }
}

/// Weight with at most two decimals and no trailing zeros, for display.
pub fn format_weight(weight: f64) -> String {
    let text = format!("{weight:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Reject targets outside [0, 100].
pub fn validate_target(target: f64) -> Result<(), EngineError> {
    if target.is_finite() && (0.0..=100.0).contains(&target) {
        Ok(())
    } else {
        Err(EngineError::InvalidTarget(target))
    }
}
