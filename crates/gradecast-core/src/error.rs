//! Engine error types.
//!
//! Every engine operation validates its whole input before computing anything,
//! so a caller either gets a complete result or exactly one of these.

use thiserror::Error;

/// Errors surfaced by the grade engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A weight was negative or not a finite number.
    #[error("assessment '{name}' has invalid weight {weight}: weights must be non-negative")]
    InvalidWeight { name: String, weight: f64 },

    /// A score could not be normalized to a percentage in [0, 100].
    #[error("assessment '{name}' has an invalid score: {reason}")]
    InvalidScore { name: String, reason: String },

    /// The target grade was outside [0, 100].
    #[error("target grade {0} is outside 0..=100")]
    InvalidTarget(f64),

    /// No assessment with this name exists in the course.
    #[error("unknown assessment: {0}")]
    UnknownAssessment(String),

    /// Two assessments share a name.
    #[error("duplicate assessment: {0}")]
    DuplicateAssessment(String),

    /// A minimum-required query named an assessment that already has a score.
    #[error("assessment '{0}' is already graded")]
    AlreadyGraded(String),

    /// A what-if override targeted a graded assessment while graded scores are locked.
    #[error("assessment '{0}' is graded and locked against what-if overrides")]
    LockedGrade(String),

    /// A weight update left some assessments without a new weight.
    #[error("missing assessment weight updates for: {}", .0.join(", "))]
    MissingWeights(Vec<String>),

    /// A weight update did not total 100.
    #[error("total assessment weight must equal 100 (got {0})")]
    UnbalancedWeights(f64),

    /// A grade-scale value could not be interpreted.
    #[error("invalid grade scale value: {0}")]
    InvalidScale(String),
}

impl EngineError {
    pub(crate) fn invalid_score(name: &str, reason: impl Into<String>) -> Self {
        EngineError::InvalidScore {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// The assessment this error points at, if any.
    pub fn assessment(&self) -> Option<&str> {
        match self {
            EngineError::InvalidWeight { name, .. } | EngineError::InvalidScore { name, .. } => {
                Some(name)
            }
            EngineError::UnknownAssessment(name)
            | EngineError::DuplicateAssessment(name)
            | EngineError::AlreadyGraded(name)
            | EngineError::LockedGrade(name) => Some(name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_assessment() {
        let err = EngineError::InvalidWeight {
            name: "Quiz".into(),
            weight: -5.0,
        };
        assert!(err.to_string().contains("'Quiz'"));
        assert_eq!(err.assessment(), Some("Quiz"));
    }

    #[test]
    fn missing_weights_lists_names() {
        let err = EngineError::MissingWeights(vec!["A1".into(), "Final".into()]);
        assert_eq!(
            err.to_string(),
            "missing assessment weight updates for: A1, Final"
        );
        assert_eq!(err.assessment(), None);
    }
}
