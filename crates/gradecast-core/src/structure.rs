//! Course structure checks and weight updates.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::model::{format_weight, Course};
use crate::standing::WEIGHT_TOLERANCE;

/// A non-fatal problem with a course's structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationWarning {
    /// The assessment name (if applicable).
    pub assessment: Option<String>,
    pub message: String,
}

/// Collect structural warnings.
///
/// These do not stop the engine; fatal problems come from [`Course::validate`].
pub fn validate_course(course: &Course) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if course.assessments.is_empty() {
        warnings.push(ValidationWarning {
            assessment: None,
            message: "course has no assessments".into(),
        });
        return warnings;
    }

    let total = course.total_weight();
    if (total - 100.0).abs() > WEIGHT_TOLERANCE {
        warnings.push(ValidationWarning {
            assessment: None,
            message: format!(
                "assessment weights total {}, not 100",
                format_weight(total)
            ),
        });
    }

    for a in &course.assessments {
        if a.name.trim().is_empty() {
            warnings.push(ValidationWarning {
                assessment: Some(a.name.clone()),
                message: "assessment name is blank".into(),
            });
        }
        if a.weight == 0.0 {
            warnings.push(ValidationWarning {
                assessment: Some(a.name.clone()),
                message: "weight is 0; this assessment cannot affect the final grade".into(),
            });
        }
    }

    warnings
}

/// A replacement weight for one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightUpdate {
    pub name: String,
    pub weight: f64,
}

/// Return a copy of `course` with every assessment reweighted.
///
/// The update must name each assessment exactly once and total 100.
pub fn reweight(course: &Course, updates: &[WeightUpdate]) -> Result<Course, EngineError> {
    let mut seen = HashSet::new();
    let mut total = 0.0;
    for u in updates {
        if !u.weight.is_finite() || u.weight < 0.0 {
            return Err(EngineError::InvalidWeight {
                name: u.name.clone(),
                weight: u.weight,
            });
        }
        if !seen.insert(u.name.as_str()) {
            return Err(EngineError::DuplicateAssessment(u.name.clone()));
        }
        total += u.weight;
    }

    if (total - 100.0).abs() > WEIGHT_TOLERANCE {
        return Err(EngineError::UnbalancedWeights(total));
    }

    if let Some(unknown) = updates.iter().find(|u| course.find(&u.name).is_none()) {
        return Err(EngineError::UnknownAssessment(unknown.name.clone()));
    }

    let missing: BTreeSet<String> = course
        .assessments
        .iter()
        .filter(|a| !seen.contains(a.name.as_str()))
        .map(|a| a.name.clone())
        .collect();
    if !missing.is_empty() {
        return Err(EngineError::MissingWeights(missing.into_iter().collect()));
    }

    let mut updated = course.clone();
    for a in &mut updated.assessments {
        if let Some(u) = updates.iter().find(|u| u.name == a.name) {
            a.weight = u.weight;
        }
    }
    tracing::debug!(course = %course.name, "reweighted assessments");
    Ok(updated)
}
