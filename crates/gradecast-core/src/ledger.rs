//! Validated, normalized view over a slice of assessments.
//!
//! Every engine operation builds one of these first, so validation happens
//! once and before any arithmetic.

use std::collections::HashSet;

use crate::error::EngineError;
use crate::model::Assessment;

#[derive(Debug, Clone)]
pub(crate) struct Entry<'a> {
    pub assessment: &'a Assessment,
    /// Normalized percentage; `None` when ungraded.
    pub percent: Option<f64>,
}

impl Entry<'_> {
    pub fn name(&self) -> &str {
        &self.assessment.name
    }

    pub fn weight(&self) -> f64 {
        self.assessment.weight
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Ledger<'a> {
    pub entries: Vec<Entry<'a>>,
    /// Sum of all declared weights.
    pub total_weight: f64,
    /// Sum of weights of graded assessments.
    pub graded_weight: f64,
    /// Sum of `percent * weight` over graded assessments.
    pub completed: f64,
}

impl<'a> Ledger<'a> {
    pub fn build(assessments: &'a [Assessment]) -> Result<Self, EngineError> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(assessments.len());
        let mut total_weight = 0.0;
        let mut graded_weight = 0.0;
        let mut completed = 0.0;

        for a in assessments {
            if !seen.insert(a.name.as_str()) {
                return Err(EngineError::DuplicateAssessment(a.name.clone()));
            }
            if !a.weight.is_finite() || a.weight < 0.0 {
                return Err(EngineError::InvalidWeight {
                    name: a.name.clone(),
                    weight: a.weight,
                });
            }

            let percent = a.percent()?;
            total_weight += a.weight;
            if let Some(p) = percent {
                graded_weight += a.weight;
                completed += p * a.weight;
            }
            entries.push(Entry {
                assessment: a,
                percent,
            });
        }

        Ok(Self {
            entries,
            total_weight,
            graded_weight,
            completed,
        })
    }

    pub fn remaining_weight(&self) -> f64 {
        // Guard against -0.0000001 from summation order.
        (self.total_weight - self.graded_weight).max(0.0)
    }

    /// The final grade implied by graded work alone, normalized by total weight.
    pub fn secured_grade(&self) -> f64 {
        if self.total_weight > 0.0 {
            self.completed / self.total_weight
        } else {
            0.0
        }
    }

    pub fn find(&self, name: &str) -> Option<&Entry<'a>> {
        self.entries.iter().find(|e| e.name() == name)
    }

    pub fn ungraded(&self) -> impl Iterator<Item = &Entry<'a>> {
        self.entries.iter().filter(|e| e.percent.is_none())
    }
}
