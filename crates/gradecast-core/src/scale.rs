//! Grade-scale conversions.
//!
//! Conversions are approximate step tables, not institution policy. The York
//! 9-point scale is reported next to target checks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A letter grade on the York University 9-point scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YorkGrade {
    pub letter: String,
    pub grade_point: u8,
    pub description: String,
}

const YORK_TABLE: &[(f64, &str, u8, &str)] = &[
    (90.0, "A+", 9, "Exceptional"),
    (80.0, "A", 8, "Excellent"),
    (75.0, "B+", 7, "Very Good"),
    (70.0, "B", 6, "Good"),
    (65.0, "C+", 5, "Competent"),
    (60.0, "C", 4, "Fairly Competent"),
    (55.0, "D+", 3, "Passing"),
    (50.0, "D", 2, "Marginally Passing"),
    (40.0, "E", 1, "Marginally Failing"),
];

/// York equivalent of a percentage.
pub fn york_equivalent(percent: f64) -> YorkGrade {
    let (letter, grade_point, description) = YORK_TABLE
        .iter()
        .find(|(floor, ..)| percent >= *floor)
        .map(|&(_, l, gp, d)| (l, gp, d))
        .unwrap_or(("F", 0, "Failing"));
    YorkGrade {
        letter: letter.to_string(),
        grade_point,
        description: description.to_string(),
    }
}

/// Supported grading scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeScale {
    Percentage,
    /// 4.0 scale (US/Canada).
    Four,
    /// 9.0 scale.
    Nine,
    /// 10.0 scale.
    Ten,
    Letter,
}

impl fmt::Display for GradeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeScale::Percentage => write!(f, "percentage"),
            GradeScale::Four => write!(f, "four"),
            GradeScale::Nine => write!(f, "nine"),
            GradeScale::Ten => write!(f, "ten"),
            GradeScale::Letter => write!(f, "letter"),
        }
    }
}

impl FromStr for GradeScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "percentage" | "percent" | "pct" | "%" => Ok(GradeScale::Percentage),
            "four" | "4" | "4.0" | "gpa" => Ok(GradeScale::Four),
            "nine" | "9" | "9.0" => Ok(GradeScale::Nine),
            "ten" | "10" | "10.0" => Ok(GradeScale::Ten),
            "letter" => Ok(GradeScale::Letter),
            other => Err(format!("unknown grade scale: {other}")),
        }
    }
}

const FOUR_FROM_PERCENT: &[(f64, f64)] = &[
    (90.0, 4.0),
    (85.0, 3.9),
    (80.0, 3.7),
    (77.0, 3.3),
    (73.0, 3.0),
    (70.0, 2.7),
    (67.0, 2.3),
    (63.0, 2.0),
    (60.0, 1.7),
    (57.0, 1.3),
    (53.0, 1.0),
    (50.0, 0.7),
];

const PERCENT_FROM_FOUR: &[(f64, f64)] = &[
    (4.0, 95.0),
    (3.7, 87.0),
    (3.3, 80.0),
    (3.0, 77.0),
    (2.7, 73.0),
    (2.3, 70.0),
    (2.0, 67.0),
    (1.7, 63.0),
    (1.3, 60.0),
    (1.0, 57.0),
    (0.7, 53.0),
];

const NINE_FROM_PERCENT: &[(f64, f64)] = &[
    (90.0, 9.0),
    (80.0, 8.0),
    (70.0, 7.0),
    (60.0, 6.0),
    (50.0, 5.0),
    (40.0, 4.0),
];

const LETTER_FROM_PERCENT: &[(f64, &str)] = &[
    (93.0, "A"),
    (90.0, "A-"),
    (87.0, "B+"),
    (83.0, "B"),
    (80.0, "B-"),
    (77.0, "C+"),
    (73.0, "C"),
    (70.0, "C-"),
    (67.0, "D+"),
    (63.0, "D"),
    (60.0, "D-"),
];

const PERCENT_FROM_LETTER: &[(&str, f64)] = &[
    ("A+", 97.0),
    ("A", 95.0),
    ("A-", 92.0),
    ("B+", 88.0),
    ("B", 85.0),
    ("B-", 82.0),
    ("C+", 78.0),
    ("C", 75.0),
    ("C-", 72.0),
    ("D+", 68.0),
    ("D", 65.0),
    ("D-", 62.0),
    ("F", 40.0),
];

fn step<T: Copy>(table: &[(f64, T)], value: f64, fallback: T) -> T {
    table
        .iter()
        .find(|(floor, _)| value >= *floor)
        .map(|&(_, v)| v)
        .unwrap_or(fallback)
}

fn parse_number(value: &str) -> Result<f64, EngineError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| EngineError::InvalidScale(format!("'{value}' is not a number")))
}

fn letter_to_percentage(value: &str) -> Result<f64, EngineError> {
    let upper = value.to_uppercase();
    PERCENT_FROM_LETTER
        .iter()
        .find(|(l, _)| *l == upper)
        .map(|&(_, p)| p)
        .ok_or_else(|| EngineError::InvalidScale(format!("unknown letter grade '{value}'")))
}

impl GradeScale {
    /// Interpret `value` on this scale as a percentage.
    pub fn to_percentage(&self, value: &str) -> Result<f64, EngineError> {
        let value = value.trim();
        Ok(match self {
            GradeScale::Letter => letter_to_percentage(value)?,
            GradeScale::Percentage => parse_number(value)?.clamp(0.0, 100.0),
            GradeScale::Four => step(PERCENT_FROM_FOUR, parse_number(value)?, 40.0),
            GradeScale::Nine => (parse_number(value)? / 9.0 * 100.0).clamp(0.0, 100.0),
            GradeScale::Ten => (parse_number(value)? * 10.0).clamp(0.0, 100.0),
        })
    }
}

/// A percentage expressed on every supported scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeConversion {
    pub percentage: f64,
    pub four: f64,
    pub nine: f64,
    pub ten: f64,
    pub letter: String,
    pub york: YorkGrade,
}

impl GradeConversion {
    pub fn from_percentage(percent: f64) -> Self {
        let pct = percent.clamp(0.0, 100.0);
        Self {
            percentage: pct,
            four: step(FOUR_FROM_PERCENT, pct, 0.0),
            nine: step(NINE_FROM_PERCENT, pct, 0.0),
            ten: (pct / 10.0).clamp(0.0, 10.0),
            letter: step(LETTER_FROM_PERCENT, pct, "F").to_string(),
            york: york_equivalent(pct),
        }
    }
}

/// Convert `value` given on `from` to every scale.
pub fn convert(value: &str, from: GradeScale) -> Result<GradeConversion, EngineError> {
    let pct = from.to_percentage(value)?;
    Ok(GradeConversion::from_percentage(pct))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn york_boundaries() {
        assert_eq!(york_equivalent(100.0).letter, "A+");
        assert_eq!(york_equivalent(90.0).grade_point, 9);
        assert_eq!(york_equivalent(89.99).letter, "A");
        assert_eq!(york_equivalent(80.0).description, "Excellent");
        assert_eq!(york_equivalent(70.0).letter, "B");
        assert_eq!(york_equivalent(49.0).letter, "E");
        assert_eq!(york_equivalent(39.9).letter, "F");
        assert_eq!(york_equivalent(0.0).grade_point, 0);
    }

    #[test]
    fn scale_parse() {
        assert_eq!("4.0".parse::<GradeScale>().unwrap(), GradeScale::Four);
        assert_eq!("Letter".parse::<GradeScale>().unwrap(), GradeScale::Letter);
        assert_eq!("pct".parse::<GradeScale>().unwrap(), GradeScale::Percentage);
        assert!("hex".parse::<GradeScale>().is_err());
        assert_eq!(GradeScale::Nine.to_string(), "nine");
    }

    #[test]
    fn percentage_to_all_scales() {
        let c = GradeConversion::from_percentage(85.0);
        assert_eq!(c.four, 3.9);
        assert_eq!(c.nine, 8.0);
        assert_eq!(c.ten, 8.5);
        assert_eq!(c.letter, "B");
        assert_eq!(c.york.letter, "A");

        let low = GradeConversion::from_percentage(42.0);
        assert_eq!(low.four, 0.0);
        assert_eq!(low.letter, "F");
        assert_eq!(low.nine, 4.0);
    }

    #[test]
    fn other_scales_to_percentage() {
        assert_eq!(GradeScale::Four.to_percentage("3.7").unwrap(), 87.0);
        assert_eq!(GradeScale::Four.to_percentage("0.2").unwrap(), 40.0);
        assert_eq!(GradeScale::Ten.to_percentage("7.5").unwrap(), 75.0);
        assert_eq!(GradeScale::Nine.to_percentage("9").unwrap(), 100.0);
        assert_eq!(GradeScale::Percentage.to_percentage("120").unwrap(), 100.0);
        assert_eq!(GradeScale::Letter.to_percentage("b+").unwrap(), 88.0);
    }

    #[test]
    fn bad_inputs_rejected() {
        assert!(matches!(
            GradeScale::Letter.to_percentage("Q"),
            Err(EngineError::InvalidScale(_))
        ));
        assert!(GradeScale::Four.to_percentage("abc").is_err());
        assert!(convert("NaN", GradeScale::Percentage).is_err());
    }

    #[test]
    fn convert_letter_round_trip_lands_in_band() {
        let c = convert("A", GradeScale::Letter).unwrap();
        assert_eq!(c.percentage, 95.0);
        assert_eq!(c.letter, "A");
        assert_eq!(c.four, 4.0);
    }
}
