//! Student records and validated grade values.
//!
//! A [`Student`] carries a display name, a unique id, and a mapping from
//! subject to score. Scores enter the roster only as [`Grade`] values, which
//! guarantees they are finite and within `[0, 100]`.
//!
//! # Example
//!
//! ```rust
//! use gradebook::student::Grade;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let grade = Grade::parse(" 87.5 ")?;
//! assert_eq!(grade.value(), 87.5);
//!
//! assert!(Grade::parse("abc").is_err()); // not a number
//! assert!(Grade::parse("105").is_err()); // out of range
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Lowest accepted grade, inclusive.
pub const MIN_GRADE: f64 = 0.0;

/// Highest accepted grade, inclusive.
pub const MAX_GRADE: f64 = 100.0;

/// A single student on the roster.
///
/// Students are created through [`Roster::add_student`](crate::roster::Roster::add_student)
/// and graded through [`Roster::record_grade`](crate::roster::Roster::record_grade).
/// There is no way to delete or rename a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Display name.
    name: String,
    /// Unique identifier within the roster.
    id: String,
    /// Subject name to score. `BTreeMap` keeps rendering and files deterministic.
    #[serde(default)]
    grades: BTreeMap<String, f64>,
}

impl Student {
    /// Creates a student with no grades.
    ///
    /// Both `name` and `id` are trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EmptyField`] if either field is empty after trimming.
    pub fn new(name: &str, id: &str) -> Result<Self, InputError> {
        let name = require_non_empty("name", name)?;
        let id = require_non_empty("id", id)?;
        Ok(Self {
            name: name.to_string(),
            id: id.to_string(),
            grades: BTreeMap::new(),
        })
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unique id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the recorded grades keyed by subject.
    pub fn grades(&self) -> &BTreeMap<String, f64> {
        &self.grades
    }

    /// Returns the grade recorded for `subject`, if any.
    pub fn grade(&self, subject: &str) -> Option<f64> {
        self.grades.get(subject).copied()
    }

    /// Returns `true` if at least one grade has been recorded.
    pub fn is_graded(&self) -> bool {
        !self.grades.is_empty()
    }

    /// Arithmetic mean of all recorded grades, or `0.0` with no grades.
    #[allow(clippy::cast_precision_loss)] // Subject counts are tiny
    pub fn average(&self) -> f64 {
        if self.grades.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.grades.values().sum();
        sum / self.grades.len() as f64
    }

    /// Records `grade` under `subject`, returning the value it replaced.
    pub(crate) fn record(&mut self, subject: &str, grade: Grade) -> Option<f64> {
        self.grades.insert(subject.to_string(), grade.value())
    }

    /// Checks invariants on a record that did not come through [`Student::new`].
    pub(crate) fn check(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err(format!("student '{}' has an empty name", self.id));
        }
        if self.id.trim().is_empty() {
            return Err(format!("student '{}' has an empty id", self.name));
        }
        for (subject, &value) in &self.grades {
            if subject.trim().is_empty() {
                return Err(format!("student '{}' has an empty subject", self.id));
            }
            if let Err(e) = Grade::new(value) {
                return Err(format!("student '{}', subject '{subject}': {e}", self.id));
            }
        }
        Ok(())
    }
}

/// A score known to be finite and within `[MIN_GRADE, MAX_GRADE]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Grade(f64);

impl Grade {
    /// Validates a numeric score.
    ///
    /// # Errors
    ///
    /// - [`InputError::NotANumber`] if `value` is NaN or infinite
    /// - [`InputError::OutOfRange`] if `value` is outside `[0, 100]`
    pub fn new(value: f64) -> Result<Self, InputError> {
        if !value.is_finite() {
            return Err(InputError::NotANumber {
                field: "grade",
                value: value.to_string(),
            });
        }
        if !(MIN_GRADE..=MAX_GRADE).contains(&value) {
            return Err(InputError::OutOfRange {
                value,
                min: MIN_GRADE,
                max: MAX_GRADE,
            });
        }
        Ok(Self(value))
    }

    /// Parses a score from user text.
    ///
    /// Surrounding whitespace is ignored. Rejects text that is not a finite
    /// number separately from numbers that are out of range, so the caller
    /// can tell the user which mistake they made.
    ///
    /// # Errors
    ///
    /// Same as [`Grade::new`], plus [`InputError::EmptyField`] for blank text.
    pub fn parse(text: &str) -> Result<Self, InputError> {
        let text = require_non_empty("grade", text)?;
        Self::new(parse_number("grade", text)?)
    }

    /// Returns the raw score.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Trims `value` and rejects it if nothing is left.
pub(crate) fn require_non_empty<'a>(
    field: &'static str,
    value: &'a str,
) -> Result<&'a str, InputError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyField { field });
    }
    Ok(trimmed)
}

/// Parses trimmed text as a finite `f64`.
pub(crate) fn parse_number(field: &'static str, text: &str) -> Result<f64, InputError> {
    let text = text.trim();
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InputError::NotANumber {
            field,
            value: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graded(grades: &[(&str, f64)]) -> Student {
        let mut student = Student::new("Ada", "s1").unwrap();
        for &(subject, value) in grades {
            student.record(subject, Grade::new(value).unwrap());
        }
        student
    }

    #[test]
    fn test_new_trims_fields() {
        let student = Student::new("  Ada Lovelace ", " s1 ").unwrap();
        assert_eq!(student.name(), "Ada Lovelace");
        assert_eq!(student.id(), "s1");
        assert!(!student.is_graded());
    }

    #[test]
    fn test_new_rejects_empty_fields() {
        assert_eq!(
            Student::new("", "s1").unwrap_err(),
            InputError::EmptyField { field: "name" }
        );
        assert_eq!(
            Student::new("Ada", "   ").unwrap_err(),
            InputError::EmptyField { field: "id" }
        );
    }

    #[test]
    fn test_average() {
        let student = graded(&[("math", 80.0), ("physics", 90.0), ("art", 100.0)]);
        assert_eq!(student.average(), 90.0);
    }

    #[test]
    fn test_average_without_grades_is_zero() {
        let student = Student::new("Ada", "s1").unwrap();
        assert_eq!(student.average(), 0.0);
    }

    #[test]
    fn test_record_overwrites_subject() {
        let mut student = graded(&[("math", 60.0)]);
        let previous = student.record("math", Grade::new(75.0).unwrap());
        assert_eq!(previous, Some(60.0));
        assert_eq!(student.grade("math"), Some(75.0));
        assert_eq!(student.grades().len(), 1);
    }

    #[test]
    fn test_grade_bounds_inclusive() {
        assert!(Grade::new(0.0).is_ok());
        assert!(Grade::new(100.0).is_ok());
        assert!(matches!(
            Grade::new(105.0),
            Err(InputError::OutOfRange { .. })
        ));
        assert!(matches!(
            Grade::new(-1.0),
            Err(InputError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_grade_parse_distinguishes_failures() {
        assert_eq!(Grade::parse(" 42 ").unwrap().value(), 42.0);
        assert!(matches!(
            Grade::parse("forty"),
            Err(InputError::NotANumber { .. })
        ));
        assert!(matches!(
            Grade::parse("NaN"),
            Err(InputError::NotANumber { .. })
        ));
        assert!(matches!(
            Grade::parse("inf"),
            Err(InputError::NotANumber { .. })
        ));
        assert!(matches!(
            Grade::parse("100.5"),
            Err(InputError::OutOfRange { .. })
        ));
        assert_eq!(
            Grade::parse("  ").unwrap_err(),
            InputError::EmptyField { field: "grade" }
        );
    }

    #[test]
    fn test_check_flags_out_of_range_record() {
        let json = r#"{"name":"Ada","id":"s1","grades":{"math":120.0}}"#;
        let student: Student = serde_json::from_str(json).unwrap();
        assert!(student.check().is_err());

        let json = r#"{"name":"Ada","id":"s1"}"#;
        let student: Student = serde_json::from_str(json).unwrap();
        assert!(student.check().is_ok());
        assert!(!student.is_graded());
    }
}
