//! Search and filter operations over a roster snapshot.
//!
//! Three search modes are supported:
//!
//! - **By name** - case-insensitive substring match on the display name
//! - **By id** - case-sensitive substring match on the student id
//! - **By grade range** - graded students whose average lies in an inclusive range
//!
//! Every search preserves roster order. Finding nothing is a normal outcome
//! and yields an empty vector; only malformed queries are errors.
//!
//! # Example Usage
//!
//! ```rust
//! use gradebook::query::{self, GradeRange, SearchMode};
//! use gradebook::roster::Roster;
//! use gradebook::student::Grade;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut roster = Roster::new();
//! roster.add_student("Ada Lovelace", "cs-001")?;
//! roster.record_grade("cs-001", "math", Grade::new(88.0)?)?;
//!
//! let hits = query::by_name(roster.students(), "lovelace")?;
//! assert_eq!(hits.len(), 1);
//!
//! let range: GradeRange = "80-90".parse()?;
//! assert_eq!(query::by_grade_range(roster.students(), &range).len(), 1);
//!
//! // Same thing, driven by a user-selected mode and raw text.
//! let hits = query::search(roster.students(), SearchMode::GradeRange, "90-100")?;
//! assert!(hits.is_empty());
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{InputError, Result};
use crate::stats::graded;
use crate::student::{Student, parse_number, require_non_empty};

/// Separator between the bounds of a textual grade range.
pub const RANGE_DELIMITER: char = '-';

/// Inclusive range of student averages.
///
/// A range whose `min` exceeds its `max` is accepted and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeRange {
    /// Lower bound, inclusive.
    pub min: f64,
    /// Upper bound, inclusive.
    pub max: f64,
}

impl GradeRange {
    /// Creates a range from explicit bounds.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns `true` if `average` lies within the range, bounds included.
    pub fn contains(&self, average: f64) -> bool {
        average >= self.min && average <= self.max
    }

    /// Parses `"<min>-<max>"`, e.g. `"70-90"` or `" 72.5 - 88 "`.
    ///
    /// # Errors
    ///
    /// - [`InputError::EmptyField`] for blank text
    /// - [`InputError::MalformedRange`] unless the text splits into exactly
    ///   two non-empty parts around a single delimiter
    /// - [`InputError::NotANumber`] if either part is not a finite number
    pub fn parse(text: &str) -> std::result::Result<Self, InputError> {
        let text = require_non_empty("range", text)?;
        let malformed = || InputError::MalformedRange {
            input: text.to_string(),
        };

        let mut parts = text.split(RANGE_DELIMITER);
        let (Some(min), Some(max), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };
        if min.trim().is_empty() || max.trim().is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            min: parse_number("range minimum", min)?,
            max: parse_number("range maximum", max)?,
        })
    }
}

impl FromStr for GradeRange {
    type Err = InputError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for GradeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{RANGE_DELIMITER}{}", self.min, self.max)
    }
}

/// How a user-entered search query is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SearchMode {
    /// Case-insensitive substring of the name.
    Name,
    /// Case-sensitive substring of the id.
    Id,
    /// `min-max` range of averages.
    GradeRange,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Name => "By Name",
            Self::Id => "By ID",
            Self::GradeRange => "By Grade Range",
        };
        f.write_str(label)
    }
}

/// Finds students whose name contains `query`, ignoring case.
///
/// # Errors
///
/// Returns [`InputError::EmptyField`] if `query` is empty after trimming.
pub fn by_name<'a>(students: &'a [Student], query: &str) -> Result<Vec<&'a Student>> {
    let needle = require_non_empty("search query", query)?.to_lowercase();
    Ok(students
        .iter()
        .filter(|s| s.name().to_lowercase().contains(&needle))
        .collect())
}

/// Finds students whose id contains `query`, respecting case.
///
/// # Errors
///
/// Returns [`InputError::EmptyField`] if `query` is empty after trimming.
pub fn by_id<'a>(students: &'a [Student], query: &str) -> Result<Vec<&'a Student>> {
    let needle = require_non_empty("search query", query)?;
    Ok(students.iter().filter(|s| s.id().contains(needle)).collect())
}

/// Finds graded students whose average lies within `range`.
///
/// Students without grades never match, even for a range that includes 0.
pub fn by_grade_range<'a>(students: &'a [Student], range: &GradeRange) -> Vec<&'a Student> {
    graded(students)
        .filter(|s| range.contains(s.average()))
        .collect()
}

/// Runs one search action: interprets `query` according to `mode`.
///
/// # Errors
///
/// Returns [`InputError`] if the query is empty or, for
/// [`SearchMode::GradeRange`], not a valid range. The roster is never
/// touched on failure.
pub fn search<'a>(students: &'a [Student], mode: SearchMode, query: &str) -> Result<Vec<&'a Student>> {
    match mode {
        SearchMode::Name => by_name(students, query),
        SearchMode::Id => by_id(students, query),
        SearchMode::GradeRange => {
            let range = GradeRange::parse(query)?;
            Ok(by_grade_range(students, &range))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Roster;
    use crate::student::Grade;

    fn sample() -> Roster {
        let mut roster = Roster::new();
        roster.add_student("Ada Lovelace", "CS-100").unwrap();
        roster.add_student("Grace Hopper", "cs-200").unwrap();
        roster.add_student("Alan Turing", "MA-300").unwrap();
        roster.add_student("Unmarked", "XX-400").unwrap();
        roster.record_grade("CS-100", "math", Grade::new(70.0).unwrap()).unwrap();
        roster.record_grade("cs-200", "math", Grade::new(90.0).unwrap()).unwrap();
        roster.record_grade("MA-300", "math", Grade::new(95.0).unwrap()).unwrap();
        roster
    }

    fn ids<'a>(students: &[&'a Student]) -> Vec<&'a str> {
        students.iter().map(|s| s.id()).collect()
    }

    #[test]
    fn test_by_name_case_insensitive() {
        let roster = sample();
        let hits = by_name(roster.students(), "A").unwrap();
        assert_eq!(ids(&hits), vec!["CS-100", "cs-200", "MA-300", "XX-400"]);

        let hits = by_name(roster.students(), "HOPPER").unwrap();
        assert_eq!(ids(&hits), vec!["cs-200"]);
    }

    #[test]
    fn test_by_name_rejects_empty_query() {
        let roster = sample();
        let err = by_name(roster.students(), "   ").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_by_id_case_sensitive() {
        let roster = sample();
        assert_eq!(ids(&by_id(roster.students(), "CS").unwrap()), vec!["CS-100"]);
        assert_eq!(ids(&by_id(roster.students(), "cs").unwrap()), vec!["cs-200"]);
        assert!(by_id(roster.students(), "zz").unwrap().is_empty());
    }

    #[test]
    fn test_by_grade_range_inclusive() {
        let roster = sample();
        let hits = by_grade_range(roster.students(), &GradeRange::new(70.0, 90.0));
        assert_eq!(ids(&hits), vec!["CS-100", "cs-200"]);
    }

    #[test]
    fn test_by_grade_range_skips_ungraded() {
        let roster = sample();
        let hits = by_grade_range(roster.students(), &GradeRange::new(0.0, 100.0));
        assert_eq!(ids(&hits), vec!["CS-100", "cs-200", "MA-300"]);
    }

    #[test]
    fn test_by_grade_range_inverted_matches_nothing() {
        let roster = sample();
        assert!(by_grade_range(roster.students(), &GradeRange::new(90.0, 70.0)).is_empty());
    }

    #[test]
    fn test_grade_range_parse() {
        assert_eq!(GradeRange::parse("70-90").unwrap(), GradeRange::new(70.0, 90.0));
        assert_eq!(
            GradeRange::parse(" 72.5 - 88 ").unwrap(),
            GradeRange::new(72.5, 88.0)
        );
    }

    #[test]
    fn test_grade_range_parse_malformed() {
        for input in ["70", "70-", "-90", "70-80-90", "70--90"] {
            assert!(
                matches!(GradeRange::parse(input), Err(InputError::MalformedRange { .. })),
                "expected malformed range for {input:?}"
            );
        }
        assert!(matches!(
            GradeRange::parse("seventy-90"),
            Err(InputError::NotANumber { .. })
        ));
        assert!(matches!(
            GradeRange::parse(""),
            Err(InputError::EmptyField { .. })
        ));
    }

    #[test]
    fn test_search_dispatch() {
        let roster = sample();
        let hits = search(roster.students(), SearchMode::Name, "turing").unwrap();
        assert_eq!(ids(&hits), vec!["MA-300"]);

        let hits = search(roster.students(), SearchMode::Id, "-").unwrap();
        assert_eq!(hits.len(), 4);

        let hits = search(roster.students(), SearchMode::GradeRange, "90-95").unwrap();
        assert_eq!(ids(&hits), vec!["cs-200", "MA-300"]);

        let err = search(roster.students(), SearchMode::GradeRange, "90").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_search_mode_labels() {
        assert_eq!(SearchMode::Name.to_string(), "By Name");
        assert_eq!(SearchMode::GradeRange.to_string(), "By Grade Range");
    }
}
