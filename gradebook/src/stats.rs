//! Descriptive statistics over a roster snapshot.
//!
//! All functions here are pure: they take the slice returned by
//! [`Roster::students`](crate::roster::Roster::students) and compute
//! aggregates without touching the roster. Values keep full `f64` precision;
//! rounding happens only when results are rendered.
//!
//! # Example
//!
//! ```rust
//! use gradebook::roster::Roster;
//! use gradebook::stats::{class_statistics, top_bottom_performers};
//! use gradebook::student::Grade;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut roster = Roster::new();
//! roster.add_student("Ada", "s1")?;
//! roster.add_student("Grace", "s2")?;
//! roster.record_grade("s1", "math", Grade::new(90.0)?)?;
//! roster.record_grade("s2", "math", Grade::new(70.0)?)?;
//!
//! let summary = class_statistics(roster.students());
//! assert_eq!(summary.count, 2);
//! assert_eq!(summary.mean, 80.0);
//!
//! let performers = top_bottom_performers(roster.students(), 1);
//! assert_eq!(performers.top[0].id(), "s1");
//! assert_eq!(performers.bottom[0].id(), "s2");
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::student::Student;

/// Number of students listed in each half of a top/bottom report by default.
pub const DEFAULT_PERFORMER_COUNT: usize = 5;

/// Count, mean, minimum and maximum of a set of values.
///
/// An empty summary has `count == 0` and every other field set to `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Summary {
    /// Number of values aggregated.
    pub count: usize,
    /// Arithmetic mean of the values.
    pub mean: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

impl Summary {
    /// Aggregates `values` in a single pass.
    #[allow(clippy::cast_precision_loss)] // Roster sizes are far below 2^52
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for value in values {
            count += 1;
            sum += value;
            min = min.min(value);
            max = max.max(value);
        }

        if count == 0 {
            return Self::default();
        }

        Self {
            count,
            mean: sum / count as f64,
            min,
            max,
        }
    }

    /// Returns `true` if nothing was aggregated.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Highest and lowest ranked graded students.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Performers<'a> {
    /// Best averages first.
    pub top: Vec<&'a Student>,
    /// Tail of the same descending ranking, still in descending order.
    pub bottom: Vec<&'a Student>,
}

impl Performers<'_> {
    /// Returns `true` if there were no graded students to rank.
    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
    }
}

/// Summarizes the per-student averages of every graded student.
///
/// Students without grades are ignored. With no graded students the result
/// is an empty [`Summary`].
pub fn class_statistics(students: &[Student]) -> Summary {
    Summary::from_values(graded(students).map(Student::average))
}

/// Summarizes every recorded grade, grouped by subject.
///
/// Each subject aggregates all grades recorded under that name across the
/// roster. Subjects nobody has a grade in do not appear.
pub fn subject_statistics(students: &[Student]) -> BTreeMap<String, Summary> {
    let mut by_subject: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for student in students {
        for (subject, &value) in student.grades() {
            by_subject.entry(subject.as_str()).or_default().push(value);
        }
    }

    by_subject
        .into_iter()
        .map(|(subject, values)| (subject.to_string(), Summary::from_values(values)))
        .collect()
}

/// Ranks graded students by average and returns both ends of the ranking.
///
/// The ranking is a stable descending sort, so students with equal
/// averages keep their roster insertion order. `top` holds the first `n`
/// ranked students and `bottom` the last `n`. With `2 * n` or fewer graded
/// students the two lists overlap.
pub fn top_bottom_performers(students: &[Student], n: usize) -> Performers<'_> {
    let ranked = rank_by_average(students);
    let top = ranked.iter().take(n).copied().collect();
    let bottom = ranked[ranked.len().saturating_sub(n)..].to_vec();
    Performers { top, bottom }
}

/// Graded students sorted by descending average, ties in roster order.
pub fn rank_by_average(students: &[Student]) -> Vec<&Student> {
    let mut ranked: Vec<&Student> = graded(students).collect();
    ranked.sort_by(|a, b| b.average().total_cmp(&a.average()));
    ranked
}

/// Iterates over students with at least one grade.
pub(crate) fn graded(students: &[Student]) -> impl Iterator<Item = &Student> {
    students.iter().filter(|s| s.is_graded())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Roster;
    use crate::student::Grade;

    /// Builds a roster from ids, then applies `(id, subject, grade)` entries.
    fn roster(ids: &[&str], grades: &[(&str, &str, f64)]) -> Roster {
        let mut roster = Roster::new();
        for id in ids {
            roster.add_student(&format!("Student {id}"), id).unwrap();
        }
        for &(id, subject, value) in grades {
            roster
                .record_grade(id, subject, Grade::new(value).unwrap())
                .unwrap();
        }
        roster
    }

    fn ids<'a>(students: &[&'a Student]) -> Vec<&'a str> {
        students.iter().map(|s| s.id()).collect()
    }

    #[test]
    fn test_summary_from_values() {
        let summary = Summary::from_values([70.0, 90.0, 80.0]);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.mean, 80.0);
        assert_eq!(summary.min, 70.0);
        assert_eq!(summary.max, 90.0);
    }

    #[test]
    fn test_summary_empty() {
        let summary = Summary::from_values(std::iter::empty::<f64>());
        assert!(summary.is_empty());
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn test_class_statistics_ignores_ungraded() {
        let roster = roster(
            &["a", "b", "c"],
            &[("a", "math", 80.0), ("a", "art", 100.0), ("c", "math", 60.0)],
        );
        let summary = class_statistics(roster.students());
        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean, 75.0);
        assert_eq!(summary.max, 90.0);
        assert_eq!(summary.min, 60.0);
    }

    #[test]
    fn test_class_statistics_no_graded_students() {
        let roster = roster(&["a", "b"], &[]);
        let summary = class_statistics(roster.students());
        assert_eq!(summary.count, 0);
        assert!(summary.is_empty());
    }

    #[test]
    fn test_class_statistics_sees_latest_grade() {
        let mut roster = roster(&["a"], &[("a", "math", 40.0)]);
        roster
            .record_grade("a", "math", Grade::new(90.0).unwrap())
            .unwrap();
        let summary = class_statistics(roster.students());
        assert_eq!(summary.count, 1);
        assert_eq!(summary.mean, 90.0);
    }

    #[test]
    fn test_subject_statistics() {
        let roster = roster(
            &["a", "b", "c"],
            &[("a", "math", 80.0), ("a", "art", 100.0), ("b", "math", 60.0)],
        );
        let stats = subject_statistics(roster.students());
        assert_eq!(stats.len(), 2);

        let math = stats["math"];
        assert_eq!(math.count, 2);
        assert_eq!(math.mean, 70.0);
        assert_eq!(math.min, 60.0);
        assert_eq!(math.max, 80.0);

        let art = stats["art"];
        assert_eq!(art.count, 1);
        assert_eq!(art.mean, 100.0);
    }

    #[test]
    fn test_subject_statistics_empty() {
        let roster = roster(&["a"], &[]);
        assert!(subject_statistics(roster.students()).is_empty());
    }

    #[test]
    fn test_top_bottom_overlap_with_small_roster() {
        let roster = roster(
            &["a", "b", "c", "d"],
            &[("a", "math", 70.0), ("b", "math", 90.0), ("c", "math", 80.0)],
        );
        let performers = top_bottom_performers(roster.students(), 5);
        assert_eq!(ids(&performers.top), vec!["b", "c", "a"]);
        assert_eq!(ids(&performers.bottom), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_top_bottom_large_roster() {
        let entries: Vec<(String, f64)> = (0..12)
            .map(|i| (format!("s{i:02}"), f64::from(i) * 5.0))
            .collect();
        let mut roster = Roster::new();
        for (id, value) in &entries {
            roster.add_student(id, id).unwrap();
            roster
                .record_grade(id, "math", Grade::new(*value).unwrap())
                .unwrap();
        }

        let performers = top_bottom_performers(roster.students(), DEFAULT_PERFORMER_COUNT);
        assert_eq!(ids(&performers.top), vec!["s11", "s10", "s09", "s08", "s07"]);
        assert_eq!(ids(&performers.bottom), vec!["s04", "s03", "s02", "s01", "s00"]);
    }

    #[test]
    fn test_ranking_ties_keep_insertion_order() {
        let roster = roster(
            &["first", "second", "third"],
            &[
                ("first", "math", 85.0),
                ("second", "math", 95.0),
                ("third", "art", 85.0),
            ],
        );
        let ranked = rank_by_average(roster.students());
        assert_eq!(ids(&ranked), vec!["second", "first", "third"]);
    }

    #[test]
    fn test_top_bottom_no_graded_students() {
        let roster = roster(&["a"], &[]);
        let performers = top_bottom_performers(roster.students(), 5);
        assert!(performers.is_empty());
        assert!(performers.bottom.is_empty());
    }

    #[test]
    fn test_top_bottom_zero_count() {
        let roster = roster(&["a"], &[("a", "math", 50.0)]);
        let performers = top_bottom_performers(roster.students(), 0);
        assert!(performers.top.is_empty());
        assert!(performers.bottom.is_empty());
    }
}
