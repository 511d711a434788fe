//! Human-readable text rendering of roster data and statistics.
//!
//! Each report is a small wrapper type implementing [`fmt::Display`], so it
//! can be printed directly or turned into a `String` with `to_string()`.
//! This is the only place numbers are rounded: every score and average is
//! shown with two decimals.

use std::collections::BTreeMap;
use std::fmt;

use crate::stats::{self, Performers, Summary};
use crate::student::Student;

/// Shown instead of any report when the roster is empty.
pub const NO_STUDENTS: &str = "No students available.";

const SEPARATOR: &str = "-----------------";

/// The report kinds a user can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Count, mean, highest and lowest of per-student averages.
    Class,
    /// Count, mean, highest and lowest grade per subject.
    Subject,
    /// Best and worst ranked graded students.
    TopBottom,
}

/// Listing of every student with their grades and average.
pub struct StudentList<'a>(pub &'a [Student]);

impl fmt::Display for StudentList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str(NO_STUDENTS);
        }

        writeln!(f, "=== ALL STUDENTS ===")?;
        writeln!(f)?;
        for student in self.0 {
            writeln!(f, "ID: {}, Name: {}", student.id(), student.name())?;
            if student.is_graded() {
                for (subject, grade) in student.grades() {
                    writeln!(f, "  {subject}: {grade:.2}")?;
                }
                writeln!(f, "  Average: {:.2}", student.average())?;
            } else {
                writeln!(f, "  No grades recorded")?;
            }
            writeln!(f, "{SEPARATOR}")?;
        }
        Ok(())
    }
}

/// Class-wide statistics over per-student averages.
pub struct ClassReport<'a>(pub &'a Summary);

impl fmt::Display for ClassReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        writeln!(f, "=== CLASS STATISTICS ===")?;
        writeln!(f)?;
        writeln!(f, "Students with grades: {}", summary.count)?;
        writeln!(f, "Average Grade: {:.2}", summary.mean)?;
        writeln!(f, "Highest Average: {:.2}", summary.max)?;
        writeln!(f, "Lowest Average: {:.2}", summary.min)
    }
}

/// Per-subject statistics.
pub struct SubjectReport<'a>(pub &'a BTreeMap<String, Summary>);

impl fmt::Display for SubjectReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("No grades recorded for any subject.");
        }

        writeln!(f, "=== SUBJECT STATISTICS ===")?;
        writeln!(f)?;
        for (subject, summary) in self.0 {
            writeln!(f, "Subject: {subject}")?;
            writeln!(f, "  Grades Recorded: {}", summary.count)?;
            writeln!(f, "  Average: {:.2}", summary.mean)?;
            writeln!(f, "  Highest: {:.2}", summary.max)?;
            writeln!(f, "  Lowest: {:.2}", summary.min)?;
            writeln!(f, "{SEPARATOR}")?;
        }
        Ok(())
    }
}

/// Top and bottom performers, `count` of each.
pub struct PerformersReport<'a> {
    /// The ranked students.
    pub performers: &'a Performers<'a>,
    /// How many students each list was asked for.
    pub count: usize,
}

impl fmt::Display for PerformersReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.performers.is_empty() {
            return f.write_str("No students with grades recorded.");
        }

        writeln!(f, "=== TOP/BOTTOM PERFORMERS ===")?;
        writeln!(f)?;
        writeln!(f, "Top {} Students:", self.count)?;
        for student in &self.performers.top {
            write_ranked(f, student)?;
        }
        writeln!(f)?;
        writeln!(f, "Bottom {} Students:", self.count)?;
        for student in &self.performers.bottom {
            write_ranked(f, student)?;
        }
        Ok(())
    }
}

fn write_ranked(f: &mut fmt::Formatter<'_>, student: &Student) -> fmt::Result {
    writeln!(
        f,
        "{} (ID: {}) - Avg: {:.2}",
        student.name(),
        student.id(),
        student.average()
    )
}

/// Results of a search, labelled with the criteria that produced them.
pub struct SearchReport<'a> {
    /// Matching students in roster order.
    pub results: &'a [&'a Student],
    /// Human description of the search, e.g. `By Name: ada`.
    pub criteria: &'a str,
}

impl fmt::Display for SearchReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.results.is_empty() {
            return write!(f, "No students found matching: {}", self.criteria);
        }

        writeln!(f, "=== SEARCH RESULTS ===")?;
        writeln!(f)?;
        writeln!(f, "Criteria: {}", self.criteria)?;
        writeln!(f)?;
        for student in self.results {
            writeln!(f, "ID: {}, Name: {}", student.id(), student.name())?;
            if student.is_graded() {
                writeln!(f, "  Average: {:.2}", student.average())?;
            }
            writeln!(f, "{SEPARATOR}")?;
        }
        Ok(())
    }
}

/// Computes and renders one report over `students`.
///
/// `count` only applies to [`ReportKind::TopBottom`]. An empty roster
/// renders [`NO_STUDENTS`] whatever the kind.
pub fn render_report(students: &[Student], kind: ReportKind, count: usize) -> String {
    if students.is_empty() {
        return NO_STUDENTS.to_string();
    }

    match kind {
        ReportKind::Class => ClassReport(&stats::class_statistics(students)).to_string(),
        ReportKind::Subject => SubjectReport(&stats::subject_statistics(students)).to_string(),
        ReportKind::TopBottom => {
            let performers = stats::top_bottom_performers(students, count);
            PerformersReport {
                performers: &performers,
                count,
            }
            .to_string()
        }
    }
}
