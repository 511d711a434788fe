//! In-memory roster of students.
//!
//! The [`Roster`] exclusively owns every [`Student`] record. Students are
//! kept in insertion order, with an id index on the side for lookups and
//! duplicate detection.
//!
//! # Example
//!
//! ```rust
//! use gradebook::roster::Roster;
//! use gradebook::student::Grade;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut roster = Roster::new();
//! roster.add_student("Ada Lovelace", "s1")?;
//! roster.record_grade("s1", "math", Grade::new(95.0)?)?;
//!
//! assert_eq!(roster.get("s1").map(|s| s.average()), Some(95.0));
//! assert!(roster.add_student("Someone Else", "s1").is_err());
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Result, RosterError};
use crate::student::{Grade, Student, require_non_empty};

/// Ordered collection of students with unique ids.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    /// Students in insertion order.
    students: Vec<Student>,
    /// Maps student id to its position in `students`.
    index: HashMap<String, usize>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a roster from previously persisted records.
    ///
    /// Record order is preserved. Every record is re-validated, so a roster
    /// built this way upholds the same invariants as one built through
    /// [`Roster::add_student`].
    ///
    /// # Errors
    ///
    /// Returns a description of the first broken invariant: an empty name,
    /// id, or subject, an out-of-range grade, or a repeated id.
    pub fn from_students(students: Vec<Student>) -> std::result::Result<Self, String> {
        let mut index = HashMap::with_capacity(students.len());
        for (position, student) in students.iter().enumerate() {
            student.check()?;
            if index.insert(student.id().to_string(), position).is_some() {
                return Err(format!("student id '{}' appears more than once", student.id()));
            }
        }
        Ok(Self { students, index })
    }

    /// Adds a new student with no grades.
    ///
    /// # Errors
    ///
    /// - [`InputError::EmptyField`](crate::error::InputError::EmptyField) if
    ///   `name` or `id` is empty after trimming
    /// - [`RosterError::DuplicateId`] if the id is already taken; the roster
    ///   is left unchanged
    pub fn add_student(&mut self, name: &str, id: &str) -> Result<&Student> {
        let student = Student::new(name, id)?;

        if self.index.contains_key(student.id()) {
            return Err(RosterError::DuplicateId {
                id: student.id().to_string(),
            }
            .into());
        }

        let position = self.students.len();
        self.index.insert(student.id().to_string(), position);
        self.students.push(student);
        debug!(id = %self.students[position].id(), position, "student added");

        Ok(&self.students[position])
    }

    /// Records `grade` for `subject` on the student with `id`.
    ///
    /// A repeated subject overwrites the earlier grade. The replaced value,
    /// if any, is returned.
    ///
    /// # Errors
    ///
    /// - [`InputError::EmptyField`](crate::error::InputError::EmptyField) if
    ///   `id` or `subject` is empty after trimming
    /// - [`RosterError::NotFound`] if no student has this id
    pub fn record_grade(&mut self, id: &str, subject: &str, grade: Grade) -> Result<Option<f64>> {
        let id = require_non_empty("id", id)?;
        let subject = require_non_empty("subject", subject)?;

        let position = *self.index.get(id).ok_or_else(|| RosterError::NotFound {
            id: id.to_string(),
        })?;

        let previous = self.students[position].record(subject, grade);
        debug!(id, subject, grade = grade.value(), ?previous, "grade recorded");

        Ok(previous)
    }

    /// Returns all students in insertion order.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Looks up a student by exact id.
    pub fn get(&self, id: &str) -> Option<&Student> {
        self.index.get(id).map(|&position| &self.students[position])
    }

    /// Returns the number of students.
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Returns `true` if no students have been added.
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Consumes the roster, returning its students in insertion order.
    pub fn into_students(self) -> Vec<Student> {
        self.students
    }
}
