//! Store module tying the in-memory roster to its file.
//!
//! The [`Store`] is the object an application constructs once and passes
//! around. It owns the [`Roster`] and the [`RosterFile`] it came from, and
//! persists the whole roster after every successful mutation.
//!
//! # Failure Semantics
//!
//! - Input and roster errors (empty fields, duplicate ids, unknown students)
//!   are raised before anything changes.
//! - A failed save after a successful mutation is reported as
//!   [`GradebookError::Persistence`], but the mutation stays in memory.
//!   Calling [`Store::save`] later retries the write.
//! - [`Store::open_or_empty`] turns a failed load into an empty roster plus
//!   a non-fatal error for the caller to display.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use gradebook::store::Store;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (mut store, warning) = Store::open_or_empty("./grades.json");
//! if let Some(e) = warning {
//!     eprintln!("Warning: {e}");
//! }
//!
//! store.add_student("Ada Lovelace", "s1")?;
//! store.record_grade_str("s1", "math", "95")?;
//!
//! for student in store.students() {
//!     println!("{}: {:.2}", student.name(), student.average());
//! }
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{GradebookError, Result};
use crate::persist::RosterFile;
use crate::roster::Roster;
use crate::student::{Grade, Student};

/// Top-level handle: a roster bound to the file it persists to.
///
/// # Thread Safety
///
/// The Store is designed for single-threaded, one-action-at-a-time use.
/// External synchronization must be provided if used across threads.
#[derive(Debug)]
pub struct Store {
    /// The in-memory roster.
    roster: Roster,
    /// Where the roster is persisted.
    file: RosterFile,
}

impl Store {
    /// Opens the roster stored at `path`.
    ///
    /// A missing file yields an empty store; the file is created on the
    /// first mutation.
    ///
    /// # Errors
    ///
    /// Returns [`GradebookError::Persistence`] if an existing file cannot be
    /// read, parsed, or validated.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = RosterFile::new(path);
        let roster = file.load()?;
        Ok(Self { roster, file })
    }

    /// Opens the roster stored at `path`, falling back to an empty roster.
    ///
    /// Never fails. If loading went wrong the error is logged and returned
    /// alongside the empty store so it can be shown to the user. The broken
    /// file is left on disk until the next successful save replaces it.
    pub fn open_or_empty<P: AsRef<Path>>(path: P) -> (Self, Option<GradebookError>) {
        let file = RosterFile::new(path);
        match file.load() {
            Ok(roster) => (Self { roster, file }, None),
            Err(e) => {
                warn!(path = %file.path().display(), error = %e, "failed to load roster, starting empty");
                (
                    Self {
                        roster: Roster::new(),
                        file,
                    },
                    Some(e),
                )
            }
        }
    }

    /// Adds a student and persists the roster.
    ///
    /// # Errors
    ///
    /// - Input or duplicate-id errors from [`Roster::add_student`]; nothing
    ///   is changed or saved
    /// - [`GradebookError::Persistence`] if saving fails; the student stays
    ///   on the in-memory roster
    pub fn add_student(&mut self, name: &str, id: &str) -> Result<()> {
        self.roster.add_student(name, id)?;
        self.save()
    }

    /// Records a grade and persists the roster.
    ///
    /// Returns the grade previously recorded for the subject, if any.
    ///
    /// # Errors
    ///
    /// - Input or not-found errors from [`Roster::record_grade`]; nothing is
    ///   changed or saved
    /// - [`GradebookError::Persistence`] if saving fails; the grade stays on
    ///   the in-memory roster
    pub fn record_grade(&mut self, id: &str, subject: &str, grade: Grade) -> Result<Option<f64>> {
        let previous = self.roster.record_grade(id, subject, grade)?;
        self.save()?;
        Ok(previous)
    }

    /// Parses `grade` from user text, then behaves like [`Store::record_grade`].
    ///
    /// # Errors
    ///
    /// Same as [`Store::record_grade`], plus the parse errors of
    /// [`Grade::parse`].
    pub fn record_grade_str(&mut self, id: &str, subject: &str, grade: &str) -> Result<Option<f64>> {
        let grade = Grade::parse(grade)?;
        self.record_grade(id, subject, grade)
    }

    /// Writes the full roster to its file.
    ///
    /// # Errors
    ///
    /// Returns [`GradebookError::Persistence`] if the write fails.
    pub fn save(&self) -> Result<()> {
        self.file.save(self.roster.students())?;
        debug!(students = self.roster.len(), "store persisted");
        Ok(())
    }

    /// Returns the roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Returns all students in insertion order.
    pub fn students(&self) -> &[Student] {
        self.roster.students()
    }

    /// Returns the roster file path.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
