//! Whole-roster persistence to a JSON file.
//!
//! The roster is stored as a single versioned document:
//!
//! ```text
//! {
//!   "version": 1,
//!   "students": [
//!     { "name": "Ada Lovelace", "id": "s1", "grades": { "math": 95.0 } },
//!     ...
//!   ]
//! }
//! ```
//!
//! Every save rewrites the whole file. The document is written to a sibling
//! temporary file and renamed into place, so readers see either the old
//! roster or the new one.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PersistenceError, Result};
use crate::roster::Roster;
use crate::student::Student;

/// Roster file format version.
const FILE_VERSION: u32 = 1;

/// Suffix appended to the roster path for the in-progress write.
const TEMP_SUFFIX: &str = "tmp";

/// Owned document written to disk.
#[derive(Debug, Deserialize)]
struct RosterDocument {
    /// File format version.
    version: u32,
    /// Students in roster order.
    #[serde(default)]
    students: Vec<Student>,
}

/// Borrowed view of [`RosterDocument`] used when saving.
#[derive(Serialize)]
struct RosterDocumentRef<'a> {
    version: u32,
    students: &'a [Student],
}

/// A roster file on local disk.
#[derive(Debug, Clone)]
pub struct RosterFile {
    /// Path of the roster document.
    path: PathBuf,
}

impl RosterFile {
    /// Creates a handle for the roster file at `path`. Nothing is read yet.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the roster file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the roster, validating every record.
    ///
    /// A missing file is not an error: it yields an empty roster, which is
    /// what a first run looks like.
    ///
    /// # Errors
    ///
    /// - [`PersistenceError::Read`] if the file exists but cannot be read
    /// - [`PersistenceError::Parse`] if it is not a valid roster document
    /// - [`PersistenceError::UnsupportedVersion`] for a different format version
    /// - [`PersistenceError::InvalidRecord`] if records break roster invariants
    pub fn load(&self) -> Result<Roster> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no roster file, starting empty");
            return Ok(Roster::new());
        }

        let data = fs::read_to_string(&self.path).map_err(|e| PersistenceError::Read {
            path: self.path.clone(),
            source: e,
        })?;

        let document: RosterDocument =
            serde_json::from_str(&data).map_err(|e| PersistenceError::Parse {
                path: self.path.clone(),
                source: e,
            })?;

        if document.version != FILE_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                expected: FILE_VERSION,
                found: document.version,
            }
            .into());
        }

        let roster = Roster::from_students(document.students).map_err(|reason| {
            PersistenceError::InvalidRecord {
                path: self.path.clone(),
                reason,
            }
        })?;

        debug!(path = %self.path.display(), students = roster.len(), "roster loaded");
        Ok(roster)
    }

    /// Overwrites the roster file with `students`.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// - [`PersistenceError::Serialize`] if the roster cannot be encoded
    /// - [`PersistenceError::Write`] if the file cannot be written or renamed
    pub fn save(&self, students: &[Student]) -> Result<()> {
        let document = RosterDocumentRef {
            version: FILE_VERSION,
            students,
        };
        let data = serde_json::to_string_pretty(&document)
            .map_err(|e| PersistenceError::Serialize { source: e })?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| PersistenceError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, data).map_err(|e| PersistenceError::Write {
            path: temp_path.clone(),
            source: e,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| PersistenceError::Write {
            path: self.path.clone(),
            source: e,
        })?;

        debug!(path = %self.path.display(), students = students.len(), "roster saved");
        Ok(())
    }

    /// Path of the temporary file written before the final rename.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(TEMP_SUFFIX);
        self.path.with_file_name(name)
    }
}
