//! Error types for the gradebook roster.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for all gradebook operations.
///
/// Every variant is recoverable at the point of the user action: the caller
/// reports the message and the in-memory roster stays consistent.
#[derive(Error, Debug)]
pub enum GradebookError {
    /// Malformed, missing, or out-of-range user input.
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    /// A roster rule was violated (duplicate id, unknown student).
    #[error("{0}")]
    Roster(#[from] RosterError),

    /// The roster could not be loaded from or saved to durable storage.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl GradebookError {
    /// Returns `true` for malformed, missing, or out-of-range input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }

    /// Returns `true` when a student id was already taken.
    pub fn is_duplicate_id(&self) -> bool {
        matches!(self, Self::Roster(RosterError::DuplicateId { .. }))
    }

    /// Returns `true` when the referenced student does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Roster(RosterError::NotFound { .. }))
    }

    /// Returns `true` when loading or saving the roster failed.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}

/// Errors raised while validating user input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// A required field was empty after trimming.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the empty field.
        field: &'static str,
    },

    /// A numeric field could not be parsed as a finite number.
    #[error("{field} is not a valid number: '{value}'")]
    NotANumber {
        /// Name of the field being parsed.
        field: &'static str,
        /// The raw text that failed to parse.
        value: String,
    },

    /// A grade fell outside the accepted interval.
    #[error("grade {value} is outside [{min}, {max}]")]
    OutOfRange {
        /// The rejected value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },

    /// A grade range token did not decompose into `min-max`.
    #[error("malformed range '{input}': use format min-max (e.g., 70-90)")]
    MalformedRange {
        /// The raw range text.
        input: String,
    },
}

/// Errors raised by roster mutations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// A student with this id is already on the roster.
    #[error("student id '{id}' already exists")]
    DuplicateId {
        /// The conflicting id.
        id: String,
    },

    /// No student on the roster has this id.
    #[error("student '{id}' not found")]
    NotFound {
        /// The id that was looked up.
        id: String,
    },
}

/// Errors raised while loading or saving the roster file.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The roster file exists but could not be read.
    #[error("failed to read roster file '{}': {source}", path.display())]
    Read {
        /// The roster file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The roster file (or its temporary sibling) could not be written.
    #[error("failed to write roster file '{}': {source}", path.display())]
    Write {
        /// The path being written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The roster file is not valid JSON for the roster format.
    #[error("failed to parse roster file '{}': {source}", path.display())]
    Parse {
        /// The roster file path.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The roster could not be serialized.
    #[error("failed to serialize roster: {source}")]
    Serialize {
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The roster file was written by an incompatible format version.
    #[error("unsupported roster file version: expected {expected}, found {found}")]
    UnsupportedVersion {
        /// The version this build understands.
        expected: u32,
        /// The version found on disk.
        found: u32,
    },

    /// A stored record breaks a roster invariant.
    #[error("invalid record in roster file '{}': {reason}", path.display())]
    InvalidRecord {
        /// The roster file path.
        path: PathBuf,
        /// Description of the broken invariant.
        reason: String,
    },
}

/// Type alias for `Result<T, GradebookError>`.
pub type Result<T> = std::result::Result<T, GradebookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        let err: GradebookError = InputError::EmptyField { field: "name" }.into();
        assert!(err.is_invalid_input());
        assert!(!err.is_duplicate_id());

        let err: GradebookError = RosterError::DuplicateId { id: "s1".into() }.into();
        assert!(err.is_duplicate_id());
        assert!(!err.is_not_found());

        let err: GradebookError = RosterError::NotFound { id: "s1".into() }.into();
        assert!(err.is_not_found());

        let err: GradebookError = PersistenceError::UnsupportedVersion {
            expected: 1,
            found: 9,
        }
        .into();
        assert!(err.is_persistence());
    }

    #[test]
    fn test_messages() {
        let err = InputError::OutOfRange {
            value: 105.0,
            min: 0.0,
            max: 100.0,
        };
        assert_eq!(err.to_string(), "grade 105 is outside [0, 100]");

        let err: GradebookError = RosterError::NotFound { id: "x9".into() }.into();
        assert_eq!(err.to_string(), "student 'x9' not found");
    }
}
