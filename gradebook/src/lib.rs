//! # gradebook
//!
//! Embedded student roster with per-subject grades and descriptive statistics.
//!
//! gradebook keeps an ordered roster of students, each with a unique id and
//! a mapping from subject to score in `[0, 100]`. It computes class-wide and
//! per-subject statistics, ranks students by average, and searches by name,
//! id, or average range. The whole roster is persisted to a local JSON file
//! after every change and reloaded on startup.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gradebook::{Store, ReportKind, DEFAULT_PERFORMER_COUNT};
//! use gradebook::report::render_report;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Open or create a roster file
//! let mut store = Store::open("./grades.json")?;
//!
//! store.add_student("Ada Lovelace", "s1")?;
//! store.record_grade_str("s1", "math", "95")?;
//! store.record_grade_str("s1", "physics", "88.5")?;
//!
//! let report = render_report(store.students(), ReportKind::Class, DEFAULT_PERFORMER_COUNT);
//! println!("{report}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`Store`] - Top-level handle; owns the roster and persists it after each mutation
//! - [`Roster`] - In-memory, insertion-ordered student collection with unique ids
//! - [`Student`] / [`Grade`] - Record type and validated score
//! - [`stats`] - Class, subject, and top/bottom statistics
//! - [`query`] - Name, id, and grade-range search
//!
//! ## Modules
//!
//! - [`store`] - Store lifecycle, mutations with persistence
//! - [`roster`] - Roster operations and invariants
//! - [`student`] - Student record, grade validation
//! - [`stats`] - Statistics engine
//! - [`query`] - Search layer and range parsing
//! - [`persist`] - JSON roster file
//! - [`report`] - Text rendering
//! - [`error`] - Error types

pub mod error;
pub mod persist;
pub mod query;
pub mod report;
pub mod roster;
pub mod stats;
pub mod store;
pub mod student;

// Re-export primary API types at crate root for convenience.
pub use error::{GradebookError, InputError, PersistenceError, Result, RosterError};
pub use query::{GradeRange, SearchMode};
pub use report::ReportKind;
pub use roster::Roster;
pub use stats::{DEFAULT_PERFORMER_COUNT, Performers, Summary};
pub use store::Store;
pub use student::{Grade, Student};
