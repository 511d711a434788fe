//! CLI for the gradebook student roster.
//!
//! Each invocation performs one user action against the roster file: add a
//! student, record a grade, list everyone, generate a report, or search.

use std::error::Error;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use gradebook::report::{SearchReport, StudentList, render_report};
use gradebook::stats::{self, DEFAULT_PERFORMER_COUNT};
use gradebook::{ReportKind, SearchMode, Store, Student, query};
use tracing_subscriber::EnvFilter;

/// gradebook - Record students and grades, and report on them.
#[derive(Parser, Debug)]
#[command(name = "gradebook", version, about)]
struct Cli {
    /// Path to the roster file.
    #[arg(long, env = "GRADEBOOK_DATA_FILE", default_value = "grades.json", global = true)]
    data_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all logging.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a new student with no grades.
    AddStudent {
        /// Student display name.
        #[arg(long)]
        name: String,

        /// Unique student id.
        #[arg(long)]
        id: String,
    },

    /// Record (or overwrite) a student's grade for a subject.
    AddGrade {
        /// Id of the student.
        #[arg(long)]
        id: String,

        /// Subject name.
        #[arg(long)]
        subject: String,

        /// Grade between 0 and 100.
        #[arg(long, allow_hyphen_values = true)]
        grade: String,
    },

    /// List every student with grades and average.
    List {
        /// Output format.
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Generate a statistics report.
    Report {
        /// Which report to generate.
        kind: ReportArg,

        /// Students per list in the top/bottom report.
        #[arg(long, default_value_t = DEFAULT_PERFORMER_COUNT)]
        count: usize,

        /// Output format.
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Search the roster.
    Search {
        /// How to interpret the query.
        mode: SearchArg,

        /// Name or id substring, or a `min-max` average range.
        query: String,

        /// Output format.
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Output format for read commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable text.
    Text,
    /// JSON document.
    Json,
}

/// Report selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportArg {
    /// Class-wide statistics over student averages.
    Class,
    /// Statistics per subject.
    Subject,
    /// Top and bottom performers.
    TopBottom,
}

impl From<ReportArg> for ReportKind {
    fn from(arg: ReportArg) -> Self {
        match arg {
            ReportArg::Class => Self::Class,
            ReportArg::Subject => Self::Subject,
            ReportArg::TopBottom => Self::TopBottom,
        }
    }
}

/// Search mode selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SearchArg {
    /// Case-insensitive name substring.
    Name,
    /// Case-sensitive id substring.
    Id,
    /// Inclusive average range, e.g. `70-90`.
    Range,
}

impl From<SearchArg> for SearchMode {
    fn from(arg: SearchArg) -> Self {
        match arg {
            SearchArg::Name => Self::Name,
            SearchArg::Id => Self::Id,
            SearchArg::Range => Self::GradeRange,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let (mut store, warning) = Store::open_or_empty(&cli.data_file);
    if let Some(e) = warning {
        eprintln!("Warning: {e}");
    }

    match execute(&mut store, cli.command) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` takes precedence over the verbosity flags when set.
fn init_logging(verbosity: u8, quiet: bool) {
    let level = if quiet {
        "off"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Runs one command against the store and returns what to print.
fn execute(store: &mut Store, command: Commands) -> Result<String, Box<dyn Error>> {
    match command {
        Commands::AddStudent { name, id } => cmd_add_student(store, &name, &id),
        Commands::AddGrade { id, subject, grade } => cmd_add_grade(store, &id, &subject, &grade),
        Commands::List { format } => cmd_list(store, format),
        Commands::Report {
            kind,
            count,
            format,
        } => cmd_report(store, kind.into(), count, format),
        Commands::Search {
            mode,
            query,
            format,
        } => cmd_search(store, mode.into(), &query, format),
    }
}

/// Implements `gradebook add-student`.
fn cmd_add_student(store: &mut Store, name: &str, id: &str) -> Result<String, Box<dyn Error>> {
    store.add_student(name, id)?;
    tracing::info!(id = id.trim(), "student added");
    Ok("Student added successfully!".to_string())
}

/// Implements `gradebook add-grade`.
fn cmd_add_grade(
    store: &mut Store,
    id: &str,
    subject: &str,
    grade: &str,
) -> Result<String, Box<dyn Error>> {
    let previous = store.record_grade_str(id, subject, grade)?;
    tracing::info!(id = id.trim(), subject = subject.trim(), "grade recorded");
    Ok(match previous {
        Some(old) => format!("Grade updated successfully! (previous: {old:.2})"),
        None => "Grade added successfully!".to_string(),
    })
}

/// Implements `gradebook list`.
fn cmd_list(store: &Store, format: OutputFormat) -> Result<String, Box<dyn Error>> {
    match format {
        OutputFormat::Text => Ok(StudentList(store.students()).to_string()),
        OutputFormat::Json => {
            let students: Vec<_> = store.students().iter().map(student_json).collect();
            let output = serde_json::json!({
                "count": students.len(),
                "students": students,
            });
            Ok(serde_json::to_string_pretty(&output)?)
        }
    }
}

/// Implements `gradebook report <kind>`.
fn cmd_report(
    store: &Store,
    kind: ReportKind,
    count: usize,
    format: OutputFormat,
) -> Result<String, Box<dyn Error>> {
    let students = store.students();
    match format {
        OutputFormat::Text => Ok(render_report(students, kind, count)),
        OutputFormat::Json => {
            let output = match kind {
                ReportKind::Class => serde_json::json!({
                    "report": "class",
                    "statistics": stats::class_statistics(students),
                }),
                ReportKind::Subject => serde_json::json!({
                    "report": "subject",
                    "subjects": stats::subject_statistics(students),
                }),
                ReportKind::TopBottom => {
                    let performers = stats::top_bottom_performers(students, count);
                    serde_json::json!({
                        "report": "top_bottom",
                        "count": count,
                        "top": performers.top.iter().copied().map(student_json).collect::<Vec<_>>(),
                        "bottom": performers.bottom.iter().copied().map(student_json).collect::<Vec<_>>(),
                    })
                }
            };
            Ok(serde_json::to_string_pretty(&output)?)
        }
    }
}

/// Implements `gradebook search <mode> <query>`.
fn cmd_search(
    store: &Store,
    mode: SearchMode,
    query_text: &str,
    format: OutputFormat,
) -> Result<String, Box<dyn Error>> {
    let results = query::search(store.students(), mode, query_text)?;
    let criteria = format!("{mode}: {}", query_text.trim());

    match format {
        OutputFormat::Text => Ok(SearchReport {
            results: &results,
            criteria: &criteria,
        }
        .to_string()),
        OutputFormat::Json => {
            let matches: Vec<_> = results.iter().copied().map(student_json).collect();
            let output = serde_json::json!({
                "criteria": criteria,
                "count": matches.len(),
                "students": matches,
            });
            Ok(serde_json::to_string_pretty(&output)?)
        }
    }
}

/// JSON view of a student, including the derived average.
fn student_json(student: &Student) -> serde_json::Value {
    serde_json::json!({
        "id": student.id(),
        "name": student.name(),
        "grades": student.grades(),
        "average": student.is_graded().then(|| student.average()),
    })
}
