// ********* Input data structures ***********

use std::collections::{BTreeMap, BTreeSet};

/// Placeholder for a missing name, course or metadata value.
pub const UNKNOWN: &str = "Unknown";
/// Placeholder for a missing grade.
pub const NOT_AVAILABLE: &str = "N/A";
/// Course text of a year in which a known student has no record.
pub const NO_ENROLLMENT: &str = "No Enrollment";

/// A single position in a grid.
///
/// Loaders are expected to map empty cells, blank strings and spreadsheet
/// errors to `Absent`.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum Cell {
    Absent,
    Text(String),
}

/// The candidate extracted from one data row, before any merging.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CandidateRecord {
    pub identity: String,
    pub display_name: String,
    pub grade: String,
    pub course: String,
}

/// What is known about one student for one year.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct YearRecord {
    pub grade: String,
    pub courses: BTreeSet<String>,
}

impl YearRecord {
    pub fn new(grade: &str, course: &str) -> YearRecord {
        let mut courses = BTreeSet::new();
        if course != UNKNOWN {
            courses.insert(course.to_string());
        }
        YearRecord {
            grade: grade.to_string(),
            courses,
        }
    }

    /// Folds another observation of the same student and year into this record.
    ///
    /// A placeholder grade is replaced by a real one, never the other way around.
    pub fn absorb(&mut self, grade: &str, courses: &BTreeSet<String>) {
        if self.grade == NOT_AVAILABLE && grade != NOT_AVAILABLE {
            self.grade = grade.to_string();
        }
        for c in courses.iter() {
            if c != UNKNOWN {
                self.courses.insert(c.clone());
            }
        }
    }

    pub fn course_string(&self) -> String {
        if self.courses.is_empty() {
            UNKNOWN.to_string()
        } else {
            // BTreeSet iterates in lexicographic order.
            self.courses
                .iter()
                .cloned()
                .collect::<Vec<String>>()
                .join(", ")
        }
    }
}

// ******** Output data structures *********

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct HistoryEntry {
    pub grade: String,
    pub course: String,
}

impl HistoryEntry {
    pub fn no_enrollment() -> HistoryEntry {
        HistoryEntry {
            grade: NOT_AVAILABLE.to_string(),
            course: NO_ENROLLMENT.to_string(),
        }
    }

    pub fn is_enrolled(&self) -> bool {
        self.course != NO_ENROLLMENT
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct StudentEntity {
    pub identity: String,
    pub display_name: String,
    /// One entry per year of the program, keyed by year label.
    pub history: BTreeMap<String, HistoryEntry>,
    pub years_enrolled: usize,
}

/// The consolidated view of one program of one school.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ProgramResult {
    pub years: Vec<String>,
    pub students: Vec<StudentEntity>,
}

// ********* Configuration **********

/// The thresholds used by the layout heuristics.
///
/// They are empirical. In particular, a legitimate identifier of
/// `max_rejected_identity_len` characters or fewer is dropped, even on a row
/// that went through the offset correction.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ExtractionRules {
    /// How many leading rows the layout locator looks at.
    pub header_scan_rows: usize,
    /// Identities with at most this many characters are rejected. The same
    /// length marks an id cell as suspicious for the offset correction.
    pub max_rejected_identity_len: usize,
    /// The cell to the right of a suspicious id cell must be strictly longer
    /// than this for the row to be treated as shifted.
    pub shift_probe_min_len: usize,
}

impl ExtractionRules {
    pub const DEFAULT_RULES: ExtractionRules = ExtractionRules {
        header_scan_rows: 20,
        max_rejected_identity_len: 2,
        shift_probe_min_len: 5,
    };
}

impl Default for ExtractionRules {
    fn default() -> Self {
        ExtractionRules::DEFAULT_RULES
    }
}
