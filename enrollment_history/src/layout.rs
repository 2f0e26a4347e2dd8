use log::debug;

use crate::config::{Cell, ExtractionRules, UNKNOWN};
use crate::grid::Grid;

pub(crate) const ID_LABEL: &str = "student id";
const COURSE_TITLE_LABEL: &str = "Course Title";
const TEACHER_LABEL: &str = "Teacher";

/// Course and teacher context, read from label cells with the value just below.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MetadataBlock {
    pub course_title: String,
    pub teacher_name: String,
}

impl Default for MetadataBlock {
    fn default() -> Self {
        MetadataBlock {
            course_title: UNKNOWN.to_string(),
            teacher_name: UNKNOWN.to_string(),
        }
    }
}

/// What the layout locator found in the leading rows of a file.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Layout {
    /// 0 when no header row was found.
    pub header_row: usize,
    pub header_found: bool,
    pub metadata: MetadataBlock,
}

/// True if one of the cells is exactly the identity column label, ignoring case
/// and surrounding whitespace.
pub fn is_header_row(row: &[Cell]) -> bool {
    row.iter()
        .any(|c| c.normalized().as_deref() == Some(ID_LABEL))
}

/// Scans the leading rows of a grid for the header row and the metadata labels.
///
/// The last matching header row wins. A label only picks up the value below it
/// if that row is still inside the scanned window, and later labels override
/// earlier ones.
pub fn locate_layout(grid: &Grid, rules: &ExtractionRules) -> Layout {
    let window = grid.num_rows().min(rules.header_scan_rows);
    let mut layout = Layout::default();

    for idx in 0..window {
        let row = grid.row(idx);
        if is_header_row(row) {
            layout.header_row = idx;
            layout.header_found = true;
        }

        for (col, cell) in row.iter().enumerate() {
            let raw = match cell.text() {
                Some(s) => s,
                None => continue,
            };
            if idx + 1 >= window {
                continue;
            }
            let below = grid.get(idx + 1, col).trimmed();
            if raw.contains(COURSE_TITLE_LABEL) {
                if let Some(v) = below {
                    layout.metadata.course_title = v.to_string();
                }
            }
            if raw.contains(TEACHER_LABEL) {
                if let Some(v) = below {
                    layout.metadata.teacher_name = v.to_string();
                }
            }
        }
    }

    if !layout.header_found {
        debug!("locate_layout: no header row in the first {} rows", window);
    }
    debug!("locate_layout: {:?}", layout);
    layout
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ExtractionRules {
        ExtractionRules::DEFAULT_RULES
    }

    #[test]
    fn finds_header_and_metadata() {
        let g = Grid::from_text_rows(&[
            &["Course Title", "", "Teacher"],
            &["Band 7", "", "Mr. Gray"],
            &[],
            &["Student ID", "Student Name", "GR"],
            &["S00123", "Jane Doe", "7"],
        ]);
        let l = locate_layout(&g, &rules());
        assert_eq!(l.header_row, 3);
        assert!(l.header_found);
        assert_eq!(l.metadata.course_title, "Band 7");
        assert_eq!(l.metadata.teacher_name, "Mr. Gray");
    }

    #[test]
    fn header_match_ignores_case_and_last_wins() {
        let g = Grid::from_text_rows(&[
            &["STUDENT ID "],
            &["x"],
            &["  student id", "name"],
        ]);
        let l = locate_layout(&g, &rules());
        assert_eq!(l.header_row, 2);
    }

    #[test]
    fn header_label_must_match_whole_cell() {
        let g = Grid::from_text_rows(&[&["Student IDs"], &["Student ID number"]]);
        let l = locate_layout(&g, &rules());
        assert!(!l.header_found);
        assert_eq!(l.header_row, 0);
    }

    #[test]
    fn later_metadata_overrides_and_absent_is_ignored() {
        let g = Grid::from_text_rows(&[
            &["Course Title:"],
            &["Choir"],
            &["Course Title"],
            &["Advanced Choir"],
            &["Course Title"],
            &[""],
        ]);
        let l = locate_layout(&g, &rules());
        assert_eq!(l.metadata.course_title, "Advanced Choir");
        assert_eq!(l.metadata.teacher_name, UNKNOWN);
    }

    #[test]
    fn window_limits_the_scan() {
        let mut rows: Vec<Vec<Cell>> = vec![vec![]; 19];
        rows.push(vec![Cell::from("Teacher")]);
        rows.push(vec![Cell::from("Ms. Mosley")]);
        rows.push(vec![Cell::from("Student ID")]);
        let l = locate_layout(&Grid::new(rows), &rules());
        // The label sits on the last scanned row, its value is outside the window.
        assert_eq!(l.metadata.teacher_name, UNKNOWN);
        assert!(!l.header_found);
    }

    #[test]
    fn empty_grid_gives_defaults() {
        let l = locate_layout(&Grid::default(), &rules());
        assert_eq!(l, Layout::default());
        assert_eq!(l.metadata.course_title, UNKNOWN);
    }
}
