use log::debug;

use crate::columns::{effective_indices, ColumnMap, FieldIndices};
use crate::config::{CandidateRecord, Cell, ExtractionRules, NOT_AVAILABLE, UNKNOWN};
use crate::grid::{cell_at, Grid};
use crate::layout::{Layout, MetadataBlock};

const COURSE_TITLE_LABEL: &str = "Course Title";

/// Text of a cell, trimmed, treating empty and "nan" values as missing.
fn present(cell: &Cell) -> Option<&str> {
    match cell.trimmed() {
        Some(s) if !s.is_empty() && s != "nan" => Some(s),
        _ => None,
    }
}

/// Cleans up an identity cell. Numeric id columns come back as floats, hence
/// the ".0" suffix.
pub fn normalize_identity(cell: &Cell, rules: &ExtractionRules) -> Option<String> {
    let raw = present(cell)?;
    let id = raw.strip_suffix(".0").unwrap_or(raw);
    if id.chars().count() <= rules.max_rejected_identity_len {
        return None;
    }
    Some(id.to_string())
}

/// Reads one data row. Returns None when the row does not hold a usable identity.
pub fn extract_record(
    row: &[Cell],
    indices: &FieldIndices,
    current_course: &str,
    rules: &ExtractionRules,
) -> Option<CandidateRecord> {
    let identity = normalize_identity(cell_at(row, indices.id), rules)?;

    let display_name = cell_at(row, indices.name)
        .trimmed()
        .unwrap_or(UNKNOWN)
        .to_string();

    let grade = present(cell_at(row, indices.grade))
        .unwrap_or(NOT_AVAILABLE)
        .to_string();

    let row_course = indices
        .course
        .and_then(|idx| present(cell_at(row, idx)))
        .filter(|s| !s.eq_ignore_ascii_case(UNKNOWN));
    let course = row_course.unwrap_or(current_course).to_string();

    Some(CandidateRecord {
        identity,
        display_name,
        grade,
        course,
    })
}

/// The state carried from one row to the next while reading a file.
#[derive(Debug, Clone)]
pub struct SheetScan {
    pub column_map: Option<ColumnMap>,
    pub metadata: MetadataBlock,
    rules: ExtractionRules,
}

impl SheetScan {
    pub fn new(layout: &Layout, rules: &ExtractionRules) -> SheetScan {
        SheetScan {
            column_map: None,
            metadata: layout.metadata.clone(),
            rules: *rules,
        }
    }

    /// Picks up a "Course Title" label appearing in the body of the file.
    fn update_course_title(&mut self, grid: &Grid, idx: usize) {
        let row = grid.row(idx);
        for (col, cell) in row.iter().enumerate() {
            if cell.trimmed() != Some(COURSE_TITLE_LABEL) {
                continue;
            }
            if let Some(title) = present(grid.get(idx + 1, col)) {
                debug!("SheetScan: row {}: course title {:?}", idx, title);
                self.metadata.course_title = title.to_string();
            }
        }
    }

    /// Processes one row. Returns a record for data rows with a valid identity.
    pub fn process_row(&mut self, grid: &Grid, idx: usize) -> Option<CandidateRecord> {
        self.update_course_title(grid, idx);

        let row = grid.row(idx);
        if let Some(map) = ColumnMap::from_header(row) {
            debug!("SheetScan: row {}: new header {:?}", idx, map);
            self.column_map = Some(map);
            return None;
        }

        let map = self.column_map.as_ref()?;
        let indices = effective_indices(map, row, &self.rules);
        extract_record(row, &indices, &self.metadata.course_title, &self.rules)
    }

    pub fn scan(&mut self, grid: &Grid) -> Vec<CandidateRecord> {
        let mut res: Vec<CandidateRecord> = Vec::new();
        for idx in 0..grid.num_rows() {
            if let Some(rec) = self.process_row(grid, idx) {
                res.push(rec);
            }
        }
        res
    }
}

/// Extracts all the candidate records of a grid, starting from the metadata
/// found by the layout locator.
pub fn extract_records(grid: &Grid, layout: &Layout, rules: &ExtractionRules) -> Vec<CandidateRecord> {
    let res = SheetScan::new(layout, rules).scan(grid);
    debug!(
        "extract_records: {} candidate records out of {} rows",
        res.len(),
        grid.num_rows()
    );
    res
}
