// Primitives for reading delimited text files.

use snafu::prelude::*;

use crate::dashboard::{io_common::simplify_file_name, *};

/// Reads a delimited file as a grid. There is no header handling: the first
/// line is row 0. Lines may have different numbers of fields.
pub fn read_delimited(path: &Path, delimiter: u8) -> DashboardResult<Grid> {
    let path_s = path.display().to_string();
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .context(OpeningCsvSnafu {
            path: path_s.clone(),
        })?;

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu {
            path: path_s.clone(),
            lineno,
        })?;
        let row: Vec<Cell> = line
            .iter()
            .map(|s| {
                if s.trim().is_empty() {
                    Cell::Absent
                } else {
                    Cell::Text(s.to_string())
                }
            })
            .collect();
        rows.push(row);
    }
    debug!(
        "read_delimited: {}: {} rows",
        simplify_file_name(path),
        rows.len()
    );
    Ok(Grid::new(rows))
}
