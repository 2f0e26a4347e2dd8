use calamine::{open_workbook_auto, DataType, Range, Reader};
use snafu::prelude::*;

use crate::dashboard::{io_common::simplify_file_name, *};

/// Renders a number the way it reads in the sheet: xlsx stores every number
/// as a float, so integral values lose their decimal part ("7", "4021056").
fn float_text(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        format!("{}", f)
    }
}

/// Converts a spreadsheet value to a grid cell.
pub fn cell_from_calamine(dt: &DataType) -> Cell {
    match dt {
        DataType::String(s) if s.trim().is_empty() => Cell::Absent,
        DataType::String(s) => Cell::Text(s.clone()),
        DataType::Float(f) => Cell::Text(float_text(*f)),
        DataType::Int(i) => Cell::Text(i.to_string()),
        DataType::Bool(true) => Cell::Text("True".to_string()),
        DataType::Bool(false) => Cell::Text("False".to_string()),
        DataType::DateTime(f) => Cell::Text(format!("{:?}", f)),
        DataType::Empty => Cell::Absent,
        // Formula errors (#N/A, #REF!, ...) carry no value.
        DataType::Error(_) => Cell::Absent,
        #[allow(unreachable_patterns)]
        _ => Cell::Absent,
    }
}

/// Converts a worksheet range into a grid whose coordinates are the sheet
/// coordinates: the range may start after the first rows or columns.
pub fn range_to_grid(wrange: &Range<DataType>) -> Grid {
    let (start_row, start_col) = wrange.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row as usize];
    for row in wrange.rows() {
        let mut cells: Vec<Cell> = vec![Cell::Absent; start_col as usize];
        cells.extend(row.iter().map(cell_from_calamine));
        rows.push(cells);
    }
    Grid::new(rows)
}

/// Reads a workbook (xlsx, xlsm, xlsb, xls or ods) as a grid.
///
/// The named worksheet is used when provided, the first one otherwise.
pub fn read_workbook(path: &Path, worksheet_name_o: Option<&str>) -> DashboardResult<Grid> {
    let path_s = path.display().to_string();
    debug!(
        "read_workbook: path: {:?} worksheet: {:?}",
        &path_s, &worksheet_name_o
    );
    let mut workbook = open_workbook_auto(path).context(OpeningWorkbookSnafu {
        path: path_s.clone(),
    })?;

    let wrange = if let Some(worksheet_name) = worksheet_name_o {
        workbook
            .worksheet_range(worksheet_name)
            .context(MissingWorksheetSnafu {
                path: path_s.clone(),
                name: worksheet_name.to_string(),
            })?
            .context(OpeningWorkbookSnafu {
                path: path_s.clone(),
            })?
    } else {
        workbook
            .worksheet_range_at(0)
            .context(EmptyWorkbookSnafu {
                path: path_s.clone(),
            })?
            .context(OpeningWorkbookSnafu {
                path: path_s.clone(),
            })?
    };

    let grid = range_to_grid(&wrange);
    debug!(
        "read_workbook: {}: {} rows",
        simplify_file_name(path),
        grid.num_rows()
    );
    Ok(grid)
}
