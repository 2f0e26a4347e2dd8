mod config;
use log::{debug, info};

pub mod aggregate;
pub mod columns;
pub mod extract;
pub mod grid;
pub mod layout;
pub mod manual;
pub mod merge;

pub use crate::config::*;

pub use crate::aggregate::{aggregate_year, YearAggregator, YearBatch, YearEntry};
pub use crate::columns::{effective_indices, ColumnMap, FieldIndices};
pub use crate::extract::{extract_record, extract_records, SheetScan};
pub use crate::grid::Grid;
pub use crate::layout::{locate_layout, Layout, MetadataBlock};
pub use crate::merge::EntityMerger;

/// Reads the records of one year file that has already been loaded as a grid.
///
/// This runs the layout locator, then extracts and aggregates the records of
/// every table found in the grid. It never fails: a grid without a recognizable
/// header simply yields an empty batch.
pub fn read_year(grid: &Grid, rules: &ExtractionRules) -> (Layout, YearBatch) {
    let layout = locate_layout(grid, rules);
    if layout.header_found {
        debug!("read_year: header row at {}", layout.header_row);
    } else {
        info!("read_year: no header row found in the leading rows");
    }
    let candidates = extract_records(grid, &layout, rules);
    let batch = aggregate_year(&candidates);
    debug!(
        "read_year: {} candidates, {} students",
        candidates.len(),
        batch.len()
    );
    (layout, batch)
}

/// Runs the whole engine over the grids of one program.
///
/// Arguments:
/// * `grids` the year label and the loaded grid of each file, in file order.
///   A `None` grid stands for a file that could not be read: its year still
///   belongs to the program. The grids are pulled one at a time, so a lazy
///   iterator keeps a single file in memory.
/// * `rules` the layout thresholds
pub fn consolidate_program<I>(grids: I, rules: &ExtractionRules) -> ProgramResult
where
    I: IntoIterator<Item = (String, Option<Grid>)>,
{
    let mut merger = EntityMerger::new();
    for (year, grid_o) in grids {
        merger.register_year(&year);
        if let Some(grid) = grid_o {
            let (layout, batch) = read_year(&grid, rules);
            debug!(
                "consolidate_program: {}: course {:?}, teacher {:?}, {} students",
                year,
                layout.metadata.course_title,
                layout.metadata.teacher_name,
                batch.len()
            );
            merger.merge_batch(&year, &batch);
        }
    }
    merger.finish()
}
