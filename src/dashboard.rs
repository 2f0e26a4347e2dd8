use log::{debug, info, warn};

use enrollment_history::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value as JSValue;

pub mod config_reader;
pub mod discovery;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;
pub mod summary;

use crate::dashboard::config_reader::*;
use crate::dashboard::discovery::discover_schools;
use crate::dashboard::io_common::year_label;
use crate::dashboard::summary::{build_dashboard_js, compare_with_reference, program_result_to_json};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DashboardError {
    #[snafu(display("Error opening workbook {path}"))]
    OpeningWorkbook {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("The workbook {path} has no worksheet"))]
    EmptyWorkbook { path: String },
    #[snafu(display("Could not find worksheet {name} in {path}"))]
    MissingWorksheet { path: String, name: String },
    #[snafu(display("Error opening delimited file {path}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error listing directory {path}"))]
    ReadingDirectory {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing output {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The configuration file {path} has no parent directory"))]
    MissingParentDir { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type DashboardResult<T> = Result<T, DashboardError>;

/// Loads one source file as a grid, choosing the reader from the extension.
pub fn load_grid(path: &Path, config: &DashboardConfig) -> DashboardResult<Grid> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "csv" | "txt" => io_csv::read_delimited(path, b','),
        "tsv" => io_csv::read_delimited(path, b'\t'),
        _ => io_excel::read_workbook(path, config.excel_worksheet_name.as_deref()),
    }
}

/// Runs the layout locator on a file. Unreadable files give the default layout.
pub fn locate_file(path: &Path, config: &DashboardConfig) -> Layout {
    match load_grid(path, config) {
        Ok(grid) => locate_layout(&grid, &config.rules()),
        Err(e) => {
            warn!("Error reading {} to find header: {}", path.display(), e);
            Layout::default()
        }
    }
}

/// Reads all the year files of one program and consolidates them.
///
/// Files are processed in sorted order. A file that cannot be read is logged and
/// skipped, but its year stays in the program.
pub fn process_program(files: &[PathBuf], config: &DashboardConfig) -> ProgramResult {
    let mut sorted_files: Vec<PathBuf> = files.to_vec();
    sorted_files.sort();

    let grids = sorted_files.iter().map(|path| {
        let year = year_label(path);
        info!("  Reading {} ({})", year, path.display());
        let grid_o = match load_grid(path, config) {
            Ok(grid) => Some(grid),
            Err(e) => {
                warn!("    Error processing {}: {}", path.display(), e);
                None
            }
        };
        (year, grid_o)
    });
    consolidate_program(grids, &config.rules())
}

/// Builds the "schools" section of the dashboard.
pub fn build_schools_js(config: &DashboardConfig) -> DashboardResult<JSValue> {
    let schools = discover_schools(config)?;
    let mut schools_js = serde_json::Map::new();
    for school in schools.iter() {
        info!("Processing School: {}", school.name);
        let mut programs_js = serde_json::Map::new();
        for (program, files) in school.programs.iter() {
            info!(" Processing Program: {} ({} files)", program, files.len());
            let res = process_program(files, config);
            programs_js.insert(program.clone(), program_result_to_json(&res));
        }
        schools_js.insert(school.name.clone(), JSValue::Object(programs_js));
    }
    Ok(JSValue::Object(schools_js))
}

fn write_output(out: &str, contents: &str) -> DashboardResult<()> {
    if out == "stdout" {
        println!("{}", contents);
        return Ok(());
    }
    fs::write(out, contents).context(WritingOutputSnafu {
        path: out.to_string(),
    })?;
    info!("Dashboard data generated: {}", out);
    Ok(())
}

pub fn run_dashboard(
    config_path: Option<String>,
    root_override: Option<String>,
    out_override: Option<String>,
    reference_path: Option<String>,
) -> DashboardResult<()> {
    let mut config = match config_path {
        Some(p) => read_config(&p)?,
        None => DashboardConfig::default(),
    };
    if let Some(root) = root_override {
        config.root_directory = Some(root);
    }
    if let Some(out) = out_override {
        config.output_file = Some(out);
    }
    debug!("config: {:?}", config);

    info!("Starting Dashboard Data Generation...");
    let schools_js = build_schools_js(&config)?;
    let dashboard_js = build_dashboard_js(schools_js.clone());
    let pretty_js = serde_json::to_string_pretty(&dashboard_js).context(ParsingJsonSnafu {})?;

    let out = config.output_path().display().to_string();
    write_output(&out, &pretty_js)?;

    // The reference dashboard, if provided for comparison
    if let Some(reference_p) = reference_path {
        compare_with_reference(&schools_js, &reference_p)?;
    }
    Ok(())
}
