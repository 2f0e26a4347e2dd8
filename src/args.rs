use clap::Parser;

/// This program consolidates school enrollment spreadsheets into per-student histories.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON configuration file. See the manual of the enrollment_history
    /// crate for all the options.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (directory path) The root directory that contains one folder per school. Setting this option
    /// overrides the directory that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (file path or 'stdout') If specified, the dashboard data will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference dashboard file in JSON format. If provided, enrolldash will
    /// check that the consolidated output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
