use clap::Parser;
use log::{info, LevelFilter};
use snafu::ErrorCompat;

mod args;
mod dashboard;

use crate::args::Args;

fn main() {
    let args = Args::parse();

    // --verbose forces debug output, otherwise RUST_LOG applies on top of info.
    if args.verbose {
        env_logger::Builder::new()
            .filter_level(LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::new()
            .filter_level(LevelFilter::Info)
            .parse_default_env()
            .init();
    }
    info!("args: {:?}", args);

    let res = dashboard::run_dashboard(
        args.config.clone(),
        args.input.clone(),
        args.out.clone(),
        args.reference.clone(),
    );

    if let Err(e) = res {
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
