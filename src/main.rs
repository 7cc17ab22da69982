//! CLI entry point for the string art generator

use clap::Parser;
use log::LevelFilter;
use strandweave::io::cli::{Cli, FileProcessor};

fn main() -> strandweave::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let mut processor = FileProcessor::new(cli);
    processor.process()
}
