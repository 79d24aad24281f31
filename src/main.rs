//! CLI entry point for the terrain map generator

use clap::Parser;
use tilecollapse::io::cli::{Cli, MapGenerator};

fn main() -> tilecollapse::Result<()> {
    let cli = Cli::parse();
    let mut generator = MapGenerator::new(cli);
    generator.process()
}
