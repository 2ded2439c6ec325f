//! CLI entry point for image quilting texture synthesis

use clap::Parser;
use seamquilt::io::cli::{Cli, QuiltProcessor};

fn main() -> seamquilt::Result<()> {
    let cli = Cli::parse();
    QuiltProcessor::new(cli).process().map(|_| ())
}
