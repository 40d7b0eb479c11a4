//! vramfit binary entry point.

use anyhow::Result;
use clap::Parser;
use vramfit::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.init_tracing();
    cli.run()
}
