//! CLI entry point for the wave function collapse demo problems

use clap::Parser;
use wavegraph::io::cli::{Cli, DemoRunner};

fn main() -> wavegraph::Result<()> {
    let cli = Cli::parse();
    let runner = DemoRunner::new(cli);
    runner.run()
}
