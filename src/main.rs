use anyhow::Result;
use clap::Parser;

use mediasync::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
