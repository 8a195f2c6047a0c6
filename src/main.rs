use anyhow::Result;
use clap::Parser;

use division_outline::cli::{Cli, Commands};
use division_outline::commands::{self, fetch, render, search};

fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::init_logging(cli.verbose);
    match &cli.command {
        Commands::Render(args) => render::run(&cli, args),
        Commands::Fetch(args) => fetch::run(&cli, args),
        Commands::Search(args) => search::run(&cli, args),
    }
}
