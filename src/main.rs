mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> miette::Result<()> {
    match Cli::parse().command {
        Commands::Render {
            page,
            dir,
            data,
            output,
            verbose,
        } => commands::render::run(page, dir, data, output, verbose),
        Commands::List { dir } => commands::list::run(dir),
        Commands::Check { dir } => commands::check::run(dir),
    }
}
