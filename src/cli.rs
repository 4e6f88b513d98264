use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pageset",
    about = "Render pages composed from a base layout, partials and page templates",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a page to stdout or a file
    Render {
        /// Page file name, e.g. index.html
        page: String,

        /// Project directory containing templates/ and an optional pageset.toml
        #[arg(short, long, default_value = ".")]
        dir: String,

        /// JSON file whose top-level object becomes the render context
        #[arg(long, value_name = "FILE")]
        data: Option<String>,

        /// Write the page to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Print what the page was composed from
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the pages of a template tree
    List {
        /// Project directory (default: current directory)
        #[arg(short, long, default_value = ".")]
        dir: String,
    },

    /// Validate every page of a template tree
    Check {
        /// Project directory (default: current directory)
        #[arg(short, long, default_value = ".")]
        dir: String,
    },
}
