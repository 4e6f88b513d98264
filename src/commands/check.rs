use std::path::Path;

use console::style;
use miette::Result;

use pageset::check::check_tree;
use pageset::config::load_config;
use pageset::{DirSource, FunctionRegistry};

pub fn run(dir: String) -> Result<()> {
    let project_dir = Path::new(&dir);

    println!(
        "{} {}",
        style("Checking templates at").bold(),
        style(project_dir.display()).cyan()
    );

    let config = load_config(project_dir)?;
    let result = check_tree(
        &DirSource::new(project_dir),
        &config.layout,
        &FunctionRegistry::new(),
    )?;

    println!("  Base: {}", result.base);
    println!("  Partials: {}", result.partials.len());
    println!("  Pages: {}", result.pages.len());

    if result.partials.is_empty() {
        println!(
            "\n{} no partials found under {}",
            style("warning:").yellow().bold(),
            config.layout.partials_dir()
        );
    }

    if !result.is_ok() {
        println!("\n{}", style("Errors:").red().bold());
        for e in &result.errors {
            println!("  {} {}", style("✗").red(), e);
        }
        println!(
            "\n{} {} of {} page(s) failed to compose",
            style("✗").red().bold(),
            result.errors.len(),
            result.pages.len()
        );
        std::process::exit(1);
    } else {
        println!("\n{} All pages compose!", style("✓").green().bold());
    }

    Ok(())
}
