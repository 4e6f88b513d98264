use std::path::Path;

use console::style;
use miette::Result;

use pageset::config::load_config;
use pageset::{Collection, DirSource, FunctionRegistry};

pub fn run(dir: String) -> Result<()> {
    let project_dir = Path::new(&dir);
    let config = load_config(project_dir)?;
    let collection = Collection::build_with_layout(
        &DirSource::new(project_dir),
        &FunctionRegistry::new(),
        &config.layout,
    )?;

    println!(
        "{} ({} page{})\n",
        style("Pages").bold(),
        collection.len(),
        if collection.len() == 1 { "" } else { "s" }
    );

    for name in collection.page_names() {
        println!("  {name}");
    }

    Ok(())
}
