use std::path::Path;

use console::style;
use miette::Result;
use tera::Context;

use pageset::config::load_config;
use pageset::error::PagesetError;
use pageset::{Collection, DirSource, FunctionRegistry};

pub fn run(
    page: String,
    dir: String,
    data: Option<String>,
    output: Option<String>,
    verbose: bool,
) -> Result<()> {
    let project_dir = Path::new(&dir);
    let config = load_config(project_dir)?;
    let source = DirSource::new(project_dir);
    let collection =
        Collection::build_with_layout(&source, &FunctionRegistry::new(), &config.layout)?;

    if verbose {
        eprintln!(
            "{} {} ({} page{})",
            style("Loaded").bold(),
            style(config.layout.base_path()).cyan(),
            collection.len(),
            if collection.len() == 1 { "" } else { "s" }
        );
        for name in collection.page_names() {
            let marker = if name == page { "*" } else { " " };
            eprintln!("  {} {}", style(marker).green(), name);
        }
    }

    let context = match &data {
        Some(path) => load_data(path)?,
        None => Context::new(),
    };

    match output {
        Some(out) => {
            // Render before touching the file so a failure leaves no empty file.
            let rendered = collection.render_to_string(&page, &context)?;
            std::fs::write(&out, rendered).map_err(|e| PagesetError::Io {
                context: format!("writing {out}"),
                source: e,
            })?;
            eprintln!(
                "{} Rendered {} to {}",
                style("✓").green().bold(),
                style(&page).cyan(),
                style(&out).cyan()
            );
        }
        None => {
            let stdout = std::io::stdout();
            collection.render(&mut stdout.lock(), &page, &context)?;
        }
    }

    Ok(())
}

fn load_data(path: &str) -> Result<Context> {
    let content = std::fs::read_to_string(path).map_err(|e| PagesetError::Io {
        context: format!("reading {path}"),
        source: e,
    })?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| PagesetError::DataParse {
            path: path.to_string(),
            source: e,
        })?;
    let context =
        Context::from_value(value).map_err(|e| PagesetError::InvalidData { source: e })?;
    Ok(context)
}
