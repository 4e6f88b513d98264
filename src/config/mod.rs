pub mod layout;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PagesetError, Result};

pub use layout::Layout;

pub const CONFIG_FILE: &str = "pageset.toml";

/// Root config structure deserialized from pageset.toml.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PagesetConfig {
    #[serde(default)]
    pub layout: Layout,
}

/// Load the pageset.toml in `dir`, falling back to defaults when there is none.
pub fn load_config(dir: &Path) -> Result<PagesetConfig> {
    let config_path = dir.join(CONFIG_FILE);

    if !config_path.exists() {
        return Ok(PagesetConfig::default());
    }

    let content = std::fs::read_to_string(&config_path).map_err(|e| PagesetError::Io {
        context: format!("reading {}", config_path.display()),
        source: e,
    })?;

    parse_config(&content)
}

/// Parse and validate pageset.toml contents.
pub fn parse_config(content: &str) -> Result<PagesetConfig> {
    let config: PagesetConfig =
        toml::from_str(content).map_err(|e| PagesetError::ConfigParse { source: e })?;

    config.layout.validate()?;

    Ok(config)
}
