use serde::{Deserialize, Serialize};

use crate::error::{PagesetError, Result};

/// Where the base layout, partials and pages live inside a template source.
///
/// All paths are slash-separated and relative to the source root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Layout {
    /// Directory holding the whole tree (default: "templates"). May be empty.
    #[serde(default = "default_root")]
    pub root: String,

    /// File stem of the base layout (default: "base").
    #[serde(default = "default_base")]
    pub base: String,

    /// Directory of shared partials, relative to `root` (default: "partials").
    #[serde(default = "default_partials")]
    pub partials: String,

    /// Directory of pages, relative to `root` (default: "pages").
    #[serde(default = "default_pages")]
    pub pages: String,

    /// Template file extension without the leading dot (default: "html").
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_root() -> String {
    "templates".to_string()
}

fn default_base() -> String {
    "base".to_string()
}

fn default_partials() -> String {
    "partials".to_string()
}

fn default_pages() -> String {
    "pages".to_string()
}

fn default_extension() -> String {
    "html".to_string()
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            root: default_root(),
            base: default_base(),
            partials: default_partials(),
            pages: default_pages(),
            extension: default_extension(),
        }
    }
}

impl Layout {
    /// Validate the layout for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.extension.is_empty() {
            return Err(invalid("extension must not be empty"));
        }
        if self.extension.starts_with('.') {
            return Err(invalid("extension must not start with '.'"));
        }
        if self.base.is_empty() || self.base.contains('/') {
            return Err(invalid("base must be a plain file stem"));
        }
        if self.pages.is_empty() {
            return Err(invalid("pages directory must not be empty"));
        }
        if self.partials.is_empty() {
            return Err(invalid("partials directory must not be empty"));
        }
        if self.pages == self.partials {
            return Err(invalid("pages and partials must be different directories"));
        }
        Ok(())
    }

    /// Path of the base layout, e.g. `templates/base.html`.
    pub fn base_path(&self) -> String {
        self.under_root(&format!("{}.{}", self.base, self.extension))
    }

    /// Glob matching the partials, e.g. `templates/partials/*.html`.
    pub fn partials_pattern(&self) -> String {
        self.dir_pattern(&self.partials)
    }

    /// Glob matching the pages, e.g. `templates/pages/*.html`.
    pub fn pages_pattern(&self) -> String {
        self.dir_pattern(&self.pages)
    }

    pub fn partials_dir(&self) -> String {
        self.under_root(&self.partials)
    }

    pub fn pages_dir(&self) -> String {
        self.under_root(&self.pages)
    }

    /// Name a file is registered under inside a composed unit: its path with
    /// the root stripped, so pages can `{% extends "base.html" %}` and
    /// `{% include "partials/nav.html" %}`.
    pub fn template_name<'a>(&self, path: &'a str) -> &'a str {
        let root = self.root.trim_end_matches('/');
        if root.is_empty() {
            return path;
        }
        path.strip_prefix(root)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(path)
    }

    fn dir_pattern(&self, dir: &str) -> String {
        let dir = dir.trim_end_matches('/');
        let relative = if dir.is_empty() {
            format!("*.{}", self.extension)
        } else {
            format!("{dir}/*.{}", self.extension)
        };
        self.under_root(&relative)
    }

    fn under_root(&self, relative: &str) -> String {
        let root = self.root.trim_end_matches('/');
        if root.is_empty() {
            relative.trim_end_matches('/').to_string()
        } else if relative.is_empty() {
            root.to_string()
        } else {
            format!("{root}/{relative}")
        }
    }
}

fn invalid(reason: &str) -> PagesetError {
    PagesetError::ConfigInvalid {
        reason: reason.to_string(),
    }
}
