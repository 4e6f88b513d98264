#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PagesetError {
    #[error("Base layout not found at {path}")]
    #[diagnostic(help("Every template tree needs a base layout, e.g. templates/base.html"))]
    BaseLayoutMissing { path: String },

    #[error("No pages found matching {pattern}")]
    #[diagnostic(help("Add at least one page under the pages directory"))]
    NoPages { pattern: String },

    #[error("Glob pattern error: {pattern}")]
    #[diagnostic(help("Check the layout's directory names and extension"))]
    GlobPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to parse templates for page '{page}'")]
    #[diagnostic(help("Check the Tera syntax of the base layout, partials and this page"))]
    Parse {
        page: String,
        #[source]
        source: tera::Error,
    },

    #[error("Page '{page}' does not extend the base layout {base}")]
    #[diagnostic(help("Start the page with {{% extends \"{base}\" %}}"))]
    PageNotExtendingBase { page: String, base: String },

    #[error("The template {page} does not exist")]
    PageNotFound { page: String },

    #[error("Failed to render page '{page}'")]
    #[diagnostic(help("Check that the data supplies every value the page uses"))]
    Render {
        page: String,
        #[source]
        source: tera::Error,
    },

    #[error("Render data must serialize to a map")]
    InvalidData {
        #[source]
        source: tera::Error,
    },

    #[error("Failed to parse render data from {path}")]
    #[diagnostic(help("Render data must be a JSON object"))]
    DataParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write rendered page '{page}'")]
    Write {
        page: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Template file not found: {path}")]
    SourceFileMissing { path: String },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse pageset.toml")]
    #[diagnostic(help("Check the TOML syntax in your pageset.toml file"))]
    ConfigParse {
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid layout: {reason}")]
    ConfigInvalid { reason: String },
}

pub type Result<T> = std::result::Result<T, PagesetError>;
