//! Read-only template stores that a [`Collection`](crate::Collection) is built from.
//!
//! Paths are always slash-separated and relative to the store's root,
//! regardless of platform.

mod dir;
mod memory;

use globset::GlobBuilder;

use crate::error::{PagesetError, Result};

pub use dir::DirSource;
pub use memory::MemorySource;

/// A read-only hierarchical file store.
pub trait TemplateSource {
    /// Whether `path` names a file in the store.
    fn is_file(&self, path: &str) -> bool;

    /// Every file below `dir`, recursively. A missing directory yields no files.
    fn list_files(&self, dir: &str) -> Result<Vec<String>>;

    fn read_to_string(&self, path: &str) -> Result<String>;
}

/// Match `pattern` against the files of `source`, sorted by path.
///
/// `*` never crosses a `/`, so `templates/pages/*.html` only matches direct
/// children of `templates/pages`.
pub fn glob<S>(source: &S, pattern: &str) -> Result<Vec<String>>
where
    S: TemplateSource + ?Sized,
{
    let matcher = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| PagesetError::GlobPattern {
            pattern: pattern.to_string(),
            source: e,
        })?
        .compile_matcher();

    let mut matches: Vec<String> = source
        .list_files(&literal_prefix(pattern))?
        .into_iter()
        .filter(|path| matcher.is_match(path))
        .collect();
    matches.sort();
    Ok(matches)
}

/// The leading directories of a pattern that contain no glob syntax.
fn literal_prefix(pattern: &str) -> String {
    let mut parts: Vec<&str> = pattern.split('/').collect();
    parts.pop();
    parts
        .into_iter()
        .take_while(|part| !part.contains(['*', '?', '[', '{', '\\']))
        .collect::<Vec<_>>()
        .join("/")
}

pub(crate) fn normalize(path: &str) -> &str {
    path.trim_start_matches("./").trim_matches('/')
}
