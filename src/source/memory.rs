use std::collections::BTreeMap;

use super::{normalize, TemplateSource};
use crate::error::{PagesetError, Result};

/// An in-memory template store, e.g. filled from `include_str!` at compile time.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl AsRef<str>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&mut self, path: impl AsRef<str>, contents: impl Into<String>) {
        self.files
            .insert(normalize(path.as_ref()).to_string(), contents.into());
    }
}

impl<P, C> FromIterator<(P, C)> for MemorySource
where
    P: AsRef<str>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let mut source = MemorySource::new();
        for (path, contents) in iter {
            source.insert(path, contents);
        }
        source
    }
}

impl TemplateSource for MemorySource {
    fn is_file(&self, path: &str) -> bool {
        self.files.contains_key(normalize(path))
    }

    fn list_files(&self, dir: &str) -> Result<Vec<String>> {
        let dir = normalize(dir);
        if dir.is_empty() {
            return Ok(self.files.keys().cloned().collect());
        }
        let prefix = format!("{dir}/");
        Ok(self
            .files
            .keys()
            .filter(|path| path.starts_with(&prefix))
            .cloned()
            .collect())
    }

    fn read_to_string(&self, path: &str) -> Result<String> {
        self.files
            .get(normalize(path))
            .cloned()
            .ok_or_else(|| PagesetError::SourceFileMissing {
                path: path.to_string(),
            })
    }
}
