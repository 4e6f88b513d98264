use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{normalize, TemplateSource};
use crate::error::{PagesetError, Result};

/// A template store backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = normalize(path);
        if path.is_empty() {
            self.root.clone()
        } else {
            self.root.join(path)
        }
    }
}

impl TemplateSource for DirSource {
    fn is_file(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }

    fn list_files(&self, dir: &str) -> Result<Vec<String>> {
        let dir_path = self.resolve(dir);
        if !dir_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&dir_path).min_depth(1).follow_links(true) {
            let entry = entry.map_err(|e| PagesetError::Io {
                context: format!("walking {}", dir_path.display()),
                source: e.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel_path = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or(entry.path());
            files.push(slash_path(rel_path));
        }
        Ok(files)
    }

    fn read_to_string(&self, path: &str) -> Result<String> {
        let full_path = self.resolve(path);
        std::fs::read_to_string(&full_path).map_err(|e| PagesetError::Io {
            context: format!("reading {}", full_path.display()),
            source: e,
        })
    }
}

fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
