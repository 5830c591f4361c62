//! Resolve command-line inputs to diagram files

use crate::config::FilesConfig;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum FilesError {
    #[error("Invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },
}

/// Include/exclude filter built from [`FilesConfig`]
pub struct FileFilter {
    include: GlobSet,
    exclude: GlobSet,
}

impl FileFilter {
    pub fn new(config: &FilesConfig) -> Result<Self, FilesError> {
        Ok(Self {
            include: build_set(&config.include)?,
            exclude: build_set(&config.exclude)?,
        })
    }

    /// Whether a file found by walking a directory should be analyzed
    pub fn matches(&self, path: &Path) -> bool {
        self.include.is_match(path) && !self.exclude.is_match(path)
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        self.exclude.is_match(path)
    }
}

fn build_set(patterns: &[String]) -> Result<GlobSet, FilesError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| FilesError::Pattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| FilesError::Pattern {
        pattern: patterns.join(", "),
        message: e.to_string(),
    })
}

/// Expand inputs into a sorted, de-duplicated list of files
///
/// Each input is a file, a directory (walked recursively and filtered by the
/// include/exclude patterns) or a glob pattern. Explicitly named files are
/// only subject to the exclude patterns.
pub fn collect_files(inputs: &[String], config: &FilesConfig) -> Result<Vec<PathBuf>, FilesError> {
    let filter = FileFilter::new(config)?;
    let mut files = BTreeSet::new();

    for input in inputs {
        let path = Path::new(input);
        if path.is_dir() {
            for entry in WalkDir::new(path)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                // Patterns apply below the walked directory
                let relative = entry.path().strip_prefix(path).unwrap_or(entry.path());
                if entry.file_type().is_file() && filter.matches(relative) {
                    files.insert(entry.into_path());
                }
            }
        } else if path.is_file() {
            if !filter.is_excluded(path) {
                files.insert(path.to_path_buf());
            }
        } else {
            let paths = glob::glob(input).map_err(|e| FilesError::Pattern {
                pattern: input.clone(),
                message: e.to_string(),
            })?;
            let before = files.len();
            for entry in paths.flatten() {
                if entry.is_file() && !filter.is_excluded(&entry) {
                    files.insert(entry);
                }
            }
            if files.len() == before {
                log::warn!("No files matched '{}'", input);
            }
        }
    }

    log::debug!("Collected {} files", files.len());
    Ok(files.into_iter().collect())
}
