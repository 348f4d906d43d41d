//! Path and filter utilities

use glob::Pattern;
use std::path::Path;

use crate::errors::Error;

/// Check if a file should be excluded based on OS-specific hidden files
pub fn is_os_hidden_file(path: &Path) -> bool {
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        match name {
            // macOS
            ".DS_Store" | ".AppleDouble" | ".LSOverride" => true,
            // Windows
            "Thumbs.db" | "ehthumbs.db" | "Desktop.ini" => true,
            // Linux
            ".directory" => true,
            _ => {
                // macOS resource fork files start with ._
                name.starts_with("._")
            }
        }
    } else {
        false
    }
}

/// Compiled `--exclude` globs, checked against a document's file name and its full path.
#[derive(Debug, Default, Clone)]
pub struct ExcludeSet {
    patterns: Vec<Pattern>,
}

impl ExcludeSet {
    /// Compile every pattern once. A malformed pattern is a [`Error::Discovery`] naming it.
    pub fn new(patterns: &[String]) -> Result<Self, Error> {
        let patterns = patterns
            .iter()
            .map(|p| Pattern::new(p).map_err(|e| Error::discovery(p, format!("bad exclude: {e}"))))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn matches(&self, path: &Path) -> bool {
        let name = path.file_name().and_then(|n| n.to_str());
        self.patterns.iter().any(|pattern| {
            name.is_some_and(|n| pattern.matches(n)) || pattern.matches_path(path)
        })
    }
}

/// Returns true if a discovered path should become a document (not hidden, not excluded).
pub fn should_include_document(path: &Path, exclude: &ExcludeSet) -> bool {
    !is_os_hidden_file(path) && (exclude.is_empty() || !exclude.matches(path))
}
