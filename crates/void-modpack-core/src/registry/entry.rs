//! A single mod entry

use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// A mod archive tracked by the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModEntry {
    /// Location of the archive on disk (lookup key)
    pub path: PathBuf,
    /// Whether the archive is included in the next sync
    pub enabled: bool,
}

impl ModEntry {
    /// Create a new enabled entry
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            enabled: true,
        }
    }

    /// File name the archive gets in the mods folder
    pub fn file_name(&self) -> Option<&OsStr> {
        self.path.file_name()
    }

    /// File name for display purposes
    pub fn display_name(&self) -> String {
        self.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Check whether this entry refers to `path`
    pub fn matches(&self, path: &Path) -> bool {
        self.path == path
    }
}
