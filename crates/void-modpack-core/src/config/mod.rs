//! Configuration and path detection

mod paths;

pub use paths::*;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name suffix that marks a mod archive
pub const ARCHIVE_SUFFIX: &str = ".jar";

/// Name of the mods folder inside a Minecraft installation
pub const MODS_DIR_NAME: &str = "mods";

/// Runtime configuration.
///
/// Nothing here is written to disk: each process starts from detection or
/// from an explicitly supplied directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Minecraft installation root (parent of `mods`)
    pub minecraft_dir: Option<PathBuf>,
}

impl Config {
    /// Create a new config with an auto-detected Minecraft directory
    pub fn auto_detect() -> Self {
        Self {
            minecraft_dir: detect_minecraft_dir(),
        }
    }

    /// Create a config pointing at an explicit Minecraft directory
    pub fn with_minecraft_dir(path: impl Into<PathBuf>) -> Self {
        Self {
            minecraft_dir: Some(path.into()),
        }
    }

    /// Get the mods folder path
    pub fn mods_path(&self) -> Option<PathBuf> {
        self.minecraft_dir.as_deref().map(mods_dir_of)
    }
}

/// The mods folder for a given installation root
pub fn mods_dir_of(root: &Path) -> PathBuf {
    root.join(MODS_DIR_NAME)
}

/// Whether a file name carries the mod archive suffix
pub fn is_mod_archive(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(ARCHIVE_SUFFIX))
        .unwrap_or(false)
}
