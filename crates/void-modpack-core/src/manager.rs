//! Owner of the mod registry and the Minecraft directory

use std::path::{Path, PathBuf};

use crate::config::{detect_minecraft_dir, mods_dir_of, validate_minecraft_dir, Config};
use crate::error::{Error, Result};
use crate::registry::{ModEntry, ModRegistry};
use crate::sync::{ProgressCallback, SyncPlan, SyncResult};

/// Holds the mod list together with the installation it syncs into.
///
/// Front ends own a `ModManager` and pass it around by reference.
#[derive(Debug, Clone, Default)]
pub struct ModManager {
    registry: ModRegistry,
    minecraft_dir: Option<PathBuf>,
}

impl ModManager {
    /// Create a manager for an already known (or unknown) directory
    pub fn new(minecraft_dir: Option<PathBuf>) -> Self {
        Self {
            registry: ModRegistry::new(),
            minecraft_dir,
        }
    }

    /// Create a manager seeded by directory detection
    pub fn detect() -> Self {
        Self::new(detect_minecraft_dir())
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.minecraft_dir.clone())
    }

    /// Re-run detection, replacing the current directory
    pub fn detect_minecraft_dir(&mut self) -> Option<&Path> {
        self.minecraft_dir = detect_minecraft_dir();
        self.minecraft_dir.as_deref()
    }

    pub fn minecraft_dir(&self) -> Option<&Path> {
        self.minecraft_dir.as_deref()
    }

    /// Point the manager at a directory picked by the user
    pub fn set_minecraft_dir(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        if !validate_minecraft_dir(&path) {
            return Err(Error::DirectoryNotFound(path));
        }
        tracing::info!("Minecraft directory set to {}", path.display());
        self.minecraft_dir = Some(path);
        Ok(())
    }

    /// The mods folder of the configured installation
    pub fn mods_dir(&self) -> Result<PathBuf> {
        self.minecraft_dir
            .as_deref()
            .map(mods_dir_of)
            .ok_or(Error::DirectoryNotConfigured)
    }

    pub fn load_from_directory(&mut self) -> Result<usize> {
        self.registry.load_from_directory(self.minecraft_dir.as_deref())
    }

    pub fn add_entry(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.registry.add_entry(path)
    }

    pub fn set_enabled(&mut self, path: &Path, enabled: bool) -> Result<()> {
        self.registry.set_enabled(path, enabled)
    }

    pub fn plan_sync(&self) -> Result<SyncPlan> {
        self.registry.plan_sync(self.minecraft_dir.as_deref())
    }

    pub fn synchronize(&self) -> Result<SyncResult> {
        self.registry.synchronize(self.minecraft_dir.as_deref())
    }

    pub fn synchronize_with_progress(&self, progress: &ProgressCallback) -> Result<SyncResult> {
        self.registry
            .synchronize_with_progress(self.minecraft_dir.as_deref(), Some(progress))
    }

    /// Entries in insertion order
    pub fn mods(&self) -> &[ModEntry] {
        self.registry.entries()
    }

    pub fn registry(&self) -> &ModRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ModRegistry {
        &mut self.registry
    }
}
