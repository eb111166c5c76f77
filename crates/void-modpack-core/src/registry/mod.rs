//! Ordered collection of mod entries

mod entry;

pub use entry::ModEntry;

use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{is_mod_archive, mods_dir_of};
use crate::error::{Error, Result};
use crate::sync::{self, ProgressCallback, SyncPlan, SyncResult};

/// Whether the registry has been populated from a mods folder yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistryState {
    /// Nothing scanned yet
    #[default]
    Unloaded,
    /// Populated by at least one directory scan
    Loaded,
}

/// Ordered list of mods and their enabled state.
///
/// Insertion order is significant: it is the order copies happen in during
/// sync, so later entries win when two share a file name.
#[derive(Debug, Clone, Default)]
pub struct ModRegistry {
    entries: Vec<ModEntry>,
    state: RegistryState,
}

impl ModRegistry {
    /// Create an empty, unloaded registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the registry contents with the archives found in `<root>/mods`.
    ///
    /// The mods folder is created when missing. Every entry starts enabled.
    /// Returns the number of entries loaded.
    pub fn load_from_directory(&mut self, root: Option<&Path>) -> Result<usize> {
        let root = root.ok_or(Error::DirectoryNotConfigured)?;
        let mods_dir = mods_dir_of(root);

        if !mods_dir.exists() {
            tracing::info!("Creating mods folder at {}", mods_dir.display());
            fs::create_dir_all(&mods_dir)?;
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(&mods_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            let path = entry.path();
            // Follows links: only archives that can actually be copied are listed
            if path.is_file() && is_mod_archive(path) {
                entries.push(ModEntry::new(path));
            }
        }

        if self.state == RegistryState::Loaded && self.entries != entries {
            tracing::warn!(
                "Reloading {} discards {} unsynced entries",
                mods_dir.display(),
                self.entries.len()
            );
        }

        tracing::info!("Loaded {} mods from {}", entries.len(), mods_dir.display());
        self.entries = entries;
        self.state = RegistryState::Loaded;
        Ok(self.entries.len())
    }

    /// Append an enabled entry for an archive on disk.
    ///
    /// Paths already in the registry are added again; see [`Self::duplicate_paths`].
    pub fn add_entry(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        if !path.exists() {
            return Err(Error::FileNotFound(path));
        }

        if self.get(&path).is_some() {
            tracing::warn!("{} is already in the mod list; adding a duplicate", path.display());
        }

        tracing::debug!("Adding mod {}", path.display());
        self.entries.push(ModEntry::new(path));
        Ok(())
    }

    /// Set the enabled flag of the first entry whose path equals `path`
    pub fn set_enabled(&mut self, path: &Path, enabled: bool) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.matches(path))
            .ok_or_else(|| Error::ModNotFound(path.to_path_buf()))?;

        tracing::debug!(
            "{} {}",
            if enabled { "Enabling" } else { "Disabling" },
            path.display()
        );
        entry.enabled = enabled;
        Ok(())
    }

    /// Work out what [`Self::synchronize`] would do without touching anything
    pub fn plan_sync(&self, root: Option<&Path>) -> Result<SyncPlan> {
        let root = root.ok_or(Error::DirectoryNotConfigured)?;
        SyncPlan::build(&self.entries, &mods_dir_of(root))
    }

    /// Make `<root>/mods` hold exactly the enabled archives
    pub fn synchronize(&self, root: Option<&Path>) -> Result<SyncResult> {
        self.synchronize_with_progress(root, None)
    }

    /// Same as [`Self::synchronize`], reporting each step to `progress`
    pub fn synchronize_with_progress(
        &self,
        root: Option<&Path>,
        progress: Option<&ProgressCallback>,
    ) -> Result<SyncResult> {
        let root = root.ok_or(Error::DirectoryNotConfigured)?;
        let mods_dir = mods_dir_of(root);
        if !mods_dir.exists() {
            fs::create_dir_all(&mods_dir)?;
        }

        let plan = SyncPlan::build(&self.entries, &mods_dir)?;
        sync::execute(&plan, progress)
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[ModEntry] {
        &self.entries
    }

    /// Enabled entries in insertion order
    pub fn enabled(&self) -> impl Iterator<Item = &ModEntry> {
        self.entries.iter().filter(|entry| entry.enabled)
    }

    pub fn enabled_count(&self) -> usize {
        self.enabled().count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn state(&self) -> RegistryState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == RegistryState::Loaded
    }

    /// First entry with the given path
    pub fn get(&self, path: &Path) -> Option<&ModEntry> {
        self.entries.iter().find(|entry| entry.matches(path))
    }

    /// First entry whose file name equals `name`
    pub fn find_by_file_name(&self, name: &str) -> Option<&ModEntry> {
        self.entries
            .iter()
            .find(|entry| entry.file_name() == Some(OsStr::new(name)))
    }

    /// Paths that appear more than once, in first-seen order
    pub fn duplicate_paths(&self) -> Vec<&Path> {
        let mut counts: HashMap<&Path, usize> = HashMap::new();
        for entry in &self.entries {
            *counts.entry(entry.path.as_path()).or_default() += 1;
        }

        let mut duplicates = Vec::new();
        for entry in &self.entries {
            let path = entry.path.as_path();
            if counts.get(path).copied().unwrap_or(0) > 1 && !duplicates.contains(&path) {
                duplicates.push(path);
            }
        }
        duplicates
    }
}
