//! Planning a sync before any file is touched

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::is_mod_archive;
use crate::error::{Error, Result};
use crate::registry::ModEntry;

/// What happens to a single file during sync
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SyncAction {
    /// Archive in the mods folder that gets deleted
    Remove,
    /// Enabled archive copied into the mods folder
    Copy,
    /// Enabled archive that already lives in the mods folder and is left alone
    Retain,
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remove => write!(f, "Remove"),
            Self::Copy => write!(f, "Copy"),
            Self::Retain => write!(f, "Retain"),
        }
    }
}

/// A single step of a sync plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncItem {
    pub action: SyncAction,
    /// Registry path the file comes from (`None` for removals)
    pub source: Option<PathBuf>,
    /// Path inside the mods folder
    pub destination: PathBuf,
    /// Bytes that will be written (copies only)
    pub size_bytes: u64,
}

impl SyncItem {
    /// File name of the destination for display purposes
    pub fn display_name(&self) -> String {
        self.destination
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.destination.display().to_string())
    }
}

/// Ordered list of removals followed by copies.
///
/// Building a plan only reads the filesystem. For every destination file name
/// the last enabled entry wins, matching a copy-in-insertion-order pass. A
/// winner that already is the destination file is retained instead of being
/// deleted and copied onto itself.
#[derive(Debug, Clone, Serialize)]
pub struct SyncPlan {
    pub mods_dir: PathBuf,
    pub items: Vec<SyncItem>,
}

impl SyncPlan {
    /// Build the plan for syncing `entries` into `mods_dir`
    pub fn build(entries: &[ModEntry], mods_dir: &Path) -> Result<Self> {
        let winners = winning_entries(entries);

        let mut retained_names: HashSet<OsString> = HashSet::new();
        let mut retains = Vec::new();
        let mut copies = Vec::new();

        for entry in winners {
            let Some(name) = entry.file_name() else {
                continue;
            };
            let destination = mods_dir.join(name);

            let metadata = fs::metadata(&entry.path).map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => Error::FileNotFound(entry.path.clone()),
                _ => Error::Io(e),
            })?;
            if !metadata.is_file() {
                return Err(Error::NotAFile(entry.path.clone()));
            }

            if same_file(&entry.path, &destination) {
                retained_names.insert(name.to_os_string());
                retains.push(SyncItem {
                    action: SyncAction::Retain,
                    source: Some(entry.path.clone()),
                    destination,
                    size_bytes: 0,
                });
                continue;
            }

            copies.push(SyncItem {
                action: SyncAction::Copy,
                source: Some(entry.path.clone()),
                destination,
                size_bytes: metadata.len(),
            });
        }

        let mut items = Vec::new();
        if mods_dir.is_dir() {
            for dir_entry in WalkDir::new(mods_dir)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
            {
                let dir_entry = dir_entry?;
                let path = dir_entry.path();
                // Symlinks count as files here and are unlinked, never followed
                if dir_entry.file_type().is_dir() || !is_mod_archive(path) {
                    continue;
                }
                if retained_names.contains(dir_entry.file_name()) {
                    continue;
                }
                items.push(SyncItem {
                    action: SyncAction::Remove,
                    source: None,
                    destination: path.to_path_buf(),
                    size_bytes: 0,
                });
            }
        }

        items.extend(retains);
        items.extend(copies);

        Ok(Self {
            mods_dir: mods_dir.to_path_buf(),
            items,
        })
    }

    /// Items with the given action, in execution order
    pub fn items_with(&self, action: SyncAction) -> impl Iterator<Item = &SyncItem> {
        self.items.iter().filter(move |item| item.action == action)
    }

    pub fn remove_count(&self) -> usize {
        self.items_with(SyncAction::Remove).count()
    }

    pub fn copy_count(&self) -> usize {
        self.items_with(SyncAction::Copy).count()
    }

    pub fn retain_count(&self) -> usize {
        self.items_with(SyncAction::Retain).count()
    }

    /// Total bytes the copies will write
    pub fn total_copy_bytes(&self) -> u64 {
        self.items_with(SyncAction::Copy).map(|item| item.size_bytes).sum()
    }

    /// Format the total copy size as a human-readable string
    pub fn size_display(&self) -> String {
        format_bytes(self.total_copy_bytes())
    }

    /// Whether running the plan would change the mods folder
    pub fn has_changes(&self) -> bool {
        self.remove_count() > 0 || self.copy_count() > 0
    }
}

/// Enabled entries that end up in the mods folder, in insertion order.
///
/// When several enabled entries share a file name only the last one survives.
fn winning_entries(entries: &[ModEntry]) -> Vec<&ModEntry> {
    let mut last_by_name: HashMap<&std::ffi::OsStr, usize> = HashMap::new();
    for (index, entry) in entries.iter().enumerate() {
        if !entry.enabled {
            continue;
        }
        match entry.file_name() {
            Some(name) => {
                last_by_name.insert(name, index);
            }
            None => tracing::warn!("Skipping {}: no file name", entry.path.display()),
        }
    }

    entries
        .iter()
        .enumerate()
        .filter(|(index, entry)| {
            entry
                .file_name()
                .and_then(|name| last_by_name.get(name))
                .map_or(false, |winner| winner == index)
        })
        .map(|(_, entry)| entry)
        .collect()
}

/// Whether two paths resolve to the same existing file.
///
/// A missing or dangling destination never matches.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Size of an archive in B, KiB or MiB.
///
/// Mod jars stay well under a gigabyte, so MiB is the largest unit.
pub fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1 << 10;
    const MIB: u64 = 1 << 20;

    match bytes {
        b if b < KIB => format!("{} B", b),
        b if b < MIB => format!("{:.1} KiB", b as f64 / KIB as f64),
        b => format!("{:.1} MiB", b as f64 / MIB as f64),
    }
}
