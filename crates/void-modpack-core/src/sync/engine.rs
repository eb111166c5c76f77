//! Executing a sync plan against the mods folder

use serde::Serialize;
use std::fs::{self, FileTimes};
use std::path::Path;
use std::time::Instant;

use crate::error::{Error, Result};
use crate::sync::plan::{SyncAction, SyncItem, SyncPlan};

/// Result of a sync operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncResult {
    /// Archives deleted from the mods folder
    pub removed: usize,
    /// Archives copied into the mods folder
    pub copied: usize,
    /// Archives already in place and left untouched
    pub retained: usize,
    /// Total bytes written by copies
    pub bytes_copied: u64,
}

impl SyncResult {
    /// Number of archives in the mods folder after the sync
    pub fn installed(&self) -> usize {
        self.copied + self.retained
    }
}

/// Progress information for sync callbacks
#[derive(Debug, Clone, Default)]
pub struct SyncProgress {
    /// Current step (1-based)
    pub current: usize,
    /// Total steps
    pub total: usize,
    /// File name of the current step
    pub current_name: String,
    pub phase: SyncPhase,
}

/// Phase of the sync operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    /// Deleting archives from the mods folder
    #[default]
    Removing,
    /// Copying enabled archives in
    Copying,
    /// Sync complete
    Complete,
}

impl std::fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Removing => write!(f, "Removing"),
            Self::Copying => write!(f, "Copying"),
            Self::Complete => write!(f, "Complete"),
        }
    }
}

/// Progress callback type
pub type ProgressCallback = Box<dyn Fn(SyncProgress) + Send + Sync>;

/// Run a plan: removals first, then copies.
///
/// Stops at the first failure. Files already removed or copied stay that way.
pub fn execute(plan: &SyncPlan, progress: Option<&ProgressCallback>) -> Result<SyncResult> {
    let start = Instant::now();
    let mut result = SyncResult::default();

    let steps: Vec<&SyncItem> = plan
        .items
        .iter()
        .filter(|item| item.action != SyncAction::Retain)
        .collect();
    let total = steps.len();

    let report = |current: usize, item: &SyncItem, phase: SyncPhase| {
        if let Some(callback) = progress {
            callback(SyncProgress {
                current,
                total,
                current_name: item.display_name(),
                phase,
            });
        }
    };

    for (index, item) in steps.into_iter().enumerate() {
        match item.action {
            SyncAction::Remove => {
                report(index + 1, item, SyncPhase::Removing);
                tracing::debug!("Removing {}", item.destination.display());
                fs::remove_file(&item.destination)?;
                result.removed += 1;
            }
            SyncAction::Copy => {
                report(index + 1, item, SyncPhase::Copying);
                let Some(source) = item.source.as_deref() else {
                    continue;
                };
                tracing::debug!(
                    "Copying {} -> {}",
                    source.display(),
                    item.destination.display()
                );
                result.bytes_copied += copy_preserving_metadata(source, &item.destination)?;
                result.copied += 1;
            }
            SyncAction::Retain => {}
        }
    }

    result.retained = plan.retain_count();

    if let Some(callback) = progress {
        callback(SyncProgress {
            current: total,
            total,
            current_name: String::new(),
            phase: SyncPhase::Complete,
        });
    }

    tracing::info!(
        "Synced {}: {} removed, {} copied, {} retained in {:.2}s",
        plan.mods_dir.display(),
        result.removed,
        result.copied,
        result.retained,
        start.elapsed().as_secs_f64()
    );

    Ok(result)
}

/// Copy a file, carrying over permissions and access/modification times
pub fn copy_preserving_metadata(source: &Path, destination: &Path) -> Result<u64> {
    let metadata = fs::metadata(source).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::FileNotFound(source.to_path_buf()),
        _ => Error::Io(e),
    })?;

    let bytes = fs::copy(source, destination)?;

    let mut times = FileTimes::new();
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }

    // Read-only copies can't be opened for writing; unix still allows
    // the owner to set times through a read handle.
    let file = match fs::OpenOptions::new().write(true).open(destination) {
        Ok(file) => file,
        Err(_) => fs::File::open(destination)?,
    };
    file.set_times(times)?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ModEntry;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    #[test]
    fn test_copy_preserves_mtime() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("old.jar");
        let destination = temp.path().join("copy.jar");
        fs::write(&source, b"jar bytes").unwrap();

        let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        fs::File::options()
            .write(true)
            .open(&source)
            .unwrap()
            .set_times(FileTimes::new().set_modified(mtime))
            .unwrap();

        let bytes = copy_preserving_metadata(&source, &destination).unwrap();

        assert_eq!(bytes, 9);
        let copied = fs::metadata(&destination).unwrap().modified().unwrap();
        assert_eq!(copied, mtime);
    }

    #[test]
    fn test_copy_missing_source() {
        let temp = TempDir::new().unwrap();
        let result = copy_preserving_metadata(
            &temp.path().join("missing.jar"),
            &temp.path().join("out.jar"),
        );
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_execute_reports_progress() {
        let temp = TempDir::new().unwrap();
        let mods = temp.path().join("mods");
        fs::create_dir_all(&mods).unwrap();
        fs::write(mods.join("stale.jar"), b"s").unwrap();
        let source = temp.path().join("fresh.jar");
        fs::write(&source, b"fresh").unwrap();

        let plan = SyncPlan::build(&[ModEntry::new(&source)], &mods).unwrap();

        let seen: Arc<Mutex<Vec<SyncPhase>>> = Arc::default();
        let sink = Arc::clone(&seen);
        let callback: ProgressCallback = Box::new(move |progress: SyncProgress| {
            sink.lock().unwrap().push(progress.phase);
        });

        let result = execute(&plan, Some(&callback)).unwrap();

        assert_eq!(result.removed, 1);
        assert_eq!(result.copied, 1);
        assert_eq!(result.bytes_copied, 5);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![SyncPhase::Removing, SyncPhase::Copying, SyncPhase::Complete]
        );
        assert!(!mods.join("stale.jar").exists());
        assert!(mods.join("fresh.jar").exists());
    }
}
