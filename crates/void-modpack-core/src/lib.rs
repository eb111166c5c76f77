//! # void-modpack-core
//!
//! Core library for curating Minecraft mods and syncing them into an
//! installation's `mods` folder.
//!
//! This crate provides:
//! - Cross-platform detection of the Minecraft installation directory
//! - An ordered mod registry with per-mod enabled flags
//! - A sync routine that makes the `mods` folder hold exactly the enabled `.jar` files
//!
//! ## Modules
//!
//! - [`config`] - Configuration and path detection
//! - [`error`] - Error types and Result alias
//! - [`manager`] - The [`ModManager`] that owns a registry and its directory
//! - [`registry`] - Mod entries and the registry holding them
//! - [`sync`] - Sync planning and execution
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use void_modpack_core::ModManager;
//!
//! let mut manager = ModManager::detect();
//! if manager.minecraft_dir().is_none() {
//!     manager.set_minecraft_dir("/opt/minecraft").expect("not a directory");
//! }
//!
//! manager.load_from_directory().expect("Failed to scan mods");
//! manager.add_entry("/downloads/sodium.jar").expect("Missing jar");
//! manager
//!     .set_enabled(Path::new("/downloads/sodium.jar"), false)
//!     .expect("Unknown mod");
//!
//! let result = manager.synchronize().expect("Sync failed");
//! println!("{} mods installed", result.installed());
//! ```

pub mod config;
pub mod error;
pub mod manager;
pub mod registry;
pub mod sync;

// Error types
pub use error::{Error, Result};

// Configuration
pub use config::{
    candidate_dirs, detect_minecraft_dir, detect_minecraft_dir_for, validate_minecraft_dir,
    Config, Platform, ARCHIVE_SUFFIX, MODS_DIR_NAME,
};

// Registry
pub use manager::ModManager;
pub use registry::{ModEntry, ModRegistry, RegistryState};

// Sync
pub use sync::{
    format_bytes, ProgressCallback, SyncAction, SyncItem, SyncPhase, SyncPlan, SyncProgress,
    SyncResult,
};
