//! Error types for void-modpack-core

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for mod registry and sync operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to scan mods directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Minecraft directory not configured")]
    DirectoryNotConfigured,

    #[error("Not a directory: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("File does not exist: {0}")]
    FileNotFound(PathBuf),

    #[error("Not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("No mod entry matches: {0}")]
    ModNotFound(PathBuf),
}

/// Result type alias for void-modpack operations
pub type Result<T> = std::result::Result<T, Error>;
