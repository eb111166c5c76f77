//! Platform-specific path detection for Minecraft installations

use std::fmt;
use std::path::{Path, PathBuf};

/// Platform family used to pick the candidate list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Windows (launcher and user profile paths)
    Windows,
    /// macOS (Application Support)
    MacOs,
    /// Linux and everything else (home directory)
    Other,
}

impl Platform {
    /// Platform family of the compile target
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Other
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => write!(f, "Windows"),
            Self::MacOs => write!(f, "macOS"),
            Self::Other => write!(f, "Linux/other"),
        }
    }
}

/// Ordered candidate installation roots for a platform.
///
/// Home-relative candidates are skipped when `home` is unknown; absolute
/// candidates are always included.
pub fn candidate_dirs(platform: Platform, home: Option<&Path>) -> Vec<PathBuf> {
    let home_relative: &[&str] = match platform {
        Platform::Windows => &[".minecraft", "AppData/Roaming/.minecraft", "Minecraft"],
        Platform::MacOs => &["Library/Application Support/minecraft", "minecraft"],
        Platform::Other => &[".minecraft", "minecraft"],
    };

    let mut candidates: Vec<PathBuf> = home
        .map(|home| home_relative.iter().map(|rel| home.join(rel)).collect())
        .unwrap_or_default();

    if platform == Platform::Windows {
        candidates.push(PathBuf::from(r"C:\Program Files (x86)\Minecraft Launcher"));
        candidates.push(PathBuf::from(r"C:\Program Files\Minecraft Launcher"));
    }

    candidates
}

/// Detect a Minecraft installation for an explicit platform and home directory
pub fn detect_minecraft_dir_for(platform: Platform, home: Option<&Path>) -> Option<PathBuf> {
    for path in candidate_dirs(platform, home) {
        tracing::debug!("Probing {}", path.display());
        if path.exists() {
            tracing::info!("Detected Minecraft directory: {}", path.display());
            return Some(path);
        }
    }

    tracing::info!("No Minecraft directory found for {}", platform);
    None
}

/// Detect the Minecraft installation directory for the current user
pub fn detect_minecraft_dir() -> Option<PathBuf> {
    let home = dirs::home_dir();
    detect_minecraft_dir_for(Platform::current(), home.as_deref())
}

/// Validate that a path can serve as a Minecraft root
pub fn validate_minecraft_dir(path: &Path) -> bool {
    path.is_dir()
}
