//! Mirroring the enabled mods into a Minecraft mods folder

mod engine;
mod plan;

pub use engine::{
    copy_preserving_metadata, execute, ProgressCallback, SyncPhase, SyncProgress, SyncResult,
};
pub use plan::{format_bytes, SyncAction, SyncItem, SyncPlan};
