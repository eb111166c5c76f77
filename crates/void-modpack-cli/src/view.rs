//! Text and JSON rendering of mod lists, plans and sync results

use std::io::Write;

use void_modpack_core::{format_bytes, ModManager, SyncAction, SyncPlan, SyncResult};

/// Show at most this many items per section in text output
const MAX_LISTED: usize = 20;

pub fn write_mod_list(manager: &ModManager, out: &mut impl Write) -> anyhow::Result<()> {
    match manager.minecraft_dir() {
        Some(dir) => writeln!(out, "Minecraft directory: {}", dir.display())?,
        None => writeln!(out, "Minecraft directory: not configured")?,
    }

    let registry = manager.registry();
    if registry.is_empty() {
        writeln!(out, "No mods.")?;
        return Ok(());
    }

    for (index, entry) in registry.entries().iter().enumerate() {
        let check = if entry.enabled { "x" } else { " " };
        writeln!(
            out,
            "  {:>3}. [{}] {}  ({})",
            index + 1,
            check,
            entry.display_name(),
            entry.path.display()
        )?;
    }
    writeln!(
        out,
        "{} mods, {} enabled",
        registry.len(),
        registry.enabled_count()
    )?;

    for path in registry.duplicate_paths() {
        writeln!(out, "Warning: {} is listed more than once", path.display())?;
    }

    Ok(())
}

pub fn write_mod_list_json(manager: &ModManager, out: &mut impl Write) -> anyhow::Result<()> {
    let registry = manager.registry();
    let duplicates: Vec<_> = registry
        .duplicate_paths()
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();

    writeln!(
        out,
        "{}",
        serde_json::json!({
            "minecraft_dir": manager.minecraft_dir().map(|p| p.to_string_lossy()),
            "mods": registry.entries(),
            "enabled": registry.enabled_count(),
            "duplicates": duplicates,
        })
    )?;
    Ok(())
}

pub fn write_plan(plan: &SyncPlan, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "Sync Preview ({}):", plan.mods_dir.display())?;
    writeln!(out, "  Remove: {}", plan.remove_count())?;
    writeln!(out, "  Copy:   {} ({})", plan.copy_count(), plan.size_display())?;
    writeln!(out, "  Retain: {}", plan.retain_count())?;

    for action in [SyncAction::Remove, SyncAction::Copy, SyncAction::Retain] {
        let items: Vec<_> = plan.items_with(action).collect();
        if items.is_empty() {
            continue;
        }
        writeln!(out)?;
        writeln!(out, "{}:", action)?;
        for item in items.iter().take(MAX_LISTED) {
            match (&item.source, action) {
                (Some(source), SyncAction::Copy) => writeln!(
                    out,
                    "  {}  <- {} ({})",
                    item.display_name(),
                    source.display(),
                    format_bytes(item.size_bytes)
                )?,
                _ => writeln!(out, "  {}", item.display_name())?,
            }
        }
        if items.len() > MAX_LISTED {
            writeln!(out, "  ... and {} more", items.len() - MAX_LISTED)?;
        }
    }

    if !plan.has_changes() {
        writeln!(out)?;
        writeln!(out, "Mods folder is already up to date.")?;
    }

    Ok(())
}

pub fn write_plan_json(plan: &SyncPlan, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(
        out,
        "{}",
        serde_json::json!({
            "summary": {
                "remove": plan.remove_count(),
                "copy": plan.copy_count(),
                "retain": plan.retain_count(),
                "copy_bytes": plan.total_copy_bytes(),
            },
            "plan": plan,
        })
    )?;
    Ok(())
}

pub fn write_sync_result(result: &SyncResult, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "Sync Complete:")?;
    writeln!(out, "  Removed: {}", result.removed)?;
    writeln!(
        out,
        "  Copied:  {} ({})",
        result.copied,
        format_bytes(result.bytes_copied)
    )?;
    writeln!(out, "  Retained: {}", result.retained)?;
    writeln!(out, "  Installed mods: {}", result.installed())?;
    Ok(())
}
