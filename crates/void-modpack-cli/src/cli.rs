//! Command-line mode
//!
//! Usage:
//!   void-modpack detect                   Show where Minecraft was found
//!   void-modpack list                     List mods in the mods folder
//!   void-modpack dry-run                  Preview a sync
//!   void-modpack sync                     Perform a sync
//!   void-modpack shell                    Interactive session
//!
//! Options:
//!   --minecraft-dir <path>   Use this installation instead of detecting one
//!   --add <path>             Add a jar before listing/syncing (repeatable)
//!   --enable <mod>           Enable a mod by path or file name (repeatable)
//!   --disable <mod>          Disable a mod by path or file name (repeatable)
//!   --json                   Output in JSON format
//!   --verbose, -v            Debug logging on stderr

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use void_modpack_core::{
    candidate_dirs, detect_minecraft_dir, Error, ModManager, Platform, SyncProgress,
};

use crate::view;

/// CLI command to execute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliCommand {
    Detect,
    List,
    DryRun,
    Sync,
    Shell,
}

/// A change applied to the freshly loaded mod list, in command-line order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Add(PathBuf),
    Enable(String),
    Disable(String),
}

/// CLI options
#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    pub json: bool,
    pub verbose: bool,
    pub minecraft_dir: Option<PathBuf>,
    pub edits: Vec<Edit>,
}

/// Parse CLI arguments and return command + options
pub fn parse_args(args: &[String]) -> Result<(CliCommand, CliOptions), String> {
    let mut options = CliOptions::default();
    let mut command: Option<CliCommand> = None;

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "--json" => options.json = true,
            "--verbose" | "-v" => options.verbose = true,
            "--minecraft-dir" | "--add" | "--enable" | "--disable" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| format!("{} requires a value", arg))?
                    .clone();
                match arg.as_str() {
                    "--minecraft-dir" => options.minecraft_dir = Some(PathBuf::from(value)),
                    "--add" => options.edits.push(Edit::Add(PathBuf::from(value))),
                    "--enable" => options.edits.push(Edit::Enable(value)),
                    _ => options.edits.push(Edit::Disable(value)),
                }
            }
            other if other.starts_with('-') => {
                return Err(format!("Unknown option: {}", other));
            }
            other => {
                if command.is_some() {
                    return Err(format!("Unexpected argument: {}", other));
                }
                command = Some(parse_command(other)?);
            }
        }
        i += 1;
    }

    let command = command.ok_or_else(|| {
        "No command specified. Use: detect, list, dry-run, sync, or shell".to_string()
    })?;

    if !options.edits.is_empty() && matches!(command, CliCommand::Detect | CliCommand::Shell) {
        return Err(format!(
            "--add/--enable/--disable can't be used with {}",
            command_name(command)
        ));
    }

    Ok((command, options))
}

fn parse_command(s: &str) -> Result<CliCommand, String> {
    match s.to_lowercase().as_str() {
        "detect" => Ok(CliCommand::Detect),
        "list" | "ls" => Ok(CliCommand::List),
        "dry-run" | "plan" => Ok(CliCommand::DryRun),
        "sync" | "apply" => Ok(CliCommand::Sync),
        "shell" => Ok(CliCommand::Shell),
        _ => Err(format!("Unknown command: {}", s)),
    }
}

fn command_name(command: CliCommand) -> &'static str {
    match command {
        CliCommand::Detect => "detect",
        CliCommand::List => "list",
        CliCommand::DryRun => "dry-run",
        CliCommand::Sync => "sync",
        CliCommand::Shell => "shell",
    }
}

/// Run CLI command
pub fn run(command: CliCommand, options: CliOptions) -> anyhow::Result<()> {
    match command {
        CliCommand::Detect => run_detect(&options),
        CliCommand::List => run_list(&options),
        CliCommand::DryRun => run_dry_run(&options),
        CliCommand::Sync => run_sync(&options),
        CliCommand::Shell => {
            let mut manager = open_manager(&options)?;
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            crate::shell::run_session(&mut manager, stdin.lock(), &mut stdout)
        }
    }
}

/// Build a manager from `--minecraft-dir` or detection
pub fn open_manager(options: &CliOptions) -> anyhow::Result<ModManager> {
    match &options.minecraft_dir {
        Some(dir) => {
            let mut manager = ModManager::new(None);
            manager.set_minecraft_dir(dir)?;
            Ok(manager)
        }
        None => {
            let manager = ModManager::detect();
            if manager.minecraft_dir().is_none() {
                tracing::warn!("No Minecraft directory detected");
            }
            Ok(manager)
        }
    }
}

/// Find the registry path a user-supplied mod name refers to.
///
/// Exact paths win over file names; unknown names pass through unchanged so
/// the registry reports them.
pub fn resolve_target(manager: &ModManager, target: &str) -> PathBuf {
    let registry = manager.registry();
    if let Some(entry) = registry.get(Path::new(target)) {
        return entry.path.clone();
    }
    registry
        .find_by_file_name(target)
        .map(|entry| entry.path.clone())
        .unwrap_or_else(|| PathBuf::from(target))
}

/// Apply edits to the manager in order
pub fn apply_edits(manager: &mut ModManager, edits: &[Edit]) -> anyhow::Result<()> {
    for edit in edits {
        match edit {
            Edit::Add(path) => manager.add_entry(path)?,
            Edit::Enable(target) => {
                let path = resolve_target(manager, target);
                manager.set_enabled(&path, true)?;
            }
            Edit::Disable(target) => {
                let path = resolve_target(manager, target);
                manager.set_enabled(&path, false)?;
            }
        }
    }
    Ok(())
}

/// Load the mods folder and apply the requested edits
fn load_session(options: &CliOptions) -> anyhow::Result<ModManager> {
    let mut manager = open_manager(options)?;
    if manager.minecraft_dir().is_none() {
        anyhow::bail!("{}. Pass --minecraft-dir <path>", Error::DirectoryNotConfigured);
    }
    manager.load_from_directory()?;
    tracing::debug!("Applying {} edits", options.edits.len());
    apply_edits(&mut manager, &options.edits)?;
    Ok(manager)
}

fn run_detect(options: &CliOptions) -> anyhow::Result<()> {
    let platform = Platform::current();
    let home = dirs::home_dir();
    let candidates = candidate_dirs(platform, home.as_deref());
    let detected = match &options.minecraft_dir {
        Some(dir) => Some(dir.clone()).filter(|d| d.is_dir()),
        None => detect_minecraft_dir(),
    };

    let mut stdout = io::stdout();
    if options.json {
        let candidates: Vec<_> = candidates
            .iter()
            .map(|path| {
                serde_json::json!({
                    "path": path.to_string_lossy(),
                    "exists": path.exists(),
                })
            })
            .collect();
        writeln!(
            stdout,
            "{}",
            serde_json::json!({
                "platform": platform.to_string(),
                "candidates": candidates,
                "minecraft_dir": detected.as_ref().map(|p| p.to_string_lossy()),
            })
        )?;
    } else {
        writeln!(stdout, "Platform: {}", platform)?;
        writeln!(stdout, "Candidates:")?;
        for path in &candidates {
            let marker = if path.exists() { "found" } else { "missing" };
            writeln!(stdout, "  [{}] {}", marker, path.display())?;
        }
        writeln!(stdout)?;
        match detected {
            Some(dir) => writeln!(stdout, "Minecraft directory: {}", dir.display())?,
            None => writeln!(
                stdout,
                "Minecraft directory: not found (configure with --minecraft-dir <path>)"
            )?,
        }
    }

    Ok(())
}

fn run_list(options: &CliOptions) -> anyhow::Result<()> {
    let manager = load_session(options)?;
    let mut stdout = io::stdout();
    if options.json {
        view::write_mod_list_json(&manager, &mut stdout)
    } else {
        view::write_mod_list(&manager, &mut stdout)
    }
}

fn run_dry_run(options: &CliOptions) -> anyhow::Result<()> {
    let manager = load_session(options)?;
    let plan = manager.plan_sync()?;
    let mut stdout = io::stdout();
    if options.json {
        view::write_plan_json(&plan, &mut stdout)
    } else {
        view::write_plan(&plan, &mut stdout)
    }
}

fn run_sync(options: &CliOptions) -> anyhow::Result<()> {
    let manager = load_session(options)?;

    let show_progress = !options.json;
    let progress_callback: Box<dyn Fn(SyncProgress) + Send + Sync> = if show_progress {
        Box::new(|progress: SyncProgress| {
            eprint!(
                "\r{}: {}/{} {}",
                progress.phase, progress.current, progress.total, progress.current_name
            );
        })
    } else {
        Box::new(|_| {})
    };

    let result = manager.synchronize_with_progress(&progress_callback)?;

    if show_progress {
        eprintln!();
    }

    let mut stdout = io::stdout();
    if options.json {
        writeln!(stdout, "{}", serde_json::to_string(&result)?)?;
    } else {
        view::write_sync_result(&result, &mut stdout)?;
    }

    Ok(())
}

/// Print CLI help
pub fn print_help() {
    println!("void-modpack v{}", env!("CARGO_PKG_VERSION"));
    println!("Curate Minecraft mods and sync them into your mods folder");
    println!();
    println!("USAGE:");
    println!("    void-modpack <command> [options]");
    println!();
    println!("COMMANDS:");
    println!("    detect                      Show the Minecraft directory search");
    println!("    list                        List mods in the mods folder");
    println!("    dry-run                     Preview what sync would change");
    println!("    sync                        Make the mods folder match the enabled mods");
    println!("    shell                       Start an interactive session");
    println!();
    println!("OPTIONS:");
    println!("    --minecraft-dir <path>      Minecraft installation to use");
    println!("    --add <path>                Add a .jar before listing/syncing");
    println!("    --enable <mod>              Enable a mod (path or file name)");
    println!("    --disable <mod>             Disable a mod (path or file name)");
    println!("    --json                      Output in JSON format");
    println!("    --verbose, -v               Show debug logs");
    println!("    --help                      Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("    void-modpack detect");
    println!("    void-modpack list --minecraft-dir ~/.minecraft");
    println!("    void-modpack dry-run --disable optifine.jar");
    println!("    void-modpack sync --add ~/Downloads/sodium.jar --json");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("detect"), Ok(CliCommand::Detect));
        assert_eq!(parse_command("ls"), Ok(CliCommand::List));
        assert_eq!(parse_command("plan"), Ok(CliCommand::DryRun));
        assert_eq!(parse_command("apply"), Ok(CliCommand::Sync));
        assert_eq!(parse_command("SYNC"), Ok(CliCommand::Sync));
        assert!(parse_command("install").is_err());
    }

    #[test]
    fn test_parse_args_sync_with_edits() {
        let (cmd, options) = parse_args(&args(&[
            "sync",
            "--minecraft-dir",
            "/games/mc",
            "--add",
            "/dl/sodium.jar",
            "--disable",
            "optifine.jar",
            "--enable",
            "/games/mc/mods/lithium.jar",
        ]))
        .unwrap();

        assert_eq!(cmd, CliCommand::Sync);
        assert_eq!(options.minecraft_dir, Some(PathBuf::from("/games/mc")));
        assert_eq!(
            options.edits,
            vec![
                Edit::Add(PathBuf::from("/dl/sodium.jar")),
                Edit::Disable("optifine.jar".to_string()),
                Edit::Enable("/games/mc/mods/lithium.jar".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_args_flags() {
        let (cmd, options) = parse_args(&args(&["--json", "list", "-v"])).unwrap();
        assert_eq!(cmd, CliCommand::List);
        assert!(options.json);
        assert!(options.verbose);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["sync", "--add"])).is_err());
        assert!(parse_args(&args(&["sync", "list"])).is_err());
        assert!(parse_args(&args(&["sync", "--force"])).is_err());
        assert!(parse_args(&args(&["detect", "--add", "x.jar"])).is_err());
    }

    #[test]
    fn test_apply_edits_resolves_file_names() {
        let temp = tempfile::TempDir::new().unwrap();
        let mods = temp.path().join("mods");
        std::fs::create_dir_all(&mods).unwrap();
        std::fs::write(mods.join("optifine.jar"), b"o").unwrap();
        let extra = temp.path().join("sodium.jar");
        std::fs::write(&extra, b"s").unwrap();

        let mut manager = ModManager::new(Some(temp.path().to_path_buf()));
        manager.load_from_directory().unwrap();
        apply_edits(
            &mut manager,
            &[
                Edit::Disable("optifine.jar".to_string()),
                Edit::Add(extra.clone()),
            ],
        )
        .unwrap();

        assert_eq!(manager.mods().len(), 2);
        assert!(!manager.mods()[0].enabled);
        assert_eq!(manager.mods()[1].path, extra);

        let err = apply_edits(&mut manager, &[Edit::Enable("ghost.jar".to_string())]).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::ModNotFound(_))));
    }
}
