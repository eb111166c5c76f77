//! Interactive session: one command per line, the mod list stays in memory
//! until the session ends.

use std::io::{BufRead, Write};

use void_modpack_core::ModManager;

use crate::cli::resolve_target;
use crate::view;

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    List,
    Add(String),
    Enable(String),
    Disable(String),
    Dir(Option<String>),
    Detect,
    Reload,
    Plan,
    Sync,
    Help,
    Quit,
}

fn parse_line(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let required = |name: &str| -> Result<String, String> {
        if rest.is_empty() {
            Err(format!("{} requires an argument", name))
        } else {
            Ok(rest.to_string())
        }
    };

    let command = match word.to_lowercase().as_str() {
        "list" | "ls" => ShellCommand::List,
        "add" => ShellCommand::Add(required("add")?),
        "enable" | "on" => ShellCommand::Enable(required("enable")?),
        "disable" | "off" => ShellCommand::Disable(required("disable")?),
        "dir" => ShellCommand::Dir((!rest.is_empty()).then(|| rest.to_string())),
        "detect" => ShellCommand::Detect,
        "reload" => ShellCommand::Reload,
        "plan" | "dry-run" => ShellCommand::Plan,
        "sync" | "apply" => ShellCommand::Sync,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("Unknown command: {} (try 'help')", other)),
    };
    Ok(Some(command))
}

/// Run a session until `quit` or end of input.
///
/// Failed commands are reported and the session carries on.
pub fn run_session<R: BufRead, W: Write>(
    manager: &mut ModManager,
    input: R,
    out: &mut W,
) -> anyhow::Result<()> {
    writeln!(out, "void-modpack shell. Type 'help' for commands.")?;

    if manager.minecraft_dir().is_some() {
        if let Err(e) = manager.load_from_directory() {
            writeln!(out, "Error: {}", e)?;
        }
    } else {
        writeln!(out, "Minecraft directory not found. Set it with 'dir <path>'.")?;
    }
    view::write_mod_list(manager, out)?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "Error: {}", e)?;
                continue;
            }
        };

        if command == ShellCommand::Quit {
            break;
        }

        if let Err(e) = dispatch(manager, command, out) {
            writeln!(out, "Error: {}", e)?;
        }
    }

    Ok(())
}

fn dispatch<W: Write>(
    manager: &mut ModManager,
    command: ShellCommand,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        ShellCommand::List => view::write_mod_list(manager, out)?,
        ShellCommand::Add(path) => {
            manager.add_entry(&path)?;
            view::write_mod_list(manager, out)?;
        }
        ShellCommand::Enable(target) => {
            let path = resolve_target(manager, &target);
            manager.set_enabled(&path, true)?;
            view::write_mod_list(manager, out)?;
        }
        ShellCommand::Disable(target) => {
            let path = resolve_target(manager, &target);
            manager.set_enabled(&path, false)?;
            view::write_mod_list(manager, out)?;
        }
        ShellCommand::Dir(None) => match manager.minecraft_dir() {
            Some(dir) => writeln!(out, "Minecraft directory: {}", dir.display())?,
            None => writeln!(out, "Minecraft directory: not configured")?,
        },
        ShellCommand::Dir(Some(path)) => {
            manager.set_minecraft_dir(&path)?;
            writeln!(out, "Minecraft directory configured. Run 'reload' to scan it.")?;
        }
        ShellCommand::Detect => match manager.detect_minecraft_dir() {
            Some(dir) => writeln!(out, "Detected: {}", dir.display())?,
            None => writeln!(out, "No Minecraft directory found.")?,
        },
        ShellCommand::Reload => {
            let count = manager.load_from_directory()?;
            writeln!(out, "Loaded {} mods.", count)?;
            view::write_mod_list(manager, out)?;
        }
        ShellCommand::Plan => {
            let plan = manager.plan_sync()?;
            view::write_plan(&plan, out)?;
        }
        ShellCommand::Sync => {
            let result = manager.synchronize()?;
            view::write_sync_result(&result, out)?;
        }
        ShellCommand::Help => write_help(out)?,
        ShellCommand::Quit => {}
    }
    Ok(())
}

fn write_help<W: Write>(out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  list                 Show the mod list")?;
    writeln!(out, "  add <path>           Add a .jar file")?;
    writeln!(out, "  enable <mod>         Enable a mod (path or file name)")?;
    writeln!(out, "  disable <mod>        Disable a mod (path or file name)")?;
    writeln!(out, "  dir [path]           Show or set the Minecraft directory")?;
    writeln!(out, "  detect               Search for the Minecraft directory again")?;
    writeln!(out, "  reload               Rescan the mods folder (drops unsynced changes)")?;
    writeln!(out, "  plan                 Preview what sync would change")?;
    writeln!(out, "  sync                 Apply the enabled mods to the mods folder")?;
    writeln!(out, "  quit                 Leave the shell")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run(manager: &mut ModManager, script: &str) -> String {
        let mut out = Vec::new();
        run_session(manager, Cursor::new(script.to_string()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("# comment"), Ok(None));
        assert_eq!(parse_line("LS"), Ok(Some(ShellCommand::List)));
        assert_eq!(
            parse_line("add /tmp/My Mods/a.jar"),
            Ok(Some(ShellCommand::Add("/tmp/My Mods/a.jar".to_string())))
        );
        assert_eq!(parse_line("dir"), Ok(Some(ShellCommand::Dir(None))));
        assert_eq!(
            parse_line("off b.jar"),
            Ok(Some(ShellCommand::Disable("b.jar".to_string())))
        );
        assert!(parse_line("add").is_err());
        assert!(parse_line("frobnicate").is_err());
    }

    #[test]
    fn test_session_disable_and_sync() {
        let temp = TempDir::new().unwrap();
        let mods = temp.path().join("mods");
        fs::create_dir_all(&mods).unwrap();
        fs::write(mods.join("a.jar"), b"a").unwrap();
        fs::write(mods.join("b.jar"), b"b").unwrap();

        let mut manager = ModManager::new(Some(temp.path().to_path_buf()));
        let output = run(&mut manager, "disable b.jar\nsync\nquit\nsync\n");

        assert!(output.contains("2 mods, 1 enabled"));
        assert!(output.contains("Sync Complete:"));
        assert!(mods.join("a.jar").exists());
        assert!(!mods.join("b.jar").exists());
    }

    #[test]
    fn test_session_reports_errors_and_continues() {
        let temp = TempDir::new().unwrap();
        let mut manager = ModManager::new(None);

        let script = format!(
            "sync\nadd {}\ndir {}\nreload\n",
            temp.path().join("missing.jar").display(),
            temp.path().display()
        );
        let output = run(&mut manager, &script);

        assert!(output.contains("Error: Minecraft directory not configured"));
        assert!(output.contains("Error: File does not exist"));
        assert!(output.contains("Loaded 0 mods."));
        assert_eq!(manager.minecraft_dir(), Some(temp.path()));
    }
}
