//! void-modpack - Minecraft mod list manager
//!
//! Usage:
//!   void-modpack <command> [options]   Run a single command
//!   void-modpack shell                 Interactive session
//!   void-modpack --help                Show help

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

mod cli;
mod shell;
mod view;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty()
        || args.first().map(String::as_str) == Some("help")
        || args.iter().any(|a| a == "--help" || a == "-h")
    {
        cli::print_help();
        return Ok(());
    }

    let (command, options) = match cli::parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            cli::print_help();
            std::process::exit(1);
        }
    };

    init_logging(options.verbose);
    cli::run(command, options)
}

/// Log to stderr so stdout stays clean for `--json` output.
/// `RUST_LOG` overrides the default level unless `--verbose` is given.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();
}
