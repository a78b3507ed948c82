//! wrapgen: regenerate per-type wrapper declarations in marked source files.
//!
//! # Usage
//!
//! ```text
//! wrapgen                         # commit run over every configured target
//! wrapgen dry                     # any argument containing "dry" previews instead
//! wrapgen generate [--dry-run]
//! wrapgen diff
//! wrapgen types [--json]
//! ```
//!
//! Global options: `--root <DIR>`, `--config <FILE>`, `-v`.

mod commands;

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use commands::{diff::DiffArgs, generate::GenerateArgs, types::TypesArgs};
use wrapgen_core::GeneratorConfig;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "wrapgen",
    version,
    about = "Regenerate typed wrapper declarations between injection markers",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,

    // `wrapgen` without a subcommand behaves like `wrapgen generate`.
    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render every target and inject it between the markers.
    Generate(GenerateArgs),

    /// Show a unified diff of what `generate` would write.
    Diff(DiffArgs),

    /// List the supported types and their derived names.
    Types(TypesArgs),
}

/// Options shared by every command.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Directory target paths are resolved against (default: current directory).
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Config file (default: `<root>/wrapgen.yaml` when present).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl GlobalArgs {
    /// Resolve the root directory and load its configuration.
    pub fn load(&self) -> Result<(PathBuf, GeneratorConfig)> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().context("could not determine current directory")?,
        };
        let config = match &self.config {
            Some(path) => GeneratorConfig::load_at(path)?,
            None => GeneratorConfig::discover(&root)?,
        };
        Ok((root, config))
    }
}

// ---------------------------------------------------------------------------
// Argument normalization
// ---------------------------------------------------------------------------

/// Rewrite any bare argument mentioning `dry` (`dry`, `--dry`, `dry-run`, ...)
/// into `--dry-run`. Values of `--root`/`--config` are left alone.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut normalized = Vec::new();
    let mut expects_value = false;
    for (idx, arg) in args.into_iter().enumerate() {
        let text = arg.to_str();
        let rewrite = idx > 0
            && !expects_value
            && text.is_some_and(|s| s.contains("dry") && !s.contains('=') && s != "--dry-run");
        expects_value = matches!(text, Some("--root" | "--config"));
        normalized.push(if rewrite { OsString::from("--dry-run") } else { arg });
    }
    normalized
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

fn init_logging(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    init_logging(cli.global.verbose);

    match cli.command.unwrap_or(Commands::Generate(cli.generate)) {
        Commands::Generate(args) => args.run(&cli.global),
        Commands::Diff(args) => args.run(&cli.global),
        Commands::Types(args) => args.run(&cli.global),
    }
}
