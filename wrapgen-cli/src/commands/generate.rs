//! `wrapgen generate`: render every target and inject it between the markers.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use wrapgen_inject::{pipeline, InjectionOutcome, WriteResult};

use crate::GlobalArgs;

/// Arguments for `wrapgen generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Preview the regenerated files without writing anything.
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let (root, config) = global.load()?;
        let outcomes = pipeline::run(&root, config, self.dry_run)
            .with_context(|| format!("generation failed under '{}'", root.display()))?;

        if self.dry_run {
            for preview in outcomes.iter().filter_map(|o| o.preview.as_ref()) {
                print!("{preview}");
            }
        }
        print_results(&outcomes, self.dry_run);
        Ok(())
    }
}

fn print_results(outcomes: &[InjectionOutcome], dry_run: bool) {
    if outcomes.is_empty() {
        println!("No targets configured; nothing to do.");
        return;
    }

    let changed = outcomes.iter().filter(|o| o.write.is_change()).count();
    let unchanged = outcomes.len() - changed;
    if dry_run {
        let line = format!("[dry-run] {changed} would change");
        println!("\n{}", if changed > 0 { line.yellow() } else { line.green() });
    } else {
        println!("{}", format!("{changed} written, {unchanged} unchanged").green());
    }

    for outcome in outcomes {
        match &outcome.write {
            WriteResult::Written { path } => println!("  ✎  {}", path.display()),
            WriteResult::WouldWrite { path } => println!("  ~  {}", path.display()),
            WriteResult::Unchanged { path } => println!("  ·  {}", path.display()),
        }
    }
}
