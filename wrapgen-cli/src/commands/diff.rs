//! `wrapgen diff`: show unified diffs for what `generate` would write.

use anyhow::{Context, Result};
use clap::Args;
use wrapgen_inject::{diff_targets, Generator};

use crate::GlobalArgs;

/// Arguments for `wrapgen diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {}

impl DiffArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let (root, config) = global.load()?;
        let generator = Generator::new(&root, config)?;
        let diffs = diff_targets(&generator)
            .with_context(|| format!("diff failed under '{}'", root.display()))?;

        if diffs.is_empty() {
            println!("No differences.");
            return Ok(());
        }

        for diff in diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }

        Ok(())
    }
}
