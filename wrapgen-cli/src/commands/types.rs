//! `wrapgen types`: list the supported types and their derived names.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};
use wrapgen_core::TypeDescriptor;

use crate::GlobalArgs;

/// Arguments for `wrapgen types`.
#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct TypeRow {
    #[tabled(rename = "api")]
    api: String,
    #[tabled(rename = "title")]
    title: String,
    #[tabled(rename = "category")]
    category: String,
    #[tabled(rename = "native")]
    native_type: String,
    #[tabled(rename = "bounds")]
    bounds: String,
    #[tabled(rename = "parents")]
    parents: String,
}

impl From<&TypeDescriptor> for TypeRow {
    fn from(d: &TypeDescriptor) -> Self {
        Self {
            api: d.api.clone(),
            title: d.title.clone(),
            category: d.category.to_string(),
            native_type: d.native_type.clone(),
            bounds: d
                .bounds
                .map(|b| b.to_string())
                .unwrap_or_else(|| "-".to_string()),
            parents: format!("{} / {}", d.primitive_parent, d.array_parent),
        }
    }
}

impl TypesArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let (_, config) = global.load()?;
        let registry = config.registry()?;

        if self.json {
            let descriptors: Vec<&TypeDescriptor> = registry.iter().collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&descriptors)
                    .context("failed to serialize type list")?
            );
            return Ok(());
        }

        println!(
            "wrapgen v{} | {} types",
            env!("CARGO_PKG_VERSION"),
            registry.len().to_string().bold()
        );
        if registry.is_empty() {
            println!("No types selected.");
            return Ok(());
        }
        let rows: Vec<TypeRow> = registry.iter().map(TypeRow::from).collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}
