// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `crood-gen` command line.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crood_codegen::{DatabaseDefinition, Generator, GeneratorConfig, write_all};
use tracing_subscriber::EnvFilter;

/// Generate crood domain structs from schema metadata.
#[derive(Debug, Parser)]
#[command(name = "crood-gen", version, about)]
struct Cli {
    /// Schema metadata file (JSON, or TOML by extension).
    #[arg(short, long)]
    schema: PathBuf,

    /// Output directory of the generated module tree.
    #[arg(short, long)]
    out: PathBuf,

    /// Generator configuration; defaults to `$HOME/crood.json`.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also emit `<Table>TestDomain` fixtures.
    #[arg(long)]
    fixtures: bool,

    /// Print the files that would be written instead of writing them.
    #[arg(long)]
    dry_run: bool
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::load(path),
        None => GeneratorConfig::from_home()
    }
    .context("failed to load generator config")?;
    config.generate_fixtures |= cli.fixtures;

    let database = DatabaseDefinition::from_path(&cli.schema)
        .with_context(|| format!("failed to read schema {}", cli.schema.display()))?;

    let files = Generator::new(config)
        .generate(&database)
        .context("code generation failed")?;

    if cli.dry_run {
        for file in &files {
            println!("{}", cli.out.join(&file.path).display());
        }
        return Ok(());
    }

    write_all(&files, &cli.out)
        .with_context(|| format!("failed to write {}", cli.out.display()))?;
    tracing::info!(files = files.len(), out = %cli.out.display(), "done");
    Ok(())
}
