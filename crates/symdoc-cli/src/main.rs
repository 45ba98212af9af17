//! Symdoc CLI - build documentation sites from extracted symbol records

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use symdoc_core::{SiteBuilder, SiteConfig, SymbolRecord, Tutorial};

#[derive(Parser)]
#[command(name = "symdoc")]
#[command(version = symdoc_core::VERSION)]
#[command(about = "Documentation site generator for extracted symbol records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the documentation site from a record dump
    Build {
        /// Path to the extractor's JSON record dump
        records: PathBuf,

        /// Output directory for generated pages
        #[arg(short, long, default_value = "docs")]
        output: PathBuf,

        /// Longname of the record that roots the "API" navigation subtree
        #[arg(long)]
        entry: Option<String>,

        /// Directory of tutorial pages (.html or .md)
        #[arg(long)]
        tutorials: Option<PathBuf>,

        /// Site title shown in the sidebar and page titles
        #[arg(long, default_value = "Documentation")]
        title: String,
    },

    /// Validate a record dump without writing any pages
    Check {
        /// Path to the extractor's JSON record dump
        records: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            records,
            output,
            entry,
            tutorials,
            title,
        } => build_site(&records, output, entry, tutorials.as_deref(), title),
        Commands::Check { records } => check_dump(&records),
    }
}

fn build_site(
    records_path: &Path,
    output: PathBuf,
    entry: Option<String>,
    tutorials_dir: Option<&Path>,
    title: String,
) -> Result<()> {
    let records = load_records(records_path)?;
    let tutorials = match tutorials_dir {
        Some(dir) => Tutorial::load_dir(dir)
            .with_context(|| format!("failed to load tutorials from '{}'", dir.display()))?,
        None => Vec::new(),
    };

    let builder = SiteBuilder::new(SiteConfig {
        title,
        api_entry: entry,
        output_dir: output.clone(),
    });
    let report = builder
        .build(records, &tutorials)
        .context("site build failed")?;

    println!(
        "Wrote {} page(s) to {}",
        report.pages_written,
        output.display()
    );
    if report.pages_skipped > 0 {
        eprintln!("Skipped {} page(s); see warnings above", report.pages_skipped);
    }
    Ok(())
}

fn check_dump(records_path: &Path) -> Result<()> {
    let records = load_records(records_path)?;
    let containers = records.iter().filter(|r| r.kind.is_container()).count();
    let orphans = records
        .iter()
        .filter(|r| {
            r.memberof
                .as_deref()
                .is_some_and(|parent| !records.iter().any(|c| c.longname == parent))
        })
        .count();

    println!("{} record(s), {} container(s)", records.len(), containers);
    if orphans > 0 {
        println!("{orphans} orphaned record(s) with unresolved memberof");
    }
    Ok(())
}

fn load_records(path: &Path) -> Result<Vec<SymbolRecord>> {
    let records = symdoc_core::site::load_records(path)
        .with_context(|| format!("could not load record dump '{}'", path.display()))?;
    log::info!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}
