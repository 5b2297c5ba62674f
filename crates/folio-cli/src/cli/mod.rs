//! CLI for folio, the IIIF page image downloader.

mod commands;
mod progress;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use folio_core::config;
use std::path::PathBuf;

use commands::{run_completions, run_query, QueryArgs};

/// Top-level CLI for folio.
#[derive(Debug, Parser)]
#[command(name = "folio")]
#[command(
    about = "Download page images of a digitized document from a IIIF manifest (Gallica by default)",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download folios FROM..=TO of a document into a new directory, plus its metadata as CSV.
    ///
    /// Example: folio query ark:/12148/btv1b525088021 198 206 images_f198_to_f206 metadata -t
    Query {
        /// Archival identifier of the document, e.g. ark:/12148/btv1b525088021.
        identifier: String,
        /// First folio (1-based, inclusive; 0 also means the first page).
        from_folio: usize,
        /// Last folio (inclusive); values past the end are clamped.
        to_folio: usize,
        /// Directory to create for the images. Must not exist yet.
        directory_name: PathBuf,
        /// Name of the metadata CSV written inside the directory (".csv" is added).
        csv_name: String,
        /// Save TIFF files instead of JPEG.
        #[arg(short = 't', long)]
        tif: bool,
        /// Save PNG files instead of JPEG.
        #[arg(short = 'p', long)]
        png: bool,
        /// Pause between two image requests, in milliseconds (overrides config).
        #[arg(long, value_name = "MS")]
        delay_ms: Option<u64>,
        /// Exit with an error if any page could not be downloaded.
        #[arg(long)]
        strict: bool,
        /// Abort instead of continuing when the manifest request fails.
        #[arg(long)]
        fail_on_missing_manifest: bool,
    },

    /// Print a shell completion script to stdout.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Query {
                identifier,
                from_folio,
                to_folio,
                directory_name,
                csv_name,
                tif,
                png,
                delay_ms,
                strict,
                fail_on_missing_manifest,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let args = QueryArgs {
                    identifier,
                    from_folio,
                    to_folio,
                    directory: directory_name,
                    csv_name,
                    tif,
                    png,
                    delay_ms,
                    strict,
                    fail_on_missing_manifest,
                };
                run_query(&cfg, &args)?;
            }
            CliCommand::Completions { shell } => run_completions(shell)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
