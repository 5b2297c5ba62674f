//! `folio query` – resolve a manifest and download the requested folios.

use anyhow::{Context, Result};
use folio_core::codec::OutputFormat;
use folio_core::config::{FolioConfig, ManifestFailurePolicy};
use folio_core::http::{CurlFetcher, CurlOptions};
use folio_core::manifest::{self, FolioRange, Resolution};
use folio_core::materialize::{self, MaterializeReport, MaterializeRequest};
use std::path::PathBuf;

use crate::cli::progress::BarProgress;

#[derive(Debug, Clone)]
pub struct QueryArgs {
    pub identifier: String,
    pub from_folio: usize,
    pub to_folio: usize,
    pub directory: PathBuf,
    pub csv_name: String,
    pub tif: bool,
    pub png: bool,
    pub delay_ms: Option<u64>,
    pub strict: bool,
    pub fail_on_missing_manifest: bool,
}

impl QueryArgs {
    /// Config for this run: file values with command-line overrides applied.
    pub fn effective_config(&self, cfg: &FolioConfig) -> FolioConfig {
        let mut cfg = cfg.clone();
        if let Some(ms) = self.delay_ms {
            cfg.request_delay_ms = Some(ms);
        }
        if self.fail_on_missing_manifest {
            cfg.on_manifest_failure = ManifestFailurePolicy::Fail;
        }
        cfg
    }

    pub fn range(&self) -> FolioRange {
        FolioRange::new(self.from_folio, self.to_folio)
    }

    pub fn format(&self) -> OutputFormat {
        OutputFormat::from_flags(self.tif, self.png)
    }

    pub fn materialize_request(
        &self,
        resolution: Resolution,
        cfg: &FolioConfig,
    ) -> MaterializeRequest {
        MaterializeRequest {
            locations: resolution.locations,
            metadata: resolution.metadata,
            directory: self.directory.clone(),
            format: self.format(),
            csv_name: self.csv_name.clone(),
            delay: cfg.request_delay(),
        }
    }
}

/// Final line of a run: `Download done! K of N image(s) written to <dir>`.
pub fn done_message(report: &MaterializeReport) -> String {
    format!(
        "Download done! {} of {} image(s) written to {}",
        report.written.len(),
        report.total,
        report.directory.display()
    )
}

fn print_report(report: &MaterializeReport) {
    for item in &report.skipped {
        eprintln!("  skipped folio #{}: {}", item.index + 1, item.reason);
    }
    println!("{}", done_message(report));
    println!("Metadata: {}", report.table_path.display());
}

pub fn run_query(cfg: &FolioConfig, args: &QueryArgs) -> Result<()> {
    let cfg = args.effective_config(cfg);
    let fetcher = CurlFetcher::new(CurlOptions::from_config(&cfg));

    println!(
        "Fetching: {}",
        manifest::manifest_url(&cfg.manifest_base_url, &args.identifier)
    );
    let resolution = manifest::resolve(&fetcher, &cfg, &args.identifier, args.range())
        .with_context(|| format!("could not resolve {}", args.identifier))?;
    if let Some(code) = resolution.degraded {
        eprintln!(
            "warning: manifest request returned HTTP {}; continuing with no pages and no metadata",
            code
        );
    } else {
        println!(
            "{} page(s) in document, {} selected",
            resolution.total_pages,
            resolution.locations.len()
        );
    }

    let req = args.materialize_request(resolution, &cfg);
    let progress = BarProgress::new();
    let report = materialize::materialize(&fetcher, &req, &progress)?;
    print_report(&report);

    if args.strict && !report.is_complete() {
        anyhow::bail!(
            "{}; {} page(s) skipped",
            report.summary(),
            report.skipped.len()
        );
    }
    Ok(())
}
