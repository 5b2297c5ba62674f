//! Batch materializer: fetch every page image, re-encode it into a fresh
//! directory, then write the metadata table next to the images.
//!
//! Fatal: metadata table shape, pre-existing directory, filesystem writes.
//! Per-page fetch/decode/naming failures are skipped and reported, as is a
//! page whose file name was already taken by an earlier page.

mod progress;
mod report;

pub use progress::{NoProgress, Progress};
pub use report::{ItemOutcome, MaterializeReport, SkipReason, SkippedItem};

use crate::codec::{self, OutputFormat};
use crate::folio_name::folio_stem;
use crate::http::Fetch;
use crate::manifest::MetadataEntry;
use crate::table::{MetadataShapeError, MetadataTable};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("invalid metadata: {0}")]
    Metadata(#[from] MetadataShapeError),
    #[error("Directory name already exists. Please choose a different one. ({})", .0.display())]
    DirectoryExists(PathBuf),
    #[error("failed to create directory {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Everything the materializer needs for one run.
#[derive(Debug, Clone)]
pub struct MaterializeRequest {
    pub locations: Vec<String>,
    pub metadata: Vec<MetadataEntry>,
    /// Must not exist yet.
    pub directory: PathBuf,
    pub format: OutputFormat,
    /// Table file name; `.csv` is appended unless already present.
    pub csv_name: String,
    /// Fixed pause between two image requests.
    pub delay: Option<Duration>,
}

fn table_file_name(csv_name: &str) -> String {
    if csv_name.to_ascii_lowercase().ends_with(".csv") {
        csv_name.to_string()
    } else {
        format!("{}.csv", csv_name)
    }
}

/// Create `dir` without parents. An existing entry is a collision.
fn create_target_dir(dir: &Path) -> Result<(), MaterializeError> {
    match fs::create_dir(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            Err(MaterializeError::DirectoryExists(dir.to_path_buf()))
        }
        Err(source) => Err(MaterializeError::CreateDir {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

/// Fetch, name and transcode one page. Returns the encoded bytes and the target path.
fn prepare_item(
    fetcher: &dyn Fetch,
    url: &str,
    dir: &Path,
    format: OutputFormat,
) -> Result<(PathBuf, Vec<u8>), SkipReason> {
    let body = fetcher.get(url).map_err(SkipReason::Fetch)?;
    let stem = folio_stem(url).map_err(SkipReason::FolioName)?;
    let encoded = codec::transcode(&body, format).map_err(SkipReason::Codec)?;
    let path = dir.join(format!("{}.{}", stem, format.extension()));
    Ok((path, encoded))
}

/// Run the batch. See module docs for the failure policy.
pub fn materialize(
    fetcher: &dyn Fetch,
    req: &MaterializeRequest,
    progress: &dyn Progress,
) -> Result<MaterializeReport, MaterializeError> {
    let table = MetadataTable::from_entries(&req.metadata)?;
    create_target_dir(&req.directory)?;
    tracing::info!(
        dir = %req.directory.display(),
        pages = req.locations.len(),
        format = ?req.format,
        "materializing pages"
    );

    let total = req.locations.len();
    let mut written = Vec::new();
    let mut skipped = Vec::new();

    progress.begin(total);
    for (index, url) in req.locations.iter().enumerate() {
        if index > 0 {
            if let Some(delay) = req.delay {
                std::thread::sleep(delay);
            }
        }

        let outcome = match prepare_item(fetcher, url, &req.directory, req.format) {
            Ok((path, _)) if written.contains(&path) => {
                tracing::warn!(
                    url = %url,
                    path = %path.display(),
                    "folio name repeats; keeping first"
                );
                ItemOutcome::Skipped(SkipReason::DuplicateName(path))
            }
            Ok((path, bytes)) => {
                fs::write(&path, &bytes).map_err(|source| MaterializeError::Write {
                    path: path.clone(),
                    source,
                })?;
                tracing::debug!(url = %url, path = %path.display(), "page written");
                ItemOutcome::Written(path)
            }
            Err(reason) => {
                tracing::warn!(url = %url, "skipping page: {}", reason);
                ItemOutcome::Skipped(reason)
            }
        };
        progress.item_done(index, url, &outcome);

        match outcome {
            ItemOutcome::Written(path) => written.push(path),
            ItemOutcome::Skipped(reason) => skipped.push(SkippedItem {
                index,
                url: url.clone(),
                reason,
            }),
        }
    }
    progress.finish();

    let table_path = req.directory.join(table_file_name(&req.csv_name));
    table
        .write_csv(&table_path)
        .map_err(|source| MaterializeError::Write {
            path: table_path.clone(),
            source,
        })?;

    let report = MaterializeReport {
        directory: req.directory.clone(),
        total,
        written,
        skipped,
        table_path,
    };
    tracing::info!(
        dir = %report.directory.display(),
        skipped = report.skipped.len(),
        "{}",
        report.summary()
    );
    Ok(report)
}
