//! Per-item outcomes and the run summary.

use crate::codec::CodecError;
use crate::folio_name::FolioNameError;
use crate::http::FetchError;
use std::fmt;
use std::path::PathBuf;

/// Why a page was not written. None of these stop the run.
#[derive(Debug)]
pub enum SkipReason {
    Fetch(FetchError),
    FolioName(FolioNameError),
    Codec(CodecError),
    /// An earlier page already produced this file; the first one is kept.
    DuplicateName(PathBuf),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Fetch(e) => write!(f, "{}", e),
            SkipReason::FolioName(e) => write!(f, "{}", e),
            SkipReason::Codec(e) => write!(f, "{}", e),
            SkipReason::DuplicateName(path) => {
                write!(f, "{} already written by an earlier page", path.display())
            }
        }
    }
}

/// What happened to one location.
#[derive(Debug)]
pub enum ItemOutcome {
    Written(PathBuf),
    Skipped(SkipReason),
}

#[derive(Debug)]
pub struct SkippedItem {
    /// 0-based position in the location list.
    pub index: usize,
    pub url: String,
    pub reason: SkipReason,
}

#[derive(Debug)]
pub struct MaterializeReport {
    pub directory: PathBuf,
    /// Number of locations attempted.
    pub total: usize,
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkippedItem>,
    pub table_path: PathBuf,
}

impl MaterializeReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// "K of N fetched".
    pub fn summary(&self) -> String {
        format!("{} of {} fetched", self.written.len(), self.total)
    }
}
