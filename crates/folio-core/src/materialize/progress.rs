//! Progress observer for the materializer. The CLI renders it as a bar.

use super::report::ItemOutcome;

pub trait Progress {
    fn begin(&self, _total: usize) {}
    fn item_done(&self, _index: usize, _url: &str, _outcome: &ItemOutcome) {}
    fn finish(&self) {}
}

/// Progress sink that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {}
