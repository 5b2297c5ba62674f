//! Terminal progress bar for the materializer.

use folio_core::materialize::{ItemOutcome, Progress};
use indicatif::{ProgressBar, ProgressStyle};

pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("##-"),
        );
        Self { bar }
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for BarProgress {
    fn begin(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_message("starting...");
    }

    fn item_done(&self, index: usize, url: &str, outcome: &ItemOutcome) {
        match outcome {
            ItemOutcome::Written(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.bar.set_message(name);
            }
            ItemOutcome::Skipped(reason) => {
                self.bar
                    .println(format!("skipped #{} {}: {}", index + 1, url, reason));
            }
        }
        self.bar.inc(1);
    }

    fn finish(&self) {
        self.bar.finish_with_message("done");
    }
}
