//! Output filename stem from a page image URL.
//!
//! Gallica image URLs carry the page number as a `/f<digits>` path segment,
//! e.g. `.../ark:/12148/btv1b525088021/f203/full/full/0/native.jpg`.
//! The first such match in the URL path names the file: `/f203` → `203`.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FolioNameError {
    #[error("no /f<digits> folio segment in {0}")]
    Missing(String),
}

fn folio_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"/f([0-9]+)").expect("static folio pattern"))
}

/// Digits of the first `/f<digits>` segment in the URL path.
///
/// Only the path is searched when `location` parses as a URL; otherwise the
/// whole string is.
pub fn folio_stem(location: &str) -> Result<String, FolioNameError> {
    let parsed = url::Url::parse(location).ok();
    let haystack = parsed.as_ref().map(|u| u.path()).unwrap_or(location);
    folio_pattern()
        .captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| FolioNameError::Missing(location.to_string()))
}
