//! Manifest resolution: identifier + folio range → ordered image locations and metadata.
//!
//! One GET per call. A non-success manifest response either degrades to empty
//! lists or fails, depending on [`ManifestFailurePolicy`].

mod model;
mod range;

pub use model::{
    flatten_value, Canvas, ImageAnnotation, ImageResource, Manifest, MetadataEntry, Sequence,
};
pub use range::FolioRange;

use crate::config::{FolioConfig, ManifestFailurePolicy};
use crate::http::{Fetch, FetchError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// Server answered with a non-success status and the policy is `fail`.
    #[error("manifest request for {identifier} returned HTTP {code}")]
    Status { identifier: String, code: u32 },
    /// The manifest could not be fetched at all.
    #[error("could not fetch manifest for {identifier}")]
    Fetch {
        identifier: String,
        #[source]
        source: FetchError,
    },
    /// Body was not a IIIF manifest we understand.
    #[error("manifest for {identifier} is not valid IIIF JSON")]
    Parse {
        identifier: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result of resolving one document.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Image URLs restricted to the requested folio range, in page order.
    pub locations: Vec<String>,
    /// All metadata entries of the manifest, unsliced.
    pub metadata: Vec<MetadataEntry>,
    /// Number of image locations in the whole manifest.
    pub total_pages: usize,
    /// Set when the manifest request failed and the policy chose to continue.
    pub degraded: Option<u32>,
}

/// Build `<base>/<identifier>/manifest.json`. The identifier is embedded verbatim.
pub fn manifest_url(base: &str, identifier: &str) -> String {
    format!("{}/{}/manifest.json", base.trim_end_matches('/'), identifier)
}

/// Fetch and slice the manifest of `identifier`.
pub fn resolve(
    fetcher: &dyn Fetch,
    cfg: &FolioConfig,
    identifier: &str,
    range: FolioRange,
) -> Result<Resolution, ResolveError> {
    let url = manifest_url(&cfg.manifest_base_url, identifier);
    tracing::info!("fetching manifest {}", url);

    let body = match fetcher.get(&url) {
        Ok(body) => body,
        Err(FetchError::Status { code, .. }) => {
            return match cfg.on_manifest_failure {
                ManifestFailurePolicy::Degrade => {
                    tracing::warn!(
                        identifier,
                        code,
                        "manifest request failed; continuing with no pages and no metadata"
                    );
                    Ok(Resolution {
                        degraded: Some(code),
                        ..Resolution::default()
                    })
                }
                ManifestFailurePolicy::Fail => Err(ResolveError::Status {
                    identifier: identifier.to_string(),
                    code,
                }),
            };
        }
        Err(source) => {
            return Err(ResolveError::Fetch {
                identifier: identifier.to_string(),
                source,
            })
        }
    };

    let manifest: Manifest =
        serde_json::from_slice(&body).map_err(|source| ResolveError::Parse {
            identifier: identifier.to_string(),
            source,
        })?;

    let all = manifest.image_locations();
    let locations = range.slice(&all).to_vec();
    tracing::info!(
        identifier,
        total_pages = all.len(),
        selected = locations.len(),
        metadata_entries = manifest.metadata.len(),
        "manifest resolved"
    );

    Ok(Resolution {
        locations,
        metadata: manifest.metadata,
        total_pages: all.len(),
        degraded: None,
    })
}
