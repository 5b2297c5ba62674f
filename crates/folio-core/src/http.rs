//! Blocking HTTP GET over libcurl.
//!
//! The resolver and the materializer only see the [`Fetch`] trait; the curl
//! handle lives in [`CurlFetcher`]. One request at a time, no retries.

use crate::config::FolioConfig;
use std::time::Duration;
use thiserror::Error;

/// Outcome of a failed GET. Callers decide whether a failure is fatal.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (DNS, connect, TLS, timeout, ...).
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },
    /// Response had a non-2xx status.
    #[error("GET {url} returned HTTP {code}")]
    Status { url: String, code: u32 },
}

impl FetchError {
    /// HTTP status code, if the server answered.
    pub fn status(&self) -> Option<u32> {
        match self {
            FetchError::Status { code, .. } => Some(*code),
            FetchError::Transport { .. } => None,
        }
    }
}

/// Something that can GET a URL and return its body.
pub trait Fetch {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Transport options for [`CurlFetcher`].
#[derive(Debug, Clone, Default)]
pub struct CurlOptions {
    /// Overall per-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl CurlOptions {
    pub fn from_config(cfg: &FolioConfig) -> Self {
        Self {
            timeout: cfg.request_timeout(),
            user_agent: cfg.user_agent.clone(),
        }
    }
}

/// [`Fetch`] implementation backed by a fresh `curl::easy::Easy` per request.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    opts: CurlOptions,
}

impl CurlFetcher {
    pub fn new(opts: CurlOptions) -> Self {
        Self { opts }
    }

    fn perform(&self, url: &str, body: &mut Vec<u8>) -> Result<u32, curl::Error> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        if let Some(timeout) = self.opts.timeout {
            easy.connect_timeout(timeout)?;
            easy.timeout(timeout)?;
        }
        if let Some(ua) = &self.opts.user_agent {
            easy.useragent(ua)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        easy.response_code()
    }
}

impl Fetch for CurlFetcher {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut body = Vec::new();
        let code = self
            .perform(url, &mut body)
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Status {
                url: url.to_string(),
                code,
            });
        }
        tracing::debug!(url, bytes = body.len(), "GET ok");
        Ok(body)
    }
}
