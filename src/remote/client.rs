//! Blocking HTTP client used for every remote source
//!
//! Each run issues a handful of sequential GET requests: the release feed,
//! one registry probe per candidate tag and the alternate channel source.

use crate::error::{Result, SyncError};
use reqwest::blocking::Client;
use std::time::Duration;

/// User agent for outgoing requests
const USER_AGENT: &str = concat!("k8s-version-sync/", env!("CARGO_PKG_VERSION"));

/// A plain GET returning the response body
pub trait Fetch {
    fn get(&self, url: &str) -> Result<Vec<u8>>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        (**self).get(url)
    }
}

/// `Fetch` implementation backed by reqwest
pub struct HttpClient {
    http_client: Client,
}

impl HttpClient {
    /// Create a client, optionally overriding the transport's default timeout
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| SyncError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http_client })
    }
}

impl Fetch for HttpClient {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        log::trace!("GET {}", url);

        let response = self
            .http_client
            .get(url)
            .send()
            .map_err(|source| SyncError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(|source| SyncError::Fetch {
            url: url.to_string(),
            source,
        })?;
        Ok(body.to_vec())
    }
}
