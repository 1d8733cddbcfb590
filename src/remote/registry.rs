use super::client::Fetch;
use crate::error::{Result, SyncError};
use serde::Deserialize;

/// Answers whether an image tag has been published
pub trait TagRegistry {
    fn tag_exists(&self, tag: &str) -> Result<bool>;
}

impl<R: TagRegistry + ?Sized> TagRegistry for &R {
    fn tag_exists(&self, tag: &str) -> Result<bool> {
        (**self).tag_exists(tag)
    }
}

#[derive(Debug, Deserialize)]
struct TagPage {
    count: u64,
}

/// Docker Hub tag listing (`/v2/repositories/<namespace>/<image>/tags`)
pub struct DockerHubRegistry<F> {
    fetcher: F,
    tags_url: String,
}

impl<F: Fetch> DockerHubRegistry<F> {
    pub fn new(fetcher: F, tags_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            tags_url: tags_url.into(),
        }
    }

    fn probe_url(&self, tag: &str) -> String {
        format!(
            "{}?page_size=1&page=1&ordering=last_updated&name={}",
            self.tags_url, tag
        )
    }
}

impl<F: Fetch> TagRegistry for DockerHubRegistry<F> {
    fn tag_exists(&self, tag: &str) -> Result<bool> {
        let url = self.probe_url(tag);
        let body = self.fetcher.get(&url)?;
        let page: TagPage = serde_json::from_slice(&body)
            .map_err(|e| SyncError::decode(format!("tag listing from {url}"), e))?;
        log::debug!("registry reports {} match(es) for tag {}", page.count, tag);
        Ok(page.count > 0)
    }
}
