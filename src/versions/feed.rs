//! Kubernetes release cycle feed (endoflife.date format)

use crate::error::{Result, SyncError};
use crate::remote::Fetch;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One Kubernetes minor release line as published by the feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseCycle {
    /// Release line, e.g. `1.31`
    pub cycle: String,
    #[serde(rename = "releaseDate")]
    pub release_date: String,
    /// End-of-life date, `YYYY-MM-DD`
    pub eol: String,
    /// Newest patch version of the line, e.g. `1.31.2`
    pub latest: String,
}

impl ReleaseCycle {
    pub fn new(cycle: &str, release_date: &str, eol: &str, latest: &str) -> Self {
        Self {
            cycle: cycle.to_string(),
            release_date: release_date.to_string(),
            eol: eol.to_string(),
            latest: latest.to_string(),
        }
    }

    /// Parsed end-of-life date; a malformed date is fatal
    pub fn eol_date(&self) -> Result<NaiveDate> {
        parse_date(&self.eol).map_err(|e| {
            SyncError::decode(format!("end-of-life date of cycle {}", self.cycle), e)
        })
    }

    /// Cycle without a leading `v`
    pub fn bare_cycle(&self) -> &str {
        strip_v(&self.cycle)
    }
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| format!("{value:?}: {e}"))
}

/// Strip the conventional `v` prefix from a version string
pub fn strip_v(version: &str) -> &str {
    version.strip_prefix('v').unwrap_or(version)
}

/// Decode a feed payload
pub fn decode_release_cycles(body: &[u8], source: &str) -> Result<Vec<ReleaseCycle>> {
    serde_json::from_slice(body).map_err(|e| SyncError::decode(format!("release feed {source}"), e))
}

/// Fetch and decode the release feed at `url`
pub fn fetch_release_cycles<F: Fetch>(fetcher: &F, url: &str) -> Result<Vec<ReleaseCycle>> {
    let body = fetcher.get(url)?;
    let cycles = decode_release_cycles(&body, url)?;
    log::debug!("feed {} lists {} release cycle(s)", url, cycles.len());
    Ok(cycles)
}
