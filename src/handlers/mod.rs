// Handler modules
pub mod matrix;
pub mod supported;
pub mod workflows;

// Re-export all handler functions
pub use matrix::{handle_matrix, run_matrix};
pub use supported::handle_supported;
pub use workflows::{handle_workflows, run_workflows};

use crate::config::types::Config;
use crate::error::{Result, SyncError};
use crate::remote::{Fetch, HttpClient};
use crate::versions::{ReleaseCycle, fetch_release_cycles, filter_supported};
use chrono::NaiveDate;
use std::time::Duration;

fn http_client(config: &Config) -> Result<HttpClient> {
    HttpClient::new(config.sources.timeout_secs.map(Duration::from_secs))
}

/// Fetch the feed and keep the supported cycles
///
/// A feed without any supported cycle is treated as unusable: patching with
/// it would empty every versions block.
fn supported_cycles<F: Fetch>(
    fetcher: &F,
    config: &Config,
    today: NaiveDate,
) -> Result<Vec<ReleaseCycle>> {
    let cycles = fetch_release_cycles(fetcher, &config.sources.feed_url)?;
    let supported = filter_supported(&cycles, today)?;
    if supported.is_empty() {
        return Err(SyncError::format(
            &config.sources.feed_url,
            "no supported release cycles",
        ));
    }
    for cycle in &supported {
        log::info!("supported: {} (latest {}, EOL {})", cycle.cycle, cycle.latest, cycle.eol);
    }
    Ok(supported)
}
