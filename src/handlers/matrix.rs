use super::{http_client, supported_cycles};
use crate::config::types::Config;
use crate::error::{ChannelErrors, Result, SyncError};
use crate::patch::{ChannelFields, update_matrix_file};
use crate::remote::{DockerHubRegistry, Fetch};
use crate::versions::{
    GoSliceLiteral, ImageResolver, ReleaseCycle, fetch_alternate_versions, resolve_alternate,
    strip_v, today,
};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub fn handle_matrix(config: &Config, workdir: &Path, file: Option<PathBuf>) -> Result<()> {
    let client = http_client(config)?;
    run_matrix(&client, config, workdir, file, today())
}

/// Resolve both channels and rewrite the test matrix
///
/// Errors are collected per channel. When neither channel resolved a version
/// and errors were recorded, nothing is written. Otherwise the matrix is
/// patched with whatever was resolved and any recorded errors are still
/// returned.
pub fn run_matrix<F: Fetch>(
    fetcher: &F,
    config: &Config,
    workdir: &Path,
    file: Option<PathBuf>,
    today: NaiveDate,
) -> Result<()> {
    let supported = supported_cycles(fetcher, config, today)?;
    let mut errors = ChannelErrors::default();

    let kind_tags = resolve_kind_tags(fetcher, config, &supported, &mut errors.kind);
    let alternate_tags = match alternate_listing(fetcher, config) {
        Ok(listing) => resolve_alternate(&supported, &listing),
        Err(e) => {
            log::error!("{}", e);
            errors.alternate.push(e);
            Vec::new()
        }
    };
    log::info!("kind versions: {:?}", kind_tags);
    log::info!("minikube versions: {:?}", alternate_tags);

    if kind_tags.is_empty() && alternate_tags.is_empty() {
        if errors.is_empty() {
            println!("No versions resolved, leaving the test matrix untouched");
            return Ok(());
        }
        return Err(SyncError::Channels(errors));
    }

    let target = file.unwrap_or_else(|| PathBuf::from(&config.matrix.file));
    let fields = ChannelFields {
        kind: &config.matrix.kind_field,
        alternate: &config.matrix.alternate_field,
    };
    let changed = update_matrix_file(&workdir.join(&target), fields, &kind_tags, &alternate_tags)?;
    println!("✅ Updated {} ({} suite(s) changed)", target.display(), changed);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SyncError::Channels(errors))
    }
}

/// kind image tags, `v`-prefixed as published
fn resolve_kind_tags<F: Fetch>(
    fetcher: &F,
    config: &Config,
    supported: &[ReleaseCycle],
    errors: &mut Vec<SyncError>,
) -> Vec<String> {
    let resolver = ImageResolver::new(DockerHubRegistry::new(fetcher, &config.sources.registry_url));
    let mut tags = Vec::new();
    for cycle in supported {
        match resolver.resolve(&cycle.latest) {
            Ok(Some(tag)) => tags.push(format!("v{}", strip_v(&tag))),
            Ok(None) => log::warn!("no kind image published for cycle {}", cycle.cycle),
            Err(e) => {
                log::error!("{}", e);
                errors.push(e);
            }
        }
    }
    tags
}

fn alternate_listing<F: Fetch>(fetcher: &F, config: &Config) -> Result<Vec<String>> {
    let extractor = GoSliceLiteral::new(&config.sources.alternate_list_name)?;
    fetch_alternate_versions(fetcher, &config.sources.alternate_url, &extractor)
}
