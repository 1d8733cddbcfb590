use super::{http_client, supported_cycles};
use crate::config::types::Config;
use crate::error::{Result, SyncError};
use crate::patch::BlockPatcher;
use crate::remote::{DockerHubRegistry, Fetch};
use crate::versions::{ImageResolver, today};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub fn handle_workflows(config: &Config, workdir: &Path, files: Vec<PathBuf>) -> Result<()> {
    let client = http_client(config)?;
    run_workflows(&client, config, workdir, files, today())
}

/// Patch each workflow file independently
///
/// Feed failures abort the run. A failure on one file is logged and the
/// remaining files are still processed; all failures are returned together.
pub fn run_workflows<F: Fetch>(
    fetcher: &F,
    config: &Config,
    workdir: &Path,
    files: Vec<PathBuf>,
    today: NaiveDate,
) -> Result<()> {
    let supported = supported_cycles(fetcher, config, today)?;

    let resolver = ImageResolver::new(DockerHubRegistry::new(fetcher, &config.sources.registry_url));
    let patcher = BlockPatcher::new(&config.workflows.headers, &resolver, today);

    let targets = if files.is_empty() {
        config.workflows.files.iter().map(PathBuf::from).collect()
    } else {
        files
    };

    let mut failures: Vec<SyncError> = Vec::new();
    for target in targets {
        let path = workdir.join(&target);
        match patcher.patch_file(&path, &supported) {
            Ok(outcome) => {
                if outcome.changed {
                    println!("✅ Updated {}", target.display());
                } else {
                    println!("✔️  {} already up to date", target.display());
                }
                if !outcome.unresolved.is_empty() {
                    log::warn!(
                        "{}: no published image for {}",
                        target.display(),
                        outcome.unresolved.join(", ")
                    );
                }
            }
            Err(e) => {
                log::error!("{}", e);
                failures.push(e);
            }
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(SyncError::PartialFailure(failures))
    }
}
