pub mod types;

use crate::error::{Result, SyncError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".k8s-version-sync.toml";

const FEED_URL_ENV: &str = "K8S_VERSION_SYNC_FEED_URL";
const REGISTRY_URL_ENV: &str = "K8S_VERSION_SYNC_REGISTRY_URL";

/// Get the local config file path (workdir/.k8s-version-sync.toml)
pub fn local_config_path(workdir: &Path) -> PathBuf {
    workdir.join(CONFIG_FILE_NAME)
}

/// Load configuration from file or use defaults
///
/// An explicitly requested file must exist and parse. Otherwise the local
/// config in `workdir` is used when present, falling back to defaults.
/// Environment overrides are applied last.
pub fn load_config(explicit: Option<&Path>, workdir: &Path) -> Result<types::Config> {
    let mut config = match explicit {
        Some(path) => read_config(path)?,
        None => {
            let local = local_config_path(workdir);
            if local.exists() {
                read_config(&local)?
            } else {
                types::Config::default()
            }
        }
    };

    apply_env_overrides(&mut config);
    Ok(config)
}

fn read_config(path: &Path) -> Result<types::Config> {
    let content = fs::read_to_string(path).map_err(|e| SyncError::io(path, e))?;
    toml::from_str(&content)
        .map_err(|e| SyncError::Config(format!("{}: {}", path.display(), e)))
}

fn apply_env_overrides(config: &mut types::Config) {
    if let Ok(url) = env::var(FEED_URL_ENV) {
        log::debug!("feed URL overridden by {}", FEED_URL_ENV);
        config.sources.feed_url = url;
    }
    if let Ok(url) = env::var(REGISTRY_URL_ENV) {
        log::debug!("registry URL overridden by {}", REGISTRY_URL_ENV);
        config.sources.registry_url = url;
    }
}
