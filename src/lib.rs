//! # k8s-version-sync
//!
//! Keeps CI configuration in sync with the Kubernetes release lines that are
//! still supported upstream.
//!
//! ## Features
//!
//! - **Support window**: reads the endoflife.date feed and drops release lines past their end of life
//! - **Image resolution**: walks patch versions back until a published kind node image is found
//! - **Workflow patching**: rewrites `k8s-version:` blocks line by line, keeping comments and blank lines
//! - **Matrix patching**: replaces the kind and minikube version lists of a JSON test matrix
//!
//! ## Example
//!
//! ```rust,no_run
//! use k8s_version_sync::remote::{DockerHubRegistry, HttpClient};
//! use k8s_version_sync::versions::{self, ImageResolver};
//!
//! # fn main() -> k8s_version_sync::Result<()> {
//! let client = HttpClient::new(None)?;
//! let cycles = versions::fetch_release_cycles(&client, "https://endoflife.date/api/kubernetes.json")?;
//! let supported = versions::filter_supported(&cycles, versions::today())?;
//!
//! let resolver = ImageResolver::new(DockerHubRegistry::new(
//!     &client,
//!     "https://hub.docker.com/v2/repositories/kindest/node/tags",
//! ));
//! for cycle in &supported {
//!     println!("{}: {:?}", cycle.cycle, resolver.resolve(&cycle.latest)?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod patch;
pub mod remote;
pub mod versions;

// Re-export commonly used types and functions
pub use error::{Result, SyncError};
pub use versions::{ReleaseCycle, filter_supported};
use cli::Commands;
use std::path::Path;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run_command(command: Commands, config: &config::types::Config, workdir: &Path) -> Result<()> {
    match command {
        Commands::Workflows { files } => handlers::handle_workflows(config, workdir, files),
        Commands::Matrix { file } => handlers::handle_matrix(config, workdir, file),
        Commands::Supported { format } => handlers::handle_supported(config, format),
    }
}
