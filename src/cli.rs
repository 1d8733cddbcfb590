use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "k8s-version-sync")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Keep CI Kubernetes versions in sync with supported releases")]
#[command(long_about = "Queries the Kubernetes release feed, drops end-of-life release lines, resolves the newest published kind image and minikube version for each supported line, and rewrites workflow files and the test matrix in place.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Trace skipped and resolved versions
    #[arg(long, global = true, env = "K8S_VERSION_SYNC_DEBUG")]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "debug")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite the versions blocks of workflow files
    Workflows {
        /// Files to patch (defaults to the configured workflow files)
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,
    },

    /// Rewrite the channel version lists of the JSON test matrix
    Matrix {
        /// Matrix file (defaults to the configured path)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Show the currently supported release cycles without changing files
    Supported {
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl Cli {
    /// Log level selected by `--quiet`, `--debug` and `-v`
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match (self.debug, self.verbose) {
            (_, v) if v >= 3 => log::LevelFilter::Trace,
            (true, _) | (_, 2) => log::LevelFilter::Debug,
            (_, 1) => log::LevelFilter::Info,
            _ => log::LevelFilter::Warn,
        }
    }

    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        env_logger::Builder::from_default_env()
            .filter_level(self.log_level())
            .init();
    }
}
