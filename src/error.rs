//! Error types for version resolution and file patching
//!
//! Every variant carries the URL, tag, version or file that was being
//! processed so a failure in a scheduled run can be traced from the log alone.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving versions or patching target files
#[derive(Debug, Error)]
pub enum SyncError {
    /// Network or transport failure reaching a remote source
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Remote source answered with a non-success status
    #[error("unexpected status code {status} from {url}")]
    Status { url: String, status: u16 },

    /// Malformed JSON or an unparseable date
    #[error("failed to decode {what}: {reason}")]
    Decode { what: String, reason: String },

    /// Registry probe for a single tag failed
    #[error("failed to check image tag {tag}: {source}")]
    Probe {
        tag: String,
        #[source]
        source: Box<SyncError>,
    },

    /// A version string that cannot be walked backwards
    #[error("invalid version {version}: {reason}")]
    InvalidVersion { version: String, reason: String },

    /// Expected pattern or block missing from upstream text or a target file
    #[error("unexpected format in {source_name}: {reason}")]
    Format { source_name: String, reason: String },

    /// Reading or writing a local file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),

    /// Some target files failed while others may have been updated
    #[error("{} target file(s) failed to update:\n{}", .0.len(), JoinedErrors(.0))]
    PartialFailure(Vec<SyncError>),

    /// Version resolution failed for one or both matrix channels
    #[error("version resolution failed ({} error(s)):\n{}", .0.len(), .0)]
    Channels(ChannelErrors),
}

impl SyncError {
    pub fn decode(what: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Decode {
            what: what.into(),
            reason: reason.to_string(),
        }
    }

    pub fn format(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for a run that ended with this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::PartialFailure(_) | Self::Channels(_) => 2,
            _ => 1,
        }
    }
}

/// Errors collected separately for each matrix channel
#[derive(Debug, Default)]
pub struct ChannelErrors {
    pub kind: Vec<SyncError>,
    pub alternate: Vec<SyncError>,
}

impl ChannelErrors {
    pub fn is_empty(&self) -> bool {
        self.kind.is_empty() && self.alternate.is_empty()
    }

    pub fn len(&self) -> usize {
        self.kind.len() + self.alternate.len()
    }
}

impl fmt::Display for ChannelErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for err in &self.kind {
            writeln!(f, "  [kind] {err}")?;
        }
        for err in &self.alternate {
            writeln!(f, "  [alternate] {err}")?;
        }
        Ok(())
    }
}

struct JoinedErrors<'a>(&'a [SyncError]);

impl fmt::Display for JoinedErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for err in self.0 {
            writeln!(f, "  {err}")?;
        }
        Ok(())
    }
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, SyncError>;
