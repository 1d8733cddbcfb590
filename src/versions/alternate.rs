//! Versions from the alternate distribution channel (minikube)
//!
//! minikube publishes its supported Kubernetes versions as a Go slice
//! literal, newest first. Extraction from the fetched source text is kept
//! behind [`VersionListExtractor`] so callers never depend on the pattern.

use super::feed::ReleaseCycle;
use crate::error::{Result, SyncError};
use crate::remote::Fetch;
use regex::Regex;
use std::sync::LazyLock;

static QUOTED_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"\s]+)""#).expect("valid quoted version pattern"));

/// Pulls an ordered version listing out of upstream source text
pub trait VersionListExtractor {
    fn extract(&self, source_name: &str, text: &str) -> Result<Vec<String>>;
}

/// Matches `<name> = []string{ "v1.31.2", ... }`
pub struct GoSliceLiteral {
    pattern: Regex,
}

impl GoSliceLiteral {
    pub fn new(name: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(
            r"(?s){}\s*=\s*\[\]string\s*\{{(.*?)\}}",
            regex::escape(name)
        ))
        .map_err(|e| SyncError::Config(format!("invalid list name {name:?}: {e}")))?;
        Ok(Self { pattern })
    }
}

impl VersionListExtractor for GoSliceLiteral {
    fn extract(&self, source_name: &str, text: &str) -> Result<Vec<String>> {
        let body = self
            .pattern
            .captures(text)
            .and_then(|c| c.get(1))
            .ok_or_else(|| SyncError::format(source_name, "version list literal not found"))?;

        let versions: Vec<String> = QUOTED_VERSION
            .captures_iter(body.as_str())
            .map(|c| c[1].to_string())
            .collect();
        if versions.is_empty() {
            return Err(SyncError::format(source_name, "version list literal is empty"));
        }
        Ok(versions)
    }
}

/// Fetch `url` and extract its version listing
pub fn fetch_alternate_versions<F: Fetch, E: VersionListExtractor>(
    fetcher: &F,
    url: &str,
    extractor: &E,
) -> Result<Vec<String>> {
    let body = fetcher.get(url)?;
    let text = String::from_utf8(body).map_err(|e| SyncError::decode(url, e))?;
    let versions = extractor.extract(url, &text)?;
    log::debug!("{} lists {} version(s)", url, versions.len());
    Ok(versions)
}

/// First listing entry per supported cycle, in cycle order
///
/// The listing is newest first, so the first entry containing the cycle is
/// the newest patch of that line. Cycles without a match are skipped.
pub fn resolve_alternate(supported: &[ReleaseCycle], listing: &[String]) -> Vec<String> {
    supported
        .iter()
        .filter_map(|cycle| {
            let found = listing.iter().find(|v| v.contains(cycle.cycle.as_str()));
            if found.is_none() {
                log::debug!("no alternate channel version for cycle {}", cycle.cycle);
            }
            found.cloned()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::client::testing::StaticFetch;

    const SOURCE: &str = r#"
package constants

var (
	// ValidKubernetesVersions is a list of Kubernetes versions in order from newest to oldest
	// This is used when outputting Kubernetes versions and to select the latest patch version when unspecified
	ValidKubernetesVersions = []string{
		"v1.31.2",
		"v1.31.1",
		"v1.31.0",
		"v1.30.6",
		"v1.30.5",
		"v1.29.10",
		"v1.3.0",
	}
)
"#;

    fn listing() -> Vec<String> {
        GoSliceLiteral::new("ValidKubernetesVersions")
            .unwrap()
            .extract("constants.go", SOURCE)
            .unwrap()
    }

    #[test]
    fn test_extract_keeps_upstream_order() {
        let versions = listing();
        assert_eq!(versions.len(), 7);
        assert_eq!(versions[0], "v1.31.2");
        assert_eq!(versions[5], "v1.29.10");
    }

    #[test]
    fn test_missing_literal_is_format_error() {
        let extractor = GoSliceLiteral::new("ValidKubernetesVersions").unwrap();
        let err = extractor
            .extract("constants.go", "var OtherVersions = []string{\"v1\"}")
            .unwrap_err();
        assert!(matches!(err, SyncError::Format { .. }));
    }

    #[test]
    fn test_empty_literal_is_format_error() {
        let extractor = GoSliceLiteral::new("ValidKubernetesVersions").unwrap();
        let err = extractor
            .extract("constants.go", "ValidKubernetesVersions = []string{\n}")
            .unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_first_match_per_cycle() {
        let supported = vec![
            ReleaseCycle::new("1.31", "2024-08-13", "2025-10-28", "1.31.2"),
            ReleaseCycle::new("1.29", "2023-12-13", "2025-02-28", "1.29.10"),
        ];
        assert_eq!(resolve_alternate(&supported, &listing()), vec!["v1.31.2", "v1.29.10"]);
    }

    #[test]
    fn test_unmatched_cycle_contributes_nothing() {
        let supported = vec![
            ReleaseCycle::new("1.32", "2024-12-11", "2026-02-28", "1.32.0"),
            ReleaseCycle::new("1.30", "2024-04-17", "2025-06-28", "1.30.6"),
        ];
        assert_eq!(resolve_alternate(&supported, &listing()), vec!["v1.30.6"]);
    }

    #[test]
    fn test_fetch_alternate_versions() {
        let url = "https://raw.githubusercontent.com/kubernetes/minikube/master/constants.go";
        let fetch = StaticFetch::default().with(url, SOURCE);
        let extractor = GoSliceLiteral::new("ValidKubernetesVersions").unwrap();
        let versions = fetch_alternate_versions(&fetch, url, &extractor).unwrap();
        assert_eq!(versions, listing());
    }
}
