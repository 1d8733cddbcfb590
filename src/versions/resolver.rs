//! Newest published image tag for a release line
//!
//! Image builds lag behind the release feed, so the feed's latest patch may
//! not have an image yet. The search walks the patch number backwards until
//! the registry reports a published tag, stopping at patch zero.

use crate::error::{Result, SyncError};
use crate::remote::TagRegistry;

/// Next lower patch version, or `None` when the patch is already zero
///
/// `1.24.5` becomes `1.24.4`; `1.24.0` cannot be decremented.
pub fn decrement_patch(version: &str) -> Result<Option<String>> {
    let mut parts: Vec<&str> = version.split('.').collect();
    if parts.len() < 3 {
        return Err(SyncError::InvalidVersion {
            version: version.to_string(),
            reason: "no patch component".to_string(),
        });
    }

    let patch: u64 = parts[2].parse().map_err(|_| SyncError::InvalidVersion {
        version: version.to_string(),
        reason: format!("patch component {:?} is not a number", parts[2]),
    })?;

    let Some(previous) = patch.checked_sub(1) else {
        return Ok(None);
    };
    let previous = previous.to_string();
    parts[2] = &previous;
    Ok(Some(parts.join(".")))
}

/// Probes a registry for the newest existing tag of a release line
pub struct ImageResolver<R> {
    registry: R,
}

impl<R: TagRegistry> ImageResolver<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Highest existing tag at or below `latest` within the same minor line
    ///
    /// `Ok(None)` means every candidate down to patch zero is missing. Probe
    /// failures are returned with the tag that was being checked.
    pub fn resolve(&self, latest: &str) -> Result<Option<String>> {
        let mut candidate = latest.to_string();
        loop {
            let exists = self
                .registry
                .tag_exists(&candidate)
                .map_err(|e| SyncError::Probe {
                    tag: candidate.clone(),
                    source: Box::new(e),
                })?;
            if exists {
                log::debug!("resolved {} to image tag {}", latest, candidate);
                return Ok(Some(candidate));
            }

            match decrement_patch(&candidate)? {
                Some(previous) => {
                    log::debug!("no image for {}, trying {}", candidate, previous);
                    candidate = previous;
                }
                None => {
                    log::debug!("no image published for any patch of {}", latest);
                    return Ok(None);
                }
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FixedRegistry;
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decrement_patch() {
        assert_eq!(decrement_patch("1.24.5").unwrap(), Some("1.24.4".to_string()));
        assert_eq!(decrement_patch("v1.31.10").unwrap(), Some("v1.31.9".to_string()));
        assert_eq!(decrement_patch("1.24.0").unwrap(), None);
    }

    #[test]
    fn test_decrement_requires_patch_component() {
        assert!(matches!(
            decrement_patch("1.24"),
            Err(SyncError::InvalidVersion { .. })
        ));
        assert!(matches!(
            decrement_patch("1.24.x"),
            Err(SyncError::InvalidVersion { .. })
        ));
    }

    #[test]
    fn test_latest_tag_exists() {
        let registry = FixedRegistry::with_tags(&["1.31.2"]);
        let resolver = ImageResolver::new(&registry);
        assert_eq!(resolver.resolve("1.31.2").unwrap(), Some("1.31.2".to_string()));
        assert_eq!(registry.probed.borrow().len(), 1);
    }

    #[test]
    fn test_walks_back_to_newest_published() {
        let registry = FixedRegistry::with_tags(&["1.31.0", "1.31.1"]);
        let resolver = ImageResolver::new(&registry);
        assert_eq!(resolver.resolve("1.31.4").unwrap(), Some("1.31.1".to_string()));
        assert_eq!(
            *registry.probed.borrow(),
            vec!["1.31.4", "1.31.3", "1.31.2", "1.31.1"]
        );
    }

    #[test]
    fn test_exhaustion_at_patch_zero() {
        let registry = FixedRegistry::with_tags(&["1.30.6"]);
        let resolver = ImageResolver::new(&registry);
        assert_eq!(resolver.resolve("1.31.2").unwrap(), None);
        assert_eq!(*registry.probed.borrow(), vec!["1.31.2", "1.31.1", "1.31.0"]);
    }

    #[test]
    fn test_probe_failure_names_tag() {
        let registry = FixedRegistry::default().failing_on("1.29.9");
        let resolver = ImageResolver::new(&registry);
        let err = resolver.resolve("1.29.10").unwrap_err();
        match err {
            SyncError::Probe { tag, .. } => assert_eq!(tag, "1.29.9"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_two_component_version_errors_when_missing() {
        let resolver = ImageResolver::new(FixedRegistry::default());
        assert!(matches!(
            resolver.resolve("1.31"),
            Err(SyncError::InvalidVersion { .. })
        ));
    }

    proptest! {
        #[test]
        fn returns_highest_existing_patch(start in 0u32..30, published in proptest::collection::btree_set(0u32..30, 0..5)) {
            let tags: Vec<String> = published.iter().map(|p| format!("1.30.{p}")).collect();
            let tag_refs: Vec<&str> = tags.iter().map(String::as_str).collect();
            let resolver = ImageResolver::new(FixedRegistry::with_tags(&tag_refs));

            let expected = published.range(..=start).next_back().map(|p| format!("1.30.{p}"));
            prop_assert_eq!(resolver.resolve(&format!("1.30.{start}")).unwrap(), expected);
        }
    }
}
