//! Structured rewrite of the JSON test matrix
//!
//! The matrix maps each test suite to its version lists, one field per
//! channel:
//!
//! ```json
//! {
//!   "functional_test": { "k8s-kind-version": ["v1.31.2", "v1.30.6"] },
//!   "minikube_test": { "k8s-minikube-version": ["v1.31.2"] }
//! }
//! ```

use crate::error::{Result, SyncError};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Suite name → field name → versions; sorted maps keep output stable
pub type TestMatrix = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Names of the two channel fields
#[derive(Debug, Clone, Copy)]
pub struct ChannelFields<'a> {
    pub kind: &'a str,
    pub alternate: &'a str,
}

/// Replace the channel lists of every suite
///
/// A suite with the kind field gets `kind_tags` when that list is non-empty;
/// otherwise a suite with the alternate field gets `alternate_tags` when that
/// list is non-empty. Returns the number of suites changed.
pub fn patch_matrix(
    matrix: &mut TestMatrix,
    fields: ChannelFields<'_>,
    kind_tags: &[String],
    alternate_tags: &[String],
) -> usize {
    let mut changed = 0;
    for (suite, entry) in matrix.iter_mut() {
        let replacement = if !kind_tags.is_empty() && entry.contains_key(fields.kind) {
            Some((fields.kind, kind_tags))
        } else if !alternate_tags.is_empty() && entry.contains_key(fields.alternate) {
            Some((fields.alternate, alternate_tags))
        } else {
            None
        };

        if let Some((field, versions)) = replacement {
            if entry.get(field).map(Vec::as_slice) != Some(versions) {
                log::debug!("{}.{} -> {:?}", suite, field, versions);
                entry.insert(field.to_string(), versions.to_vec());
                changed += 1;
            }
        }
    }
    changed
}

pub fn load_matrix(path: &Path) -> Result<TestMatrix> {
    let content = fs::read_to_string(path).map_err(|e| SyncError::io(path, e))?;
    serde_json::from_str(&content)
        .map_err(|e| SyncError::decode(format!("test matrix {}", path.display()), e))
}

pub fn render_matrix(matrix: &TestMatrix) -> Result<String> {
    let mut rendered = serde_json::to_string_pretty(matrix)
        .map_err(|e| SyncError::decode("test matrix", e))?;
    rendered.push('\n');
    Ok(rendered)
}

/// Load, patch and rewrite the matrix file; returns the suites changed
pub fn update_matrix_file(
    path: &Path,
    fields: ChannelFields<'_>,
    kind_tags: &[String],
    alternate_tags: &[String],
) -> Result<usize> {
    let mut matrix = load_matrix(path)?;
    let changed = patch_matrix(&mut matrix, fields, kind_tags, alternate_tags);
    let rendered = render_matrix(&matrix)?;
    fs::write(path, rendered).map_err(|e| SyncError::io(path, e))?;
    log::info!("updated {} ({} suite(s) changed)", path.display(), changed);
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FIELDS: ChannelFields<'static> = ChannelFields {
        kind: "k8s-kind-version",
        alternate: "k8s-minikube-version",
    };

    fn strings(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> TestMatrix {
        serde_json::from_str(
            r#"{
                "functional_test": {"k8s-kind-version": ["v1.29.8"]},
                "minikube_test": {"k8s-minikube-version": ["v1.29.0"]},
                "lint": {"python-version": ["3.12"]}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_each_channel_replaced_wholesale() {
        let mut matrix = sample();
        let kind = strings(&["v1.31.2", "v1.30.6"]);
        let alternate = strings(&["v1.31.1"]);

        assert_eq!(patch_matrix(&mut matrix, FIELDS, &kind, &alternate), 2);
        assert_eq!(matrix["functional_test"]["k8s-kind-version"], kind);
        assert_eq!(matrix["minikube_test"]["k8s-minikube-version"], alternate);
        assert_eq!(matrix["lint"]["python-version"], strings(&["3.12"]));
    }

    #[test]
    fn test_empty_lists_leave_matrix_untouched() {
        let mut matrix = sample();
        assert_eq!(patch_matrix(&mut matrix, FIELDS, &[], &[]), 0);
        assert_eq!(matrix, sample());
    }

    #[test]
    fn test_empty_kind_list_still_patches_alternate() {
        let mut matrix = sample();
        let alternate = strings(&["v1.31.1"]);
        assert_eq!(patch_matrix(&mut matrix, FIELDS, &[], &alternate), 1);
        assert_eq!(matrix["functional_test"]["k8s-kind-version"], strings(&["v1.29.8"]));
    }

    #[test]
    fn test_kind_field_wins_when_both_present() {
        let mut matrix: TestMatrix = serde_json::from_str(
            r#"{"both": {"k8s-kind-version": ["a"], "k8s-minikube-version": ["b"]}}"#,
        )
        .unwrap();
        patch_matrix(&mut matrix, FIELDS, &strings(&["k"]), &strings(&["m"]));
        assert_eq!(matrix["both"]["k8s-kind-version"], strings(&["k"]));
        assert_eq!(matrix["both"]["k8s-minikube-version"], strings(&["b"]));
    }

    #[test]
    fn test_file_is_rewritten_with_sorted_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("matrix.json");
        fs::write(
            &path,
            r#"{"z_suite": {"k8s-kind-version": ["v1.28.0"]}, "a_suite": {"other": ["x"], "k8s-kind-version": []}}"#,
        )
        .unwrap();

        let changed =
            update_matrix_file(&path, FIELDS, &strings(&["v1.31.2"]), &strings(&["v1.31.1"]))
                .unwrap();
        assert_eq!(changed, 2);

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            r#"{
  "a_suite": {
    "k8s-kind-version": [
      "v1.31.2"
    ],
    "other": [
      "x"
    ]
  },
  "z_suite": {
    "k8s-kind-version": [
      "v1.31.2"
    ]
  }
}
"#
        );
    }

    #[test]
    fn test_malformed_matrix_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("matrix.json");
        fs::write(&path, r#"{"suite": ["not", "a", "map"]}"#).unwrap();

        let err = update_matrix_file(&path, FIELDS, &[], &[]).unwrap_err();
        assert!(matches!(err, SyncError::Decode { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"suite": ["not", "a", "map"]}"#);
    }

    #[test]
    fn test_missing_matrix_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = update_matrix_file(&dir.path().join("nope.json"), FIELDS, &[], &[]).unwrap_err();
        assert!(matches!(err, SyncError::Io { .. }));
    }
}
