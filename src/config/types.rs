use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sources: SourcesConfig,
    pub workflows: WorkflowsConfig,
    pub matrix: MatrixConfig,
}

/// Remote sources queried on every run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Release cycle feed (endoflife.date format)
    pub feed_url: String,
    /// Docker Hub tag listing for the kind node image
    pub registry_url: String,
    /// Source file holding minikube's supported version list
    pub alternate_url: String,
    /// Name of the slice literal inside `alternate_url`
    pub alternate_list_name: String,
    /// Request timeout in seconds; the transport default applies when unset
    pub timeout_secs: Option<u64>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            feed_url: "https://endoflife.date/api/kubernetes.json".to_string(),
            registry_url: "https://hub.docker.com/v2/repositories/kindest/node/tags".to_string(),
            alternate_url: "https://raw.githubusercontent.com/kubernetes/minikube/master/pkg/minikube/constants/constants_kubernetes_versions.go".to_string(),
            alternate_list_name: "ValidKubernetesVersions".to_string(),
            timeout_secs: None,
        }
    }
}

/// Workflow files carrying line-oriented versions blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowsConfig {
    /// Files to patch, relative to the working directory
    pub files: Vec<String>,
    /// Header tokens that open a versions block
    pub headers: Vec<String>,
}

impl Default for WorkflowsConfig {
    fn default() -> Self {
        Self {
            files: vec![
                ".github/workflows/functional_test.yaml".to_string(),
                ".github/workflows/functional_test_v2.yaml".to_string(),
            ],
            headers: vec!["k8s-version:".to_string(), "kubernetes_version:".to_string()],
        }
    }
}

/// JSON test matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixConfig {
    pub file: String,
    /// Field holding kind image tags
    pub kind_field: String,
    /// Field holding minikube versions
    pub alternate_field: String,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            file: ".github/workflows/configs/e2e-test-matrix.json".to_string(),
            kind_field: "k8s-kind-version".to_string(),
            alternate_field: "k8s-minikube-version".to_string(),
        }
    }
}
