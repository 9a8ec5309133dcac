//! # Kubernetes Object Model
//!
//! Minimal manifest representation used across the crate. Manifests are
//! deliberately permissive: anything beyond `apiVersion`, `kind` and the
//! identity fields of `metadata` is carried through untouched.

use serde::{Deserialize, Serialize};

/// A Kubernetes object manifest.
///
/// Only the fields the cleanup pass cares about are typed; the rest of the
/// document is preserved in `body` so manifests survive a round-trip through
/// the registry and `kubectl apply`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct K8sObject {
    pub api_version: String,
    pub kind: String,
    pub metadata: K8sMetadata,
    #[serde(flatten)]
    pub body: serde_json::Map<String, serde_json::Value>,
}

/// Object identity plus whatever else the manifest carried under `metadata`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct K8sMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl K8sObject {
    /// Build a bare reference manifest (identity only, `v1` API group).
    pub fn reference(kind: &str, name: &str, namespace: Option<&str>) -> Self {
        Self {
            api_version: "v1".to_string(),
            kind: kind.to_string(),
            metadata: K8sMetadata {
                name: name.to_string(),
                namespace: namespace.map(str::to_string),
                extra: serde_json::Map::new(),
            },
            body: serde_json::Map::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}
