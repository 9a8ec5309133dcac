//! # Collaborator Seams
//!
//! The cleanup engine talks to the cluster exclusively through these traits.
//! Production wires all three to [`crate::cluster::LiveCluster`]; tests
//! substitute an in-memory cluster.

use anyhow::Result;
use async_trait::async_trait;

use crate::object::K8sObject;

/// Read-only view of live cluster state.
#[async_trait]
pub trait ClusterQuery: Send + Sync {
    /// Bare names of all objects of one kind inside a namespace.
    async fn list_objects(&self, kind: &str, namespace: &str) -> Result<Vec<String>>;

    /// Names of all installed Helm releases.
    async fn list_releases(&self) -> Result<Vec<String>>;
}

/// Removes one resource at a time; each call may fail independently.
#[async_trait]
pub trait ResourceRemover: Send + Sync {
    async fn delete_object(&self, kind: &str, name: &str, namespace: &str) -> Result<()>;

    async fn uninstall_release(&self, name: &str) -> Result<()>;
}

/// Expands a release into the object manifests it owns.
#[async_trait]
pub trait ReleaseObjectExpander: Send + Sync {
    async fn objects_of(&self, release: &str) -> Result<Vec<K8sObject>>;
}
