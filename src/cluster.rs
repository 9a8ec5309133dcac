//! # Live Cluster
//!
//! Production wiring of the collaborator traits over the `kubectl` and
//! `helm` CLIs. One `Arc<LiveCluster>` serves the engine as query, remover
//! and expander.

use anyhow::Result;
use async_trait::async_trait;

use crate::cleanup::{ClusterQuery, ReleaseObjectExpander, ResourceRemover};
use crate::helm::HelmClient;
use crate::kubectl::KubectlClient;
use crate::object::K8sObject;

#[derive(Debug)]
pub struct LiveCluster {
    kubectl: KubectlClient,
    helm: HelmClient,
}

impl LiveCluster {
    /// Locate both binaries on `PATH`.
    pub fn new() -> Result<Self> {
        Ok(Self {
            kubectl: KubectlClient::new()?,
            helm: HelmClient::new()?,
        })
    }

    #[must_use]
    pub fn with_clients(kubectl: KubectlClient, helm: HelmClient) -> Self {
        Self { kubectl, helm }
    }

    #[must_use]
    pub fn kubectl(&self) -> &KubectlClient {
        &self.kubectl
    }

    #[must_use]
    pub fn helm(&self) -> &HelmClient {
        &self.helm
    }
}

#[async_trait]
impl ClusterQuery for LiveCluster {
    async fn list_objects(&self, kind: &str, namespace: &str) -> Result<Vec<String>> {
        self.kubectl.list_objects(kind, namespace).await
    }

    async fn list_releases(&self) -> Result<Vec<String>> {
        self.helm.list_releases().await
    }
}

#[async_trait]
impl ResourceRemover for LiveCluster {
    async fn delete_object(&self, kind: &str, name: &str, namespace: &str) -> Result<()> {
        self.kubectl.delete_object(kind, name, namespace).await
    }

    async fn uninstall_release(&self, name: &str) -> Result<()> {
        self.helm.uninstall(name).await
    }
}

#[async_trait]
impl ReleaseObjectExpander for LiveCluster {
    async fn objects_of(&self, release: &str) -> Result<Vec<K8sObject>> {
        self.helm.manifest_objects(release).await
    }
}
