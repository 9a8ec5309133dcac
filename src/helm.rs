//! # Helm Client
//!
//! Drives the `helm` binary (Helm 3): listing installed releases,
//! uninstalling a release, and expanding a release into the Kubernetes
//! objects its rendered manifest owns.

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use tracing::debug;

use crate::exec::{exec, ExecOutput};
use crate::object::K8sObject;

/// Client for the `helm` CLI.
#[derive(Debug, Clone)]
pub struct HelmClient {
    binary: PathBuf,
}

impl HelmClient {
    /// Locate `helm` on `PATH`.
    pub fn new() -> Result<Self> {
        let binary = which::which("helm").context("helm binary not found on PATH")?;
        Ok(Self { binary })
    }

    /// Use an explicit binary path instead of the `PATH` lookup.
    #[must_use]
    pub fn with_binary(binary: PathBuf) -> Self {
        Self { binary }
    }

    async fn exec_helm(&self, args: &[&str]) -> Result<ExecOutput> {
        exec(&self.binary, args).await
    }

    /// Names of all installed releases.
    pub async fn list_releases(&self) -> Result<Vec<String>> {
        let output = self.exec_helm(&["list", "-q"]).await?;

        if !output.success() {
            return Err(anyhow!(
                "helm list failed with code {}: {}",
                output.code,
                output.stderr
            ));
        }

        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Uninstall one release.
    pub async fn uninstall(&self, name: &str) -> Result<()> {
        let output = self.exec_helm(&["uninstall", name]).await?;

        if !output.success() {
            return Err(anyhow!(
                "helm uninstall {name} failed with code {}: {}",
                output.code,
                output.stderr
            ));
        }

        Ok(())
    }

    /// Kubernetes objects owned by a release, read from its rendered
    /// manifest.
    pub async fn manifest_objects(&self, release: &str) -> Result<Vec<K8sObject>> {
        let output = self.exec_helm(&["get", "manifest", release]).await?;

        if !output.success() {
            return Err(anyhow!(
                "helm get manifest {release} failed with code {}: {}",
                output.code,
                output.stderr
            ));
        }

        Ok(parse_manifest_stream(&output.stdout))
    }
}

/// Parse a rendered manifest stream (documents separated by `---`) into
/// objects. Documents that are empty, comment-only, or not object manifests
/// are skipped.
pub(crate) fn parse_manifest_stream(manifest: &str) -> Vec<K8sObject> {
    let documents: Vec<&str> = manifest
        .split("---")
        .map(str::trim)
        .filter(|doc| !doc.is_empty())
        .collect();

    let mut objects = Vec::new();
    for doc in documents {
        match serde_yaml::from_str::<K8sObject>(doc) {
            Ok(object) => objects.push(object),
            Err(_) => {
                debug!("Skipping non-object document in release manifest");
            }
        }
    }

    objects
}
