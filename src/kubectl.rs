//! # Kubectl Client
//!
//! Drives the `kubectl` binary: listing, fetching, applying and deleting
//! namespaced objects. Listing returns bare object names; apply records the
//! outcome into the run registry so later cleanup passes know what this run
//! owns.

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

use crate::exec::{exec, ExecOutput};
use crate::object::K8sObject;
use crate::registry::RunRegistry;

/// Outcome of a `kubectl apply` for one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Created,
    Configured,
}

/// Client for the `kubectl` CLI.
#[derive(Debug, Clone)]
pub struct KubectlClient {
    binary: PathBuf,
}

impl KubectlClient {
    /// Locate `kubectl` on `PATH`.
    pub fn new() -> Result<Self> {
        let binary = which::which("kubectl").context("kubectl binary not found on PATH")?;
        Ok(Self { binary })
    }

    /// Use an explicit binary path instead of the `PATH` lookup.
    #[must_use]
    pub fn with_binary(binary: PathBuf) -> Self {
        Self { binary }
    }

    async fn exec_kubectl(&self, args: &[&str]) -> Result<ExecOutput> {
        exec(&self.binary, args).await
    }

    /// List bare names of all objects of one kind inside a namespace.
    pub async fn list_objects(&self, kind: &str, namespace: &str) -> Result<Vec<String>> {
        let output = self
            .exec_kubectl(&["get", kind, "--namespace", namespace, "-o", "name"])
            .await?;

        if !output.success() {
            return Err(anyhow!(
                "kubectl get {kind} failed with code {}: {}",
                output.code,
                output.stderr
            ));
        }

        Ok(parse_name_list(&output.stdout))
    }

    /// Delete one object by kind and name.
    pub async fn delete_object(&self, kind: &str, name: &str, namespace: &str) -> Result<()> {
        let output = self
            .exec_kubectl(&["delete", kind, name, "-n", namespace])
            .await?;

        if !output.success() {
            return Err(anyhow!(
                "kubectl delete {kind} {name} failed with code {}: {}",
                output.code,
                output.stderr
            ));
        }

        Ok(())
    }

    /// Fetch one object as JSON.
    pub async fn get_object(
        &self,
        kind: &str,
        name: &str,
        namespace: Option<&str>,
    ) -> Result<serde_json::Value> {
        let mut args = vec!["get", kind, name];
        if let Some(namespace) = namespace {
            args.push("--namespace");
            args.push(namespace);
        }
        args.push("-o");
        args.push("json");

        let output = self.exec_kubectl(&args).await?;

        if output.stderr.starts_with("Error from server (NotFound)") {
            return Err(anyhow!("{kind} \"{name}\" not found"));
        }

        if !output.success() {
            return Err(anyhow!(
                "kubectl get {kind} {name} failed with code {}: {}",
                output.code,
                output.stderr
            ));
        }

        serde_json::from_str(&output.stdout).context("Failed to parse kubectl get output as JSON")
    }

    /// Apply a manifest and record it into the run registry. Returns whether
    /// the object was created or an existing one was configured.
    pub async fn apply_object(
        &self,
        object: &K8sObject,
        registry: &mut RunRegistry,
    ) -> Result<ApplyOutcome> {
        let manifest =
            serde_yaml::to_string(object).context("Failed to serialize manifest to YAML")?;

        let file = tempfile::Builder::new()
            .suffix(".yml")
            .tempfile()
            .context("Failed to create temporary manifest file")?;
        tokio::fs::write(file.path(), &manifest)
            .await
            .context("Failed to write temporary manifest file")?;

        let path = file.path().to_string_lossy().to_string();
        let output = self.exec_kubectl(&["apply", "-f", path.as_str()]).await?;

        if !output.success() {
            return Err(anyhow!(
                "Unable to apply {} \"{}\": {}",
                object.kind,
                object.name(),
                output.stderr
            ));
        }

        registry.record_object(object);

        // kubectl reports "<kind>/<name> created" or "... configured"
        if output.stdout.split_whitespace().nth(1) == Some("created") {
            Ok(ApplyOutcome::Created)
        } else {
            Ok(ApplyOutcome::Configured)
        }
    }
}

/// Parse `kubectl get -o name` output: one `<kind>/<name>` per line.
pub(crate) fn parse_name_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| line.trim().split('/').next_back())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
