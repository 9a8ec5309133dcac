//! # Cleanup Engine
//!
//! Reconciles live cluster state against the run registry and removes
//! orphans: objects and releases the cluster holds but the current run never
//! tracked and no tracked release owns.
//!
//! ## Reconciliation Flow
//!
//! 1. Validate options and resolve the kind list
//! 2. Expand every tracked release into the objects it owns (concurrently;
//!    a failed expansion is logged and skipped)
//! 3. Reconcile releases: installed minus tracked, allow-filtered
//! 4. Reconcile each kind strictly in list order: cluster names minus
//!    (tracked names plus release-owned names), allow-filtered
//!
//! Removals within one batch run concurrently; outcomes are logged in
//! listing order so scheduling never reorders the log stream.

use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::object::K8sObject;
use crate::registry::{RunRegistry, RELEASE_CLASS};

use super::error::CleanupError;
use super::filter::is_allowed;
use super::options::{CleanupOptions, HELM_ALLOW_KEY};
use super::report;
use super::traits::{ClusterQuery, ReleaseObjectExpander, ResourceRemover};

/// Identity of one removed (or removal-attempted) resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
    /// Object kind, or [`RELEASE_CLASS`] for Helm releases.
    pub resource_class: String,
    pub name: String,
    pub namespace: Option<String>,
}

impl ResourceId {
    fn release(name: &str) -> Self {
        Self {
            resource_class: RELEASE_CLASS.to_string(),
            name: name.to_string(),
            namespace: None,
        }
    }

    fn object(kind: &str, name: &str, namespace: &str) -> Self {
        Self {
            resource_class: kind.to_string(),
            name: name.to_string(),
            namespace: Some(namespace.to_string()),
        }
    }
}

/// What one cleanup pass did. A dry run reports nothing here; candidates
/// only ever reach the log stream.
#[derive(Debug, Clone, Default)]
pub struct CleanupSummary {
    /// Successfully removed resources, in reconciliation order.
    pub removed: Vec<ResourceId>,
    /// Resources whose removal was attempted and failed (already logged).
    pub failed: Vec<ResourceId>,
}

impl CleanupSummary {
    fn extend(&mut self, other: CleanupSummary) {
        self.removed.extend(other.removed);
        self.failed.extend(other.failed);
    }
}

/// The reconciliation engine. Collaborators are injected at construction;
/// the engine keeps no state between passes.
pub struct CleanupEngine {
    query: Arc<dyn ClusterQuery>,
    remover: Arc<dyn ResourceRemover>,
    expander: Arc<dyn ReleaseObjectExpander>,
}

impl std::fmt::Debug for CleanupEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CleanupEngine").finish_non_exhaustive()
    }
}

impl CleanupEngine {
    #[must_use]
    pub fn new(
        query: Arc<dyn ClusterQuery>,
        remover: Arc<dyn ResourceRemover>,
        expander: Arc<dyn ReleaseObjectExpander>,
    ) -> Self {
        Self {
            query,
            remover,
            expander,
        }
    }

    /// Run one cleanup pass.
    ///
    /// The registry is read-only; removals are reported in the returned
    /// summary. A listing failure skips only the affected resource class and
    /// surfaces after every class has been attempted.
    pub async fn cleanup(
        &self,
        options: &CleanupOptions,
        registry: &RunRegistry,
    ) -> Result<CleanupSummary, CleanupError> {
        options.validate()?;

        let kinds = options.resolved_kinds();
        let tracked_releases = registry.release_names();
        let release_owned = self.expand_tracked_releases(&tracked_releases).await;

        let mut summary = CleanupSummary::default();
        let mut failures: Vec<CleanupError> = Vec::new();

        // Releases reconcile before any kind: a release may own objects that
        // must stay excluded from the per-kind orphan sets.
        match self.reconcile_releases(options, &tracked_releases).await {
            Ok(batch) => summary.extend(batch),
            Err(e) => failures.push(e),
        }

        for kind in &kinds {
            match self
                .reconcile_kind(options, registry, kind, &release_owned)
                .await
            {
                Ok(batch) => summary.extend(batch),
                Err(e) => failures.push(e),
            }
        }

        if failures.is_empty() {
            Ok(summary)
        } else if failures.len() == 1 {
            Err(failures.remove(0))
        } else {
            Err(CleanupError::Partial(failures))
        }
    }

    /// Expand every tracked release into the objects it owns. A release that
    /// fails to expand (already partially gone, for instance) contributes
    /// nothing and does not block the others.
    async fn expand_tracked_releases(&self, tracked: &[String]) -> Vec<K8sObject> {
        let expansions = join_all(tracked.iter().map(|name| self.expander.objects_of(name))).await;

        let mut owned = Vec::new();
        for (name, result) in tracked.iter().zip(expansions) {
            match result {
                Ok(objects) => {
                    debug!(
                        "Helm release \"{}\" owns {} objects",
                        name,
                        objects.len()
                    );
                    owned.extend(objects);
                }
                Err(e) => {
                    warn!("Failed to expand objects of helm release \"{}\": {}", name, e);
                }
            }
        }
        owned
    }

    async fn reconcile_releases(
        &self,
        options: &CleanupOptions,
        tracked: &[String],
    ) -> Result<CleanupSummary, CleanupError> {
        let installed = self
            .query
            .list_releases()
            .await
            .map_err(|source| CleanupError::ReleaseQuery { source })?;

        let orphans = find_orphans(
            &installed,
            tracked,
            options.allowed_patterns(HELM_ALLOW_KEY),
        );

        let mut summary = CleanupSummary::default();

        if options.dry_run {
            if !orphans.is_empty() {
                info!(
                    "{}",
                    report::orphans_found_line(report::HELM_REPORT_LABEL, &orphans)
                );
            }
            return Ok(summary);
        }

        let results = join_all(
            orphans
                .iter()
                .map(|name| self.remover.uninstall_release(name)),
        )
        .await;

        for (name, result) in orphans.iter().zip(results) {
            match result {
                Ok(()) => {
                    info!("{}", report::deleted_line(report::HELM_ITEM_LABEL, name));
                    summary.removed.push(ResourceId::release(name));
                }
                Err(e) => {
                    warn!(
                        "{}",
                        report::delete_failed_line(report::HELM_ITEM_LABEL, name, &e.to_string())
                    );
                    summary.failed.push(ResourceId::release(name));
                }
            }
        }

        Ok(summary)
    }

    async fn reconcile_kind(
        &self,
        options: &CleanupOptions,
        registry: &RunRegistry,
        kind: &str,
        release_owned: &[K8sObject],
    ) -> Result<CleanupSummary, CleanupError> {
        let namespace = options.namespace.as_str();

        let mut excluded = registry.names_of(kind, namespace);
        excluded.extend(
            release_owned
                .iter()
                .filter(|object| object.kind == kind)
                .map(|object| object.metadata.name.clone()),
        );

        let in_cluster = self
            .query
            .list_objects(kind, namespace)
            .await
            .map_err(|source| CleanupError::ObjectQuery {
                kind: kind.to_string(),
                namespace: namespace.to_string(),
                source,
            })?;

        let orphans = find_orphans(&in_cluster, &excluded, options.allowed_patterns(kind));

        let mut summary = CleanupSummary::default();

        if options.dry_run {
            if !orphans.is_empty() {
                info!("{}", report::orphans_found_line(kind, &orphans));
            }
            return Ok(summary);
        }

        let results = join_all(
            orphans
                .iter()
                .map(|name| self.remover.delete_object(kind, name, namespace)),
        )
        .await;

        for (name, result) in orphans.iter().zip(results) {
            match result {
                Ok(()) => {
                    info!("{}", report::deleted_line(kind, name));
                    summary.removed.push(ResourceId::object(kind, name, namespace));
                }
                Err(e) => {
                    warn!(
                        "{}",
                        report::delete_failed_line(kind, name, &e.to_string())
                    );
                    summary.failed.push(ResourceId::object(kind, name, namespace));
                }
            }
        }

        Ok(summary)
    }
}

/// Cluster names minus excluded names, minus allow-listed names.
/// Cluster-query order is preserved.
fn find_orphans(in_cluster: &[String], excluded: &[String], patterns: &[String]) -> Vec<String> {
    in_cluster
        .iter()
        .filter(|&name| !excluded.contains(name))
        .filter(|&name| !is_allowed(name, patterns))
        .cloned()
        .collect()
}
