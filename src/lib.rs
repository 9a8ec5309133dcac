//! # K8s Cleanup
//!
//! Reconciles live Kubernetes cluster state against the resources an
//! automation run has tracked, and removes orphans: objects and Helm
//! releases the cluster holds but nobody owns anymore.
//!
//! The core is [`cleanup::CleanupEngine`]; it talks to the cluster through
//! injected collaborator traits, so the `kubectl`/`helm` wiring in
//! [`cluster::LiveCluster`] stays replaceable in tests.

pub mod cleanup;
pub mod cluster;
pub mod exec;
pub mod helm;
pub mod kubectl;
pub mod object;
pub mod registry;

pub use cleanup::{
    CleanupEngine, CleanupError, CleanupOptions, CleanupSummary, ResourceId, DEFAULT_KINDS,
    HELM_ALLOW_KEY,
};
pub use cluster::LiveCluster;
pub use object::{K8sMetadata, K8sObject};
pub use registry::{RegisteredResource, RunRegistry, RELEASE_CLASS};
