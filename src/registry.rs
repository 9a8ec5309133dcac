//! # Run Registry
//!
//! Append-only record of the resources an automation run has created or
//! updated. Handlers record into it as they apply manifests and install
//! releases; the cleanup engine only ever reads it. Helm releases are
//! recorded under the sentinel resource class [`RELEASE_CLASS`] so they share
//! the same record shape as plain objects.

use serde::{Deserialize, Serialize};

use crate::object::K8sObject;

/// Sentinel resource class for Helm release entries.
pub const RELEASE_CLASS: &str = "release";

/// One tracked resource: class, identity and the manifest payload it was
/// applied with. The payload is opaque to the cleanup engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredResource {
    pub resource_class: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default)]
    pub manifest: serde_json::Value,
}

/// The registry of a single run. Entries are only ever appended; the cleanup
/// engine borrows it read-only and reports removals through its own summary
/// instead of mutating the record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunRegistry {
    entries: Vec<RegisteredResource>,
}

impl RunRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn record(&mut self, entry: RegisteredResource) {
        self.entries.push(entry);
    }

    /// Record an applied object under its own kind.
    pub fn record_object(&mut self, object: &K8sObject) {
        self.record(RegisteredResource {
            resource_class: object.kind.clone(),
            name: object.metadata.name.clone(),
            namespace: object.metadata.namespace.clone(),
            manifest: serde_json::to_value(object).unwrap_or_default(),
        });
    }

    /// Record an installed Helm release under the sentinel class.
    pub fn record_release(&mut self, name: &str) {
        self.record(RegisteredResource {
            resource_class: RELEASE_CLASS.to_string(),
            name: name.to_string(),
            namespace: None,
            manifest: serde_json::Value::Null,
        });
    }

    #[must_use]
    pub fn entries(&self) -> &[RegisteredResource] {
        &self.entries
    }

    pub fn entries_of<'a>(
        &'a self,
        resource_class: &'a str,
    ) -> impl Iterator<Item = &'a RegisteredResource> {
        self.entries
            .iter()
            .filter(move |entry| entry.resource_class == resource_class)
    }

    /// Names of all tracked Helm releases.
    #[must_use]
    pub fn release_names(&self) -> Vec<String> {
        self.entries_of(RELEASE_CLASS)
            .map(|entry| entry.name.clone())
            .collect()
    }

    /// Names of tracked objects of one kind inside one namespace. Entries
    /// recorded without a namespace never match.
    #[must_use]
    pub fn names_of(&self, resource_class: &str, namespace: &str) -> Vec<String> {
        self.entries_of(resource_class)
            .filter(|entry| entry.namespace.as_deref() == Some(namespace))
            .map(|entry| entry.name.clone())
            .collect()
    }
}
