//! Shared test harness: an in-memory cluster implementing the engine's
//! collaborator traits, with injectable per-item failures and a call log for
//! ordering assertions.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

use k8s_cleanup::cleanup::{CleanupEngine, ClusterQuery, ReleaseObjectExpander, ResourceRemover};
use k8s_cleanup::object::K8sObject;

#[derive(Debug, Default)]
struct MockState {
    objects: BTreeMap<String, Vec<String>>,
    releases: Vec<String>,
    release_objects: HashMap<String, Vec<K8sObject>>,
    failing_lists: HashSet<String>,
    failing_deletes: HashSet<String>,
    failing_uninstalls: HashSet<String>,
    failing_expansions: HashSet<String>,
    calls: Vec<String>,
}

/// In-memory stand-in for the live cluster.
#[derive(Debug, Default)]
pub struct MockCluster {
    state: Mutex<MockState>,
}

impl MockCluster {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_objects(&self, kind: &str, names: &[&str]) {
        let mut state = self.state.lock().expect("mock state lock");
        state
            .objects
            .entry(kind.to_string())
            .or_default()
            .extend(names.iter().map(|name| (*name).to_string()));
    }

    pub fn add_release(&self, name: &str) {
        let mut state = self.state.lock().expect("mock state lock");
        state.releases.push(name.to_string());
    }

    pub fn set_release_objects(&self, release: &str, objects: Vec<K8sObject>) {
        let mut state = self.state.lock().expect("mock state lock");
        state.release_objects.insert(release.to_string(), objects);
    }

    pub fn fail_list(&self, kind: &str) {
        let mut state = self.state.lock().expect("mock state lock");
        state.failing_lists.insert(kind.to_string());
    }

    pub fn fail_delete(&self, name: &str) {
        let mut state = self.state.lock().expect("mock state lock");
        state.failing_deletes.insert(name.to_string());
    }

    pub fn fail_uninstall(&self, name: &str) {
        let mut state = self.state.lock().expect("mock state lock");
        state.failing_uninstalls.insert(name.to_string());
    }

    pub fn fail_expansion(&self, release: &str) {
        let mut state = self.state.lock().expect("mock state lock");
        state.failing_expansions.insert(release.to_string());
    }

    pub fn object_names(&self, kind: &str) -> Vec<String> {
        let state = self.state.lock().expect("mock state lock");
        state.objects.get(kind).cloned().unwrap_or_default()
    }

    pub fn release_names(&self) -> Vec<String> {
        let state = self.state.lock().expect("mock state lock");
        state.releases.clone()
    }

    pub fn calls(&self) -> Vec<String> {
        let state = self.state.lock().expect("mock state lock");
        state.calls.clone()
    }
}

#[async_trait]
impl ClusterQuery for MockCluster {
    async fn list_objects(&self, kind: &str, _namespace: &str) -> Result<Vec<String>> {
        let mut state = self.state.lock().expect("mock state lock");
        state.calls.push(format!("list {kind}"));
        if state.failing_lists.contains(kind) {
            return Err(anyhow!("simulated {kind} listing failure"));
        }
        Ok(state.objects.get(kind).cloned().unwrap_or_default())
    }

    async fn list_releases(&self) -> Result<Vec<String>> {
        let mut state = self.state.lock().expect("mock state lock");
        state.calls.push("list releases".to_string());
        Ok(state.releases.clone())
    }
}

#[async_trait]
impl ResourceRemover for MockCluster {
    async fn delete_object(&self, kind: &str, name: &str, _namespace: &str) -> Result<()> {
        let mut state = self.state.lock().expect("mock state lock");
        state.calls.push(format!("delete {kind} {name}"));
        if state.failing_deletes.contains(name) {
            return Err(anyhow!("simulated delete failure"));
        }
        if let Some(names) = state.objects.get_mut(kind) {
            names.retain(|existing| existing != name);
        }
        Ok(())
    }

    async fn uninstall_release(&self, name: &str) -> Result<()> {
        let mut state = self.state.lock().expect("mock state lock");
        state.calls.push(format!("uninstall {name}"));
        if state.failing_uninstalls.contains(name) {
            return Err(anyhow!("release not loaded"));
        }
        state.releases.retain(|existing| existing != name);
        Ok(())
    }
}

#[async_trait]
impl ReleaseObjectExpander for MockCluster {
    async fn objects_of(&self, release: &str) -> Result<Vec<K8sObject>> {
        let mut state = self.state.lock().expect("mock state lock");
        state.calls.push(format!("expand {release}"));
        if state.failing_expansions.contains(release) {
            return Err(anyhow!("release \"{release}\" not found"));
        }
        Ok(state
            .release_objects
            .get(release)
            .cloned()
            .unwrap_or_default())
    }
}

/// Engine wired to one mock cluster for all three collaborator roles.
pub fn engine_for(cluster: &Arc<MockCluster>) -> CleanupEngine {
    let query: Arc<dyn ClusterQuery> = Arc::clone(cluster) as Arc<_>;
    let remover: Arc<dyn ResourceRemover> = Arc::clone(cluster) as Arc<_>;
    let expander: Arc<dyn ReleaseObjectExpander> = Arc::clone(cluster) as Arc<_>;
    CleanupEngine::new(query, remover, expander)
}
