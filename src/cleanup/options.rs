//! # Cleanup Options
//!
//! Typed input contract for one cleanup pass. Shape validation is explicit
//! and happens before any cluster call; unknown keys in an options document
//! are rejected at deserialization time.

use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::CleanupError;

/// Kinds reconciled when the caller does not name any.
///
/// Order matters: PersistentVolumeClaim must go before StorageClass, or on
/// some backends (AWS) the claim's class is still referenced and the delete
/// fails.
pub const DEFAULT_KINDS: [&str; 4] = [
    "PersistentVolumeClaim",
    "StorageClass",
    "Secret",
    "ConfigMap",
];

/// Key in [`CleanupOptions::allowed`] that protects Helm releases.
pub const HELM_ALLOW_KEY: &str = "helms";

/// Options for one cleanup pass. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CleanupOptions {
    /// Report orphans without removing anything.
    #[serde(default)]
    pub dry_run: bool,

    /// Namespace scoping all object listings and deletions.
    pub namespace: String,

    /// Resource kinds to reconcile, in deletion order. Defaults to
    /// [`DEFAULT_KINDS`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kinds: Option<Vec<String>>,

    /// Glob patterns per resource class (key [`HELM_ALLOW_KEY`] for
    /// releases). A matching name is protected from removal even when
    /// orphaned.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub allowed: BTreeMap<String, Vec<String>>,
}

impl CleanupOptions {
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            dry_run: false,
            namespace: namespace.into(),
            kinds: None,
            allowed: BTreeMap::new(),
        }
    }

    /// Validate the option shape. Any failure here is fatal to the pass.
    pub fn validate(&self) -> Result<(), CleanupError> {
        if self.namespace.trim().is_empty() {
            return Err(CleanupError::InvalidOptions(
                "namespace is required but is empty".to_string(),
            ));
        }

        if let Some(kinds) = &self.kinds {
            if kinds.is_empty() {
                return Err(CleanupError::InvalidOptions(
                    "kinds must name at least one resource kind when given".to_string(),
                ));
            }
            if kinds.iter().any(|kind| kind.trim().is_empty()) {
                return Err(CleanupError::InvalidOptions(
                    "kinds must not contain empty names".to_string(),
                ));
            }
        }

        for (class, patterns) in &self.allowed {
            for pattern in patterns {
                if let Err(e) = Pattern::new(pattern) {
                    return Err(CleanupError::InvalidOptions(format!(
                        "invalid allow pattern \"{pattern}\" for {class}: {e}"
                    )));
                }
            }
        }

        Ok(())
    }

    /// The kind list this pass reconciles, in order.
    #[must_use]
    pub fn resolved_kinds(&self) -> Vec<String> {
        match &self.kinds {
            Some(kinds) => kinds.clone(),
            None => DEFAULT_KINDS.iter().map(|kind| (*kind).to_string()).collect(),
        }
    }

    /// Allow patterns for one resource class; empty when none configured.
    #[must_use]
    pub fn allowed_patterns(&self, resource_class: &str) -> &[String] {
        self.allowed
            .get(resource_class)
            .map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_kind_order_keeps_claims_before_storage_classes() {
        let options = CleanupOptions::new("dev");
        let kinds = options.resolved_kinds();
        assert_eq!(
            kinds,
            vec!["PersistentVolumeClaim", "StorageClass", "Secret", "ConfigMap"]
        );
    }

    #[test]
    fn test_explicit_kinds_override_defaults() {
        let mut options = CleanupOptions::new("dev");
        options.kinds = Some(vec!["ConfigMap".to_string()]);
        assert_eq!(options.resolved_kinds(), vec!["ConfigMap"]);
    }

    #[test]
    fn test_empty_namespace_is_rejected() {
        let options = CleanupOptions::new("");
        assert!(matches!(
            options.validate(),
            Err(CleanupError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_empty_kind_list_is_rejected() {
        let mut options = CleanupOptions::new("dev");
        options.kinds = Some(Vec::new());
        assert!(matches!(
            options.validate(),
            Err(CleanupError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_invalid_glob_pattern_is_rejected() {
        let mut options = CleanupOptions::new("dev");
        options
            .allowed
            .insert("ConfigMap".to_string(), vec!["[unclosed".to_string()]);
        assert!(matches!(
            options.validate(),
            Err(CleanupError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_valid_options_pass_validation() {
        let mut options = CleanupOptions::new("dev");
        options
            .allowed
            .insert(HELM_ALLOW_KEY.to_string(), vec!["infra-*".to_string()]);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_options_document_parses_with_defaults() {
        let yaml = "namespace: dev\n";
        let options: CleanupOptions = serde_yaml::from_str(yaml).expect("document should parse");
        assert!(!options.dry_run);
        assert!(options.kinds.is_none());
        assert!(options.allowed.is_empty());
    }

    #[test]
    fn test_options_document_full_shape() {
        let yaml = r"
dryRun: true
namespace: dev
kinds:
  - ConfigMap
  - Secret
allowed:
  helms:
    - 'infra-*'
  ConfigMap:
    - kube-root-ca.crt
";
        let options: CleanupOptions = serde_yaml::from_str(yaml).expect("document should parse");
        assert!(options.dry_run);
        assert_eq!(options.allowed_patterns(HELM_ALLOW_KEY), ["infra-*"]);
        assert_eq!(options.allowed_patterns("ConfigMap"), ["kube-root-ca.crt"]);
        assert!(options.allowed_patterns("Secret").is_empty());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let yaml = "namespace: dev\nignored:\n  helms:\n    - 'infra-*'\n";
        assert!(serde_yaml::from_str::<CleanupOptions>(yaml).is_err());
    }
}
