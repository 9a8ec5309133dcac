//! # Outcome Reporting
//!
//! Log-line formatting for dry-run reports and per-item removal outcomes.
//! The wording is part of the crate's contract; operators and tests match on
//! these lines verbatim.

/// Label used in dry-run report lines for releases.
pub(crate) const HELM_REPORT_LABEL: &str = "helm release";

/// Label used in per-item outcome lines for releases.
pub(crate) const HELM_ITEM_LABEL: &str = "Helm release";

/// Dry-run report line for a non-empty orphan set.
pub(crate) fn orphans_found_line(label: &str, orphans: &[String]) -> String {
    format!(
        "Found following {label}s to be cleaned up: {}",
        orphans.join(", ")
    )
}

/// Outcome line for one successful removal.
pub(crate) fn deleted_line(label: &str, name: &str) -> String {
    format!("{label} \"{name}\" deleted")
}

/// Outcome line for one failed removal.
pub(crate) fn delete_failed_line(label: &str, name: &str, error: &str) -> String {
    format!("{label} \"{name}\" failed to delete: {error}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helm_dry_run_line() {
        let orphans = vec!["stale-api".to_string(), "stale-worker".to_string()];
        assert_eq!(
            orphans_found_line(HELM_REPORT_LABEL, &orphans),
            "Found following helm releases to be cleaned up: stale-api, stale-worker"
        );
    }

    #[test]
    fn test_kind_dry_run_line() {
        let orphans = vec!["config-cluster".to_string()];
        assert_eq!(
            orphans_found_line("ConfigMap", &orphans),
            "Found following ConfigMaps to be cleaned up: config-cluster"
        );
    }

    #[test]
    fn test_helm_outcome_lines() {
        assert_eq!(
            deleted_line(HELM_ITEM_LABEL, "stale-api"),
            "Helm release \"stale-api\" deleted"
        );
        assert_eq!(
            delete_failed_line(HELM_ITEM_LABEL, "stale-api", "release not loaded"),
            "Helm release \"stale-api\" failed to delete: release not loaded"
        );
    }

    #[test]
    fn test_kind_outcome_lines() {
        assert_eq!(
            deleted_line("Secret", "stray-token"),
            "Secret \"stray-token\" deleted"
        );
        assert_eq!(
            delete_failed_line("Secret", "stray-token", "forbidden"),
            "Secret \"stray-token\" failed to delete: forbidden"
        );
    }
}
