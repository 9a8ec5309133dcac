//! # Cleanup Errors
//!
//! Only two failure classes surface at call level: malformed options and
//! failed cluster listings. Removal and expansion failures stay in the log
//! stream.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CleanupError {
    /// Rejected before any reconciliation starts.
    #[error("invalid cleanup options: {0}")]
    InvalidOptions(String),

    /// Listing installed releases failed; release reconciliation was skipped.
    #[error("failed to list installed helm releases: {source}")]
    ReleaseQuery {
        #[source]
        source: anyhow::Error,
    },

    /// Listing cluster objects of one kind failed; that kind was skipped,
    /// later kinds still reconciled.
    #[error("failed to list {kind} objects in namespace \"{namespace}\": {source}")]
    ObjectQuery {
        kind: String,
        namespace: String,
        #[source]
        source: anyhow::Error,
    },

    /// More than one listing failed within a single pass.
    #[error("cleanup pass finished with {} reconciliation failures", .0.len())]
    Partial(Vec<CleanupError>),
}
